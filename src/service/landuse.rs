use crate::conf::Conf;
use crate::geo::{self, BoundingBox, GeoPoint};
use crate::zoning::district::{self, ScenicDistrict};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Fixed over-approximation around the queried point. Large enough that
/// the point always falls inside the returned query window regardless of
/// the map service's pixel resolution.
pub const QUERY_BUFFER_METERS: f64 = 500.0;

const QUERY_WINDOW_PX: u32 = 101;

/// Zoning attributes of a single point, with raw service codes already
/// mapped to display labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanduseInfo {
    pub zone_type: Option<String>,
    pub fire_area: Option<String>,
    pub coverage_ratio: Option<f64>,
    pub floor_area_ratio: Option<f64>,
    pub height_district: Option<Vec<String>>,
    pub area_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenic_district: Option<ScenicDistrict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kokuji_id: Option<String>,
}

/// Asks the zoning map service which districts the point falls into.
pub async fn query_point(point: &GeoPoint, conf: &Conf) -> Result<LanduseInfo> {
    let bbox = geo::point_to_buffered_bbox(point, QUERY_BUFFER_METERS)?;

    let response = reqwest::Client::new()
        .get(&conf.zenrin_wms_url)
        .header("x-api-key", &conf.zenrin_api_key)
        .header("Authorization", "referer")
        .query(&feature_info_params(&bbox))
        .send()
        .await?;

    info!(http_status_code = ?response.status(), "Got zoning map response");

    if !response.status().is_success() {
        return Err(Error::LanduseApi(format!(
            "Zoning map service returned HTTP {}",
            response.status()
        )));
    }

    feature_to_info(&response.json::<Value>().await?)
}

/// WMS GetFeatureInfo query for the center pixel of a small window around
/// the buffered bbox.
fn feature_info_params(bbox: &BoundingBox) -> Vec<(&'static str, String)> {
    vec![
        ("VERSION", "1.3.0".into()),
        ("REQUEST", "GetFeatureInfo".into()),
        ("LAYERS", "lp1".into()),
        ("QUERY_LAYERS", "lp1".into()),
        ("CRS", "EPSG:3857".into()),
        ("BBOX", bbox.to_bbox_param()),
        ("WIDTH", QUERY_WINDOW_PX.to_string()),
        ("HEIGHT", QUERY_WINDOW_PX.to_string()),
        ("I", (QUERY_WINDOW_PX / 2).to_string()),
        ("J", (QUERY_WINDOW_PX / 2).to_string()),
        ("INFO_FORMAT", "application/json".into()),
        ("FEATURE_COUNT", "1".into()),
    ]
}

fn feature_to_info(response: &Value) -> Result<LanduseInfo> {
    let feature = response
        .get("features")
        .and_then(|it| it.get(0))
        .ok_or(Error::NotFound("No zoning data for this point".into()))?;
    let props = feature
        .get("properties")
        .ok_or(Error::LanduseApi("Feature without properties".into()))?;

    Ok(LanduseInfo {
        zone_type: str_prop(props, "youto")
            .and_then(|it| district::zone_type_label(&it).map(Into::into)),
        fire_area: str_prop(props, "bouka")
            .and_then(|it| district::fire_area_label(&it).map(Into::into)),
        coverage_ratio: num_prop(props, "kenpei"),
        floor_area_ratio: num_prop(props, "yoseki"),
        height_district: str_prop(props, "koudo")
            .as_deref()
            .and_then(district::parse_height_district),
        area_classification: str_prop(props, "tokei")
            .and_then(|it| district::area_classification_label(&it).map(Into::into)),
        scenic_district: district::parse_scenic_district(
            str_prop(props, "fuchi_name").as_deref(),
            str_prop(props, "fuchi_type").as_deref(),
        ),
        kokuji_id: str_prop(props, "kokuji_id"),
    })
}

/// The service is inconsistent about types: codes arrive both as strings
/// and as bare numbers.
fn str_prop(props: &Value, name: &str) -> Option<String> {
    match props.get(name)? {
        Value::String(it) if !it.is_empty() => Some(it.clone()),
        Value::Number(it) => Some(it.to_string()),
        _ => None,
    }
}

fn num_prop(props: &Value, name: &str) -> Option<f64> {
    match props.get(name)? {
        Value::Number(it) => it.as_f64(),
        Value::String(it) => it.parse().ok(),
        _ => None,
    }
}
