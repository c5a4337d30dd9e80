use crate::conf::Conf;
use crate::geo::GeoPoint;
use crate::{Error, Result};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    result: Option<ResponseResult>,
}

#[derive(Debug, Deserialize)]
struct ResponseResult {
    info: Info,
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Info {
    hit: i64,
}

#[derive(Debug, Deserialize)]
struct Item {
    // [lng, lat], the upstream flips the usual order
    position: [f64; 2],
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct GeocodedAddress {
    pub point: GeoPoint,
    pub address: Option<String>,
}

/// Resolves a free-form address via the map vendor's geocoder and returns
/// the best match.
pub async fn search_address(word: &str, conf: &Conf) -> Result<GeocodedAddress> {
    let response = reqwest::Client::new()
        .post(&conf.zenrin_search_url)
        .header("x-api-key", &conf.zenrin_api_key)
        .header("Authorization", "referer")
        .form(&[("word", word), ("word_match_type", "3")])
        .send()
        .await?;

    info!(http_status_code = ?response.status(), "Got geocoder response");

    if !response.status().is_success() {
        return Err(Error::GeocodingApi(format!(
            "Geocoder returned HTTP {}",
            response.status()
        )));
    }

    first_hit(response.json::<Response>().await?)
}

fn first_hit(response: Response) -> Result<GeocodedAddress> {
    if response.status != "OK" {
        return Err(Error::GeocodingApi(format!(
            "Geocoder returned status {}",
            response.status
        )));
    }
    let result = response
        .result
        .ok_or(Error::GeocodingApi("Geocoder returned no result".into()))?;
    if result.info.hit == 0 {
        return Err(Error::NotFound("No matching address".into()));
    }
    let item = result
        .item
        .into_iter()
        .next()
        .ok_or(Error::GeocodingApi("Geocoder hit count disagrees with items".into()))?;
    let [lng, lat] = item.position;
    Ok(GeocodedAddress {
        point: GeoPoint::new(lat, lng)?,
        address: item.address,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Error, Result};
    use serde_json::json;

    #[test]
    fn first_hit_takes_the_best_match() -> Result<()> {
        let response: Response = serde_json::from_value(json!({
            "status": "OK",
            "result": {
                "info": { "hit": 2 },
                "item": [
                    { "position": [139.7671, 35.6814], "address": "東京都千代田区丸の内１丁目" },
                    { "position": [139.0, 35.0] },
                ],
            },
        }))?;
        let res = first_hit(response)?;
        assert_eq!(res.point.lat(), 35.6814);
        assert_eq!(res.point.lng(), 139.7671);
        assert_eq!(res.address.as_deref(), Some("東京都千代田区丸の内１丁目"));
        Ok(())
    }

    #[test]
    fn first_hit_maps_zero_hits_to_not_found() -> Result<()> {
        let response: Response = serde_json::from_value(json!({
            "status": "OK",
            "result": { "info": { "hit": 0 }, "item": [] },
        }))?;
        assert!(matches!(first_hit(response), Err(Error::NotFound(_))));
        Ok(())
    }

    #[test]
    fn first_hit_rejects_upstream_errors() -> Result<()> {
        let response: Response = serde_json::from_value(json!({
            "status": "ERROR",
        }))?;
        assert!(matches!(first_hit(response), Err(Error::GeocodingApi(_))));
        Ok(())
    }
}
