pub mod district;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zone names containing this substring get the stricter residential
/// road width multiplier. The upstream zoning map service hands us
/// localized zone names, so this is a plain substring test, matching the
/// behavior the frontend has always had.
pub const RESIDENTIAL_MARKER: &str = "住居";

const RESIDENTIAL_ROAD_WIDTH_MULTIPLIER: f64 = 0.4;
const NON_RESIDENTIAL_ROAD_WIDTH_MULTIPLIER: f64 = 0.6;

/// Validated inputs for a building limit calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoningInput {
    pub site_area: f64,
    pub road_width: f64,
    pub coverage_ratio: f64,
    pub floor_area_ratio: f64,
    pub zone_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningResult {
    pub buildable_area: f64,
    pub total_floor_area: f64,
    pub road_width_limit: f64,
    pub effective_ratio: f64,
}

impl ZoningInput {
    /// Builds an input from raw JSON fields as they arrive over HTTP.
    /// Fields may be absent, null, numbers, or numeric strings. The first
    /// absent field wins the `MissingParameter` error; anything present
    /// but not convertible to a finite number is an `InvalidNumber`.
    pub fn parse(
        site_area: Option<&Value>,
        road_width: Option<&Value>,
        coverage_ratio: Option<&Value>,
        floor_area_ratio: Option<&Value>,
        zone_type: Option<&str>,
    ) -> Result<ZoningInput> {
        let site_area = require_number("siteArea", site_area)?;
        let road_width = require_number("roadWidth", road_width)?;
        let coverage_ratio = require_number("coverageRatio", coverage_ratio)?;
        let floor_area_ratio = require_number("floorAreaRatio", floor_area_ratio)?;
        let zone_type = match zone_type {
            Some(it) if !it.is_empty() => it.to_string(),
            _ => return Err(Error::MissingParameter("zoneType".into())),
        };
        Ok(ZoningInput {
            site_area,
            road_width,
            coverage_ratio,
            floor_area_ratio,
            zone_type,
        })
    }
}

fn require_number(field: &str, value: Option<&Value>) -> Result<f64> {
    let value = match value {
        None | Some(Value::Null) => return Err(Error::MissingParameter(field.into())),
        Some(Value::String(it)) if it.trim().is_empty() => {
            return Err(Error::MissingParameter(field.into()))
        }
        Some(it) => it,
    };
    let num = match value {
        Value::Number(it) => it.as_f64(),
        Value::String(it) => it.trim().parse::<f64>().ok(),
        _ => None,
    };
    match num {
        Some(it) if it.is_finite() => Ok(it),
        _ => Err(Error::InvalidNumber(field.into())),
    }
}

/// Applies the simplified building code model. The legal floor area ratio
/// is the more restrictive of the zoning plan ratio and the front road
/// width derived cap; coverage is independent of road width.
pub fn compute_limits(input: &ZoningInput) -> ZoningResult {
    let multiplier = if input.zone_type.contains(RESIDENTIAL_MARKER) {
        RESIDENTIAL_ROAD_WIDTH_MULTIPLIER
    } else {
        NON_RESIDENTIAL_ROAD_WIDTH_MULTIPLIER
    };
    let road_width_limit = input.road_width * multiplier * 100.0;
    let effective_ratio = input.floor_area_ratio.min(road_width_limit);
    ZoningResult {
        buildable_area: input.site_area * input.coverage_ratio / 100.0,
        total_floor_area: input.site_area * effective_ratio / 100.0,
        road_width_limit,
        effective_ratio,
    }
}
