use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "building_calculation";

pub enum Columns {
    Id,
    ProjectId,
    SiteArea,
    RoadWidth,
    CoverageRatio,
    FloorAreaRatio,
    ZoneType,
    BuildableArea,
    TotalFloorArea,
    RoadWidthLimit,
    EffectiveRatio,
    CreatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::ProjectId => "project_id",
            Columns::SiteArea => "site_area",
            Columns::RoadWidth => "road_width",
            Columns::CoverageRatio => "coverage_ratio",
            Columns::FloorAreaRatio => "floor_area_ratio",
            Columns::ZoneType => "zone_type",
            Columns::BuildableArea => "buildable_area",
            Columns::TotalFloorArea => "total_floor_area",
            Columns::RoadWidthLimit => "road_width_limit",
            Columns::EffectiveRatio => "effective_ratio",
            Columns::CreatedAt => "created_at",
        }
    }
}

/// A persisted calculation: the inputs the user supplied alongside the
/// outputs the server derived from them.
#[derive(Debug, PartialEq)]
pub struct BuildingCalculation {
    pub id: i64,
    pub project_id: i64,
    pub site_area: f64,
    pub road_width: f64,
    pub coverage_ratio: f64,
    pub floor_area_ratio: f64,
    pub zone_type: String,
    pub buildable_area: f64,
    pub total_floor_area: f64,
    pub road_width_limit: f64,
    pub effective_ratio: f64,
    pub created_at: OffsetDateTime,
}

impl BuildingCalculation {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::ProjectId,
                Columns::SiteArea,
                Columns::RoadWidth,
                Columns::CoverageRatio,
                Columns::FloorAreaRatio,
                Columns::ZoneType,
                Columns::BuildableArea,
                Columns::TotalFloorArea,
                Columns::RoadWidthLimit,
                Columns::EffectiveRatio,
                Columns::CreatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<BuildingCalculation> {
        |row: &_| {
            Ok(BuildingCalculation {
                id: row.get(Columns::Id.as_str())?,
                project_id: row.get(Columns::ProjectId.as_str())?,
                site_area: row.get(Columns::SiteArea.as_str())?,
                road_width: row.get(Columns::RoadWidth.as_str())?,
                coverage_ratio: row.get(Columns::CoverageRatio.as_str())?,
                floor_area_ratio: row.get(Columns::FloorAreaRatio.as_str())?,
                zone_type: row.get(Columns::ZoneType.as_str())?,
                buildable_area: row.get(Columns::BuildableArea.as_str())?,
                total_floor_area: row.get(Columns::TotalFloorArea.as_str())?,
                road_width_limit: row.get(Columns::RoadWidthLimit.as_str())?,
                effective_ratio: row.get(Columns::EffectiveRatio.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
            })
        }
    }
}
