use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "legal_info";

pub enum Columns {
    Id,
    ProjectId,
    ZoneType,
    FireArea,
    CoverageRatio,
    CoverageRatio2,
    FloorAreaRatio,
    HeightDistrict,
    HeightDistrict2,
    ZoneMap,
    ScenicZoneName,
    ScenicZoneType,
    Article48,
    Appendix2,
    SafetyOrdinance,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::ProjectId => "project_id",
            Columns::ZoneType => "zone_type",
            Columns::FireArea => "fire_area",
            Columns::CoverageRatio => "coverage_ratio",
            Columns::CoverageRatio2 => "coverage_ratio2",
            Columns::FloorAreaRatio => "floor_area_ratio",
            Columns::HeightDistrict => "height_district",
            Columns::HeightDistrict2 => "height_district2",
            Columns::ZoneMap => "zone_map",
            Columns::ScenicZoneName => "scenic_zone_name",
            Columns::ScenicZoneType => "scenic_zone_type",
            Columns::Article48 => "article_48",
            Columns::Appendix2 => "appendix_2",
            Columns::SafetyOrdinance => "safety_ordinance",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }
}

/// The editable zoning attributes of a legal info row. Kept separate from
/// the full row so the REST layer can deserialize request bodies straight
/// into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalInfoFields {
    pub zone_type: Option<String>,
    pub fire_area: Option<String>,
    pub coverage_ratio: Option<f64>,
    pub coverage_ratio2: Option<f64>,
    pub floor_area_ratio: Option<f64>,
    pub height_district: Option<String>,
    pub height_district2: Option<String>,
    pub zone_map: Option<String>,
    pub scenic_zone_name: Option<String>,
    pub scenic_zone_type: Option<String>,
    pub article_48: Option<String>,
    pub appendix_2: Option<String>,
    pub safety_ordinance: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct LegalInfo {
    pub id: i64,
    pub project_id: i64,
    pub fields: LegalInfoFields,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl LegalInfo {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::ProjectId,
                Columns::ZoneType,
                Columns::FireArea,
                Columns::CoverageRatio,
                Columns::CoverageRatio2,
                Columns::FloorAreaRatio,
                Columns::HeightDistrict,
                Columns::HeightDistrict2,
                Columns::ZoneMap,
                Columns::ScenicZoneName,
                Columns::ScenicZoneType,
                Columns::Article48,
                Columns::Appendix2,
                Columns::SafetyOrdinance,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<LegalInfo> {
        |row: &_| {
            Ok(LegalInfo {
                id: row.get(Columns::Id.as_str())?,
                project_id: row.get(Columns::ProjectId.as_str())?,
                fields: LegalInfoFields {
                    zone_type: row.get(Columns::ZoneType.as_str())?,
                    fire_area: row.get(Columns::FireArea.as_str())?,
                    coverage_ratio: row.get(Columns::CoverageRatio.as_str())?,
                    coverage_ratio2: row.get(Columns::CoverageRatio2.as_str())?,
                    floor_area_ratio: row.get(Columns::FloorAreaRatio.as_str())?,
                    height_district: row.get(Columns::HeightDistrict.as_str())?,
                    height_district2: row.get(Columns::HeightDistrict2.as_str())?,
                    zone_map: row.get(Columns::ZoneMap.as_str())?,
                    scenic_zone_name: row.get(Columns::ScenicZoneName.as_str())?,
                    scenic_zone_type: row.get(Columns::ScenicZoneType.as_str())?,
                    article_48: row.get(Columns::Article48.as_str())?,
                    appendix_2: row.get(Columns::Appendix2.as_str())?,
                    safety_ordinance: row.get(Columns::SafetyOrdinance.as_str())?,
                },
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }
}
