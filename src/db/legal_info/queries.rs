use super::schema::{self, Columns, LegalInfo, LegalInfoFields};
use crate::Result;
use rusqlite::{named_params, params, Connection};

/// One legal info row per project: inserts on first write, overwrites all
/// editable fields afterwards.
pub fn upsert(project_id: i64, fields: &LegalInfoFields, conn: &Connection) -> Result<LegalInfo> {
    let sql = format!(
        r#"
            INSERT INTO {table} (
                {project_id},
                {zone_type},
                {fire_area},
                {coverage_ratio},
                {coverage_ratio2},
                {floor_area_ratio},
                {height_district},
                {height_district2},
                {zone_map},
                {scenic_zone_name},
                {scenic_zone_type},
                {article_48},
                {appendix_2},
                {safety_ordinance}
            ) VALUES (
                :project_id,
                :zone_type,
                :fire_area,
                :coverage_ratio,
                :coverage_ratio2,
                :floor_area_ratio,
                :height_district,
                :height_district2,
                :zone_map,
                :scenic_zone_name,
                :scenic_zone_type,
                :article_48,
                :appendix_2,
                :safety_ordinance
            )
            ON CONFLICT ({project_id}) DO UPDATE SET
                {zone_type} = excluded.{zone_type},
                {fire_area} = excluded.{fire_area},
                {coverage_ratio} = excluded.{coverage_ratio},
                {coverage_ratio2} = excluded.{coverage_ratio2},
                {floor_area_ratio} = excluded.{floor_area_ratio},
                {height_district} = excluded.{height_district},
                {height_district2} = excluded.{height_district2},
                {zone_map} = excluded.{zone_map},
                {scenic_zone_name} = excluded.{scenic_zone_name},
                {scenic_zone_type} = excluded.{scenic_zone_type},
                {article_48} = excluded.{article_48},
                {appendix_2} = excluded.{appendix_2},
                {safety_ordinance} = excluded.{safety_ordinance}
        "#,
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        zone_type = Columns::ZoneType.as_str(),
        fire_area = Columns::FireArea.as_str(),
        coverage_ratio = Columns::CoverageRatio.as_str(),
        coverage_ratio2 = Columns::CoverageRatio2.as_str(),
        floor_area_ratio = Columns::FloorAreaRatio.as_str(),
        height_district = Columns::HeightDistrict.as_str(),
        height_district2 = Columns::HeightDistrict2.as_str(),
        zone_map = Columns::ZoneMap.as_str(),
        scenic_zone_name = Columns::ScenicZoneName.as_str(),
        scenic_zone_type = Columns::ScenicZoneType.as_str(),
        article_48 = Columns::Article48.as_str(),
        appendix_2 = Columns::Appendix2.as_str(),
        safety_ordinance = Columns::SafetyOrdinance.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":project_id": project_id,
            ":zone_type": fields.zone_type,
            ":fire_area": fields.fire_area,
            ":coverage_ratio": fields.coverage_ratio,
            ":coverage_ratio2": fields.coverage_ratio2,
            ":floor_area_ratio": fields.floor_area_ratio,
            ":height_district": fields.height_district,
            ":height_district2": fields.height_district2,
            ":zone_map": fields.zone_map,
            ":scenic_zone_name": fields.scenic_zone_name,
            ":scenic_zone_type": fields.scenic_zone_type,
            ":article_48": fields.article_48,
            ":appendix_2": fields.appendix_2,
            ":safety_ordinance": fields.safety_ordinance,
        },
    )?;
    select_by_project_id(project_id, conn)
}

pub fn select_by_project_id(project_id: i64, conn: &Connection) -> Result<LegalInfo> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {project_id} = ?1
        "#,
        projection = LegalInfo::projection(),
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
    );
    conn.prepare(&sql)?
        .query_row(params![project_id], LegalInfo::mapper())
        .map_err(Into::into)
}
