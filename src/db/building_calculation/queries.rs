use super::schema::{self, BuildingCalculation, Columns};
use crate::zoning::{ZoningInput, ZoningResult};
use crate::Result;
use rusqlite::{named_params, params, Connection};

pub fn insert(
    project_id: i64,
    input: &ZoningInput,
    result: &ZoningResult,
    conn: &Connection,
) -> Result<BuildingCalculation> {
    let sql = format!(
        r#"
            INSERT INTO {table} (
                {project_id},
                {site_area},
                {road_width},
                {coverage_ratio},
                {floor_area_ratio},
                {zone_type},
                {buildable_area},
                {total_floor_area},
                {road_width_limit},
                {effective_ratio}
            ) VALUES (
                :project_id,
                :site_area,
                :road_width,
                :coverage_ratio,
                :floor_area_ratio,
                :zone_type,
                :buildable_area,
                :total_floor_area,
                :road_width_limit,
                :effective_ratio
            )
        "#,
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        site_area = Columns::SiteArea.as_str(),
        road_width = Columns::RoadWidth.as_str(),
        coverage_ratio = Columns::CoverageRatio.as_str(),
        floor_area_ratio = Columns::FloorAreaRatio.as_str(),
        zone_type = Columns::ZoneType.as_str(),
        buildable_area = Columns::BuildableArea.as_str(),
        total_floor_area = Columns::TotalFloorArea.as_str(),
        road_width_limit = Columns::RoadWidthLimit.as_str(),
        effective_ratio = Columns::EffectiveRatio.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":project_id": project_id,
            ":site_area": input.site_area,
            ":road_width": input.road_width,
            ":coverage_ratio": input.coverage_ratio,
            ":floor_area_ratio": input.floor_area_ratio,
            ":zone_type": input.zone_type,
            ":buildable_area": result.buildable_area,
            ":total_floor_area": result.total_floor_area,
            ":road_width_limit": result.road_width_limit,
            ":effective_ratio": result.effective_ratio,
        },
    )?;
    select_by_id(conn.last_insert_rowid(), conn)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<BuildingCalculation> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = BuildingCalculation::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_row(params![id], BuildingCalculation::mapper())
        .map_err(Into::into)
}

pub fn select_by_project_id(
    project_id: i64,
    conn: &Connection,
) -> Result<Vec<BuildingCalculation>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {project_id} = ?1
            ORDER BY {created_at} DESC, {id} DESC
        "#,
        projection = BuildingCalculation::projection(),
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(params![project_id], BuildingCalculation::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::project::queries as project_queries;
    use crate::db::project::schema::ProjectStatus;
    use crate::zoning;
    use crate::{test::mock_conn, Result};

    #[test]
    fn insert_and_select_history() -> Result<()> {
        let conn = mock_conn();
        let project =
            project_queries::insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;

        let input = zoning::ZoningInput {
            site_area: 200.0,
            road_width: 6.0,
            coverage_ratio: 60.0,
            floor_area_ratio: 200.0,
            zone_type: "第一種住居地域".into(),
        };
        let result = zoning::compute_limits(&input);
        let first = insert(project.id, &input, &result, &conn)?;
        assert_eq!(first.buildable_area, 120.0);
        assert_eq!(first.total_floor_area, 400.0);

        let narrower = zoning::ZoningInput {
            road_width: 3.0,
            ..input.clone()
        };
        insert(project.id, &narrower, &zoning::compute_limits(&narrower), &conn)?;

        let history = select_by_project_id(project.id, &conn)?;
        assert_eq!(history.len(), 2);
        // Newest first
        assert_eq!(history[1].id, first.id);
        assert_eq!(history[0].road_width, 3.0);
        assert_eq!(history[0].total_floor_area, 240.0);
        Ok(())
    }

    #[test]
    fn empty_history() -> Result<()> {
        let conn = mock_conn();
        let project =
            project_queries::insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;
        assert!(select_by_project_id(project.id, &conn)?.is_empty());
        Ok(())
    }
}
