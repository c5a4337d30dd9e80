use super::projects::select_existing;
use crate::db::building_calculation::queries_async;
use crate::db::building_calculation::schema::BuildingCalculation;
use crate::zoning::{self, ZoningInput, ZoningResult};
use crate::Result;
use actix_web::web::{Data, Json, Path};
use actix_web::{get, post};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Calculation inputs as they arrive from the form: camelCase keys,
/// values that may be numbers or numeric strings, any of them absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationArgs {
    #[serde(default)]
    site_area: Option<Value>,
    #[serde(default)]
    road_width: Option<Value>,
    #[serde(default)]
    coverage_ratio: Option<Value>,
    #[serde(default)]
    floor_area_ratio: Option<Value>,
    #[serde(default)]
    zone_type: Option<String>,
}

impl CalculationArgs {
    fn parse(&self) -> Result<ZoningInput> {
        ZoningInput::parse(
            self.site_area.as_ref(),
            self.road_width.as_ref(),
            self.coverage_ratio.as_ref(),
            self.floor_area_ratio.as_ref(),
            self.zone_type.as_deref(),
        )
    }
}

#[derive(Serialize, Deserialize)]
pub struct GetItem {
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
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<BuildingCalculation> for GetItem {
    fn from(val: BuildingCalculation) -> Self {
        GetItem {
            id: val.id,
            project_id: val.project_id,
            site_area: val.site_area,
            road_width: val.road_width,
            coverage_ratio: val.coverage_ratio,
            floor_area_ratio: val.floor_area_ratio,
            zone_type: val.zone_type,
            buildable_area: val.buildable_area,
            total_floor_area: val.total_floor_area,
            road_width_limit: val.road_width_limit,
            effective_ratio: val.effective_ratio,
            created_at: val.created_at,
        }
    }
}

/// Runs the calculator without persisting anything.
#[post("{id}/building-calculation")]
pub async fn post_compute(
    id: Path<i64>,
    args: Json<CalculationArgs>,
    pool: Data<Pool>,
) -> Result<Json<ZoningResult>> {
    select_existing(*id, &pool).await?;
    let input = args.parse()?;
    Ok(Json(zoning::compute_limits(&input)))
}

/// Runs the calculator and appends the result to the project's history.
/// The outputs are always derived server-side from the submitted inputs,
/// never taken from the client.
#[post("{id}/building-calculations")]
pub async fn post_history(
    id: Path<i64>,
    args: Json<CalculationArgs>,
    pool: Data<Pool>,
) -> Result<Json<GetItem>> {
    select_existing(*id, &pool).await?;
    let input = args.parse()?;
    let result = zoning::compute_limits(&input);
    queries_async::insert(*id, input, result, &pool)
        .await
        .map(|it| Json(it.into()))
}

#[get("{id}/building-calculations")]
pub async fn get_history(id: Path<i64>, pool: Data<Pool>) -> Result<Json<Vec<GetItem>>> {
    select_existing(*id, &pool).await?;
    queries_async::select_by_project_id(*id, &pool)
        .await
        .map(|items| Json(items.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::project::queries as project_queries;
    use crate::db::project::schema::ProjectStatus;
    use crate::test::mock_db;
    use crate::{ApiError, Result};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::web::scope;
    use actix_web::{test, App};
    use serde_json::json;

    #[test]
    async fn compute_residential_case() -> Result<()> {
        let db = mock_db().await;
        let project = project_queries::insert(
            "計画A",
            None,
            None,
            None,
            ProjectStatus::Planning,
            &db.conn,
        )?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.pool))
                .service(scope("").service(super::post_compute)),
        )
        .await;
        let req = TestRequest::post()
            .uri(&format!("/{}/building-calculation", project.id))
            .set_json(json!({
                "siteArea": 200,
                "roadWidth": 6,
                "coverageRatio": 60,
                "floorAreaRatio": 200,
                "zoneType": "第一種住居地域",
            }))
            .to_request();
        let res: ZoningResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res.road_width_limit, 240.0);
        assert_eq!(res.effective_ratio, 200.0);
        assert_eq!(res.total_floor_area, 400.0);
        assert_eq!(res.buildable_area, 120.0);
        Ok(())
    }

    #[test]
    async fn compute_narrow_road_case() -> Result<()> {
        let db = mock_db().await;
        let project = project_queries::insert(
            "計画A",
            None,
            None,
            None,
            ProjectStatus::Planning,
            &db.conn,
        )?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.pool))
                .service(scope("").service(super::post_compute)),
        )
        .await;
        let req = TestRequest::post()
            .uri(&format!("/{}/building-calculation", project.id))
            .set_json(json!({
                "siteArea": "200",
                "roadWidth": "3",
                "coverageRatio": "60",
                "floorAreaRatio": "200",
                "zoneType": "第一種住居地域",
            }))
            .to_request();
        let res: ZoningResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res.road_width_limit, 120.0);
        assert_eq!(res.effective_ratio, 120.0);
        assert_eq!(res.total_floor_area, 240.0);
        Ok(())
    }

    #[test]
    async fn compute_missing_parameter() -> Result<()> {
        let db = mock_db().await;
        let project = project_queries::insert(
            "計画A",
            None,
            None,
            None,
            ProjectStatus::Planning,
            &db.conn,
        )?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.pool))
                .service(scope("").service(super::post_compute)),
        )
        .await;
        let req = TestRequest::post()
            .uri(&format!("/{}/building-calculation", project.id))
            .set_json(json!({
                "siteArea": 200,
                "coverageRatio": 60,
                "floorAreaRatio": 200,
                "zoneType": "第一種住居地域",
            }))
            .to_request();
        let res: ApiError = test::try_call_and_read_body_json(&app, req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST.as_u16(), res.http_code);
        assert!(res.message.contains("roadWidth"));
        Ok(())
    }

    #[test]
    async fn persisted_history_round() -> Result<()> {
        let db = mock_db().await;
        let project = project_queries::insert(
            "計画A",
            None,
            None,
            None,
            ProjectStatus::Planning,
            &db.conn,
        )?;
        let app = test::init_service(
            App::new().app_data(Data::new(db.pool)).service(
                scope("")
                    .service(super::post_history)
                    .service(super::get_history),
            ),
        )
        .await;
        let req = TestRequest::post()
            .uri(&format!("/{}/building-calculations", project.id))
            .set_json(json!({
                "siteArea": 200,
                "roadWidth": 6,
                "coverageRatio": 60,
                "floorAreaRatio": 200,
                "zoneType": "商業地域",
            }))
            .to_request();
        let created: GetItem = test::call_and_read_body_json(&app, req).await;
        // Non-residential multiplier, cap doesn't bind
        assert_eq!(created.road_width_limit, 360.0);
        assert_eq!(created.effective_ratio, 200.0);

        let req = TestRequest::get()
            .uri(&format!("/{}/building-calculations", project.id))
            .to_request();
        let history: Vec<GetItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, created.id);
        Ok(())
    }

    #[test]
    async fn compute_for_missing_project() -> Result<()> {
        let db = mock_db().await;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.pool))
                .service(scope("").service(super::post_compute)),
        )
        .await;
        let req = TestRequest::post()
            .uri("/123/building-calculation")
            .set_json(json!({}))
            .to_request();
        let res: ApiError = test::try_call_and_read_body_json(&app, req).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND.as_u16(), res.http_code);
        Ok(())
    }
}
