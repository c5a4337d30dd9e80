use super::projects::select_existing;
use crate::db::legal_info::queries_async;
use crate::db::legal_info::schema::{LegalInfo, LegalInfoFields};
use crate::{Error, Result};
use actix_web::web::{Data, Json, Path};
use actix_web::{get, post};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize, Deserialize)]
pub struct GetItem {
    pub project_id: i64,
    #[serde(flatten)]
    pub fields: LegalInfoFields,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<LegalInfo> for GetItem {
    fn from(val: LegalInfo) -> Self {
        GetItem {
            project_id: val.project_id,
            fields: val.fields,
            updated_at: val.updated_at,
        }
    }
}

#[get("{id}/legal-info")]
pub async fn get_by_project(id: Path<i64>, pool: Data<Pool>) -> Result<Json<GetItem>> {
    select_existing(*id, &pool).await?;
    queries_async::select_by_project_id(*id, &pool)
        .await
        .map(|it| Json(it.into()))
        .map_err(|e| match e {
            Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows) => {
                Error::NotFound(format!("Project {id} has no legal info yet"))
            }
            other => other,
        })
}

#[post("{id}/legal-info")]
pub async fn post_by_project(
    id: Path<i64>,
    args: Json<LegalInfoFields>,
    pool: Data<Pool>,
) -> Result<Json<GetItem>> {
    select_existing(*id, &pool).await?;
    queries_async::upsert(*id, args.into_inner(), &pool)
        .await
        .map(|it| Json(it.into()))
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
    async fn upsert_then_get() -> Result<()> {
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
                    .service(super::get_by_project)
                    .service(super::post_by_project),
            ),
        )
        .await;

        let req = TestRequest::post()
            .uri(&format!("/{}/legal-info", project.id))
            .set_json(json!({
                "zone_type": "第１種住居地域",
                "fire_area": "準防火地域",
                "coverage_ratio": 60.0,
                "floor_area_ratio": 200.0,
                "height_district": "2:30m",
            }))
            .to_request();
        let created: GetItem = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.fields.zone_type.as_deref(), Some("第１種住居地域"));

        // Second write overwrites in place
        let req = TestRequest::post()
            .uri(&format!("/{}/legal-info", project.id))
            .set_json(json!({ "zone_type": "商業地域" }))
            .to_request();
        let updated: GetItem = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.fields.zone_type.as_deref(), Some("商業地域"));
        assert_eq!(updated.fields.coverage_ratio, None);

        let req = TestRequest::get()
            .uri(&format!("/{}/legal-info", project.id))
            .to_request();
        let fetched: GetItem = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.fields.zone_type.as_deref(), Some("商業地域"));
        Ok(())
    }

    #[test]
    async fn get_without_legal_info_is_not_found() -> Result<()> {
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
                .service(scope("").service(super::get_by_project)),
        )
        .await;
        let req = TestRequest::get()
            .uri(&format!("/{}/legal-info", project.id))
            .to_request();
        let res: ApiError = test::try_call_and_read_body_json(&app, req).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND.as_u16(), res.http_code);
        Ok(())
    }

    #[test]
    async fn post_to_missing_project_is_not_found() -> Result<()> {
        let db = mock_db().await;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.pool))
                .service(scope("").service(super::post_by_project)),
        )
        .await;
        let req = TestRequest::post()
            .uri("/123/legal-info")
            .set_json(json!({ "zone_type": "商業地域" }))
            .to_request();
        let res: ApiError = test::try_call_and_read_body_json(&app, req).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND.as_u16(), res.http_code);
        Ok(())
    }
}
