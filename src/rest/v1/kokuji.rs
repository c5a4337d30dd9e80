use super::projects::select_existing;
use crate::conf::Conf;
use crate::db::project_kokuji::queries_async;
use crate::db::project_kokuji::schema::ProjectKokuji;
use crate::service;
use crate::service::kokuji::{Kokuji, KokujiSummary};
use crate::{Error, Result};
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[get("")]
pub async fn get(conf: Data<Conf>) -> Result<Json<Vec<KokujiSummary>>> {
    service::kokuji::list(&conf).await.map(Json)
}

#[get("{kokuji_id}")]
pub async fn get_by_id(kokuji_id: Path<String>, conf: Data<Conf>) -> Result<Json<Kokuji>> {
    service::kokuji::fetch(&kokuji_id, &conf).await.map(Json)
}

#[derive(Serialize, Deserialize)]
pub struct GetItem {
    pub id: i64,
    pub project_id: i64,
    pub kokuji_id: String,
    pub kokuji_text: String,
    pub memo: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ProjectKokuji> for GetItem {
    fn from(val: ProjectKokuji) -> Self {
        GetItem {
            id: val.id,
            project_id: val.project_id,
            kokuji_id: val.kokuji_id,
            kokuji_text: val.kokuji_text,
            memo: val.memo,
            created_at: val.created_at,
        }
    }
}

#[get("{id}/kokuji")]
pub async fn get_by_project(id: Path<i64>, pool: Data<Pool>) -> Result<Json<Vec<GetItem>>> {
    select_existing(*id, &pool).await?;
    queries_async::select_by_project_id(*id, &pool)
        .await
        .map(|items| Json(items.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct PostArgs {
    kokuji_id: String,
    kokuji_text: String,
    memo: Option<String>,
}

#[post("{id}/kokuji")]
pub async fn post_by_project(
    id: Path<i64>,
    args: Json<PostArgs>,
    pool: Data<Pool>,
) -> Result<Json<GetItem>> {
    select_existing(*id, &pool).await?;
    let args = args.into_inner();
    if args.kokuji_id.trim().is_empty() {
        return Err(Error::InvalidInput("Notice ID can't be empty".into()));
    }
    queries_async::insert(*id, args.kokuji_id, args.kokuji_text, args.memo, &pool)
        .await
        .map(|it| Json(it.into()))
}

#[delete("{id}/kokuji/{kokuji_id}")]
pub async fn delete_by_project(
    args: Path<(i64, String)>,
    pool: Data<Pool>,
) -> Result<Json<serde_json::Value>> {
    let (id, kokuji_id) = args.into_inner();
    select_existing(id, &pool).await?;
    let affected = queries_async::delete(id, kokuji_id.clone(), &pool).await?;
    if affected == 0 {
        return Err(Error::NotFound(format!(
            "Project {id} has no stored notice {kokuji_id}"
        )));
    }
    Ok(Json(serde_json::json!({ "deleted": affected })))
}
