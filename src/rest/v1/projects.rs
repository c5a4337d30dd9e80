use crate::db::project::queries_async;
use crate::db::project::schema::{Project, ProjectStatus};
use crate::{Error, Result};
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, patch, post};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize, Deserialize)]
pub struct GetItem {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub scale: Option<String>,
    pub usage_type: Option<String>,
    pub status: ProjectStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Project> for GetItem {
    fn from(val: Project) -> Self {
        GetItem {
            id: val.id,
            name: val.name,
            location: val.location,
            scale: val.scale,
            usage_type: val.usage_type,
            status: val.status,
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct GetArgs {
    status: Option<ProjectStatus>,
}

#[get("")]
pub async fn get(args: Query<GetArgs>, pool: Data<Pool>) -> Result<Json<Vec<GetItem>>> {
    queries_async::select_all(args.status, &pool)
        .await
        .map(|items| Json(items.into_iter().map(Into::into).collect()))
}

#[get("{id}")]
pub async fn get_by_id(id: Path<i64>, pool: Data<Pool>) -> Result<Json<GetItem>> {
    let project = select_existing(*id, &pool).await?;
    Ok(Json(project.into()))
}

#[derive(Deserialize)]
pub struct PostArgs {
    name: String,
    location: Option<String>,
    scale: Option<String>,
    usage_type: Option<String>,
    status: Option<ProjectStatus>,
}

#[post("")]
pub async fn post(args: Json<PostArgs>, pool: Data<Pool>) -> Result<Json<GetItem>> {
    let args = args.into_inner();
    if args.name.trim().is_empty() {
        return Err(Error::InvalidInput("Project name can't be empty".into()));
    }
    queries_async::insert(
        args.name,
        args.location,
        args.scale,
        args.usage_type,
        args.status.unwrap_or(ProjectStatus::Planning),
        &pool,
    )
    .await
    .map(|it| Json(it.into()))
    .map_err(map_unique_name_err)
}

#[derive(Deserialize)]
pub struct PatchArgs {
    name: Option<String>,
    location: Option<String>,
    scale: Option<String>,
    usage_type: Option<String>,
    status: Option<ProjectStatus>,
}

#[patch("{id}")]
pub async fn patch_by_id(
    id: Path<i64>,
    args: Json<PatchArgs>,
    pool: Data<Pool>,
) -> Result<Json<GetItem>> {
    let args = args.into_inner();
    select_existing(*id, &pool).await?;
    if args.name.as_deref().is_some_and(|it| it.trim().is_empty()) {
        return Err(Error::InvalidInput("Project name can't be empty".into()));
    }
    queries_async::patch(
        *id,
        args.name,
        args.location,
        args.scale,
        args.usage_type,
        args.status,
        &pool,
    )
    .await
    .map(|it| Json(it.into()))
    .map_err(map_unique_name_err)
}

#[delete("{id}")]
pub async fn delete_by_id(id: Path<i64>, pool: Data<Pool>) -> Result<Json<GetItem>> {
    select_existing(*id, &pool).await?;
    queries_async::set_deleted_at(*id, Some(OffsetDateTime::now_utc()), &pool)
        .await
        .map(|it| Json(it.into()))
}

/// Fetches a project, treating both absent and soft-deleted rows as 404.
pub async fn select_existing(id: i64, pool: &Pool) -> Result<Project> {
    let project = queries_async::select_by_id(id, pool)
        .await
        .map_err(|e| match e {
            Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows) => {
                Error::NotFound(format!("There's no project with ID {id}"))
            }
            other => other,
        })?;
    if project.deleted_at.is_some() {
        return Err(Error::NotFound(format!("There's no project with ID {id}")));
    }
    Ok(project)
}

fn map_unique_name_err(e: Error) -> Error {
    match e {
        Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::HttpConflict("Project name is already taken".into())
        }
        other => other,
    }
}
