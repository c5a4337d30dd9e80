use super::{
    queries,
    schema::{Project, ProjectStatus},
};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

pub async fn insert(
    name: impl Into<String>,
    location: Option<String>,
    scale: Option<String>,
    usage_type: Option<String>,
    status: ProjectStatus,
    pool: &Pool,
) -> Result<Project> {
    let name = name.into();
    pool.get()
        .await?
        .interact(move |conn| {
            queries::insert(
                &name,
                location.as_deref(),
                scale.as_deref(),
                usage_type.as_deref(),
                status,
                conn,
            )
        })
        .await?
}

pub async fn select_all(status: Option<ProjectStatus>, pool: &Pool) -> Result<Vec<Project>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_all(status, conn))
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Project> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_id(id, conn))
        .await?
}

pub async fn patch(
    id: i64,
    name: Option<String>,
    location: Option<String>,
    scale: Option<String>,
    usage_type: Option<String>,
    status: Option<ProjectStatus>,
    pool: &Pool,
) -> Result<Project> {
    pool.get()
        .await?
        .interact(move |conn| {
            queries::patch(
                id,
                name.as_deref(),
                location.as_deref(),
                scale.as_deref(),
                usage_type.as_deref(),
                status,
                conn,
            )
        })
        .await?
}

pub async fn set_deleted_at(
    id: i64,
    deleted_at: Option<OffsetDateTime>,
    pool: &Pool,
) -> Result<Project> {
    pool.get()
        .await?
        .interact(move |conn| queries::set_deleted_at(id, deleted_at, conn))
        .await?
}
