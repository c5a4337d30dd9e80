use super::{queries, schema::ProjectKokuji};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn insert(
    project_id: i64,
    kokuji_id: impl Into<String>,
    kokuji_text: impl Into<String>,
    memo: Option<String>,
    pool: &Pool,
) -> Result<ProjectKokuji> {
    let kokuji_id = kokuji_id.into();
    let kokuji_text = kokuji_text.into();
    pool.get()
        .await?
        .interact(move |conn| {
            queries::insert(project_id, &kokuji_id, &kokuji_text, memo.as_deref(), conn)
        })
        .await?
}

pub async fn select_by_project_id(project_id: i64, pool: &Pool) -> Result<Vec<ProjectKokuji>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_project_id(project_id, conn))
        .await?
}

pub async fn delete(project_id: i64, kokuji_id: impl Into<String>, pool: &Pool) -> Result<usize> {
    let kokuji_id = kokuji_id.into();
    pool.get()
        .await?
        .interact(move |conn| queries::delete(project_id, &kokuji_id, conn))
        .await?
}
