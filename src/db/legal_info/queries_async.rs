use super::{
    queries,
    schema::{LegalInfo, LegalInfoFields},
};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn upsert(project_id: i64, fields: LegalInfoFields, pool: &Pool) -> Result<LegalInfo> {
    pool.get()
        .await?
        .interact(move |conn| queries::upsert(project_id, &fields, conn))
        .await?
}

pub async fn select_by_project_id(project_id: i64, pool: &Pool) -> Result<LegalInfo> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_project_id(project_id, conn))
        .await?
}
