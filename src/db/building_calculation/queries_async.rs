use super::{queries, schema::BuildingCalculation};
use crate::zoning::{ZoningInput, ZoningResult};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn insert(
    project_id: i64,
    input: ZoningInput,
    result: ZoningResult,
    pool: &Pool,
) -> Result<BuildingCalculation> {
    pool.get()
        .await?
        .interact(move |conn| queries::insert(project_id, &input, &result, conn))
        .await?
}

pub async fn select_by_project_id(project_id: i64, pool: &Pool) -> Result<Vec<BuildingCalculation>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_project_id(project_id, conn))
        .await?
}
