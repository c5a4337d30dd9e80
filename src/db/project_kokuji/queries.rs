use super::schema::{self, Columns, ProjectKokuji};
use crate::Result;
use rusqlite::{named_params, params, Connection};

pub fn insert(
    project_id: i64,
    kokuji_id: &str,
    kokuji_text: &str,
    memo: Option<&str>,
    conn: &Connection,
) -> Result<ProjectKokuji> {
    let sql = format!(
        r#"
            INSERT INTO {table} (
                {project_id},
                {kokuji_id},
                {kokuji_text},
                {memo}
            ) VALUES (
                :project_id,
                :kokuji_id,
                :kokuji_text,
                :memo
            )
        "#,
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        kokuji_id = Columns::KokujiId.as_str(),
        kokuji_text = Columns::KokujiText.as_str(),
        memo = Columns::Memo.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":project_id": project_id,
            ":kokuji_id": kokuji_id,
            ":kokuji_text": kokuji_text,
            ":memo": memo,
        },
    )?;
    select_by_id(conn.last_insert_rowid(), conn)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<ProjectKokuji> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = ProjectKokuji::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_row(params![id], ProjectKokuji::mapper())
        .map_err(Into::into)
}

pub fn select_by_project_id(project_id: i64, conn: &Connection) -> Result<Vec<ProjectKokuji>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {project_id} = ?1
            ORDER BY {created_at} DESC, {id} DESC
        "#,
        projection = ProjectKokuji::projection(),
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(params![project_id], ProjectKokuji::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Returns the number of removed links (0 when none existed).
pub fn delete(project_id: i64, kokuji_id: &str, conn: &Connection) -> Result<usize> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {project_id} = :project_id AND {kokuji_id} = :kokuji_id
        "#,
        table = schema::TABLE_NAME,
        project_id = Columns::ProjectId.as_str(),
        kokuji_id = Columns::KokujiId.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":project_id": project_id,
            ":kokuji_id": kokuji_id,
        },
    )
    .map_err(Into::into)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::project::queries as project_queries;
    use crate::db::project::schema::ProjectStatus;
    use crate::{test::mock_conn, Result};

    #[test]
    fn insert_select_delete() -> Result<()> {
        let conn = mock_conn();
        let project =
            project_queries::insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;

        let row = insert(
            project.id,
            "412K500040001453",
            "建設省告示第千四百六十一号…",
            Some("斜線制限の緩和"),
            &conn,
        )?;
        assert_eq!(row.kokuji_id, "412K500040001453");
        assert_eq!(row.memo.as_deref(), Some("斜線制限の緩和"));

        insert(project.id, "412K500040001454", "別の告示…", None, &conn)?;
        let rows = select_by_project_id(project.id, &conn)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kokuji_id, "412K500040001454");

        assert_eq!(delete(project.id, "412K500040001453", &conn)?, 1);
        assert_eq!(delete(project.id, "412K500040001453", &conn)?, 0);
        assert_eq!(select_by_project_id(project.id, &conn)?.len(), 1);
        Ok(())
    }
}
