use super::schema::{self, Columns, Project, ProjectStatus};
use crate::Result;
use rusqlite::{named_params, params, Connection};
use time::OffsetDateTime;

pub fn insert(
    name: &str,
    location: Option<&str>,
    scale: Option<&str>,
    usage_type: Option<&str>,
    status: ProjectStatus,
    conn: &Connection,
) -> Result<Project> {
    let sql = format!(
        r#"
            INSERT INTO {table} (
                {name},
                {location},
                {scale},
                {usage_type},
                {status}
            ) VALUES (
                :name,
                :location,
                :scale,
                :usage_type,
                :status
            )
        "#,
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
        location = Columns::Location.as_str(),
        scale = Columns::Scale.as_str(),
        usage_type = Columns::UsageType.as_str(),
        status = Columns::Status.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":name": name,
            ":location": location,
            ":scale": scale,
            ":usage_type": usage_type,
            ":status": status.to_string(),
        },
    )?;
    select_by_id(conn.last_insert_rowid(), conn)
}

pub fn select_all(status: Option<ProjectStatus>, conn: &Connection) -> Result<Vec<Project>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {deleted_at} IS NULL
            AND (:status IS NULL OR {status} = :status)
            ORDER BY {created_at}, {id}
        "#,
        projection = Project::projection(),
        table = schema::TABLE_NAME,
        deleted_at = Columns::DeletedAt.as_str(),
        status = Columns::Status.as_str(),
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            named_params! { ":status": status.map(|it| it.to_string()) },
            Project::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Project> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Project::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_row(params![id], Project::mapper())
        .map_err(Into::into)
}

pub fn patch(
    id: i64,
    name: Option<&str>,
    location: Option<&str>,
    scale: Option<&str>,
    usage_type: Option<&str>,
    status: Option<ProjectStatus>,
    conn: &Connection,
) -> Result<Project> {
    let sql = format!(
        r#"
            UPDATE {table} SET
                {name} = coalesce(:name, {name}),
                {location} = coalesce(:location, {location}),
                {scale} = coalesce(:scale, {scale}),
                {usage_type} = coalesce(:usage_type, {usage_type}),
                {status} = coalesce(:status, {status})
            WHERE {id} = :id
        "#,
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
        location = Columns::Location.as_str(),
        scale = Columns::Scale.as_str(),
        usage_type = Columns::UsageType.as_str(),
        status = Columns::Status.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":id": id,
            ":name": name,
            ":location": location,
            ":scale": scale,
            ":usage_type": usage_type,
            ":status": status.map(|it| it.to_string()),
        },
    )?;
    select_by_id(id, conn)
}

pub fn set_deleted_at(
    id: i64,
    deleted_at: Option<OffsetDateTime>,
    conn: &Connection,
) -> Result<Project> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {deleted_at} = :deleted_at
            WHERE {id} = :id
        "#,
        table = schema::TABLE_NAME,
        deleted_at = Columns::DeletedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.execute(
        &sql,
        named_params! {
            ":id": id,
            ":deleted_at": deleted_at,
        },
    )?;
    select_by_id(id, conn)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test::mock_conn, Result};

    #[test]
    fn insert_and_select() -> Result<()> {
        let conn = mock_conn();
        let project = insert(
            "新宿計画",
            Some("東京都新宿区"),
            None,
            Some("事務所"),
            ProjectStatus::Planning,
            &conn,
        )?;
        assert_eq!(project.name, "新宿計画");
        assert_eq!(project.location.as_deref(), Some("東京都新宿区"));
        assert_eq!(project.status, ProjectStatus::Planning);
        assert!(project.deleted_at.is_none());
        assert_eq!(select_by_id(project.id, &conn)?, project);
        Ok(())
    }

    #[test]
    fn duplicate_name_is_rejected() -> Result<()> {
        let conn = mock_conn();
        insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;
        assert!(insert("計画A", None, None, None, ProjectStatus::Active, &conn).is_err());
        Ok(())
    }

    #[test]
    fn select_all_filters_by_status() -> Result<()> {
        let conn = mock_conn();
        insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;
        insert("計画B", None, None, None, ProjectStatus::Active, &conn)?;
        insert("計画C", None, None, None, ProjectStatus::Active, &conn)?;
        assert_eq!(select_all(None, &conn)?.len(), 3);
        assert_eq!(select_all(Some(ProjectStatus::Active), &conn)?.len(), 2);
        assert_eq!(select_all(Some(ProjectStatus::Completed), &conn)?.len(), 0);
        Ok(())
    }

    #[test]
    fn select_all_skips_deleted() -> Result<()> {
        let conn = mock_conn();
        let project = insert("計画A", None, None, None, ProjectStatus::Planning, &conn)?;
        set_deleted_at(project.id, Some(time::OffsetDateTime::now_utc()), &conn)?;
        assert!(select_all(None, &conn)?.is_empty());
        Ok(())
    }

    #[test]
    fn patch_updates_only_provided_fields() -> Result<()> {
        let conn = mock_conn();
        let project = insert(
            "計画A",
            Some("渋谷区"),
            None,
            None,
            ProjectStatus::Planning,
            &conn,
        )?;
        let patched = patch(
            project.id,
            None,
            None,
            None,
            None,
            Some(ProjectStatus::Completed),
            &conn,
        )?;
        assert_eq!(patched.name, "計画A");
        assert_eq!(patched.location.as_deref(), Some("渋谷区"));
        assert_eq!(patched.status, ProjectStatus::Completed);
        Ok(())
    }
}
