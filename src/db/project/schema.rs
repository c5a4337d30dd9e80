use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;
use strum::{Display, EnumString};
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "project";

pub enum Columns {
    Id,
    Name,
    Location,
    Scale,
    UsageType,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::Name => "name",
            Columns::Location => "location",
            Columns::Scale => "scale",
            Columns::UsageType => "usage_type",
            Columns::Status => "status",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
            Columns::DeletedAt => "deleted_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Suspended,
}

#[derive(Debug, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub scale: Option<String>,
    pub usage_type: Option<String>,
    pub status: ProjectStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Project {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::Name,
                Columns::Location,
                Columns::Scale,
                Columns::UsageType,
                Columns::Status,
                Columns::CreatedAt,
                Columns::UpdatedAt,
                Columns::DeletedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Project> {
        |row: &_| {
            let status: String = row.get(Columns::Status.as_str())?;
            let status = ProjectStatus::from_str(&status).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Project {
                id: row.get(Columns::Id.as_str())?,
                name: row.get(Columns::Name.as_str())?,
                location: row.get(Columns::Location.as_str())?,
                scale: row.get(Columns::Scale.as_str())?,
                usage_type: row.get(Columns::UsageType.as_str())?,
                status,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
                deleted_at: row.get(Columns::DeletedAt.as_str())?,
            })
        }
    }
}
