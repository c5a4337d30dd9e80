use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "project_kokuji";

pub enum Columns {
    Id,
    ProjectId,
    KokujiId,
    KokujiText,
    Memo,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::ProjectId => "project_id",
            Columns::KokujiId => "kokuji_id",
            Columns::KokujiText => "kokuji_text",
            Columns::Memo => "memo",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }
}

/// A notice text snapshot attached to a project. The full text is stored,
/// not just the upstream ID, so project records survive upstream edits.
#[derive(Debug, PartialEq)]
pub struct ProjectKokuji {
    pub id: i64,
    pub project_id: i64,
    pub kokuji_id: String,
    pub kokuji_text: String,
    pub memo: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ProjectKokuji {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::ProjectId,
                Columns::KokujiId,
                Columns::KokujiText,
                Columns::Memo,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<ProjectKokuji> {
        |row: &_| {
            Ok(ProjectKokuji {
                id: row.get(Columns::Id.as_str())?,
                project_id: row.get(Columns::ProjectId.as_str())?,
                kokuji_id: row.get(Columns::KokujiId.as_str())?,
                kokuji_text: row.get(Columns::KokujiText.as_str())?,
                memo: row.get(Columns::Memo.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }
}
