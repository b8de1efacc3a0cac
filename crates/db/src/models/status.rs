//! Status history model and DTOs.

use dendro_core::error::CoreError;
use dendro_core::status::{validate_notes, validate_status, StatusEntry};
use dendro_core::types::{DbId, RecordDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tree_status` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StatusRecord {
    pub id: DbId,
    pub tree_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    pub date_recorded: RecordDate,
    pub is_future_plan: bool,
}

impl StatusEntry for StatusRecord {
    fn id(&self) -> DbId {
        self.id
    }

    fn tree_id(&self) -> DbId {
        self.tree_id
    }

    fn date_recorded(&self) -> RecordDate {
        self.date_recorded
    }

    fn is_future_plan(&self) -> bool {
        self.is_future_plan
    }
}

/// DTO for appending a status record to an existing tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStatusRecord {
    pub status: Option<String>,
    pub notes: Option<String>,
    /// Defaults to the current date.
    pub date_recorded: Option<RecordDate>,
    /// Defaults to `false`.
    pub is_future_plan: Option<bool>,
}

/// A validated status insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStatusRecord {
    pub status: String,
    pub notes: Option<String>,
    /// `None` lets the database assign `CURRENT_DATE`.
    pub date_recorded: Option<RecordDate>,
    pub is_future_plan: bool,
}

impl NewStatusRecord {
    /// An observed status dated by the database at insert time.
    pub fn observed_today(status: String, notes: Option<String>) -> Self {
        Self {
            status,
            notes,
            date_recorded: None,
            is_future_plan: false,
        }
    }
}

impl CreateStatusRecord {
    pub fn validate(&self) -> Result<NewStatusRecord, CoreError> {
        Ok(NewStatusRecord {
            status: validate_status(self.status.as_deref())?,
            notes: validate_notes(self.notes.as_deref())?,
            date_recorded: self.date_recorded,
            is_future_plan: self.is_future_plan.unwrap_or(false),
        })
    }
}
