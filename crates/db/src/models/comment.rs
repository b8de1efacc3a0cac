//! Comment entity model and DTOs.

use dendro_core::comments::{normalize_contact_email, normalize_user_name, validate_comment_text};
use dendro_core::error::CoreError;
use dendro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
///
/// `user_name` and `contact_email` are nullable on disk; rows written by this
/// crate always store empty strings instead.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub tree_id: DbId,
    pub user_name: Option<String>,
    pub text: String,
    pub contact_email: Option<String>,
    pub created_at: Timestamp,
    pub is_reviewed: bool,
}

/// DTO for submitting a public comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComment {
    pub tree_id: Option<DbId>,
    pub user_name: Option<String>,
    pub text: Option<String>,
    pub contact_email: Option<String>,
}

/// A validated comment insert. Always stored unreviewed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub tree_id: DbId,
    pub user_name: String,
    pub text: String,
    pub contact_email: String,
}

impl CreateComment {
    pub fn validate(&self) -> Result<NewComment, CoreError> {
        let tree_id = self.tree_id.ok_or_else(|| CoreError::missing("tree_id"))?;

        Ok(NewComment {
            tree_id,
            text: validate_comment_text(self.text.as_deref())?,
            user_name: normalize_user_name(self.user_name.as_deref())?,
            contact_email: normalize_contact_email(self.contact_email.as_deref())?,
        })
    }
}
