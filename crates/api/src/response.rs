//! Response bodies for write endpoints.
//!
//! Writes answer with a `success` flag so clients can branch on one field
//! for both outcomes; failures use the same flag via [`crate::error::AppError`].
//! Read endpoints return their views unwrapped.

use dendro_core::types::DbId;
use dendro_db::views::{CreatedTree, TreeWithCurrentStatus};
use serde::Serialize;

/// `{ "success": true, "tree_id": N, "tree": {...} }`
#[derive(Debug, Serialize)]
pub struct CreatedTreeResponse {
    pub success: bool,
    pub tree_id: DbId,
    pub tree: TreeWithCurrentStatus,
}

impl From<CreatedTree> for CreatedTreeResponse {
    fn from(created: CreatedTree) -> Self {
        Self {
            success: true,
            tree_id: created.tree_id,
            tree: created.tree,
        }
    }
}

/// `{ "success": true, "comment_id": N }`
#[derive(Debug, Serialize)]
pub struct CreatedCommentResponse {
    pub success: bool,
    pub comment_id: DbId,
}

impl CreatedCommentResponse {
    pub fn new(comment_id: DbId) -> Self {
        Self {
            success: true,
            comment_id,
        }
    }
}
