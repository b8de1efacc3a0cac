//! Query parameter types for API handlers.

use dendro_core::types::DbId;
use serde::Deserialize;

/// `GET /trees?id=`. The legacy detail lookup shares the listing path.
#[derive(Debug, Deserialize)]
pub struct TreeQueryParams {
    pub id: Option<DbId>,
}

/// `GET /comments?tree_id=`.
#[derive(Debug, Deserialize)]
pub struct CommentQueryParams {
    pub tree_id: Option<DbId>,
}
