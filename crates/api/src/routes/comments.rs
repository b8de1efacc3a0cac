//! Route definitions for the `/comments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes, relative to `/api`.
///
/// ```text
/// GET    /comments?tree_id=N    -> list
/// POST   /comments              -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/comments", get(comments::list).post(comments::create))
}
