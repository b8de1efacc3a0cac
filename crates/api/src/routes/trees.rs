//! Route definitions for the `/trees` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trees;
use crate::state::AppState;

/// Tree routes, relative to `/api`.
///
/// ```text
/// GET    /trees                 -> list (detail when ?id= is given)
/// POST   /trees                 -> create
/// GET    /trees/{id}            -> get_by_id
/// POST   /trees/{id}/status     -> append_status
/// POST   /add_tree              -> create
/// POST   /add-tree              -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trees", get(trees::list).post(trees::create))
        .route("/trees/{id}", get(trees::get_by_id))
        .route("/trees/{id}/status", post(trees::append_status))
        .route("/add_tree", post(trees::create))
        .route("/add-tree", post(trees::create))
}
