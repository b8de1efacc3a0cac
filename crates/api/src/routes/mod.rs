pub mod comments;
pub mod health;
pub mod trees;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trees                       list (or detail via ?id=), create
/// /trees/{id}                  detail
/// /trees/{id}/status           append status record
/// /add_tree, /add-tree         create (legacy client paths)
///
/// /comments                    list reviewed (?tree_id=), submit
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(trees::router())
        .merge(comments::router())
}
