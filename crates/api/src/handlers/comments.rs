//! Handlers for the `/comments` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dendro_db::models::comment::{Comment, CreateComment};
use dendro_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::query::CommentQueryParams;
use crate::response::CreatedCommentResponse;
use crate::state::AppState;

/// GET /api/comments?tree_id=N
///
/// Only reviewed comments are returned, newest first.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<CommentQueryParams>, QueryRejection>,
) -> AppResult<Json<Vec<Comment>>> {
    let Query(params) = params?;
    let tree_id = params
        .tree_id
        .ok_or_else(|| AppError::BadRequest("tree_id parameter is required".into()))?;
    let comments = CommentRepo::list_reviewed_for_tree(&state.pool, tree_id).await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create(
    State(state): State<AppState>,
    input: Result<Json<CreateComment>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedCommentResponse>)> {
    let Json(input) = input?;
    let comment_id = CommentRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedCommentResponse::new(comment_id)),
    ))
}
