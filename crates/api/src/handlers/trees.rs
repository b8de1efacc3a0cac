//! Handlers for the `/trees` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dendro_core::types::DbId;
use dendro_db::models::status::{CreateStatusRecord, StatusRecord};
use dendro_db::models::tree::CreateTree;
use dendro_db::repositories::{StatusRepo, TreeRepo};
use dendro_db::views::{TreeDetail, TreeWithCurrentStatus};

use crate::error::AppResult;
use crate::query::TreeQueryParams;
use crate::response::CreatedTreeResponse;
use crate::state::AppState;

/// GET /api/trees
///
/// Lists every tree with its current status. Older map clients request a
/// single tree as `?id=N`; that form answers with the tree detail instead.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<TreeQueryParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = params?;
    match params.id {
        Some(id) => {
            let detail = TreeRepo::detail(&state.pool, id).await?;
            Ok(Json(detail).into_response())
        }
        None => {
            let trees: Vec<TreeWithCurrentStatus> =
                TreeRepo::list_with_current_status(&state.pool).await?;
            Ok(Json(trees).into_response())
        }
    }
}

/// GET /api/trees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<TreeDetail>> {
    let Path(id) = id?;
    let detail = TreeRepo::detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// POST /api/trees (also /api/add_tree, /api/add-tree)
pub async fn create(
    State(state): State<AppState>,
    input: Result<Json<CreateTree>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedTreeResponse>)> {
    let Json(input) = input?;
    let created = TreeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// POST /api/trees/{id}/status
pub async fn append_status(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    input: Result<Json<CreateStatusRecord>, JsonRejection>,
) -> AppResult<(StatusCode, Json<StatusRecord>)> {
    let Path(id) = id?;
    let Json(input) = input?;
    let record = StatusRepo::append(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
