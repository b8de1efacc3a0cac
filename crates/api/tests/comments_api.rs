//! Integration tests for the `/api/comments` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::SqlitePool;

use dendro_db::row_counts;

async fn create_tree(pool: &SqlitePool) -> i64 {
    let body = json!({
        "latitude": 55.752,
        "longitude": 37.6175,
        "species": "Береза",
        "status": "good"
    });
    let response = post_json(build_test_app(pool.clone()), "/api/trees", body).await;
    body_json(response).await["tree_id"].as_i64().unwrap()
}

/// Stand-in for the external moderation step.
async fn approve(pool: &SqlitePool, comment_id: i64) {
    sqlx::query("UPDATE comments SET is_reviewed = 1 WHERE id = ?")
        .bind(comment_id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_comment_returns_201_with_id(pool: SqlitePool) {
    let tree_id = create_tree(&pool).await;
    let body = json!({
        "tree_id": tree_id,
        "user_name": "Мария",
        "text": "Кора повреждена",
        "contact_email": "maria@example.com"
    });
    let response = post_json(build_test_app(pool.clone()), "/api/comments", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["comment_id"].as_i64().unwrap() > 0);
    assert_eq!(row_counts(&pool).await.unwrap().comments, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_hidden_until_reviewed(pool: SqlitePool) {
    let tree_id = create_tree(&pool).await;
    let body = json!({ "tree_id": tree_id, "text": "test" });
    let response = post_json(build_test_app(pool.clone()), "/api/comments", body).await;
    let comment_id = body_json(response).await["comment_id"].as_i64().unwrap();

    let uri = format!("/api/comments?tree_id={tree_id}");
    let before = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(before, json!([]));

    let detail = body_json(
        get(build_test_app(pool.clone()), &format!("/api/trees/{tree_id}")).await,
    )
    .await;
    assert_eq!(detail["comments"], json!([]));

    approve(&pool, comment_id).await;

    let after = body_json(get(build_test_app(pool), &uri).await).await;
    let after = after.as_array().unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0]["id"], comment_id);
    assert_eq!(after[0]["text"], "test");
    assert_eq!(after[0]["user_name"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_without_tree_id_returns_400(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/comments").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_text_returns_400(pool: SqlitePool) {
    let tree_id = create_tree(&pool).await;
    let body = json!({ "tree_id": tree_id, "text": "   " });
    let response = post_json(build_test_app(pool.clone()), "/api/comments", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "text");
    assert_eq!(row_counts(&pool).await.unwrap().comments, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_email_returns_400(pool: SqlitePool) {
    let tree_id = create_tree(&pool).await;
    let body = json!({ "tree_id": tree_id, "text": "ok", "contact_email": "not-an-email" });
    let response = post_json(build_test_app(pool), "/api/comments", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "contact_email");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_on_unknown_tree_returns_422(pool: SqlitePool) {
    let body = json!({ "tree_id": 9001, "text": "Где дерево?" });
    let response = post_json(build_test_app(pool.clone()), "/api/comments", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "REFERENCE_ERROR");
    assert_eq!(row_counts(&pool).await.unwrap().comments, 0);
}
