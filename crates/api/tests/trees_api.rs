//! Integration tests for the `/api/trees` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, post_raw};
use serde_json::json;
use sqlx::SqlitePool;

use dendro_db::row_counts;

fn oak() -> serde_json::Value {
    json!({
        "latitude": 55.75,
        "longitude": 37.61,
        "species": "Дуб",
        "status": "good"
    })
}

async fn create_oak(pool: &SqlitePool) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/trees", oak()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["tree_id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_listing_row(pool: SqlitePool) {
    let body = json!({
        "latitude": 55.7475,
        "longitude": 37.6225,
        "species": "Липа",
        "address": "Чистопрудный бульвар",
        "diameter": 68.7,
        "height": 22.1,
        "status": "critical",
        "notes": "Сильное повреждение ствола"
    });
    let response = post_json(build_test_app(pool), "/api/trees", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["tree_id"].as_i64().unwrap() > 0);
    assert_eq!(json["tree"]["id"], json["tree_id"]);
    assert_eq!(json["tree"]["species"], "Липа");
    assert_eq!(json["tree"]["address"], "Чистопрудный бульвар");
    assert_eq!(json["tree"]["status"], "critical");
    assert_eq!(json["tree"]["status_notes"], "Сильное повреждение ствола");
    assert!(json["tree"]["date_recorded"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn legacy_create_paths_are_accepted(pool: SqlitePool) {
    for path in ["/api/add_tree", "/api/add-tree"] {
        let response = post_json(build_test_app(pool.clone()), path, oak()).await;
        assert_eq!(response.status(), StatusCode::CREATED, "{path}");
    }
    assert_eq!(row_counts(&pool).await.unwrap().trees, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_species_returns_400_and_writes_nothing(pool: SqlitePool) {
    let body = json!({ "latitude": 55.75, "longitude": 37.61, "status": "good" });
    let response = post_json(build_test_app(pool.clone()), "/api/trees", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "species");

    let counts = row_counts(&pool).await.unwrap();
    assert_eq!(counts.trees, 0);
    assert_eq!(counts.status_records, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_malformed_json_returns_400(pool: SqlitePool) {
    let response = post_raw(build_test_app(pool), "/api/trees", "{\"latitude\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_after_create(pool: SqlitePool) {
    let id = create_oak(&pool).await;

    let response = get(build_test_app(pool), &format!("/api/trees/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["tree"]["species"], "Дуб");
    assert_eq!(json["current_status"]["status"], "good");
    assert_eq!(json["status_history"].as_array().unwrap().len(), 1);
    assert_eq!(json["comments"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_via_query_parameter(pool: SqlitePool) {
    let id = create_oak(&pool).await;

    let response = get(build_test_app(pool), &format!("/api/trees?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["tree"]["id"], id);
    assert_eq!(json["current_status"]["status"], "good");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_of_unknown_tree_returns_404(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/trees/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_returns_400(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/trees/oak").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_flat_and_matches_detail(pool: SqlitePool) {
    let id = create_oak(&pool).await;
    let status = json!({ "status": "poor", "date_recorded": "2090-01-01" });
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/trees/{id}/status"),
        status,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let appended = body_json(response).await;

    let listing = body_json(get(build_test_app(pool.clone()), "/api/trees").await).await;
    let rows = listing.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], id);
    assert_eq!(rows[0]["species"], "Дуб");
    assert_eq!(rows[0]["status"], "poor");
    assert_eq!(rows[0]["status_id"], appended["id"]);
    assert_eq!(rows[0]["date_recorded"], "2090-01-01");

    let detail = body_json(get(build_test_app(pool), &format!("/api/trees/{id}")).await).await;
    assert_eq!(detail["current_status"]["id"], rows[0]["status_id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_inventory_lists_nothing(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/trees").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// ---------------------------------------------------------------------------
// Status append
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn future_plan_does_not_change_current_status(pool: SqlitePool) {
    let id = create_oak(&pool).await;
    let plan = json!({
        "status": "excellent",
        "notes": "Плановая обрезка",
        "date_recorded": "2099-06-01",
        "is_future_plan": true
    });
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/trees/{id}/status"),
        plan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["is_future_plan"], true);

    let detail = body_json(get(build_test_app(pool), &format!("/api/trees/{id}")).await).await;
    assert_eq!(detail["status_history"][0]["status"], "excellent");
    assert_eq!(detail["current_status"]["status"], "good");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_for_unknown_tree_returns_422(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/trees/4040/status",
        json!({ "status": "good" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "REFERENCE_ERROR");
    assert_eq!(row_counts(&pool).await.unwrap().status_records, 0);
}
