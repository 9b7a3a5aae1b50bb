//! HTTP-level integration tests for the statistics endpoints: per-unit
//! history and the trailing 24h sales window.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn import_body(items: serde_json::Value, date: &str) -> serde_json::Value {
    json!({ "items": items, "updateDate": date })
}

fn uuid() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Unit statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_import_event_appends_one_snapshot(pool: PgPool) {
    let app = build_test_app(pool);
    let id = uuid();

    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": id, "name": "Phone", "type": "OFFER", "price": 100 }]),
            "2022-02-01T12:00:00.000Z",
        ),
    )
    .await;
    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": id, "name": "Phone", "type": "OFFER", "price": 200 }]),
            "2022-02-02T12:00:00.000Z",
        ),
    )
    .await;

    let response = get(app, &format!("/node/{id}/statistic")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let history = body_json(response).await;
    let items = history["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["price"], json!(100.0));
    assert_eq!(items[1]["price"], json!(200.0));
    assert_eq!(items[0]["id"], json!(id));
    assert_eq!(items[1]["id"], json!(id));
    assert!(items[0]["date"].as_str().unwrap() < items[1]["date"].as_str().unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_history_tracks_aggregate_recomputations(pool: PgPool) {
    let app = build_test_app(pool);
    let root = uuid();

    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": root, "name": "Root", "type": "CATEGORY" }]),
            "2022-02-01T12:00:00.000Z",
        ),
    )
    .await;
    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": uuid(), "name": "Item", "type": "OFFER", "parentId": root, "price": 100 }]),
            "2022-02-02T12:00:00.000Z",
        ),
    )
    .await;

    let history = body_json(get(app, &format!("/node/{root}/statistic")).await).await;
    let items = history["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Creation snapshot: no price yet. Propagation snapshot: the mean.
    assert!(items[0]["price"].is_null());
    assert_eq!(items[1]["price"], json!(100.0));
    assert_eq!(items[1]["type"], "CATEGORY");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn statistic_for_unknown_unit_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, &format!("/node/{}/statistic", uuid())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn statistic_with_malformed_id_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/node/not-a-uuid/statistic").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sales_window_is_inclusive_at_both_ends(pool: PgPool) {
    let app = build_test_app(pool);
    let (at_start, at_end, before, cat) = (uuid(), uuid(), uuid(), uuid());

    // One import per instant so each snapshot lands on its own date.
    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": before, "name": "Before", "type": "OFFER", "price": 3 }]),
            "2022-02-01T11:59:59.999Z",
        ),
    )
    .await;
    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([{ "id": at_start, "name": "AtStart", "type": "OFFER", "price": 1 }]),
            "2022-02-01T12:00:00.000Z",
        ),
    )
    .await;
    post_json(
        app.clone(),
        "/imports",
        import_body(
            json!([
                { "id": at_end, "name": "AtEnd", "type": "OFFER", "price": 2 },
                { "id": cat, "name": "InWindow", "type": "CATEGORY" },
            ]),
            "2022-02-02T12:00:00.000Z",
        ),
    )
    .await;

    let response = get(app, "/sales?date=2022-02-02T12:00:00.000Z").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let mut names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["AtEnd", "AtStart"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sales_with_no_activity_is_an_empty_success(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/sales?date=2030-01-01T00:00:00.000Z").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sales_with_unparseable_date_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/sales?date=05-28-2022-22:00").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sales_without_date_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/sales").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
