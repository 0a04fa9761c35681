mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceExt;

use common::{body_json, build_test_app, create_test_group, get_request, json_request};

#[sqlx::test(migrations = "../db/migrations")]
async fn create_group_returns_session(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/groups",
            json!({ "name": "Movie Night", "password": "secret" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let group_id = body["group_id"].as_str().expect("group_id string");
    assert_eq!(group_id.len(), 8);
    assert_eq!(body["name"], "Movie Night");
    assert_eq!(
        body["addon_url"],
        format!("http://localhost:7000/{group_id}/manifest.json")
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_group_requires_name_and_password(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/groups",
            json!({ "name": "  ", "password": "" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn join_group_checks_password(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let wrong = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/join"),
            json!({ "password": "not-it" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let right = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/join"),
            json!({ "password": "secret" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(right.status(), StatusCode::OK);

    let body = body_json(right).await;
    assert_eq!(body["group_id"], group_id.as_str());
    assert_eq!(body["name"], "Movie Night");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn join_unknown_group_is_404(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/groups/zz99zz99/join",
            json!({ "password": "whatever" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_group_hides_password_hash(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/groups/{group_id}")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], group_id.as_str());
    assert!(body.get("password_hash").is_none());
    // Default settings enable both catalogs.
    assert_eq!(body["catalog_settings"]["movies"], true);
    assert_eq!(body["catalog_settings"]["series"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_settings_round_trips(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/groups/{group_id}/settings"),
            json!({ "catalog_settings": { "movies": false, "series": true, "all": false } }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let get = app
        .clone()
        .oneshot(get_request(&format!("/api/groups/{group_id}")))
        .await
        .expect("request should succeed");
    let body = body_json(get).await;
    assert_eq!(body["catalog_settings"]["movies"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_settings_rejects_non_object(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/groups/{group_id}/settings"),
            json!({ "catalog_settings": "everything" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_settings_unknown_group_is_404(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/groups/zz99zz99/settings",
            json!({ "catalog_settings": { "movies": true } }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
