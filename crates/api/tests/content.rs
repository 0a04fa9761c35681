mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceExt;

use common::{body_json, build_test_app, create_test_group, get_request, json_request};

#[sqlx::test(migrations = "../db/migrations")]
async fn add_content_creates_entry(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "tt0111161" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "\"The Shawshank Redemption\" was added to the group."
    );
    assert_eq!(body["info"]["type"], "movie");
    assert_eq!(body["info"]["year"], "1994");

    let list = app
        .clone()
        .oneshot(get_request(&format!("/api/groups/{group_id}/content")))
        .await
        .expect("request should succeed");
    let list_body = body_json(list).await;
    let entries = list_body["content"].as_array().expect("content array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["imdb_id"], "tt0111161");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_add_is_conflict(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "tt0111161" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "tt0111161" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = body_json(second).await;
    assert_eq!(
        body["error"],
        "\"The Shawshank Redemption\" is already in the group list."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_identifier_is_bad_request(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "definitely-not-an-id" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_to_unknown_group_is_404(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/groups/zz99zz99/content",
            json!({ "content_id": "tt0111161" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unmapped_kitsu_id_is_404(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "kitsu:99999" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNRESOLVED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_content_filters_by_type(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    for content_id in ["tt0111161", "kitsu:12345"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/groups/{group_id}/content"),
                json!({ "content_id": content_id }),
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let series = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/groups/{group_id}/content?type=series"
        )))
        .await
        .expect("request should succeed");
    let body = body_json(series).await;
    let entries = body["content"].as_array().expect("content array");
    assert_eq!(entries.len(), 1);
    // The Kitsu id was resolved and stored under its IMDB id.
    assert_eq!(entries[0]["imdb_id"], "tt0903747");
    assert_eq!(entries[0]["type"], "series");

    let bad_type = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/groups/{group_id}/content?type=documentary"
        )))
        .await
        .expect("request should succeed");
    assert_eq!(bad_type.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_content_removes_entry(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let added = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/groups/{group_id}/content"),
            json!({ "content_id": "tt0111161" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(added.status(), StatusCode::CREATED);

    let list = app
        .clone()
        .oneshot(get_request(&format!("/api/groups/{group_id}/content")))
        .await
        .expect("request should succeed");
    let list_body = body_json(list).await;
    let entry_id = list_body["content"][0]["id"].as_i64().expect("entry id");

    let delete = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/groups/{group_id}/content/{entry_id}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(delete.status(), StatusCode::OK);

    let body = body_json(delete).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted_content"]["imdb_id"], "tt0111161");

    let again = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/groups/{group_id}/content/{entry_id}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_info_resolves_without_insert(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/content/info/tt0111161"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["imdb_id"], "tt0111161");
    assert_eq!(body["title"], "The Shawshank Redemption");

    // The probe must not have written anything.
    let list = app
        .clone()
        .oneshot(get_request(&format!("/api/groups/{group_id}/content")))
        .await
        .expect("request should succeed");
    let list_body = body_json(list).await;
    assert_eq!(list_body["content"].as_array().expect("array").len(), 0);

    let garbage = app
        .clone()
        .oneshot(get_request("/api/content/info/garbage"))
        .await
        .expect("request should succeed");
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_from_stremio_redirects_to_result_page(pool: SqlitePool) {
    let app = build_test_app(pool);
    let group_id = create_test_group(&app, "Movie Night", "secret").await;

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/groups/{group_id}/add-from-stremio/tt0111161"
        )))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get("location")
        .expect("location header")
        .to_str()
        .expect("ascii location");
    assert!(location.starts_with(&format!("/success/{group_id}?added=")));

    // A second hit reports the duplicate in the redirect.
    let repeat = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/groups/{group_id}/add-from-stremio/tt0111161"
        )))
        .await
        .expect("request should succeed");
    let location = repeat
        .headers()
        .get("location")
        .expect("location header")
        .to_str()
        .expect("ascii location");
    assert!(location.starts_with(&format!("/success/{group_id}?duplicate=")));
}
