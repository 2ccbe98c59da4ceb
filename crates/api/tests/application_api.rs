//! Lead intake and admin review through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{admin_token, build_test_app, get_auth, post_auth, post_json, put_auth};

fn contact_lead() -> serde_json::Value {
    json!({
        "app_type": "contact",
        "name": "Ivan",
        "phone": "+79000000000",
        "email": "ivan@example.com",
        "message": "Please call me back"
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_contact_lead_created_with_new_status(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, body) = post_json(&app, "/api/v1/applications", contact_lead()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "new");
    assert_eq!(body["data"]["app_type"], "contact");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_intake_validation(pool: PgPool) {
    let app = build_test_app(pool);

    // Missing contact fields are named.
    let mut lead = contact_lead();
    lead["phone"] = json!("");
    lead["email"] = json!(" ");
    let (status, body) = post_json(&app, "/api/v1/applications", lead).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("phone") && error.contains("email"));

    // Contact leads need a message.
    let mut lead = contact_lead();
    lead["message"] = json!(null);
    let (status, body) = post_json(&app, "/api/v1/applications", lead).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("message"));

    // Plot leads need an existing plot.
    let mut lead = contact_lead();
    lead["app_type"] = json!("plot");
    lead["plot_id"] = json!(999_999);
    let (status, _) = post_json(&app, "/api/v1/applications", lead).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Quiz leads do not pass through this endpoint.
    let mut lead = contact_lead();
    lead["app_type"] = json!("quiz");
    let (status, body) = post_json(&app, "/api/v1/applications", lead).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("quiz endpoint"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_review_flow(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let (_, created) = post_json(&app, "/api/v1/applications", contact_lead()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Status overwrite, any -> any.
    let (status, body) = put_auth(
        &app,
        &format!("/api/v1/admin/applications/{id}/status"),
        &token,
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");

    // Unknown status is named.
    let (status, body) = put_auth(
        &app,
        &format!("/api/v1/admin/applications/{id}/status"),
        &token,
        json!({ "status": "archived" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("archived"));

    // Comment appends show up newest-first in the detail view.
    let (status, _) = post_auth(
        &app,
        &format!("/api/v1/admin/applications/{id}/comments"),
        &token,
        Some(json!({ "body": "called, no answer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post_auth(
        &app,
        &format!("/api/v1/admin/applications/{id}/comments"),
        &token,
        Some(json!({ "body": "reached the client" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get_auth(&app, &format!("/api/v1/admin/applications/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let comments = body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["body"], "reached the client");
    assert_eq!(comments[0]["author_email"], "admin@test.local");

    // The grid reflects the filter and comment count.
    let (status, body) = get_auth(&app, "/api/v1/admin/applications?status=completed", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["comment_count"], 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_routes_not_found_cases(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let (status, _) = get_auth(&app, "/api/v1/admin/applications/999999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put_auth(
        &app,
        "/api/v1/admin/applications/999999/status",
        &token,
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_auth(
        &app,
        "/api/v1/admin/applications/999999/comments",
        &token,
        Some(json!({ "body": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_mutations_require_admin(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, _) = common::send(
        &app,
        "PUT",
        "/api/v1/admin/applications/1/status",
        None,
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
