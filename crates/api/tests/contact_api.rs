//! The singleton contact record through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{admin_token, build_test_app, get, put_auth};

fn week() -> serde_json::Value {
    let days: Vec<serde_json::Value> = (0..7)
        .map(|day| json!({ "day_of_week": day, "opens_at": "09:00", "closes_at": "18:00" }))
        .collect();
    json!(days)
}

fn contact_body(social_media: serde_json::Value) -> serde_json::Value {
    json!({
        "phone": "+7 495 000-00-00",
        "email": "office@example.com",
        "address": "Moscow, Tverskaya 1",
        "working_hours": week(),
        "social_media": social_media
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_contact_is_null_until_saved(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, body) = get(&app, "/api/v1/contact").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_and_read_back(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let (status, body) = put_auth(
        &app,
        "/api/v1/admin/contact",
        &token,
        contact_body(json!({ "whatsapp": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["social_media"]["whatsapp"], "123");

    let (status, body) = get(&app, "/api/v1/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "+7 495 000-00-00");
    assert_eq!(body["data"]["working_hours"].as_array().unwrap().len(), 7);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_blank_social_media_disappears(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    put_auth(
        &app,
        "/api/v1/admin/contact",
        &token,
        contact_body(json!({ "whatsapp": "123" })),
    )
    .await;

    // Saving with every handle blank removes the sub-record entirely.
    let (status, body) = put_auth(
        &app,
        "/api/v1/admin/contact",
        &token,
        contact_body(json!({ "whatsapp": "", "telegram": "", "instagram": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["social_media"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_working_hours_must_cover_the_week(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    // Six rows.
    let mut body = contact_body(json!(null));
    body["working_hours"].as_array_mut().unwrap().pop();
    let (status, response) = put_auth(&app, "/api/v1/admin/contact", &token, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("7"));

    // Seven rows with a repeated day.
    let mut body = contact_body(json!(null));
    body["working_hours"][6]["day_of_week"] = json!(0);
    let (status, response) = put_auth(&app, "/api/v1/admin/contact", &token, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("repeats"));
}
