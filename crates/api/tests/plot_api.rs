//! Plot catalog and admin plot management through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{admin_token, build_test_app, delete_auth, get, get_auth, post_auth, put_auth};

fn plot_body(title: &str, price: f64) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Flat dry parcel near the forest",
        "area_m2": 600.0,
        "price": price,
        "price_per_m2": price / 600.0,
        "region": "Moscow Oblast",
        "locality": "Istra",
        "land_use": "IZHS",
        "land_category": "settlement",
        "media": [
            { "url": "/uploads/1.jpg", "alt": "front view" },
            { "url": "/uploads/2.jpg" }
        ],
        "cadastral_numbers": ["50:08:0050302:117"],
        "communications": [ { "name": "electricity", "description": "15 kW" } ],
        "features": ["forest edge"]
    })
}

async fn create_plot(app: &axum::Router, token: &str, title: &str, price: f64) -> i64 {
    let (status, body) = post_auth(
        app,
        "/api/v1/admin/plots",
        token,
        Some(plot_body(title, price)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "plot creation failed: {body}");
    body["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_derives_transliterated_slug(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let (status, body) = post_auth(
        &app,
        "/api/v1/admin/plots",
        &token,
        Some(plot_body("Участок у леса", 1.5e6)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "uchastok-u-lesa");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_title_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    create_plot(&app, &token, "Участок у леса", 1.5e6).await;

    let (status, body) = post_auth(
        &app,
        "/api/v1/admin/plots",
        &token,
        Some(plot_body("Участок у леса", 2.0e6)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert!(body["error"].as_str().unwrap().contains("uchastok-u-lesa"));

    // The first plot is unaffected.
    let (status, _) = get(&app, "/api/v1/plots/uchastok-u-lesa").await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_negative_numeric_fields_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let mut body = plot_body("Bad price", 1.0e6);
    body["price"] = json!(-5.0);
    let (status, response) = post_auth(&app, "/api/v1/admin/plots", &token, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
    assert!(response["error"].as_str().unwrap().contains("price"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_public_listing_and_detail(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let id = create_plot(&app, &token, "Listed plot", 1.0e6).await;
    let hidden = create_plot(&app, &token, "Hidden plot", 1.0e6).await;

    let (status, _) = post_auth(
        &app,
        &format!("/api/v1/admin/plots/{hidden}/toggle-visibility"),
        &token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Public grid shows only the visible plot, with its first media item.
    let (status, body) = get(&app, "/api/v1/plots?sort=newest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["thumbnail_url"], "/uploads/1.jpg");

    // Detail carries the full ordered collections.
    let (status, body) = get(&app, "/api/v1/plots/listed-plot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), id);
    assert_eq!(body["data"]["area_sotka"], 6.0);
    assert_eq!(body["data"]["media"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["media"][0]["sort_order"], 0);
    assert_eq!(body["data"]["communications"][0]["name"], "electricity");

    // The hidden plot 404s publicly.
    let (status, _) = get(&app, "/api/v1/plots/hidden-plot").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown sort is a bad request.
    let (status, _) = get(&app, "/api/v1/plots?sort=cheapest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_grid_page_past_end_404s(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    create_plot(&app, &token, "Only plot", 1.0e6).await;

    let (status, _) = get_auth(&app, "/api/v1/admin/plots?page=2", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_auth(&app, "/api/v1/admin/plots?page=1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_pages"], 1);
    assert_eq!(body["data"]["current_page"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_filter_options_endpoint(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    create_plot(&app, &token, "Optioned plot", 1.0e6).await;

    let (status, body) = get(&app, "/api/v1/plots/options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["regions"], json!(["Moscow Oblast"]));
    assert_eq!(body["data"]["land_uses"], json!(["IZHS"]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_similar_plots_endpoint(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    create_plot(&app, &token, "Source plot", 2.0e6).await;
    create_plot(&app, &token, "Close match", 2.1e6).await;
    create_plot(&app, &token, "Way pricier", 9.0e6).await;

    let (status, body) = get(&app, "/api/v1/plots/source-plot/similar").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["slug"], "close-match");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_renames_slug_and_reconciles_media(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let id = create_plot(&app, &token, "Before rename", 1.0e6).await;

    let (_, body) = get_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token).await;
    let kept_media_id = body["data"]["media"][1]["id"].as_i64().unwrap();

    let mut update = plot_body("After rename", 1.0e6);
    // Keep only the second photo, now first, plus a new one.
    update["media"] = json!([
        { "id": kept_media_id, "url": "/uploads/2.jpg" },
        { "url": "/uploads/3.jpg" }
    ]);
    let (status, body) = put_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token, update).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "after-rename");

    let (_, body) = get_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token).await;
    let media = body["data"]["media"].as_array().unwrap();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0]["id"].as_i64().unwrap(), kept_media_id);
    assert_eq!(media[0]["sort_order"], 0);
    assert_eq!(media[1]["url"], "/uploads/3.jpg");
    assert_eq!(media[1]["sort_order"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_plot(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let id = create_plot(&app, &token, "Doomed plot", 1.0e6).await;

    let (status, _) = delete_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_auth(&app, &format!("/api/v1/admin/plots/{id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
