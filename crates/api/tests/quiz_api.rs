//! The quiz funnel end-to-end: serving the active quiz, validated
//! submissions, promo codes, and dedup by phone.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{admin_token, build_test_app, get, post_auth, post_json};

/// Create a quiz through the admin API; returns (quiz_id, question ids).
async fn create_quiz(app: &axum::Router, token: &str, active: bool) -> (i64, Vec<i64>) {
    let (status, body) = post_auth(
        app,
        "/api/v1/admin/quizzes",
        token,
        Some(json!({
            "title": "Find your plot",
            "is_active": active,
            "questions": [
                {
                    "title": "Which region?",
                    "question_type": "single",
                    "answers": [
                        { "label": "Moscow Oblast" },
                        { "label": "Tver Oblast" }
                    ]
                },
                {
                    "title": "Your phone",
                    "question_type": "phone"
                }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "quiz creation failed: {body}");

    let quiz_id = body["data"]["id"].as_i64().unwrap();
    let questions = body["data"]["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    (quiz_id, questions)
}

fn submission_with_answer(
    quiz_id: i64,
    questions: &[i64],
    answer_id: i64,
    phone: &str,
) -> serde_json::Value {
    json!({
        "quiz_id": quiz_id,
        "name": "Ivan",
        "phone": phone,
        "email": "ivan@example.com",
        "answers": {
            questions[0].to_string(): { "kind": "single_choice", "value": answer_id },
            questions[1].to_string(): { "kind": "free_text", "value": phone }
        }
    })
}

async fn first_answer_id(app: &axum::Router) -> i64 {
    let (_, body) = get(app, "/api/v1/quiz/active").await;
    body["data"]["questions"][0]["answers"][0]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_no_active_quiz_is_null_data(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, body) = get(&app, "/api/v1/quiz/active").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_active_quiz_served_with_ordered_questions(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    create_quiz(&app, &token, true).await;

    let (status, body) = get(&app, "/api/v1/quiz/active").await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["sort_order"], 0);
    assert_eq!(questions[0]["answers"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_submission_issues_promo_code_once_per_phone(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let (quiz_id, questions) = create_quiz(&app, &token, true).await;
    let answer_id = first_answer_id(&app).await;

    let body = submission_with_answer(quiz_id, &questions, answer_id, "+79000000000");
    let (status, response) = post_json(&app, "/api/v1/quiz/submissions", body.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["already_exists"], false);
    let promo = response["promo_code"].as_str().unwrap();
    assert_eq!(promo.len(), 8);
    assert!(promo
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));

    // Second submission with the same phone: no new lead, no promo code.
    let (status, response) = post_json(&app, "/api/v1/quiz/submissions", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], false);
    assert_eq!(response["already_exists"], true);
    assert!(response.get("promo_code").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_submission_validation(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let (quiz_id, questions) = create_quiz(&app, &token, true).await;
    let answer_id = first_answer_id(&app).await;

    // Missing contact fields are named.
    let mut body = submission_with_answer(quiz_id, &questions, answer_id, "+79000000000");
    body["name"] = json!("");
    let (status, response) = post_json(&app, "/api/v1/quiz/submissions", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("name"));

    // Wrong answer shape for a single-choice question.
    let mut body = submission_with_answer(quiz_id, &questions, answer_id, "+79000000000");
    body["answers"][questions[0].to_string()] =
        json!({ "kind": "free_text", "value": "Moscow" });
    let (status, response) = post_json(&app, "/api/v1/quiz/submissions", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");

    // Unknown quiz id.
    let body = submission_with_answer(999_999, &questions, answer_id, "+79000000000");
    let (status, _) = post_json(&app, "/api/v1/quiz/submissions", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was written along the way.
    let (status, response) = post_json(
        &app,
        "/api/v1/quiz/submissions",
        submission_with_answer(quiz_id, &questions, answer_id, "+79000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true, "phone must still be unused");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_activation_swap_via_api(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);
    let (first_id, _) = create_quiz(&app, &token, true).await;
    let (second_id, _) = create_quiz(&app, &token, false).await;

    let (status, _) = post_auth(
        &app,
        &format!("/api/v1/admin/quizzes/{second_id}/activate"),
        &token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&app, "/api/v1/quiz/active").await;
    assert_eq!(body["data"]["id"].as_i64().unwrap(), second_id);

    // The previously active quiz was deactivated in the same operation.
    let (_, body) = common::get_auth(
        &app,
        &format!("/api/v1/admin/quizzes/{first_id}"),
        &token,
    )
    .await;
    assert_eq!(body["data"]["is_active"], false);
}
