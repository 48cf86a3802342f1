mod common;

use axum::http::StatusCode;
use serde_json::{json, Value as JsonValue};

async fn create_candidate(app: &common::TestApp, stage: &str) -> JsonValue {
    let (status, body) = app
        .post(
            "/api/candidates",
            json!({
                "name": "Kylian Mbappe",
                "email": "kylian.mbappe@email.com",
                "jobId": "job-1",
                "currentStage": stage
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn create_records_application_event() {
    let app = common::seeded_app().await;
    let candidate = create_candidate(&app, "applied").await;
    assert_eq!(candidate["currentStage"], "applied");
    assert_eq!(candidate["timeline"].as_array().unwrap().len(), 1);
    assert_eq!(candidate["timeline"][0]["type"], "stage_change");
    assert_eq!(candidate["timeline"][0]["description"], "Application submitted");
}

#[tokio::test]
async fn create_rejects_bad_email_and_unknown_job() {
    let app = common::seeded_app().await;
    let (status, _) = app
        .post(
            "/api/candidates",
            json!({ "name": "Leo Messi", "email": "not-an-email", "jobId": "job-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/candidates",
            json!({ "name": "Leo Messi", "email": "leo@email.com", "jobId": "job-404" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn interview_to_offer_drag_appends_one_event() {
    let app = common::seeded_app().await;
    let candidate = create_candidate(&app, "interview").await;
    let id = candidate["id"].as_str().unwrap();

    let (status, _) = app
        .post(
            &format!("/api/candidates/{}/notes", id),
            json!({ "content": "Strong systems background, loop in @sarah" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, moved) = app
        .post(
            &format!("/api/candidates/{}/move", id),
            json!({
                "sourceStage": "interview",
                "destinationStage": "offer",
                "destinationIndex": 0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["currentStage"], "offer");

    let timeline = moved["timeline"].as_array().unwrap();
    let stage_changes = timeline.iter().filter(|e| e["type"] == "stage_change").count();
    assert_eq!(stage_changes, 2);
    assert_eq!(timeline.last().unwrap()["description"], "Moved to offer");

    let notes = moved["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["mentions"], json!(["sarah"]));
}

#[tokio::test]
async fn same_column_drop_changes_nothing() {
    let app = common::seeded_app().await;
    let candidate = create_candidate(&app, "screening").await;
    let id = candidate["id"].as_str().unwrap();

    let (status, after) = app
        .post(
            &format!("/api/candidates/{}/move", id),
            json!({ "sourceStage": "screening", "destinationStage": "screening" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["currentStage"], "screening");
    assert_eq!(after["timeline"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn terminal_stages_can_still_move() {
    let app = common::seeded_app().await;
    let candidate = create_candidate(&app, "hired").await;
    let id = candidate["id"].as_str().unwrap();

    let (status, body) = app
        .post(&format!("/api/candidates/{}/stage", id), json!({ "stage": "applied" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentStage"], "applied");
}

#[tokio::test]
async fn board_has_seven_columns_covering_everyone() {
    let app = common::seeded_app().await;
    let (status, columns) = app.get("/api/candidates/board").await;
    assert_eq!(status, StatusCode::OK);

    let columns = columns.as_array().unwrap();
    let stages: Vec<&str> = columns.iter().map(|c| c["stage"].as_str().unwrap()).collect();
    assert_eq!(
        stages,
        ["applied", "screening", "interview", "assessment", "offer", "hired", "rejected"]
    );
    let total: usize = columns
        .iter()
        .map(|c| c["candidates"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 1000);

    let (_, stats) = app.get("/api/candidates/stats").await;
    assert_eq!(stats["total"], 1000);
}

#[tokio::test]
async fn listing_filters_and_search() {
    let app = common::seeded_app().await;
    let (status, page) = app.get("/api/candidates?stage=offer&pageSize=5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["items"].as_array().unwrap().len() <= 5);
    assert!(page["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["currentStage"] == "offer"));

    let (_, hits) = app.get("/api/candidates/search?q=EMAIL.COM").await;
    assert_eq!(hits.as_array().unwrap().len(), 1000);
}

#[tokio::test]
async fn update_keeps_stage_and_unknown_is_not_found() {
    let app = common::seeded_app().await;
    let candidate = create_candidate(&app, "offer").await;
    let id = candidate["id"].as_str().unwrap();

    let (status, body) = app
        .patch(
            &format!("/api/candidates/{}", id),
            json!({ "phone": "+91-1234", "currentStage": "rejected" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+91-1234");
    assert_eq!(body["currentStage"], "offer");

    let (status, _) = app.get("/api/candidates/candidate-0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
