mod common;

use axum::http::StatusCode;
use serde_json::{json, Map, Value as JsonValue};

fn answers(ids: &[&str], value: &str) -> JsonValue {
    let map: Map<String, JsonValue> = ids
        .iter()
        .map(|id| (id.to_string(), JsonValue::from(value)))
        .collect();
    JsonValue::Object(map)
}

#[tokio::test]
async fn evaluate_reports_gate_errors_and_progress() {
    let app = common::seeded_app().await;
    let (status, eval) = app
        .post(
            "/api/assessments/assessment-1/evaluate",
            json!({
                "sectionIndex": 0,
                "answers": answers(&["question-1-1-1", "question-1-1-2", "question-1-1-3"], "Option A")
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(eval["sectionId"], "section-1-1");
    assert_eq!(eval["visibleQuestionIds"].as_array().unwrap().len(), 5);
    assert_eq!(eval["canAdvance"], false);
    assert_eq!(eval["progress"], 37.5);
    assert_eq!(eval["errors"]["question-1-1-4"], "This question is required");
    assert!(eval["errors"].get("question-1-1-1").is_none());
}

#[tokio::test]
async fn short_answers_fail_validation_but_pass_the_gate() {
    let app = common::seeded_app().await;
    let (_, eval) = app
        .post(
            "/api/assessments/assessment-1/evaluate",
            json!({
                "sectionIndex": 1,
                "answers": answers(&["question-1-2-1", "question-1-2-2", "question-1-2-3"], "too short")
            }),
        )
        .await;
    assert_eq!(eval["canAdvance"], true);
    assert_eq!(
        eval["errors"]["question-1-2-1"],
        "Minimum length is 50 characters"
    );
}

#[tokio::test]
async fn evaluate_out_of_range_section() {
    let app = common::seeded_app().await;
    let (status, _) = app
        .post(
            "/api/assessments/assessment-1/evaluate",
            json!({ "sectionIndex": 5, "answers": {} }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn conditional_question_follows_its_dependency() {
    let app = common::seeded_app().await;
    let (status, created) = app
        .post(
            "/api/assessments",
            json!({
                "title": "Frontend Screen",
                "jobId": "job-1",
                "sections": [{
                    "title": "Basics",
                    "questions": [
                        {
                            "id": "react",
                            "type": "single-choice",
                            "title": "Used React?",
                            "required": true,
                            "options": ["Yes", "No"]
                        },
                        {
                            "id": "react-years",
                            "type": "numeric",
                            "title": "Years of React",
                            "required": true,
                            "validation": { "min": 0, "max": 30 },
                            "conditionalLogic": { "dependsOn": "react", "condition": "equals", "value": "Yes" }
                        }
                    ]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isPublished"], false);
    assert!(created.get("shareableLink").is_none());
    let uri = format!("/api/assessments/{}/evaluate", created["id"].as_str().unwrap());

    let (_, hidden) = app
        .post(&uri, json!({ "answers": { "react": "No" } }))
        .await;
    assert_eq!(hidden["visibleQuestionIds"], json!(["react"]));
    assert_eq!(hidden["canAdvance"], true);

    let (_, shown) = app
        .post(&uri, json!({ "answers": { "react": "Yes", "react-years": 45 } }))
        .await;
    assert_eq!(shown["visibleQuestionIds"], json!(["react", "react-years"]));
    assert_eq!(shown["errors"]["react-years"], "Maximum value is 30");
    assert_eq!(shown["canAdvance"], true);
    assert_eq!(shown["progress"], 100.0);
}

#[tokio::test]
async fn self_dependency_is_rejected() {
    let app = common::seeded_app().await;
    let (status, _) = app
        .post(
            "/api/assessments",
            json!({
                "title": "Broken",
                "jobId": "job-1",
                "sections": [{
                    "title": "Loop",
                    "questions": [{
                        "id": "q",
                        "type": "short-text",
                        "title": "Q",
                        "conditionalLogic": { "dependsOn": "q", "condition": "equals", "value": "x" }
                    }]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publish_toggle_and_builder_routes() {
    let app = common::seeded_app().await;

    let (status, hidden) = app
        .post("/api/assessments/assessment-2/publish", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hidden["isPublished"], false);
    assert!(hidden.get("shareableLink").is_none());

    let (_, shown) = app
        .post("/api/assessments/assessment-2/publish", json!({}))
        .await;
    assert_eq!(
        shown["shareableLink"],
        "https://recruitify.app/assessment/assessment-2"
    );

    let (status, dup) = app
        .post(
            "/api/assessments/assessment-2/sections/section-2-1/duplicate",
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dup["sections"][2]["title"], "Technical Skills (Copy)");

    let (status, reordered) = app
        .post(
            "/api/assessments/assessment-2/sections/reorder",
            json!({ "from": 2, "to": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reordered["sections"][0]["title"], "Technical Skills (Copy)");
    assert_eq!(reordered["sections"][1]["order"], 1);

    let (status, _) = app
        .post(
            "/api/assessments/assessment-2/sections/section-2-2/questions/reorder",
            json!({ "from": 0, "to": 9 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_submission_scores_one_hundred() {
    let app = common::seeded_app().await;
    let mut all = answers(
        &[
            "question-1-1-1",
            "question-1-1-2",
            "question-1-1-3",
            "question-1-1-4",
            "question-1-1-5",
        ],
        "Option B",
    );
    let long = "x".repeat(80);
    for id in ["question-1-2-1", "question-1-2-2", "question-1-2-3"] {
        all[id] = JsonValue::from(long.as_str());
    }

    let (status, response) = app
        .post(
            "/api/responses",
            json!({
                "assessmentId": "assessment-1",
                "candidateId": "candidate-1",
                "responses": all
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["score"], 100);
    let response_id = response["id"].as_str().unwrap();

    let (_, fetched) = app.get(&format!("/api/responses/{}", response_id)).await;
    assert_eq!(fetched["assessmentId"], "assessment-1");

    let (_, by_assessment) = app.get("/api/assessments/assessment-1/responses").await;
    assert_eq!(by_assessment.as_array().unwrap().len(), 1);

    let (_, candidate) = app.get("/api/candidates/candidate-1").await;
    assert_eq!(candidate["assessmentScores"][0]["score"], 100);
    let last = candidate["timeline"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["type"], "assessment_completed");
    assert_eq!(last["description"], "Assessment completed with score: 100%");

    let (_, mine) = app.get("/api/candidates/candidate-1/responses").await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn submission_for_unknown_assessment() {
    let app = common::seeded_app().await;
    let (status, _) = app
        .post(
            "/api/responses",
            json!({ "assessmentId": "assessment-99", "candidateId": "candidate-1", "responses": {} }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
