use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::response_dto::SubmitResponsePayload, error::Result,
    models::assessment_response::AssessmentResponse, AppState,
};

#[utoipa::path(
    get,
    path = "/api/responses",
    responses(
        (status = 200, description = "All submitted responses")
    )
)]
#[axum::debug_handler]
pub async fn list_responses(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let responses = state.response_service.list_all().await?;
    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/responses",
    request_body = SubmitResponsePayload,
    responses(
        (status = 201, description = "Response stored with its score", body = Json<AssessmentResponse>),
        (status = 404, description = "Assessment not found"),
        (status = 503, description = "Simulated network failure")
    )
)]
#[axum::debug_handler]
pub async fn submit_response(
    State(state): State<AppState>,
    Json(payload): Json<SubmitResponsePayload>,
) -> Result<impl IntoResponse> {
    let response = state.response_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/responses/{id}",
    params(
        ("id" = String, Path, description = "Response ID")
    ),
    responses(
        (status = 200, description = "Response found", body = Json<AssessmentResponse>),
        (status = 404, description = "Response not found")
    )
)]
#[axum::debug_handler]
pub async fn get_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let response = state.response_service.get_by_id(&id).await?;
    Ok(Json(response))
}
