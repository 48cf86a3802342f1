use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up, with collection sizes")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = json!({
        "status": "ok",
        "jobs": state.store.jobs().count().await?,
        "candidates": state.store.candidates().count().await?,
        "assessments": state.store.assessments().count().await?,
        "responses": state.store.responses().count().await?,
    });
    Ok((StatusCode::OK, Json(body)))
}
