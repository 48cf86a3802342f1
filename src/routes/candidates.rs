use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::candidate_dto::{
        AddNotePayload, BoardQuery, CandidateListQuery, CreateCandidatePayload,
        MoveCandidatePayload, SearchQuery, StageChangePayload, StageStats,
        UpdateCandidatePayload,
    },
    error::Result,
    models::candidate::Candidate,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Name or email substring"),
        ("stage" = Option<String>, Query, description = "Pipeline stage"),
        ("jobId" = Option<String>, Query, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Filtered page of candidates, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.candidate_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = Json<Candidate>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/search",
    params(
        ("q" = String, Query, description = "Name or email substring")
    ),
    responses(
        (status = 200, description = "Matching candidates")
    )
)]
#[axum::debug_handler]
pub async fn search_candidates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let hits = state.candidate_service.search(&query.q).await?;
    Ok(Json(hits))
}

#[utoipa::path(
    get,
    path = "/api/candidates/board",
    params(
        ("search" = Option<String>, Query, description = "Name or email substring"),
        ("jobId" = Option<String>, Query, description = "Job ID")
    ),
    responses(
        (status = 200, description = "One column per stage")
    )
)]
#[axum::debug_handler]
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<impl IntoResponse> {
    let columns = state.candidate_service.board(query).await?;
    Ok(Json(columns))
}

#[utoipa::path(
    get,
    path = "/api/candidates/stats",
    responses(
        (status = 200, description = "Candidate count per stage", body = Json<StageStats>)
    )
)]
#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.candidate_service.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Json<Candidate>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_by_id(&id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = Json<Candidate>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.update(&id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/stage",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    request_body = StageChangePayload,
    responses(
        (status = 200, description = "Stage changed and recorded on the timeline", body = Json<Candidate>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn change_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StageChangePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .update_stage(&id, payload.stage)
        .await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/move",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    request_body = MoveCandidatePayload,
    responses(
        (status = 200, description = "Candidate after the drop", body = Json<Candidate>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn move_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveCandidatePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.move_on_board(&id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/notes",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    request_body = AddNotePayload,
    responses(
        (status = 201, description = "Note appended", body = Json<Candidate>),
        (status = 400, description = "Empty note"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddNotePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.add_note(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/responses",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Assessment responses submitted by the candidate")
    )
)]
#[axum::debug_handler]
pub async fn list_candidate_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let responses = state.response_service.list_by_candidate(&id).await?;
    Ok(Json(responses))
}
