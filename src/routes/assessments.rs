use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::assessment_dto::{
        AddSectionPayload, CreateAssessmentPayload, EvaluatePayload, QuestionInput,
        ReorderPayload, UpdateAssessmentPayload,
    },
    error::Result,
    models::assessment::Assessment,
    services::runtime_service::{RuntimeService, SectionEvaluation},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "All assessments, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assessments = state.assessment_service.list_all().await?;
    Ok(Json(assessments))
}

#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = CreateAssessmentPayload,
    responses(
        (status = 201, description = "Assessment created", body = Json<Assessment>),
        (status = 400, description = "Invalid structure"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment found", body = Json<Assessment>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_by_id(&id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    patch,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    request_body = UpdateAssessmentPayload,
    responses(
        (status = 200, description = "Assessment updated", body = Json<Assessment>),
        (status = 400, description = "Invalid structure"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn update_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.update(&id, payload).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 204, description = "Assessment deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.assessment_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/publish",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Publication toggled", body = Json<Assessment>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.toggle_publish(&id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/sections",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    request_body = AddSectionPayload,
    responses(
        (status = 201, description = "Section appended", body = Json<Assessment>),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddSectionPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.add_section(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/sections/{section_id}/duplicate",
    params(
        ("id" = String, Path, description = "Assessment ID"),
        ("section_id" = String, Path, description = "Section ID")
    ),
    responses(
        (status = 201, description = "Copy appended", body = Json<Assessment>),
        (status = 404, description = "Assessment or section not found")
    )
)]
#[axum::debug_handler]
pub async fn duplicate_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .assessment_service
        .duplicate_section(&id, &section_id)
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/sections/{section_id}/questions",
    params(
        ("id" = String, Path, description = "Assessment ID"),
        ("section_id" = String, Path, description = "Section ID")
    ),
    request_body = QuestionInput,
    responses(
        (status = 201, description = "Question appended", body = Json<Assessment>),
        (status = 400, description = "Invalid structure"),
        (status = 404, description = "Assessment or section not found")
    )
)]
#[axum::debug_handler]
pub async fn add_question(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
    Json(payload): Json<QuestionInput>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .assessment_service
        .add_question(&id, &section_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/sections/reorder",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    request_body = ReorderPayload,
    responses(
        (status = 200, description = "Sections renumbered", body = Json<Assessment>),
        (status = 400, description = "Index out of range")
    )
)]
#[axum::debug_handler]
pub async fn reorder_sections(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReorderPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .assessment_service
        .reorder_sections(&id, payload)
        .await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/sections/{section_id}/questions/reorder",
    params(
        ("id" = String, Path, description = "Assessment ID"),
        ("section_id" = String, Path, description = "Section ID")
    ),
    request_body = ReorderPayload,
    responses(
        (status = 200, description = "Questions renumbered", body = Json<Assessment>),
        (status = 400, description = "Index out of range")
    )
)]
#[axum::debug_handler]
pub async fn reorder_questions(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
    Json(payload): Json<ReorderPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .assessment_service
        .reorder_questions(&id, &section_id, payload)
        .await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/evaluate",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    request_body = EvaluatePayload,
    responses(
        (status = 200, description = "Visibility, errors and gate for one section", body = Json<SectionEvaluation>),
        (status = 400, description = "Section index out of range"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn evaluate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EvaluatePayload>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_by_id(&id).await?;
    let evaluation = RuntimeService::evaluate(&assessment, payload.section_index, &payload.answers)?;
    Ok(Json(evaluation))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}/responses",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Responses submitted for the assessment")
    )
)]
#[axum::debug_handler]
pub async fn list_assessment_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let responses = state.response_service.list_by_assessment(&id).await?;
    Ok(Json(responses))
}
