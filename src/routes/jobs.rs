use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobListQuery, JobListResponse, ReorderJobsPayload, UpdateJobPayload,
    },
    error::Result,
    models::job::Job,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Title substring"),
        ("status" = Option<String>, Query, description = "active or archived"),
        ("tag" = Option<String>, Query, description = "Exact tag")
    ),
    responses(
        (status = 200, description = "Filtered page of jobs by rank", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<Job>),
        (status = 400, description = "Invalid payload"),
        (status = 503, description = "Simulated network failure")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<Job>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(&id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<Job>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.update(&id, payload).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/archive",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Status toggled", body = Json<Job>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.toggle_archive(&id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    post,
    path = "/api/jobs/reorder",
    request_body = ReorderJobsPayload,
    responses(
        (status = 200, description = "Every job with its new rank"),
        (status = 400, description = "Index outside the page"),
        (status = 503, description = "Simulated network failure, nothing persisted")
    )
)]
#[axum::debug_handler]
pub async fn reorder_jobs(
    State(state): State<AppState>,
    Json(payload): Json<ReorderJobsPayload>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.reorder(payload).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/candidates",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Candidates who applied to the job")
    )
)]
#[axum::debug_handler]
pub async fn list_job_candidates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_by_job(&id).await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/assessments",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Assessments attached to the job")
    )
)]
#[axum::debug_handler]
pub async fn list_job_assessments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessments = state.assessment_service.list_by_job(&id).await?;
    Ok(Json(assessments))
}
