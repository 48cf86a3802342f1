pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::config::Config;
use crate::database::store::Store;
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService, network_service::NetworkSimulator,
    response_service::ResponseService,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub assessment_service: AssessmentService,
    pub response_service: ResponseService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self::with_network(store, NetworkSimulator::from_config(config), config)
    }

    /// Same wiring with an explicit simulator, e.g. a zero-delay one in tests.
    pub fn with_network(store: Arc<dyn Store>, network: NetworkSimulator, config: &Config) -> Self {
        let job_service = JobService::new(store.clone(), network.clone(), config.jobs_page_size);
        let candidate_service =
            CandidateService::new(store.clone(), network.clone(), config.candidates_page_size);
        let assessment_service = AssessmentService::new(
            store.clone(),
            network.clone(),
            config.share_base_url.clone(),
        );
        let response_service = ResponseService::new(store.clone(), network);

        Self {
            store,
            job_service,
            candidate_service,
            assessment_service,
            response_service,
        }
    }
}

pub fn app(state: AppState, cors_origin: Option<&str>) -> Router {
    let jobs_api = Router::new()
        .route(
            "/api/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route("/api/jobs/reorder", post(routes::jobs::reorder_jobs))
        .route(
            "/api/jobs/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route("/api/jobs/:id/archive", post(routes::jobs::toggle_archive))
        .route(
            "/api/jobs/:id/candidates",
            get(routes::jobs::list_job_candidates),
        )
        .route(
            "/api/jobs/:id/assessments",
            get(routes::jobs::list_job_assessments),
        );

    let candidates_api = Router::new()
        .route(
            "/api/candidates",
            get(routes::candidates::list_candidates).post(routes::candidates::create_candidate),
        )
        .route(
            "/api/candidates/search",
            get(routes::candidates::search_candidates),
        )
        .route("/api/candidates/board", get(routes::candidates::get_board))
        .route("/api/candidates/stats", get(routes::candidates::get_stats))
        .route(
            "/api/candidates/:id",
            get(routes::candidates::get_candidate).patch(routes::candidates::update_candidate),
        )
        .route(
            "/api/candidates/:id/stage",
            post(routes::candidates::change_stage),
        )
        .route(
            "/api/candidates/:id/move",
            post(routes::candidates::move_candidate),
        )
        .route(
            "/api/candidates/:id/notes",
            post(routes::candidates::add_note),
        )
        .route(
            "/api/candidates/:id/responses",
            get(routes::candidates::list_candidate_responses),
        );

    let assessments_api = Router::new()
        .route(
            "/api/assessments",
            get(routes::assessments::list_assessments)
                .post(routes::assessments::create_assessment),
        )
        .route(
            "/api/assessments/:id",
            get(routes::assessments::get_assessment)
                .patch(routes::assessments::update_assessment)
                .delete(routes::assessments::delete_assessment),
        )
        .route(
            "/api/assessments/:id/publish",
            post(routes::assessments::toggle_publish),
        )
        .route(
            "/api/assessments/:id/sections",
            post(routes::assessments::add_section),
        )
        .route(
            "/api/assessments/:id/sections/reorder",
            post(routes::assessments::reorder_sections),
        )
        .route(
            "/api/assessments/:id/sections/:section_id/duplicate",
            post(routes::assessments::duplicate_section),
        )
        .route(
            "/api/assessments/:id/sections/:section_id/questions",
            post(routes::assessments::add_question),
        )
        .route(
            "/api/assessments/:id/sections/:section_id/questions/reorder",
            post(routes::assessments::reorder_questions),
        )
        .route(
            "/api/assessments/:id/evaluate",
            post(routes::assessments::evaluate),
        )
        .route(
            "/api/assessments/:id/responses",
            get(routes::assessments::list_assessment_responses),
        );

    let responses_api = Router::new()
        .route(
            "/api/responses",
            get(routes::responses::list_responses).post(routes::responses::submit_response),
        )
        .route("/api/responses/:id", get(routes::responses::get_response));

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(jobs_api)
        .merge(candidates_api)
        .merge(assessments_api)
        .merge(responses_api)
        .with_state(state)
        .layer(middleware::cors::cors_layer(cors_origin))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
