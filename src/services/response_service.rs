use std::sync::Arc;

use crate::database::store::{Store, ASSESSMENT_ID, CANDIDATE_ID};
use crate::dto::response_dto::SubmitResponsePayload;
use crate::error::{Error, Result};
use crate::models::{
    assessment_response::AssessmentResponse,
    candidate::{AssessmentScore, TimelineEventType},
};
use crate::services::candidate_service::timeline_event;
use crate::services::network_service::NetworkSimulator;
use crate::services::runtime_service::RuntimeService;
use crate::services::storage_failure;
use crate::utils::{ids::new_id, time::now, validation::validate};

#[derive(Clone)]
pub struct ResponseService {
    store: Arc<dyn Store>,
    network: NetworkSimulator,
}

impl ResponseService {
    pub fn new(store: Arc<dyn Store>, network: NetworkSimulator) -> Self {
        Self { store, network }
    }

    pub async fn list_all(&self) -> Result<Vec<AssessmentResponse>> {
        self.network.read().await;
        self.store.responses().get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AssessmentResponse> {
        self.network.read().await;
        self.store
            .responses()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Response", id))
    }

    pub async fn list_by_assessment(&self, assessment_id: &str) -> Result<Vec<AssessmentResponse>> {
        self.network.read().await;
        self.store
            .responses()
            .get_by_index(ASSESSMENT_ID, assessment_id)
            .await
    }

    pub async fn list_by_candidate(&self, candidate_id: &str) -> Result<Vec<AssessmentResponse>> {
        self.network.read().await;
        self.store
            .responses()
            .get_by_index(CANDIDATE_ID, candidate_id)
            .await
    }

    /// Stores a completed attempt, scored from the answered share of questions.
    ///
    /// A known candidate also gets the score and an `assessment_completed`
    /// timeline entry. Unknown candidate ids are stored as given.
    pub async fn submit(&self, payload: SubmitResponsePayload) -> Result<AssessmentResponse> {
        validate(&payload)?;
        self.network.write("submit response").await?;

        let assessment = self
            .store
            .assessments()
            .get_by_id(&payload.assessment_id)
            .await
            .map_err(|e| storage_failure("submit response", e))?
            .ok_or_else(|| Error::not_found("Assessment", &payload.assessment_id))?;

        let score = RuntimeService::score(&assessment, &payload.responses);
        let completed_at = payload.completed_at.unwrap_or_else(now);
        let response = AssessmentResponse {
            id: new_id("response"),
            assessment_id: assessment.id.clone(),
            candidate_id: payload.candidate_id,
            responses: payload.responses,
            completed_at: Some(completed_at),
            score: Some(score),
        };

        self.store
            .responses()
            .insert(response.clone())
            .await
            .map_err(|e| storage_failure("submit response", e))?;

        let candidate = self
            .store
            .candidates()
            .get_by_id(&response.candidate_id)
            .await
            .map_err(|e| storage_failure("submit response", e))?;

        match candidate {
            Some(mut candidate) => {
                candidate.assessment_scores.push(AssessmentScore {
                    assessment_id: assessment.id.clone(),
                    score,
                    completed_at,
                    responses: response.responses.clone(),
                });
                candidate.timeline.push(timeline_event(
                    TimelineEventType::AssessmentCompleted,
                    format!("Assessment completed with score: {}%", score),
                ));
                candidate.updated_at = now();
                self.store
                    .candidates()
                    .replace(candidate)
                    .await
                    .map_err(|e| storage_failure("submit response", e))?;
            }
            None => {
                tracing::debug!(candidate_id = %response.candidate_id, "Response for unknown candidate");
            }
        }

        tracing::info!(
            response_id = %response.id,
            assessment_id = %response.assessment_id,
            score,
            "Assessment response submitted"
        );
        Ok(response)
    }
}
