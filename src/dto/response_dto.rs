use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assessment_response::Answers;

/// The score is always computed server-side from the answers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponsePayload {
    #[validate(length(min = 1))]
    pub assessment_id: String,
    #[validate(length(min = 1))]
    pub candidate_id: String,
    #[serde(default)]
    pub responses: Answers,
    pub completed_at: Option<DateTime<Utc>>,
}
