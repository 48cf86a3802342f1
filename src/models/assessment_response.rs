use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Question id to raw answer value.
pub type Answers = HashMap<String, JsonValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: String,
    pub assessment_id: String,
    pub candidate_id: String,
    #[serde(default)]
    pub responses: Answers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}
