use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::models::assessment_response::Answers;

/// Pipeline position of a candidate. Any stage may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Applied,
    Screening,
    Interview,
    Assessment,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStage {
    /// Board column order.
    pub const ALL: [CandidateStage; 7] = [
        CandidateStage::Applied,
        CandidateStage::Screening,
        CandidateStage::Interview,
        CandidateStage::Assessment,
        CandidateStage::Offer,
        CandidateStage::Hired,
        CandidateStage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStage::Applied => "applied",
            CandidateStage::Screening => "screening",
            CandidateStage::Interview => "interview",
            CandidateStage::Assessment => "assessment",
            CandidateStage::Offer => "offer",
            CandidateStage::Hired => "hired",
            CandidateStage::Rejected => "rejected",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CandidateStage::Applied => "Applied",
            CandidateStage::Screening => "Screening",
            CandidateStage::Interview => "Interview",
            CandidateStage::Assessment => "Assessment",
            CandidateStage::Offer => "Offer",
            CandidateStage::Hired => "Hired",
            CandidateStage::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    StageChange,
    NoteAdded,
    AssessmentCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: TimelineEventType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub assessment_id: String,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
    pub responses: Answers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    pub current_stage: CandidateStage,
    pub job_id: String,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub assessment_scores: Vec<AssessmentScore>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
