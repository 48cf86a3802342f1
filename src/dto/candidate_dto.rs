use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateStage};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub resume: Option<String>,
    #[validate(length(min = 1))]
    pub job_id: String,
    pub current_stage: Option<CandidateStage>,
}

/// Stage changes go through the stage and move endpoints so the timeline stays complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume: Option<String>,
    #[validate(length(min = 1))]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub stage: Option<CandidateStage>,
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardQuery {
    pub search: Option<String>,
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageChangePayload {
    pub stage: CandidateStage,
}

/// A kanban drop. The index inside the destination column is accepted but not kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCandidatePayload {
    pub source_stage: CandidateStage,
    pub destination_stage: CandidateStage,
    #[serde(default)]
    pub destination_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNotePayload {
    #[validate(length(min = 1))]
    pub content: String,
    /// Extracted from `@name` tokens in the content when omitted.
    pub mentions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumn {
    pub stage: CandidateStage,
    pub title: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStats {
    pub total: usize,
    pub counts: BTreeMap<CandidateStage, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}
