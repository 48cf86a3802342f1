use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    assessment_response::Answers,
    question::{ConditionalRule, QuestionType, ValidationRule},
};

/// Question as sent by the builder. A missing id is generated on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub validation: Option<ValidationRule>,
    pub conditional_logic: Option<ConditionalRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub job_id: String,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub job_id: Option<String>,
    pub sections: Option<Vec<SectionInput>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePayload {
    #[serde(default)]
    pub section_index: usize,
    #[serde(default)]
    pub answers: Answers,
}
