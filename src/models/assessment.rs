use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    pub job_id: String,
    #[serde(default)]
    pub sections: Vec<AssessmentSection>,
    #[serde(default)]
    pub is_published: bool,
    /// Present iff `is_published`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut AssessmentSection> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSection {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub questions: Vec<Question>,
}
