use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Archived,
}

impl JobStatus {
    pub fn toggled(self) -> Self {
        match self {
            JobStatus::Active => JobStatus::Archived,
            JobStatus::Archived => JobStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display rank; contiguous across the collection after a reorder.
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
