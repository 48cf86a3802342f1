use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::page::Page;
use crate::models::job::{Job, JobStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub qualifications: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub tag: Option<String>,
}

/// Drag of one job within the page described by the embedded query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderJobsPayload {
    pub from: usize,
    pub to: usize,
    #[serde(flatten)]
    pub query: JobListQuery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    #[serde(flatten)]
    pub page: Page<Job>,
    /// Every tag used by any job, first-seen order.
    pub tags: Vec<String>,
}
