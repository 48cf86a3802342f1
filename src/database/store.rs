use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    assessment::Assessment, assessment_response::AssessmentResponse, candidate::Candidate,
    job::Job,
};

/// A record stored in a [`Collection`], keyed by id.
pub trait Document: Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Secondary index entries as `(field, value)` pairs.
    fn index_entries(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

pub type Filter<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Indexed document collection. Individual calls are atomic; nothing spans calls.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Exact-match lookup through a secondary index.
    async fn get_by_index(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// Full scan with a predicate.
    async fn filter(&self, predicate: Filter<'_, T>) -> Result<Vec<T>>;

    /// Fails with `Conflict` when the id is taken.
    async fn insert(&self, doc: T) -> Result<String>;

    /// Fails with `NotFound` when the id is absent.
    async fn replace(&self, doc: T) -> Result<()>;

    /// Deleting a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Upserts every document.
    async fn bulk_put(&self, docs: Vec<T>) -> Result<()>;

    async fn count(&self) -> Result<usize>;
}

/// The four top-level collections, passed explicitly to the services.
pub trait Store: Send + Sync {
    fn jobs(&self) -> &dyn Collection<Job>;
    fn candidates(&self) -> &dyn Collection<Candidate>;
    fn assessments(&self) -> &dyn Collection<Assessment>;
    fn responses(&self) -> &dyn Collection<AssessmentResponse>;
}

pub const JOB_ID: &str = "jobId";
pub const ASSESSMENT_ID: &str = "assessmentId";
pub const CANDIDATE_ID: &str = "candidateId";

impl Document for Job {
    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Candidate {
    const COLLECTION: &'static str = "candidates";

    fn id(&self) -> &str {
        &self.id
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![(JOB_ID, self.job_id.clone())]
    }
}

impl Document for Assessment {
    const COLLECTION: &'static str = "assessments";

    fn id(&self) -> &str {
        &self.id
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![(JOB_ID, self.job_id.clone())]
    }
}

impl Document for AssessmentResponse {
    const COLLECTION: &'static str = "assessmentResponses";

    fn id(&self) -> &str {
        &self.id
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (ASSESSMENT_ID, self.assessment_id.clone()),
            (CANDIDATE_ID, self.candidate_id.clone()),
        ]
    }
}
