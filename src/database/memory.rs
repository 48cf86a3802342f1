use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::database::store::{Collection, Document, Filter, Store};
use crate::error::{Error, Result};
use crate::models::{
    assessment::Assessment, assessment_response::AssessmentResponse, candidate::Candidate,
    job::Job,
};

struct Inner<T> {
    docs: BTreeMap<String, T>,
    // field -> value -> ids
    index: HashMap<&'static str, HashMap<String, BTreeSet<String>>>,
}

impl<T: Document> Inner<T> {
    fn unindex(&mut self, id: &str) {
        let Some(old) = self.docs.get(id) else {
            return;
        };
        for (field, value) in old.index_entries() {
            let Some(values) = self.index.get_mut(field) else {
                continue;
            };
            if let Some(ids) = values.get_mut(&value) {
                ids.remove(id);
                if ids.is_empty() {
                    values.remove(&value);
                }
            }
            if values.is_empty() {
                self.index.remove(field);
            }
        }
    }

    fn put(&mut self, doc: T) {
        let id = doc.id().to_string();
        self.unindex(&id);
        for (field, value) in doc.index_entries() {
            self.index
                .entry(field)
                .or_default()
                .entry(value)
                .or_default()
                .insert(id.clone());
        }
        self.docs.insert(id, doc);
    }

    fn remove(&mut self, id: &str) {
        self.unindex(id);
        self.docs.remove(id);
    }
}

/// In-process collection with exact-match secondary indexes.
pub struct MemoryCollection<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Document> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                docs: BTreeMap::new(),
                index: HashMap::new(),
            }),
        }
    }
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> Collection<T> for MemoryCollection<T> {
    async fn get_all(&self) -> Result<Vec<T>> {
        let guard = self.inner.read().await;
        Ok(guard.docs.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let guard = self.inner.read().await;
        Ok(guard.docs.get(id).cloned())
    }

    async fn get_by_index(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let guard = self.inner.read().await;
        let Some(ids) = guard.index.get(field).and_then(|values| values.get(value)) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| guard.docs.get(id).cloned()).collect())
    }

    async fn filter(&self, predicate: Filter<'_, T>) -> Result<Vec<T>> {
        let guard = self.inner.read().await;
        Ok(guard.docs.values().filter(|d| predicate(d)).cloned().collect())
    }

    async fn insert(&self, doc: T) -> Result<String> {
        let mut guard = self.inner.write().await;
        let id = doc.id().to_string();
        if guard.docs.contains_key(&id) {
            return Err(Error::Conflict(format!(
                "Key {} already exists in {}",
                id,
                T::COLLECTION
            )));
        }
        guard.put(doc);
        Ok(id)
    }

    async fn replace(&self, doc: T) -> Result<()> {
        let mut guard = self.inner.write().await;
        if !guard.docs.contains_key(doc.id()) {
            return Err(Error::NotFound(format!(
                "Key {} not found in {}",
                doc.id(),
                T::COLLECTION
            )));
        }
        guard.put(doc);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.remove(id);
        Ok(())
    }

    async fn bulk_put(&self, docs: Vec<T>) -> Result<()> {
        let mut guard = self.inner.write().await;
        for doc in docs {
            guard.put(doc);
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let guard = self.inner.read().await;
        Ok(guard.docs.len())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    jobs: MemoryCollection<Job>,
    candidates: MemoryCollection<Candidate>,
    assessments: MemoryCollection<Assessment>,
    responses: MemoryCollection<AssessmentResponse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn jobs(&self) -> &dyn Collection<Job> {
        &self.jobs
    }

    fn candidates(&self) -> &dyn Collection<Candidate> {
        &self.candidates
    }

    fn assessments(&self) -> &dyn Collection<Assessment> {
        &self.assessments
    }

    fn responses(&self) -> &dyn Collection<AssessmentResponse> {
        &self.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::{ASSESSMENT_ID, CANDIDATE_ID, JOB_ID};
    use crate::models::candidate::CandidateStage;
    use chrono::Utc;
    use tokio_test::{assert_err, assert_ok};

    fn candidate(id: &str, job_id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Name {}", id),
            email: format!("{}@email.com", id),
            phone: None,
            resume: None,
            current_stage: CandidateStage::Applied,
            job_id: job_id.to_string(),
            notes: vec![],
            assessment_scores: vec![],
            timeline: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn index_follows_replacement() {
        let store = MemoryStore::new();
        assert_ok!(store.candidates().insert(candidate("c1", "job-1")).await);
        assert_ok!(store.candidates().insert(candidate("c2", "job-1")).await);

        let by_job = store.candidates().get_by_index(JOB_ID, "job-1").await.unwrap();
        assert_eq!(by_job.len(), 2);

        assert_ok!(store.candidates().replace(candidate("c2", "job-2")).await);
        let job1 = store.candidates().get_by_index(JOB_ID, "job-1").await.unwrap();
        let job2 = store.candidates().get_by_index(JOB_ID, "job-2").await.unwrap();
        assert_eq!(job1.len(), 1);
        assert_eq!(job2[0].id, "c2");

        assert_ok!(store.candidates().delete("c1").await);
        let job1 = store.candidates().get_by_index(JOB_ID, "job-1").await.unwrap();
        assert!(job1.is_empty());
    }

    #[tokio::test]
    async fn emptied_index_entries_are_dropped() {
        let store = MemoryCollection::<Candidate>::new();
        assert_ok!(store.insert(candidate("c1", "job-1")).await);
        assert_ok!(store.delete("c1").await);
        assert!(store.inner.read().await.index.is_empty());
        assert!(store.get_by_index(JOB_ID, "job-1").await.unwrap().is_empty());
        assert!(store.get_by_index("unknownField", "job-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_and_replace_rejects_missing() {
        let store = MemoryStore::new();
        assert_ok!(store.candidates().insert(candidate("c1", "job-1")).await);
        let dup = store.candidates().insert(candidate("c1", "job-1")).await;
        assert!(matches!(dup, Err(Error::Conflict(_))));

        let missing = store.candidates().replace(candidate("nope", "job-1")).await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
        assert_eq!(store.candidates().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn responses_indexed_by_both_foreign_keys() {
        let store = MemoryStore::new();
        let response = AssessmentResponse {
            id: "r1".into(),
            assessment_id: "a1".into(),
            candidate_id: "c1".into(),
            responses: Default::default(),
            completed_at: None,
            score: None,
        };
        assert_ok!(store.responses().insert(response).await);
        let by_assessment = store.responses().get_by_index(ASSESSMENT_ID, "a1").await.unwrap();
        let by_candidate = store.responses().get_by_index(CANDIDATE_ID, "c1").await.unwrap();
        assert_eq!(by_assessment.len(), 1);
        assert_eq!(by_candidate.len(), 1);
        assert!(store
            .responses()
            .get_by_index(CANDIDATE_ID, "a1")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn filter_scans_everything() {
        let store = MemoryStore::new();
        store
            .candidates()
            .bulk_put(vec![candidate("a", "job-1"), candidate("b", "job-2")])
            .await
            .unwrap();
        let hits = store
            .candidates()
            .filter(&|c: &Candidate| c.name.ends_with('b'))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_err!(store.candidates().insert(candidate("a", "job-3")).await);
    }
}
