use std::sync::Arc;

use crate::database::store::Store;
use crate::dto::job_dto::{
    CreateJobPayload, JobListQuery, JobListResponse, ReorderJobsPayload, UpdateJobPayload,
};
use crate::dto::page::{page_offset, Page};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::services::network_service::NetworkSimulator;
use crate::services::{contains_ci, storage_failure};
use crate::utils::{
    ids::new_id,
    reorder::reorder_page,
    slug::slugify,
    time::now,
    validation::{validate, validate_job_title},
};

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn Store>,
    network: NetworkSimulator,
    page_size: i64,
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().filter(|l| !l.trim().is_empty()).collect()
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn matches(job: &Job, query: &JobListQuery) -> bool {
    let search_ok = query
        .search
        .as_deref()
        .map_or(true, |s| contains_ci(&job.title, s));
    let status_ok = query.status.map_or(true, |s| job.status == s);
    let tag_ok = query
        .tag
        .as_deref()
        .map_or(true, |t| job.tags.iter().any(|tag| tag == t));
    search_ok && status_ok && tag_ok
}

impl JobService {
    pub fn new(store: Arc<dyn Store>, network: NetworkSimulator, page_size: i64) -> Self {
        Self {
            store,
            network,
            page_size,
        }
    }

    fn page_size(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.page_size).clamp(1, 100)
    }

    async fn load_sorted(&self) -> Result<Vec<Job>> {
        let mut jobs = self.store.jobs().get_all().await?;
        jobs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }

    /// All jobs by rank.
    pub async fn list_all(&self) -> Result<Vec<Job>> {
        self.network.read().await;
        self.load_sorted().await
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobListResponse> {
        self.network.read().await;
        let jobs = self.load_sorted().await?;

        let mut tags: Vec<String> = Vec::new();
        for tag in jobs.iter().flat_map(|j| j.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        let filtered: Vec<Job> = jobs.into_iter().filter(|j| matches(j, &query)).collect();
        let page = Page::paginate(filtered, query.page, self.page_size(query.page_size));

        Ok(JobListResponse { page, tags })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Job> {
        self.network.read().await;
        self.store
            .jobs()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Job", id))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        validate(&payload)?;
        validate_job_title(&payload.title)?;
        self.network.write("create job").await?;

        let order = self
            .store
            .jobs()
            .get_all()
            .await
            .map_err(|e| storage_failure("create job", e))?
            .iter()
            .map(|j| j.order + 1)
            .max()
            .unwrap_or(0);
        let title = payload.title.trim().to_string();
        let timestamp = now();
        let job = Job {
            id: new_id("job"),
            slug: slugify(&title),
            title,
            description: payload.description,
            responsibilities: clean_lines(payload.responsibilities),
            qualifications: clean_lines(payload.qualifications),
            status: payload.status.unwrap_or(JobStatus::Active),
            tags: clean_tags(payload.tags),
            order,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.store
            .jobs()
            .insert(job.clone())
            .await
            .map_err(|e| storage_failure("create job", e))?;
        tracing::info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        validate(&payload)?;
        if let Some(title) = &payload.title {
            validate_job_title(title)?;
        }
        self.network.write("update job").await?;

        let mut job = self
            .store
            .jobs()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("update job", e))?
            .ok_or_else(|| Error::not_found("Job", id))?;

        if let Some(title) = payload.title {
            job.title = title.trim().to_string();
            job.slug = slugify(&job.title);
        }
        if let Some(description) = payload.description {
            job.description = description;
        }
        if let Some(lines) = payload.responsibilities {
            job.responsibilities = clean_lines(lines);
        }
        if let Some(lines) = payload.qualifications {
            job.qualifications = clean_lines(lines);
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = clean_tags(tags);
        }
        job.updated_at = now();

        self.store
            .jobs()
            .replace(job.clone())
            .await
            .map_err(|e| storage_failure("update job", e))?;
        Ok(job)
    }

    /// Flips between active and archived.
    pub async fn toggle_archive(&self, id: &str) -> Result<Job> {
        let current = self.get_by_id(id).await?;
        self.update(
            id,
            UpdateJobPayload {
                status: Some(current.status.toggled()),
                ..Default::default()
            },
        )
        .await
    }

    /// Removes the job and closes the gap it leaves in the ranking.
    ///
    /// Candidates and assessments referencing the job are left in place.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.network.write("delete job").await?;
        self.store
            .jobs()
            .delete(id)
            .await
            .map_err(|e| storage_failure("delete job", e))?;

        let shifted: Vec<Job> = self
            .load_sorted()
            .await
            .map_err(|e| storage_failure("delete job", e))?
            .into_iter()
            .enumerate()
            .filter_map(|(index, mut job)| {
                (job.order != index as i64).then(|| {
                    job.order = index as i64;
                    job
                })
            })
            .collect();
        if !shifted.is_empty() {
            self.store
                .jobs()
                .bulk_put(shifted)
                .await
                .map_err(|e| storage_failure("delete job", e))?;
        }
        Ok(())
    }

    /// Moves one job inside the filtered page and persists the merged ranking.
    ///
    /// On failure nothing is written, so a fresh listing shows the previous order.
    pub async fn reorder(&self, payload: ReorderJobsPayload) -> Result<Vec<Job>> {
        let query = payload.query;
        let page = query.page.unwrap_or(1).max(1);
        let page_size = self.page_size(query.page_size);

        let all = self.load_sorted().await?;
        let page_items: Vec<Job> = all
            .iter()
            .filter(|j| matches(j, &query))
            .skip(usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX))
            .take(page_size as usize)
            .cloned()
            .collect();

        let mut merged = reorder_page(all, page_items, page, page_size, payload.from, payload.to)?;

        self.network.write("reorder jobs").await?;
        let timestamp = now();
        for job in merged.iter_mut() {
            job.updated_at = timestamp;
        }
        self.store
            .jobs()
            .bulk_put(merged.clone())
            .await
            .map_err(|e| storage_failure("reorder jobs", e))?;

        merged.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::services::network_service::AlwaysFail;

    fn service(store: Arc<dyn Store>) -> JobService {
        JobService::new(store, NetworkSimulator::instant(), 10)
    }

    fn payload(title: &str, tags: &[&str]) -> CreateJobPayload {
        CreateJobPayload {
            title: title.to_string(),
            description: "Build things".to_string(),
            responsibilities: vec!["Ship".into(), "  ".into()],
            qualifications: vec![],
            status: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn create_derives_slug_and_appends_rank() {
        let svc = service(Arc::new(MemoryStore::new()));
        let first = svc.create(payload("Backend Engineer", &["Remote", "Remote"])).await.unwrap();
        let second = svc.create(payload("Data  Scientist", &[])).await.unwrap();

        assert_eq!(first.slug, "backend-engineer");
        assert_eq!(first.order, 0);
        assert_eq!(first.tags, vec!["Remote"]);
        assert_eq!(first.responsibilities, vec!["Ship"]);
        assert_eq!(second.slug, "data-scientist");
        assert_eq!(second.order, 1);
    }

    #[tokio::test]
    async fn short_title_rejected_before_any_write() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let svc = service(store.clone());
        let err = svc.create(payload("QA", &[])).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
        assert_eq!(store.jobs().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_missing_job_is_not_found() {
        let svc = service(Arc::new(MemoryStore::new()));
        let err = svc
            .update("job-404", UpdateJobPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn archive_toggles_both_ways() {
        let svc = service(Arc::new(MemoryStore::new()));
        let job = svc.create(payload("Platform Engineer", &[])).await.unwrap();
        let archived = svc.toggle_archive(&job.id).await.unwrap();
        assert_eq!(archived.status, JobStatus::Archived);
        let active = svc.toggle_archive(&job.id).await.unwrap();
        assert_eq!(active.status, JobStatus::Active);
    }

    #[tokio::test]
    async fn failed_reorder_leaves_store_untouched() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let svc = service(store.clone());
        for title in ["Alpha Role", "Beta Role", "Gamma Role"] {
            svc.create(payload(title, &[])).await.unwrap();
        }

        let failing = JobService::new(
            store.clone(),
            NetworkSimulator::with_policy(Arc::new(AlwaysFail)),
            10,
        );
        let err = failing
            .reorder(ReorderJobsPayload {
                from: 0,
                to: 2,
                query: JobListQuery::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));

        let titles: Vec<String> = svc.list_all().await.unwrap().into_iter().map(|j| j.title).collect();
        assert_eq!(titles, ["Alpha Role", "Beta Role", "Gamma Role"]);
    }

    #[tokio::test]
    async fn delete_then_create_keeps_ranks_distinct() {
        let svc = service(Arc::new(MemoryStore::new()));
        let alpha = svc.create(payload("Alpha Role", &[])).await.unwrap();
        for title in ["Beta Role", "Gamma Role"] {
            svc.create(payload(title, &[])).await.unwrap();
        }
        svc.delete(&alpha.id).await.unwrap();
        let delta = svc.create(payload("Delta Role", &[])).await.unwrap();
        assert_eq!(delta.order, 2);

        let ranked: Vec<(String, i64)> = svc
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|j| (j.title, j.order))
            .collect();
        assert_eq!(
            ranked,
            [
                ("Beta Role".to_string(), 0),
                ("Gamma Role".to_string(), 1),
                ("Delta Role".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn reorder_far_past_last_page_is_rejected() {
        let svc = service(Arc::new(MemoryStore::new()));
        svc.create(payload("Alpha Role", &[])).await.unwrap();
        let err = svc
            .reorder(ReorderJobsPayload {
                from: 0,
                to: 0,
                query: JobListQuery {
                    page: Some(i64::MAX),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let listed = svc
            .list(JobListQuery {
                page: Some(i64::MAX),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(listed.page.items.is_empty());
        assert_eq!(listed.page.total, 1);
    }

    #[tokio::test]
    async fn list_filters_by_status_tag_and_search() {
        let svc = service(Arc::new(MemoryStore::new()));
        svc.create(payload("Rust Engineer", &["Remote"])).await.unwrap();
        let go = svc.create(payload("Go Engineer", &["Onsite"])).await.unwrap();
        svc.toggle_archive(&go.id).await.unwrap();

        let remote = svc
            .list(JobListQuery {
                tag: Some("Remote".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(remote.page.total, 1);
        assert_eq!(remote.tags, vec!["Remote", "Onsite"]);

        let archived = svc
            .list(JobListQuery {
                status: Some(JobStatus::Archived),
                search: Some("go".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(archived.page.items[0].id, go.id);
    }
}
