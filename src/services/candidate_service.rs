use std::collections::BTreeMap;
use std::sync::Arc;

use crate::database::store::{Store, JOB_ID};
use crate::dto::candidate_dto::{
    AddNotePayload, BoardQuery, CandidateListQuery, CreateCandidatePayload, MoveCandidatePayload,
    StageColumn, StageStats, UpdateCandidatePayload,
};
use crate::dto::page::Page;
use crate::error::{Error, Result};
use crate::models::candidate::{
    Candidate, CandidateStage, Note, TimelineEvent, TimelineEventType,
};
use crate::services::network_service::NetworkSimulator;
use crate::services::{contains_ci, storage_failure};
use crate::utils::{
    ids::new_id, mentions::extract_mentions, reorder::cross_group_target, time::now,
    validation::validate,
};

pub const CURRENT_USER: &str = "current-user";

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn Store>,
    network: NetworkSimulator,
    page_size: i64,
}

pub(crate) fn timeline_event(event_type: TimelineEventType, description: String) -> TimelineEvent {
    TimelineEvent {
        id: new_id("timeline"),
        event_type,
        description,
        created_at: now(),
        metadata: None,
    }
}

fn matches_search(candidate: &Candidate, search: Option<&str>) -> bool {
    search.map_or(true, |s| {
        contains_ci(&candidate.name, s) || contains_ci(&candidate.email, s)
    })
}

fn newest_first(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}

impl CandidateService {
    pub fn new(store: Arc<dyn Store>, network: NetworkSimulator, page_size: i64) -> Self {
        Self {
            store,
            network,
            page_size,
        }
    }

    async fn load(&self, id: &str, operation: &str) -> Result<Candidate> {
        self.store
            .candidates()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure(operation, e))?
            .ok_or_else(|| Error::not_found("Candidate", id))
    }

    async fn save(&self, mut candidate: Candidate, operation: &str) -> Result<Candidate> {
        candidate.updated_at = now();
        self.store
            .candidates()
            .replace(candidate.clone())
            .await
            .map_err(|e| storage_failure(operation, e))?;
        Ok(candidate)
    }

    async fn ensure_job(&self, job_id: &str, operation: &str) -> Result<()> {
        self.store
            .jobs()
            .get_by_id(job_id)
            .await
            .map_err(|e| storage_failure(operation, e))?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Job", job_id))
    }

    pub async fn list_all(&self) -> Result<Vec<Candidate>> {
        self.network.read().await;
        let mut candidates = self.store.candidates().get_all().await?;
        newest_first(&mut candidates);
        Ok(candidates)
    }

    pub async fn list(&self, query: CandidateListQuery) -> Result<Page<Candidate>> {
        let candidates = self.list_all().await?;
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| matches_search(c, query.search.as_deref()))
            .filter(|c| query.stage.map_or(true, |s| c.current_stage == s))
            .filter(|c| query.job_id.as_deref().map_or(true, |j| c.job_id == j))
            .collect();
        let page_size = query.page_size.unwrap_or(self.page_size).clamp(1, 100);
        Ok(Page::paginate(filtered, query.page, page_size))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Candidate> {
        self.network.read().await;
        self.store
            .candidates()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Candidate", id))
    }

    pub async fn list_by_job(&self, job_id: &str) -> Result<Vec<Candidate>> {
        self.network.read().await;
        let mut candidates = self.store.candidates().get_by_index(JOB_ID, job_id).await?;
        newest_first(&mut candidates);
        Ok(candidates)
    }

    /// Case-insensitive substring match on name or email.
    pub async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        self.network.read().await;
        let needle = query.to_string();
        let mut hits = self
            .store
            .candidates()
            .filter(&move |c: &Candidate| matches_search(c, Some(needle.as_str())))
            .await?;
        newest_first(&mut hits);
        Ok(hits)
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        validate(&payload)?;
        self.network.write("create candidate").await?;

        self.ensure_job(&payload.job_id, "create candidate").await?;

        let timestamp = now();
        let candidate = Candidate {
            id: new_id("candidate"),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone,
            resume: payload.resume,
            current_stage: payload.current_stage.unwrap_or(CandidateStage::Applied),
            job_id: payload.job_id,
            notes: Vec::new(),
            assessment_scores: Vec::new(),
            timeline: vec![timeline_event(
                TimelineEventType::StageChange,
                "Application submitted".to_string(),
            )],
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.store
            .candidates()
            .insert(candidate.clone())
            .await
            .map_err(|e| storage_failure("create candidate", e))?;
        tracing::info!(candidate_id = %candidate.id, job_id = %candidate.job_id, "Candidate created");
        Ok(candidate)
    }

    pub async fn update(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        validate(&payload)?;
        self.network.write("update candidate").await?;

        let mut candidate = self.load(id, "update candidate").await?;
        if let Some(name) = payload.name {
            candidate.name = name.trim().to_string();
        }
        if let Some(email) = payload.email {
            candidate.email = email.trim().to_string();
        }
        if let Some(phone) = payload.phone {
            candidate.phone = Some(phone);
        }
        if let Some(resume) = payload.resume {
            candidate.resume = Some(resume);
        }
        if let Some(job_id) = payload.job_id {
            self.ensure_job(&job_id, "update candidate").await?;
            candidate.job_id = job_id;
        }
        self.save(candidate, "update candidate").await
    }

    /// Any stage may follow any other; each call records one `stage_change` event.
    pub async fn update_stage(&self, id: &str, stage: CandidateStage) -> Result<Candidate> {
        self.network.write("update candidate stage").await?;

        let mut candidate = self.load(id, "update candidate stage").await?;
        let from = candidate.current_stage;
        candidate.current_stage = stage;
        candidate.timeline.push(timeline_event(
            TimelineEventType::StageChange,
            format!("Moved to {}", stage),
        ));

        let candidate = self.save(candidate, "update candidate stage").await?;
        tracing::info!(candidate_id = %id, %from, to = %stage, "Candidate stage changed");
        Ok(candidate)
    }

    /// Kanban drop. Only a change of column is persisted.
    pub async fn move_on_board(
        &self,
        id: &str,
        payload: MoveCandidatePayload,
    ) -> Result<Candidate> {
        match cross_group_target(payload.source_stage, payload.destination_stage) {
            Some(stage) => self.update_stage(id, stage).await,
            None => self.get_by_id(id).await,
        }
    }

    pub async fn add_note(&self, id: &str, payload: AddNotePayload) -> Result<Candidate> {
        validate(&payload)?;
        self.network.write("add candidate note").await?;

        let mut candidate = self.load(id, "add candidate note").await?;
        let content = payload.content.trim().to_string();
        let mentions = payload
            .mentions
            .unwrap_or_else(|| extract_mentions(&content));

        candidate.notes.push(Note {
            id: new_id("note"),
            content,
            mentions,
            author_id: CURRENT_USER.to_string(),
            created_at: now(),
        });
        candidate.timeline.push(timeline_event(
            TimelineEventType::NoteAdded,
            "Note added".to_string(),
        ));

        self.save(candidate, "add candidate note").await
    }

    /// Candidates grouped into the seven stage columns, in pipeline order.
    pub async fn board(&self, query: BoardQuery) -> Result<Vec<StageColumn>> {
        let candidates = self.list_all().await?;
        let mut columns: Vec<StageColumn> = CandidateStage::ALL
            .iter()
            .map(|stage| StageColumn {
                stage: *stage,
                title: stage.title().to_string(),
                candidates: Vec::new(),
            })
            .collect();

        for candidate in candidates
            .into_iter()
            .filter(|c| matches_search(c, query.search.as_deref()))
            .filter(|c| query.job_id.as_deref().map_or(true, |j| c.job_id == j))
        {
            if let Some(column) = columns.iter_mut().find(|col| col.stage == candidate.current_stage) {
                column.candidates.push(candidate);
            }
        }
        Ok(columns)
    }

    pub async fn stats(&self) -> Result<StageStats> {
        let candidates = self.list_all().await?;
        let mut counts: BTreeMap<CandidateStage, usize> =
            CandidateStage::ALL.iter().map(|s| (*s, 0)).collect();
        for candidate in &candidates {
            *counts.entry(candidate.current_stage).or_default() += 1;
        }
        Ok(StageStats {
            total: candidates.len(),
            counts,
        })
    }
}
