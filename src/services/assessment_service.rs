use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::database::store::{Store, JOB_ID};
use crate::dto::assessment_dto::{
    AddSectionPayload, CreateAssessmentPayload, QuestionInput, ReorderPayload, SectionInput,
    UpdateAssessmentPayload,
};
use crate::error::{Error, Result};
use crate::models::{
    assessment::{Assessment, AssessmentSection},
    question::Question,
};
use crate::services::network_service::NetworkSimulator;
use crate::services::storage_failure;
use crate::utils::{ids::new_id, reorder::reorder, time::now, validation::validate};

#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn Store>,
    network: NetworkSimulator,
    share_base_url: String,
}

fn build_question(input: QuestionInput, order: usize) -> Question {
    Question {
        id: input.id.filter(|id| !id.is_empty()).unwrap_or_else(|| new_id("question")),
        question_type: input.question_type,
        title: input.title,
        description: input.description,
        required: input.required,
        options: input.options,
        validation: input.validation,
        conditional_logic: input.conditional_logic,
        order: order as i64,
    }
}

fn build_sections(inputs: Vec<SectionInput>) -> Vec<AssessmentSection> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| AssessmentSection {
            id: input.id.filter(|id| !id.is_empty()).unwrap_or_else(|| new_id("section")),
            title: input.title,
            description: input.description,
            order: index as i64,
            questions: input
                .questions
                .into_iter()
                .enumerate()
                .map(|(order, q)| build_question(q, order))
                .collect(),
        })
        .collect()
}

/// Structural checks run before any assessment is stored: unique ids,
/// dependencies inside the same assessment and never on the question itself,
/// compilable validation patterns. Dependency cycles are not detected.
pub fn check_assessment(assessment: &Assessment) -> Result<()> {
    let mut section_ids = HashSet::new();
    for section in &assessment.sections {
        if !section_ids.insert(section.id.as_str()) {
            return Err(Error::BadRequest(format!("Duplicate section id {}", section.id)));
        }
    }

    let mut question_ids = HashSet::new();
    for question in assessment.questions() {
        if !question_ids.insert(question.id.as_str()) {
            return Err(Error::BadRequest(format!("Duplicate question id {}", question.id)));
        }
    }

    for question in assessment.questions() {
        if let Some(rule) = &question.conditional_logic {
            if rule.depends_on == question.id {
                return Err(Error::BadRequest(format!(
                    "Question {} cannot depend on itself",
                    question.id
                )));
            }
            if !question_ids.contains(rule.depends_on.as_str()) {
                return Err(Error::BadRequest(format!(
                    "Question {} depends on unknown question {}",
                    question.id, rule.depends_on
                )));
            }
        }
        if let Some(pattern) = question.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
            Regex::new(pattern).map_err(|e| {
                Error::BadRequest(format!(
                    "Question {} has an invalid pattern: {}",
                    question.id, e
                ))
            })?;
        }
    }
    Ok(())
}

impl AssessmentService {
    pub fn new(store: Arc<dyn Store>, network: NetworkSimulator, share_base_url: String) -> Self {
        Self {
            store,
            network,
            share_base_url: share_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn share_link(&self, id: &str) -> String {
        format!("{}/{}", self.share_base_url, id)
    }

    async fn load(&self, id: &str, operation: &str) -> Result<Assessment> {
        self.store
            .assessments()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure(operation, e))?
            .ok_or_else(|| Error::not_found("Assessment", id))
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

    async fn save(&self, mut assessment: Assessment, operation: &str) -> Result<Assessment> {
        check_assessment(&assessment)?;
        self.network.write(operation).await?;
        assessment.updated_at = now();
        self.store
            .assessments()
            .replace(assessment.clone())
            .await
            .map_err(|e| storage_failure(operation, e))?;
        Ok(assessment)
    }

    /// Newest first.
    pub async fn list_all(&self) -> Result<Vec<Assessment>> {
        self.network.read().await;
        let mut items = self.store.assessments().get_all().await?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Assessment> {
        self.network.read().await;
        self.store
            .assessments()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Assessment", id))
    }

    pub async fn list_by_job(&self, job_id: &str) -> Result<Vec<Assessment>> {
        self.network.read().await;
        self.store.assessments().get_by_index(JOB_ID, job_id).await
    }

    pub async fn create(&self, payload: CreateAssessmentPayload) -> Result<Assessment> {
        validate(&payload)?;
        let id = new_id("assessment");
        let timestamp = now();
        let assessment = Assessment {
            shareable_link: payload.is_published.then(|| self.share_link(&id)),
            id,
            title: payload.title.trim().to_string(),
            job_id: payload.job_id,
            sections: build_sections(payload.sections),
            is_published: payload.is_published,
            created_at: timestamp,
            updated_at: timestamp,
        };
        check_assessment(&assessment)?;
        self.network.write("create assessment").await?;

        self.ensure_job(&assessment.job_id, "create assessment").await?;
        self.store
            .assessments()
            .insert(assessment.clone())
            .await
            .map_err(|e| storage_failure("create assessment", e))?;
        tracing::info!(assessment_id = %assessment.id, "Assessment created");
        Ok(assessment)
    }

    pub async fn update(&self, id: &str, payload: UpdateAssessmentPayload) -> Result<Assessment> {
        validate(&payload)?;
        let mut assessment = self.load(id, "update assessment").await?;
        if let Some(title) = payload.title {
            assessment.title = title.trim().to_string();
        }
        if let Some(job_id) = payload.job_id {
            self.ensure_job(&job_id, "update assessment").await?;
            assessment.job_id = job_id;
        }
        if let Some(sections) = payload.sections {
            assessment.sections = build_sections(sections);
        }
        self.save(assessment, "update assessment").await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.network.write("delete assessment").await?;
        self.store
            .assessments()
            .delete(id)
            .await
            .map_err(|e| storage_failure("delete assessment", e))
    }

    /// Publishing attaches a shareable link; unpublishing removes it.
    pub async fn toggle_publish(&self, id: &str) -> Result<Assessment> {
        let mut assessment = self.load(id, "publish assessment").await?;
        assessment.is_published = !assessment.is_published;
        assessment.shareable_link = assessment
            .is_published
            .then(|| self.share_link(&assessment.id));
        self.save(assessment, "publish assessment").await
    }

    pub async fn add_section(&self, id: &str, payload: AddSectionPayload) -> Result<Assessment> {
        let mut assessment = self.load(id, "add section").await?;
        let order = assessment.sections.len() as i64;
        assessment.sections.push(AssessmentSection {
            id: new_id("section"),
            title: payload.title.unwrap_or_else(|| "New Section".to_string()),
            description: payload.description,
            order,
            questions: Vec::new(),
        });
        self.save(assessment, "add section").await
    }

    /// Appends a copy with fresh section and question ids. Conditional rules
    /// inside the copy still point at the original questions.
    pub async fn duplicate_section(&self, id: &str, section_id: &str) -> Result<Assessment> {
        let mut assessment = self.load(id, "duplicate section").await?;
        let source = assessment
            .sections
            .iter()
            .find(|s| s.id == section_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Section", section_id))?;

        let copy = AssessmentSection {
            id: new_id("section"),
            title: format!("{} (Copy)", source.title),
            description: source.description,
            order: assessment.sections.len() as i64,
            questions: source
                .questions
                .into_iter()
                .map(|q| Question {
                    id: new_id("question"),
                    ..q
                })
                .collect(),
        };
        assessment.sections.push(copy);
        self.save(assessment, "duplicate section").await
    }

    pub async fn add_question(
        &self,
        id: &str,
        section_id: &str,
        input: QuestionInput,
    ) -> Result<Assessment> {
        let mut assessment = self.load(id, "add question").await?;
        let section = assessment
            .section_mut(section_id)
            .ok_or_else(|| Error::not_found("Section", section_id))?;
        let order = section.questions.len();
        section.questions.push(build_question(input, order));
        self.save(assessment, "add question").await
    }

    pub async fn reorder_sections(&self, id: &str, payload: ReorderPayload) -> Result<Assessment> {
        let mut assessment = self.load(id, "reorder sections").await?;
        let sections = std::mem::take(&mut assessment.sections);
        assessment.sections = reorder(sections, payload.from, payload.to)?;
        self.save(assessment, "reorder sections").await
    }

    pub async fn reorder_questions(
        &self,
        id: &str,
        section_id: &str,
        payload: ReorderPayload,
    ) -> Result<Assessment> {
        let mut assessment = self.load(id, "reorder questions").await?;
        let section = assessment
            .section_mut(section_id)
            .ok_or_else(|| Error::not_found("Section", section_id))?;
        let questions = std::mem::take(&mut section.questions);
        section.questions = reorder(questions, payload.from, payload.to)?;
        self.save(assessment, "reorder questions").await
    }
}
