use regex::Regex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{
    assessment::{Assessment, AssessmentSection},
    assessment_response::{AssessmentResponse, Answers},
    question::{Condition, Question},
};
use crate::utils::{ids::new_id, time::now};

pub const REQUIRED_MESSAGE: &str = "This question is required";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Loose truthiness of an answer value: null, false, 0, NaN and "" are falsy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Absent, falsy, or an empty selection list.
pub fn is_empty_answer(value: Option<&JsonValue>) -> bool {
    match value {
        None => true,
        Some(JsonValue::Array(items)) => items.is_empty(),
        Some(v) => !is_truthy(v),
    }
}

/// Text form of an answer used for substring matching.
fn answer_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n
            .as_f64()
            .map(|f| f.to_string())
            .unwrap_or_else(|| n.to_string()),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::Null => String::new(),
                other => answer_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => "[object Object]".to_string(),
    }
}

fn full_match(pattern: &str, text: &str) -> bool {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(re) => re.is_match(text),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "Uncompilable validation pattern");
            false
        }
    }
}

/// Per-section view of a set of answers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEvaluation {
    pub section_id: String,
    pub visible_question_ids: Vec<String>,
    /// Validation message per visible question that has one.
    pub errors: BTreeMap<String, String>,
    pub can_advance: bool,
    pub progress: f64,
}

/// Conditional visibility, answer validation, and completion scoring.
pub struct RuntimeService;

impl RuntimeService {
    /// The dependency's own visibility is not consulted, only its raw answer.
    pub fn is_visible(question: &Question, answers: &Answers) -> bool {
        let Some(rule) = &question.conditional_logic else {
            return true;
        };

        let dependent = match answers.get(&rule.depends_on) {
            Some(value) if is_truthy(value) => value,
            _ => return false,
        };

        match rule.condition {
            Condition::Equals => dependent.as_str() == Some(rule.value.as_str()),
            Condition::NotEquals => dependent.as_str() != Some(rule.value.as_str()),
            Condition::Contains => answer_text(dependent)
                .to_lowercase()
                .contains(&rule.value.to_lowercase()),
            Condition::Unknown => true,
        }
    }

    /// First violated rule, checked as required, minLength, maxLength, pattern, min, max.
    pub fn validate(question: &Question, answer: Option<&JsonValue>) -> Option<String> {
        if question.required && is_empty_answer(answer) {
            return Some(REQUIRED_MESSAGE.to_string());
        }

        let rule = question.validation.as_ref()?;
        let answer = answer.filter(|a| is_truthy(a))?;

        match answer {
            JsonValue::String(text) => {
                let length = text.chars().count();
                if let Some(min_length) = rule.min_length.filter(|n| *n > 0) {
                    if length < min_length {
                        return Some(format!("Minimum length is {} characters", min_length));
                    }
                }
                if let Some(max_length) = rule.max_length.filter(|n| *n > 0) {
                    if length > max_length {
                        return Some(format!("Maximum length is {} characters", max_length));
                    }
                }
                if let Some(pattern) = rule.pattern.as_deref().filter(|p| !p.is_empty()) {
                    if !full_match(pattern, text) {
                        return Some(INVALID_FORMAT_MESSAGE.to_string());
                    }
                }
            }
            JsonValue::Number(number) => {
                let value = number.as_f64()?;
                if let Some(min) = rule.min {
                    if value < min {
                        return Some(format!("Minimum value is {}", min));
                    }
                }
                if let Some(max) = rule.max {
                    if value > max {
                        return Some(format!("Maximum value is {}", max));
                    }
                }
            }
            _ => {}
        }

        None
    }

    pub fn visible_questions<'a>(
        section: &'a AssessmentSection,
        answers: &Answers,
    ) -> Vec<&'a Question> {
        section
            .questions
            .iter()
            .filter(|q| Self::is_visible(q, answers))
            .collect()
    }

    /// Presence check only: a present but malformed answer still lets the user advance.
    pub fn can_advance(section: &AssessmentSection, answers: &Answers) -> bool {
        Self::visible_questions(section, answers)
            .into_iter()
            .filter(|q| q.required)
            .all(|q| !is_empty_answer(answers.get(&q.id)))
    }

    /// Answered keys over every question of every section, as a percentage.
    pub fn progress(assessment: &Assessment, answers: &Answers) -> f64 {
        let total = assessment.question_count();
        if total == 0 {
            return 0.0;
        }
        answers.len() as f64 / total as f64 * 100.0
    }

    pub fn score(assessment: &Assessment, answers: &Answers) -> u32 {
        Self::progress(assessment, answers).round() as u32
    }

    pub fn evaluate(
        assessment: &Assessment,
        section_index: usize,
        answers: &Answers,
    ) -> Result<SectionEvaluation> {
        let section = assessment.sections.get(section_index).ok_or_else(|| {
            Error::BadRequest(format!(
                "Section index {} is out of range for {} sections",
                section_index,
                assessment.sections.len()
            ))
        })?;

        let visible = Self::visible_questions(section, answers);
        let errors = visible
            .iter()
            .filter_map(|q| Self::validate(q, answers.get(&q.id)).map(|msg| (q.id.clone(), msg)))
            .collect();

        Ok(SectionEvaluation {
            section_id: section.id.clone(),
            visible_question_ids: visible.iter().map(|q| q.id.clone()).collect(),
            errors,
            can_advance: Self::can_advance(section, answers),
            progress: Self::progress(assessment, answers),
        })
    }
}

/// A candidate working through an assessment one section at a time.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    assessment: Assessment,
    current_section: usize,
    answers: Answers,
}

impl AssessmentSession {
    pub fn new(assessment: Assessment) -> Self {
        Self {
            assessment,
            current_section: 0,
            answers: Answers::new(),
        }
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    pub fn section(&self) -> Option<&AssessmentSection> {
        self.assessment.sections.get(self.current_section)
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn set_answer(&mut self, question_id: impl Into<String>, value: JsonValue) {
        self.answers.insert(question_id.into(), value);
    }

    pub fn visible_questions(&self) -> Vec<&Question> {
        self.section()
            .map(|s| RuntimeService::visible_questions(s, &self.answers))
            .unwrap_or_default()
    }

    pub fn can_advance(&self) -> bool {
        self.section()
            .map(|s| RuntimeService::can_advance(s, &self.answers))
            .unwrap_or(false)
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section + 1 >= self.assessment.sections.len()
    }

    /// Moves forward when the gate allows it; returns whether the section changed.
    pub fn next(&mut self) -> bool {
        if self.is_last_section() || !self.can_advance() {
            return false;
        }
        self.current_section += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current_section == 0 {
            return false;
        }
        self.current_section -= 1;
        true
    }

    pub fn progress(&self) -> f64 {
        RuntimeService::progress(&self.assessment, &self.answers)
    }

    /// Closes the session into a scored response. Only the last section can submit.
    pub fn submit(self, candidate_id: impl Into<String>) -> Result<AssessmentResponse> {
        if !self.is_last_section() {
            return Err(Error::BadRequest(
                "Assessment can only be submitted from the last section".to_string(),
            ));
        }
        if !self.can_advance() {
            return Err(Error::BadRequest(
                "Required questions are unanswered".to_string(),
            ));
        }

        let score = RuntimeService::score(&self.assessment, &self.answers);
        Ok(AssessmentResponse {
            id: new_id("response"),
            assessment_id: self.assessment.id,
            candidate_id: candidate_id.into(),
            responses: self.answers,
            completed_at: Some(now()),
            score: Some(score),
        })
    }
}
