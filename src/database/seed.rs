use rand::seq::SliceRandom;
use rand::Rng;

use crate::database::store::Store;
use crate::error::Result;
use crate::models::{
    assessment::{Assessment, AssessmentSection},
    candidate::{Candidate, CandidateStage, TimelineEvent, TimelineEventType},
    job::{Job, JobStatus},
    question::{Question, QuestionType, ValidationRule},
};
use crate::utils::{slug::slugify, time::now, time::random_past};

pub const SEED_CANDIDATES: usize = 1000;
const SEED_ASSESSMENTS: usize = 3;

static JOB_TITLES: [&str; 25] = [
    "Senior Frontend Developer",
    "Backend Engineer",
    "Full Stack Developer",
    "DevOps Engineer",
    "Product Manager",
    "UX Designer",
    "Data Scientist",
    "Mobile Developer",
    "QA Engineer",
    "Technical Lead",
    "Software Architect",
    "Marketing Manager",
    "Sales Representative",
    "Customer Success Manager",
    "HR Specialist",
    "Financial Analyst",
    "Operations Manager",
    "Business Analyst",
    "Content Writer",
    "Graphic Designer",
    "Project Manager",
    "Security Engineer",
    "Machine Learning Engineer",
    "Cloud Engineer",
    "Database Administrator",
];

static JOB_TAGS: [&str; 9] = [
    "Remote",
    "Full-time",
    "Part-time",
    "Contract",
    "Senior",
    "Junior",
    "Mid-level",
    "Urgent",
    "New",
];

static FIRST_NAMES: [&str; 13] = [
    "Cristiano", "Leo", "Michael", "Gareth", "David", "Virat", "Roberto", "Novak", "James",
    "Maria", "Roger", "Steve", "Kylian",
];

static LAST_NAMES: [&str; 13] = [
    "Smith",
    "Ronaldo",
    "Messi",
    "Jordan",
    "Schumacher",
    "Bale",
    "Miller",
    "Kohli",
    "Rodriguez",
    "Sharapova",
    "Mbappe",
    "Federer",
    "Djokovic",
];

fn generate_jobs<R: Rng + ?Sized>(rng: &mut R) -> Vec<Job> {
    JOB_TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let lower = title.to_lowercase();
            let tag_count = rng.gen_range(1..=4);
            Job {
                id: format!("job-{}", index + 1),
                title: title.to_string(),
                slug: slugify(title),
                description: format!(
                    "We are looking for a talented {} to join our growing team. This is an excellent opportunity to work with cutting-edge technologies and make a significant impact on our products.",
                    title
                ),
                responsibilities: vec![
                    format!("Lead {} initiatives and projects", lower),
                    "Collaborate with cross-functional teams".to_string(),
                    "Mentor junior team members".to_string(),
                    "Contribute to technical architecture decisions".to_string(),
                    "Ensure code quality and best practices".to_string(),
                ],
                qualifications: vec![
                    format!("5+ years of experience in {} role", lower),
                    "Strong problem-solving skills".to_string(),
                    "Excellent communication abilities".to_string(),
                    "Bachelor's degree in relevant field".to_string(),
                    "Experience with modern development tools".to_string(),
                ],
                status: if rng.gen_bool(0.7) {
                    JobStatus::Active
                } else {
                    JobStatus::Archived
                },
                tags: JOB_TAGS[..tag_count].iter().map(|t| t.to_string()).collect(),
                order: index as i64,
                created_at: random_past(rng, 90),
                updated_at: now(),
            }
        })
        .collect()
}

fn generate_candidates<R: Rng + ?Sized>(rng: &mut R, jobs: &[Job]) -> Vec<Candidate> {
    (0..SEED_CANDIDATES)
        .filter_map(|i| {
            let first = FIRST_NAMES.choose(rng)?;
            let last = LAST_NAMES.choose(rng)?;
            let job = jobs.choose(rng)?;
            let stage = *CandidateStage::ALL.choose(rng)?;
            Some(Candidate {
                id: format!("candidate-{}", i + 1),
                name: format!("{} {}", first, last),
                email: format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase()),
                phone: Some(format!("+91-{}", rng.gen_range(1000..10000))),
                resume: None,
                current_stage: stage,
                job_id: job.id.clone(),
                notes: Vec::new(),
                assessment_scores: Vec::new(),
                timeline: vec![TimelineEvent {
                    id: format!("timeline-{}-1", i + 1),
                    event_type: TimelineEventType::StageChange,
                    description: "Application submitted".to_string(),
                    created_at: random_past(rng, 30),
                    metadata: None,
                }],
                created_at: random_past(rng, 60),
                updated_at: now(),
            })
        })
        .collect()
}

fn generate_assessments<R: Rng + ?Sized>(
    rng: &mut R,
    jobs: &[Job],
    share_base_url: &str,
) -> Vec<Assessment> {
    jobs.iter()
        .take(SEED_ASSESSMENTS)
        .enumerate()
        .map(|(index, job)| {
            let n = index + 1;
            let technical = (1..=5)
                .map(|k| Question {
                    id: format!("question-{}-1-{}", n, k),
                    question_type: QuestionType::SingleChoice,
                    title: format!("Technical question {}", k),
                    description: Some("Select the best answer".to_string()),
                    required: true,
                    options: Some(
                        ["Option A", "Option B", "Option C", "Option D"]
                            .iter()
                            .map(|o| o.to_string())
                            .collect(),
                    ),
                    validation: None,
                    conditional_logic: None,
                    order: (k - 1) as i64,
                })
                .collect();
            let experience = (1..=3)
                .map(|k| Question {
                    id: format!("question-{}-2-{}", n, k),
                    question_type: QuestionType::LongText,
                    title: format!("Experience question {}", k),
                    description: Some("Please provide detailed answer".to_string()),
                    required: true,
                    options: None,
                    validation: Some(ValidationRule {
                        min_length: Some(50),
                        max_length: Some(500),
                        ..Default::default()
                    }),
                    conditional_logic: None,
                    order: (k - 1) as i64,
                })
                .collect();

            Assessment {
                id: format!("assessment-{}", n),
                title: format!("{} Assessment", job.title),
                job_id: job.id.clone(),
                sections: vec![
                    AssessmentSection {
                        id: format!("section-{}-1", n),
                        title: "Technical Skills".to_string(),
                        description: Some("Evaluate technical competencies".to_string()),
                        order: 0,
                        questions: technical,
                    },
                    AssessmentSection {
                        id: format!("section-{}-2", n),
                        title: "Experience & Background".to_string(),
                        description: Some("Tell us about your experience".to_string()),
                        order: 1,
                        questions: experience,
                    },
                ],
                is_published: true,
                shareable_link: Some(format!(
                    "{}/{}",
                    share_base_url.trim_end_matches('/'),
                    n
                )),
                created_at: random_past(rng, 30),
                updated_at: now(),
            }
        })
        .collect()
}

/// Fills an empty store with demo data. Returns `false` when jobs already exist.
pub async fn seed_if_empty(store: &dyn Store, share_base_url: &str) -> Result<bool> {
    if store.jobs().count().await? > 0 {
        tracing::debug!("Store already populated, skipping seed");
        return Ok(false);
    }

    // ThreadRng is not Send, so generate everything before the first await.
    let (jobs, candidates, assessments) = {
        let mut rng = rand::thread_rng();
        let jobs = generate_jobs(&mut rng);
        let candidates = generate_candidates(&mut rng, &jobs);
        let assessments = generate_assessments(&mut rng, &jobs, share_base_url);
        (jobs, candidates, assessments)
    };

    let (job_count, candidate_count, assessment_count) =
        (jobs.len(), candidates.len(), assessments.len());
    store.jobs().bulk_put(jobs).await?;
    store.candidates().bulk_put(candidates).await?;
    store.assessments().bulk_put(assessments).await?;

    tracing::info!(
        jobs = job_count,
        candidates = candidate_count,
        assessments = assessment_count,
        "Seeded demo data"
    );
    Ok(true)
}
