pub mod assessments;
pub mod candidates;
pub mod health;
pub mod jobs;
pub mod responses;
