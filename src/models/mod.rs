pub mod assessment;
pub mod assessment_response;
pub mod candidate;
pub mod job;
pub mod question;
