pub mod assessment_service;
pub mod candidate_service;
pub mod job_service;
pub mod network_service;
pub mod response_service;
pub mod runtime_service;

use crate::error::Error;

/// Not-found, conflict, bad-request and injected network errors pass through;
/// anything else becomes a generic `Failed to <operation>`.
pub(crate) fn storage_failure(operation: &str, err: Error) -> Error {
    match err {
        Error::NotFound(_) | Error::Conflict(_) | Error::BadRequest(_) | Error::Network(_) => err,
        other => {
            tracing::error!(error = ?other, "Failed to {}", operation);
            Error::Internal(format!("Failed to {}", operation))
        }
    }
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
