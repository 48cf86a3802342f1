use uuid::Uuid;

/// Prefixed document id, e.g. `job-6f1c...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
