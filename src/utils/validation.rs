use validator::Validate;

use crate::error::{Error, Result};
use crate::utils::slug::slugify;

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate().map_err(Error::from)
}

/// Job titles must yield a slug of at least three characters.
pub fn validate_job_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::BadRequest("Title is required".to_string()));
    }
    if slugify(title).chars().count() < 3 {
        return Err(Error::BadRequest(
            "Title must be at least 3 characters".to_string(),
        ));
    }
    Ok(())
}
