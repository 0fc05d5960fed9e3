//! Field checks run before a row is written, mirroring the column constraints.

use crate::error::{AppError, Result};

pub(crate) fn required(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{entity}.{field} is required")));
    }
    Ok(())
}

pub(crate) fn max_len(entity: &str, field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{entity}.{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
