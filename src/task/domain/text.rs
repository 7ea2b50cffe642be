//! Length checks for free-text task fields.

use super::TaskDomainError;

/// Trims `value` and checks it is non-blank and at most `max` characters.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyField`] or
/// [`TaskDomainError::FieldTooLong`].
pub fn required(field: &'static str, value: &str, max: usize) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyField(field));
    }
    optional(field, trimmed, max)
}

/// Trims `value` and checks it is at most `max` characters. Blank is fine.
///
/// # Errors
///
/// Returns [`TaskDomainError::FieldTooLong`].
pub fn optional(field: &'static str, value: &str, max: usize) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(TaskDomainError::FieldTooLong { field, max, actual });
    }
    Ok(trimmed.to_owned())
}
