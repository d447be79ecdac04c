//! Required-field checks shared by every form-like draft.

use crate::{DomainError, DomainResult, RecordId};

/// Trimmed, non-empty text or a validation error naming the field.
pub fn require_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// A present, non-blank identifier reference.
pub fn require_id(field: &str, value: Option<&RecordId>) -> DomainResult<RecordId> {
    match value {
        Some(id) if !id.as_str().trim().is_empty() => Ok(id.clone()),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}
