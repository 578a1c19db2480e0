//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! chosen as reasonable UX bounds for storefront fields; the in-memory store
//! enforces nothing by itself.

use shared::error::AppError;
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: catalog items, customer names, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Item descriptions, quote comments
pub const MAX_TEXT_LEN: usize = 2000;

/// Short identifiers: phone, postal code, country, tags
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Address lines
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Syntactic email check (RFC-flavored, via the validator crate)
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && email.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("Algebra I", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_validate_optional_text() {
        assert!(validate_optional_text(&None, "comments", MAX_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".to_string()), "comments", MAX_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("x".repeat(MAX_TEXT_LEN + 1)), "comments", MAX_TEXT_LEN)
                .is_err()
        );
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("thandi@example.co.za"));
        assert!(is_valid_email("a+b@test.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld@twice"));
        assert!(!is_valid_email(""));
    }
}
