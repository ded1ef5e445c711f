use crate::errors::ApiError;

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_MESSAGE_LENGTH: usize = 1000;

pub const DEFAULT_MESSAGE_LIMIT: i64 = 20;
pub const MIN_MESSAGE_LIMIT: i64 = 1;
pub const MAX_MESSAGE_LIMIT: i64 = 100;

fn bounded_non_empty(raw: &str, field: &str, max_len: usize) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(ApiError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Trimmed chat title, non-empty and at most `MAX_TITLE_LENGTH` characters.
pub fn chat_title(raw: &str) -> Result<String, ApiError> {
    bounded_non_empty(raw, "title", MAX_TITLE_LENGTH)
}

/// Trimmed message text, non-empty and at most `MAX_MESSAGE_LENGTH` characters.
pub fn message_text(raw: &str) -> Result<String, ApiError> {
    bounded_non_empty(raw, "text", MAX_MESSAGE_LENGTH)
}

/// Message window for chat retrieval: defaults to 20, must be within 1..=100.
pub fn message_limit(requested: Option<i64>) -> Result<i64, ApiError> {
    let limit = requested.unwrap_or(DEFAULT_MESSAGE_LIMIT);
    if !(MIN_MESSAGE_LIMIT..=MAX_MESSAGE_LIMIT).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between {} and {}",
            MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(chat_title("  weekend plans  ").unwrap(), "weekend plans");
    }

    #[test]
    fn blank_title_rejected() {
        assert!(chat_title("").is_err());
        assert!(chat_title("   ").is_err());
        assert!(chat_title("\t\n").is_err());
    }

    #[test]
    fn title_length_boundary() {
        assert!(chat_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(chat_title(&"a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
        // Trailing whitespace does not count against the limit.
        assert!(chat_title(&format!("{}  ", "a".repeat(MAX_TITLE_LENGTH))).is_ok());
    }

    #[test]
    fn blank_text_rejected() {
        assert!(message_text(" \n ").is_err());
        assert!(message_text(&"b".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
        assert_eq!(message_text(" hi ").unwrap(), "hi");
    }

    #[test]
    fn limit_defaults_to_twenty() {
        assert_eq!(message_limit(None).unwrap(), 20);
    }

    #[test]
    fn limit_bounds() {
        assert_eq!(message_limit(Some(1)).unwrap(), 1);
        assert_eq!(message_limit(Some(100)).unwrap(), 100);
        assert!(message_limit(Some(0)).is_err());
        assert!(message_limit(Some(101)).is_err());
        assert!(message_limit(Some(-5)).is_err());
    }
}
