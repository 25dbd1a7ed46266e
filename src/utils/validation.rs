use crate::error::{AppError, AppResult};

pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::ValidationError(format!("{field} is required")))
}

/// Required string field; surrounding whitespace is dropped and blank counts as missing.
pub fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    let text = required(value, field)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Blank optional strings are stored as NULL.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(
            required_text(Some("  Building Fund ".into()), "name").unwrap(),
            "Building Fund"
        );
        assert!(required_text(Some("   ".into()), "name").is_err());
        let err = required_text(None, "name").unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_optional_text_drops_blank() {
        assert_eq!(optional_text(Some(" ".into())), None);
        assert_eq!(optional_text(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_text(None), None);
    }
}
