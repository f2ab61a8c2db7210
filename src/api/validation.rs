use super::ApiError;

/// Trims a form field and rejects it when nothing is left.
pub fn require_field(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_field`] but keeps surrounding whitespace, for passwords and post bodies.
pub fn require_raw_field(field: &str, value: &str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("Username", " alice ").unwrap(), "alice");
        assert!(require_field("Username", "").is_err());
        assert!(require_field("Username", "   ").is_err());
    }

    #[test]
    fn test_require_raw_field() {
        assert_eq!(require_raw_field("Password", " p ").unwrap(), " p ");
        assert!(require_raw_field("Password", "\t").is_err());
    }

    #[test]
    fn error_names_the_field() {
        let err = require_field("Title", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }
}
