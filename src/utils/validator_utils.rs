use std::borrow::Cow;

use validator::ValidationError;

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

/// Page slugs become URL segments: lowercase ascii letters, digits and dashes.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let ok = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_slug");
        error.message = Some(Cow::from("Slug may only contain lowercase letters, digits and dashes"));
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(validate_required("  ").is_err());
        assert!(validate_required("Hello").is_ok());
    }

    #[test]
    fn slugs_accept_only_url_safe_characters() {
        assert!(validate_slug("my-first-post-2").is_ok());
        assert!(validate_slug("My Post").is_err());
        assert!(validate_slug("").is_err());
    }
}
