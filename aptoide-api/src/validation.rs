//! # Input Validation
//!
//! Checks applied to the package identifier before any outbound request is
//! made. A rejected identifier never reaches the fetcher.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PACKAGE_NAME_LENGTH: usize = 3;
pub const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Letters, digits, dots, underscores and dashes only
static PACKAGE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+$")
        .expect("Package name regex should compile - this is a static pattern")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required query parameter: {0}")]
    Missing(&'static str),

    #[error("Input too short: {actual} is below minimum {min}")]
    TooShort { actual: usize, min: usize },

    #[error("Input too long: {actual} exceeds maximum {max}")]
    TooLong { actual: usize, max: usize },

    #[error("Invalid characters in input: {input}")]
    InvalidCharacters { input: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the `package_name` query parameter, returning it trimmed.
pub fn validate_package_name(raw: Option<&str>) -> ValidationResult<String> {
    let name = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::Missing("package_name"))?;

    let len = name.chars().count();
    if len < MIN_PACKAGE_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            actual: len,
            min: MIN_PACKAGE_NAME_LENGTH,
        });
    }
    if len > MAX_PACKAGE_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            actual: len,
            max: MAX_PACKAGE_NAME_LENGTH,
        });
    }
    if !PACKAGE_NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidCharacters {
            input: name.to_string(),
        });
    }

    Ok(name.to_string())
}
