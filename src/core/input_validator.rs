//! Input Validator Module
//!
//! Validation applied to every user-supplied field before a write. Names and
//! free text are trimmed, amounts must be finite and non-negative, and
//! currency abbreviations are short alphanumeric codes.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains null bytes")]
    NullByte { field: &'static str },

    #[error("{field} has invalid characters: {value}")]
    InvalidCharacters { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("Icon URL must be an http(s) URL or an absolute path: {0}")]
    InvalidUrl(String),

    #[error("Currency '{0}' is not defined in this campaign")]
    UnknownCurrency(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

// ============================================================================
// Input Validator
// ============================================================================

/// Field validation with configurable limits
#[derive(Debug, Clone)]
pub struct InputValidator {
    max_name_length: usize,
    max_text_length: usize,
    max_abbreviation_length: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_name_length: 120,
            max_text_length: 10_000,
            max_abbreviation_length: 8,
        }
    }

    /// Required single-line name, returned trimmed.
    pub fn name(&self, field: &'static str, value: &str) -> Result<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        self.check_text(field, trimmed, self.max_name_length)?;
        Ok(trimmed.to_string())
    }

    /// Optional free text; blank input becomes `None`.
    pub fn optional_text(&self, field: &'static str, value: Option<&str>) -> Result<Option<String>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => {
                self.check_text(field, text, self.max_text_length)?;
                Ok(Some(text.to_string()))
            }
        }
    }

    /// Money amount: finite and not negative.
    pub fn amount(&self, field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field });
        }
        Ok(value)
    }

    /// Optional non-negative integer (stock counts, hit points, armor class).
    pub fn count(&self, field: &'static str, value: Option<i64>) -> Result<Option<i64>> {
        match value {
            Some(n) if n < 0 => Err(ValidationError::Negative { field }),
            other => Ok(other),
        }
    }

    /// Currency abbreviation such as `GP` or `SP`.
    pub fn abbreviation(&self, field: &'static str, value: &str) -> Result<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if trimmed.chars().count() > self.max_abbreviation_length {
            return Err(ValidationError::TooLong {
                field,
                max: self.max_abbreviation_length,
            });
        }
        if !trimmed.chars().all(char::is_alphanumeric) {
            return Err(ValidationError::InvalidCharacters {
                field,
                value: trimmed.to_string(),
            });
        }
        Ok(trimmed.to_string())
    }

    /// Optional icon location; only web URLs and absolute paths are stored.
    pub fn icon_url(&self, value: Option<&str>) -> Result<Option<String>> {
        let Some(url) = self.optional_text("iconUrl", value)? else {
            return Ok(None);
        };
        let allowed = url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/');
        if !allowed || url.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidUrl(url));
        }
        Ok(Some(url))
    }

    fn check_text(&self, field: &'static str, text: &str, max: usize) -> Result<()> {
        if text.contains('\0') {
            return Err(ValidationError::NullByte { field });
        }
        if text.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
        Ok(())
    }
}
