//! Listing payload validation
//!
//! Validates shop-submitted bag listings before they are sent to the
//! backend: field presence, text bounds, collection-window formats, and
//! quantity constraints.
//!
//! # Example
//!
//! ```rust,ignore
//! use surplus_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("title", &listing.title)
//!     .calendar_date("collectionDate", &listing.collection_date)
//!     .time_of_day("collectionEnd", &listing.collection_end)
//!     .quantity_within_total("remainingQuantity", listing.remaining, listing.total)
//!     .validate();
//! ```

use crate::error::{Error, ErrorCode, Result};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Calendar date shape: YYYY-MM-DD
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Time-of-day shape: HH:MM with optional :SS
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").unwrap());

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder for listing payloads
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate minimum length
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        if value.len() < min {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at least {} characters", min),
                code: "MIN_LENGTH".to_string(),
                expected: Some(format!(">= {min}")),
                actual: Some(value.len().to_string()),
            });
        }
        self
    }

    /// Validate maximum length
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {} characters", max),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {max}")),
                actual: Some(value.len().to_string()),
            });
        }
        self
    }

    /// Validate a calendar date in YYYY-MM-DD form
    ///
    /// Checks both the shape and that the value is a real date
    /// (2025-02-30 fails).
    pub fn calendar_date(mut self, field: &str, value: &str) -> Self {
        let well_formed =
            DATE_RE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
        if !well_formed {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Not a valid calendar date".to_string(),
                code: "CALENDAR_DATE".to_string(),
                expected: Some("YYYY-MM-DD".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate a time of day in HH:MM (or HH:MM:SS) form
    pub fn time_of_day(mut self, field: &str, value: &str) -> Self {
        let well_formed = TIME_RE.is_match(value)
            && (NaiveTime::parse_from_str(value, "%H:%M").is_ok()
                || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok());
        if !well_formed {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Not a valid time of day".to_string(),
                code: "TIME_OF_DAY".to_string(),
                expected: Some("HH:MM".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a remaining quantity does not exceed its total
    pub fn quantity_within_total(mut self, field: &str, remaining: u32, total: u32) -> Self {
        if remaining > total {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Remaining quantity {remaining} exceeds total {total}"),
                code: "QUANTITY_EXCEEDED".to_string(),
                expected: Some(format!("<= {total}")),
                actual: Some(remaining.to_string()),
            });
        }
        self
    }

    /// Validate that a numeric field is not negative
    pub fn non_negative(mut self, field: &str, value: f64) -> Self {
        if value < 0.0 || !value.is_finite() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must be a non-negative number".to_string(),
                code: "NON_NEGATIVE".to_string(),
                expected: Some(">= 0".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Finish and return the accumulated result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
