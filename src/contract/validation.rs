//! Input validation for contract requests.
//!
//! Every mandatory-field failure is collected so a single response can name
//! all offending fields at once.

use std::fmt;

/// Validation error with a field reference and a user-facing message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create error for an empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} is required and cannot be empty"))
    }

    /// Create error for a missing required field
    pub fn missing_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} is required"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Formatted message naming every failed field.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let details: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        format!(
            "Validation failed ({} {}): {}",
            self.errors.len(),
            if self.errors.len() == 1 {
                "error"
            } else {
                "errors"
            },
            details.join("; ")
        )
    }

    /// Convert to Result - Ok if no errors, Err with the formatted message
    /// otherwise.
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate that an optional value is present
pub fn validate_present<T>(value: &Option<T>, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.is_none() {
        errors.add(ValidationError::missing_field(field, label));
    }
}
