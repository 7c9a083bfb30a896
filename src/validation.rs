//! Form payload validation.
//!
//! Create/update models implement [`Validatable`]; handlers run validation
//! before anything is sent to the persistence layer, so an invalid form never
//! reaches the database.

use serde::Serialize;
use std::fmt;

/// Validation failure for a single form field.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors reported together.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Run a single validator and collect its error, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.push(error);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by create/update payloads.
pub trait Validatable {
    /// # Errors
    ///
    /// Returns every failed rule; the request is rejected before persistence
    /// when any rule fails.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Validators for the common field rules.
pub mod validators {
    use super::ValidationError;

    /// # Errors
    ///
    /// Fails when the value is empty or whitespace only.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when the string length falls outside the given bounds.
    pub fn validate_length(
        field: &str,
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if let Some(min_len) = min
            && len < min_len
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at least {min_len} characters"),
            ));
        }
        if let Some(max_len) = max
            && len > max_len
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at most {max_len} characters"),
            ));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when the value falls outside the given bounds.
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        field: &str,
        value: T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<(), ValidationError> {
        if let Some(min_val) = min
            && value < min_val
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at least {min_val}"),
            ));
        }
        if let Some(max_val) = max
            && value > max_val
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at most {max_val}"),
            ));
        }
        Ok(())
    }

    /// Fee and tariff amounts are stored in the smallest currency unit.
    ///
    /// # Errors
    ///
    /// Fails on negative amounts.
    pub fn validate_non_negative(field: &str, value: i64) -> Result<(), ValidationError> {
        if value < 0 {
            return Err(ValidationError::new(field, "Must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::{
        validate_length, validate_non_negative, validate_range, validate_required,
    };
    use super::*;

    #[test]
    fn collects_multiple_errors() {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required("name", ""));
        errors.check(validate_required("unit", "IGD"));
        errors.check(validate_non_negative("tariff", -1));
        assert_eq!(errors.len(), 2);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn required_rejects_whitespace() {
        assert!(validate_required("name", "   ").is_err());
        assert!(validate_required("name", "Cuti Tahunan").is_ok());
    }

    #[test]
    fn length_bounds() {
        assert!(validate_length("name", "ab", Some(3), None).is_err());
        assert!(validate_length("name", "abcdef", None, Some(5)).is_err());
        assert!(validate_length("name", "abcd", Some(3), Some(5)).is_ok());
    }

    #[test]
    fn range_bounds() {
        assert!(validate_range("allocation_days", 0, Some(1), Some(365)).is_err());
        assert!(validate_range("allocation_days", 12, Some(1), Some(365)).is_ok());
    }

    #[test]
    fn non_negative_amounts() {
        assert!(validate_non_negative("tariff", -50).is_err());
        assert!(validate_non_negative("tariff", 0).is_ok());
        assert!(validate_non_negative("tariff", 150_000).is_ok());
    }
}
