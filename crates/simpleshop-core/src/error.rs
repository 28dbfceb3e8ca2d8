//! # Error Types
//!
//! Validation error types for simpleshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  simpleshop-core errors (this file)                                    │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  simpleshop-db errors (separate crate)                                 │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  simpleshop-services errors (separate crate)                           │
//! │  └── ServiceError     - NotFound / Validation / Store                  │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → Frontend                       │
//! │        DbError         → ServiceError → Frontend                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bounds)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// The entity services do not validate — form screens call these rules
/// before submitting, so a service only ever sees well-formed input from
/// the shipped frontend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A sale's stated total disagrees with the sum of its line totals.
    #[error("total mismatch: stated {stated} cents, lines sum to {computed} cents")]
    TotalMismatch { stated: i64, computed: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "notes".to_string(),
            max: 2000,
        };
        assert_eq!(err.to_string(), "notes must be at most 2000 characters");

        let err = ValidationError::TotalMismatch {
            stated: 2000,
            computed: 1999,
        };
        assert_eq!(
            err.to_string(),
            "total mismatch: stated 2000 cents, lines sum to 1999 cents"
        );
    }
}
