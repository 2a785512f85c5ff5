//! # Error Types
//!
//! Domain-specific error types for starpops-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  starpops-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Record input validation failures               │
//! │  └── SchemeError      - Malformed split scheme configuration           │
//! │                                                                         │
//! │  starpops-store errors (separate crate)                                │
//! │  └── StoreError       - Row store / SQL failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → blocks the build, nothing is persisted        │
//! │        SchemeError     → rejects the configuration at load time        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bucket name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or configuration
/// failures. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Split scheme configuration error (wraps SchemeError).
    #[error("split scheme error: {0}")]
    Scheme(#[from] SchemeError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record input validation errors.
///
/// Raised by the record builders before any persistence attempt; a record
/// that fails validation is never constructed. Every variant carries the
/// offending field name.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must be strictly positive.
    #[error("{field} must be a positive number")]
    MustBePositive { field: String },

    /// Numeric value must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric field holds a NaN or infinity.
    #[error("{field} must be a finite number")]
    NotANumber { field: String },

    /// Invalid format (e.g. a date that is not YYYY-MM-DD).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g. unknown expense category).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Scheme Error
// =============================================================================

/// Malformed split scheme configuration.
///
/// A scheme that trips any of these is rejected outright; the calculator
/// never silently normalizes percentages.
#[derive(Debug, Error, PartialEq)]
pub enum SchemeError {
    /// A scheme must define at least one bucket.
    #[error("split scheme '{scheme}' has no buckets")]
    Empty { scheme: String },

    /// Bucket names within a scheme must be unique.
    #[error("split scheme '{scheme}' defines bucket '{bucket}' more than once")]
    DuplicateBucket { scheme: String, bucket: String },

    /// Percentages must sum to at most 100%.
    #[error("split scheme '{scheme}' allocates {percent}% which exceeds 100%")]
    OverAllocated { scheme: String, percent: f64 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "date".to_string(),
        };
        assert_eq!(err.to_string(), "date is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a positive number");
    }

    #[test]
    fn test_scheme_error_messages() {
        let err = SchemeError::OverAllocated {
            scheme: "payroll-v3".to_string(),
            percent: 105.0,
        };
        assert_eq!(
            err.to_string(),
            "split scheme 'payroll-v3' allocates 105% which exceeds 100%"
        );
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let scheme_err = SchemeError::Empty {
            scheme: "empty".to_string(),
        };
        let core_err: CoreError = scheme_err.into();
        assert!(matches!(core_err, CoreError::Scheme(_)));
    }
}
