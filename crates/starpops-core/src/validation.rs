//! # Validation Module
//!
//! Field-level validation for user-submitted record input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form / API client                                            │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (inside the record builders)                     │
//! │  ├── Runs before any persistence attempt                               │
//! │  └── A record that fails here is never constructed                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Row store (append-only, no constraints of its own)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use starpops_core::validation::{validate_date, validate_quantity};
//!
//! validate_date("2026-03-14").unwrap();
//! validate_quantity(2.5).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};

/// Wire format for record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Date Validator
// =============================================================================

/// Validates and parses a record date.
///
/// ## Rules
/// - Must not be empty
/// - Must be a real calendar date in `YYYY-MM-DD` form
///
/// ## Returns
/// The parsed date, ready to store on the record.
pub fn validate_date(date: &str) -> ValidationResult<NaiveDate> {
    let date = date.trim();

    if date.is_empty() {
        return Err(ValidationError::Required {
            field: "date".to_string(),
        });
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field (product name, employee, purpose).
///
/// ## Returns
/// The trimmed value.
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be a finite number
/// - Must be strictly positive (fractional values allowed)
pub fn validate_quantity(qty: f64) -> ValidationResult<f64> {
    if !qty.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "quantity".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(qty)
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative; zero is allowed (free samples at events)
pub fn validate_unit_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Validates a monetary amount that must be strictly positive
/// (expense amounts, withdrawal amounts).
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<f64> {
    if !amount.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }

    if amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Validates a loss quantity.
///
/// ## Rules
/// - Must be a strictly positive whole number
pub fn validate_loss_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "value too large".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2026-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
        assert_eq!(
            validate_date(" 2026-03-14 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );

        assert!(matches!(
            validate_date("").unwrap_err(),
            ValidationError::Required { .. }
        ));
        assert!(matches!(
            validate_date("14/03/2026").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(validate_date("2026-02-30").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert_eq!(
            validate_required_text("product", " Classic Popcorn ").unwrap(),
            "Classic Popcorn"
        );
        assert_eq!(
            validate_required_text("product", "   ").unwrap_err(),
            ValidationError::Required {
                field: "product".to_string()
            }
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(2.5).unwrap(), 2.5);
        assert_eq!(validate_quantity(1.0).unwrap(), 1.0);

        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-1.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(validate_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_unit_price_allows_zero() {
        assert_eq!(validate_unit_price(0.0).unwrap(), 0.0);
        assert_eq!(validate_unit_price(5.5).unwrap(), 5.5);

        assert!(matches!(
            validate_unit_price(-0.01).unwrap_err(),
            ValidationError::MustNotBeNegative { .. }
        ));
        assert!(validate_unit_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("amount", 30.0).unwrap(), 30.0);

        assert!(matches!(
            validate_amount("amount", 0.0).unwrap_err(),
            ValidationError::MustBePositive { .. }
        ));
        assert!(validate_amount("amount", -5.0).is_err());
    }

    #[test]
    fn test_validate_loss_quantity() {
        assert_eq!(validate_loss_quantity(5).unwrap(), 5);
        assert!(validate_loss_quantity(0).is_err());
        assert!(validate_loss_quantity(-3).is_err());
        assert!(validate_loss_quantity(i64::MAX).is_err());
    }
}
