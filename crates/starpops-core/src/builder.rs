//! # Record Builder
//!
//! Transforms raw user-submitted fields into persisted-ready records.
//!
//! ## Build Flow (Sale)
//! ```text
//! RawSaleInput (strings & numbers from a form)
//!      │
//!      ▼
//! validate date / product / quantity / price ── ValidationError? ──► reject
//!      │
//!      ▼
//! total = round2(quantity * price)
//!      │
//!      ▼
//! split = active scheme partition of total
//!      │
//!      ▼
//! Sale { id: uuid-v4, event: "Normal" default, scheme tag, split[] }
//! ```
//!
//! Builders have no side effects: persistence is the store's job, and a
//! record that fails validation is never constructed.

use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::scheme::SplitScheme;
use crate::types::{
    Customer, Expense, ExpenseCategory, Loss, LossReason, Sale, Withdrawal, WithdrawalKind,
};
use crate::validation::{
    validate_amount, validate_date, validate_loss_quantity, validate_quantity,
    validate_required_text, validate_unit_price,
};

/// Default event label for ordinary day sales.
pub const NORMAL_EVENT: &str = "Normal";

// =============================================================================
// Raw Inputs
// =============================================================================

/// Raw sale submission, as it arrives from a form or API call.
#[derive(Debug, Clone, Default)]
pub struct RawSaleInput {
    pub date: String,
    pub employee: String,
    pub product: String,
    pub quantity: f64,
    pub price: f64,
    /// `None` or empty defaults to [`NORMAL_EVENT`].
    pub event: Option<String>,
}

/// Raw expense submission.
#[derive(Debug, Clone, Default)]
pub struct RawExpenseInput {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// Raw withdrawal/repayment submission.
#[derive(Debug, Clone, Default)]
pub struct RawWithdrawalInput {
    pub date: String,
    pub purpose: String,
    pub amount: f64,
    pub kind: String,
}

/// Raw inventory-loss submission.
#[derive(Debug, Clone, Default)]
pub struct RawLossInput {
    pub date: String,
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub reason: String,
}

/// Raw customer submission. Everything but the name is optional.
#[derive(Debug, Clone, Default)]
pub struct RawCustomerInput {
    pub name: String,
    pub contact: String,
    pub location: String,
    pub description: String,
}

// =============================================================================
// Builders
// =============================================================================

/// Builds a persisted-ready [`Sale`] under the given split scheme.
///
/// Validates the input, computes `total = round2(quantity * price)`,
/// partitions it with the scheme, tags the record with the scheme's name,
/// and assigns a fresh id.
///
/// ## Errors
/// [`ValidationError`] naming the offending field; nothing is built.
pub fn build_sale(input: RawSaleInput, scheme: &SplitScheme) -> ValidationResult<Sale> {
    let date = validate_date(&input.date)?;
    let employee = validate_required_text("employee", &input.employee)?;
    let product = validate_required_text("product", &input.product)?;
    let quantity = validate_quantity(input.quantity)?;
    let price = Money::from_f64(validate_unit_price(input.price)?);

    let total = price.scale(quantity);
    let split = scheme.split(total);

    let event = match input.event {
        Some(ref name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => NORMAL_EVENT.to_string(),
    };

    Ok(Sale {
        id: generate_id(),
        date,
        employee,
        product,
        quantity,
        price,
        total,
        event,
        scheme: scheme.name().to_string(),
        split,
    })
}

/// Builds a persisted-ready [`Expense`].
pub fn build_expense(input: RawExpenseInput) -> ValidationResult<Expense> {
    let date = validate_date(&input.date)?;
    let category = parse_category(&input.category)?;
    let amount = Money::from_f64(validate_amount("amount", input.amount)?);

    Ok(Expense {
        id: generate_id(),
        date,
        category,
        // Description is optional free text; keep whatever was typed
        description: input.description.trim().to_string(),
        amount,
    })
}

/// Builds a persisted-ready [`Withdrawal`].
pub fn build_withdrawal(input: RawWithdrawalInput) -> ValidationResult<Withdrawal> {
    let date = validate_date(&input.date)?;
    let purpose = validate_required_text("purpose", &input.purpose)?;
    let amount = Money::from_f64(validate_amount("amount", input.amount)?);
    let kind = WithdrawalKind::from_name(input.kind.trim()).ok_or_else(|| {
        ValidationError::NotAllowed {
            field: "type".to_string(),
            allowed: WithdrawalKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
        }
    })?;

    Ok(Withdrawal {
        id: generate_id(),
        date,
        purpose,
        amount,
        kind,
    })
}

/// Builds a persisted-ready [`Loss`].
///
/// `potential_value = quantity * price`, exact integer arithmetic.
pub fn build_loss(input: RawLossInput) -> ValidationResult<Loss> {
    let date = validate_date(&input.date)?;
    let product = validate_required_text("product", &input.product)?;
    let quantity = validate_loss_quantity(input.quantity)?;
    let price = Money::from_f64(validate_unit_price(input.price)?);
    let reason = LossReason::from_name(input.reason.trim()).ok_or_else(|| {
        ValidationError::NotAllowed {
            field: "reason".to_string(),
            allowed: LossReason::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        }
    })?;

    Ok(Loss {
        id: generate_id(),
        date,
        product,
        quantity,
        price,
        reason,
        potential_value: price * quantity as i64,
    })
}

/// Builds a persisted-ready [`Customer`].
pub fn build_customer(input: RawCustomerInput) -> ValidationResult<Customer> {
    let name = validate_required_text("name", &input.name)?;

    Ok(Customer {
        name,
        contact: input.contact.trim().to_string(),
        location: input.location.trim().to_string(),
        description: input.description.trim().to_string(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_category(raw: &str) -> ValidationResult<ExpenseCategory> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }
    ExpenseCategory::from_name(raw).ok_or_else(|| ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: ExpenseCategory::ALL.iter().map(|c| c.as_str().to_string()).collect(),
    })
}

/// Generates a fresh record id.
///
/// UUID v4: globally unique without coordination, so two devices appending
/// to the same sheet cannot collide.
fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
