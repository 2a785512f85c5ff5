//! # Domain Types
//!
//! Core record and rollup types for Star Pops Books.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Persisted (immutable once written, owned by the row store):           │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │    Sale      │ │   Expense    │ │  Withdrawal  │ │     Loss     │   │
//! │  │  ──────────  │ │  ──────────  │ │  ──────────  │ │  ──────────  │   │
//! │  │  total       │ │  category    │ │  kind        │ │  reason      │   │
//! │  │  split[]     │ │  amount      │ │  amount      │ │  potential   │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Derived (recomputed on every read, never stored):                     │
//! │  FinancialSummary, EmployeeShare, EmployeeMonthlyShare,                │
//! │  InvestorMonthlyShare                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON field names are camelCase to match the surrounding API layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::scheme::BucketAmount;

// =============================================================================
// Sale
// =============================================================================

/// A single revenue transaction.
///
/// ## Invariants
/// - `total == round2(quantity * price)` (enforced by the builder)
/// - `split` holds the literal bucket amounts computed at build time under
///   `scheme`; aggregation reads these stored values and NEVER re-derives
///   them from `total`, so a later policy change cannot rewrite history
/// - Immutable once persisted: no update or delete operation exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Opaque unique identifier, assigned at build time.
    pub id: String,
    /// Calendar date of the sale (wire form `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Staff member credited with the sale.
    pub employee: String,
    /// Product sold (free text, e.g. "Classic Popcorn").
    pub product: String,
    /// Units sold; may be fractional.
    pub quantity: f64,
    /// Unit price.
    pub price: Money,
    /// Derived: `round2(quantity * price)`.
    pub total: Money,
    /// "Normal" for day sales, or the name of a special event.
    pub event: String,
    /// Name of the split scheme in force when this sale was recorded.
    pub scheme: String,
    /// Ordered bucket allocations computed from `total` at build time.
    pub split: Vec<BucketAmount>,
}

impl Sale {
    /// Stored amount for a named bucket; zero if this sale's scheme did not
    /// define it.
    pub fn bucket(&self, name: &str) -> Money {
        self.split
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.amount)
            .unwrap_or_default()
    }

    /// Sum of the stored amounts for any of the given bucket names.
    pub fn buckets_total(&self, names: &[String]) -> Money {
        self.split
            .iter()
            .filter(|b| names.iter().any(|n| *n == b.name))
            .map(|b| b.amount)
            .sum()
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Cost categories for expense entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Maize,
    Sugar,
    Oil,
    Milk,
    Flavour,
    Butter,
    Cups,
    Tissue,
    Packaging,
    Transport,
    Utilities,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [ExpenseCategory; 12] = [
        ExpenseCategory::Maize,
        ExpenseCategory::Sugar,
        ExpenseCategory::Oil,
        ExpenseCategory::Milk,
        ExpenseCategory::Flavour,
        ExpenseCategory::Butter,
        ExpenseCategory::Cups,
        ExpenseCategory::Tissue,
        ExpenseCategory::Packaging,
        ExpenseCategory::Transport,
        ExpenseCategory::Utilities,
        ExpenseCategory::Other,
    ];

    /// Canonical name as stored in rows.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Maize => "Maize",
            ExpenseCategory::Sugar => "Sugar",
            ExpenseCategory::Oil => "Oil",
            ExpenseCategory::Milk => "Milk",
            ExpenseCategory::Flavour => "Flavour",
            ExpenseCategory::Butter => "Butter",
            ExpenseCategory::Cups => "Cups",
            ExpenseCategory::Tissue => "Tissue",
            ExpenseCategory::Packaging => "Packaging",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Parses the canonical name; `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cost entry. No derived fields; immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    /// Strictly positive (enforced by the builder).
    pub amount: Money,
}

// =============================================================================
// Withdrawal
// =============================================================================

/// Direction of an owner cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalKind {
    /// Cash leaving the business for the owner's personal use.
    Withdrawal,
    /// Cash returned by the owner.
    Repayment,
}

impl WithdrawalKind {
    pub const ALL: [WithdrawalKind; 2] = [WithdrawalKind::Withdrawal, WithdrawalKind::Repayment];

    pub const fn as_str(&self) -> &'static str {
        match self {
            WithdrawalKind::Withdrawal => "withdrawal",
            WithdrawalKind::Repayment => "repayment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for WithdrawalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owner cash movement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub date: NaiveDate,
    pub purpose: String,
    /// Strictly positive (enforced by the builder).
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: WithdrawalKind,
}

// =============================================================================
// Loss
// =============================================================================

/// Why inventory went missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossReason {
    Shared,
    Spoiled,
    Missing,
    Destroyed,
    Other,
}

impl LossReason {
    pub const ALL: [LossReason; 5] = [
        LossReason::Shared,
        LossReason::Spoiled,
        LossReason::Missing,
        LossReason::Destroyed,
        LossReason::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LossReason::Shared => "shared",
            LossReason::Spoiled => "spoiled",
            LossReason::Missing => "missing",
            LossReason::Destroyed => "destroyed",
            LossReason::Other => "other",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == name)
    }
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory-shrinkage entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loss {
    pub id: String,
    pub date: NaiveDate,
    pub product: String,
    /// Whole units lost; strictly positive.
    pub quantity: u32,
    /// Unit value of the lost stock.
    pub price: Money,
    pub reason: LossReason,
    /// Derived: `quantity * price` (exact, no rounding needed).
    pub potential_value: Money,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer contact entry.
///
/// Customers are a plain address book: no identifier, no dates, and no link
/// to the financial records. Only the name is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub contact: String,
    pub location: String,
    pub description: String,
}

// =============================================================================
// Derived Rollups
// =============================================================================

/// Payroll credited to one employee across all their sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeShare {
    pub employee: String,
    pub total_share: Money,
    pub sales_count: u32,
}

/// Payroll credited to one employee within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMonthlyShare {
    pub employee: String,
    /// Month label formatted `"MMM yyyy"`, e.g. `"Mar 2026"`.
    pub month: String,
    pub total_share: Money,
    pub sales_count: u32,
}

/// Investor return accrued within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorMonthlyShare {
    pub month: String,
    pub total_share: Money,
    pub sales_count: u32,
}

/// A financial snapshot computed on demand from the full record
/// collections. Never persisted; has no identity beyond the call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_sales: Money,
    pub total_expenses: Money,
    /// Per-bucket sums of STORED sale allocations, in first-seen order.
    pub bucket_totals: Vec<BucketAmount>,
    pub owner_withdrawals: Money,
    pub owner_repayments: Money,
    /// Expenses in the configured material categories.
    pub cost_of_goods: Money,
    /// `total_sales - total_expenses`, unclamped.
    pub net_profit: Money,
    /// Cash position floored at zero (the display figure).
    pub cash: Money,
    /// The same figure before clamping; negative means the business is
    /// short of cash.
    pub cash_raw: Money,
    pub employee_shares: Vec<EmployeeShare>,
}

impl FinancialSummary {
    /// Aggregated total for a named bucket; zero if no sale used it.
    pub fn bucket(&self, name: &str) -> Money {
        self.bucket_totals
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.amount)
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::from_name(category.as_str()), Some(category));
        }
        assert_eq!(ExpenseCategory::from_name("Popcorn"), None);
    }

    #[test]
    fn test_withdrawal_kind_names() {
        assert_eq!(WithdrawalKind::from_name("withdrawal"), Some(WithdrawalKind::Withdrawal));
        assert_eq!(WithdrawalKind::from_name("repayment"), Some(WithdrawalKind::Repayment));
        assert_eq!(WithdrawalKind::from_name("Withdrawal"), None);
    }

    #[test]
    fn test_loss_reason_names_round_trip() {
        for reason in LossReason::ALL {
            assert_eq!(LossReason::from_name(reason.as_str()), Some(reason));
        }
    }

    #[test]
    fn test_sale_bucket_lookup() {
        let sale = Sale {
            id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            employee: "Diana Amano".to_string(),
            product: "Classic Popcorn".to_string(),
            quantity: 2.0,
            price: Money::from_cents(500),
            total: Money::from_cents(1000),
            event: "Normal".to_string(),
            scheme: "classic-v1".to_string(),
            split: vec![
                BucketAmount::new("businessFund", Money::from_cents(700)),
                BucketAmount::new("employeeShare", Money::from_cents(200)),
            ],
        };

        assert_eq!(sale.bucket("businessFund").cents(), 700);
        assert_eq!(sale.bucket("savings").cents(), 0);
        assert_eq!(
            sale.buckets_total(&["businessFund".to_string(), "employeeShare".to_string()])
                .cents(),
            900
        );
    }

    #[test]
    fn test_withdrawal_serializes_kind_as_type() {
        let withdrawal = Withdrawal {
            id: "w1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            purpose: "School fees".to_string(),
            amount: Money::from_cents(8000),
            kind: WithdrawalKind::Withdrawal,
        };
        let json = serde_json::to_string(&withdrawal).unwrap();
        assert!(json.contains(r#""type":"withdrawal""#));
    }
}
