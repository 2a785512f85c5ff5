//! # Summary Aggregator
//!
//! Folds the full record collections into derived rollups for display.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  totalSales   = Σ sale.total                                            │
//! │  bucketTotals = Σ sale.split[name]   ← STORED values, never re-derived  │
//! │  costOfGoods  = Σ expense.amount where category ∈ policy.materials     │
//! │  cashRaw      = primaryFund − totalExpenses − withdrawals + repayments  │
//! │  cash         = max(0, cashRaw)                                         │
//! │  netProfit    = totalSales − totalExpenses (unclamped)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions here are pure and reentrant: same inputs, same output,
//! every time. Monetary values are integer cents throughout, so repeated
//! re-aggregation is trivially byte-identical.
//!
//! Which bucket names count as "primary fund", "payroll", or "investor" is
//! policy configuration, because three different split schemes have named
//! these buckets three different ways over the life of the books.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::scheme::BucketAmount;
use crate::types::{
    EmployeeMonthlyShare, EmployeeShare, Expense, ExpenseCategory, FinancialSummary,
    InvestorMonthlyShare, Loss, Sale, Withdrawal, WithdrawalKind,
};

/// Month label format used by the rollup tables ("MMM yyyy").
const MONTH_FORMAT: &str = "%b %Y";

// =============================================================================
// Summary Policy
// =============================================================================

/// Configuration mapping stored bucket names to aggregation roles.
///
/// Sales persisted under `classic-v1` carry a `businessFund` bucket where
/// `payroll-v3` sales carry `productionCost`; listing both here lets a
/// mixed-scheme history aggregate into one summary without rewriting
/// anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPolicy {
    /// Buckets that feed the cash-position formula.
    pub primary_fund_buckets: Vec<String>,
    /// Buckets credited to staff; feed the employee rollups.
    pub payroll_buckets: Vec<String>,
    /// Buckets owed to the investor; feed the investor rollup.
    pub investor_buckets: Vec<String>,
    /// Expense categories that count as cost of goods.
    pub material_categories: Vec<ExpenseCategory>,
}

impl Default for SummaryPolicy {
    /// Covers every bucket name the three historical schemes have used,
    /// and the original cost-of-goods category set.
    fn default() -> Self {
        SummaryPolicy {
            primary_fund_buckets: vec!["businessFund".to_string(), "productionCost".to_string()],
            payroll_buckets: vec![
                "employeeShare".to_string(),
                "salesPayroll".to_string(),
                "packagingPayroll".to_string(),
            ],
            investor_buckets: vec!["investorShare".to_string()],
            material_categories: vec![ExpenseCategory::Maize, ExpenseCategory::Sugar],
        }
    }
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Computes a [`FinancialSummary`] from the full record collections.
///
/// ## Properties
/// - Idempotent: calling twice on the same inputs yields identical output
/// - Additive: totals over `S1 ++ S2` equal the sum of totals over each
/// - Bucket totals come from STORED per-sale values only; a sale recorded
///   under an old scheme keeps its historical allocation forever
pub fn summarize(
    sales: &[Sale],
    expenses: &[Expense],
    withdrawals: &[Withdrawal],
    policy: &SummaryPolicy,
) -> FinancialSummary {
    let total_sales: Money = sales.iter().map(|s| s.total).sum();
    let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();

    // Per-bucket sums keyed by stored name, in first-seen order
    let mut bucket_totals: Vec<BucketAmount> = Vec::new();
    for sale in sales {
        for part in &sale.split {
            match bucket_totals.iter_mut().find(|b| b.name == part.name) {
                Some(existing) => existing.amount += part.amount,
                None => bucket_totals.push(part.clone()),
            }
        }
    }

    let owner_withdrawals: Money = withdrawals
        .iter()
        .filter(|w| w.kind == WithdrawalKind::Withdrawal)
        .map(|w| w.amount)
        .sum();
    let owner_repayments: Money = withdrawals
        .iter()
        .filter(|w| w.kind == WithdrawalKind::Repayment)
        .map(|w| w.amount)
        .sum();

    let cost_of_goods: Money = expenses
        .iter()
        .filter(|e| policy.material_categories.contains(&e.category))
        .map(|e| e.amount)
        .sum();

    let primary_fund: Money = bucket_totals
        .iter()
        .filter(|b| policy.primary_fund_buckets.contains(&b.name))
        .map(|b| b.amount)
        .sum();

    let cash_raw = primary_fund - total_expenses - owner_withdrawals + owner_repayments;

    FinancialSummary {
        total_sales,
        total_expenses,
        bucket_totals,
        owner_withdrawals,
        owner_repayments,
        cost_of_goods,
        net_profit: total_sales - total_expenses,
        // Floored for display; cash_raw keeps the honest figure
        cash: cash_raw.max(Money::zero()),
        cash_raw,
        employee_shares: employee_shares(sales, policy),
    }
}

// =============================================================================
// Employee & Investor Rollups
// =============================================================================

/// Groups sales by employee, summing the payroll-type buckets.
///
/// Output order is the order employees first appear in the sale list.
pub fn employee_shares(sales: &[Sale], policy: &SummaryPolicy) -> Vec<EmployeeShare> {
    let mut shares: Vec<EmployeeShare> = Vec::new();
    for sale in sales {
        let share = sale.buckets_total(&policy.payroll_buckets);
        match shares.iter_mut().find(|s| s.employee == sale.employee) {
            Some(existing) => {
                existing.total_share += share;
                existing.sales_count += 1;
            }
            None => shares.push(EmployeeShare {
                employee: sale.employee.clone(),
                total_share: share,
                sales_count: 1,
            }),
        }
    }
    shares
}

/// Groups sales by `(employee, month)`, summing the payroll-type buckets.
pub fn employee_monthly_shares(
    sales: &[Sale],
    policy: &SummaryPolicy,
) -> Vec<EmployeeMonthlyShare> {
    let mut shares: Vec<EmployeeMonthlyShare> = Vec::new();
    for sale in sales {
        let month = month_label(sale);
        let share = sale.buckets_total(&policy.payroll_buckets);
        match shares
            .iter_mut()
            .find(|s| s.employee == sale.employee && s.month == month)
        {
            Some(existing) => {
                existing.total_share += share;
                existing.sales_count += 1;
            }
            None => shares.push(EmployeeMonthlyShare {
                employee: sale.employee.clone(),
                month,
                total_share: share,
                sales_count: 1,
            }),
        }
    }
    shares
}

/// Groups sales by month only, summing the investor-share buckets.
pub fn investor_monthly_shares(
    sales: &[Sale],
    policy: &SummaryPolicy,
) -> Vec<InvestorMonthlyShare> {
    let mut shares: Vec<InvestorMonthlyShare> = Vec::new();
    for sale in sales {
        let month = month_label(sale);
        let share = sale.buckets_total(&policy.investor_buckets);
        match shares.iter_mut().find(|s| s.month == month) {
            Some(existing) => {
                existing.total_share += share;
                existing.sales_count += 1;
            }
            None => shares.push(InvestorMonthlyShare {
                month,
                total_share: share,
                sales_count: 1,
            }),
        }
    }
    shares
}

// =============================================================================
// Loss Aggregation
// =============================================================================

/// Total potential value of all inventory losses. Independent of the sale
/// and expense aggregation, combinable into any final report.
pub fn total_losses(losses: &[Loss]) -> Money {
    losses.iter().map(|l| l.potential_value).sum()
}

fn month_label(sale: &Sale) -> String {
    sale.date.format(MONTH_FORMAT).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
