//! # CSV Export
//!
//! Renders record collections and summaries as RFC-4180-ish CSV text for
//! spreadsheet handoff. Fields containing commas, quotes, or newlines are
//! quoted with doubled inner quotes; everything else is written bare.
//!
//! Sale exports take the split scheme so the bucket columns match whatever
//! partition the caller is reporting under.

use crate::money::Money;
use crate::scheme::SplitScheme;
use crate::summary::total_losses;
use crate::types::{Expense, FinancialSummary, Loss, Sale, Withdrawal, WithdrawalKind};
use crate::validation::DATE_FORMAT;

/// Currency tag appended to monetary column headers.
const CURRENCY: &str = "GHS";

// =============================================================================
// Field Escaping
// =============================================================================

/// Quotes a field if it contains a comma, quote, or newline.
fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn render(rows: Vec<Vec<String>>) -> String {
    rows.iter().map(|r| line(r)).collect::<Vec<_>>().join("\n")
}

/// "salesPayroll" → "Sales Payroll (GHS)".
fn bucket_header(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 8);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    format!("{label} ({CURRENCY})")
}

// =============================================================================
// Record Exports
// =============================================================================

/// Renders sales as CSV, with one monetary column per scheme bucket.
pub fn sales_csv(sales: &[Sale], scheme: &SplitScheme) -> String {
    let mut headers = vec![
        "Date".to_string(),
        "Product".to_string(),
        "Quantity".to_string(),
        format!("Unit Price ({CURRENCY})"),
        format!("Total ({CURRENCY})"),
    ];
    for bucket in scheme.buckets() {
        headers.push(bucket_header(&bucket.name));
    }

    let mut rows = vec![headers];
    for sale in sales {
        let mut row = vec![
            sale.date.format(DATE_FORMAT).to_string(),
            sale.product.clone(),
            sale.quantity.to_string(),
            sale.price.to_string(),
            sale.total.to_string(),
        ];
        for bucket in scheme.buckets() {
            row.push(sale.bucket(&bucket.name).to_string());
        }
        rows.push(row);
    }
    render(rows)
}

/// Renders expenses as CSV.
pub fn expenses_csv(expenses: &[Expense]) -> String {
    let mut rows = vec![vec![
        "Date".to_string(),
        "Category".to_string(),
        "Description".to_string(),
        format!("Amount ({CURRENCY})"),
    ]];
    for expense in expenses {
        rows.push(vec![
            expense.date.format(DATE_FORMAT).to_string(),
            expense.category.as_str().to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
        ]);
    }
    render(rows)
}

/// Renders withdrawals and repayments as CSV.
pub fn withdrawals_csv(withdrawals: &[Withdrawal]) -> String {
    let mut rows = vec![vec![
        "Date".to_string(),
        "Type".to_string(),
        "Purpose".to_string(),
        format!("Amount ({CURRENCY})"),
    ]];
    for withdrawal in withdrawals {
        let kind = match withdrawal.kind {
            WithdrawalKind::Withdrawal => "Withdrawal",
            WithdrawalKind::Repayment => "Repayment",
        };
        rows.push(vec![
            withdrawal.date.format(DATE_FORMAT).to_string(),
            kind.to_string(),
            withdrawal.purpose.clone(),
            withdrawal.amount.to_string(),
        ]);
    }
    render(rows)
}

/// Renders inventory losses as CSV, with a trailing total row.
pub fn losses_csv(losses: &[Loss]) -> String {
    let mut rows = vec![vec![
        "Date".to_string(),
        "Product".to_string(),
        "Quantity".to_string(),
        format!("Unit Price ({CURRENCY})"),
        "Reason".to_string(),
        format!("Potential Value ({CURRENCY})"),
    ]];
    for loss in losses {
        rows.push(vec![
            loss.date.format(DATE_FORMAT).to_string(),
            loss.product.clone(),
            loss.quantity.to_string(),
            loss.price.to_string(),
            loss.reason.as_str().to_string(),
            loss.potential_value.to_string(),
        ]);
    }
    rows.push(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        total_losses(losses).to_string(),
    ]);
    render(rows)
}

// =============================================================================
// Summary Export
// =============================================================================

/// Renders a [`FinancialSummary`] as a sectioned report.
pub fn summary_csv(summary: &FinancialSummary) -> String {
    let label_row = |label: &str, amount: Money| vec![label.to_string(), amount.to_string()];
    let section = |title: &str| vec![title.to_string(), String::new()];

    let mut rows = vec![
        vec!["Financial Summary Report".to_string()],
        vec![],
        section("Revenue"),
        label_row("Total Sales", summary.total_sales),
        vec![],
        section("Expenses"),
        label_row("Total Expenses", summary.total_expenses),
        label_row("Cost of Goods", summary.cost_of_goods),
        vec![],
        section("Fund Distribution"),
    ];
    for bucket in &summary.bucket_totals {
        let header = bucket_header(&bucket.name);
        // Strip the currency suffix; the amount column carries the unit
        let label = header
            .strip_suffix(&format!(" ({CURRENCY})"))
            .unwrap_or(&header)
            .to_string();
        rows.push(vec![label, bucket.amount.to_string()]);
    }
    rows.extend([
        vec![],
        section("Owner Transactions"),
        label_row("Withdrawals", summary.owner_withdrawals),
        label_row("Repayments", summary.owner_repayments),
        vec![],
        section("Summary"),
        label_row("Net Profit", summary.net_profit),
        label_row("Cash Balance", summary.cash),
    ]);
    render(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        build_expense, build_loss, build_sale, build_withdrawal, RawExpenseInput, RawLossInput,
        RawSaleInput, RawWithdrawalInput,
    };
    use crate::summary::{summarize, SummaryPolicy};

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_sales_csv_columns_follow_scheme() {
        let scheme = SplitScheme::classic_v1();
        let sale = build_sale(
            RawSaleInput {
                date: "2026-03-14".to_string(),
                employee: "Diana Amano".to_string(),
                product: "Classic Popcorn".to_string(),
                quantity: 10.0,
                price: 5.0,
                event: None,
            },
            &scheme,
        )
        .unwrap();

        let csv = sales_csv(&[sale], &scheme);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Product,Quantity,Unit Price (GHS),Total (GHS),\
             Business Fund (GHS),Employee Share (GHS),Investor Share (GHS)"
        );
        assert_eq!(
            lines[1],
            "2026-03-14,Classic Popcorn,10,5.00,50.00,35.00,10.00,5.00"
        );
    }

    #[test]
    fn test_expenses_csv_escapes_description() {
        let expense = build_expense(RawExpenseInput {
            date: "2026-03-01".to_string(),
            category: "Maize".to_string(),
            description: "50kg bag, Makola market".to_string(),
            amount: 30.0,
        })
        .unwrap();

        let csv = expenses_csv(&[expense]);
        assert!(csv.contains("\"50kg bag, Makola market\""));
        assert!(csv.starts_with("Date,Category,Description,Amount (GHS)\n"));
    }

    #[test]
    fn test_withdrawals_csv_labels_kind() {
        let records = vec![
            build_withdrawal(RawWithdrawalInput {
                date: "2026-02-10".to_string(),
                purpose: "Rent".to_string(),
                amount: 80.0,
                kind: "withdrawal".to_string(),
            })
            .unwrap(),
            build_withdrawal(RawWithdrawalInput {
                date: "2026-02-20".to_string(),
                purpose: "Paid back".to_string(),
                amount: 20.0,
                kind: "repayment".to_string(),
            })
            .unwrap(),
        ];

        let csv = withdrawals_csv(&records);
        assert!(csv.contains("2026-02-10,Withdrawal,Rent,80.00"));
        assert!(csv.contains("2026-02-20,Repayment,Paid back,20.00"));
    }

    #[test]
    fn test_losses_csv_total_row() {
        let loss = build_loss(RawLossInput {
            date: "2026-02-11".to_string(),
            product: "Caramel Popcorn".to_string(),
            quantity: 5,
            price: 2.5,
            reason: "spoiled".to_string(),
        })
        .unwrap();

        let csv = losses_csv(&[loss]);
        let last = csv.lines().last().unwrap();
        assert_eq!(last, "Total,,,,,12.50");
    }

    #[test]
    fn test_summary_csv_sections() {
        let scheme = SplitScheme::classic_v1();
        let sale = build_sale(
            RawSaleInput {
                date: "2026-03-14".to_string(),
                employee: "Diana Amano".to_string(),
                product: "Classic Popcorn".to_string(),
                quantity: 10.0,
                price: 5.0,
                event: None,
            },
            &scheme,
        )
        .unwrap();
        let summary = summarize(&[sale], &[], &[], &SummaryPolicy::default());

        let csv = summary_csv(&summary);
        assert!(csv.starts_with("Financial Summary Report\n"));
        assert!(csv.contains("Total Sales,50.00"));
        assert!(csv.contains("Business Fund,35.00"));
        assert!(csv.contains("Cash Balance,35.00"));
        assert!(csv.contains("Net Profit,50.00"));
    }

    #[test]
    fn test_bucket_header_splits_camel_case() {
        assert_eq!(bucket_header("businessFund"), "Business Fund (GHS)");
        assert_eq!(bucket_header("savings"), "Savings (GHS)");
    }
}
