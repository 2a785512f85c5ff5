//! # Record ↔ Row Codec
//!
//! Converts domain records to and from the canonical row encoding used by
//! the append-only store.
//!
//! ## Canonical Field Order
//! ```text
//! Sale:       id, date, employee, product, quantity, price, total, event,
//!             scheme, then one (bucketName, amount) pair per split bucket
//! Expense:    id, date, category, description, amount
//! Withdrawal: id, date, purpose, amount, type
//! Loss:       id, date, product, quantity, price, reason, potentialValue
//! Customer:   name, contact, location, description
//! ```
//!
//! The sale layout is self-describing: the bucket names ride along with the
//! amounts, so rows written under different split schemes decode without any
//! scheme lookup, and `decode(encode(x)) == x` holds for every scheme.
//!
//! Monetary fields are plain decimals ("3.47"); dates are `YYYY-MM-DD`.

use chrono::NaiveDate;
use starpops_core::money::Money;
use starpops_core::scheme::BucketAmount;
use starpops_core::types::{
    Customer, Expense, ExpenseCategory, Loss, LossReason, Sale, Withdrawal, WithdrawalKind,
};
use starpops_core::validation::DATE_FORMAT;

use crate::error::{StoreError, StoreResult};
use crate::store::RowFields;

// =============================================================================
// Field Parsers
// =============================================================================

fn parse_date(collection: &str, field: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .map_err(|_| StoreError::malformed(collection, format!("bad date '{field}'")))
}

fn parse_money(collection: &str, field: &str) -> StoreResult<Money> {
    field
        .parse()
        .map_err(|_| StoreError::malformed(collection, format!("bad amount '{field}'")))
}

fn parse_f64(collection: &str, field: &str) -> StoreResult<f64> {
    field
        .parse()
        .map_err(|_| StoreError::malformed(collection, format!("bad number '{field}'")))
}

fn parse_u32(collection: &str, field: &str) -> StoreResult<u32> {
    field
        .parse()
        .map_err(|_| StoreError::malformed(collection, format!("bad count '{field}'")))
}

fn field<'a>(collection: &str, row: &'a RowFields, index: usize) -> StoreResult<&'a str> {
    row.get(index)
        .map(String::as_str)
        .ok_or_else(|| StoreError::malformed(collection, format!("missing field {index}")))
}

// =============================================================================
// Sale Codec
// =============================================================================

/// Fixed columns before the variable (bucket, amount) pairs.
const SALE_FIXED_FIELDS: usize = 9;

/// Encodes a sale: fixed columns, then the split as alternating
/// bucket-name / amount columns in scheme order.
pub fn sale_to_row(sale: &Sale) -> RowFields {
    let mut row = vec![
        sale.id.clone(),
        sale.date.format(DATE_FORMAT).to_string(),
        sale.employee.clone(),
        sale.product.clone(),
        sale.quantity.to_string(),
        sale.price.to_string(),
        sale.total.to_string(),
        sale.event.clone(),
        sale.scheme.clone(),
    ];
    for part in &sale.split {
        row.push(part.name.clone());
        row.push(part.amount.to_string());
    }
    row
}

/// Decodes a sale row.
///
/// ## Errors
/// [`StoreError::MalformedRow`] when fixed fields are missing or malformed,
/// or when a trailing bucket name lacks its amount.
pub fn row_to_sale(row: &RowFields) -> StoreResult<Sale> {
    const C: &str = "Sales";

    let split_fields = &row[row.len().min(SALE_FIXED_FIELDS)..];
    if split_fields.len() % 2 != 0 {
        return Err(StoreError::malformed(C, "unpaired bucket field"));
    }
    let mut split = Vec::with_capacity(split_fields.len() / 2);
    for pair in split_fields.chunks_exact(2) {
        split.push(BucketAmount::new(&pair[0], parse_money(C, &pair[1])?));
    }

    Ok(Sale {
        id: field(C, row, 0)?.to_string(),
        date: parse_date(C, field(C, row, 1)?)?,
        employee: field(C, row, 2)?.to_string(),
        product: field(C, row, 3)?.to_string(),
        quantity: parse_f64(C, field(C, row, 4)?)?,
        price: parse_money(C, field(C, row, 5)?)?,
        total: parse_money(C, field(C, row, 6)?)?,
        event: field(C, row, 7)?.to_string(),
        scheme: field(C, row, 8)?.to_string(),
        split,
    })
}

// =============================================================================
// Expense Codec
// =============================================================================

pub fn expense_to_row(expense: &Expense) -> RowFields {
    vec![
        expense.id.clone(),
        expense.date.format(DATE_FORMAT).to_string(),
        expense.category.as_str().to_string(),
        expense.description.clone(),
        expense.amount.to_string(),
    ]
}

pub fn row_to_expense(row: &RowFields) -> StoreResult<Expense> {
    const C: &str = "Expenses";

    let category_name = field(C, row, 2)?;
    let category = ExpenseCategory::from_name(category_name)
        .ok_or_else(|| StoreError::malformed(C, format!("unknown category '{category_name}'")))?;

    Ok(Expense {
        id: field(C, row, 0)?.to_string(),
        date: parse_date(C, field(C, row, 1)?)?,
        category,
        description: field(C, row, 3)?.to_string(),
        amount: parse_money(C, field(C, row, 4)?)?,
    })
}

// =============================================================================
// Withdrawal Codec
// =============================================================================

pub fn withdrawal_to_row(withdrawal: &Withdrawal) -> RowFields {
    vec![
        withdrawal.id.clone(),
        withdrawal.date.format(DATE_FORMAT).to_string(),
        withdrawal.purpose.clone(),
        withdrawal.amount.to_string(),
        withdrawal.kind.as_str().to_string(),
    ]
}

pub fn row_to_withdrawal(row: &RowFields) -> StoreResult<Withdrawal> {
    const C: &str = "Withdrawals";

    let kind_name = field(C, row, 4)?;
    let kind = WithdrawalKind::from_name(kind_name)
        .ok_or_else(|| StoreError::malformed(C, format!("unknown type '{kind_name}'")))?;

    Ok(Withdrawal {
        id: field(C, row, 0)?.to_string(),
        date: parse_date(C, field(C, row, 1)?)?,
        purpose: field(C, row, 2)?.to_string(),
        amount: parse_money(C, field(C, row, 3)?)?,
        kind,
    })
}

// =============================================================================
// Loss Codec
// =============================================================================

pub fn loss_to_row(loss: &Loss) -> RowFields {
    vec![
        loss.id.clone(),
        loss.date.format(DATE_FORMAT).to_string(),
        loss.product.clone(),
        loss.quantity.to_string(),
        loss.price.to_string(),
        loss.reason.as_str().to_string(),
        loss.potential_value.to_string(),
    ]
}

pub fn row_to_loss(row: &RowFields) -> StoreResult<Loss> {
    const C: &str = "Losses";

    let reason_name = field(C, row, 5)?;
    let reason = LossReason::from_name(reason_name)
        .ok_or_else(|| StoreError::malformed(C, format!("unknown reason '{reason_name}'")))?;

    Ok(Loss {
        id: field(C, row, 0)?.to_string(),
        date: parse_date(C, field(C, row, 1)?)?,
        product: field(C, row, 2)?.to_string(),
        quantity: parse_u32(C, field(C, row, 3)?)?,
        price: parse_money(C, field(C, row, 4)?)?,
        reason,
        potential_value: parse_money(C, field(C, row, 6)?)?,
    })
}

// =============================================================================
// Customer Codec
// =============================================================================

pub fn customer_to_row(customer: &Customer) -> RowFields {
    vec![
        customer.name.clone(),
        customer.contact.clone(),
        customer.location.clone(),
        customer.description.clone(),
    ]
}

/// Decodes a customer row.
///
/// Trailing fields may be absent in historical rows (a name-only entry is
/// legal) and decode as empty strings.
pub fn row_to_customer(row: &RowFields) -> StoreResult<Customer> {
    const C: &str = "Customers";

    let optional = |index: usize| row.get(index).cloned().unwrap_or_default();

    Ok(Customer {
        name: field(C, row, 0)?.to_string(),
        contact: optional(1),
        location: optional(2),
        description: optional(3),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use starpops_core::builder::{
        build_customer, build_expense, build_loss, build_sale, build_withdrawal,
        RawCustomerInput, RawExpenseInput, RawLossInput, RawSaleInput, RawWithdrawalInput,
    };
    use starpops_core::scheme::SplitScheme;

    fn sample_sale(scheme: &SplitScheme) -> Sale {
        build_sale(
            RawSaleInput {
                date: "2026-03-14".to_string(),
                employee: "Diana Amano".to_string(),
                product: "Caramel Popcorn, Large".to_string(),
                quantity: 2.5,
                price: 4.0,
                event: Some("Homecoming Fair".to_string()),
            },
            scheme,
        )
        .unwrap()
    }

    #[test]
    fn test_sale_round_trip_per_scheme() {
        for scheme in [
            SplitScheme::classic_v1(),
            SplitScheme::savings_v2(),
            SplitScheme::payroll_v3(),
        ] {
            let sale = sample_sale(&scheme);
            let decoded = row_to_sale(&sale_to_row(&sale)).unwrap();
            assert_eq!(decoded, sale);
        }
    }

    #[test]
    fn test_sale_row_layout() {
        let sale = sample_sale(&SplitScheme::classic_v1());
        let row = sale_to_row(&sale);

        assert_eq!(row[1], "2026-03-14");
        assert_eq!(row[3], "Caramel Popcorn, Large");
        assert_eq!(row[4], "2.5");
        assert_eq!(row[6], "10.00");
        assert_eq!(row[8], "classic-v1");
        // Split pairs follow scheme order
        assert_eq!(row[9], "businessFund");
        assert_eq!(row[10], "7.00");
        assert_eq!(row.len(), SALE_FIXED_FIELDS + 6);
    }

    #[test]
    fn test_sale_decode_rejects_malformed() {
        let sale = sample_sale(&SplitScheme::classic_v1());

        let mut row = sale_to_row(&sale);
        row.truncate(4);
        assert!(matches!(
            row_to_sale(&row).unwrap_err(),
            StoreError::MalformedRow { .. }
        ));

        let mut row = sale_to_row(&sale);
        row.push("danglingBucket".to_string());
        assert!(row_to_sale(&row).is_err());

        let mut row = sale_to_row(&sale);
        row[6] = "not-money".to_string();
        assert!(row_to_sale(&row).is_err());
    }

    #[test]
    fn test_expense_round_trip() {
        let expense = build_expense(RawExpenseInput {
            date: "2026-03-01".to_string(),
            category: "Maize".to_string(),
            description: "50kg bag, \"Makola\"".to_string(),
            amount: 30.0,
        })
        .unwrap();

        let decoded = row_to_expense(&expense_to_row(&expense)).unwrap();
        assert_eq!(decoded, expense);
    }

    #[test]
    fn test_expense_decode_rejects_unknown_category() {
        let expense = build_expense(RawExpenseInput {
            date: "2026-03-01".to_string(),
            category: "Maize".to_string(),
            description: String::new(),
            amount: 30.0,
        })
        .unwrap();

        let mut row = expense_to_row(&expense);
        row[2] = "Confetti".to_string();
        assert!(row_to_expense(&row).is_err());
    }

    #[test]
    fn test_withdrawal_round_trip() {
        for kind in ["withdrawal", "repayment"] {
            let withdrawal = build_withdrawal(RawWithdrawalInput {
                date: "2026-02-10".to_string(),
                purpose: "Rent advance".to_string(),
                amount: 80.0,
                kind: kind.to_string(),
            })
            .unwrap();

            let decoded = row_to_withdrawal(&withdrawal_to_row(&withdrawal)).unwrap();
            assert_eq!(decoded, withdrawal);
        }
    }

    #[test]
    fn test_customer_round_trip() {
        let customer = build_customer(RawCustomerInput {
            name: "Ama Serwaa".to_string(),
            contact: "024-555-0199".to_string(),
            location: "Osu, Accra".to_string(),
            description: "Weekly bulk order".to_string(),
        })
        .unwrap();

        let decoded = row_to_customer(&customer_to_row(&customer)).unwrap();
        assert_eq!(decoded, customer);
    }

    #[test]
    fn test_customer_decode_defaults_missing_trailing_fields() {
        // Name-only rows exist in old books
        let row = vec!["Ama Serwaa".to_string()];
        let customer = row_to_customer(&row).unwrap();
        assert_eq!(customer.name, "Ama Serwaa");
        assert_eq!(customer.contact, "");
        assert_eq!(customer.description, "");

        assert!(row_to_customer(&vec![]).is_err());
    }

    #[test]
    fn test_loss_round_trip() {
        let loss = build_loss(RawLossInput {
            date: "2026-02-11".to_string(),
            product: "Caramel Popcorn".to_string(),
            quantity: 5,
            price: 2.5,
            reason: "spoiled".to_string(),
        })
        .unwrap();

        let row = loss_to_row(&loss);
        assert_eq!(row[6], "12.50");
        assert_eq!(row_to_loss(&row).unwrap(), loss);
    }
}
