//! # Ledger Repository
//!
//! Record-level persistence API over the raw row store.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Ledger                                        │
//! │                                                                         │
//! │  add_sale(sale)                          sales()                        │
//! │       │                                     ▲                           │
//! │       ▼                                     │                           │
//! │  codec::sale_to_row              codec::row_to_sale                     │
//! │       │                                     │                           │
//! │       ▼                                     │                           │
//! │  RowStore::append_rows ──► SQLite ──► RowStore::read_rows              │
//! │                                                                         │
//! │  Collections: "Sales", "Expenses", "Withdrawals", "Losses",            │
//! │               "Customers"                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are validated before they reach the ledger (the builders refuse
//! to construct bad records), so the ledger trusts its inputs and only
//! worries about rows that were tampered with on disk.

use starpops_core::types::{Customer, Expense, Loss, Sale, Withdrawal};
use tracing::debug;

use crate::codec;
use crate::error::StoreResult;
use crate::store::RowStore;

/// Collection name for sale rows.
pub const SALES: &str = "Sales";
/// Collection name for expense rows.
pub const EXPENSES: &str = "Expenses";
/// Collection name for withdrawal rows.
pub const WITHDRAWALS: &str = "Withdrawals";
/// Collection name for loss rows.
pub const LOSSES: &str = "Losses";
/// Collection name for customer rows.
pub const CUSTOMERS: &str = "Customers";

// =============================================================================
// Ledger
// =============================================================================

/// Typed record access over the append-only row store.
///
/// Cheap to clone; all clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct Ledger {
    store: RowStore,
}

impl Ledger {
    pub fn new(store: RowStore) -> Self {
        Ledger { store }
    }

    /// Returns the underlying row store.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Appends one sale.
    pub async fn add_sale(&self, sale: &Sale) -> StoreResult<()> {
        self.store
            .append_rows(SALES, &[codec::sale_to_row(sale)])
            .await?;
        debug!(id = %sale.id, total = sale.total.cents(), "Sale recorded");
        Ok(())
    }

    /// Appends a batch of sales in one transaction.
    pub async fn add_sales(&self, sales: &[Sale]) -> StoreResult<()> {
        let rows: Vec<_> = sales.iter().map(codec::sale_to_row).collect();
        self.store.append_rows(SALES, &rows).await
    }

    /// Reads every sale, oldest first.
    pub async fn sales(&self) -> StoreResult<Vec<Sale>> {
        let rows = self.store.read_rows(SALES).await?;
        rows.iter().map(codec::row_to_sale).collect()
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    /// Appends one expense.
    pub async fn add_expense(&self, expense: &Expense) -> StoreResult<()> {
        self.store
            .append_rows(EXPENSES, &[codec::expense_to_row(expense)])
            .await?;
        debug!(id = %expense.id, amount = expense.amount.cents(), "Expense recorded");
        Ok(())
    }

    /// Reads every expense, oldest first.
    pub async fn expenses(&self) -> StoreResult<Vec<Expense>> {
        let rows = self.store.read_rows(EXPENSES).await?;
        rows.iter().map(codec::row_to_expense).collect()
    }

    // -------------------------------------------------------------------------
    // Withdrawals
    // -------------------------------------------------------------------------

    /// Appends one withdrawal or repayment.
    pub async fn add_withdrawal(&self, withdrawal: &Withdrawal) -> StoreResult<()> {
        self.store
            .append_rows(WITHDRAWALS, &[codec::withdrawal_to_row(withdrawal)])
            .await?;
        debug!(id = %withdrawal.id, kind = ?withdrawal.kind, "Withdrawal recorded");
        Ok(())
    }

    /// Reads every withdrawal, oldest first.
    pub async fn withdrawals(&self) -> StoreResult<Vec<Withdrawal>> {
        let rows = self.store.read_rows(WITHDRAWALS).await?;
        rows.iter().map(codec::row_to_withdrawal).collect()
    }

    // -------------------------------------------------------------------------
    // Losses
    // -------------------------------------------------------------------------

    /// Appends one inventory loss.
    pub async fn add_loss(&self, loss: &Loss) -> StoreResult<()> {
        self.store
            .append_rows(LOSSES, &[codec::loss_to_row(loss)])
            .await?;
        debug!(id = %loss.id, value = loss.potential_value.cents(), "Loss recorded");
        Ok(())
    }

    /// Reads every loss, oldest first.
    pub async fn losses(&self) -> StoreResult<Vec<Loss>> {
        let rows = self.store.read_rows(LOSSES).await?;
        rows.iter().map(codec::row_to_loss).collect()
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Appends one customer contact.
    pub async fn add_customer(&self, customer: &Customer) -> StoreResult<()> {
        self.store
            .append_rows(CUSTOMERS, &[codec::customer_to_row(customer)])
            .await?;
        debug!(name = %customer.name, "Customer recorded");
        Ok(())
    }

    /// Reads every customer, oldest first.
    pub async fn customers(&self) -> StoreResult<Vec<Customer>> {
        let rows = self.store.read_rows(CUSTOMERS).await?;
        rows.iter().map(codec::row_to_customer).collect()
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    /// Reads every financial collection in one call. Customers are an
    /// address book, not books, and are read separately.
    ///
    /// Any read failure fails the whole snapshot; a partially loaded set of
    /// books is worse than an error.
    pub async fn snapshot(&self) -> StoreResult<LedgerSnapshot> {
        Ok(LedgerSnapshot {
            sales: self.sales().await?,
            expenses: self.expenses().await?,
            withdrawals: self.withdrawals().await?,
            losses: self.losses().await?,
        })
    }
}

/// Full contents of the books at one point in time. Feed this to
/// `starpops_core::summary::summarize` for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub withdrawals: Vec<Withdrawal>,
    pub losses: Vec<Loss>,
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use starpops_core::builder::{
        build_expense, build_loss, build_sale, build_withdrawal, RawExpenseInput, RawLossInput,
        RawSaleInput, RawWithdrawalInput,
    };
    use starpops_core::scheme::SplitScheme;
    use starpops_core::summary::{summarize, SummaryPolicy};

    async fn ledger() -> Ledger {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();
        Ledger::new(store)
    }

    fn sale(date: &str, employee: &str, quantity: f64, price: f64) -> Sale {
        build_sale(
            RawSaleInput {
                date: date.to_string(),
                employee: employee.to_string(),
                product: "Classic Popcorn".to_string(),
                quantity,
                price,
                event: None,
            },
            &SplitScheme::payroll_v3(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sales_round_trip_in_order() {
        let ledger = ledger().await;

        let first = sale("2026-03-10", "Diana Amano", 10.0, 5.0);
        let second = sale("2026-03-11", "Caleb Sackey", 4.0, 2.5);
        ledger.add_sale(&first).await.unwrap();
        ledger.add_sale(&second).await.unwrap();

        let sales = ledger.sales().await.unwrap();
        assert_eq!(sales, vec![first, second]);
    }

    #[tokio::test]
    async fn test_batch_append() {
        let ledger = ledger().await;

        let batch = vec![
            sale("2026-03-10", "Diana Amano", 10.0, 5.0),
            sale("2026-03-10", "Diana Amano", 3.0, 5.0),
        ];
        ledger.add_sales(&batch).await.unwrap();

        assert_eq!(ledger.sales().await.unwrap(), batch);
    }

    #[tokio::test]
    async fn test_all_collections_round_trip() {
        let ledger = ledger().await;

        let expense = build_expense(RawExpenseInput {
            date: "2026-03-01".to_string(),
            category: "Maize".to_string(),
            description: "50kg bag".to_string(),
            amount: 30.0,
        })
        .unwrap();
        let withdrawal = build_withdrawal(RawWithdrawalInput {
            date: "2026-03-02".to_string(),
            purpose: "Rent".to_string(),
            amount: 80.0,
            kind: "withdrawal".to_string(),
        })
        .unwrap();
        let loss = build_loss(RawLossInput {
            date: "2026-03-03".to_string(),
            product: "Caramel Popcorn".to_string(),
            quantity: 5,
            price: 2.5,
            reason: "spoiled".to_string(),
        })
        .unwrap();

        ledger.add_expense(&expense).await.unwrap();
        ledger.add_withdrawal(&withdrawal).await.unwrap();
        ledger.add_loss(&loss).await.unwrap();

        assert_eq!(ledger.expenses().await.unwrap(), vec![expense]);
        assert_eq!(ledger.withdrawals().await.unwrap(), vec![withdrawal]);
        assert_eq!(ledger.losses().await.unwrap(), vec![loss]);
    }

    #[tokio::test]
    async fn test_customers_round_trip() {
        use starpops_core::builder::{build_customer, RawCustomerInput};

        let ledger = ledger().await;
        let customer = build_customer(RawCustomerInput {
            name: "Ama Serwaa".to_string(),
            contact: "024-555-0199".to_string(),
            location: "Osu, Accra".to_string(),
            description: "Weekly bulk order".to_string(),
        })
        .unwrap();

        ledger.add_customer(&customer).await.unwrap();
        assert_eq!(ledger.customers().await.unwrap(), vec![customer]);
    }

    #[tokio::test]
    async fn test_empty_ledger_snapshot() {
        let ledger = ledger().await;
        let snapshot = ledger.snapshot().await.unwrap();

        assert!(snapshot.sales.is_empty());
        assert!(snapshot.expenses.is_empty());
        assert!(snapshot.withdrawals.is_empty());
        assert!(snapshot.losses.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_feeds_summary() {
        let ledger = ledger().await;
        ledger.add_sale(&sale("2026-03-10", "Diana Amano", 10.0, 5.0)).await.unwrap();

        let snapshot = ledger.snapshot().await.unwrap();
        let summary = summarize(
            &snapshot.sales,
            &snapshot.expenses,
            &snapshot.withdrawals,
            &SummaryPolicy::default(),
        );

        assert_eq!(summary.total_sales.cents(), 5_000);
        assert_eq!(summary.bucket("productionCost").cents(), 3_150);
    }

    #[tokio::test]
    async fn test_tampered_row_is_reported_not_skipped() {
        let ledger = ledger().await;
        ledger.add_sale(&sale("2026-03-10", "Diana Amano", 10.0, 5.0)).await.unwrap();

        // Hand-write a corrupt row straight into the store
        ledger
            .store()
            .append_rows(SALES, &[vec!["only-an-id".to_string()]])
            .await
            .unwrap();

        assert!(ledger.sales().await.is_err());
    }
}
