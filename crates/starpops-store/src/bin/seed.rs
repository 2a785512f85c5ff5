//! # Seed Data Generator
//!
//! Populates a books database with a month of demo records for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p starpops-store --bin seed
//!
//! # Specify database path
//! cargo run -p starpops-store --bin seed -- --db ./data/starpops.db
//! ```
//!
//! ## Generated Records
//! - Daily popcorn sales across two employees and three products
//! - Material and operating expenses
//! - One owner withdrawal and a partial repayment
//! - A couple of inventory losses
//! - Two customer contacts
//!
//! Finishes by reading everything back and printing a financial summary,
//! which doubles as an end-to-end smoke check of the codec and ledger.

use std::env;

use starpops_core::builder::{
    build_customer, build_expense, build_loss, build_sale, build_withdrawal, RawCustomerInput,
    RawExpenseInput, RawLossInput, RawSaleInput, RawWithdrawalInput,
};
use starpops_core::error::ValidationResult;
use starpops_core::scheme::SplitScheme;
use starpops_core::types::{Customer, Expense, Loss, Withdrawal};
use starpops_core::summary::{summarize, total_losses, SummaryPolicy};
use starpops_store::{Ledger, RowStore, StoreConfig};
use tracing::info;

/// (product, unit price) catalog for demo sales.
const PRODUCTS: &[(&str, f64)] = &[
    ("Classic Popcorn", 5.0),
    ("Caramel Popcorn", 7.5),
    ("Spicy Popcorn", 6.0),
];

const EMPLOYEES: &[&str] = &["Diana Amano", "Caleb Sackey"];

/// (date, category, description, amount) demo expenses. Categories must
/// name `ExpenseCategory` variants or the seed run fails.
const DEMO_EXPENSES: &[(&str, &str, &str, f64)] = &[
    ("2026-03-01", "Maize", "50kg bag, Makola market", 120.0),
    ("2026-03-01", "Sugar", "25kg caramel stock", 60.0),
    ("2026-03-05", "Packaging", "500 branded bags", 45.0),
    ("2026-03-08", "Transport", "Market runs, week 1", 18.0),
    ("2026-03-15", "Other", "Bulk salt", 6.5),
];

/// (date, purpose, amount, kind) demo withdrawals.
const DEMO_WITHDRAWALS: &[(&str, &str, f64, &str)] = &[
    ("2026-03-10", "School fees advance", 150.0, "withdrawal"),
    ("2026-03-18", "Partial payback", 50.0, "repayment"),
];

/// (date, product, quantity, price, reason) demo losses.
const DEMO_LOSSES: &[(&str, &str, i64, f64, &str)] = &[
    ("2026-03-07", "Caramel Popcorn", 4, 7.5, "spoiled"),
    ("2026-03-14", "Classic Popcorn", 6, 5.0, "shared"),
];

/// (name, contact, location, description) demo customers.
const DEMO_CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("Ama Serwaa", "024-555-0199", "Osu, Accra", "Weekly bulk order"),
    ("Kofi Mensah", "020-555-0032", "Tema", "Office snack runs"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./starpops_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Star Pops Books Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./starpops_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Star Pops Books Seed Data Generator");
    println!("======================================");
    println!("Database: {}", db_path);
    println!();

    let store = RowStore::open(StoreConfig::new(&db_path)).await?;
    let ledger = Ledger::new(store);

    println!("✓ Store opened");

    // Skip seeding a database that already has books
    let existing = ledger.sales().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating records...");

    let scheme = SplitScheme::payroll_v3();
    let mut generated = 0;

    // Three weeks of March, one sale per employee per day
    for day in 1..=21u32 {
        for (which, employee) in EMPLOYEES.iter().enumerate() {
            let (product, price) = PRODUCTS[(day as usize + which) % PRODUCTS.len()];
            let quantity = 4.0 + (day % 5) as f64 * 2.0;
            let event = if day % 7 == 6 {
                Some("Saturday Market".to_string())
            } else {
                None
            };

            let sale = build_sale(
                RawSaleInput {
                    date: format!("2026-03-{day:02}"),
                    employee: employee.to_string(),
                    product: product.to_string(),
                    quantity,
                    price,
                    event,
                },
                &scheme,
            )?;
            ledger.add_sale(&sale).await?;
            generated += 1;
        }
    }
    println!("  {} sales", generated);

    for expense in demo_expenses()? {
        ledger.add_expense(&expense).await?;
    }
    println!("  {} expenses", DEMO_EXPENSES.len());

    for withdrawal in demo_withdrawals()? {
        ledger.add_withdrawal(&withdrawal).await?;
    }
    println!("  {} withdrawals", DEMO_WITHDRAWALS.len());

    for loss in demo_losses()? {
        ledger.add_loss(&loss).await?;
    }
    println!("  {} losses", DEMO_LOSSES.len());

    for customer in demo_customers()? {
        ledger.add_customer(&customer).await?;
    }
    println!("  {} customers", DEMO_CUSTOMERS.len());

    // Read everything back and summarize: proves the codec round-trips
    println!();
    println!("Verifying...");
    let snapshot = ledger.snapshot().await?;
    let summary = summarize(
        &snapshot.sales,
        &snapshot.expenses,
        &snapshot.withdrawals,
        &SummaryPolicy::default(),
    );

    info!(
        sales = snapshot.sales.len(),
        expenses = snapshot.expenses.len(),
        "Snapshot loaded"
    );

    println!("  Total sales:     GHS {}", summary.total_sales);
    println!("  Total expenses:  GHS {}", summary.total_expenses);
    println!("  Net profit:      GHS {}", summary.net_profit);
    println!("  Cash balance:    GHS {}", summary.cash);
    println!("  Loss exposure:   GHS {}", total_losses(&snapshot.losses));
    for bucket in &summary.bucket_totals {
        println!("    {:>18}: GHS {}", bucket.name, bucket.amount);
    }
    println!("  Customers:       {}", ledger.customers().await?.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

// =============================================================================
// Demo Record Builders
// =============================================================================
// Every table above goes through the real validators, so a typo in the demo
// data fails loudly here instead of half-seeding the database.

fn demo_expenses() -> ValidationResult<Vec<Expense>> {
    DEMO_EXPENSES
        .iter()
        .map(|(date, category, description, amount)| {
            build_expense(RawExpenseInput {
                date: date.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                amount: *amount,
            })
        })
        .collect()
}

fn demo_withdrawals() -> ValidationResult<Vec<Withdrawal>> {
    DEMO_WITHDRAWALS
        .iter()
        .map(|(date, purpose, amount, kind)| {
            build_withdrawal(RawWithdrawalInput {
                date: date.to_string(),
                purpose: purpose.to_string(),
                amount: *amount,
                kind: kind.to_string(),
            })
        })
        .collect()
}

fn demo_losses() -> ValidationResult<Vec<Loss>> {
    DEMO_LOSSES
        .iter()
        .map(|(date, product, quantity, price, reason)| {
            build_loss(RawLossInput {
                date: date.to_string(),
                product: product.to_string(),
                quantity: *quantity,
                price: *price,
                reason: reason.to_string(),
            })
        })
        .collect()
}

fn demo_customers() -> ValidationResult<Vec<Customer>> {
    DEMO_CUSTOMERS
        .iter()
        .map(|(name, contact, location, description)| {
            build_customer(RawCustomerInput {
                name: name.to_string(),
                contact: contact.to_string(),
                location: location.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
