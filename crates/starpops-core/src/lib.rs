//! # starpops-core: Pure Business Logic for Star Pops Books
//!
//! This crate is the **heart** of Star Pops Books. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Star Pops Books Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Callers (forms, scripts)                    │   │
//! │  │    Sale entry ──► Expense entry ──► Dashboards ──► CSV export   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ starpops-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  scheme   │  │  builder  │  │   │
//! │  │   │   Sale    │  │   Money   │  │SplitScheme│  │ buildSale │  │   │
//! │  │   │  Expense  │  │   Rate    │  │  split()  │  │  et al.   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │  summary  │  │  export   │  │ validation│                 │   │
//! │  │   │ summarize │  │    CSV    │  │   rules   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 starpops-store (Persistence Layer)              │   │
//! │  │          SQLite row store, codec, ledger repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Sale, Expense, Withdrawal, Loss, summaries)
//! - [`money`] - Money and Rate types with integer arithmetic (no floating point!)
//! - [`scheme`] - Configurable percentage split schemes
//! - [`builder`] - Raw input → validated record construction
//! - [`summary`] - Aggregation into financial summaries and rollups
//! - [`export`] - CSV report rendering
//! - [`validation`] - Field-level business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Stored Splits**: A sale keeps the allocation it was recorded under forever;
//!    aggregation never re-derives bucket amounts from totals
//!
//! ## Example Usage
//!
//! ```rust
//! use starpops_core::money::Money;
//! use starpops_core::scheme::SplitScheme;
//!
//! // 63/12/6.944/6.944/5.556/5.556 partition of a 50.00 sale
//! let scheme = SplitScheme::payroll_v3();
//! let split = scheme.split(Money::from_cents(5000));
//!
//! assert_eq!(split[0].name, "productionCost");
//! assert_eq!(split[0].amount.cents(), 3150);
//!
//! // Every cent lands somewhere deterministic
//! let allocated: Money = split.iter().map(|b| b.amount).sum();
//! assert!(allocated.cents() <= 5000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod error;
pub mod export;
pub mod money;
pub mod scheme;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use starpops_core::Money` instead of
// `use starpops_core::money::Money`

pub use error::{CoreError, SchemeError, ValidationError};
pub use money::{Money, Rate};
pub use scheme::{compute_split, Bucket, BucketAmount, BucketRole, SplitScheme};
pub use summary::{summarize, SummaryPolicy};
pub use types::*;
