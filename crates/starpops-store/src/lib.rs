//! # starpops-store: Persistence Layer for Star Pops Books
//!
//! This crate persists the books for the Star Pops tracker. It uses SQLite
//! as an append-only row store with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Star Pops Books Data Flow                           │
//! │                                                                         │
//! │  Caller (form handler, report script, seed binary)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 starpops-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   RowStore    │    │    Ledger     │    │    codec     │  │   │
//! │  │   │  (store.rs)   │    │  (ledger.rs)  │    │  (codec.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ add_sale      │───►│ sale_to_row  │  │   │
//! │  │   │ append_rows   │    │ sales         │    │ row_to_sale  │  │   │
//! │  │   │ read_rows     │    │ snapshot      │    │ ...          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │        one `rows` table, one collection per record kind         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Connection pool and raw append/read row API
//! - [`codec`] - Record ↔ canonical row conversion
//! - [`ledger`] - Typed repository over the row store
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use starpops_store::{Ledger, RowStore, StoreConfig};
//!
//! let store = RowStore::open(StoreConfig::new("books.db")).await?;
//! let ledger = Ledger::new(store);
//!
//! ledger.add_sale(&sale).await?;
//! let snapshot = ledger.snapshot().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod ledger;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use ledger::{Ledger, LedgerSnapshot};
pub use store::{RowFields, RowStore, StoreConfig};
