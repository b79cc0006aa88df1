//! # accountech-db: Database Layer for AccounTech
//!
//! This crate provides database access for the AccounTech voucher engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AccounTech Data Flow                               │
//! │                                                                         │
//! │  Entry session (save_voucher)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   accountech-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (voucher.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ LedgerRepo    │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ StockRepo     │    │              │  │   │
//! │  │   │ Management    │    │ VoucherRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (per company)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (ledger, stock, voucher)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use accountech_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/books.db");
//! let db = Database::new(config).await?;
//!
//! let ledgers = db.ledgers().list_active("company-id").await?;
//! let last = db.vouchers().last_number("company-id", VoucherType::Sales).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::godown::GodownRepository;
pub use repository::ledger::LedgerRepository;
pub use repository::stock::StockRepository;
pub use repository::voucher::VoucherRepository;
