//! # accountech-entry: Voucher Entry Session for AccounTech
//!
//! The operation layer between the browser frontend and the voucher
//! engine. It owns the live draft, binds the active company, and
//! orchestrates reads and saves against the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AccounTech Request Flow                              │
//! │                                                                         │
//! │  Frontend (browser)                                                     │
//! │       │  invoke('set_debit', { index, amount })                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                accountech-entry (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐         ┌────────────────┐                │   │
//! │  │   │  EntrySession  │         │    ApiError    │                │   │
//! │  │   │  (session.rs)  │         │   (error.rs)   │                │   │
//! │  │   │                │         │                │                │   │
//! │  │   │ company + draft│         │ code + message │                │   │
//! │  │   └───────┬────────┘         └────────────────┘                │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              │                                                          │
//! │      ┌───────┴────────┐                                                 │
//! │      ▼                ▼                                                 │
//! │  accountech-core   accountech-db                                        │
//! │  (pure logic)      (SQLite)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use accountech_db::{Database, DbConfig};
//! use accountech_entry::EntrySession;
//!
//! let db = Database::new(DbConfig::new("./books.db")).await?;
//! let mut session = EntrySession::new(db);
//! session.bind_company(company);
//!
//! session.select_voucher_type(VoucherType::Journal).await?;
//! session.set_line_ledger(0, "rent-ledger")?;
//! session.set_debit(0, Money::from_rupees(500))?;
//! session.set_line_ledger(1, "bank-ledger")?;
//! session.set_credit(1, Money::from_rupees(500))?;
//! let voucher = session.save_voucher().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, ErrorCode};
pub use session::EntrySession;
