//! # accountech-core: Pure Business Logic for AccounTech
//!
//! This crate is the **heart** of AccounTech. It contains the voucher
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AccounTech Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Voucher Form ──► Entry Grid ──► Stock Grid ──► Save          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    accountech-entry                             │   │
//! │  │    select_voucher_type, set_debit, save_voucher, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ accountech-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   draft   │  │ numbering │  │   │
//! │  │   │ VoucherTy │  │   Money   │  │  Voucher  │  │  SA0001   │  │   │
//! │  │   │  Ledger   │  │  TaxRate  │  │   Draft   │  │  format   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  accountech-db (Database Layer)                 │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (VoucherType, Ledger, StockItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`context`] - Explicit company/financial-year context
//! - [`draft`] - The live voucher draft: lines, stock entries, totals
//! - [`voucher`] - Finalized voucher records handed to the store
//! - [`numbering`] - Sequential voucher number generation
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use accountech_core::draft::VoucherDraft;
//! use accountech_core::money::Money;
//! use accountech_core::types::VoucherType;
//!
//! // A journal voucher starts with two empty lines
//! let mut draft = VoucherDraft::new(VoucherType::Journal);
//!
//! draft.set_line_ledger(0, "rent-ledger").unwrap();
//! draft.set_debit(0, Money::from_paise(50_000)).unwrap();
//! draft.set_line_ledger(1, "bank-ledger").unwrap();
//! draft.set_credit(1, Money::from_paise(50_000)).unwrap();
//!
//! let totals = draft.totals();
//! assert!(totals.is_balanced);
//! assert_eq!(totals.total_debit, Money::from_paise(50_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod context;
pub mod draft;
pub mod error;
pub mod money;
pub mod numbering;
pub mod types;
pub mod validation;
pub mod voucher;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use accountech_core::Money` instead of
// `use accountech_core::money::Money`

pub use context::CompanyContext;
pub use draft::{
    AmountLine, EntryLines, JournalLine, StockEntry, TaxBreakdown, TaxPolicy, VoucherDraft,
    VoucherTotals,
};
pub use error::{ValidationError, VoucherError, VoucherResult};
pub use money::{Money, TaxRate};
pub use numbering::next_voucher_number;
pub use types::*;
pub use voucher::{Voucher, VoucherLine, VoucherStockLine};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Standard GST rate in basis points (18%), split evenly into CGST and SGST.
///
/// ## Why a constant?
/// The flat rate is an illustrative placeholder policy, not a compliance
/// engine. It lives in one place so a per-item tax table can replace it
/// without touching the totals code.
pub const STANDARD_TAX_RATE_BPS: u32 = 1800;

/// Maximum accounting lines allowed on a single voucher
///
/// ## Business Reason
/// Prevents runaway drafts and ensures reasonable transaction sizes.
/// Can be made configurable per-company in future versions.
pub const MAX_VOUCHER_LINES: usize = 100;

/// Maximum stock lines allowed on a single voucher
pub const MAX_STOCK_LINES: usize = 100;

/// Zero-padding width for generated voucher numbers (SA0001)
pub const NUMBER_PAD_WIDTH: usize = 4;
