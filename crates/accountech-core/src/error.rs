//! # Error Types
//!
//! Domain-specific error types for accountech-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  accountech-core errors (this file)                                    │
//! │  ├── VoucherError     - Draft rule violations, balance failures        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  accountech-db errors (separate crate)                                 │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  Session API errors (accountech-entry)                                 │
//! │  └── ApiError         - What the browser sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → VoucherError → DbError → ApiError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, indexes, type codes)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use chrono::NaiveDate;
use thiserror::Error;

use crate::money::Money;
use crate::types::VoucherType;

// =============================================================================
// Voucher Error
// =============================================================================

/// Voucher engine errors.
///
/// These errors represent business rule violations in the draft or at
/// finalization. They should be caught and translated to user-facing
/// notifications; only `UnknownVoucherType` is a configuration fault.
#[derive(Debug, Error)]
pub enum VoucherError {
    /// Voucher type code is not one of the eight known codes.
    ///
    /// ## When This Occurs
    /// Only with unvalidated input at the boundary. The eight codes are
    /// static configuration, so this is fatal rather than recoverable.
    #[error("Unknown voucher type code: {0}")]
    UnknownVoucherType(String),

    /// Journal debits and credits do not balance.
    ///
    /// ## User Workflow
    /// ```text
    /// Save journal voucher
    ///      │
    ///      ▼
    /// totals: debit ₹500.00, credit ₹300.00
    ///      │
    ///      ▼
    /// Unbalanced { difference: ₹200.00 }
    ///      │
    ///      ▼
    /// UI shows: "debit ₹500.00 ≠ credit ₹300.00 (difference ₹200.00)"
    /// ```
    #[error("Journal is unbalanced: debit {total_debit}, credit {total_credit} (difference {difference})")]
    Unbalanced {
        total_debit: Money,
        total_credit: Money,
        difference: Money,
    },

    /// Removing this line would drop below the type's minimum.
    #[error("A {voucher_type} voucher requires at least {min} accounting line(s)")]
    MinimumLines { voucher_type: VoucherType, min: usize },

    /// Accounting line index does not exist.
    #[error("No accounting line at index {index}")]
    LineOutOfRange { index: usize },

    /// Stock line index does not exist.
    #[error("No stock line at index {index}")]
    StockLineOutOfRange { index: usize },

    /// Quantity times rate does not fit in an i64 paise amount.
    ///
    /// ## When This Occurs
    /// An absurd quantity or rate on a stock line. The offending setter
    /// leaves the line unchanged, so the user just corrects the input.
    #[error("Stock line {index}: amount is out of range")]
    AmountOutOfRange { index: usize },

    /// Debit/credit setters were used on a single-amount voucher.
    #[error("A {voucher_type} voucher uses a single amount per line")]
    SingleAmountLines { voucher_type: VoucherType },

    /// The amount setter was used on a journal voucher.
    #[error("A {voucher_type} voucher uses explicit debit and credit lines")]
    ExplicitSidedLines { voucher_type: VoucherType },

    /// Stock lines are not available for this voucher type or mode.
    #[error("Stock lines do not apply to a {voucher_type} voucher in the current mode")]
    StockNotApplicable { voucher_type: VoucherType },

    /// The entry mode cannot be changed for this voucher type.
    #[error("Entry mode is fixed for a {voucher_type} voucher")]
    ModeFixed { voucher_type: VoucherType },

    /// A counterparty ledger does not apply to this voucher type.
    #[error("A party ledger does not apply to a {voucher_type} voucher")]
    PartyNotApplicable { voucher_type: VoucherType },

    /// Place of supply applies to stock vouchers only.
    #[error("Place of supply does not apply to a {voucher_type} voucher")]
    PlaceOfSupplyNotApplicable { voucher_type: VoucherType },

    /// Voucher has exceeded maximum allowed accounting lines.
    #[error("A voucher cannot have more than {max} accounting lines")]
    TooManyLines { max: usize },

    /// Voucher has exceeded maximum allowed stock lines.
    #[error("A voucher cannot have more than {max} stock lines")]
    TooManyStockLines { max: usize },

    /// Voucher number is blank at save time.
    ///
    /// ## When This Occurs
    /// The number lookup failed at draft creation (left blank for manual
    /// entry) and the user saved without filling it in.
    #[error("Voucher number is required")]
    NumberRequired,

    /// An accounting line has no ledger selected.
    #[error("Accounting line {index} has no ledger selected")]
    LedgerRequired { index: usize },

    /// Voucher date falls outside the active financial year.
    #[error("Voucher date {date} is outside the financial year {fy_start} to {fy_end}")]
    DateOutsideFinancialYear {
        date: NaiveDate,
        fy_start: NaiveDate,
        fy_end: NaiveDate,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the draft is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid state code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VoucherError.
pub type VoucherResult<T> = Result<T, VoucherError>;

// =============================================================================
// Unit Tests
// =============================================================================
