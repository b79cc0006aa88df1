//! # Domain Types
//!
//! Core domain types used throughout AccounTech.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   VoucherType   │   │     Ledger      │   │   StockItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Sales          │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  Purchase       │   │  name           │   │  name           │       │
//! │  │  Receipt        │   │  current_balance│   │  rate           │       │
//! │  │  Payment        │   │  group_name     │   │  hsn_code       │       │
//! │  │  Journal        │   │  group_type     │   │  unit_symbol    │       │
//! │  │  Contra         │   └─────────────────┘   └─────────────────┘       │
//! │  │  DebitNote      │                                                   │
//! │  │  CreditNote     │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └───────┬─────────┘   │     Godown      │   │ VoucherSummary  │       │
//! │          │             │  ─────────────  │   │  ─────────────  │       │
//! │          ▼             │  id, name       │   │  recent-history │       │
//! │  VoucherTypeDescriptor │  address        │   │  row for the UI │       │
//! │  (has_party/stock/tax) └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly eight voucher types exist; their section flags are static
//! configuration, not data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::VoucherError;
use crate::money::Money;

// =============================================================================
// Entry Mode
// =============================================================================

/// How a stock-capable voucher is being entered.
///
/// `ItemInvoice` shows the stock grid; `VoucherMode` hides it and the
/// voucher is pure accounting lines. Types without stock support are
/// permanently in `VoucherMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// Stock line items are entered; totals carry a stock total and tax.
    ItemInvoice,
    /// Accounting lines only.
    VoucherMode,
}

// =============================================================================
// Counter Ledger Role
// =============================================================================

/// Which ledger the voucher's single counter-ledger slot holds.
///
/// Receipt and payment vouchers post against a cash or bank ledger;
/// every other type posts against a sales/purchase-style account. The
/// role is decided by the voucher type, never by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CounterLedgerRole {
    CashBank,
    SalesAccount,
}

// =============================================================================
// Voucher Type
// =============================================================================

/// The eight voucher types of the system.
///
/// ## Dual Representation
/// Each variant has a stable string code (`"debit_note"`) used in the
/// store and on the wire, and a static [`VoucherTypeDescriptor`] carrying
/// its section flags. Unknown codes are a configuration fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    Sales,
    Purchase,
    Receipt,
    Payment,
    Journal,
    Contra,
    DebitNote,
    CreditNote,
}

/// Static policy record for one voucher type.
///
/// Reports which optional sections apply and the defaults that flow from
/// the type. One descriptor per type, fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct VoucherTypeDescriptor {
    /// Stable identifier string, unique across the set.
    pub code: &'static str,
    /// First two letters of the code, upper-cased; seeds generated numbers.
    pub prefix: &'static str,
    /// Whether a counterparty ledger is required.
    pub has_party: bool,
    /// Whether stock line items may be attached.
    pub has_stock: bool,
    /// Whether the flat-rate tax estimate block applies.
    pub has_tax: bool,
    /// Starting entry mode; fixed when `has_stock` is false.
    pub default_mode: EntryMode,
    /// Minimum accounting line count (2 for a balanced journal pair).
    pub min_lines: usize,
}

/// One descriptor per type. `has_stock` and `has_tax` track each other
/// today, but they are separate flags so a tax-free stock type can exist.
static DESCRIPTORS: [VoucherTypeDescriptor; 8] = [
    VoucherTypeDescriptor {
        code: "sales",
        prefix: "SA",
        has_party: true,
        has_stock: true,
        has_tax: true,
        default_mode: EntryMode::ItemInvoice,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "purchase",
        prefix: "PU",
        has_party: true,
        has_stock: true,
        has_tax: true,
        default_mode: EntryMode::ItemInvoice,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "receipt",
        prefix: "RE",
        has_party: true,
        has_stock: false,
        has_tax: false,
        default_mode: EntryMode::VoucherMode,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "payment",
        prefix: "PA",
        has_party: true,
        has_stock: false,
        has_tax: false,
        default_mode: EntryMode::VoucherMode,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "journal",
        prefix: "JO",
        has_party: false,
        has_stock: false,
        has_tax: false,
        default_mode: EntryMode::VoucherMode,
        min_lines: 2,
    },
    VoucherTypeDescriptor {
        code: "contra",
        prefix: "CO",
        has_party: false,
        has_stock: false,
        has_tax: false,
        default_mode: EntryMode::VoucherMode,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "debit_note",
        prefix: "DE",
        has_party: true,
        has_stock: true,
        has_tax: true,
        default_mode: EntryMode::ItemInvoice,
        min_lines: 1,
    },
    VoucherTypeDescriptor {
        code: "credit_note",
        prefix: "CR",
        has_party: true,
        has_stock: true,
        has_tax: true,
        default_mode: EntryMode::ItemInvoice,
        min_lines: 1,
    },
];

impl VoucherType {
    /// All eight voucher types in declaration order.
    pub const ALL: [VoucherType; 8] = [
        VoucherType::Sales,
        VoucherType::Purchase,
        VoucherType::Receipt,
        VoucherType::Payment,
        VoucherType::Journal,
        VoucherType::Contra,
        VoucherType::DebitNote,
        VoucherType::CreditNote,
    ];

    /// Returns the static descriptor for this type.
    pub fn descriptor(&self) -> &'static VoucherTypeDescriptor {
        &DESCRIPTORS[*self as usize]
    }

    /// Returns the stable code string (e.g., `"debit_note"`).
    pub fn code(&self) -> &'static str {
        self.descriptor().code
    }

    /// Resolves a code string to a voucher type.
    ///
    /// ## Errors
    /// `VoucherError::UnknownVoucherType` for anything outside the eight
    /// known codes.
    pub fn from_code(code: &str) -> Result<Self, VoucherError> {
        VoucherType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| VoucherError::UnknownVoucherType(code.to_string()))
    }

    /// Whether a counterparty ledger is required.
    #[inline]
    pub fn has_party(&self) -> bool {
        self.descriptor().has_party
    }

    /// Whether stock line items may be attached.
    #[inline]
    pub fn has_stock(&self) -> bool {
        self.descriptor().has_stock
    }

    /// Whether the flat-rate tax estimate block applies.
    #[inline]
    pub fn has_tax(&self) -> bool {
        self.descriptor().has_tax
    }

    /// Starting entry mode for a fresh draft of this type.
    #[inline]
    pub fn default_mode(&self) -> EntryMode {
        self.descriptor().default_mode
    }

    /// Number prefix (first two letters of the code, upper-cased).
    #[inline]
    pub fn prefix(&self) -> &'static str {
        self.descriptor().prefix
    }

    /// Minimum accounting line count for this type.
    #[inline]
    pub fn min_lines(&self) -> usize {
        self.descriptor().min_lines
    }

    /// Role of the single counter-ledger slot for this type.
    pub fn counter_ledger_role(&self) -> CounterLedgerRole {
        match self {
            VoucherType::Receipt | VoucherType::Payment => CounterLedgerRole::CashBank,
            _ => CounterLedgerRole::SalesAccount,
        }
    }
}

/// Displays as the stable code string.
impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VoucherType {
    type Err = VoucherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoucherType::from_code(s)
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// A selectable ledger account from the directory.
///
/// The engine only reads ledgers; it never mutates them. Lines reference
/// ledgers by id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Ledger {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Company this ledger belongs to.
    pub company_id: String,

    /// Display name shown in pickers, entry rows, and reports.
    pub name: String,

    /// Running balance in paise (positive = debit balance).
    pub current_balance: Money,

    /// Account group name (e.g., "Sundry Debtors").
    pub group_name: String,

    /// Account group classification (asset/liability/income/expense).
    pub group_type: String,

    /// Whether the ledger is selectable (soft delete).
    pub is_active: bool,
}

// =============================================================================
// Stock Item
// =============================================================================

/// A selectable inventory item from the directory.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Company this item belongs to.
    pub company_id: String,

    /// Display name.
    pub name: String,

    /// Default selling rate per unit, in paise.
    pub rate: Money,

    /// Current stock on hand, in the item's unit (fractional allowed).
    #[ts(as = "String")]
    pub current_stock: Decimal,

    /// HSN classification code, if assigned.
    pub hsn_code: Option<String>,

    /// Unit symbol shown next to quantities (e.g., "kg", "pcs").
    pub unit_symbol: String,

    /// Stock group name.
    pub group_name: Option<String>,

    /// Whether the item is selectable (soft delete).
    pub is_active: bool,
}

// =============================================================================
// Godown
// =============================================================================

/// A stock storage location.
///
/// Consulted only when the company has multi-godown tracking enabled.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Godown {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
}

// =============================================================================
// Voucher Summary
// =============================================================================

/// One row of the recent-voucher history shown beside the entry form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct VoucherSummary {
    pub id: String,
    pub voucher_number: String,
    pub voucher_type: VoucherType,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Grand total when a tax block applied, the voucher total otherwise.
    pub total_amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_eight_types_with_unique_codes() {
        let codes: Vec<&str> = VoucherType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), 8);
        let mut deduped = codes.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 8);
    }

    #[test]
    fn test_from_code_roundtrip() {
        for t in VoucherType::ALL {
            assert_eq!(VoucherType::from_code(t.code()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_code_is_configuration_error() {
        let err = VoucherType::from_code("invoice").unwrap_err();
        assert!(matches!(err, VoucherError::UnknownVoucherType(_)));
    }

    #[test]
    fn test_section_flags() {
        assert!(VoucherType::Sales.has_stock());
        assert!(VoucherType::Sales.has_tax());
        assert!(VoucherType::Sales.has_party());

        assert!(!VoucherType::Journal.has_stock());
        assert!(!VoucherType::Journal.has_party());
        assert!(!VoucherType::Contra.has_party());

        assert!(VoucherType::Receipt.has_party());
        assert!(!VoucherType::Receipt.has_stock());
    }

    #[test]
    fn test_default_mode_assignment() {
        for t in [
            VoucherType::Sales,
            VoucherType::Purchase,
            VoucherType::DebitNote,
            VoucherType::CreditNote,
        ] {
            assert_eq!(t.default_mode(), EntryMode::ItemInvoice);
        }
        for t in [
            VoucherType::Receipt,
            VoucherType::Payment,
            VoucherType::Journal,
            VoucherType::Contra,
        ] {
            assert_eq!(t.default_mode(), EntryMode::VoucherMode);
        }
    }

    #[test]
    fn test_prefixes_are_first_two_letters_uppercased() {
        assert_eq!(VoucherType::Sales.prefix(), "SA");
        assert_eq!(VoucherType::Payment.prefix(), "PA");
        assert_eq!(VoucherType::DebitNote.prefix(), "DE");
        assert_eq!(VoucherType::CreditNote.prefix(), "CR");
    }

    #[test]
    fn test_min_lines() {
        assert_eq!(VoucherType::Journal.min_lines(), 2);
        assert_eq!(VoucherType::Sales.min_lines(), 1);
    }

    #[test]
    fn test_counter_ledger_role() {
        assert_eq!(
            VoucherType::Receipt.counter_ledger_role(),
            CounterLedgerRole::CashBank
        );
        assert_eq!(
            VoucherType::Payment.counter_ledger_role(),
            CounterLedgerRole::CashBank
        );
        assert_eq!(
            VoucherType::Sales.counter_ledger_role(),
            CounterLedgerRole::SalesAccount
        );
    }

    #[test]
    fn test_descriptor_matches_accessors() {
        let d = VoucherType::Journal.descriptor();
        assert_eq!(d.code, "journal");
        assert_eq!(d.min_lines, 2);
        assert!(!d.has_tax);
    }
}
