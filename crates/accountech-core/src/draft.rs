//! # Voucher Draft
//!
//! The live, in-memory voucher being entered: header fields, accounting
//! lines, optional stock lines, and the derived totals.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Lifecycle                                      │
//! │                                                                         │
//! │  Select voucher type ───► VoucherDraft::new(t)                         │
//! │                              │ seeds min_lines empty lines             │
//! │                              ▼                                          │
//! │  Every field mutation ───► setter ───► totals() recomputed             │
//! │                              │                                          │
//! │  Switch type ────────────► reset_for_type(t') (reseed, clear stock)    │
//! │                              │                                          │
//! │  Save ───────────────────► finalize(&ctx) (voucher.rs)                 │
//! │                              ├── Ok: draft reset to fresh default      │
//! │                              └── Err: draft untouched, stays editable  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Shapes
//! Rather than one line struct with mode-dependent fields, the line
//! shape is a tagged union, fixed at construction by the voucher type:
//!
//! - `EntryLines::Journal` - independent debit and credit per line,
//!   mutually exclusive within the line. Balance must be proven.
//! - `EntryLines::Single` - one amount per line that mirrors both sides,
//!   so the voucher is balanced by construction.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{VoucherError, VoucherResult};
use crate::money::{Money, TaxRate};
use crate::types::{EntryMode, VoucherType};
use crate::{MAX_STOCK_LINES, MAX_VOUCHER_LINES, STANDARD_TAX_RATE_BPS};

// =============================================================================
// Tax Policy
// =============================================================================

/// The flat-rate tax estimate policy.
///
/// ## Placeholder, Not Compliance
/// The deployed product shows an indicative tax block on stock invoices
/// at a single flat rate split evenly into CGST and SGST halves. A real
/// tax engine would derive rates from item and jurisdiction tables; this
/// policy is named and configurable so that engine can slot in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxPolicy {
    /// Combined rate in basis points (1800 = 18%).
    pub rate: TaxRate,
}

impl TaxPolicy {
    /// Policy at an explicit combined rate.
    pub const fn new(rate: TaxRate) -> Self {
        TaxPolicy { rate }
    }

    /// Computes the tax block for a stock total.
    ///
    /// Each half is rounded independently; the total is the sum of the
    /// halves so the displayed components always add up.
    pub fn breakdown(&self, stock_total: Money) -> TaxBreakdown {
        let half = self.rate.halved();
        let cgst = stock_total.calculate_tax(half);
        let sgst = stock_total.calculate_tax(half);
        let total_tax = cgst + sgst;
        TaxBreakdown {
            cgst,
            sgst,
            total_tax,
            grand_total: stock_total + total_tax,
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::new(TaxRate::from_bps(STANDARD_TAX_RATE_BPS))
    }
}

/// The computed tax block shown under the stock total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub total_tax: Money,
    pub grand_total: Money,
}

// =============================================================================
// Accounting Lines
// =============================================================================

/// One line of a journal voucher: independent debit and credit sides.
///
/// ## Invariant
/// `debit` and `credit` are never both positive on the same line. The
/// setters enforce this: giving one side a positive value zeroes the
/// other side of the SAME line (never other lines).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalLine {
    pub ledger_id: Option<String>,
    pub debit: Money,
    pub credit: Money,
    pub narration: Option<String>,
}

impl JournalLine {
    /// Sets the debit side; a positive debit zeroes this line's credit.
    pub fn set_debit(&mut self, amount: Money) {
        if amount.is_positive() {
            self.credit = Money::zero();
        }
        self.debit = amount;
    }

    /// Sets the credit side; a positive credit zeroes this line's debit.
    pub fn set_credit(&mut self, amount: Money) {
        if amount.is_positive() {
            self.debit = Money::zero();
        }
        self.credit = amount;
    }
}

/// One line of a non-journal voucher: a single amount that contributes
/// equally to the debit and credit totals, making the voucher balanced
/// by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AmountLine {
    pub ledger_id: Option<String>,
    pub amount: Money,
    pub narration: Option<String>,
}

/// The accounting lines of a draft, shaped by the voucher type.
///
/// The variant is decided once at construction (spec'd as a tagged
/// union) so per-field access never re-checks the type.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum EntryLines {
    Journal { lines: Vec<JournalLine> },
    Single { lines: Vec<AmountLine> },
}

impl EntryLines {
    /// Seeds the minimum line count for a voucher type.
    fn seeded(voucher_type: VoucherType) -> Self {
        let min = voucher_type.min_lines();
        match voucher_type {
            VoucherType::Journal => EntryLines::Journal {
                lines: vec![JournalLine::default(); min],
            },
            _ => EntryLines::Single {
                lines: vec![AmountLine::default(); min],
            },
        }
    }

    /// Number of accounting lines.
    pub fn len(&self) -> usize {
        match self {
            EntryLines::Journal { lines } => lines.len(),
            EntryLines::Single { lines } => lines.len(),
        }
    }

    /// True when no lines remain (only transiently possible mid-reset).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// One stock line: item reference, quantity, rate, and the derived amount.
///
/// ## Derived Amount
/// `amount = quantity × rate`, rounded half-up to the paise, recomputed
/// whenever quantity or rate changes. There is deliberately no public
/// amount setter; the field is read-only to callers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockEntry {
    pub stock_item_id: Option<String>,
    /// Item name snapshot for the entry grid (frozen at selection).
    pub item_name: Option<String>,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub rate: Money,
    pub amount: Money,
    /// Present only when the company tracks multiple godowns.
    pub godown_id: Option<String>,
}

impl Default for StockEntry {
    fn default() -> Self {
        StockEntry {
            stock_item_id: None,
            item_name: None,
            quantity: Decimal::ZERO,
            rate: Money::zero(),
            amount: Money::zero(),
            godown_id: None,
        }
    }
}

/// Derives a stock line amount from quantity and rate.
///
/// Rounds half up to the paise, matching [`Money::calculate_tax`].
/// Returns `None` when the product does not fit in an i64 paise amount.
fn derive_amount(quantity: Decimal, rate: Money) -> Option<Money> {
    quantity
        .checked_mul(Decimal::from(rate.paise()))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(Money::from_paise)
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals, recomputed after every mutation.
///
/// Returned by [`VoucherDraft::totals`] so callers get the fresh numbers
/// without any UI refresh machinery in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherTotals {
    pub total_debit: Money,
    pub total_credit: Money,
    /// Amounts are integer paise, so balance is exact equality; the
    /// floating-point tolerance of the original UI is not needed.
    pub is_balanced: bool,
    /// Absolute debit/credit difference (zero when balanced).
    pub difference: Money,
    /// Sum of stock line amounts; zero outside item-invoice mode.
    pub stock_total: Money,
    /// Present only for tax-capable types with a positive stock total.
    pub tax: Option<TaxBreakdown>,
}

// =============================================================================
// Voucher Draft
// =============================================================================

/// The mutable voucher being entered.
///
/// ## Ownership
/// The draft owns its lines and stock entries (destroyed together when
/// unsaved). Ledgers, stock items, and godowns are referenced by id and
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherDraft {
    pub voucher_type: VoucherType,
    pub mode: EntryMode,

    /// Auto-populated, user-overridable; may be blank when the store
    /// lookup failed (filled manually before save).
    pub voucher_number: String,

    #[ts(as = "String")]
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub narration: Option<String>,

    /// Counterparty ledger, set only when the type has a party section.
    pub party_ledger_id: Option<String>,
    pub party_name: Option<String>,

    /// The sales/purchase account or the cash/bank ledger, depending on
    /// the type (see [`VoucherType::counter_ledger_role`]).
    pub counter_ledger_id: Option<String>,

    /// Destination state code for tax routing; stock vouchers only.
    pub place_of_supply: Option<String>,

    pub lines: EntryLines,
    pub stock_entries: Vec<StockEntry>,

    pub tax_policy: TaxPolicy,
}

impl VoucherDraft {
    /// Creates a fresh draft for a voucher type.
    ///
    /// Lines are seeded to the type's minimum (2 for journal, else 1),
    /// stock entries start empty, the date defaults to today, and the
    /// number is blank until the session fills it from the store.
    pub fn new(voucher_type: VoucherType) -> Self {
        VoucherDraft {
            voucher_type,
            mode: voucher_type.default_mode(),
            voucher_number: String::new(),
            date: Utc::now().date_naive(),
            reference: None,
            narration: None,
            party_ledger_id: None,
            party_name: None,
            counter_ledger_id: None,
            place_of_supply: None,
            lines: EntryLines::seeded(voucher_type),
            stock_entries: Vec::new(),
            tax_policy: TaxPolicy::default(),
        }
    }

    /// Resets the draft for a (possibly different) voucher type.
    ///
    /// Lines and stock entries are cleared and re-seeded, the mode drops
    /// back to the type default, and header fields are blanked. The
    /// session follows this with number regeneration.
    pub fn reset_for_type(&mut self, voucher_type: VoucherType) {
        let tax_policy = self.tax_policy;
        *self = VoucherDraft::new(voucher_type);
        self.tax_policy = tax_policy;
    }

    // -------------------------------------------------------------------------
    // Header mutation
    // -------------------------------------------------------------------------

    /// Switches between item-invoice and voucher mode.
    ///
    /// ## Errors
    /// `ModeFixed` for types without stock support. Switching away from
    /// item-invoice clears the stock grid.
    pub fn set_mode(&mut self, mode: EntryMode) -> VoucherResult<()> {
        if !self.voucher_type.has_stock() {
            return Err(VoucherError::ModeFixed {
                voucher_type: self.voucher_type,
            });
        }
        if mode == EntryMode::VoucherMode {
            self.stock_entries.clear();
        }
        self.mode = mode;
        Ok(())
    }

    /// Sets the counterparty ledger and its display name.
    pub fn set_party(
        &mut self,
        ledger_id: impl Into<String>,
        name: impl Into<String>,
    ) -> VoucherResult<()> {
        if !self.voucher_type.has_party() {
            return Err(VoucherError::PartyNotApplicable {
                voucher_type: self.voucher_type,
            });
        }
        self.party_ledger_id = Some(ledger_id.into());
        self.party_name = Some(name.into());
        Ok(())
    }

    /// Sets the counter ledger (sales/purchase account or cash/bank).
    pub fn set_counter_ledger(&mut self, ledger_id: impl Into<String>) {
        self.counter_ledger_id = Some(ledger_id.into());
    }

    /// Sets the place-of-supply state code.
    pub fn set_place_of_supply(&mut self, state_code: impl Into<String>) -> VoucherResult<()> {
        if !self.voucher_type.has_stock() {
            return Err(VoucherError::PlaceOfSupplyNotApplicable {
                voucher_type: self.voucher_type,
            });
        }
        self.place_of_supply = Some(state_code.into());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accounting line mutation
    // -------------------------------------------------------------------------

    /// Appends an empty accounting line.
    pub fn add_line(&mut self) -> VoucherResult<()> {
        if self.lines.len() >= MAX_VOUCHER_LINES {
            return Err(VoucherError::TooManyLines {
                max: MAX_VOUCHER_LINES,
            });
        }
        match &mut self.lines {
            EntryLines::Journal { lines } => lines.push(JournalLine::default()),
            EntryLines::Single { lines } => lines.push(AmountLine::default()),
        }
        Ok(())
    }

    /// Removes an accounting line.
    ///
    /// ## Errors
    /// `MinimumLines` when removal would drop below the type's minimum
    /// (2 for journal, 1 otherwise).
    pub fn remove_line(&mut self, index: usize) -> VoucherResult<()> {
        let min = self.voucher_type.min_lines();
        if self.lines.len() <= min {
            return Err(VoucherError::MinimumLines {
                voucher_type: self.voucher_type,
                min,
            });
        }
        match &mut self.lines {
            EntryLines::Journal { lines } => {
                if index >= lines.len() {
                    return Err(VoucherError::LineOutOfRange { index });
                }
                lines.remove(index);
            }
            EntryLines::Single { lines } => {
                if index >= lines.len() {
                    return Err(VoucherError::LineOutOfRange { index });
                }
                lines.remove(index);
            }
        }
        Ok(())
    }

    /// Sets the ledger reference on a line.
    pub fn set_line_ledger(&mut self, index: usize, ledger_id: impl Into<String>) -> VoucherResult<()> {
        let ledger_id = Some(ledger_id.into());
        match &mut self.lines {
            EntryLines::Journal { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.ledger_id = ledger_id;
            }
            EntryLines::Single { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.ledger_id = ledger_id;
            }
        }
        Ok(())
    }

    /// Sets the per-line narration.
    pub fn set_line_narration(&mut self, index: usize, text: impl Into<String>) -> VoucherResult<()> {
        let text = Some(text.into());
        match &mut self.lines {
            EntryLines::Journal { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.narration = text;
            }
            EntryLines::Single { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.narration = text;
            }
        }
        Ok(())
    }

    /// Sets the single amount on a non-journal line.
    pub fn set_amount(&mut self, index: usize, amount: Money) -> VoucherResult<()> {
        match &mut self.lines {
            EntryLines::Single { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.amount = amount;
                Ok(())
            }
            EntryLines::Journal { .. } => Err(VoucherError::ExplicitSidedLines {
                voucher_type: self.voucher_type,
            }),
        }
    }

    /// Sets the debit side of a journal line (zeroing its credit when
    /// positive).
    pub fn set_debit(&mut self, index: usize, amount: Money) -> VoucherResult<()> {
        match &mut self.lines {
            EntryLines::Journal { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.set_debit(amount);
                Ok(())
            }
            EntryLines::Single { .. } => Err(VoucherError::SingleAmountLines {
                voucher_type: self.voucher_type,
            }),
        }
    }

    /// Sets the credit side of a journal line (zeroing its debit when
    /// positive).
    pub fn set_credit(&mut self, index: usize, amount: Money) -> VoucherResult<()> {
        match &mut self.lines {
            EntryLines::Journal { lines } => {
                let line = lines
                    .get_mut(index)
                    .ok_or(VoucherError::LineOutOfRange { index })?;
                line.set_credit(amount);
                Ok(())
            }
            EntryLines::Single { .. } => Err(VoucherError::SingleAmountLines {
                voucher_type: self.voucher_type,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Stock line mutation
    // -------------------------------------------------------------------------

    /// Confirms the stock grid is usable right now.
    fn ensure_stock_applicable(&self) -> VoucherResult<()> {
        if !self.voucher_type.has_stock() || self.mode != EntryMode::ItemInvoice {
            return Err(VoucherError::StockNotApplicable {
                voucher_type: self.voucher_type,
            });
        }
        Ok(())
    }

    /// Appends an empty stock line.
    pub fn add_stock_entry(&mut self) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        if self.stock_entries.len() >= MAX_STOCK_LINES {
            return Err(VoucherError::TooManyStockLines {
                max: MAX_STOCK_LINES,
            });
        }
        self.stock_entries.push(StockEntry::default());
        Ok(())
    }

    /// Removes a stock line. No minimum: an item invoice may have zero
    /// stock lines while the user is still building it.
    pub fn remove_stock_entry(&mut self, index: usize) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        if index >= self.stock_entries.len() {
            return Err(VoucherError::StockLineOutOfRange { index });
        }
        self.stock_entries.remove(index);
        Ok(())
    }

    /// Selects the item on a stock line, freezing its name and default
    /// rate at selection time.
    pub fn set_stock_item(
        &mut self,
        index: usize,
        stock_item_id: impl Into<String>,
        item_name: impl Into<String>,
        default_rate: Money,
    ) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        let entry = self
            .stock_entries
            .get_mut(index)
            .ok_or(VoucherError::StockLineOutOfRange { index })?;
        let amount = derive_amount(entry.quantity, default_rate)
            .ok_or(VoucherError::AmountOutOfRange { index })?;
        entry.stock_item_id = Some(stock_item_id.into());
        entry.item_name = Some(item_name.into());
        entry.rate = default_rate;
        entry.amount = amount;
        Ok(())
    }

    /// Sets the quantity on a stock line; the amount is recomputed.
    ///
    /// ## Errors
    /// `AmountOutOfRange` when quantity times rate overflows; the line
    /// is left unchanged.
    pub fn set_quantity(&mut self, index: usize, quantity: Decimal) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        let entry = self
            .stock_entries
            .get_mut(index)
            .ok_or(VoucherError::StockLineOutOfRange { index })?;
        let amount =
            derive_amount(quantity, entry.rate).ok_or(VoucherError::AmountOutOfRange { index })?;
        entry.quantity = quantity;
        entry.amount = amount;
        Ok(())
    }

    /// Sets the rate on a stock line; the amount is recomputed.
    ///
    /// ## Errors
    /// `AmountOutOfRange` when quantity times rate overflows; the line
    /// is left unchanged.
    pub fn set_rate(&mut self, index: usize, rate: Money) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        let entry = self
            .stock_entries
            .get_mut(index)
            .ok_or(VoucherError::StockLineOutOfRange { index })?;
        let amount =
            derive_amount(entry.quantity, rate).ok_or(VoucherError::AmountOutOfRange { index })?;
        entry.rate = rate;
        entry.amount = amount;
        Ok(())
    }

    /// Sets the godown on a stock line (multi-godown companies only;
    /// the session gates this on the company context).
    pub fn set_godown(&mut self, index: usize, godown_id: impl Into<String>) -> VoucherResult<()> {
        self.ensure_stock_applicable()?;
        let entry = self
            .stock_entries
            .get_mut(index)
            .ok_or(VoucherError::StockLineOutOfRange { index })?;
        entry.godown_id = Some(godown_id.into());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Computes the derived totals for the current draft state.
    ///
    /// Called explicitly after every mutating operation; the computation
    /// is pure and cheap, so there is no caching to invalidate.
    pub fn totals(&self) -> VoucherTotals {
        let (total_debit, total_credit) = match &self.lines {
            EntryLines::Journal { lines } => (
                lines.iter().map(|l| l.debit).sum(),
                lines.iter().map(|l| l.credit).sum(),
            ),
            EntryLines::Single { lines } => {
                let total: Money = lines.iter().map(|l| l.amount).sum();
                (total, total)
            }
        };

        let stock_total: Money = self.stock_entries.iter().map(|e| e.amount).sum();

        let tax = if self.voucher_type.has_tax() && stock_total.is_positive() {
            Some(self.tax_policy.breakdown(stock_total))
        } else {
            None
        };

        VoucherTotals {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
            difference: (total_debit - total_credit).abs(),
            stock_total,
            tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
