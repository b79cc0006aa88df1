//! # Finalized Vouchers
//!
//! Immutable voucher records produced from a [`VoucherDraft`] at save
//! time and handed to the store. Finalization is the gate between "being
//! typed" and "in the books":
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Finalization                                       │
//! │                                                                         │
//! │  VoucherDraft ──► finalize(&company)                                    │
//! │                      │                                                  │
//! │                      ├── number present?           NumberRequired       │
//! │                      ├── date inside FY?           DateOutsideFY        │
//! │                      ├── every line has a ledger?  LedgerRequired       │
//! │                      ├── journal balanced?         Unbalanced           │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                  Voucher { id, lines, stock_lines, totals }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checks are ordered so the user fixes structural problems (number,
//! date, ledgers) before balance, matching the order fields appear on
//! the entry form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::context::CompanyContext;
use crate::draft::{EntryLines, VoucherDraft};
use crate::error::{VoucherError, VoucherResult};
use crate::money::Money;
use crate::types::{EntryMode, VoucherType};

// =============================================================================
// Records
// =============================================================================

/// A voucher accepted into the books.
///
/// Amounts are frozen copies of the draft's derived totals; the store
/// persists them as-is and never recomputes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Voucher {
    pub id: String,
    pub company_id: String,
    pub voucher_type: VoucherType,
    pub voucher_number: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub mode: EntryMode,
    pub reference: Option<String>,
    pub narration: Option<String>,
    pub party_ledger_id: Option<String>,
    pub party_name: Option<String>,
    pub counter_ledger_id: Option<String>,
    pub place_of_supply: Option<String>,
    pub total_amount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub lines: Vec<VoucherLine>,
    pub stock_lines: Vec<VoucherStockLine>,
}

/// One persisted accounting line.
///
/// Journal lines carry their entered debit/credit sides; single-amount
/// lines are stored with the amount on both sides so the books stay
/// balanced line-by-line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherLine {
    pub ledger_id: String,
    pub debit: Money,
    pub credit: Money,
    pub narration: Option<String>,
}

/// One persisted stock line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherStockLine {
    pub stock_item_id: String,
    pub item_name: Option<String>,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub rate: Money,
    pub amount: Money,
    pub godown_id: Option<String>,
}

// =============================================================================
// Finalization
// =============================================================================

impl VoucherDraft {
    /// Validates the draft against a company context and freezes it into
    /// a [`Voucher`].
    ///
    /// The draft itself is not consumed or mutated; on rejection the
    /// caller keeps editing exactly what they had.
    ///
    /// ## Errors
    /// - `NumberRequired` when the voucher number is blank
    /// - `DateOutsideFinancialYear` when the date falls outside the
    ///   company's financial year
    /// - `LedgerRequired` for any line without a ledger selection
    /// - `Unbalanced` when a journal's debit and credit totals differ
    pub fn finalize(&self, company: &CompanyContext) -> VoucherResult<Voucher> {
        if self.voucher_number.trim().is_empty() {
            return Err(VoucherError::NumberRequired);
        }
        if !company.contains_date(self.date) {
            return Err(VoucherError::DateOutsideFinancialYear {
                date: self.date,
                fy_start: company.fy_start,
                fy_end: company.fy_end,
            });
        }

        let totals = self.totals();
        if !totals.is_balanced {
            return Err(VoucherError::Unbalanced {
                total_debit: totals.total_debit,
                total_credit: totals.total_credit,
                difference: totals.difference,
            });
        }

        let lines = match &self.lines {
            EntryLines::Journal { lines } => lines
                .iter()
                .enumerate()
                .map(|(index, line)| {
                    let ledger_id = line
                        .ledger_id
                        .clone()
                        .ok_or(VoucherError::LedgerRequired { index })?;
                    Ok(VoucherLine {
                        ledger_id,
                        debit: line.debit,
                        credit: line.credit,
                        narration: line.narration.clone(),
                    })
                })
                .collect::<VoucherResult<Vec<_>>>()?,
            EntryLines::Single { lines } => lines
                .iter()
                .enumerate()
                .map(|(index, line)| {
                    let ledger_id = line
                        .ledger_id
                        .clone()
                        .ok_or(VoucherError::LedgerRequired { index })?;
                    Ok(VoucherLine {
                        ledger_id,
                        debit: line.amount,
                        credit: line.amount,
                        narration: line.narration.clone(),
                    })
                })
                .collect::<VoucherResult<Vec<_>>>()?,
        };

        // Stock lines without an item selected are treated as never
        // entered and dropped.
        let stock_lines = self
            .stock_entries
            .iter()
            .filter_map(|entry| {
                entry.stock_item_id.clone().map(|stock_item_id| VoucherStockLine {
                    stock_item_id,
                    item_name: entry.item_name.clone(),
                    quantity: entry.quantity,
                    rate: entry.rate,
                    amount: entry.amount,
                    godown_id: entry.godown_id.clone(),
                })
            })
            .collect();

        let (total_amount, cgst, sgst) = match totals.tax {
            Some(tax) => (tax.grand_total, tax.cgst, tax.sgst),
            None if totals.stock_total.is_positive() => {
                (totals.stock_total, Money::zero(), Money::zero())
            }
            None => (totals.total_debit, Money::zero(), Money::zero()),
        };

        Ok(Voucher {
            id: Uuid::new_v4().to_string(),
            company_id: company.id.clone(),
            voucher_type: self.voucher_type,
            voucher_number: self.voucher_number.trim().to_string(),
            date: self.date,
            mode: self.mode,
            reference: self.reference.clone(),
            narration: self.narration.clone(),
            party_ledger_id: self.party_ledger_id.clone(),
            party_name: self.party_name.clone(),
            counter_ledger_id: self.counter_ledger_id.clone(),
            place_of_supply: self.place_of_supply.clone(),
            total_amount,
            cgst,
            sgst,
            lines,
            stock_lines,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn company() -> CompanyContext {
        CompanyContext {
            id: "c1".to_string(),
            name: "Test Traders".to_string(),
            state_code: Some("27".to_string()),
            multi_godown: false,
            fy_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            fy_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        }
    }

    fn in_fy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_finalize_balanced_journal() {
        let mut draft = VoucherDraft::new(VoucherType::Journal);
        draft.voucher_number = "JO0003".to_string();
        draft.date = in_fy();
        draft.set_line_ledger(0, "rent").unwrap();
        draft.set_debit(0, Money::from_rupees(500)).unwrap();
        draft.set_line_ledger(1, "bank").unwrap();
        draft.set_credit(1, Money::from_rupees(500)).unwrap();

        let voucher = draft.finalize(&company()).unwrap();
        assert_eq!(voucher.voucher_number, "JO0003");
        assert_eq!(voucher.company_id, "c1");
        assert_eq!(voucher.lines.len(), 2);
        assert_eq!(voucher.lines[0].debit, Money::from_rupees(500));
        assert_eq!(voucher.lines[1].credit, Money::from_rupees(500));
        assert_eq!(voucher.total_amount, Money::from_rupees(500));
        assert_eq!(voucher.cgst, Money::zero());
    }

    #[test]
    fn test_finalize_rejects_unbalanced_journal() {
        let mut draft = VoucherDraft::new(VoucherType::Journal);
        draft.voucher_number = "JO0001".to_string();
        draft.date = in_fy();
        draft.set_line_ledger(0, "rent").unwrap();
        draft.set_debit(0, Money::from_rupees(500)).unwrap();
        draft.set_line_ledger(1, "bank").unwrap();
        draft.set_credit(1, Money::from_rupees(300)).unwrap();

        let err = draft.finalize(&company()).unwrap_err();
        assert!(matches!(
            err,
            VoucherError::Unbalanced {
                difference,
                ..
            } if difference == Money::from_rupees(200)
        ));
        // Rejection leaves the draft intact.
        assert_eq!(draft.totals().total_debit, Money::from_rupees(500));
    }

    #[test]
    fn test_finalize_requires_number() {
        let mut draft = VoucherDraft::new(VoucherType::Payment);
        draft.date = in_fy();
        draft.set_line_ledger(0, "supplier").unwrap();
        draft.set_amount(0, Money::from_rupees(100)).unwrap();

        assert!(matches!(
            draft.finalize(&company()),
            Err(VoucherError::NumberRequired)
        ));
    }

    #[test]
    fn test_finalize_requires_ledger_on_every_line() {
        let mut draft = VoucherDraft::new(VoucherType::Receipt);
        draft.voucher_number = "RE0001".to_string();
        draft.date = in_fy();
        draft.set_amount(0, Money::from_rupees(100)).unwrap();

        assert!(matches!(
            draft.finalize(&company()),
            Err(VoucherError::LedgerRequired { index: 0 })
        ));
    }

    #[test]
    fn test_finalize_rejects_date_outside_fy() {
        let mut draft = VoucherDraft::new(VoucherType::Payment);
        draft.voucher_number = "PA0001".to_string();
        draft.date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        draft.set_line_ledger(0, "supplier").unwrap();
        draft.set_amount(0, Money::from_rupees(100)).unwrap();

        assert!(matches!(
            draft.finalize(&company()),
            Err(VoucherError::DateOutsideFinancialYear { .. })
        ));
    }

    #[test]
    fn test_finalize_sales_with_stock_and_tax() {
        let mut draft = VoucherDraft::new(VoucherType::Sales);
        draft.voucher_number = "SA0008".to_string();
        draft.date = in_fy();
        draft.set_party("customer", "Acme Traders").unwrap();
        draft.set_line_ledger(0, "sales-account").unwrap();
        draft.set_amount(0, Money::from_rupees(1000)).unwrap();
        draft.add_stock_entry().unwrap();
        draft
            .set_stock_item(0, "item-1", "Widget", Money::from_rupees(500))
            .unwrap();
        draft.set_quantity(0, Decimal::from(2)).unwrap();

        let voucher = draft.finalize(&company()).unwrap();
        assert_eq!(voucher.stock_lines.len(), 1);
        assert_eq!(voucher.stock_lines[0].amount, Money::from_rupees(1000));
        assert_eq!(voucher.cgst, Money::from_rupees(90));
        assert_eq!(voucher.sgst, Money::from_rupees(90));
        assert_eq!(voucher.total_amount, Money::from_rupees(1180));
        assert_eq!(voucher.party_name.as_deref(), Some("Acme Traders"));
    }

    #[test]
    fn test_finalize_drops_itemless_stock_lines() {
        let mut draft = VoucherDraft::new(VoucherType::Purchase);
        draft.voucher_number = "PU0002".to_string();
        draft.date = in_fy();
        draft.set_line_ledger(0, "purchase-account").unwrap();
        draft.set_amount(0, Money::from_rupees(50)).unwrap();
        draft.add_stock_entry().unwrap();

        let voucher = draft.finalize(&company()).unwrap();
        assert!(voucher.stock_lines.is_empty());
    }

    #[test]
    fn test_single_amount_lines_persist_on_both_sides() {
        let mut draft = VoucherDraft::new(VoucherType::Contra);
        draft.voucher_number = "CO0001".to_string();
        draft.date = in_fy();
        draft.set_line_ledger(0, "cash").unwrap();
        draft.set_amount(0, Money::from_rupees(2500)).unwrap();

        let voucher = draft.finalize(&company()).unwrap();
        assert_eq!(voucher.lines[0].debit, Money::from_rupees(2500));
        assert_eq!(voucher.lines[0].credit, Money::from_rupees(2500));
    }
}
