//! # Entry Session
//!
//! The live voucher entry session: one bound company, one draft, and the
//! operations the frontend invokes against them.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Entry Session Operations                           │
//! │                                                                         │
//! │  Frontend Action          Session Operation        Draft Change         │
//! │  ───────────────          ─────────────────        ────────────         │
//! │                                                                         │
//! │  Open company ───────────► bind_company() ───────► (context set)       │
//! │                                                                         │
//! │  Pick "Sales" ───────────► select_voucher_type() ► reset + number      │
//! │                                                                         │
//! │  Type amount ────────────► set_debit()/set_amount() ► line updated     │
//! │                                                     totals returned    │
//! │                                                                         │
//! │  Pick item ──────────────► set_stock_item() ─────► name+rate frozen    │
//! │                                                                         │
//! │  Press save ─────────────► save_voucher() ───────► finalize → insert   │
//! │                              │                      reset on success    │
//! │                              └── number taken? regenerate and retry     │
//! │                                                                         │
//! │  NOTE: All draft access goes through the Mutex. Await points never      │
//! │        hold the lock.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use accountech_core::validation::{
    validate_amount, validate_narration, validate_quantity, validate_rate, validate_state_code,
    validate_voucher_number,
};
use accountech_core::{
    next_voucher_number, CompanyContext, EntryMode, Godown, Ledger, Money, StockItem, Voucher,
    VoucherDraft, VoucherResult, VoucherSummary, VoucherTotals, VoucherType,
};
use accountech_db::Database;

use crate::error::ApiError;

/// How many times a save retries after losing the numbering race.
///
/// Two retries cover the realistic case of another tab saving at the
/// same moment; beyond that something else is wrong and the error goes
/// to the user.
const MAX_NUMBER_RETRIES: u32 = 3;

/// A voucher entry session bound to at most one company.
///
/// ## Thread Safety
/// The draft sits behind a `Mutex` because operations may be invoked
/// concurrently by the transport layer. Operations lock, mutate, and
/// release before any database await, so the lock is never held across
/// an await point.
#[derive(Debug)]
pub struct EntrySession {
    db: Database,
    company: Option<CompanyContext>,
    draft: Mutex<VoucherDraft>,
}

impl EntrySession {
    /// Creates a session with no company bound.
    ///
    /// The initial draft is a journal voucher; the frontend immediately
    /// replaces it via [`select_voucher_type`](Self::select_voucher_type).
    pub fn new(db: Database) -> Self {
        EntrySession {
            db,
            company: None,
            draft: Mutex::new(VoucherDraft::new(VoucherType::Journal)),
        }
    }

    /// Binds the active company. All subsequent reads and saves are
    /// scoped to it.
    pub fn bind_company(&mut self, company: CompanyContext) {
        info!(company_id = %company.id, name = %company.name, "Company bound to session");
        self.company = Some(company);
    }

    /// Returns the bound company, if any.
    pub fn company(&self) -> Option<&CompanyContext> {
        self.company.as_ref()
    }

    fn require_company(&self) -> Result<&CompanyContext, ApiError> {
        self.company.as_ref().ok_or_else(ApiError::missing_company)
    }

    // -------------------------------------------------------------------------
    // Draft access
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the draft.
    fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VoucherDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VoucherDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }

    /// Applies a fallible mutation and returns the fresh totals.
    fn mutate<F>(&self, f: F) -> Result<VoucherTotals, ApiError>
    where
        F: FnOnce(&mut VoucherDraft) -> VoucherResult<()>,
    {
        self.with_draft_mut(|draft| {
            f(draft)?;
            Ok(draft.totals())
        })
    }

    /// Returns a snapshot of the current draft.
    pub fn draft(&self) -> VoucherDraft {
        self.with_draft(|draft| draft.clone())
    }

    /// Returns the current derived totals.
    pub fn totals(&self) -> VoucherTotals {
        self.with_draft(|draft| draft.totals())
    }

    // -------------------------------------------------------------------------
    // Type selection
    // -------------------------------------------------------------------------

    /// Resets the draft for a voucher type and prefills the next number.
    ///
    /// ## Number Prefill
    /// The next number is derived from the last accepted voucher of the
    /// same type. If the lookup fails the number is left blank and the
    /// user fills it manually; the failure is logged but not surfaced.
    pub async fn select_voucher_type(&self, voucher_type: VoucherType) -> Result<VoucherDraft, ApiError> {
        let company = self.require_company()?;
        let company_id = company.id.clone();

        self.with_draft_mut(|draft| draft.reset_for_type(voucher_type));

        match self.db.vouchers().last_number(&company_id, voucher_type).await {
            Ok(last) => {
                let number = next_voucher_number(voucher_type, last.as_deref());
                debug!(%voucher_type, number, "Prefilled voucher number");
                self.with_draft_mut(|draft| draft.voucher_number = number);
            }
            Err(e) => {
                warn!(%voucher_type, error = %e, "Voucher number lookup failed, leaving blank");
            }
        }

        Ok(self.draft())
    }

    // -------------------------------------------------------------------------
    // Header mutation
    // -------------------------------------------------------------------------

    /// Overrides the voucher number.
    pub fn set_voucher_number(&self, number: impl Into<String>) -> Result<VoucherTotals, ApiError> {
        let number = number.into();
        self.mutate(|draft| {
            validate_voucher_number(&number)?;
            draft.voucher_number = number.trim().to_string();
            Ok(())
        })
    }

    /// Sets the voucher date.
    pub fn set_date(&self, date: NaiveDate) -> VoucherTotals {
        self.with_draft_mut(|draft| {
            draft.date = date;
            draft.totals()
        })
    }

    /// Sets the reference text.
    pub fn set_reference(&self, reference: impl Into<String>) -> VoucherTotals {
        self.with_draft_mut(|draft| {
            draft.reference = Some(reference.into());
            draft.totals()
        })
    }

    /// Sets the voucher narration (trimmed, length-checked).
    pub fn set_narration(&self, narration: impl Into<String>) -> Result<VoucherTotals, ApiError> {
        let narration = narration.into();
        self.mutate(|draft| {
            let trimmed = validate_narration(&narration)?;
            draft.narration = if trimmed.is_empty() { None } else { Some(trimmed) };
            Ok(())
        })
    }

    /// Switches between item-invoice and voucher mode.
    pub fn set_mode(&self, mode: EntryMode) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.set_mode(mode))
    }

    /// Sets the counterparty ledger.
    pub fn set_party(
        &self,
        ledger_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.set_party(ledger_id, name))
    }

    /// Sets the counter ledger (sales/purchase account or cash/bank).
    pub fn set_counter_ledger(&self, ledger_id: impl Into<String>) -> VoucherTotals {
        self.with_draft_mut(|draft| {
            draft.set_counter_ledger(ledger_id);
            draft.totals()
        })
    }

    /// Sets the place-of-supply state code.
    pub fn set_place_of_supply(&self, state_code: impl Into<String>) -> Result<VoucherTotals, ApiError> {
        let state_code = state_code.into();
        self.mutate(|draft| {
            validate_state_code(&state_code)?;
            draft.set_place_of_supply(state_code.trim())
        })
    }

    // -------------------------------------------------------------------------
    // Accounting line mutation
    // -------------------------------------------------------------------------

    /// Appends an empty accounting line.
    pub fn add_line(&self) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.add_line())
    }

    /// Removes an accounting line.
    pub fn remove_line(&self, index: usize) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.remove_line(index))
    }

    /// Sets the ledger on a line.
    pub fn set_line_ledger(
        &self,
        index: usize,
        ledger_id: impl Into<String>,
    ) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.set_line_ledger(index, ledger_id))
    }

    /// Sets the per-line narration.
    pub fn set_line_narration(
        &self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.set_line_narration(index, text))
    }

    /// Sets the single amount on a non-journal line.
    pub fn set_amount(&self, index: usize, amount: Money) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| {
            validate_amount(amount)?;
            draft.set_amount(index, amount)
        })
    }

    /// Sets the debit side of a journal line.
    pub fn set_debit(&self, index: usize, amount: Money) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| {
            validate_amount(amount)?;
            draft.set_debit(index, amount)
        })
    }

    /// Sets the credit side of a journal line.
    pub fn set_credit(&self, index: usize, amount: Money) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| {
            validate_amount(amount)?;
            draft.set_credit(index, amount)
        })
    }

    // -------------------------------------------------------------------------
    // Stock line mutation
    // -------------------------------------------------------------------------

    /// Appends an empty stock line.
    pub fn add_stock_entry(&self) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.add_stock_entry())
    }

    /// Removes a stock line.
    pub fn remove_stock_entry(&self, index: usize) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.remove_stock_entry(index))
    }

    /// Selects a stock item on a line.
    ///
    /// ## Snapshot Pattern
    /// The item's name and default rate are looked up once and frozen on
    /// the line, so the entry grid stays consistent even if the catalog
    /// changes mid-entry.
    pub async fn set_stock_item(&self, index: usize, stock_item_id: &str) -> Result<VoucherTotals, ApiError> {
        let item = self
            .db
            .stock_items()
            .get_by_id(stock_item_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Stock item", stock_item_id))?;

        self.mutate(|draft| draft.set_stock_item(index, &item.id, &item.name, item.rate))
    }

    /// Sets the quantity on a stock line.
    pub fn set_quantity(&self, index: usize, quantity: Decimal) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| {
            validate_quantity(quantity)?;
            draft.set_quantity(index, quantity)
        })
    }

    /// Sets the rate on a stock line.
    pub fn set_rate(&self, index: usize, rate: Money) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| {
            validate_rate(rate)?;
            draft.set_rate(index, rate)
        })
    }

    /// Sets the godown on a stock line.
    ///
    /// Only meaningful for multi-godown companies; single-godown
    /// companies never render the picker.
    pub fn set_godown(&self, index: usize, godown_id: impl Into<String>) -> Result<VoucherTotals, ApiError> {
        self.mutate(|draft| draft.set_godown(index, godown_id))
    }

    // -------------------------------------------------------------------------
    // Directory reads
    // -------------------------------------------------------------------------
    // Read failures degrade to an empty list: the entry form stays usable
    // with manual input while the failure is logged for diagnosis.

    /// Lists the active ledgers for the bound company.
    pub async fn list_ledgers(&self) -> Result<Vec<Ledger>, ApiError> {
        let company = self.require_company()?;
        match self.db.ledgers().list_active(&company.id).await {
            Ok(ledgers) => Ok(ledgers),
            Err(e) => {
                warn!(error = %e, "Ledger listing failed, returning empty");
                Ok(Vec::new())
            }
        }
    }

    /// Lists the active stock items for the bound company.
    pub async fn list_stock_items(&self) -> Result<Vec<StockItem>, ApiError> {
        let company = self.require_company()?;
        match self.db.stock_items().list_active(&company.id).await {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "Stock item listing failed, returning empty");
                Ok(Vec::new())
            }
        }
    }

    /// Lists the active godowns for the bound company.
    ///
    /// Single-godown companies always get an empty list.
    pub async fn list_godowns(&self) -> Result<Vec<Godown>, ApiError> {
        let company = self.require_company()?;
        if !company.multi_godown {
            return Ok(Vec::new());
        }
        match self.db.godowns().list_active(&company.id).await {
            Ok(godowns) => Ok(godowns),
            Err(e) => {
                warn!(error = %e, "Godown listing failed, returning empty");
                Ok(Vec::new())
            }
        }
    }

    /// Lists the most recently accepted vouchers, newest first.
    pub async fn recent_vouchers(&self, limit: i64) -> Result<Vec<VoucherSummary>, ApiError> {
        let company = self.require_company()?;
        match self.db.vouchers().recent(&company.id, limit).await {
            Ok(summaries) => Ok(summaries),
            Err(e) => {
                warn!(error = %e, "Recent voucher listing failed, returning empty");
                Ok(Vec::new())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Save
    // -------------------------------------------------------------------------

    /// Validates, persists, and resets the draft.
    ///
    /// ## On Success
    /// The accepted voucher is returned, the draft resets to an empty
    /// voucher of the same type and entry mode, and the number advances
    /// past the one just accepted.
    ///
    /// ## On Rejection
    /// The draft is untouched; the user keeps editing what they had.
    ///
    /// ## The Numbering Race
    /// Another session may accept the prefilled number first. The
    /// database's unique constraint catches this; the save regenerates
    /// the number from the latest accepted one and retries, up to
    /// [`MAX_NUMBER_RETRIES`] attempts.
    pub async fn save_voucher(&self) -> Result<Voucher, ApiError> {
        let company = self.require_company()?.clone();

        let mut voucher = self.with_draft(|draft| draft.finalize(&company))?;
        let voucher_type = voucher.voucher_type;

        let repo = self.db.vouchers();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match repo.insert(&voucher).await {
                Ok(()) => break,
                Err(e) if e.is_unique_violation() && attempt < MAX_NUMBER_RETRIES => {
                    warn!(
                        number = %voucher.voucher_number,
                        attempt,
                        "Voucher number already taken, regenerating"
                    );
                    let last = repo.last_number(&company.id, voucher_type).await?;
                    voucher.voucher_number = next_voucher_number(voucher_type, last.as_deref());
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            id = %voucher.id,
            number = %voucher.voucher_number,
            %voucher_type,
            total = %voucher.total_amount,
            "Voucher saved"
        );

        let next = next_voucher_number(voucher_type, Some(&voucher.voucher_number));
        let mode = voucher.mode;
        self.with_draft_mut(|draft| {
            draft.reset_for_type(voucher_type);
            // Reset drops back to the type default mode; the user stays in
            // the mode they were entering in.
            draft.mode = mode;
            draft.voucher_number = next;
        });

        Ok(voucher)
    }
}
