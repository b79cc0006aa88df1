//! Integration tests for the full voucher entry flow: bind a company,
//! build a draft, save it, and read it back.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use accountech_core::{
    CompanyContext, EntryMode, Ledger, Money, StockItem, VoucherType,
};
use accountech_db::{Database, DbConfig};
use accountech_entry::{EntrySession, ErrorCode};

const COMPANY_ID: &str = "test-company";

fn company() -> CompanyContext {
    CompanyContext {
        id: COMPANY_ID.to_string(),
        name: "Test Traders".to_string(),
        state_code: Some("27".to_string()),
        multi_godown: false,
        fy_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        fy_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    }
}

async fn seeded_session() -> EntrySession {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    for (id, name, group, group_type) in [
        ("cash", "Cash", "Cash-in-Hand", "asset"),
        ("bank", "HDFC Bank", "Bank Accounts", "asset"),
        ("sales", "Sales Account", "Sales Accounts", "income"),
        ("rent", "Rent Expense", "Indirect Expenses", "expense"),
        ("acme", "Acme Traders", "Sundry Debtors", "asset"),
    ] {
        db.ledgers()
            .insert(&Ledger {
                id: id.to_string(),
                company_id: COMPANY_ID.to_string(),
                name: name.to_string(),
                current_balance: Money::zero(),
                group_name: group.to_string(),
                group_type: group_type.to_string(),
                is_active: true,
            })
            .await
            .unwrap();
    }

    db.stock_items()
        .insert(&StockItem {
            id: "rice".to_string(),
            company_id: COMPANY_ID.to_string(),
            name: "Basmati Rice 5kg".to_string(),
            rate: Money::from_rupees(500),
            current_stock: Decimal::from(100),
            hsn_code: Some("1006".to_string()),
            unit_symbol: "bag".to_string(),
            group_name: None,
            is_active: true,
        })
        .await
        .unwrap();

    let mut session = EntrySession::new(db);
    session.bind_company(company());
    session
}

fn fy_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

#[tokio::test]
async fn journal_entry_saves_and_numbers_sequentially() {
    let session = seeded_session().await;

    let draft = session
        .select_voucher_type(VoucherType::Journal)
        .await
        .unwrap();
    assert_eq!(draft.voucher_number, "JO0001");
    assert_eq!(draft.lines.len(), 2);

    session.set_date(fy_date());
    session.set_line_ledger(0, "rent").unwrap();
    session.set_debit(0, Money::from_rupees(500)).unwrap();
    session.set_line_ledger(1, "bank").unwrap();
    let totals = session.set_credit(1, Money::from_rupees(500)).unwrap();
    assert!(totals.is_balanced);

    let voucher = session.save_voucher().await.unwrap();
    assert_eq!(voucher.voucher_number, "JO0001");

    // The draft reset and the number advanced
    let draft = session.draft();
    assert_eq!(draft.voucher_number, "JO0002");
    assert_eq!(draft.totals().total_debit, Money::zero());

    // A reselect sees the accepted voucher and continues the sequence
    let draft = session
        .select_voucher_type(VoucherType::Journal)
        .await
        .unwrap();
    assert_eq!(draft.voucher_number, "JO0002");
}

#[tokio::test]
async fn numbering_is_independent_per_type() {
    let session = seeded_session().await;

    let sales = session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();
    assert_eq!(sales.voucher_number, "SA0001");

    let payment = session
        .select_voucher_type(VoucherType::Payment)
        .await
        .unwrap();
    assert_eq!(payment.voucher_number, "PA0001");
}

#[tokio::test]
async fn unbalanced_journal_is_rejected_and_draft_survives() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Journal)
        .await
        .unwrap();

    session.set_date(fy_date());
    session.set_line_ledger(0, "rent").unwrap();
    session.set_debit(0, Money::from_rupees(500)).unwrap();
    session.set_line_ledger(1, "bank").unwrap();
    session.set_credit(1, Money::from_rupees(300)).unwrap();

    let err = session.save_voucher().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BalanceError);
    assert!(err.message.contains("₹200.00"));

    // The draft keeps everything the user typed
    let totals = session.totals();
    assert_eq!(totals.total_debit, Money::from_rupees(500));
    assert_eq!(totals.total_credit, Money::from_rupees(300));
    assert_eq!(session.draft().voucher_number, "JO0001");

    // Nothing reached the database
    assert!(session.recent_vouchers(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn sales_invoice_with_stock_computes_tax_and_persists() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();

    session.set_date(fy_date());
    session.set_party("acme", "Acme Traders").unwrap();
    session.set_counter_ledger("sales");
    session.set_place_of_supply("27").unwrap();
    session.set_line_ledger(0, "sales").unwrap();
    session.set_amount(0, Money::from_rupees(1000)).unwrap();

    session.add_stock_entry().unwrap();
    // Selecting the item freezes its catalog rate on the line
    session.set_stock_item(0, "rice").await.unwrap();
    let totals = session.set_quantity(0, Decimal::from(2)).unwrap();

    assert_eq!(totals.stock_total, Money::from_rupees(1000));
    let tax = totals.tax.expect("tax block expected");
    assert_eq!(tax.cgst, Money::from_rupees(90));
    assert_eq!(tax.sgst, Money::from_rupees(90));
    assert_eq!(tax.grand_total, Money::from_rupees(1180));

    let voucher = session.save_voucher().await.unwrap();
    assert_eq!(voucher.total_amount, Money::from_rupees(1180));
    assert_eq!(voucher.stock_lines.len(), 1);
    assert_eq!(voucher.stock_lines[0].rate, Money::from_rupees(500));

    let recent = session.recent_vouchers(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].voucher_number, "SA0001");
    assert_eq!(recent[0].total_amount, Money::from_rupees(1180));
}

#[tokio::test]
async fn unknown_stock_item_is_not_found() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();
    session.add_stock_entry().unwrap();

    let err = session.set_stock_item(0, "missing-item").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn operations_without_company_are_rejected() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let session = EntrySession::new(db);

    let err = session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingCompany);

    let err = session.save_voucher().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingCompany);

    let err = session.list_ledgers().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingCompany);
}

#[tokio::test]
async fn date_outside_financial_year_is_rejected() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Payment)
        .await
        .unwrap();

    session.set_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    session.set_line_ledger(0, "cash").unwrap();
    session.set_amount(0, Money::from_rupees(100)).unwrap();

    let err = session.save_voucher().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(err.message.contains("financial year"));
}

#[tokio::test]
async fn directory_reads_reflect_seeded_data() {
    let session = seeded_session().await;

    let ledgers = session.list_ledgers().await.unwrap();
    assert_eq!(ledgers.len(), 5);

    let items = session.list_stock_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Basmati Rice 5kg");

    // Single-godown companies never see a godown list
    assert!(session.list_godowns().await.unwrap().is_empty());
}

#[tokio::test]
async fn field_validation_happens_at_the_boundary() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();

    let err = session.set_amount(0, Money::from_rupees(-5)).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = session.set_place_of_supply("2A").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = session.set_voucher_number("bad number!").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    // The draft is untouched by rejected input
    assert_eq!(session.totals().total_debit, Money::zero());
    assert_eq!(session.draft().voucher_number, "SA0001");
}

#[tokio::test]
async fn voucher_mode_switch_clears_stock_grid() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();

    session.add_stock_entry().unwrap();
    session.set_stock_item(0, "rice").await.unwrap();
    session.set_quantity(0, Decimal::ONE).unwrap();

    let totals = session.set_mode(EntryMode::VoucherMode).unwrap();
    assert_eq!(totals.stock_total, Money::zero());
    assert!(totals.tax.is_none());
    assert!(session.draft().stock_entries.is_empty());
}

#[tokio::test]
async fn entry_mode_survives_save() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Sales)
        .await
        .unwrap();
    session.set_mode(EntryMode::VoucherMode).unwrap();

    session.set_date(fy_date());
    session.set_line_ledger(0, "acme").unwrap();
    session.set_amount(0, Money::from_rupees(1200)).unwrap();

    let voucher = session.save_voucher().await.unwrap();
    assert_eq!(voucher.mode, EntryMode::VoucherMode);

    // The reset draft keeps the mode the user was entering in
    let draft = session.draft();
    assert_eq!(draft.voucher_type, VoucherType::Sales);
    assert_eq!(draft.mode, EntryMode::VoucherMode);
    assert_eq!(draft.voucher_number, "SA0002");
}

#[tokio::test]
async fn manual_number_override_is_respected() {
    let session = seeded_session().await;
    session
        .select_voucher_type(VoucherType::Receipt)
        .await
        .unwrap();

    session.set_voucher_number("RE0100").unwrap();
    session.set_date(fy_date());
    session.set_line_ledger(0, "bank").unwrap();
    session.set_amount(0, Money::from_rupees(2500)).unwrap();

    let voucher = session.save_voucher().await.unwrap();
    assert_eq!(voucher.voucher_number, "RE0100");

    // The sequence continues from the override
    let draft = session
        .select_voucher_type(VoucherType::Receipt)
        .await
        .unwrap();
    assert_eq!(draft.voucher_number, "RE0101");
}
