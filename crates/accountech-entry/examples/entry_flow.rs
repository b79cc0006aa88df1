//! End-to-end demo of the voucher entry session against an in-memory
//! database.
//!
//! ## Usage
//! ```bash
//! RUST_LOG=debug cargo run -p accountech-entry --example entry_flow
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use accountech_core::{CompanyContext, Ledger, Money, StockItem, VoucherType};
use accountech_db::{Database, DbConfig};
use accountech_entry::EntrySession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let db = Database::new(DbConfig::in_memory()).await?;

    // Minimal directory for the demo company
    let company_id = "demo-company";
    for (id, name, group, group_type) in [
        ("bank", "HDFC Bank", "Bank Accounts", "asset"),
        ("rent", "Rent Expense", "Indirect Expenses", "expense"),
        ("sales", "Sales Account", "Sales Accounts", "income"),
        ("acme", "Acme Traders", "Sundry Debtors", "asset"),
    ] {
        db.ledgers()
            .insert(&Ledger {
                id: id.to_string(),
                company_id: company_id.to_string(),
                name: name.to_string(),
                current_balance: Money::zero(),
                group_name: group.to_string(),
                group_type: group_type.to_string(),
                is_active: true,
            })
            .await?;
    }
    db.stock_items()
        .insert(&StockItem {
            id: "rice".to_string(),
            company_id: company_id.to_string(),
            name: "Basmati Rice 5kg".to_string(),
            rate: Money::from_rupees(650),
            current_stock: Decimal::from(120),
            hsn_code: Some("1006".to_string()),
            unit_symbol: "bag".to_string(),
            group_name: None,
            is_active: true,
        })
        .await?;

    let mut session = EntrySession::new(db);
    session.bind_company(CompanyContext {
        id: company_id.to_string(),
        name: "Demo Traders".to_string(),
        state_code: Some("27".to_string()),
        multi_godown: false,
        fy_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        fy_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    });

    // --- Journal voucher: rent paid from bank ---
    let draft = session.select_voucher_type(VoucherType::Journal).await?;
    println!("Journal draft number: {}", draft.voucher_number);

    session.set_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    session.set_line_ledger(0, "rent")?;
    session.set_debit(0, Money::from_rupees(15_000))?;
    session.set_line_ledger(1, "bank")?;
    let totals = session.set_credit(1, Money::from_rupees(15_000))?;
    println!(
        "Journal totals: debit {} / credit {} (balanced: {})",
        totals.total_debit, totals.total_credit, totals.is_balanced
    );

    let voucher = session.save_voucher().await?;
    println!("Saved {} ({})", voucher.voucher_number, voucher.total_amount);

    // --- Sales invoice with stock and the tax block ---
    session.select_voucher_type(VoucherType::Sales).await?;
    session.set_date(NaiveDate::from_ymd_opt(2024, 7, 2).unwrap());
    session.set_party("acme", "Acme Traders")?;
    session.set_counter_ledger("sales");
    session.set_line_ledger(0, "sales")?;
    session.set_amount(0, Money::from_rupees(1300))?;
    session.add_stock_entry()?;
    session.set_stock_item(0, "rice").await?;
    let totals = session.set_quantity(0, Decimal::from(2))?;

    if let Some(tax) = totals.tax {
        println!(
            "Stock total {} + CGST {} + SGST {} = {}",
            totals.stock_total, tax.cgst, tax.sgst, tax.grand_total
        );
    }

    let voucher = session.save_voucher().await?;
    println!("Saved {} ({})", voucher.voucher_number, voucher.total_amount);

    for summary in session.recent_vouchers(10).await? {
        println!(
            "  {} {} {} {}",
            summary.date, summary.voucher_type, summary.voucher_number, summary.total_amount
        );
    }

    Ok(())
}
