//! # Seed Data Generator
//!
//! Populates a books database with a demo chart of accounts and stock
//! catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p accountech-db --bin seed
//!
//! # Specify database path and company
//! cargo run -p accountech-db --bin seed -- --db ./books.db --company demo-company
//! ```

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use accountech_core::{Godown, Ledger, Money, StockItem};
use accountech_db::{Database, DbConfig};

/// Ledgers every demo company starts with: (name, group, type, opening paise).
const LEDGERS: &[(&str, &str, &str, i64)] = &[
    ("Cash", "Cash-in-Hand", "asset", 5_000_000),
    ("HDFC Bank", "Bank Accounts", "asset", 25_000_000),
    ("Sales Account", "Sales Accounts", "income", 0),
    ("Purchase Account", "Purchase Accounts", "expense", 0),
    ("Acme Traders", "Sundry Debtors", "asset", 1_180_000),
    ("Sharma Suppliers", "Sundry Creditors", "liability", -590_000),
    ("Rent Expense", "Indirect Expenses", "expense", 0),
    ("Salary Expense", "Indirect Expenses", "expense", 0),
    ("GST Payable", "Duties & Taxes", "liability", 0),
];

/// Stock items: (name, rate paise, stock, unit, hsn).
const STOCK_ITEMS: &[(&str, i64, &str, &str, &str)] = &[
    ("Basmati Rice 5kg", 65_000, "120", "bag", "1006"),
    ("Sunflower Oil 1L", 18_500, "200", "btl", "1512"),
    ("Wheat Flour 10kg", 42_000, "80", "bag", "1101"),
    ("Toor Dal 1kg", 14_000, "150.5", "kg", "0713"),
    ("Tea Powder 500g", 22_000, "60", "pkt", "0902"),
    ("Sugar 1kg", 4_500, "300", "kg", "1701"),
];

const GODOWNS: &[(&str, &str)] = &[("Main Godown", "Pune"), ("City Warehouse", "Mumbai")];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./accountech_dev.db");
    let mut company_id = String::from("demo-company");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--company" | "-c" => {
                if i + 1 < args.len() {
                    company_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("AccounTech Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./accountech_dev.db)");
                println!("  -c, --company <ID>    Company ID to seed (default: demo-company)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 AccounTech Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Company:  {}", company_id);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.ledgers().list_active(&company_id).await?;
    if !existing.is_empty() {
        println!("⚠ Company already has {} ledgers", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (name, group, group_type, balance) in LEDGERS {
        db.ledgers()
            .insert(&Ledger {
                id: Uuid::new_v4().to_string(),
                company_id: company_id.clone(),
                name: name.to_string(),
                current_balance: Money::from_paise(*balance),
                group_name: group.to_string(),
                group_type: group_type.to_string(),
                is_active: true,
            })
            .await?;
    }
    println!("✓ Seeded {} ledgers", LEDGERS.len());

    for (name, rate, stock, unit, hsn) in STOCK_ITEMS {
        db.stock_items()
            .insert(&StockItem {
                id: Uuid::new_v4().to_string(),
                company_id: company_id.clone(),
                name: name.to_string(),
                rate: Money::from_paise(*rate),
                current_stock: Decimal::from_str(stock)?,
                hsn_code: Some(hsn.to_string()),
                unit_symbol: unit.to_string(),
                group_name: None,
                is_active: true,
            })
            .await?;
    }
    println!("✓ Seeded {} stock items", STOCK_ITEMS.len());

    for (name, address) in GODOWNS {
        db.godowns()
            .insert(&Godown {
                id: Uuid::new_v4().to_string(),
                company_id: company_id.clone(),
                name: name.to_string(),
                address: Some(address.to_string()),
                is_active: true,
            })
            .await?;
    }
    println!("✓ Seeded {} godowns", GODOWNS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
