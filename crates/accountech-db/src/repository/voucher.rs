//! # Voucher Repository
//!
//! Database operations for accepted vouchers.
//!
//! ## Persistence Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Voucher Persistence                               │
//! │                                                                         │
//! │  insert(&voucher)                                                       │
//! │       │                                                                 │
//! │       ▼   ONE transaction                                               │
//! │  ┌────────────────────────────────────────────┐                         │
//! │  │ INSERT vouchers          (header + totals) │                         │
//! │  │ INSERT voucher_lines       × N             │                         │
//! │  │ INSERT voucher_stock_lines × M             │                         │
//! │  └────────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ├── UNIQUE(company, type, number) hit?  → UniqueViolation        │
//! │       │   (numbering race: caller regenerates and retries)             │
//! │       ▼                                                                 │
//! │  Committed: lines never exist without their header                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use accountech_core::{
    EntryMode, Money, Voucher, VoucherLine, VoucherStockLine, VoucherSummary, VoucherType,
};

/// Row shape for voucher headers.
#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
    id: String,
    company_id: String,
    voucher_type: VoucherType,
    voucher_number: String,
    date: chrono::NaiveDate,
    mode: EntryMode,
    reference: Option<String>,
    narration: Option<String>,
    party_ledger_id: Option<String>,
    party_name: Option<String>,
    counter_ledger_id: Option<String>,
    place_of_supply: Option<String>,
    total_amount: Money,
    cgst: Money,
    sgst: Money,
}

/// Row shape for voucher_lines.
#[derive(Debug, sqlx::FromRow)]
struct VoucherLineRow {
    ledger_id: String,
    debit: Money,
    credit: Money,
    narration: Option<String>,
}

/// Row shape for voucher_stock_lines; quantity is TEXT until parsed.
#[derive(Debug, sqlx::FromRow)]
struct VoucherStockLineRow {
    stock_item_id: String,
    item_name: Option<String>,
    quantity: String,
    rate: Money,
    amount: Money,
    godown_id: Option<String>,
}

impl VoucherStockLineRow {
    fn into_line(self) -> DbResult<VoucherStockLine> {
        let quantity = rust_decimal::Decimal::from_str(&self.quantity)
            .map_err(|_| DbError::corrupt("quantity", &self.quantity))?;
        Ok(VoucherStockLine {
            stock_item_id: self.stock_item_id,
            item_name: self.item_name,
            quantity,
            rate: self.rate,
            amount: self.amount,
            godown_id: self.godown_id,
        })
    }
}

/// Repository for voucher database operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: SqlitePool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository { pool }
    }

    /// Inserts a voucher with all its lines in one transaction.
    ///
    /// ## Numbering Race
    /// The `UNIQUE(company_id, voucher_type, voucher_number)` constraint
    /// is the authoritative guard against two sessions accepting the
    /// same number. A lost race surfaces as `DbError::UniqueViolation`;
    /// the caller regenerates the number and retries.
    pub async fn insert(&self, voucher: &Voucher) -> DbResult<()> {
        debug!(
            id = %voucher.id,
            voucher_number = %voucher.voucher_number,
            lines = voucher.lines.len(),
            stock_lines = voucher.stock_lines.len(),
            "Inserting voucher"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vouchers (
                id, company_id, voucher_type, voucher_number, date, mode,
                reference, narration, party_ledger_id, party_name,
                counter_ledger_id, place_of_supply,
                total_amount, cgst, sgst, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12,
                ?13, ?14, ?15, ?16
            )
            "#,
        )
        .bind(&voucher.id)
        .bind(&voucher.company_id)
        .bind(voucher.voucher_type)
        .bind(&voucher.voucher_number)
        .bind(voucher.date)
        .bind(voucher.mode)
        .bind(&voucher.reference)
        .bind(&voucher.narration)
        .bind(&voucher.party_ledger_id)
        .bind(&voucher.party_name)
        .bind(&voucher.counter_ledger_id)
        .bind(&voucher.place_of_supply)
        .bind(voucher.total_amount)
        .bind(voucher.cgst)
        .bind(voucher.sgst)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (index, line) in voucher.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO voucher_lines (id, voucher_id, line_index, ledger_id, debit, credit, narration)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&voucher.id)
            .bind(index as i64)
            .bind(&line.ledger_id)
            .bind(line.debit)
            .bind(line.credit)
            .bind(&line.narration)
            .execute(&mut *tx)
            .await?;
        }

        for (index, line) in voucher.stock_lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO voucher_stock_lines (
                    id, voucher_id, line_index, stock_item_id, item_name,
                    quantity, rate, amount, godown_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&voucher.id)
            .bind(index as i64)
            .bind(&line.stock_item_id)
            .bind(&line.item_name)
            .bind(line.quantity.to_string())
            .bind(line.rate)
            .bind(line.amount)
            .bind(&line.godown_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Returns the most recently accepted voucher number for a company
    /// and voucher type, or `None` when no voucher of that type exists.
    pub async fn last_number(
        &self,
        company_id: &str,
        voucher_type: VoucherType,
    ) -> DbResult<Option<String>> {
        let number: Option<String> = sqlx::query_scalar(
            r#"
            SELECT voucher_number
            FROM vouchers
            WHERE company_id = ?1 AND voucher_type = ?2
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .bind(voucher_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(number)
    }

    /// Lists the most recent vouchers for a company, newest first.
    pub async fn recent(&self, company_id: &str, limit: i64) -> DbResult<Vec<VoucherSummary>> {
        let summaries: Vec<VoucherSummary> = sqlx::query_as::<_, VoucherSummary>(
            r#"
            SELECT id, voucher_number, voucher_type, date, total_amount
            FROM vouchers
            WHERE company_id = ?1
            ORDER BY date DESC, created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Gets a voucher by ID with all its lines.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Voucher>> {
        let row: Option<VoucherRow> = sqlx::query_as::<_, VoucherRow>(
            r#"
            SELECT id, company_id, voucher_type, voucher_number, date, mode,
                   reference, narration, party_ledger_id, party_name,
                   counter_ledger_id, place_of_supply,
                   total_amount, cgst, sgst
            FROM vouchers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines: Vec<VoucherLineRow> = sqlx::query_as::<_, VoucherLineRow>(
            r#"
            SELECT ledger_id, debit, credit, narration
            FROM voucher_lines
            WHERE voucher_id = ?1
            ORDER BY line_index
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let stock_rows: Vec<VoucherStockLineRow> = sqlx::query_as::<_, VoucherStockLineRow>(
            r#"
            SELECT stock_item_id, item_name, quantity, rate, amount, godown_id
            FROM voucher_stock_lines
            WHERE voucher_id = ?1
            ORDER BY line_index
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let stock_lines = stock_rows
            .into_iter()
            .map(VoucherStockLineRow::into_line)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(Voucher {
            id: row.id,
            company_id: row.company_id,
            voucher_type: row.voucher_type,
            voucher_number: row.voucher_number,
            date: row.date,
            mode: row.mode,
            reference: row.reference,
            narration: row.narration,
            party_ledger_id: row.party_ledger_id,
            party_name: row.party_name,
            counter_ledger_id: row.counter_ledger_id,
            place_of_supply: row.place_of_supply,
            total_amount: row.total_amount,
            cgst: row.cgst,
            sgst: row.sgst,
            lines: lines
                .into_iter()
                .map(|l| VoucherLine {
                    ledger_id: l.ledger_id,
                    debit: l.debit,
                    credit: l.credit,
                    narration: l.narration,
                })
                .collect(),
            stock_lines,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use accountech_core::Ledger;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    async fn db_with_ledgers() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (id, name) in [("cash", "Cash"), ("sales", "Sales Account")] {
            db.ledgers()
                .insert(&Ledger {
                    id: id.to_string(),
                    company_id: "c1".to_string(),
                    name: name.to_string(),
                    current_balance: Money::zero(),
                    group_name: "Primary".to_string(),
                    group_type: "asset".to_string(),
                    is_active: true,
                })
                .await
                .unwrap();
        }
        db
    }

    fn voucher(id: &str, number: &str) -> Voucher {
        Voucher {
            id: id.to_string(),
            company_id: "c1".to_string(),
            voucher_type: VoucherType::Sales,
            voucher_number: number.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            mode: EntryMode::VoucherMode,
            reference: None,
            narration: Some("July sale".to_string()),
            party_ledger_id: None,
            party_name: Some("Acme Traders".to_string()),
            counter_ledger_id: Some("sales".to_string()),
            place_of_supply: Some("27".to_string()),
            total_amount: Money::from_rupees(1180),
            cgst: Money::from_rupees(90),
            sgst: Money::from_rupees(90),
            lines: vec![VoucherLine {
                ledger_id: "sales".to_string(),
                debit: Money::from_rupees(1000),
                credit: Money::from_rupees(1000),
                narration: None,
            }],
            stock_lines: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = db_with_ledgers().await;
        let repo = db.vouchers();

        let mut v = voucher("v1", "SA0001");
        v.stock_lines.push(VoucherStockLine {
            stock_item_id: "s1".to_string(),
            item_name: Some("Widget".to_string()),
            quantity: Decimal::new(25, 1),
            rate: Money::from_rupees(400),
            amount: Money::from_rupees(1000),
            godown_id: None,
        });
        // Referenced stock item must exist (FK)
        sqlx::query("INSERT INTO stock_items (id, company_id, name) VALUES ('s1', 'c1', 'Widget')")
            .execute(db.pool())
            .await
            .unwrap();

        repo.insert(&v).await.unwrap();

        let fetched = repo.get_by_id("v1").await.unwrap().unwrap();
        assert_eq!(fetched.voucher_number, "SA0001");
        assert_eq!(fetched.voucher_type, VoucherType::Sales);
        assert_eq!(fetched.total_amount, Money::from_rupees(1180));
        assert_eq!(fetched.lines.len(), 1);
        assert_eq!(fetched.lines[0].ledger_id, "sales");
        assert_eq!(fetched.stock_lines.len(), 1);
        assert_eq!(fetched.stock_lines[0].quantity, Decimal::new(25, 1));
    }

    #[tokio::test]
    async fn test_duplicate_number_is_unique_violation() {
        let db = db_with_ledgers().await;
        let repo = db.vouchers();

        repo.insert(&voucher("v1", "SA0001")).await.unwrap();
        let err = repo.insert(&voucher("v2", "SA0001")).await.unwrap_err();
        assert!(err.is_unique_violation());

        // A failed insert leaves no orphan lines behind
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM voucher_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_last_number_per_type() {
        let db = db_with_ledgers().await;
        let repo = db.vouchers();

        assert!(repo
            .last_number("c1", VoucherType::Sales)
            .await
            .unwrap()
            .is_none());

        repo.insert(&voucher("v1", "SA0001")).await.unwrap();
        repo.insert(&voucher("v2", "SA0002")).await.unwrap();

        assert_eq!(
            repo.last_number("c1", VoucherType::Sales).await.unwrap(),
            Some("SA0002".to_string())
        );
        // Other types are unaffected
        assert!(repo
            .last_number("c1", VoucherType::Payment)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let db = db_with_ledgers().await;
        let repo = db.vouchers();

        for n in 1..=3 {
            let mut v = voucher(&format!("v{n}"), &format!("SA000{n}"));
            v.date = NaiveDate::from_ymd_opt(2024, 7, n as u32).unwrap();
            repo.insert(&v).await.unwrap();
        }

        let recent = repo.recent("c1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].voucher_number, "SA0003");
        assert_eq!(recent[1].voucher_number, "SA0002");
    }
}
