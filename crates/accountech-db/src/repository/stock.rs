//! # Stock Item Repository
//!
//! Database operations for the stock item catalog.
//!
//! ## Decimal Quantities
//! Stock on hand is a `rust_decimal::Decimal` in the domain model but
//! SQLite has no exact decimal type, so quantities are stored as TEXT
//! and parsed on read. A row whose quantity fails to parse surfaces as
//! `DbError::CorruptValue` instead of silently becoming zero.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};
use accountech_core::{Money, StockItem};

/// Row shape for stock_items; quantity is TEXT until parsed.
#[derive(Debug, sqlx::FromRow)]
struct StockItemRow {
    id: String,
    company_id: String,
    name: String,
    rate: i64,
    current_stock: String,
    hsn_code: Option<String>,
    unit_symbol: String,
    group_name: Option<String>,
    is_active: bool,
}

impl StockItemRow {
    fn into_item(self) -> DbResult<StockItem> {
        let current_stock = Decimal::from_str(&self.current_stock)
            .map_err(|_| DbError::corrupt("current_stock", &self.current_stock))?;
        Ok(StockItem {
            id: self.id,
            company_id: self.company_id,
            name: self.name,
            rate: Money::from_paise(self.rate),
            current_stock,
            hsn_code: self.hsn_code,
            unit_symbol: self.unit_symbol,
            group_name: self.group_name,
            is_active: self.is_active,
        })
    }
}

/// Repository for stock item database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Lists all active stock items for a company, ordered by name.
    pub async fn list_active(&self, company_id: &str) -> DbResult<Vec<StockItem>> {
        let rows: Vec<StockItemRow> = sqlx::query_as::<_, StockItemRow>(
            r#"
            SELECT id, company_id, name, rate, current_stock,
                   hsn_code, unit_symbol, group_name, is_active
            FROM stock_items
            WHERE company_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(company_id, count = rows.len(), "Listed active stock items");

        rows.into_iter().map(StockItemRow::into_item).collect()
    }

    /// Gets a stock item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StockItem>> {
        let row: Option<StockItemRow> = sqlx::query_as::<_, StockItemRow>(
            r#"
            SELECT id, company_id, name, rate, current_stock,
                   hsn_code, unit_symbol, group_name, is_active
            FROM stock_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StockItemRow::into_item).transpose()
    }

    /// Inserts a stock item (setup and seeding).
    pub async fn insert(&self, item: &StockItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting stock item");

        sqlx::query(
            r#"
            INSERT INTO stock_items (
                id, company_id, name, rate, current_stock,
                hsn_code, unit_symbol, group_name, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.company_id)
        .bind(&item.name)
        .bind(item.rate)
        .bind(item.current_stock.to_string())
        .bind(&item.hsn_code)
        .bind(&item.unit_symbol)
        .bind(&item.group_name)
        .bind(item.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn item(id: &str, name: &str, stock: &str) -> StockItem {
        StockItem {
            id: id.to_string(),
            company_id: "c1".to_string(),
            name: name.to_string(),
            rate: Money::from_rupees(250),
            current_stock: Decimal::from_str(stock).unwrap(),
            hsn_code: Some("8471".to_string()),
            unit_symbol: "kg".to_string(),
            group_name: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_roundtrip_fractional_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.stock_items();

        repo.insert(&item("s1", "Basmati Rice", "12.500")).await.unwrap();

        let fetched = repo.get_by_id("s1").await.unwrap().unwrap();
        assert_eq!(fetched.current_stock, Decimal::from_str("12.500").unwrap());
        assert_eq!(fetched.rate, Money::from_rupees(250));
        assert_eq!(fetched.unit_symbol, "kg");
    }

    #[tokio::test]
    async fn test_list_active_skips_inactive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.stock_items();

        repo.insert(&item("s1", "Widget", "4")).await.unwrap();
        let mut gone = item("s2", "Discontinued", "0");
        gone.is_active = false;
        repo.insert(&gone).await.unwrap();

        let listed = repo.list_active("c1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_corrupt_quantity_is_surfaced() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO stock_items (id, company_id, name, current_stock) \
             VALUES ('bad', 'c1', 'Broken', 'not-a-number')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.stock_items().get_by_id("bad").await.unwrap_err();
        assert!(matches!(err, DbError::CorruptValue { .. }));
    }
}
