//! # Ledger Repository
//!
//! Database operations for the chart of accounts.
//!
//! The entry form treats ledgers as a read-mostly directory: pickers list
//! the active ledgers, voucher lines reference them by id. Inserts exist
//! for setup and seeding, not for the entry flow.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use accountech_core::Ledger;

/// Repository for ledger database operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Lists all active ledgers for a company, ordered by name.
    pub async fn list_active(&self, company_id: &str) -> DbResult<Vec<Ledger>> {
        let ledgers: Vec<Ledger> = sqlx::query_as::<_, Ledger>(
            r#"
            SELECT id, company_id, name, current_balance, group_name, group_type, is_active
            FROM ledgers
            WHERE company_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(company_id, count = ledgers.len(), "Listed active ledgers");
        Ok(ledgers)
    }

    /// Gets a ledger by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Ledger>> {
        let ledger: Option<Ledger> = sqlx::query_as::<_, Ledger>(
            r#"
            SELECT id, company_id, name, current_balance, group_name, group_type, is_active
            FROM ledgers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ledger)
    }

    /// Inserts a ledger (setup and seeding).
    pub async fn insert(&self, ledger: &Ledger) -> DbResult<()> {
        debug!(id = %ledger.id, name = %ledger.name, "Inserting ledger");

        sqlx::query(
            r#"
            INSERT INTO ledgers (id, company_id, name, current_balance, group_name, group_type, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&ledger.id)
        .bind(&ledger.company_id)
        .bind(&ledger.name)
        .bind(ledger.current_balance)
        .bind(&ledger.group_name)
        .bind(&ledger.group_type)
        .bind(ledger.is_active)
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
    use accountech_core::Money;

    fn ledger(id: &str, name: &str) -> Ledger {
        Ledger {
            id: id.to_string(),
            company_id: "c1".to_string(),
            name: name.to_string(),
            current_balance: Money::from_rupees(1000),
            group_name: "Bank Accounts".to_string(),
            group_type: "asset".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.ledgers();

        repo.insert(&ledger("l1", "HDFC Bank")).await.unwrap();
        repo.insert(&ledger("l2", "Cash")).await.unwrap();

        let mut inactive = ledger("l3", "Old Account");
        inactive.is_active = false;
        repo.insert(&inactive).await.unwrap();

        let listed = repo.list_active("c1").await.unwrap();
        assert_eq!(listed.len(), 2);
        // Ordered by name
        assert_eq!(listed[0].name, "Cash");
        assert_eq!(listed[1].name, "HDFC Bank");
        assert_eq!(listed[0].current_balance, Money::from_rupees(1000));
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.ledgers().get_by_id("nope").await.unwrap().is_none());
    }
}
