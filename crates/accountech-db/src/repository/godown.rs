//! # Godown Repository
//!
//! Database operations for storage locations. Only consulted when the
//! company is configured with multiple godowns; single-godown companies
//! never show a godown picker.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use accountech_core::Godown;

/// Repository for godown database operations.
#[derive(Debug, Clone)]
pub struct GodownRepository {
    pool: SqlitePool,
}

impl GodownRepository {
    /// Creates a new GodownRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GodownRepository { pool }
    }

    /// Lists all active godowns for a company, ordered by name.
    pub async fn list_active(&self, company_id: &str) -> DbResult<Vec<Godown>> {
        let godowns: Vec<Godown> = sqlx::query_as::<_, Godown>(
            r#"
            SELECT id, company_id, name, address, is_active
            FROM godowns
            WHERE company_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(company_id, count = godowns.len(), "Listed active godowns");
        Ok(godowns)
    }

    /// Inserts a godown (setup and seeding).
    pub async fn insert(&self, godown: &Godown) -> DbResult<()> {
        debug!(id = %godown.id, name = %godown.name, "Inserting godown");

        sqlx::query(
            r#"
            INSERT INTO godowns (id, company_id, name, address, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&godown.id)
        .bind(&godown.company_id)
        .bind(&godown.name)
        .bind(&godown.address)
        .bind(godown.is_active)
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

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.godowns();

        repo.insert(&Godown {
            id: "g1".to_string(),
            company_id: "c1".to_string(),
            name: "Main Godown".to_string(),
            address: Some("Pune".to_string()),
            is_active: true,
        })
        .await
        .unwrap();

        let listed = repo.list_active("c1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Main Godown");

        // Other companies see nothing
        assert!(repo.list_active("c2").await.unwrap().is_empty());
    }
}
