//! # Investment Repository
//!
//! Append-only log of operator-recorded stock purchases. Independent of
//! the catalog and the ledger; only the dashboard reads it.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use dyqan_core::sale::{day_key, month_key};
use dyqan_core::Investment;

const INVESTMENT_COLUMNS: &str = "id, amount_cents, note, created_at, day_key, month_key";

/// Repository for investment log operations.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    pool: SqlitePool,
}

impl InvestmentRepository {
    /// Creates a new InvestmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvestmentRepository { pool }
    }

    /// Appends an investment record.
    ///
    /// ## Arguments
    /// * `amount_cents` - amount spent; must be validated positive upstream
    /// * `note` - optional free text
    /// * `at` - when the purchase was recorded; day/month keys derive from it
    pub async fn record(
        &self,
        amount_cents: i64,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> DbResult<Investment> {
        let investment = Investment {
            id: Uuid::new_v4().to_string(),
            amount_cents,
            note,
            created_at: at,
            day_key: day_key(at),
            month_key: month_key(at),
        };

        debug!(id = %investment.id, amount = %investment.amount(), "Recording investment");

        sqlx::query(
            "INSERT INTO investments (id, amount_cents, note, created_at, day_key, month_key) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&investment.id)
        .bind(investment.amount_cents)
        .bind(&investment.note)
        .bind(investment.created_at)
        .bind(&investment.day_key)
        .bind(&investment.month_key)
        .execute(&self.pool)
        .await?;

        Ok(investment)
    }

    /// Lists all investments, newest first.
    pub async fn list(&self) -> DbResult<Vec<Investment>> {
        let investments = sqlx::query_as::<_, Investment>(&format!(
            "SELECT {INVESTMENT_COLUMNS} FROM investments ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(investments)
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
    async fn test_record_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.investments();

        let at = Utc::now();
        let saved = repo.record(120_000, Some("restock".into()), at).await.unwrap();
        assert_eq!(saved.amount_cents, 120_000);
        assert_eq!(saved.day_key, day_key(at));
        assert_eq!(saved.month_key, month_key(at));

        repo.record(5000, None, at).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        let total: i64 = all.iter().map(|i| i.amount_cents).sum();
        assert_eq!(total, 125_000);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected_by_schema() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.investments();

        // Validation happens upstream; the CHECK constraint is the last line
        let err = repo.record(0, None, Utc::now()).await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::ConstraintViolation { .. }));
    }
}
