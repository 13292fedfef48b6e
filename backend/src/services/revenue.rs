//! Revenue aggregation service
//!
//! `user_revenue` is append-only; settlement and purchases are its only
//! writers. This service is the read side: totals and entry listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;

/// Revenue aggregation service
#[derive(Clone)]
pub struct RevenueService {
    db: PgPool,
}

/// An append-only revenue ledger row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenueEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// A user's revenue total
#[derive(Debug, Clone, Serialize)]
pub struct RevenueTotal {
    pub user_id: Uuid,
    pub total: Decimal,
}

impl RevenueService {
    /// Create a new RevenueService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sum of all revenue entries credited to a user
    pub async fn total_revenue(&self, user_id: Uuid) -> AppResult<RevenueTotal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM user_revenue WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(RevenueTotal { user_id, total })
    }

    /// List a user's revenue entries, newest first
    pub async fn list_entries(&self, user_id: Uuid) -> AppResult<Vec<RevenueEntry>> {
        let entries = sqlx::query_as::<_, RevenueEntry>(
            r#"
            SELECT id, user_id, amount, source, created_at
            FROM user_revenue
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}
