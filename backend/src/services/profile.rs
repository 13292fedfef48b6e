//! Profile lookup service
//!
//! Read-only collaborator. The marketplace core uses profiles for two
//! things only: display enrichment on bid/inventory listings and
//! store-side role re-checks for protected operations. Profile CRUD
//! itself lives outside the core.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{ProfileDetails, ProfileSummary, UserRole};

use crate::error::{AppError, AppResult};

/// Profile service for read-only lookups
#[derive(Clone)]
pub struct ProfileService {
    db: PgPool,
}

/// A user profile as stored
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub details: Option<ProfileDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: Uuid,
    email: String,
    full_name: Option<String>,
    phone: Option<String>,
    role: String,
    details: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileService {
    /// Create a new ProfileService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fetch a full profile
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, email, full_name, phone, role, details, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        let role = UserRole::parse(&row.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}' in store", row.role)))?;

        // A malformed details payload degrades to None instead of failing
        // the lookup.
        let details = row
            .details
            .and_then(|value| serde_json::from_value::<ProfileDetails>(value).ok());

        Ok(Profile {
            user_id: row.user_id,
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            role,
            details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// Fetch the stored role for a user. Protected operations call this
    /// instead of trusting the role declared in the token.
    pub async fn get_role(&self, user_id: Uuid) -> AppResult<UserRole> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        UserRole::parse(&role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}' in store", role)))
    }

    /// Fetch public summaries for a set of users. Used for listing
    /// enrichment; a missing profile simply produces no summary.
    pub async fn get_summaries(&self, user_ids: &[Uuid]) -> AppResult<Vec<ProfileSummary>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, email, full_name, phone, role, details, created_at, updated_at
            FROM profiles
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let role = UserRole::parse(&row.role)?;
                let company_name = row
                    .details
                    .and_then(|value| serde_json::from_value::<ProfileDetails>(value).ok())
                    .and_then(|d| d.company_name().map(str::to_string));
                Some(ProfileSummary {
                    user_id: row.user_id,
                    full_name: row.full_name,
                    company_name,
                    role,
                })
            })
            .collect())
    }
}
