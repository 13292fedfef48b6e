//! Batch lifecycle service
//!
//! A batch is created `pending` by a farmer, inspected exactly once into
//! `verified` or `rejected`, and sold at most once through bid settlement.
//! Batches are never deleted; corrections are modeled as future batches.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{
    validate_inspection, validate_quantity, validate_required_text, CertifyBatchInput,
    CreateBatchInput, InspectionDecision, UserRole, VerificationStatus,
};

use crate::error::{AppError, AppResult};
use crate::services::ProfileService;

/// Batch service for the producer-side lifecycle
#[derive(Clone)]
pub struct BatchService {
    db: PgPool,
}

/// A harvested batch as stored
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Batch {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub crop_name: String,
    pub quantity: Decimal,
    pub harvest_date: NaiveDate,
    pub farm_location: String,
    pub verification_status: String,
    pub quality_grade: Option<String>,
    pub inspector_id: Option<Uuid>,
    pub inspection_notes: Option<String>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub is_available_for_sale: bool,
    pub is_sold: bool,
    pub sold_to: Option<Uuid>,
    pub sold_date: Option<DateTime<Utc>>,
    pub sold_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact batch view attached to bid and purchase listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BatchSummary {
    pub id: Uuid,
    pub crop_name: String,
    pub quantity: Decimal,
    pub quality_grade: Option<String>,
    pub farmer_id: Uuid,
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new batch for the calling farmer. Starts `pending` and
    /// listed for sale.
    pub async fn create_batch(&self, farmer_id: Uuid, input: CreateBatchInput) -> AppResult<Batch> {
        if let Err(msg) = validate_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
            });
        }
        if let Err(msg) = validate_required_text(&input.crop_name) {
            return Err(AppError::Validation {
                field: "crop_name".to_string(),
                message: msg.to_string(),
            });
        }
        if let Err(msg) = validate_required_text(&input.farm_location) {
            return Err(AppError::Validation {
                field: "farm_location".to_string(),
                message: msg.to_string(),
            });
        }

        let batch = sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (farmer_id, crop_name, quantity, harvest_date, farm_location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                      verification_status, quality_grade, inspector_id, inspection_notes,
                      inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                      sold_price, created_at, updated_at
            "#,
        )
        .bind(farmer_id)
        .bind(input.crop_name.trim())
        .bind(input.quantity)
        .bind(input.harvest_date)
        .bind(input.farm_location.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(batch)
    }

    /// Record an inspector's verdict on a pending batch. One-shot: a batch
    /// that has already been inspected cannot be re-certified. The caller's
    /// inspector role is re-checked against the store, not the token.
    pub async fn certify_batch(
        &self,
        inspector_id: Uuid,
        batch_id: Uuid,
        input: CertifyBatchInput,
    ) -> AppResult<Batch> {
        let role = ProfileService::new(self.db.clone())
            .get_role(inspector_id)
            .await?;
        if role != UserRole::Inspector {
            return Err(AppError::InsufficientPermissions(
                "Only an inspector can certify a batch".to_string(),
            ));
        }

        if let Err(msg) = validate_inspection(input.decision, input.grade) {
            return Err(AppError::Validation {
                field: "grade".to_string(),
                message: msg.to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        // Lock the batch row so a concurrent certification serializes here
        let status = sqlx::query_scalar::<_, String>(
            "SELECT verification_status FROM batches WHERE id = $1 FOR UPDATE",
        )
        .bind(batch_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        let current = VerificationStatus::parse(&status)
            .ok_or_else(|| AppError::Internal(format!("Unknown batch status '{}'", status)))?;
        if !current.can_inspect() {
            return Err(AppError::InvalidStateTransition(format!(
                "Batch has already been inspected (status: {})",
                status
            )));
        }

        let new_status = match input.decision {
            InspectionDecision::Verified => VerificationStatus::Verified,
            InspectionDecision::Rejected => VerificationStatus::Rejected,
        };

        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET verification_status = $1, quality_grade = $2, inspector_id = $3,
                inspection_notes = $4, inspection_date = now(), updated_at = now()
            WHERE id = $5
            RETURNING id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                      verification_status, quality_grade, inspector_id, inspection_notes,
                      inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                      sold_price, created_at, updated_at
            "#,
        )
        .bind(new_status.as_str())
        .bind(input.grade.map(|g| g.as_str()))
        .bind(inspector_id)
        .bind(&input.notes)
        .bind(batch_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(batch)
    }

    /// Toggle whether a batch is listed for sale. Owner-only; a sold batch
    /// cannot be relisted.
    pub async fn set_availability(
        &self,
        farmer_id: Uuid,
        batch_id: Uuid,
        available: bool,
    ) -> AppResult<Batch> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, (Uuid, bool)>(
            "SELECT farmer_id, is_sold FROM batches WHERE id = $1 FOR UPDATE",
        )
        .bind(batch_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        if row.0 != farmer_id {
            return Err(AppError::InsufficientPermissions(
                "Only the batch owner can change its availability".to_string(),
            ));
        }
        if row.1 {
            return Err(AppError::InvalidStateTransition(
                "A sold batch cannot be relisted".to_string(),
            ));
        }

        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET is_available_for_sale = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                      verification_status, quality_grade, inspector_id, inspection_notes,
                      inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                      sold_price, created_at, updated_at
            "#,
        )
        .bind(available)
        .bind(batch_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(batch)
    }

    /// Fetch a single batch
    pub async fn get_batch(&self, batch_id: Uuid) -> AppResult<Batch> {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            WHERE id = $1
            "#,
        )
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        Ok(batch)
    }

    /// List all batches, newest first
    pub async fn list_batches(&self) -> AppResult<Vec<Batch>> {
        let batches = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }

    /// List batches owned by one farmer, newest first
    pub async fn list_batches_for_farmer(&self, farmer_id: Uuid) -> AppResult<Vec<Batch>> {
        let batches = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            WHERE farmer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(farmer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }

    /// List batches open for bidding: verified, listed, unsold. The
    /// distributor marketplace view.
    pub async fn list_open_batches(&self) -> AppResult<Vec<Batch>> {
        let batches = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            WHERE verification_status = 'verified'
              AND is_available_for_sale = true
              AND is_sold = false
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }

    /// List batches awaiting inspection, oldest first
    pub async fn list_pending_batches(&self) -> AppResult<Vec<Batch>> {
        let batches = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            WHERE verification_status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }
}
