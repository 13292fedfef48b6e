//! Bidding service
//!
//! Bids are offers against certified, listed, unsold batches. Placement
//! locks the batch row so a bid can never land on a batch that settlement
//! is closing concurrently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{
    bidding_eligibility, validate_amount, BatchEligibility, PlaceBidInput, ProfileSummary,
    UserRole, VerificationStatus,
};

use crate::error::{AppError, AppResult};
use crate::services::batch::BatchSummary;
use crate::services::ProfileService;

/// Bid service
#[derive(Clone)]
pub struct BidService {
    db: PgPool,
}

/// A bid as stored
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bid {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub distributor_id: Uuid,
    pub bid_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A bid enriched with the bidder's public profile. The profile is best
/// effort: lookup failure leaves it empty rather than failing the listing.
#[derive(Debug, Clone, Serialize)]
pub struct BidWithProfile {
    #[serde(flatten)]
    pub bid: Bid,
    pub profile: Option<ProfileSummary>,
}

/// A bid enriched with a summary of its batch, for the bidder's own view
#[derive(Debug, Clone, Serialize)]
pub struct BidWithBatch {
    #[serde(flatten)]
    pub bid: Bid,
    pub batch: BatchSummary,
}

#[derive(Debug, FromRow)]
struct BidBatchRow {
    id: Uuid,
    batch_id: Uuid,
    distributor_id: Uuid,
    bid_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    crop_name: String,
    quantity: Decimal,
    quality_grade: Option<String>,
    farmer_id: Uuid,
}

impl BidService {
    /// Create a new BidService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Place a bid against a batch. The batch must be verified, listed,
    /// and unsold at the moment the bid row is inserted.
    pub async fn place_bid(
        &self,
        distributor_id: Uuid,
        batch_id: Uuid,
        input: PlaceBidInput,
    ) -> AppResult<Bid> {
        if let Err(msg) = validate_amount(input.bid_amount) {
            return Err(AppError::Validation {
                field: "bid_amount".to_string(),
                message: msg.to_string(),
            });
        }

        let role = ProfileService::new(self.db.clone())
            .get_role(distributor_id)
            .await?;
        if role != UserRole::Distributor {
            return Err(AppError::InsufficientPermissions(
                "Only a distributor can place bids".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // Lock the batch so placement serializes with settlement; the
        // eligibility check below reads committed, current state.
        let row = sqlx::query_as::<_, (String, bool, bool)>(
            r#"
            SELECT verification_status, is_available_for_sale, is_sold
            FROM batches
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(batch_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        let status = VerificationStatus::parse(&row.0)
            .ok_or_else(|| AppError::Internal(format!("Unknown batch status '{}'", row.0)))?;

        match bidding_eligibility(status, row.1, row.2) {
            BatchEligibility::Eligible => {}
            BatchEligibility::AlreadySold => {
                return Err(AppError::NotEligible(
                    "Batch has already been sold".to_string(),
                ));
            }
            BatchEligibility::NotVerified => {
                return Err(AppError::NotEligible(
                    "Batch has not been verified by an inspector".to_string(),
                ));
            }
            BatchEligibility::NotListed => {
                return Err(AppError::NotEligible(
                    "Batch is not listed for sale".to_string(),
                ));
            }
        }

        let bid = sqlx::query_as::<_, Bid>(
            r#"
            INSERT INTO batch_bids (batch_id, distributor_id, bid_amount)
            VALUES ($1, $2, $3)
            RETURNING id, batch_id, distributor_id, bid_amount, status, created_at
            "#,
        )
        .bind(batch_id)
        .bind(distributor_id)
        .bind(input.bid_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(bid)
    }

    /// List active bids for a batch, best offer first (ties broken by
    /// earliest placement), each enriched with the bidder's profile.
    pub async fn list_bids_for_batch(&self, batch_id: Uuid) -> AppResult<Vec<BidWithProfile>> {
        let batch_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM batches WHERE id = $1)")
                .bind(batch_id)
                .fetch_one(&self.db)
                .await?;

        if !batch_exists {
            return Err(AppError::NotFound("Batch".to_string()));
        }

        let bids = sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, batch_id, distributor_id, bid_amount, status, created_at
            FROM batch_bids
            WHERE batch_id = $1 AND status = 'active'
            ORDER BY bid_amount DESC, created_at ASC
            "#,
        )
        .bind(batch_id)
        .fetch_all(&self.db)
        .await?;

        let mut distributor_ids: Vec<Uuid> = bids.iter().map(|b| b.distributor_id).collect();
        distributor_ids.sort();
        distributor_ids.dedup();

        // Profile enrichment is display-only; degrade to empty profiles on
        // lookup failure.
        let summaries = match ProfileService::new(self.db.clone())
            .get_summaries(&distributor_ids)
            .await
        {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!("Could not fetch bidder profiles: {}", e);
                Vec::new()
            }
        };

        Ok(bids
            .into_iter()
            .map(|bid| {
                let profile = summaries
                    .iter()
                    .find(|s| s.user_id == bid.distributor_id)
                    .cloned();
                BidWithProfile { bid, profile }
            })
            .collect())
    }

    /// List a distributor's own bids with batch summaries, newest first
    pub async fn list_bids_for_distributor(
        &self,
        distributor_id: Uuid,
    ) -> AppResult<Vec<BidWithBatch>> {
        let rows = sqlx::query_as::<_, BidBatchRow>(
            r#"
            SELECT bb.id, bb.batch_id, bb.distributor_id, bb.bid_amount, bb.status, bb.created_at,
                   b.crop_name, b.quantity, b.quality_grade, b.farmer_id
            FROM batch_bids bb
            JOIN batches b ON b.id = bb.batch_id
            WHERE bb.distributor_id = $1
            ORDER BY bb.created_at DESC
            "#,
        )
        .bind(distributor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BidWithBatch {
                bid: Bid {
                    id: r.id,
                    batch_id: r.batch_id,
                    distributor_id: r.distributor_id,
                    bid_amount: r.bid_amount,
                    status: r.status,
                    created_at: r.created_at,
                },
                batch: BatchSummary {
                    id: r.batch_id,
                    crop_name: r.crop_name,
                    quantity: r.quantity,
                    quality_grade: r.quality_grade,
                    farmer_id: r.farmer_id,
                },
            })
            .collect())
    }
}
