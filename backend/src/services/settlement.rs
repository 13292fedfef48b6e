//! Bid acceptance and settlement
//!
//! Accepting a bid closes the batch, rejects every competing bid, opens
//! the winner's inventory lot, and credits the farmer — all in one
//! database transaction. The batch row is locked first and every
//! precondition is re-checked under that lock, so two concurrent
//! acceptances on the same batch cannot both succeed: the loser observes
//! the committed sale and fails with `AlreadySettled`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::{settlement_plan, validate_amount, BidStatus, VerificationStatus};

use crate::error::{AppError, AppResult};
use crate::services::batch::Batch;
use crate::services::bid::Bid;
use crate::services::inventory::InventoryItem;

/// Settlement service
#[derive(Clone)]
pub struct SettlementService {
    db: PgPool,
}

/// Input for accepting a bid
#[derive(Debug, Deserialize)]
pub struct AcceptBidInput {
    /// Resale price per kg for the lot the winning distributor receives.
    /// Kept distinct from the bid amount, which prices the whole batch.
    pub selling_price_per_kg: Decimal,
}

/// Everything the accepted bid produced, returned to the caller as the
/// authoritative post-transaction state.
#[derive(Debug, Serialize)]
pub struct SettlementOutcome {
    pub batch: Batch,
    pub accepted_bid: Bid,
    pub rejected_bids: u64,
    pub inventory: InventoryItem,
}

impl SettlementService {
    /// Create a new SettlementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Accept one bid on behalf of the batch's owning farmer.
    pub async fn accept_bid(
        &self,
        farmer_id: Uuid,
        bid_id: Uuid,
        input: AcceptBidInput,
    ) -> AppResult<SettlementOutcome> {
        if let Err(msg) = validate_amount(input.selling_price_per_kg) {
            return Err(AppError::Validation {
                field: "selling_price_per_kg".to_string(),
                message: msg.to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        // Resolve the bid to its batch. Status is re-read below, after the
        // batch lock is held.
        let batch_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT batch_id FROM batch_bids WHERE id = $1",
        )
        .bind(bid_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Bid".to_string()))?;

        // Lock the batch. Settlement, bid placement, and availability
        // changes all take this lock, so the checks below see a consistent
        // snapshot until commit.
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                   verification_status, quality_grade, inspector_id, inspection_notes,
                   inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                   sold_price, created_at, updated_at
            FROM batches
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(batch_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        if batch.farmer_id != farmer_id {
            return Err(AppError::InsufficientPermissions(
                "Only the batch owner can accept bids".to_string(),
            ));
        }
        if batch.is_sold {
            // Another acceptance won the race and committed first.
            return Err(AppError::AlreadySettled(
                "Batch has already been sold".to_string(),
            ));
        }

        let status = VerificationStatus::parse(&batch.verification_status).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown batch status '{}'",
                batch.verification_status
            ))
        })?;
        if status != VerificationStatus::Verified {
            return Err(AppError::NotEligible(
                "Batch has not been verified by an inspector".to_string(),
            ));
        }
        if !batch.is_available_for_sale {
            return Err(AppError::NotEligible(
                "Batch is not listed for sale".to_string(),
            ));
        }

        // Re-read the bid under the batch lock; bid statuses only change
        // inside settlement, which holds the same lock.
        let bid = sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, batch_id, distributor_id, bid_amount, status, created_at
            FROM batch_bids
            WHERE id = $1
            "#,
        )
        .bind(bid_id)
        .fetch_one(&mut *tx)
        .await?;

        let bid_status = BidStatus::parse(&bid.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown bid status '{}'", bid.status)))?;
        if bid_status.is_settled() {
            return Err(AppError::InvalidStateTransition(format!(
                "Bid is no longer active (status: {})",
                bid.status
            )));
        }

        let plan = settlement_plan(batch.quantity, bid.bid_amount, input.selling_price_per_kg)
            .map_err(|msg| AppError::Validation {
                field: "selling_price_per_kg".to_string(),
                message: msg.to_string(),
            })?;

        // 1. Mark the winning bid accepted
        let accepted_bid = sqlx::query_as::<_, Bid>(
            r#"
            UPDATE batch_bids
            SET status = 'accepted'
            WHERE id = $1
            RETURNING id, batch_id, distributor_id, bid_amount, status, created_at
            "#,
        )
        .bind(bid_id)
        .fetch_one(&mut *tx)
        .await?;

        // 2. Reject every other active bid on the batch
        let rejected = sqlx::query(
            r#"
            UPDATE batch_bids
            SET status = 'rejected'
            WHERE batch_id = $1 AND id <> $2 AND status = 'active'
            "#,
        )
        .bind(batch_id)
        .bind(bid_id)
        .execute(&mut *tx)
        .await?;

        // 3. Close the batch
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET is_sold = true, is_available_for_sale = false, sold_to = $1,
                sold_price = $2, sold_date = now(), updated_at = now()
            WHERE id = $3
            RETURNING id, farmer_id, crop_name, quantity, harvest_date, farm_location,
                      verification_status, quality_grade, inspector_id, inspection_notes,
                      inspection_date, is_available_for_sale, is_sold, sold_to, sold_date,
                      sold_price, created_at, updated_at
            "#,
        )
        .bind(accepted_bid.distributor_id)
        .bind(plan.sold_price)
        .bind(batch_id)
        .fetch_one(&mut *tx)
        .await?;

        // 4. Open the winner's inventory lot with the full batch quantity
        let inventory = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO distributor_inventory
                (distributor_id, batch_id, quantity_available, purchase_price, selling_price_per_kg)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, distributor_id, batch_id, quantity_available, purchase_price,
                      selling_price_per_kg, acquired_date, created_at, updated_at
            "#,
        )
        .bind(accepted_bid.distributor_id)
        .bind(batch_id)
        .bind(plan.lot_quantity)
        .bind(plan.purchase_price)
        .bind(plan.selling_price_per_kg)
        .fetch_one(&mut *tx)
        .await?;

        // 5. Credit the farmer with the sale
        sqlx::query(
            r#"
            INSERT INTO user_revenue (user_id, amount, source)
            VALUES ($1, $2, 'batch_sale')
            "#,
        )
        .bind(farmer_id)
        .bind(plan.sold_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            batch_id = %batch_id,
            bid_id = %bid_id,
            sold_price = %plan.sold_price,
            rejected = rejected.rows_affected(),
            "Batch settled"
        );

        Ok(SettlementOutcome {
            batch,
            accepted_bid,
            rejected_bids: rejected.rows_affected(),
            inventory,
        })
    }
}
