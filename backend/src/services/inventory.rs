//! Inventory allocation service
//!
//! Lots are opened by settlement and only ever drawn down by retailer
//! purchases. A purchase re-reads the lot's quantity under a row lock,
//! so concurrent purchases against one lot serialize and can never
//! oversell it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{draw_stock, purchase_cost, AllocationError, ProfileSummary, PurchaseInput};

use crate::error::{AppError, AppResult};
use crate::services::batch::BatchSummary;
use crate::services::ProfileService;

/// Inventory service for distributor lots and retailer purchases
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// A distributor's inventory lot as stored
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub distributor_id: Uuid,
    pub batch_id: Uuid,
    pub quantity_available: Decimal,
    pub purchase_price: Decimal,
    pub selling_price_per_kg: Decimal,
    pub acquired_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A retailer purchase as stored. Immutable once created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Purchase {
    pub id: Uuid,
    pub retailer_id: Uuid,
    pub distributor_id: Uuid,
    pub inventory_id: Uuid,
    pub batch_id: Uuid,
    pub quantity_purchased: Decimal,
    pub price_per_kg: Decimal,
    pub total_cost: Decimal,
    pub purchase_date: DateTime<Utc>,
}

/// An inventory lot enriched with its batch summary
#[derive(Debug, Clone, Serialize)]
pub struct InventoryWithBatch {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub batch: BatchSummary,
}

/// A lot on the retailer marketplace, with the holding distributor's
/// public profile attached (best effort)
#[derive(Debug, Clone, Serialize)]
pub struct AvailableInventory {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub batch: BatchSummary,
    pub profile: Option<ProfileSummary>,
}

/// A purchase enriched with batch and seller summaries
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithDetails {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub batch: BatchSummary,
    pub profile: Option<ProfileSummary>,
}

#[derive(Debug, FromRow)]
struct InventoryBatchRow {
    id: Uuid,
    distributor_id: Uuid,
    batch_id: Uuid,
    quantity_available: Decimal,
    purchase_price: Decimal,
    selling_price_per_kg: Decimal,
    acquired_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    crop_name: String,
    quantity: Decimal,
    quality_grade: Option<String>,
    farmer_id: Uuid,
}

impl InventoryBatchRow {
    fn split(self) -> (InventoryItem, BatchSummary) {
        (
            InventoryItem {
                id: self.id,
                distributor_id: self.distributor_id,
                batch_id: self.batch_id,
                quantity_available: self.quantity_available,
                purchase_price: self.purchase_price,
                selling_price_per_kg: self.selling_price_per_kg,
                acquired_date: self.acquired_date,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            BatchSummary {
                id: self.batch_id,
                crop_name: self.crop_name,
                quantity: self.quantity,
                quality_grade: self.quality_grade,
                farmer_id: self.farmer_id,
            },
        )
    }
}

#[derive(Debug, FromRow)]
struct PurchaseBatchRow {
    id: Uuid,
    retailer_id: Uuid,
    distributor_id: Uuid,
    inventory_id: Uuid,
    batch_id: Uuid,
    quantity_purchased: Decimal,
    price_per_kg: Decimal,
    total_cost: Decimal,
    purchase_date: DateTime<Utc>,
    crop_name: String,
    quantity: Decimal,
    quality_grade: Option<String>,
    farmer_id: Uuid,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Purchase a quantity from a distributor's lot. One transaction: the
    /// lot quantity is re-read under a row lock, the purchase row and
    /// revenue credit are inserted, and the lot is decremented — or none
    /// of it happens.
    pub async fn purchase(
        &self,
        retailer_id: Uuid,
        inventory_id: Uuid,
        input: PurchaseInput,
    ) -> AppResult<Purchase> {
        let mut tx = self.db.begin().await?;

        // Lock the lot; a stale quantity read before this call is
        // irrelevant, only this value counts.
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, distributor_id, batch_id, quantity_available, purchase_price,
                   selling_price_per_kg, acquired_date, created_at, updated_at
            FROM distributor_inventory
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(inventory_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory lot".to_string()))?;

        let new_balance = draw_stock(item.quantity_available, input.quantity_purchased).map_err(
            |e| match e {
                AllocationError::NonPositiveQuantity => AppError::Validation {
                    field: "quantity_purchased".to_string(),
                    message: e.to_string(),
                },
                AllocationError::InsufficientStock => AppError::InsufficientInventory(format!(
                    "Only {} kg available in this lot",
                    item.quantity_available
                )),
            },
        )?;

        let total_cost = purchase_cost(input.quantity_purchased, item.selling_price_per_kg);

        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO retailer_purchases
                (retailer_id, distributor_id, inventory_id, batch_id,
                 quantity_purchased, price_per_kg, total_cost)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, retailer_id, distributor_id, inventory_id, batch_id,
                      quantity_purchased, price_per_kg, total_cost, purchase_date
            "#,
        )
        .bind(retailer_id)
        .bind(item.distributor_id)
        .bind(item.id)
        .bind(item.batch_id)
        .bind(input.quantity_purchased)
        .bind(item.selling_price_per_kg)
        .bind(total_cost)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE distributor_inventory
            SET quantity_available = $1, updated_at = now()
            WHERE id = $2
            "#,
        )
        .bind(new_balance)
        .bind(item.id)
        .execute(&mut *tx)
        .await?;

        // Credit the lot holder
        sqlx::query(
            r#"
            INSERT INTO user_revenue (user_id, amount, source)
            VALUES ($1, $2, 'retailer_sale')
            "#,
        )
        .bind(item.distributor_id)
        .bind(total_cost)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            inventory_id = %inventory_id,
            quantity = %purchase.quantity_purchased,
            remaining = %new_balance,
            "Inventory purchase settled"
        );

        Ok(purchase)
    }

    /// Fetch a single lot
    pub async fn get_item(&self, inventory_id: Uuid) -> AppResult<InventoryItem> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, distributor_id, batch_id, quantity_available, purchase_price,
                   selling_price_per_kg, acquired_date, created_at, updated_at
            FROM distributor_inventory
            WHERE id = $1
            "#,
        )
        .bind(inventory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory lot".to_string()))?;

        Ok(item)
    }

    /// List a distributor's lots, most recently acquired first
    pub async fn list_for_distributor(
        &self,
        distributor_id: Uuid,
    ) -> AppResult<Vec<InventoryWithBatch>> {
        let rows = sqlx::query_as::<_, InventoryBatchRow>(
            r#"
            SELECT di.id, di.distributor_id, di.batch_id, di.quantity_available,
                   di.purchase_price, di.selling_price_per_kg, di.acquired_date,
                   di.created_at, di.updated_at,
                   b.crop_name, b.quantity, b.quality_grade, b.farmer_id
            FROM distributor_inventory di
            JOIN batches b ON b.id = di.batch_id
            WHERE di.distributor_id = $1
            ORDER BY di.acquired_date DESC
            "#,
        )
        .bind(distributor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let (item, batch) = r.split();
                InventoryWithBatch { item, batch }
            })
            .collect())
    }

    /// List all lots with stock remaining: the retailer marketplace view,
    /// with holder profiles attached best effort.
    pub async fn list_available(&self) -> AppResult<Vec<AvailableInventory>> {
        let rows = sqlx::query_as::<_, InventoryBatchRow>(
            r#"
            SELECT di.id, di.distributor_id, di.batch_id, di.quantity_available,
                   di.purchase_price, di.selling_price_per_kg, di.acquired_date,
                   di.created_at, di.updated_at,
                   b.crop_name, b.quantity, b.quality_grade, b.farmer_id
            FROM distributor_inventory di
            JOIN batches b ON b.id = di.batch_id
            WHERE di.quantity_available > 0
            ORDER BY di.acquired_date DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut holder_ids: Vec<Uuid> = rows.iter().map(|r| r.distributor_id).collect();
        holder_ids.sort();
        holder_ids.dedup();

        let summaries = match ProfileService::new(self.db.clone())
            .get_summaries(&holder_ids)
            .await
        {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!("Could not fetch distributor profiles: {}", e);
                Vec::new()
            }
        };

        Ok(rows
            .into_iter()
            .map(|r| {
                let (item, batch) = r.split();
                let profile = summaries
                    .iter()
                    .find(|s| s.user_id == item.distributor_id)
                    .cloned();
                AvailableInventory {
                    item,
                    batch,
                    profile,
                }
            })
            .collect())
    }

    /// List a retailer's purchases with batch and seller summaries,
    /// newest first
    pub async fn list_purchases_for_retailer(
        &self,
        retailer_id: Uuid,
    ) -> AppResult<Vec<PurchaseWithDetails>> {
        let rows = sqlx::query_as::<_, PurchaseBatchRow>(
            r#"
            SELECT rp.id, rp.retailer_id, rp.distributor_id, rp.inventory_id, rp.batch_id,
                   rp.quantity_purchased, rp.price_per_kg, rp.total_cost, rp.purchase_date,
                   b.crop_name, b.quantity, b.quality_grade, b.farmer_id
            FROM retailer_purchases rp
            JOIN batches b ON b.id = rp.batch_id
            WHERE rp.retailer_id = $1
            ORDER BY rp.purchase_date DESC
            "#,
        )
        .bind(retailer_id)
        .fetch_all(&self.db)
        .await?;

        let mut seller_ids: Vec<Uuid> = rows.iter().map(|r| r.distributor_id).collect();
        seller_ids.sort();
        seller_ids.dedup();

        let summaries = match ProfileService::new(self.db.clone())
            .get_summaries(&seller_ids)
            .await
        {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!("Could not fetch seller profiles: {}", e);
                Vec::new()
            }
        };

        Ok(rows
            .into_iter()
            .map(|r| {
                let profile = summaries
                    .iter()
                    .find(|s| s.user_id == r.distributor_id)
                    .cloned();
                let batch = BatchSummary {
                    id: r.batch_id,
                    crop_name: r.crop_name,
                    quantity: r.quantity,
                    quality_grade: r.quality_grade,
                    farmer_id: r.farmer_id,
                };
                PurchaseWithDetails {
                    purchase: Purchase {
                        id: r.id,
                        retailer_id: r.retailer_id,
                        distributor_id: r.distributor_id,
                        inventory_id: r.inventory_id,
                        batch_id: r.batch_id,
                        quantity_purchased: r.quantity_purchased,
                        price_per_kg: r.price_per_kg,
                        total_cost: r.total_cost,
                        purchase_date: r.purchase_date,
                    },
                    batch,
                    profile,
                }
            })
            .collect())
    }
}
