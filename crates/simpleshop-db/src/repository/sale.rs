//! # Sale Repository
//!
//! SQLite operations for sales and their line items.
//!
//! ## Two-Table Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales                      sale_items                                  │
//! │  ─────                      ──────────                                  │
//! │  id                    ┌──  sale_id (FK, ON DELETE CASCADE)            │
//! │  customer_id           │    product_id                                  │
//! │  total_cents           │    quantity                                    │
//! │  recorded_at  ◄────────┘    unit_price_cents (frozen at sale time)     │
//! │                                                                         │
//! │  The domain Sale embeds its Vec<LineItem>; this repository splits      │
//! │  and reassembles at the boundary.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inserting a sale writes the header row, then each item row, in that
//! order with no enclosing transaction — mirroring the sequential
//! best-effort shape of the sale workflow built on top.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::SaleStore;
use simpleshop_core::{LineItem, Money, RecordId, Sale, SaleDraft};

/// Storage-shaped sale header.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    customer_id: i64,
    total_cents: i64,
    recorded_at: DateTime<Utc>,
}

/// Storage-shaped line item.
#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    product_id: i64,
    quantity: i64,
    unit_price_cents: i64,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
        }
    }
}

const SELECT_SALE: &str = "SELECT id, customer_id, total_cents, recorded_at FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Loads the line items of one sale, in insertion order.
    async fn load_items(&self, sale_id: RecordId) -> DbResult<Vec<LineItem>> {
        let rows: Vec<LineItemRow> = sqlx::query_as(
            r#"
            SELECT product_id, quantity, unit_price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    /// Attaches line items to a batch of sale headers.
    async fn assemble(&self, rows: Vec<SaleRow>) -> DbResult<Vec<Sale>> {
        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.load_items(row.id).await?;
            sales.push(Sale {
                id: row.id,
                customer_id: row.customer_id,
                items,
                total: Money::from_cents(row.total_cents),
                recorded_at: row.recorded_at,
            });
        }
        Ok(sales)
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn all(&self) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(&format!("{SELECT_SALE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        self.assemble(rows).await
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Sale>> {
        let row: Option<SaleRow> = sqlx::query_as(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn insert(&self, draft: SaleDraft) -> DbResult<Sale> {
        let now = Utc::now();

        debug!(
            customer_id = draft.customer_id,
            items = draft.items.len(),
            total = draft.total.cents(),
            "Recording sale"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sales (customer_id, total_cents, recorded_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(draft.customer_id)
        .bind(draft.total.cents())
        .bind(now)
        .execute(&self.pool)
        .await?;

        let sale_id = result.last_insert_rowid();

        for item in &draft.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(sale_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price.cents())
            .execute(&self.pool)
            .await?;
        }

        Ok(Sale {
            id: sale_id,
            customer_id: draft.customer_id,
            items: draft.items,
            total: draft.total,
            recorded_at: now,
        })
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        debug!(id, "Deleting sale");

        // sale_items cascade via the FK
        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    async fn by_customer(&self, customer_id: RecordId) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> =
            sqlx::query_as(&format!("{SELECT_SALE} WHERE customer_id = ?1 ORDER BY id"))
                .bind(customer_id)
                .fetch_all(&self.pool)
                .await?;

        self.assemble(rows).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn draft(customer_id: RecordId) -> SaleDraft {
        SaleDraft {
            customer_id,
            items: vec![
                LineItem {
                    product_id: 1,
                    quantity: 2,
                    unit_price: Money::from_cents(1000),
                },
                LineItem {
                    product_id: 2,
                    quantity: 1,
                    unit_price: Money::from_cents(499),
                },
            ],
            total: Money::from_cents(2499),
        }
    }

    #[tokio::test]
    async fn test_insert_preserves_items_in_order() {
        let db = test_db().await;
        let repo = db.sales();

        let created = repo.insert(draft(1)).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].product_id, 1);
        assert_eq!(fetched.items[0].quantity, 2);
        assert_eq!(fetched.items[1].unit_price, Money::from_cents(499));
        assert_eq!(fetched.total, Money::from_cents(2499));
    }

    #[tokio::test]
    async fn test_by_customer_filters_exactly() {
        let db = test_db().await;
        let repo = db.sales();

        repo.insert(draft(1)).await.unwrap();
        repo.insert(draft(2)).await.unwrap();
        repo.insert(draft(1)).await.unwrap();

        let sales = repo.by_customer(1).await.unwrap();
        assert_eq!(sales.len(), 2);
        assert!(sales.iter().all(|s| s.customer_id == 1));
        assert!(repo.by_customer(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let db = test_db().await;
        let repo = db.sales();

        let sale = repo.insert(draft(1)).await.unwrap();
        repo.delete(sale.id).await.unwrap();

        assert!(repo.get(sale.id).await.unwrap().is_none());

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        assert!(db.sales().delete(5).await.unwrap_err().is_not_found());
    }
}
