//! # Product Repository
//!
//! SQLite operations for the products collection.
//!
//! Stock arithmetic does NOT live here: the service layer reads, clamps,
//! and writes back through [`ProductStore::update`], keeping this
//! repository a plain CRUD mapping.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ProductStore;
use simpleshop_core::{Money, Product, ProductDraft, ProductUpdate, RecordId};

/// Storage-shaped product record.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price_cents: i64,
    stock: i64,
    low_stock_threshold: i64,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: Money::from_cents(row.price_cents),
            stock: row.stock,
            low_stock_threshold: row.low_stock_threshold,
            created_at: row.created_at,
        }
    }
}

const SELECT_PRODUCT: &str =
    "SELECT id, name, price_cents, stock, low_stock_threshold, created_at FROM products";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, draft: ProductDraft) -> DbResult<Product> {
        let now = Utc::now();

        debug!(name = %draft.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price_cents, stock, low_stock_threshold, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price.cents())
        .bind(draft.stock)
        .bind(draft.low_stock_threshold)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
            low_stock_threshold: draft.low_stock_threshold,
            created_at: now,
        })
    }

    async fn update(&self, id: RecordId, update: ProductUpdate) -> DbResult<Product> {
        debug!(id, stock = update.stock, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price_cents = ?3,
                stock = ?4,
                low_stock_threshold = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.price.cents())
        .bind(update.stock)
        .bind(update.low_stock_threshold)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get(id).await?.ok_or(DbError::not_found("Product", id))
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn draft(name: &str, price_cents: i64, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: Money::from_cents(price_cents),
            stock,
            low_stock_threshold: 5,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(draft("Widget", 1099, 20)).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price, Money::from_cents(1099));
        assert_eq!(fetched.stock, 20);
        assert_eq!(fetched.low_stock_threshold, 5);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(draft("Widget", 1099, 20)).await.unwrap();

        let mut update = ProductUpdate::from_product(&created);
        update.stock = 3;
        update.price = Money::from_cents(1299);
        let updated = repo.update(created.id, update).await.unwrap();

        assert_eq!(updated.stock, 3);
        assert_eq!(updated.price, Money::from_cents(1299));
    }

    #[tokio::test]
    async fn test_missing_product_operations() {
        let db = test_db().await;
        let repo = db.products();

        assert!(repo.get(7).await.unwrap().is_none());
        assert!(repo
            .update(7, ProductUpdate::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete(7).await.unwrap_err().is_not_found());
    }
}
