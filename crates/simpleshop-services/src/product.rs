//! # Product Service
//!
//! CRUD pass-through for products, the clamped stock decrement used by
//! the sale workflow, and the low-stock filter for the dashboard.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{ServiceError, ServiceResult};
use simpleshop_core::{Product, ProductDraft, ProductUpdate, RecordId};
use simpleshop_db::ProductStore;

/// Service for product operations.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Creates a product service over any store backend.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        ProductService { store }
    }

    /// Returns every product. Store failures log and yield an empty list.
    pub async fn get_all(&self) -> Vec<Product> {
        match self.store.all().await {
            Ok(products) => products,
            Err(err) => {
                error!(%err, "Failed to fetch products");
                Vec::new()
            }
        }
    }

    /// Returns one product or NotFound.
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Product> {
        match self.store.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ServiceError::not_found("Product", id)),
            Err(err) => {
                error!(id, %err, "Failed to fetch product");
                Err(ServiceError::not_found("Product", id))
            }
        }
    }

    /// Creates a product.
    pub async fn create(&self, draft: ProductDraft) -> ServiceResult<Product> {
        debug!(name = %draft.name, "Creating product");
        let product = self.store.insert(draft).await?;
        info!(id = product.id, "Product created");
        Ok(product)
    }

    /// Updates a product's editable fields.
    pub async fn update(&self, id: RecordId, update: ProductUpdate) -> ServiceResult<Product> {
        debug!(id, "Updating product");
        Ok(self.store.update(id, update).await?)
    }

    /// Deletes a product. Historical line items keep their frozen prices.
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        debug!(id, "Deleting product");
        Ok(self.store.delete(id).await?)
    }

    /// Decrements stock by the quantity sold, flooring at zero.
    ///
    /// ## Clamp Semantics
    /// ```text
    /// new stock = max(0, current stock − quantity)
    /// ```
    /// Selling more than is on hand silently clamps instead of erroring:
    /// the sale is already committed when this runs, so refusing here
    /// would help nobody. A negative quantity restocks.
    ///
    /// ## Read-Modify-Write
    /// No locking; two rapid sales of the same product can both read the
    /// same stale stock. Single-user trade-off — the store trait is the
    /// seam for an atomic decrement if ever needed.
    pub async fn update_stock(&self, id: RecordId, quantity: i64) -> ServiceResult<Product> {
        let product = self.get_by_id(id).await?;
        let new_stock = (product.stock - quantity).max(0);

        debug!(
            id,
            quantity,
            old_stock = product.stock,
            new_stock,
            "Adjusting product stock"
        );

        let mut update = ProductUpdate::from_product(&product);
        update.stock = new_stock;
        Ok(self.store.update(id, update).await?)
    }

    /// Returns the products at or below their restock threshold.
    ///
    /// Inclusive comparison; zero stock always qualifies. Store failures
    /// log and yield an empty list (no alerts beats a dead dashboard).
    pub async fn low_stock_products(&self) -> Vec<Product> {
        self.get_all()
            .await
            .into_iter()
            .filter(Product::is_low_stock)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use simpleshop_core::Money;
    use simpleshop_db::MemoryStore;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str, stock: i64, threshold: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: Money::from_cents(1000),
            stock,
            low_stock_threshold: threshold,
        }
    }

    #[tokio::test]
    async fn test_update_stock_decrements() {
        let svc = service();
        let product = svc.create(draft("Widget", 5, 2)).await.unwrap();

        let updated = svc.update_stock(product.id, 2).await.unwrap();
        assert_eq!(updated.stock, 3);
    }

    #[tokio::test]
    async fn test_update_stock_clamps_at_zero() {
        let svc = service();
        let product = svc.create(draft("Widget", 3, 2)).await.unwrap();

        // Over-sell: quantity exceeds stock
        let updated = svc.update_stock(product.id, 10).await.unwrap();
        assert_eq!(updated.stock, 0);

        // Selling from zero stays at zero
        let updated = svc.update_stock(product.id, 1).await.unwrap();
        assert_eq!(updated.stock, 0);
    }

    #[tokio::test]
    async fn test_update_stock_negative_quantity_restocks() {
        let svc = service();
        let product = svc.create(draft("Widget", 3, 2)).await.unwrap();

        let updated = svc.update_stock(product.id, -7).await.unwrap();
        assert_eq!(updated.stock, 10);
    }

    #[tokio::test]
    async fn test_low_stock_filter_is_inclusive() {
        let svc = service();
        svc.create(draft("Out", 0, 5)).await.unwrap();
        svc.create(draft("AtThreshold", 5, 5)).await.unwrap();
        svc.create(draft("Below", 2, 5)).await.unwrap();
        svc.create(draft("Healthy", 6, 5)).await.unwrap();

        let low: Vec<String> = svc
            .low_stock_products()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(low, vec!["Out", "AtThreshold", "Below"]);
    }

    #[tokio::test]
    async fn test_update_stock_missing_product() {
        let svc = service();
        assert!(svc.update_stock(1, 1).await.unwrap_err().is_not_found());
    }
}
