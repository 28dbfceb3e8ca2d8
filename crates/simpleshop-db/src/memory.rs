//! # In-Memory Store
//!
//! The non-persistent fallback mode: one mutable table per collection,
//! process-wide, reset on restart.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MemoryStore                                      │
//! │                                                                         │
//! │  customers: RwLock ── Table { rows: Vec<Customer>, next_id }           │
//! │  products:  RwLock ── Table { rows: Vec<Product>,  next_id }           │
//! │  sales:     RwLock ── Table { rows: Vec<Sale>,     next_id }           │
//! │                                                                         │
//! │  next_id is a high-water counter: ids are never reused after a         │
//! │  delete, so "newest record has the highest id" always holds.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::new());
//! let customers: Arc<dyn CustomerStore> = store.clone();
//! ```
//!
//! One `MemoryStore` implements all three store traits, so a single
//! instance backs the whole service layer in tests and demo mode.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{CustomerStore, ProductStore, SaleStore};
use simpleshop_core::{
    Customer, CustomerDraft, CustomerUpdate, Money, Product, ProductDraft, ProductUpdate, RecordId,
    Sale, SaleDraft,
};

/// One collection: rows plus the id high-water mark.
struct Table<T> {
    rows: Vec<T>,
    next_id: RecordId,
}

impl<T> Table<T> {
    fn new() -> Self {
        Table {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out the next id and bumps the counter.
    fn assign_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory backend implementing every store trait.
pub struct MemoryStore {
    customers: RwLock<Table<Customer>>,
    products: RwLock<Table<Product>>,
    sales: RwLock<Table<Sale>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore {
            customers: RwLock::new(Table::new()),
            products: RwLock::new(Table::new()),
            sales: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

// =============================================================================
// CustomerStore
// =============================================================================

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn all(&self) -> DbResult<Vec<Customer>> {
        Ok(self.customers.read().await.rows.clone())
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Customer>> {
        let table = self.customers.read().await;
        Ok(table.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, draft: CustomerDraft) -> DbResult<Customer> {
        let mut table = self.customers.write().await;
        let customer = Customer {
            id: table.assign_id(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            notes: draft.notes,
            total_purchases: Money::zero(),
            created_at: Utc::now(),
        };
        debug!(id = customer.id, "Inserting customer (memory)");
        table.rows.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: RecordId, update: CustomerUpdate) -> DbResult<Customer> {
        let mut table = self.customers.write().await;
        let customer = table
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DbError::not_found("Customer", id))?;

        customer.name = update.name;
        customer.email = update.email;
        customer.phone = update.phone;
        customer.notes = update.notes;
        if let Some(total) = update.total_purchases {
            customer.total_purchases = total;
        }

        Ok(customer.clone())
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        let mut table = self.customers.write().await;
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        if table.rows.len() == before {
            return Err(DbError::not_found("Customer", id));
        }
        debug!(id, "Deleted customer (memory)");
        Ok(())
    }
}

// =============================================================================
// ProductStore
// =============================================================================

#[async_trait]
impl ProductStore for MemoryStore {
    async fn all(&self) -> DbResult<Vec<Product>> {
        Ok(self.products.read().await.rows.clone())
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Product>> {
        let table = self.products.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, draft: ProductDraft) -> DbResult<Product> {
        let mut table = self.products.write().await;
        let product = Product {
            id: table.assign_id(),
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
            low_stock_threshold: draft.low_stock_threshold,
            created_at: Utc::now(),
        };
        debug!(id = product.id, "Inserting product (memory)");
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: RecordId, update: ProductUpdate) -> DbResult<Product> {
        let mut table = self.products.write().await;
        let product = table
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::not_found("Product", id))?;

        product.name = update.name;
        product.price = update.price;
        product.stock = update.stock;
        product.low_stock_threshold = update.low_stock_threshold;

        Ok(product.clone())
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        let mut table = self.products.write().await;
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        if table.rows.len() == before {
            return Err(DbError::not_found("Product", id));
        }
        debug!(id, "Deleted product (memory)");
        Ok(())
    }
}

// =============================================================================
// SaleStore
// =============================================================================

#[async_trait]
impl SaleStore for MemoryStore {
    async fn all(&self) -> DbResult<Vec<Sale>> {
        Ok(self.sales.read().await.rows.clone())
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Sale>> {
        let table = self.sales.read().await;
        Ok(table.rows.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, draft: SaleDraft) -> DbResult<Sale> {
        let mut table = self.sales.write().await;
        let sale = Sale {
            id: table.assign_id(),
            customer_id: draft.customer_id,
            items: draft.items,
            total: draft.total,
            recorded_at: Utc::now(),
        };
        debug!(id = sale.id, customer_id = sale.customer_id, "Recording sale (memory)");
        table.rows.push(sale.clone());
        Ok(sale)
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        let mut table = self.sales.write().await;
        let before = table.rows.len();
        table.rows.retain(|s| s.id != id);
        if table.rows.len() == before {
            return Err(DbError::not_found("Sale", id));
        }
        debug!(id, "Deleted sale (memory)");
        Ok(())
    }

    async fn by_customer(&self, customer_id: RecordId) -> DbResult<Vec<Sale>> {
        let table = self.sales.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|s| s.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use simpleshop_core::LineItem;

    fn customer_draft(name: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let a = CustomerStore::insert(&store, customer_draft("Ada")).await.unwrap();
        let b = CustomerStore::insert(&store, customer_draft("Grace")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.total_purchases, Money::zero());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::new();

        let a = CustomerStore::insert(&store, customer_draft("Ada")).await.unwrap();
        CustomerStore::delete(&store, a.id).await.unwrap();
        let b = CustomerStore::insert(&store, customer_draft("Grace")).await.unwrap();

        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_update_keeps_total_when_none() {
        let store = MemoryStore::new();
        let customer = CustomerStore::insert(&store, customer_draft("Ada")).await.unwrap();

        // Simulate the workflow write-back first
        let mut update = CustomerUpdate::from_customer(&customer);
        update.total_purchases = Some(Money::from_cents(2000));
        CustomerStore::update(&store, customer.id, update).await.unwrap();

        // A plain edit must not clobber the running total
        let edit = CustomerUpdate {
            name: "Ada Lovelace".to_string(),
            ..CustomerUpdate::from_customer(&customer)
        };
        let updated = CustomerStore::update(&store, customer.id, edit).await.unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.total_purchases, Money::from_cents(2000));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        CustomerStore::insert(&store, customer_draft("Ada")).await.unwrap();

        let err = CustomerStore::delete(&store, 99).await.unwrap_err();
        assert!(err.is_not_found());

        // Collection unchanged
        assert_eq!(CustomerStore::all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sales_by_customer() {
        let store = MemoryStore::new();

        for customer_id in [1, 1, 2] {
            SaleStore::insert(
                &store,
                SaleDraft {
                    customer_id,
                    items: vec![LineItem {
                        product_id: 1,
                        quantity: 1,
                        unit_price: Money::from_cents(100),
                    }],
                    total: Money::from_cents(100),
                },
            )
            .await
            .unwrap();
        }

        let sales = SaleStore::by_customer(&store, 1).await.unwrap();
        assert_eq!(sales.len(), 2);
        assert!(sales.iter().all(|s| s.customer_id == 1));
    }
}
