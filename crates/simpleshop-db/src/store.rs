//! # Store Traits
//!
//! The injected storage abstraction every backend implements.
//!
//! ## Why Traits Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Swappable Backends                                 │
//! │                                                                         │
//! │  CustomerService ──┐                                                    │
//! │  ProductService  ──┼── Arc<dyn …Store> ──┬── MemoryStore (fallback)    │
//! │  SalesService    ──┘                     └── SQLite repositories       │
//! │                                                                         │
//! │  Service logic never changes when the backing store changes.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both modes implement the same traits, so client code deploys against
//! either without modification (and tests run against the in-memory mode).
//!
//! ## Contract Notes
//! - `get` returns `Ok(None)` for a missing id; `update`/`delete` return
//!   `DbError::NotFound` and leave the collection unchanged.
//! - `insert` assigns the record id: strictly greater than every id the
//!   collection has handed out before, starting at 1 when empty.
//! - There is no `update` on [`SaleStore`]: sales are immutable once
//!   recorded.
//! - The traits are plain CRUD on purpose. Read-modify-write sequences
//!   (stock decrements, running totals) live in the service layer; an
//!   atomic adjust operation on these traits is the seam where that would
//!   be hardened.

use async_trait::async_trait;

use crate::error::DbResult;
use simpleshop_core::{
    Customer, CustomerDraft, CustomerUpdate, Product, ProductDraft, ProductUpdate, RecordId, Sale,
    SaleDraft,
};

/// Storage contract for the customers collection.
///
/// Implement this trait to add a backend; services consume it as
/// `Arc<dyn CustomerStore>`.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Returns every customer, oldest first (ascending id).
    async fn all(&self) -> DbResult<Vec<Customer>>;

    /// Returns the customer with the given id, if present.
    async fn get(&self, id: RecordId) -> DbResult<Option<Customer>>;

    /// Inserts a new customer with a fresh id, a zero purchase total,
    /// and the current timestamp.
    async fn insert(&self, draft: CustomerDraft) -> DbResult<Customer>;

    /// Replaces the editable fields of a customer.
    ///
    /// `update.total_purchases == None` keeps the stored running total.
    async fn update(&self, id: RecordId, update: CustomerUpdate) -> DbResult<Customer>;

    /// Removes a customer. Their sales remain in place.
    async fn delete(&self, id: RecordId) -> DbResult<()>;
}

/// Storage contract for the products collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns every product, oldest first (ascending id).
    async fn all(&self) -> DbResult<Vec<Product>>;

    /// Returns the product with the given id, if present.
    async fn get(&self, id: RecordId) -> DbResult<Option<Product>>;

    /// Inserts a new product with a fresh id and the current timestamp.
    async fn insert(&self, draft: ProductDraft) -> DbResult<Product>;

    /// Replaces the editable fields of a product (including stock).
    async fn update(&self, id: RecordId, update: ProductUpdate) -> DbResult<Product>;

    /// Removes a product. Historical sale line items keep referencing its
    /// id and their frozen unit price.
    async fn delete(&self, id: RecordId) -> DbResult<()>;
}

/// Storage contract for the sales collection.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Returns every sale with its line items, oldest first.
    async fn all(&self) -> DbResult<Vec<Sale>>;

    /// Returns the sale with the given id, if present.
    async fn get(&self, id: RecordId) -> DbResult<Option<Sale>>;

    /// Records a sale: fresh id, current timestamp, line items persisted
    /// alongside. Returns the sale as stored.
    async fn insert(&self, draft: SaleDraft) -> DbResult<Sale>;

    /// Removes a sale and its line items. Stock and customer totals are
    /// NOT compensated.
    async fn delete(&self, id: RecordId) -> DbResult<()>;

    /// Returns the sales of one customer, oldest first.
    async fn by_customer(&self, customer_id: RecordId) -> DbResult<Vec<Sale>>;
}
