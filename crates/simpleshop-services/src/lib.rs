//! # simpleshop-services: The API Surface of SimpleShop CRM
//!
//! Entity services, the sale-recording workflow, and the dashboard — the
//! only layer the web frontend talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SimpleShop CRM Service Layer                         │
//! │                                                                         │
//! │  Frontend (React + TS)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               simpleshop-services (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────────┐ ┌──────────────┐ ┌─────────────────────┐    │   │
//! │  │  │CustomerService│ │ProductService│ │    SalesService     │    │   │
//! │  │  │ CRUD + totals │ │ CRUD + stock │ │ CRUD + workflow +   │    │   │
//! │  │  │               │ │ clamp + low- │ │ date-window queries │    │   │
//! │  │  │               │ │ stock filter │ │                     │    │   │
//! │  │  └───────┬───────┘ └──────┬───────┘ └──────────┬──────────┘    │   │
//! │  │          │                │                    │                │   │
//! │  │          └────────────────┴────────┬───────────┘                │   │
//! │  │                                    ▼                            │   │
//! │  │                          ┌──────────────────┐                   │   │
//! │  │                          │ DashboardService │                   │   │
//! │  │                          └──────────────────┘                   │   │
//! │  └─────────────────────────────────┬───────────────────────────────┘   │
//! │                                    │ Arc<dyn …Store>                   │
//! │                                    ▼                                    │
//! │  simpleshop-db: MemoryStore (fallback) or SQLite repositories          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`customer`] - Customer CRUD and the running purchase total
//! - [`product`] - Product CRUD, stock clamp, low-stock filter
//! - [`sales`] - Sale CRUD, the recording workflow, date windows
//! - [`dashboard`] - Summary metrics, recent sales, stock alerts
//! - [`error`] - The service error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simpleshop_services::Services;
//!
//! // Demo/fallback mode
//! let services = Services::in_memory();
//!
//! // Persistent mode
//! let db = simpleshop_db::Database::new(DbConfig::new("./simpleshop.db")).await?;
//! let services = Services::sqlite(&db);
//!
//! let sale = services.sales.create(draft).await?;
//! let summary = services.dashboard.summary().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod customer;
pub mod dashboard;
pub mod error;
pub mod product;
pub mod sales;

// =============================================================================
// Re-exports
// =============================================================================

pub use customer::CustomerService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use error::{ServiceError, ServiceResult};
pub use product::ProductService;
pub use sales::SalesService;

use std::sync::Arc;

use simpleshop_db::{CustomerStore, Database, MemoryStore, ProductStore, SaleStore};

/// The full service bundle, wired over one backend.
///
/// Cloning is cheap: every service shares its store through an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub products: ProductService,
    pub sales: SalesService,
    pub dashboard: DashboardService,
}

impl Services {
    /// Wires the services over explicit store handles.
    ///
    /// The three handles may be one object (the in-memory store) or three
    /// (the SQLite repositories) — the services don't care.
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        products: Arc<dyn ProductStore>,
        sales: Arc<dyn SaleStore>,
    ) -> Self {
        let customers = CustomerService::new(customers);
        let products = ProductService::new(products);
        let sales = SalesService::new(sales, products.clone(), customers.clone());
        let dashboard = DashboardService::new(customers.clone(), products.clone(), sales.clone());

        Services {
            customers,
            products,
            sales,
            dashboard,
        }
    }

    /// The non-persistent fallback mode: fresh in-memory tables,
    /// process-wide, gone on restart.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Services::new(store.clone(), store.clone(), store)
    }

    /// Persistent mode over an open SQLite database.
    pub fn sqlite(db: &Database) -> Self {
        Services::new(
            Arc::new(db.customers()),
            Arc::new(db.products()),
            Arc::new(db.sales()),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use simpleshop_core::CustomerDraft;

    #[tokio::test]
    async fn test_in_memory_services_share_one_store() {
        let services = Services::in_memory();

        let created = services
            .customers
            .create(CustomerDraft {
                name: "Ada".to_string(),
                email: String::new(),
                phone: String::new(),
                notes: String::new(),
            })
            .await
            .unwrap();

        // A clone of the bundle sees the same data
        let clone = services.clone();
        assert_eq!(clone.customers.get_all().await.len(), 1);
        assert_eq!(clone.customers.get_by_id(created.id).await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_sqlite_services_wire_up() {
        let db = Database::new(simpleshop_db::DbConfig::in_memory())
            .await
            .unwrap();
        let services = Services::sqlite(&db);

        assert!(services.customers.get_all().await.is_empty());
        let summary = services.dashboard.summary().await;
        assert_eq!(summary.customer_count, 0);
    }
}
