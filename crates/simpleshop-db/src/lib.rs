//! # simpleshop-db: Storage Layer for SimpleShop CRM
//!
//! This crate provides persistence for the CRM behind swappable store
//! traits. Two backends ship: in-memory tables (the non-persistent
//! fallback mode) and SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SimpleShop CRM Data Flow                            │
//! │                                                                         │
//! │  Service call (customers.get_all())                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   simpleshop-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌──────────────────┐   ┌──────────────┐  │   │
//! │  │   │ Store traits  │   │   Backends       │   │  Migrations  │  │   │
//! │  │   │ (store.rs)    │   │                  │   │  (embedded)  │  │   │
//! │  │   │               │◄──│ MemoryStore      │   │              │  │   │
//! │  │   │ CustomerStore │   │ CustomerRepo     │◄──│ 001_init.sql │  │   │
//! │  │   │ ProductStore  │   │ ProductRepo      │   │              │  │   │
//! │  │   │ SaleStore     │   │ SaleRepo         │   │              │  │   │
//! │  │   └───────────────┘   └──────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (./simpleshop.db) — or nothing at all (memory mode)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The store traits every backend implements
//! - [`memory`] - In-memory tables (fallback/demo/test mode)
//! - [`repository`] - SQLite implementations (customer, product, sale)
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simpleshop_db::{Database, DbConfig};
//!
//! // SQLite mode
//! let db = Database::new(DbConfig::new("./simpleshop.db")).await?;
//! let customers = db.customers().all().await?;
//!
//! // Fallback mode
//! let store = std::sync::Arc::new(simpleshop_db::MemoryStore::new());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use store::{CustomerStore, ProductStore, SaleStore};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
