//! # SQLite Repositories
//!
//! Backend implementations of the store traits over a shared `SqlitePool`.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Storage Shape  ◄──────────►  Domain Shape                    │
//! │                                                                         │
//! │  customers.total_purchases_cents  ◄──►  Customer.total_purchases:Money │
//! │  products.price_cents             ◄──►  Product.price: Money           │
//! │  sales + sale_items (two tables)  ◄──►  Sale { items: Vec<LineItem> }  │
//! │                                                                         │
//! │  Each repository owns a private row struct (FromRow) and converts      │
//! │  at the boundary, so the domain types stay free of SQL concerns.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod product;
pub mod sale;
