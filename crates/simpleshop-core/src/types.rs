//! # Domain Types
//!
//! Core domain types used throughout SimpleShop CRM.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name, email    │   │  name           │   │  customer_id    │       │
//! │  │  phone, notes   │   │  price (Money)  │   │  items[]        │       │
//! │  │  total_purchases│   │  stock          │   │  total (Money)  │       │
//! │  └─────────────────┘   │  low_stock_     │   │  recorded_at    │       │
//! │                        │    threshold    │   └────────┬────────┘       │
//! │                        └─────────────────┘            │                │
//! │                                              ┌────────▼────────┐       │
//! │                                              │    LineItem     │       │
//! │                                              │  product_id     │       │
//! │                                              │  quantity       │       │
//! │                                              │  unit_price     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Every entity has an `id: RecordId` (i64) assigned by the store on insert.
//! Ids are strictly increasing within a collection and never reused while
//! the store lives, so "newest record" always has the highest id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Identifier for a stored record, unique within its collection.
pub type RecordId = i64;

// =============================================================================
// Customer
// =============================================================================

/// A customer tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    /// Unique identifier, assigned by the store.
    pub id: RecordId,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number (free-form).
    pub phone: String,

    /// Free-text notes kept by the operator.
    pub notes: String,

    /// Running total of purchase amounts.
    ///
    /// Maintained exclusively by the sale-creation workflow; the edit form
    /// never writes this field. Invariant: never negative.
    pub total_purchases: Money,

    /// When the customer record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a customer. The running purchase total starts at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Fields for updating a customer.
///
/// ## Two Write Paths
/// ```text
/// Edit form      → total_purchases: None  (stored total untouched)
/// Sale workflow  → total_purchases: Some  (write-back of the new running sum)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    /// `None` keeps the stored running total.
    pub total_purchases: Option<Money>,
}

impl CustomerUpdate {
    /// Builds an edit-form update from an existing customer, leaving the
    /// running purchase total untouched.
    pub fn from_customer(customer: &Customer) -> Self {
        CustomerUpdate {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            notes: customer.notes.clone(),
            total_purchases: None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the store.
    pub id: RecordId,

    /// Display name shown in lists and on the sale form.
    pub name: String,

    /// Unit price. Always positive for a saleable product.
    pub price: Money,

    /// Units currently on hand. Never negative; only the sale workflow
    /// decrements it, and it floors at zero.
    pub stock: i64,

    /// Restock alert threshold: at or below this quantity the product is
    /// flagged on the dashboard. Zero stock always counts as low.
    pub low_stock_threshold: i64,

    /// When the product record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its restock threshold.
    ///
    /// The comparison is inclusive: `stock == low_stock_threshold` is low.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    /// The three-state stock badge shown on the dashboard.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.is_low_stock() {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Fields for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub low_stock_threshold: i64,
}

/// Fields for updating a product. The edit form replaces all four fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub low_stock_threshold: i64,
}

impl ProductUpdate {
    /// Builds an update carrying a product's current field values.
    /// The stock adjustment path patches `stock` on top of this.
    pub fn from_product(product: &Product) -> Self {
        ProductUpdate {
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            low_stock_threshold: product.low_stock_threshold,
        }
    }
}

/// Stock badge states for the dashboard alert list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockStatus {
    /// Nothing left on hand.
    OutOfStock,
    /// At or below the restock threshold.
    LowStock,
    /// Above the restock threshold.
    InStock,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable after creation: there is no edit path,
/// only deletion (which does not touch stock or customer totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    /// Unique identifier, assigned by the store.
    pub id: RecordId,

    /// The purchasing customer.
    pub customer_id: RecordId,

    /// Ordered line items, as entered on the sale form.
    pub items: Vec<LineItem>,

    /// Total amount. Equals the sum of line totals at creation time;
    /// not re-validated afterwards.
    pub total: Money,

    /// When the sale was recorded.
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

/// One product-quantity-price tuple within a sale.
/// Uses the snapshot pattern: the unit price is frozen at sale time and
/// stays correct even if the product is repriced later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// The product sold.
    pub product_id: RecordId,

    /// Units sold. Always positive.
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
}

impl LineItem {
    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Input for recording a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleDraft {
    pub customer_id: RecordId,
    pub items: Vec<LineItem>,
    /// Total as computed by the sale form.
    pub total: Money,
}

impl SaleDraft {
    /// Sums the line totals. The sale form keeps `total` equal to this;
    /// `validation::validate_sale_total` checks the invariant.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, threshold: i64) -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            price: Money::from_cents(1000),
            stock,
            low_stock_threshold: threshold,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(product(0, 5).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product(3, 5).stock_status(), StockStatus::LowStock);
        assert_eq!(product(5, 5).stock_status(), StockStatus::LowStock);
        assert_eq!(product(6, 5).stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(0, 0).is_low_stock());
        assert!(!product(1, 0).is_low_stock());
    }

    #[test]
    fn test_line_total() {
        let line = LineItem {
            product_id: 7,
            quantity: 3,
            unit_price: Money::from_cents(250),
        };
        assert_eq!(line.line_total().cents(), 750);
    }

    #[test]
    fn test_sale_draft_computed_total() {
        let draft = SaleDraft {
            customer_id: 1,
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
        };
        assert_eq!(draft.computed_total(), draft.total);
    }

    #[test]
    fn test_customer_json_contract() {
        // Field names must match what the frontend expects
        let customer = Customer {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            notes: String::new(),
            total_purchases: Money::from_cents(2000),
            created_at: "2026-03-01T09:30:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["totalPurchases"], 2000);
        assert_eq!(json["createdAt"], "2026-03-01T09:30:00Z");
    }

    #[test]
    fn test_product_update_from_product() {
        let p = product(10, 2);
        let update = ProductUpdate::from_product(&p);
        assert_eq!(update.stock, 10);
        assert_eq!(update.price, p.price);
    }

    #[test]
    fn test_customer_update_keeps_total_by_default() {
        let customer = Customer {
            id: 1,
            name: "Ada".to_string(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
            total_purchases: Money::from_cents(500),
            created_at: Utc::now(),
        };
        let update = CustomerUpdate::from_customer(&customer);
        assert!(update.total_purchases.is_none());
    }
}
