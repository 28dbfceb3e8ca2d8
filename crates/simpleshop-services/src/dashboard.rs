//! # Dashboard Service
//!
//! The metrics and lists behind the landing screen.
//!
//! ## What the Screen Shows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐          │
//! │  │ Today's    │ │ This Month │ │ Total      │ │ Low Stock  │          │
//! │  │ Sales      │ │            │ │ Customers  │ │ Alerts     │          │
//! │  │  $142.50   │ │  $3,821.00 │ │     57     │ │     3      │          │
//! │  └────────────┘ └────────────┘ └────────────┘ └────────────┘          │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐           │
//! │  │ Recent Sales (last 10)   │  │ Stock Alerts             │           │
//! │  │ newest first             │  │ products at/below their  │           │
//! │  │                          │  │ threshold, with badge    │           │
//! │  └──────────────────────────┘  └──────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a composition of the three entity services; there
//! is no storage access of its own.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::customer::CustomerService;
use crate::product::ProductService;
use crate::sales::SalesService;
use simpleshop_core::{Money, Product, Sale};

/// Number of entries on the recent-sales list.
pub const RECENT_SALES_LIMIT: usize = 10;

/// The four metric cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    /// Sum of sale totals recorded today.
    pub revenue_today: Money,
    /// Sum of sale totals recorded this month.
    pub revenue_this_month: Money,
    /// Number of customer records.
    pub customer_count: usize,
    /// Number of products at or below their restock threshold.
    pub low_stock_count: usize,
}

/// Service composing the dashboard from the entity services.
#[derive(Clone)]
pub struct DashboardService {
    customers: CustomerService,
    products: ProductService,
    sales: SalesService,
}

impl DashboardService {
    /// Creates a dashboard service over the three entity services.
    pub fn new(
        customers: CustomerService,
        products: ProductService,
        sales: SalesService,
    ) -> Self {
        DashboardService {
            customers,
            products,
            sales,
        }
    }

    /// Computes the four metric cards.
    ///
    /// Each underlying read already degrades to empty on store failure,
    /// so a broken store renders as zeros rather than an error screen.
    pub async fn summary(&self) -> DashboardSummary {
        let revenue_today: Money = self
            .sales
            .sales_today()
            .await
            .iter()
            .map(|sale| sale.total)
            .sum();

        let revenue_this_month: Money = self
            .sales
            .sales_this_month()
            .await
            .iter()
            .map(|sale| sale.total)
            .sum();

        let customer_count = self.customers.get_all().await.len();
        let low_stock_count = self.products.low_stock_products().await.len();

        debug!(
            revenue_today = revenue_today.cents(),
            revenue_this_month = revenue_this_month.cents(),
            customer_count,
            low_stock_count,
            "Dashboard summary computed"
        );

        DashboardSummary {
            revenue_today,
            revenue_this_month,
            customer_count,
            low_stock_count,
        }
    }

    /// The most recent sales, newest first.
    ///
    /// Ties on the timestamp break by id, so two sales recorded in the
    /// same instant still list the later one first.
    pub async fn recent_sales(&self, limit: usize) -> Vec<Sale> {
        let mut sales = self.sales.get_all().await;
        sales.sort_by(|a, b| (b.recorded_at, b.id).cmp(&(a.recorded_at, a.id)));
        sales.truncate(limit);
        sales
    }

    /// The stock-alert list: every product at or below its threshold.
    ///
    /// Pair each entry with [`Product::stock_status`] for the badge.
    pub async fn stock_alerts(&self) -> Vec<Product> {
        self.products.low_stock_products().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Services;
    use simpleshop_core::{CustomerDraft, LineItem, ProductDraft, SaleDraft, StockStatus};

    async fn seeded() -> Services {
        let services = Services::in_memory();

        let customer = services
            .customers
            .create(CustomerDraft {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: String::new(),
                notes: String::new(),
            })
            .await
            .unwrap();

        let healthy = services
            .products
            .create(ProductDraft {
                name: "Widget".to_string(),
                price: Money::from_cents(1000),
                stock: 50,
                low_stock_threshold: 5,
            })
            .await
            .unwrap();

        services
            .products
            .create(ProductDraft {
                name: "Gizmo".to_string(),
                price: Money::from_cents(500),
                stock: 2,
                low_stock_threshold: 5,
            })
            .await
            .unwrap();

        for _ in 0..2 {
            services
                .sales
                .create(SaleDraft {
                    customer_id: customer.id,
                    items: vec![LineItem {
                        product_id: healthy.id,
                        quantity: 1,
                        unit_price: Money::from_cents(1000),
                    }],
                    total: Money::from_cents(1000),
                })
                .await
                .unwrap();
        }

        services
    }

    #[tokio::test]
    async fn test_summary_counts_everything() {
        let services = seeded().await;
        let summary = services.dashboard.summary().await;

        // Both sales were recorded "now", so they land in both windows
        assert_eq!(summary.revenue_today, Money::from_cents(2000));
        assert_eq!(summary.revenue_this_month, Money::from_cents(2000));
        assert_eq!(summary.customer_count, 1);
        assert_eq!(summary.low_stock_count, 1);
    }

    #[tokio::test]
    async fn test_recent_sales_newest_first_and_limited() {
        let services = seeded().await;

        let recent = services.dashboard.recent_sales(1).await;
        assert_eq!(recent.len(), 1);

        let all_recent = services.dashboard.recent_sales(RECENT_SALES_LIMIT).await;
        assert_eq!(all_recent.len(), 2);
        assert!(all_recent[0].recorded_at >= all_recent[1].recorded_at);
        assert!(all_recent[0].id > all_recent[1].id);
    }

    #[tokio::test]
    async fn test_stock_alerts_carry_badges() {
        let services = seeded().await;

        let alerts = services.dashboard.stock_alerts().await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].name, "Gizmo");
        assert_eq!(alerts[0].stock_status(), StockStatus::LowStock);
    }
}
