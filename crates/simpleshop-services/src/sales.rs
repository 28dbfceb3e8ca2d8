//! # Sales Service
//!
//! Sale CRUD, the sale-recording workflow, and the derived date-window
//! queries behind the dashboard and the customer detail screen.
//!
//! ## The Sale-Recording Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create(draft) — strictly sequential                 │
//! │                                                                         │
//! │  1. Persist sale + line items   ── failure propagates (nothing else    │
//! │          │                         has happened yet)                   │
//! │          ▼                                                              │
//! │  2. For each line item:                                                │
//! │     products.update_stock()     ── failure is warn!-logged and         │
//! │          │                         skipped: the sale is committed      │
//! │          ▼                                                              │
//! │  3. customers.update_total_purchases()                                 │
//! │          │                      ── same best-effort treatment          │
//! │          ▼                                                              │
//! │  4. Return the sale as constructed from input (trust-the-write)        │
//! │                                                                         │
//! │  NOT transactional. A failure between steps leaves stock/customer      │
//! │  totals behind the recorded sales. Acceptable for a single operator;   │
//! │  a saga or transaction boundary is the hardening path.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::customer::CustomerService;
use crate::error::{ServiceError, ServiceResult};
use crate::product::ProductService;
use simpleshop_core::{RecordId, Sale, SaleDraft};
use simpleshop_db::SaleStore;

/// Service for sale operations.
///
/// Owns the sale store and collaborates with the product and customer
/// services for the post-commit bookkeeping steps of the workflow.
#[derive(Clone)]
pub struct SalesService {
    store: Arc<dyn SaleStore>,
    products: ProductService,
    customers: CustomerService,
}

impl SalesService {
    /// Creates a sales service over any store backend.
    pub fn new(
        store: Arc<dyn SaleStore>,
        products: ProductService,
        customers: CustomerService,
    ) -> Self {
        SalesService {
            store,
            products,
            customers,
        }
    }

    /// Returns every sale. Store failures log and yield an empty list.
    pub async fn get_all(&self) -> Vec<Sale> {
        match self.store.all().await {
            Ok(sales) => sales,
            Err(err) => {
                error!(%err, "Failed to fetch sales");
                Vec::new()
            }
        }
    }

    /// Returns one sale or NotFound.
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Sale> {
        match self.store.get(id).await {
            Ok(Some(sale)) => Ok(sale),
            Ok(None) => Err(ServiceError::not_found("Sale", id)),
            Err(err) => {
                error!(id, %err, "Failed to fetch sale");
                Err(ServiceError::not_found("Sale", id))
            }
        }
    }

    /// Records a sale, then runs the best-effort bookkeeping steps.
    ///
    /// See the module docs for the full step diagram. The returned sale is
    /// the one constructed at insert time, not re-read from storage.
    pub async fn create(&self, draft: SaleDraft) -> ServiceResult<Sale> {
        debug!(
            customer_id = draft.customer_id,
            items = draft.items.len(),
            "Recording sale"
        );

        // Step 1: the sale itself. A failure here propagates cleanly.
        let sale = self.store.insert(draft).await?;

        // Step 2: decrement stock per line item. The sale is committed, so
        // a failed decrement is logged and skipped, never propagated.
        for item in &sale.items {
            if let Err(err) = self
                .products
                .update_stock(item.product_id, item.quantity)
                .await
            {
                warn!(
                    sale_id = sale.id,
                    product_id = item.product_id,
                    %err,
                    "Stock update failed after sale was recorded"
                );
            }
        }

        // Step 3: bump the customer's running total. Same best-effort rule.
        if let Err(err) = self
            .customers
            .update_total_purchases(sale.customer_id, sale.total)
            .await
        {
            warn!(
                sale_id = sale.id,
                customer_id = sale.customer_id,
                %err,
                "Customer total update failed after sale was recorded"
            );
        }

        info!(
            sale_id = sale.id,
            customer_id = sale.customer_id,
            total = %sale.total,
            items = sale.items.len(),
            "Sale recorded"
        );

        Ok(sale)
    }

    /// Deletes a sale.
    ///
    /// Stock and the customer's running total are NOT compensated: the
    /// numbers stay where the sale left them. Recorded sales are expected
    /// to be voided rarely, and never as an inventory operation.
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        debug!(id, "Deleting sale");
        Ok(self.store.delete(id).await?)
    }

    /// Returns the sales of one customer. Empty on store failure.
    pub async fn by_customer(&self, customer_id: RecordId) -> Vec<Sale> {
        match self.store.by_customer(customer_id).await {
            Ok(sales) => sales,
            Err(err) => {
                error!(customer_id, %err, "Failed to fetch customer sales");
                Vec::new()
            }
        }
    }

    /// Sales recorded on the given calendar date (UTC).
    ///
    /// ## Prefix Matching
    /// The window is a textual prefix match of the RFC 3339 timestamp
    /// against `YYYY-MM-DD` — not a timezone-aware calendar comparison.
    /// Behavior at timezone boundaries is whatever the host clock
    /// produces.
    pub async fn sales_on(&self, date: NaiveDate) -> Vec<Sale> {
        let prefix = date.format("%Y-%m-%d").to_string();
        self.sales_with_prefix(&prefix).await
    }

    /// Sales recorded today (host clock, UTC).
    pub async fn sales_today(&self) -> Vec<Sale> {
        self.sales_on(Utc::now().date_naive()).await
    }

    /// Sales recorded in the given year-month.
    pub async fn sales_in_month(&self, year: i32, month: u32) -> Vec<Sale> {
        let prefix = format!("{year:04}-{month:02}");
        self.sales_with_prefix(&prefix).await
    }

    /// Sales recorded this month (host clock, UTC).
    pub async fn sales_this_month(&self) -> Vec<Sale> {
        let now = Utc::now();
        self.sales_in_month(now.year(), now.month()).await
    }

    async fn sales_with_prefix(&self, prefix: &str) -> Vec<Sale> {
        self.get_all()
            .await
            .into_iter()
            .filter(|sale| sale.recorded_at.to_rfc3339().starts_with(prefix))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use simpleshop_core::{
        CustomerDraft, LineItem, Money, ProductDraft,
    };
    use simpleshop_db::MemoryStore;

    struct Fixture {
        sales: SalesService,
        products: ProductService,
        customers: CustomerService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let products = ProductService::new(store.clone());
        let customers = CustomerService::new(store.clone());
        let sales = SalesService::new(store, products.clone(), customers.clone());
        Fixture {
            sales,
            products,
            customers,
        }
    }

    async fn seed_customer(fx: &Fixture) -> RecordId {
        fx.customers
            .create(CustomerDraft {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: String::new(),
                notes: String::new(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_product(fx: &Fixture, stock: i64, price_cents: i64) -> RecordId {
        fx.products
            .create(ProductDraft {
                name: "Widget".to_string(),
                price: Money::from_cents(price_cents),
                stock,
                low_stock_threshold: 1,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_sale_updates_stock_and_total() {
        let fx = fixture();
        let customer_id = seed_customer(&fx).await;
        let product_id = seed_product(&fx, 5, 1000).await;

        let sale = fx
            .sales
            .create(SaleDraft {
                customer_id,
                items: vec![LineItem {
                    product_id,
                    quantity: 2,
                    unit_price: Money::from_cents(1000),
                }],
                total: Money::from_cents(2000),
            })
            .await
            .unwrap();

        assert_eq!(sale.total, Money::from_cents(2000));

        let product = fx.products.get_by_id(product_id).await.unwrap();
        assert_eq!(product.stock, 3);

        let customer = fx.customers.get_by_id(customer_id).await.unwrap();
        assert_eq!(customer.total_purchases, Money::from_cents(2000));
    }

    #[tokio::test]
    async fn test_create_sale_survives_missing_product() {
        let fx = fixture();
        let customer_id = seed_customer(&fx).await;

        // Product 42 does not exist: the stock step fails, the sale and
        // the customer total must still land.
        let sale = fx
            .sales
            .create(SaleDraft {
                customer_id,
                items: vec![LineItem {
                    product_id: 42,
                    quantity: 1,
                    unit_price: Money::from_cents(500),
                }],
                total: Money::from_cents(500),
            })
            .await
            .unwrap();

        assert_eq!(fx.sales.get_by_id(sale.id).await.unwrap().id, sale.id);
        let customer = fx.customers.get_by_id(customer_id).await.unwrap();
        assert_eq!(customer.total_purchases, Money::from_cents(500));
    }

    #[tokio::test]
    async fn test_create_sale_survives_missing_customer() {
        let fx = fixture();
        let product_id = seed_product(&fx, 5, 1000).await;

        // Customer 42 does not exist: the total step fails, the sale and
        // the stock decrement must still land.
        let sale = fx
            .sales
            .create(SaleDraft {
                customer_id: 42,
                items: vec![LineItem {
                    product_id,
                    quantity: 1,
                    unit_price: Money::from_cents(1000),
                }],
                total: Money::from_cents(1000),
            })
            .await
            .unwrap();

        assert_eq!(sale.customer_id, 42);
        assert_eq!(fx.products.get_by_id(product_id).await.unwrap().stock, 4);
    }

    #[tokio::test]
    async fn test_delete_sale_does_not_restock() {
        let fx = fixture();
        let customer_id = seed_customer(&fx).await;
        let product_id = seed_product(&fx, 5, 1000).await;

        let sale = fx
            .sales
            .create(SaleDraft {
                customer_id,
                items: vec![LineItem {
                    product_id,
                    quantity: 2,
                    unit_price: Money::from_cents(1000),
                }],
                total: Money::from_cents(2000),
            })
            .await
            .unwrap();

        fx.sales.delete(sale.id).await.unwrap();

        // The decrement and the running total stay where the sale left them
        assert_eq!(fx.products.get_by_id(product_id).await.unwrap().stock, 3);
        assert_eq!(
            fx.customers
                .get_by_id(customer_id)
                .await
                .unwrap()
                .total_purchases,
            Money::from_cents(2000)
        );
    }

    #[tokio::test]
    async fn test_sales_in_month_matches_fixed_window() {
        let fx = fixture();
        let customer_id = seed_customer(&fx).await;
        let product_id = seed_product(&fx, 50, 100).await;

        for _ in 0..3 {
            fx.sales
                .create(SaleDraft {
                    customer_id,
                    items: vec![LineItem {
                        product_id,
                        quantity: 1,
                        unit_price: Money::from_cents(100),
                    }],
                    total: Money::from_cents(100),
                })
                .await
                .unwrap();
        }

        let now = Utc::now();

        // Every sale was just recorded: all fall in the current window
        assert_eq!(fx.sales.sales_in_month(now.year(), now.month()).await.len(), 3);
        assert_eq!(fx.sales.sales_on(now.date_naive()).await.len(), 3);

        // A window nothing was recorded in
        assert!(fx.sales.sales_in_month(1999, 1).await.is_empty());
        assert!(fx
            .sales
            .sales_on(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_by_customer_filters_exactly() {
        let fx = fixture();
        let ada = seed_customer(&fx).await;
        let product_id = seed_product(&fx, 50, 100).await;

        let draft = |customer_id| SaleDraft {
            customer_id,
            items: vec![LineItem {
                product_id,
                quantity: 1,
                unit_price: Money::from_cents(100),
            }],
            total: Money::from_cents(100),
        };

        fx.sales.create(draft(ada)).await.unwrap();
        fx.sales.create(draft(999)).await.unwrap();
        fx.sales.create(draft(ada)).await.unwrap();

        assert_eq!(fx.sales.by_customer(ada).await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_sale_is_not_found() {
        let fx = fixture();
        assert!(fx.sales.delete(3).await.unwrap_err().is_not_found());
    }
}
