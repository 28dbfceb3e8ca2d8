//! # Customer Service
//!
//! CRUD pass-through for customers, plus the running purchase total
//! maintained by the sale workflow.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{ServiceError, ServiceResult};
use simpleshop_core::{Customer, CustomerDraft, CustomerUpdate, Money, RecordId};
use simpleshop_db::CustomerStore;

/// Service for customer operations.
///
/// Holds the store behind `Arc<dyn CustomerStore>`, so the same service
/// runs against the in-memory tables or SQLite without modification.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    /// Creates a customer service over any store backend.
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        CustomerService { store }
    }

    /// Returns every customer.
    ///
    /// A store failure is logged and yields an empty list: the customer
    /// screen renders an empty table rather than crashing.
    pub async fn get_all(&self) -> Vec<Customer> {
        match self.store.all().await {
            Ok(customers) => customers,
            Err(err) => {
                error!(%err, "Failed to fetch customers");
                Vec::new()
            }
        }
    }

    /// Returns one customer or NotFound.
    ///
    /// A store failure on this path also surfaces as NotFound (logged
    /// first): a single-record read has no empty-list fallback.
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<Customer> {
        match self.store.get(id).await {
            Ok(Some(customer)) => Ok(customer),
            Ok(None) => Err(ServiceError::not_found("Customer", id)),
            Err(err) => {
                error!(id, %err, "Failed to fetch customer");
                Err(ServiceError::not_found("Customer", id))
            }
        }
    }

    /// Creates a customer. The running purchase total starts at zero.
    pub async fn create(&self, draft: CustomerDraft) -> ServiceResult<Customer> {
        debug!(name = %draft.name, "Creating customer");
        let customer = self.store.insert(draft).await?;
        info!(id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Updates a customer's editable fields.
    ///
    /// The edit form leaves `update.total_purchases` as `None`; only the
    /// sale workflow writes the running total.
    pub async fn update(&self, id: RecordId, update: CustomerUpdate) -> ServiceResult<Customer> {
        debug!(id, "Updating customer");
        Ok(self.store.update(id, update).await?)
    }

    /// Deletes a customer. Their recorded sales remain in place.
    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        debug!(id, "Deleting customer");
        Ok(self.store.delete(id).await?)
    }

    /// Adds `amount` to the customer's running purchase total.
    ///
    /// ## Read-Modify-Write
    /// Reads the current total, adds, writes the whole record back.
    /// There is no locking: two concurrent calls for the same customer can
    /// lose an update. Acceptable under the single-user assumption; the
    /// hardening path is an atomic adjust operation on the store trait.
    pub async fn update_total_purchases(&self, id: RecordId, amount: Money) -> ServiceResult<()> {
        let customer = self.get_by_id(id).await?;
        let new_total = customer.total_purchases + amount;

        debug!(
            id,
            amount = amount.cents(),
            new_total = new_total.cents(),
            "Updating customer purchase total"
        );

        let mut update = CustomerUpdate::from_customer(&customer);
        update.total_purchases = Some(new_total);
        self.store.update(id, update).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
