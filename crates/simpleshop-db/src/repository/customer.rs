//! # Customer Repository
//!
//! SQLite operations for the customers collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::CustomerStore;
use simpleshop_core::{Customer, CustomerDraft, CustomerUpdate, Money, RecordId};

/// Storage-shaped customer record.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    notes: String,
    total_purchases_cents: i64,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            notes: row.notes,
            total_purchases: Money::from_cents(row.total_purchases_cents),
            created_at: row.created_at,
        }
    }
}

const SELECT_CUSTOMER: &str =
    "SELECT id, name, email, phone, notes, total_purchases_cents, created_at FROM customers";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Counts customers (for diagnostics and the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn all(&self) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_CUSTOMER} ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn get(&self, id: RecordId) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_CUSTOMER} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Customer::from))
    }

    async fn insert(&self, draft: CustomerDraft) -> DbResult<Customer> {
        let now = Utc::now();

        debug!(name = %draft.name, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, email, phone, notes, total_purchases_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            notes: draft.notes,
            total_purchases: Money::zero(),
            created_at: now,
        })
    }

    async fn update(&self, id: RecordId, update: CustomerUpdate) -> DbResult<Customer> {
        debug!(id, "Updating customer");

        // COALESCE keeps the stored running total when the edit form
        // submits without one
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                email = ?3,
                phone = ?4,
                notes = ?5,
                total_purchases_cents = COALESCE(?6, total_purchases_cents)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.notes)
        .bind(update.total_purchases.map(|m| m.cents()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        self.get(id)
            .await?
            .ok_or(DbError::not_found("Customer", id))
    }

    async fn delete(&self, id: RecordId) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
