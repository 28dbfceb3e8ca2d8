//! # Service Error Type
//!
//! Unified error type for the service layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SimpleShop CRM                         │
//! │                                                                         │
//! │  Frontend                    Service Layer                              │
//! │  ────────                    ─────────────                              │
//! │                                                                         │
//! │  customers.getById(7)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service method                                                  │  │
//! │  │  Result<T, ServiceError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Missing id?    ─── ServiceError::NotFound ────────────────────► │  │
//! │  │  Store failure? ─── reads: log + empty result                    │  │
//! │  │                 ─── writes: ServiceError::Store ───────────────► │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The read/write asymmetry is deliberate: list screens render an        │
//! │  empty table on a broken store, mutation forms surface the failure.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use simpleshop_core::{RecordId, ValidationError};
use simpleshop_db::DbError;
use thiserror::Error;

/// Errors surfaced by the entity services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The operation referenced a nonexistent identifier.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// Form input failed validation.
    ///
    /// The services themselves never produce this — validation belongs to
    /// the form layer — but callers that run `simpleshop_core::validation`
    /// rules before a write funnel the failure through this variant.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backing store reported a failure on a write path.
    #[error("Store error: {0}")]
    Store(DbError),
}

impl ServiceError {
    /// Creates a NotFound error.
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        ServiceError::NotFound { entity, id }
    }

    /// Whether this error is a NotFound.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

/// A store-level NotFound stays a NotFound; everything else is a
/// StoreFailure.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            other => ServiceError::Store(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: ServiceError = DbError::not_found("Customer", 7).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Customer not found: 7");
    }

    #[test]
    fn test_other_db_errors_map_to_store() {
        let err: ServiceError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert!(matches!(err, ServiceError::Store(_)));
    }
}
