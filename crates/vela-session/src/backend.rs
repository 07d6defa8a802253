//! # Backend Boundary
//!
//! Trait seams for the hosted backend. The backend itself (database SDK,
//! HTTP client, auth) is an external collaborator and out of scope; the
//! session only ever consumes these two contracts:
//!
//! - [`PriceLookup`]: resolve a unit price for a product/variant and
//!   customer type. A failure is a distinct, reportable error - the price
//!   is never silently defaulted to zero.
//! - [`OrderSubmitter`]: persist a finished order draft.
//!
//! Both calls are awaited by the initiating UI action; there is no
//! request deduplication, retry policy, or cancellation here. Failures
//! are non-fatal and leave session state untouched so the user can retry
//! without re-entering anything.

use async_trait::async_trait;
use thiserror::Error;

use crate::checkout::OrderDraft;
use vela_core::money::Money;
use vela_core::types::CustomerType;

// =============================================================================
// Backend Error
// =============================================================================

/// Failures from the backend boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or timed out. Retryable.
    #[error("Backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// The backend refused the request (bad data, business rule).
    /// Retrying the same request will not help.
    #[error("Backend rejected request: {reason}")]
    Rejected { reason: String },

    /// The referenced entity does not exist on the backend.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

impl BackendError {
    /// Whether the UI should offer a retry for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendError::Unavailable { .. })
    }
}

// =============================================================================
// Price Lookup
// =============================================================================

/// Resolves a unit price for a product/variant and customer type.
///
/// The returned price is frozen into the line item at add time; later
/// price changes on the backend do not affect lines already in the cart.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn unit_price(
        &self,
        product_id: &str,
        variant_id: Option<&str>,
        customer_type: CustomerType,
    ) -> Result<Money, BackendError>;
}

// =============================================================================
// Order Submitter
// =============================================================================

/// Persists a finished order draft, returning the backend order id.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, draft: &OrderDraft) -> Result<String, BackendError>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        let unavailable = BackendError::Unavailable {
            reason: "timeout".to_string(),
        };
        assert!(unavailable.is_retryable());

        let rejected = BackendError::Rejected {
            reason: "duplicate order".to_string(),
        };
        assert!(!rejected.is_retryable());

        let not_found = BackendError::NotFound {
            entity: "Product".to_string(),
            id: "p-1".to_string(),
        };
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = BackendError::NotFound {
            entity: "Product".to_string(),
            id: "p-1".to_string(),
        };
        assert_eq!(err.to_string(), "Product not found: p-1");
    }
}
