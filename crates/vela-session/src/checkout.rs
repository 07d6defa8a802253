//! # Checkout Flow
//!
//! The two async paths through the backend boundary: pricing an item
//! into the cart, and submitting the finished order.
//!
//! ## Failure discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  add_priced_item:  lookup ──fail──► session untouched, error up    │
//! │                    lookup ──ok────► cart mutated                    │
//! │                                                                     │
//! │  submit_order:     submit ──fail──► session untouched, error up    │
//! │                    submit ──ok────► session cleared, receipt back  │
//! │                                                                     │
//! │  The user never re-enters data after a backend failure.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::backend::{BackendError, OrderSubmitter, PriceLookup};
use crate::state::SessionState;
use vela_core::cart::LineItem;
use vela_core::error::CoreError;
use vela_core::money::Money;
use vela_core::totals::OrderTotals;
use vela_core::types::{CustomerType, ItemCandidate, ItemSource};
use vela_core::validation::validate_quantity;

// =============================================================================
// Session Error
// =============================================================================

/// Errors surfaced to the UI from the checkout flow.
///
/// None is fatal: backend failures are retryable notifications, core
/// errors are user-correctable, and the session survives all of them.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Submitting an empty cart makes no sense.
    #[error("Cart is empty")]
    EmptyCart,

    /// Business rule violation from vela-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Price lookup or order submission failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

// =============================================================================
// Unpriced Item
// =============================================================================

/// An inventory item the UI wants to add, before its price is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UnpricedItem {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub unit_cost: Option<Money>,
    pub available_quantity: Option<i64>,
    pub quantity: i64,
}

// =============================================================================
// Order Draft
// =============================================================================

/// Snapshot of the session handed to the submitter: line items plus all
/// derived totals as plain numeric fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    pub customer_type: CustomerType,
    pub totals: OrderTotals,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Builds a draft from the current session. Fails on an empty cart.
    pub fn from_state(state: &SessionState) -> Result<OrderDraft, SessionError> {
        state.with_session(|session| {
            if session.cart().is_empty() {
                return Err(SessionError::EmptyCart);
            }
            Ok(OrderDraft {
                items: session.items().to_vec(),
                customer_type: session.customer_type(),
                totals: session.totals(),
                created_at: Utc::now(),
            })
        })
    }
}

/// What the UI gets back after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedOrder {
    pub order_id: String,
    pub totals: OrderTotals,
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
}

// =============================================================================
// Priced Add
// =============================================================================

/// Resolves the unit price for an inventory item, then adds it to the
/// cart. A lookup failure propagates without touching the cart.
pub async fn add_priced_item(
    state: &SessionState,
    pricing: &dyn PriceLookup,
    item: UnpricedItem,
) -> Result<String, SessionError> {
    debug!(product_id = %item.product_id, quantity = item.quantity, "add_priced_item");
    validate_quantity(item.quantity).map_err(CoreError::from)?;

    let customer_type = state.with_session(|s| s.customer_type());
    let unit_price = pricing
        .unit_price(&item.product_id, item.variant_id.as_deref(), customer_type)
        .await
        .map_err(|e| {
            warn!(product_id = %item.product_id, error = %e, "price lookup failed");
            e
        })?;

    let candidate = ItemCandidate {
        source: ItemSource::Inventory {
            product_id: item.product_id,
            variant_id: item.variant_id,
            available_quantity: item.available_quantity,
        },
        name: item.name,
        unit_price,
        unit_cost: item.unit_cost,
        quantity: item.quantity,
    };

    let id = state.with_session_mut(|s| s.add_item(candidate))?;
    Ok(id)
}

// =============================================================================
// Order Submission
// =============================================================================

/// Submits the current session as an order.
///
/// On success the session is cleared for the next sale. On failure the
/// session is preserved unchanged and the error is reported upward; the
/// UI shows a retryable notification.
pub async fn submit_order(
    state: &SessionState,
    submitter: &dyn OrderSubmitter,
) -> Result<SubmittedOrder, SessionError> {
    let draft = OrderDraft::from_state(state)?;
    debug!(
        items = draft.items.len(),
        final_amount = %draft.totals.final_amount,
        "submitting order"
    );

    let order_id = submitter.submit(&draft).await.map_err(|e| {
        warn!(error = %e, retryable = e.is_retryable(), "order submission failed");
        e
    })?;

    state.with_session_mut(|s| s.clear());

    info!(
        order_id = %order_id,
        final_amount = %draft.totals.final_amount,
        items = draft.items.len(),
        "order submitted"
    );

    Ok(SubmittedOrder {
        order_id,
        totals: draft.totals,
        submitted_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TablePricing {
        prices: HashMap<String, i64>,
    }

    impl TablePricing {
        fn new(entries: &[(&str, i64)]) -> Self {
            TablePricing {
                prices: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PriceLookup for TablePricing {
        async fn unit_price(
            &self,
            product_id: &str,
            _variant_id: Option<&str>,
            customer_type: CustomerType,
        ) -> Result<Money, BackendError> {
            let cents = self.prices.get(product_id).ok_or_else(|| {
                BackendError::NotFound {
                    entity: "Product".to_string(),
                    id: product_id.to_string(),
                }
            })?;
            // Flat wholesale markdown for test purposes
            let cents = match customer_type {
                CustomerType::Retail => *cents,
                CustomerType::Wholesale => *cents - 100,
            };
            Ok(Money::from_cents(cents))
        }
    }

    struct RecordingSubmitter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RecordingSubmitter {
        fn ok() -> Self {
            RecordingSubmitter {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            RecordingSubmitter {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, _draft: &OrderDraft) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(BackendError::Unavailable {
                    reason: "connection reset".to_string(),
                })
            } else {
                Ok("order-123".to_string())
            }
        }
    }

    fn unpriced(product_id: &str, quantity: i64) -> UnpricedItem {
        UnpricedItem {
            product_id: product_id.to_string(),
            variant_id: None,
            name: format!("Product {}", product_id),
            unit_cost: None,
            available_quantity: None,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_priced_item_uses_lookup_price() {
        let state = SessionState::new();
        let pricing = TablePricing::new(&[("A", 1000)]);

        let id = add_priced_item(&state, &pricing, unpriced("A", 2))
            .await
            .unwrap();

        state.with_session(|s| {
            let item = s.cart().get(&id).unwrap();
            assert_eq!(item.unit_price.cents(), 1000);
            assert_eq!(item.line_total().cents(), 2000);
        });
    }

    #[tokio::test]
    async fn test_add_priced_item_wholesale_price() {
        let state = SessionState::new();
        state.with_session_mut(|s| s.set_customer_type(CustomerType::Wholesale));
        let pricing = TablePricing::new(&[("A", 1000)]);

        let id = add_priced_item(&state, &pricing, unpriced("A", 1))
            .await
            .unwrap();

        state.with_session(|s| {
            assert_eq!(s.cart().get(&id).unwrap().unit_price.cents(), 900);
        });
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_cart_untouched() {
        let state = SessionState::new();
        let pricing = TablePricing::new(&[]);

        let err = add_priced_item(&state, &pricing, unpriced("missing", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Backend(_)));
        assert!(state.with_session(|s| s.cart().is_empty()));
    }

    #[tokio::test]
    async fn test_submit_empty_cart_rejected() {
        let state = SessionState::new();
        let submitter = RecordingSubmitter::ok();

        let err = submit_order(&state, &submitter).await.unwrap_err();

        assert!(matches!(err, SessionError::EmptyCart));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_success_clears_session() {
        let state = SessionState::new();
        let pricing = TablePricing::new(&[("A", 1000)]);
        add_priced_item(&state, &pricing, unpriced("A", 2))
            .await
            .unwrap();
        state.with_session_mut(|s| s.set_amount_paid(Money::from_cents(2000)));

        let submitter = RecordingSubmitter::ok();
        let submitted = submit_order(&state, &submitter).await.unwrap();

        assert_eq!(submitted.order_id, "order-123");
        assert_eq!(submitted.totals.final_amount.cents(), 2000);
        // Session is fresh for the next sale
        state.with_session(|s| {
            assert!(s.cart().is_empty());
            assert!(s.amount_paid().is_zero());
        });
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_session_for_retry() {
        let state = SessionState::new();
        let pricing = TablePricing::new(&[("A", 1000)]);
        add_priced_item(&state, &pricing, unpriced("A", 2))
            .await
            .unwrap();

        let failing = RecordingSubmitter::failing();
        let err = submit_order(&state, &failing).await.unwrap_err();

        match err {
            SessionError::Backend(ref backend) => assert!(backend.is_retryable()),
            other => panic!("unexpected error: {other:?}"),
        }
        // Nothing lost; user can retry without re-entering data
        state.with_session(|s| {
            assert_eq!(s.totals().subtotal.cents(), 2000);
        });

        let submitter = RecordingSubmitter::ok();
        assert!(submit_order(&state, &submitter).await.is_ok());
    }

    #[tokio::test]
    async fn test_draft_snapshots_totals_as_plain_fields() {
        let state = SessionState::new();
        let pricing = TablePricing::new(&[("A", 1000), ("B", 500)]);
        add_priced_item(&state, &pricing, unpriced("A", 2))
            .await
            .unwrap();
        add_priced_item(&state, &pricing, unpriced("B", 3))
            .await
            .unwrap();
        state.with_session_mut(|s| {
            s.set_discount(Money::from_cents(500)).unwrap();
            s.set_tax(Money::from_cents(160)).unwrap();
            s.set_amount_paid(Money::from_cents(3000));
        });

        let draft = OrderDraft::from_state(&state).unwrap();
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.totals.subtotal.cents(), 3500);
        assert_eq!(draft.totals.final_amount.cents(), 3160);
        assert_eq!(draft.totals.balance_due.cents(), 160);

        // Serializes to camelCase numbers for the submission call
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["totals"]["finalAmount"], 3160);
    }
}
