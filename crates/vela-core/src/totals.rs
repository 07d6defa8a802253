//! # Order Total Engine
//!
//! Pure derivation of order totals from the cart and its adjustments.
//!
//! ```text
//! subtotal      = Σ line_total
//! final_amount  = subtotal - discount + tax + shipping
//! balance_due   = final_amount - amount_paid
//! ```
//!
//! Deterministic given (Cart, OrderAdjustments, amount paid); no side
//! effects, and it cannot fail on well-typed input. Callers validate
//! numeric input before it gets here (see [`crate::validation`] and
//! [`crate::money::Money::parse_input`]).
//!
//! ## Sign conventions
//! - `balance_due > 0`: customer owes money (`PaymentRequired`).
//! - `balance_due <= 0`: fully paid or overpaid (`Complete`); a negative
//!   balance represents change due.
//! - `final_amount` may go negative when the discount exceeds
//!   `subtotal + tax + shipping`. The engine does not reject this; it is
//!   a display/business concern, not an engine invariant.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;

// =============================================================================
// Order Adjustments
// =============================================================================

/// Discount, tax, and shipping applied on top of the cart subtotal.
///
/// Each is an independent non-negative amount, set out-of-band from the
/// cart (the cashier types them in; they are not derived from items).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderAdjustments {
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
}

// =============================================================================
// Payment Status
// =============================================================================

/// The only two payment states at the engine level.
///
/// There is no installment state machine here; "installment" is a
/// payment-method tag on the submitted order, not a distinct computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Fully paid or overpaid (`balance_due <= 0`).
    Complete,
    /// Customer still owes money (`balance_due > 0`).
    PaymentRequired,
}

// =============================================================================
// Order Totals
// =============================================================================

/// Snapshot of all derived amounts, exposed as plain numeric fields for
/// the submission boundary and the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub final_amount: Money,
    pub amount_paid: Money,
    pub balance_due: Money,
    pub status: PaymentStatus,
}

impl OrderTotals {
    /// Derives the full totals snapshot.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::cart::Cart;
    /// use vela_core::money::Money;
    /// use vela_core::totals::{OrderAdjustments, OrderTotals, PaymentStatus};
    ///
    /// let cart = Cart::new();
    /// let totals = OrderTotals::compute(&cart, OrderAdjustments::default(), Money::zero());
    /// assert!(totals.final_amount.is_zero());
    /// assert_eq!(totals.status, PaymentStatus::Complete);
    /// ```
    pub fn compute(cart: &Cart, adjustments: OrderAdjustments, amount_paid: Money) -> Self {
        let subtotal = cart.subtotal();
        let final_amount = subtotal - adjustments.discount + adjustments.tax + adjustments.shipping;
        let balance_due = final_amount - amount_paid;

        OrderTotals {
            subtotal,
            discount: adjustments.discount,
            tax: adjustments.tax,
            shipping: adjustments.shipping,
            final_amount,
            amount_paid,
            balance_due,
            status: if balance_due.is_positive() {
                PaymentStatus::PaymentRequired
            } else {
                PaymentStatus::Complete
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
