//! # Payment Reconciliation
//!
//! Tracks the amount paid against the engine's final amount.
//!
//! ## State machine (two states only)
//! ```text
//! ┌─────────────────┐  amount_paid or final_amount  ┌──────────────┐
//! │ PaymentRequired │ ────────── changes ─────────► │   Complete   │
//! │ (balance > 0)   │ ◄───────────────────────────  │ (balance<=0) │
//! └─────────────────┘                               └──────────────┘
//! ```
//!
//! The transition is automatic: status is recomputed from the current
//! totals on every read, never stored. Void/refund transitions do not
//! exist at this layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment State
// =============================================================================

/// The user-editable side of payment reconciliation.
///
/// `amount_paid` is not capped at the final amount: overpayment is
/// representable and stands for change due. The floor is zero; a payment
/// can never be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    amount_paid: Money,
}

impl PaymentState {
    /// Creates a payment state with nothing paid.
    pub fn new() -> Self {
        PaymentState {
            amount_paid: Money::zero(),
        }
    }

    /// The current amount paid.
    #[inline]
    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    /// Directly sets the amount paid.
    ///
    /// Negative input is floored at zero (the coerce-to-zero boundary
    /// rule); there is no upper bound.
    pub fn set_amount_paid(&mut self, amount: Money) {
        self.amount_paid = amount.max(Money::zero());
    }

    /// Convenience setter: pays a percentage of the final amount.
    ///
    /// `amount_paid = round(final_amount * percent / 100)`, half-up.
    /// Backs the 25/50/100% quick buttons on the payment modal.
    pub fn quick_amount(&mut self, final_amount: Money, percent: u32) {
        self.set_amount_paid(final_amount.percent_of(percent));
    }

    /// Adjusts the amount paid by a delta, flooring at zero.
    ///
    /// Backs the +/- stepper buttons; no upper bound applies.
    pub fn adjust_amount(&mut self, delta: Money) {
        self.set_amount_paid(self.amount_paid + delta);
    }

    /// Resets to nothing paid.
    pub fn reset(&mut self) {
        self.amount_paid = Money::zero();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_amount_paid() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(3000));
        assert_eq!(payment.amount_paid().cents(), 3000);
    }

    #[test]
    fn test_set_negative_floors_at_zero() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(-100));
        assert!(payment.amount_paid().is_zero());
    }

    #[test]
    fn test_overpayment_allowed() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(99_999_99));
        assert_eq!(payment.amount_paid().cents(), 99_999_99);
    }

    #[test]
    fn test_quick_amount_full() {
        let mut payment = PaymentState::new();
        payment.quick_amount(Money::from_cents(3160), 100);
        assert_eq!(payment.amount_paid().cents(), 3160);
    }

    #[test]
    fn test_quick_amount_half_rounds() {
        let mut payment = PaymentState::new();
        // 3161 * 50% = 1580.5 → 1581
        payment.quick_amount(Money::from_cents(3161), 50);
        assert_eq!(payment.amount_paid().cents(), 1581);
    }

    #[test]
    fn test_adjust_amount() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(1000));

        payment.adjust_amount(Money::from_cents(500));
        assert_eq!(payment.amount_paid().cents(), 1500);

        payment.adjust_amount(Money::from_cents(-200));
        assert_eq!(payment.amount_paid().cents(), 1300);
    }

    #[test]
    fn test_adjust_floors_at_zero() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(100));
        payment.adjust_amount(Money::from_cents(-500));
        assert!(payment.amount_paid().is_zero());
    }

    #[test]
    fn test_reset() {
        let mut payment = PaymentState::new();
        payment.set_amount_paid(Money::from_cents(4200));
        payment.reset();
        assert!(payment.amount_paid().is_zero());
    }
}
