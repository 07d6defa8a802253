//! # Sale Session
//!
//! The single owner of session-scoped state.
//!
//! ## Why one struct?
//! The original front end spread cart, adjustments, and payment state
//! across sibling modals, each mutating ad hoc. Here all of it lives in
//! `SaleSession`, and the methods below are the *only* mutation path.
//! Display layers read; they never write.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────┐  add/update/remove   ┌──────────┐  submit (success)  ┌─────────┐
//! │  Empty   │ ───────────────────► │ Building │ ─────────────────► │ Cleared │
//! │ session  │                      │          │                    │ (fresh) │
//! └──────────┘ ◄─── clear() ─────── └──────────┘                    └─────────┘
//! ```
//!
//! Every mutation is synchronous; totals are recomputed immediately on
//! read. There is no debounce and no async mutation path.

use chrono::{DateTime, Utc};
use tracing::debug;

use vela_core::cart::{Cart, LineItem, QuantityOutcome};
use vela_core::error::CoreResult;
use vela_core::money::Money;
use vela_core::payment::PaymentState;
use vela_core::totals::{OrderAdjustments, OrderTotals};
use vela_core::types::{CartConfig, CustomerType, ItemCandidate};
use vela_core::validation::{validate_adjustment, validate_percentage};

// =============================================================================
// Sale Session
// =============================================================================

/// Session-scoped state for one active sale.
///
/// Created empty at POS session start; destroyed (reset to defaults) when
/// the sale completes or is cancelled. Never persisted client-side.
#[derive(Debug, Clone)]
pub struct SaleSession {
    cart: Cart,
    adjustments: OrderAdjustments,
    payment: PaymentState,
    customer_type: CustomerType,
    config: CartConfig,
    created_at: DateTime<Utc>,
}

impl SaleSession {
    /// Creates an empty session with the given cart configuration.
    pub fn new(config: CartConfig) -> Self {
        SaleSession {
            cart: Cart::new(),
            adjustments: OrderAdjustments::default(),
            payment: PaymentState::new(),
            customer_type: CustomerType::default(),
            config,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Adds a candidate to the cart; returns the affected line id.
    pub fn add_item(&mut self, candidate: ItemCandidate) -> CoreResult<String> {
        debug!(name = %candidate.name, quantity = candidate.quantity, "session add_item");
        self.cart.add_item(candidate, self.config)
    }

    /// Updates a line's quantity (zero or below removes it).
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<QuantityOutcome> {
        debug!(item_id = %item_id, quantity, "session update_quantity");
        self.cart.update_quantity(item_id, quantity, self.config)
    }

    /// Removes a line by id; no-op `false` if absent.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        debug!(item_id = %item_id, "session remove_item");
        self.cart.remove_item(item_id)
    }

    /// Clears the whole session: cart emptied, adjustments and payment
    /// reset to defaults. Used on sale completion and explicit cancel.
    pub fn clear(&mut self) {
        debug!("session clear");
        self.cart.clear();
        self.adjustments = OrderAdjustments::default();
        self.payment.reset();
        self.created_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Adjustments
    // -------------------------------------------------------------------------

    /// Sets the order-level discount (non-negative).
    pub fn set_discount(&mut self, amount: Money) -> CoreResult<()> {
        validate_adjustment("discount", amount)?;
        self.adjustments.discount = amount;
        Ok(())
    }

    /// Sets the order-level tax amount (non-negative).
    pub fn set_tax(&mut self, amount: Money) -> CoreResult<()> {
        validate_adjustment("tax", amount)?;
        self.adjustments.tax = amount;
        Ok(())
    }

    /// Sets the shipping cost (non-negative).
    pub fn set_shipping(&mut self, amount: Money) -> CoreResult<()> {
        validate_adjustment("shipping", amount)?;
        self.adjustments.shipping = amount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    /// Directly sets the amount paid (floored at zero, no upper bound).
    pub fn set_amount_paid(&mut self, amount: Money) {
        self.payment.set_amount_paid(amount);
    }

    /// Pays a percentage of the current final amount (quick buttons).
    pub fn quick_amount(&mut self, percent: u32) -> CoreResult<()> {
        validate_percentage(percent)?;
        let final_amount = self.totals().final_amount;
        self.payment.quick_amount(final_amount, percent);
        Ok(())
    }

    /// Adjusts the amount paid by a delta (stepper buttons).
    pub fn adjust_amount(&mut self, delta: Money) {
        self.payment.adjust_amount(delta);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current totals, recomputed from scratch on every call.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.cart, self.adjustments, self.payment.amount_paid())
    }

    /// Cart line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.cart.items
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn adjustments(&self) -> OrderAdjustments {
        self.adjustments
    }

    pub fn amount_paid(&self) -> Money {
        self.payment.amount_paid()
    }

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    /// Switches retail/wholesale pricing for subsequent price lookups.
    /// Existing lines keep their frozen prices.
    pub fn set_customer_type(&mut self, customer_type: CustomerType) {
        self.customer_type = customer_type;
    }

    pub fn config(&self) -> CartConfig {
        self.config
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for SaleSession {
    fn default() -> Self {
        SaleSession::new(CartConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::totals::PaymentStatus;
    use vela_core::types::ItemSource;

    fn candidate(product_id: &str, price_cents: i64, quantity: i64) -> ItemCandidate {
        ItemCandidate {
            source: ItemSource::Inventory {
                product_id: product_id.to_string(),
                variant_id: None,
                available_quantity: None,
            },
            name: format!("Product {}", product_id),
            unit_price: Money::from_cents(price_cents),
            unit_cost: None,
            quantity,
        }
    }

    #[test]
    fn test_full_sale_flow() {
        let mut session = SaleSession::default();
        session.add_item(candidate("A", 1000, 2)).unwrap();
        session.add_item(candidate("B", 500, 3)).unwrap();
        session.set_discount(Money::from_cents(500)).unwrap();
        session.set_tax(Money::from_cents(160)).unwrap();
        session.set_amount_paid(Money::from_cents(3000));

        let totals = session.totals();
        assert_eq!(totals.subtotal.cents(), 3500);
        assert_eq!(totals.final_amount.cents(), 3160);
        assert_eq!(totals.balance_due.cents(), 160);
        assert_eq!(totals.status, PaymentStatus::PaymentRequired);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = SaleSession::default();
        session.add_item(candidate("A", 1000, 2)).unwrap();
        session.set_discount(Money::from_cents(100)).unwrap();
        session.set_shipping(Money::from_cents(250)).unwrap();
        session.set_amount_paid(Money::from_cents(500));

        session.clear();

        let totals = session.totals();
        assert!(session.cart().is_empty());
        assert!(totals.subtotal.is_zero());
        assert!(totals.final_amount.is_zero());
        assert!(totals.balance_due.is_zero());
        assert!(totals.amount_paid.is_zero());
    }

    #[test]
    fn test_negative_adjustment_rejected() {
        let mut session = SaleSession::default();
        assert!(session.set_discount(Money::from_cents(-1)).is_err());
        assert!(session.set_tax(Money::from_cents(-1)).is_err());
        assert!(session.set_shipping(Money::from_cents(-1)).is_err());
        // Nothing was applied
        assert_eq!(session.adjustments(), OrderAdjustments::default());
    }

    #[test]
    fn test_quick_amount_pays_in_full() {
        let mut session = SaleSession::default();
        session.add_item(candidate("A", 1580, 2)).unwrap();

        session.quick_amount(100).unwrap();

        let totals = session.totals();
        assert!(totals.balance_due.is_zero());
        assert_eq!(totals.status, PaymentStatus::Complete);
    }

    #[test]
    fn test_quick_amount_invalid_percent() {
        let mut session = SaleSession::default();
        assert!(session.quick_amount(101).is_err());
    }

    #[test]
    fn test_status_flips_as_amounts_change() {
        let mut session = SaleSession::default();
        session.add_item(candidate("A", 1000, 1)).unwrap();
        assert_eq!(session.totals().status, PaymentStatus::PaymentRequired);

        session.set_amount_paid(Money::from_cents(1000));
        assert_eq!(session.totals().status, PaymentStatus::Complete);

        // Raising the final amount flips it back automatically
        session.set_shipping(Money::from_cents(200)).unwrap();
        assert_eq!(session.totals().status, PaymentStatus::PaymentRequired);
    }

    #[test]
    fn test_overpayment_yields_change_due() {
        let mut session = SaleSession::default();
        session.add_item(candidate("A", 1000, 1)).unwrap();
        session.set_amount_paid(Money::from_cents(1500));

        let totals = session.totals();
        assert_eq!(totals.balance_due.cents(), -500);
        assert_eq!(totals.status, PaymentStatus::Complete);
    }

    #[test]
    fn test_customer_type_switch_keeps_frozen_prices() {
        let mut session = SaleSession::default();
        let id = session.add_item(candidate("A", 1000, 1)).unwrap();

        session.set_customer_type(CustomerType::Wholesale);

        assert_eq!(session.cart().get(&id).unwrap().unit_price.cents(), 1000);
        assert_eq!(session.customer_type(), CustomerType::Wholesale);
    }
}
