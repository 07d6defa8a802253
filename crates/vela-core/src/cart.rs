//! # Cart Module
//!
//! The ordered collection of line items and its mutation operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  UI Action                Operation              State Change       │
//! │  ─────────                ─────────              ────────────       │
//! │  Click product ─────────► add_item() ──────────► items.push(item)  │
//! │  Change quantity ───────► update_quantity() ───► items[i].qty = n  │
//! │  Quantity to zero ──────► update_quantity(0) ──► items.remove(i)   │
//! │  Click remove ──────────► remove_item() ───────► items.remove(i)   │
//! │  Cancel sale ───────────► clear() ─────────────► items.clear()     │
//! │                                                                     │
//! │  Every mutation is synchronous; totals are recomputed immediately. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `line_total == unit_price * quantity` holds by construction: the
//!   total is derived, never stored.
//! - Line-item ids are unique within a cart (UUID v4, assigned at add).
//! - Non-external items never exceed `available_quantity`, regardless of
//!   which mutation path changed the quantity or which `StockPolicy` is
//!   configured.
//! - Insertion order is preserved for display; it never affects totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartConfig, DuplicatePolicy, ItemCandidate, ItemSource, StockPolicy};
use crate::validation::{validate_item_name, validate_price, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// A single product/variant or external product entry in the cart.
///
/// ## Price Freezing
/// The unit price is captured when the item is added. If the backend
/// price changes afterwards, this line retains the original snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique per cart, assigned at add time (UUID v4).
    pub id: String,

    /// Inventory reference or external-product marker.
    pub source: ItemSource,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Unit cost, used only for margin display, never for totals.
    pub unit_cost: Option<Money>,

    /// Quantity in cart; always >= 1.
    pub quantity: i64,

    /// When this item was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    fn from_candidate(candidate: ItemCandidate, quantity: i64) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            source: candidate.source,
            name: candidate.name,
            unit_price: candidate.unit_price,
            unit_cost: candidate.unit_cost,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total, derived as `unit_price * quantity`.
    ///
    /// Derived rather than stored so the invariant can never be violated
    /// by a code path that sets one without recomputing the other.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Margin for this line, when the unit cost is known. Display only.
    pub fn margin(&self) -> Option<Money> {
        self.unit_cost
            .map(|cost| (self.unit_price - cost).multiply_quantity(self.quantity))
    }

    /// True when the item has no backing inventory record.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.source.is_external()
    }

    /// Stock bound, when one applies.
    #[inline]
    pub fn available_quantity(&self) -> Option<i64> {
        self.source.available_quantity()
    }
}

// =============================================================================
// Quantity Outcome
// =============================================================================

/// Result of a quantity update.
///
/// An unknown item id is a no-op, not an error: rapid repeated clicks on
/// a row that was just removed must not blow up the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuantityOutcome {
    /// Quantity was set (possibly clamped under `StockPolicy::Clamp`).
    Updated { quantity: i64 },
    /// Quantity went to zero or below; the line was removed.
    Removed,
    /// No line with that id; nothing changed.
    NotFound,
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered set of line items for the active sale session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in insertion order.
    pub items: Vec<LineItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a candidate to the cart, returning the id of the affected line.
    ///
    /// ## Behavior
    /// - `DuplicatePolicy::NewLine`: always appends a new line.
    /// - `DuplicatePolicy::MergeQuantity`: increments an existing line
    ///   when product, variant, and unit price all match (a price change
    ///   between adds still produces a separate line). External items
    ///   never merge; they carry no product identity.
    /// - The stock bound is enforced on the *resulting* quantity, per the
    ///   configured `StockPolicy`.
    pub fn add_item(&mut self, candidate: ItemCandidate, config: CartConfig) -> CoreResult<String> {
        validate_item_name(&candidate.name)?;
        validate_price(candidate.unit_price)?;
        validate_quantity(candidate.quantity)?;

        if config.duplicate_policy == DuplicatePolicy::MergeQuantity {
            if let Some(item) = self.find_mergeable_mut(&candidate) {
                let requested = item.quantity + candidate.quantity;
                let bounded = bound_quantity(
                    requested,
                    item.available_quantity(),
                    config.stock_policy,
                    &item.name,
                )?;
                item.quantity = bounded;
                return Ok(item.id.clone());
            }
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let bounded = bound_quantity(
            candidate.quantity,
            candidate.source.available_quantity(),
            config.stock_policy,
            &candidate.name,
        )?;

        let item = LineItem::from_candidate(candidate, bounded);
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Updates the quantity of a line item.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to `remove_item`.
    /// - Unknown id: no-op, reported as `QuantityOutcome::NotFound`.
    /// - Otherwise the stock policy applies and the quantity is set.
    pub fn update_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
        config: CartConfig,
    ) -> CoreResult<QuantityOutcome> {
        if quantity <= 0 {
            return Ok(if self.remove_item(item_id) {
                QuantityOutcome::Removed
            } else {
                QuantityOutcome::NotFound
            });
        }

        let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(QuantityOutcome::NotFound);
        };

        // The per-line cap is enforced by bound_quantity below

        let bounded = bound_quantity(
            quantity,
            item.available_quantity(),
            config.stock_policy,
            &item.name,
        )?;
        item.quantity = bounded;
        Ok(QuantityOutcome::Updated { quantity: bounded })
    }

    /// Removes a line item by id. Returns false if absent (no-op).
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    ///
    /// Adjustments and payment state live on the session; its `clear`
    /// resets those alongside this.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Looks up a line item by id.
    pub fn get(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mergeable_mut(&mut self, candidate: &ItemCandidate) -> Option<&mut LineItem> {
        match &candidate.source {
            ItemSource::External => None,
            ItemSource::Inventory {
                product_id,
                variant_id,
                ..
            } => self.items.iter_mut().find(|i| {
                i.unit_price == candidate.unit_price
                    && matches!(
                        &i.source,
                        ItemSource::Inventory {
                            product_id: pid,
                            variant_id: vid,
                            ..
                        } if pid == product_id && vid == variant_id
                    )
            }),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Stock Bound
// =============================================================================

/// Applies the stock policy to a requested quantity.
///
/// `available` is `None` for external items and for inventory items the
/// backend reported no bound for; those pass through untouched. With a
/// bound of zero (or less) there is nothing to sell, so even `Clamp`
/// rejects: a line with quantity zero cannot exist.
fn bound_quantity(
    requested: i64,
    available: Option<i64>,
    policy: StockPolicy,
    name: &str,
) -> CoreResult<i64> {
    if requested > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested,
            max: MAX_ITEM_QUANTITY,
        });
    }

    let Some(available) = available else {
        return Ok(requested);
    };

    if requested <= available {
        return Ok(requested);
    }

    match policy {
        StockPolicy::Clamp if available >= 1 => Ok(available),
        _ => Err(CoreError::InsufficientStock {
            name: name.to_string(),
            available,
            requested,
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
