//! # Domain Types
//!
//! Shared domain types for the Vela POS order core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌─────────────────┐  ┌──────────────────┐    │
//! │  │  CustomerType  │  │   ItemSource    │  │    CartConfig    │    │
//! │  │  ────────────  │  │  ─────────────  │  │  ──────────────  │    │
//! │  │  Retail        │  │  Inventory {..} │  │  duplicate_policy│    │
//! │  │  Wholesale     │  │  External {..}  │  │  stock_policy    │    │
//! │  └────────────────┘  └─────────────────┘  └──────────────────┘    │
//! │                                                                     │
//! │  DuplicatePolicy: NewLine | MergeQuantity                          │
//! │  StockPolicy:     Reject  | Clamp                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both policy enums exist because the original behavior was ambiguous
//! (see DESIGN.md); whichever is configured applies uniformly across
//! every cart mutation entry point.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer Type
// =============================================================================

/// Pricing tag passed to the backend price lookup.
///
/// The lookup returns a different unit price per customer type; the cart
/// only ever stores the resolved number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Retail,
    Wholesale,
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Retail
    }
}

// =============================================================================
// Item Source
// =============================================================================

/// What a line item was created from.
///
/// ## Inventory vs External
/// - `Inventory`: backed by a product/variant record; `available_quantity`
///   bounds the cart quantity.
/// - `External`: no backing inventory record; stock constraints do not
///   apply and any positive quantity is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    Inventory {
        product_id: String,
        variant_id: Option<String>,
        /// Upper bound on cart quantity, when the backend reports one.
        available_quantity: Option<i64>,
    },
    External,
}

impl ItemSource {
    /// True when the item has no backing inventory record.
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(self, ItemSource::External)
    }

    /// Stock bound for non-external items, if any.
    pub fn available_quantity(&self) -> Option<i64> {
        match self {
            ItemSource::Inventory {
                available_quantity, ..
            } => *available_quantity,
            ItemSource::External => None,
        }
    }
}

// =============================================================================
// Cart Policies
// =============================================================================

/// What to do when the same product/variant is added twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Always create a new line (preserves distinct price snapshots).
    NewLine,
    /// Increment the existing line's quantity when product, variant, and
    /// unit price all match; otherwise fall back to a new line.
    MergeQuantity,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::NewLine
    }
}

/// What to do when a quantity change would exceed available stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Fail the mutation with `CoreError::InsufficientStock`.
    Reject,
    /// Silently cap the quantity at the available amount.
    Clamp,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicy::Reject
    }
}

/// Per-session cart behavior configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub stock_policy: StockPolicy,
}

// =============================================================================
// Item Candidate
// =============================================================================

/// Input to `Cart::add_item`: a resolved product/variant or external
/// product descriptor, with the unit price already looked up.
///
/// A price-lookup failure must surface as a backend error *before* a
/// candidate exists; it is never silently defaulted to zero here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemCandidate {
    pub source: ItemSource,
    /// Display name shown in the cart and on the receipt.
    pub name: String,
    /// Resolved unit price (frozen into the line item on add).
    pub unit_price: Money,
    /// Unit cost, for margin display only. Never enters totals.
    pub unit_cost: Option<Money>,
    /// Initial quantity; must be >= 1.
    pub quantity: i64,
}

impl ItemCandidate {
    /// Convenience constructor for an external product with quantity 1.
    pub fn external(name: impl Into<String>, unit_price: Money) -> Self {
        ItemCandidate {
            source: ItemSource::External,
            name: name.into(),
            unit_price,
            unit_cost: None,
            quantity: 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
