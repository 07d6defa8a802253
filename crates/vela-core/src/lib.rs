//! # vela-core: Pure Business Logic for Vela POS
//!
//! This crate is the heart of the Vela POS order core. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Vela POS Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────┐     │
//! │  │                  Front End (out of scope)                 │     │
//! │  │   Product grid ─► Cart panel ─► Payment modal ─► Receipt  │     │
//! │  └─────────────────────────────┬─────────────────────────────┘     │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────┐     │
//! │  │                      vela-session                         │     │
//! │  │    SaleSession, SessionState, backend seams, checkout     │     │
//! │  └─────────────────────────────┬─────────────────────────────┘     │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────┐     │
//! │  │                 ★ vela-core (THIS CRATE) ★                │     │
//! │  │                                                           │     │
//! │  │  ┌────────┐ ┌──────┐ ┌────────┐ ┌─────────┐ ┌──────────┐ │     │
//! │  │  │ money  │ │ cart │ │ totals │ │ payment │ │validation│ │     │
//! │  │  │ Money  │ │ Cart │ │ Engine │ │  State  │ │  rules   │ │     │
//! │  │  └────────┘ └──────┘ └────────┘ └─────────┘ └──────────┘ │     │
//! │  │                                                           │     │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS      │     │
//! │  └───────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Shared domain types (ItemSource, policies, CustomerType)
//! - [`cart`] - Line items and cart mutation operations
//! - [`totals`] - The order total engine (subtotal / final / balance)
//! - [`payment`] - Payment reconciliation (amount paid, quick amounts)
//! - [`validation`] - Boundary input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are minor units (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vela_core::cart::Cart;
//! use vela_core::money::Money;
//! use vela_core::totals::{OrderAdjustments, OrderTotals};
//! use vela_core::types::{CartConfig, ItemCandidate};
//!
//! let mut cart = Cart::new();
//! cart.add_item(
//!     ItemCandidate::external("Delivery fee", Money::from_cents(2000)),
//!     CartConfig::default(),
//! )
//! .unwrap();
//!
//! let totals = OrderTotals::compute(&cart, OrderAdjustments::default(), Money::zero());
//! assert_eq!(totals.final_amount.cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod payment;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Money` instead of
// `use vela_core::money::Money`

pub use cart::{Cart, LineItem, QuantityOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::PaymentState;
pub use totals::{OrderAdjustments, OrderTotals, PaymentStatus};
pub use types::{
    CartConfig, CustomerType, DuplicatePolicy, ItemCandidate, ItemSource, StockPolicy,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
