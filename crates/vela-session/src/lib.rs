//! # vela-session: Sale Session Layer for Vela POS
//!
//! Owns the session-scoped state (cart, adjustments, payment) and the
//! boundary to the hosted backend.
//!
//! ## Modules
//!
//! - [`session`] - `SaleSession`, the single owner of session state
//! - [`state`] - `SessionState`, the thread-safe shared handle
//! - [`backend`] - `PriceLookup` / `OrderSubmitter` trait seams
//! - [`checkout`] - priced add + order submission flows
//!
//! ## Example
//! ```rust
//! use vela_core::money::Money;
//! use vela_core::types::ItemCandidate;
//! use vela_session::state::SessionState;
//!
//! let state = SessionState::new();
//! state
//!     .with_session_mut(|s| {
//!         s.add_item(ItemCandidate::external("Delivery", Money::from_cents(2000)))
//!     })
//!     .unwrap();
//! assert_eq!(state.with_session(|s| s.totals().final_amount.cents()), 2000);
//! ```

pub mod backend;
pub mod checkout;
pub mod session;
pub mod state;

pub use backend::{BackendError, OrderSubmitter, PriceLookup};
pub use checkout::{
    add_priced_item, submit_order, OrderDraft, SessionError, SubmittedOrder, UnpricedItem,
};
pub use session::SaleSession;
pub use state::SessionState;
