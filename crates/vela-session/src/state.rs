//! # Session State
//!
//! Thread-safe wrapper around the active [`SaleSession`].
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple UI commands may access/modify the session
//! 2. Only one command should modify it at a time
//! 3. Command handlers can run concurrently
//!
//! ## Why Not RwLock?
//! Session operations are quick, and most of them modify state. An
//! RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use crate::session::SaleSession;
use vela_core::types::CartConfig;

/// Shared handle to the active sale session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<SaleSession>>,
}

impl SessionState {
    /// Creates a new empty session state with default cart policies.
    pub fn new() -> Self {
        Self::with_config(CartConfig::default())
    }

    /// Creates a new empty session state with explicit cart policies.
    pub fn with_config(config: CartConfig) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(SaleSession::new(config))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use vela_session::state::SessionState;
    ///
    /// let state = SessionState::new();
    /// let totals = state.with_session(|s| s.totals());
    /// assert!(totals.final_amount.is_zero());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// The closure runs under the lock, so the mutation and any totals
    /// read inside it are atomic with respect to other commands.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
