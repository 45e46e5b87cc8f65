//! # Session State
//!
//! Who is shopping, and what their role lets them do.
//!
//! ## Access Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► session.require(Action::Shop)                              │
//! │                    │                                                    │
//! │                    ├── nobody logged in        → LOGIN_REQUIRED         │
//! │                    ├── role lacks permission   → UNAUTHORIZED           │
//! │                    └── ok                      → Shopper                │
//! │                                                                         │
//! │  Checks run before any state change or remote call.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::info;

use darb_core::{Action, Role, User};

use crate::error::{AppError, AppResult};

/// The logged-in shopper as the commands need them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shopper {
    pub user_id: String,
    /// Name printed on orders and reviews.
    pub display_name: String,
    pub role: Role,
    /// Orders on record, for the first-order discount.
    pub prior_orders: usize,
}

impl From<&User> for Shopper {
    fn from(user: &User) -> Self {
        Shopper {
            user_id: user.id.clone(),
            display_name: user.display_name().to_string(),
            role: user.role,
            prior_orders: user.prior_order_count(),
        }
    }
}

/// Managed session state.
#[derive(Debug, Default)]
pub struct SessionState {
    shopper: Mutex<Option<Shopper>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Shopper>> {
        self.shopper.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a session for `user`.
    pub fn login(&self, user: &User) -> Shopper {
        let shopper = Shopper::from(user);
        info!(user_id = %shopper.user_id, role = %shopper.role, "Session started");
        *self.lock() = Some(shopper.clone());
        shopper
    }

    pub fn logout(&self) {
        *self.lock() = None;
    }

    pub fn current(&self) -> Option<Shopper> {
        self.lock().clone()
    }

    /// Guest when nobody is logged in.
    pub fn role(&self) -> Role {
        self.lock().as_ref().map(|s| s.role).unwrap_or_default()
    }

    /// The logged-in shopper, if their role permits `action`.
    ///
    /// Browsing needs no shopper; catalog commands do not call this.
    pub fn require(&self, action: Action) -> AppResult<Shopper> {
        let shopper = self.current();
        let role = shopper.as_ref().map(|s| s.role).unwrap_or_default();

        if role.permits(action) {
            return shopper.ok_or_else(AppError::login_required);
        }

        match role {
            Role::Guest => Err(AppError::login_required()),
            Role::User | Role::Admin => Err(AppError::unauthorized(denied_message(role, action))),
        }
    }

    /// Records a placed order so the next checkout sees it.
    pub fn record_order(&self) {
        if let Some(shopper) = self.lock().as_mut() {
            shopper.prior_orders += 1;
        }
    }
}

fn denied_message(role: Role, action: Action) -> String {
    match (role, action) {
        (Role::Admin, Action::Shop) => "Admins cannot shop in the market".to_string(),
        (_, Action::ManageMarket) => "Only admins can manage the market".to_string(),
        _ => format!("A {} account cannot do this", role),
    }
}
