//! # Cart State
//!
//! The shopper's cart, shared between commands.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>`. Commands that persist a change
//! work on a copy: the lock is taken to clone, released for the network
//! call, and taken again to commit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshot() ──► clone ──► mutate copy ──► PATCH cartInfo ──► replace()  │
//! │                                               │                         │
//! │                                            failure                      │
//! │                                               ▼                         │
//! │                                   copy dropped, cart unchanged          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use darb_core::cart::{Cart, CartEntry};
use darb_core::Money;

/// Cart as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub entries: Vec<CartEntry>,
    #[serde(with = "darb_core::money::as_major")]
    pub total_price: Money,
    pub is_empty: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            entries: cart.entries().to_vec(),
            total_price: cart.total_price(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Managed cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        // Cart mutations cannot panic half-way, so a poisoned cart is intact.
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = cart_state.with_cart(CartView::from);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    /// Commits a cart computed from an earlier snapshot.
    pub fn replace(&self, cart: Cart) {
        self.with_cart_mut(|c| *c = cart);
    }

    pub fn view(&self) -> CartView {
        self.with_cart(|c| CartView::from(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darb_core::Product;

    #[test]
    fn test_snapshot_is_detached() {
        let state = CartState::new();
        let mut copy = state.snapshot();
        copy.add(&Product::new("1", "Amber Oud", Money::from_major(450), 5));

        assert!(state.view().is_empty);
        state.replace(copy);
        assert_eq!(state.view().total_price, Money::from_major(450));
    }

    #[test]
    fn test_view_reflects_cart() {
        let state = CartState::new();
        state.with_cart_mut(|c| {
            c.add(&Product::new("1", "Amber Oud", Money::from_major(450), 5));
            c.add(&Product::new("1", "Amber Oud", Money::from_major(450), 5));
        });

        let view = state.view();
        assert!(!view.is_empty);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].quantity, 2);
        assert_eq!(view.total_price, Money::from_major(900));
    }

    #[test]
    fn test_clones_share_the_cart() {
        let state = CartState::new();
        let other = state.clone();
        other.with_cart_mut(|c| c.add(&Product::new("1", "Amber Oud", Money::from_major(450), 5)));
        assert_eq!(state.with_cart(Cart::len), 1);
    }
}
