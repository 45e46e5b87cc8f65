//! # Cart
//!
//! The shopping cart and its five mutation operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Operation               Cart Change           │
//! │  ──────────────           ─────────               ───────────           │
//! │                                                                         │
//! │  "Add to cart" ─────────► add(product) ─────────► push (qty 1)         │
//! │                                                    or qty + 1           │
//! │  "+" ───────────────────► increase(id) ─────────► qty + 1 (≤ stock)    │
//! │                                                                         │
//! │  "−" ───────────────────► decrease(id) ─────────► qty − 1 (≥ 1)        │
//! │                                                                         │
//! │  "✕" ───────────────────► remove(id) ───────────► entry dropped        │
//! │                                                                         │
//! │  "Clear Collection" ────► clear() ──────────────► entries emptied      │
//! │                                                                         │
//! │  Unknown product id ⇒ no-op. Every operation returns whether the cart  │
//! │  changed, so callers can skip persisting a no-op.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is never stored: [`Cart::total_price`] sums the entries on every
//! read, so it cannot drift from the entries.

use serde::{Deserialize, Serialize};

use crate::money::{self, Money};
use crate::types::Product;

// =============================================================================
// Cart Entry
// =============================================================================

/// A product and how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by product id
/// - Every quantity is ≥ 1 and ≤ the product's stock
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `product`.
    ///
    /// A product already in the cart gets its quantity increased instead.
    /// Out-of-stock products are not added.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return self.increase(&product.id);
        }
        if !product.can_hold(1) {
            return false;
        }
        self.entries.push(CartEntry {
            product: product.clone(),
            quantity: 1,
        });
        true
    }

    /// Drops the entry for `product_id`.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() != before
    }

    /// Adds one unit, up to the product's stock.
    pub fn increase(&mut self, product_id: &str) -> bool {
        match self.entry_mut(product_id) {
            Some(entry) if entry.product.can_hold(entry.quantity + 1) => {
                entry.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Removes one unit; never goes below 1 (use [`Cart::remove`] for that).
    pub fn decrease(&mut self, product_id: &str) -> bool {
        match self.entry_mut(product_id) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        changed
    }

    /// Σ price × quantity.
    pub fn total_price(&self) -> Money {
        self.entries.iter().map(CartEntry::subtotal).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|e| e.product.id == product_id)
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.product.id == product_id)
            .map(|e| e.quantity)
    }

    /// The Discovery Set entry, if the cart holds one.
    pub fn discovery_set(&self) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.is_discovery_set())
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id == product_id)
    }
}

// =============================================================================
// Persisted Form
// =============================================================================

/// The cart as stored on the user record (`cartInfo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInfo {
    #[serde(default)]
    pub cart: Vec<CartEntry>,
    #[serde(with = "money::as_major", default)]
    pub total_price: Money,
    #[serde(default = "default_true")]
    pub is_empty: bool,
}

fn default_true() -> bool {
    true
}

impl From<&Cart> for CartInfo {
    fn from(cart: &Cart) -> Self {
        CartInfo {
            cart: cart.entries.clone(),
            total_price: cart.total_price(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Rebuilds a cart from its stored form.
///
/// The stored total is ignored and recomputed. Duplicate product ids are
/// merged, quantities clamped to stock, and empty lines dropped so the
/// invariants hold even for records written by older clients.
impl From<CartInfo> for Cart {
    fn from(info: CartInfo) -> Self {
        let mut cart = Cart::new();
        for entry in info.cart {
            match cart.entry_mut(&entry.product.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(entry.quantity),
                None => cart.entries.push(entry),
            }
        }
        for entry in &mut cart.entries {
            entry.quantity = entry.quantity.min(entry.product.max_quantity);
        }
        cart.entries.retain(|e| e.quantity > 0);
        cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
