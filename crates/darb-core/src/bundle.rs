//! # Discovery Set Selection
//!
//! Each Discovery Set bought lets the shopper pick up to
//! [`BOTTLES_PER_DISCOVERY_SET`] individual bottles from the catalog.
//!
//! ## Picker Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart: Discovery set x2  ──►  cap = 6 × 2 = 12 bottles                 │
//! │                                                                         │
//! │   Amber Oud     [−] 4 [+]                                              │
//! │   Rose Musk     [−] 8 [+]   ← "+" rejected: 4 + 9 > 12                 │
//! │   Vetiver       [−] 0 [+]   ← disabled: cap reached and none picked    │
//! │                                                                         │
//! │   Selected: 12 / 12          [Confirm Selection]                        │
//! │                                                                         │
//! │   Confirm stays disabled while nothing is selected.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selection is ephemeral: it lives for one checkout and is dropped when
//! the picker is closed.

use std::collections::BTreeMap;

use crate::BOTTLES_PER_DISCOVERY_SET;

/// Outcome of [`BundleSelection::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The sub-item now has this quantity (0 means it was removed).
    Set(u32),
    /// The change would exceed the cap; nothing changed.
    Rejected,
}

/// Bottles picked for the Discovery Sets in the cart.
///
/// ## Invariants
/// - `total_selected() <= cap()` after every call
/// - No key maps to 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSelection {
    bundle_quantity: u32,
    picks: BTreeMap<String, u32>,
}

impl BundleSelection {
    /// Starts an empty selection for `bundle_quantity` Discovery Sets.
    pub fn new(bundle_quantity: u32) -> Self {
        BundleSelection {
            bundle_quantity,
            picks: BTreeMap::new(),
        }
    }

    /// Bottles allowed in total: 6 per set bought.
    pub fn cap(&self) -> u32 {
        BOTTLES_PER_DISCOVERY_SET * self.bundle_quantity
    }

    pub fn bundle_quantity(&self) -> u32 {
        self.bundle_quantity
    }

    /// Changes the pick count of `sub_product_id` by `delta`.
    ///
    /// The candidate count is clamped at 0. If the other picks plus the
    /// candidate exceed the cap the call is rejected and nothing changes.
    /// A candidate of 0 removes the key.
    pub fn adjust(&mut self, sub_product_id: &str, delta: i64) -> Adjustment {
        let current = self.quantity_of(sub_product_id);
        let candidate = (i64::from(current) + delta).max(0);
        let others = i64::from(self.total_selected() - current);

        if others + candidate > i64::from(self.cap()) {
            return Adjustment::Rejected;
        }

        // candidate ≤ cap ≤ u32::MAX here
        let candidate = candidate as u32;
        if candidate == 0 {
            self.picks.remove(sub_product_id);
        } else {
            self.picks.insert(sub_product_id.to_string(), candidate);
        }
        Adjustment::Set(candidate)
    }

    /// Bottles picked of one sub-item (0 when not picked).
    pub fn quantity_of(&self, sub_product_id: &str) -> u32 {
        self.picks.get(sub_product_id).copied().unwrap_or(0)
    }

    /// Σ picked bottles.
    pub fn total_selected(&self) -> u32 {
        self.picks.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Whether the "Confirm Selection" action is enabled.
    pub fn can_confirm(&self) -> bool {
        self.total_selected() > 0
    }

    /// Whether the "+" button of `sub_product_id` is enabled.
    ///
    /// Mirrors the picker: once the cap is reached, items with no picks are
    /// disabled. Items that already have picks keep an enabled button, and
    /// [`BundleSelection::adjust`] rejects the press.
    pub fn can_increment(&self, sub_product_id: &str) -> bool {
        self.total_selected() < self.cap() || self.quantity_of(sub_product_id) > 0
    }

    /// Picks in sub-product id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.picks.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Drops every pick (the shopper closed the picker).
    pub fn reset(&mut self) {
        self.picks.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
