//! # Checkout Session
//!
//! The discount-code input and the Discovery Set bottle picker of one
//! checkout. Owned by the caller and dropped when the checkout is closed.

use serde::Serialize;

use darb_core::bundle::{Adjustment, BundleSelection};
use darb_core::cart::Cart;
use darb_core::discount::{calculate_discounts, ApplyOutcome, DiscountCode, DiscountResult, DiscountSlot};
use darb_core::{CoreResult, Money};

/// Totals shown before the order is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPreview {
    #[serde(with = "darb_core::money::as_major")]
    pub total_price: Money,
    pub discount: DiscountResult,
    pub applied_code: Option<DiscountCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSession {
    discount: DiscountSlot,
    bundle: Option<BundleSelection>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// See [`DiscountSlot::apply`].
    pub fn apply_code(&mut self, input: &str) -> CoreResult<ApplyOutcome> {
        self.discount.apply(input)
    }

    pub fn remove_code(&mut self) -> Option<DiscountCode> {
        self.discount.remove()
    }

    pub fn applied_code(&self) -> Option<DiscountCode> {
        self.discount.applied()
    }

    /// Opens the bottle picker for the Discovery Sets in `cart`.
    ///
    /// Picks survive reopening as long as the set count is unchanged; a
    /// different count starts over so the cap always matches the cart.
    pub fn open_picker(&mut self, cart: &Cart) -> Option<&mut BundleSelection> {
        let quantity = cart.discovery_set().map(|entry| entry.quantity)?;
        let stale = self
            .bundle
            .as_ref()
            .map_or(true, |selection| selection.bundle_quantity() != quantity);
        if stale {
            self.bundle = Some(BundleSelection::new(quantity));
        }
        self.bundle.as_mut()
    }

    /// Changes one pick, opening the picker first if needed.
    ///
    /// `None` when the cart holds no Discovery Set.
    pub fn adjust_pick(&mut self, cart: &Cart, sub_product_id: &str, delta: i64) -> Option<Adjustment> {
        self.open_picker(cart).map(|selection| selection.adjust(sub_product_id, delta))
    }

    pub fn bundle(&self) -> Option<&BundleSelection> {
        self.bundle.as_ref()
    }

    /// Closes the picker, dropping every pick.
    pub fn close_picker(&mut self) {
        self.bundle = None;
    }

    /// Discount for `cart` given the shopper's order count.
    pub fn preview(&self, cart: &Cart, prior_orders: usize) -> DiscountPreview {
        let total_price = cart.total_price();
        DiscountPreview {
            total_price,
            discount: calculate_discounts(total_price, prior_orders, self.discount.applied()),
            applied_code: self.discount.applied(),
        }
    }
}
