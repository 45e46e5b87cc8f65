//! # Checkout Commands
//!
//! Discount codes, Discovery Set bottle picks, and the WhatsApp order.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order via WhatsApp                                   │
//! │                                                                         │
//! │  place_order(address, destination)                                      │
//! │       │                                                                 │
//! │       ├── 1. session.require(Shop)                                      │
//! │       ├── 2. validate_checkout  ──► EmptyCart / MissingAddress /        │
//! │       │                             EmptyBundleSelection /              │
//! │       │                             TooManyBottles                      │
//! │       │        (nothing sent to the API before this passes)             │
//! │       ├── 3. GET /products      (only with a Discovery Set; picks must  │
//! │       │                          be offered bottles)                    │
//! │       ├── 4. build bill, GET + PATCH billsHistory                       │
//! │       │        └── failed? → REMOTE_ERROR, no link                      │
//! │       └── 5. message + https://wa.me/<phone>?text=...                   │
//! │                                                                         │
//! │  The cart is kept after ordering; the shopper clears it themselves.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use darb_core::bundle::{Adjustment, BundleSelection};
use darb_core::catalog::{bundle_candidates, BundleCandidate};
use darb_core::discount::{calculate_discounts, ApplyOutcome, DiscountCode, DiscountResult};
use darb_core::order::{
    build_bill, build_item_message, build_order_message, validate_checkout, validate_item_checkout,
    validate_picks, whatsapp_link, OrderRequest, WhatsAppDestination,
};
use darb_core::validation::validate_address;
use darb_core::Action;

use crate::error::{AppError, AppResult};
use crate::state::{ApiState, CartState, CheckoutSession, DiscountPreview, SessionState};

/// Where and how to send the order.
#[derive(Debug, Clone, Copy)]
pub struct OrderInput<'a> {
    pub address: &'a str,
    pub destination: WhatsAppDestination,
}

/// A sent order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Bill stored in the order history; single-item orders store none.
    pub bill_id: Option<String>,
    pub whatsapp_url: String,
    pub message: String,
    pub discount: Option<DiscountResult>,
}

// =============================================================================
// Discount Code
// =============================================================================

/// Applies a discount code to the checkout.
///
/// ## Errors
/// `VALIDATION_ERROR` for an unknown code; the checkout is unchanged.
pub fn apply_discount_code(checkout: &mut CheckoutSession, code: &str) -> AppResult<ApplyOutcome> {
    debug!(code = %code, "apply_discount_code command");
    let outcome = checkout.apply_code(code)?;
    match outcome {
        ApplyOutcome::Applied(code) => info!(%code, "Discount code applied"),
        ApplyOutcome::AlreadyApplied(code) => debug!(%code, "Discount code already applied"),
    }
    Ok(outcome)
}

pub fn remove_discount_code(checkout: &mut CheckoutSession) -> Option<DiscountCode> {
    debug!("remove_discount_code command");
    checkout.remove_code()
}

/// Totals and discount for the current cart.
pub fn preview_checkout(session: &SessionState, cart: &CartState, checkout: &CheckoutSession) -> AppResult<DiscountPreview> {
    let shopper = session.require(Action::Shop)?;
    Ok(cart.with_cart(|c| checkout.preview(c, shopper.prior_orders)))
}

// =============================================================================
// Discovery Set Picks
// =============================================================================

/// Bottles a Discovery Set can be filled with.
pub async fn list_bundle_candidates(api: &ApiState) -> AppResult<Vec<BundleCandidate>> {
    let products = api.inner().products().list().await?;
    Ok(bundle_candidates(&products))
}

/// Changes the pick count of one bottle by `delta`.
pub fn adjust_bottle(cart: &CartState, checkout: &mut CheckoutSession, sub_product_id: &str, delta: i64) -> AppResult<Adjustment> {
    debug!(sub_product_id = %sub_product_id, delta, "adjust_bottle command");
    let adjustment = cart
        .with_cart(|c| checkout.adjust_pick(c, sub_product_id, delta))
        .ok_or_else(|| AppError::validation("Your cart has no Discovery set"))?;

    if adjustment == Adjustment::Rejected {
        warn!(sub_product_id = %sub_product_id, "Pick rejected, bottle limit reached");
    }
    Ok(adjustment)
}

/// Builds a selection for `bundle_quantity` sets from `(bottle id, count)` picks.
///
/// ## Errors
/// `VALIDATION_ERROR` when the picks exceed 6 bottles per set.
pub fn select_bottles(bundle_quantity: u32, picks: &[(String, u32)]) -> AppResult<BundleSelection> {
    let mut selection = BundleSelection::new(bundle_quantity);
    for (id, count) in picks {
        if selection.adjust(id, i64::from(*count)) == Adjustment::Rejected {
            return Err(AppError::validation(format!(
                "You can pick at most {} bottles",
                selection.cap()
            )));
        }
    }
    Ok(selection)
}

// =============================================================================
// Orders
// =============================================================================

/// Orders the whole cart over WhatsApp.
///
/// On success the bill is in the shopper's history and the picker is closed.
pub async fn place_order(
    api: &ApiState,
    session: &SessionState,
    cart: &CartState,
    checkout: &mut CheckoutSession,
    input: OrderInput<'_>,
) -> AppResult<OrderReceipt> {
    debug!(destination = input.destination.phone(), "place_order command");
    let shopper = session.require(Action::Shop)?;

    let snapshot = cart.snapshot();
    // Picks made for another set count start over before validation.
    checkout.open_picker(&snapshot);
    validate_checkout(&snapshot, input.address, checkout.bundle())?;
    let address = validate_address(input.address)?;

    let candidates = if snapshot.discovery_set().is_some() {
        list_bundle_candidates(api).await?
    } else {
        Vec::new()
    };
    if let Some(selection) = checkout.bundle().filter(|_| snapshot.discovery_set().is_some()) {
        validate_picks(selection, &candidates)?;
    }

    let discount = calculate_discounts(snapshot.total_price(), shopper.prior_orders, checkout.applied_code());
    let bill = build_bill(&snapshot, &discount, &address, Utc::now());
    let bill_id = bill.id.clone();

    api.inner().bills().append(&shopper.user_id, bill).await?;
    session.record_order();

    let message = build_order_message(&OrderRequest {
        customer_name: &shopper.display_name,
        address: &address,
        cart: &snapshot,
        bundle: checkout.bundle(),
        candidates: &candidates,
        discount: &discount,
    });
    let whatsapp_url = whatsapp_link(input.destination, &message);
    checkout.close_picker();

    info!(
        user_id = %shopper.user_id,
        bill_id = %bill_id,
        total = %discount.final_price,
        "Order placed via WhatsApp"
    );

    Ok(OrderReceipt {
        bill_id: Some(bill_id),
        whatsapp_url,
        message,
        discount: discount.has_discount().then_some(discount),
    })
}

/// Orders a single cart line over WhatsApp, without discounts.
///
/// `bundle` holds the picks when the line is a Discovery Set. No bill is
/// stored for single-item orders.
pub async fn order_item(
    api: &ApiState,
    session: &SessionState,
    cart: &CartState,
    product_id: &str,
    bundle: Option<&BundleSelection>,
    input: OrderInput<'_>,
) -> AppResult<OrderReceipt> {
    debug!(product_id = %product_id, "order_item command");
    let shopper = session.require(Action::Shop)?;

    let entry = cart
        .with_cart(|c| c.entries().iter().find(|e| e.product.id == product_id).cloned())
        .ok_or_else(|| AppError::not_found("Cart item", product_id))?;
    validate_item_checkout(&entry, input.address, bundle)?;
    let address = validate_address(input.address)?;

    let candidates = if entry.product.is_discovery_set() {
        list_bundle_candidates(api).await?
    } else {
        Vec::new()
    };
    if let Some(selection) = bundle.filter(|_| entry.product.is_discovery_set()) {
        validate_picks(selection, &candidates)?;
    }

    let message = build_item_message(&shopper.display_name, &address, &entry, bundle, &candidates);
    let whatsapp_url = whatsapp_link(input.destination, &message);
    info!(user_id = %shopper.user_id, product_id = %product_id, "Single item ordered via WhatsApp");

    Ok(OrderReceipt {
        bill_id: None,
        whatsapp_url,
        message,
        discount: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_bottles_within_cap() {
        let picks = vec![("1".to_string(), 4), ("2".to_string(), 2)];
        let selection = select_bottles(1, &picks).unwrap();
        assert_eq!(selection.total_selected(), 6);
    }

    #[test]
    fn test_select_bottles_over_cap() {
        let picks = vec![("1".to_string(), 4), ("2".to_string(), 3)];
        let err = select_bottles(1, &picks).unwrap_err();
        assert_eq!(err.message, "You can pick at most 6 bottles");
    }

    #[test]
    fn test_invalid_code_leaves_checkout_unchanged() {
        let mut checkout = CheckoutSession::new();
        assert!(apply_discount_code(&mut checkout, "ptcu60").is_err());
        assert_eq!(checkout.applied_code(), None);

        assert_eq!(
            apply_discount_code(&mut checkout, "PTCU60").unwrap(),
            ApplyOutcome::Applied(DiscountCode::Ptcu60)
        );
        assert_eq!(
            apply_discount_code(&mut checkout, "PTCU60").unwrap(),
            ApplyOutcome::AlreadyApplied(DiscountCode::Ptcu60)
        );
    }
}
