//! # Cart Commands
//!
//! Cart manipulation for a logged-in shopper.
//!
//! ## Store-then-Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_to_cart("7")                                                       │
//! │       │                                                                 │
//! │       ├── session.require(Shop)      guests / admins stop here          │
//! │       ├── GET /products/7            current price and stock            │
//! │       ├── copy = cart.snapshot(); copy.add(product)                     │
//! │       │        └── unchanged? (out of stock, unknown id) → return       │
//! │       ├── PATCH /users/{id} { cartInfo: copy }                          │
//! │       │        └── failed? → error, local cart untouched                │
//! │       └── cart.replace(copy)                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use darb_core::cart::{Cart, CartInfo};
use darb_core::Action;

use crate::commands::product::fetch_product;
use crate::error::AppResult;
use crate::state::{ApiState, CartState, CartView, SessionState};

/// Cart operations that need no catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp<'a> {
    Increase(&'a str),
    Decrease(&'a str),
    Remove(&'a str),
    Clear,
}

impl CartOp<'_> {
    fn apply(self, cart: &mut Cart) -> bool {
        match self {
            CartOp::Increase(id) => cart.increase(id),
            CartOp::Decrease(id) => cart.decrease(id),
            CartOp::Remove(id) => cart.remove(id),
            CartOp::Clear => cart.clear(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartView {
    debug!("get_cart command");
    cart.view()
}

/// Adds a product to the cart, or one more of it.
///
/// Adding an out-of-stock product changes nothing and stores nothing.
pub async fn add_to_cart(
    api: &ApiState,
    session: &SessionState,
    cart: &CartState,
    product_id: &str,
) -> AppResult<CartView> {
    debug!(product_id = %product_id, "add_to_cart command");
    session.require(Action::Shop)?;

    let product = fetch_product(api, product_id).await?;
    store_change(api, session, cart, |c| c.add(&product)).await
}

/// Increases, decreases, removes or clears.
pub async fn update_cart(api: &ApiState, session: &SessionState, cart: &CartState, op: CartOp<'_>) -> AppResult<CartView> {
    debug!(?op, "update_cart command");
    session.require(Action::Shop)?;
    store_change(api, session, cart, |c| op.apply(c)).await
}

async fn store_change<F>(api: &ApiState, session: &SessionState, cart: &CartState, change: F) -> AppResult<CartView>
where
    F: FnOnce(&mut Cart) -> bool,
{
    let shopper = session.require(Action::Shop)?;

    let mut next = cart.snapshot();
    if !change(&mut next) {
        debug!("Cart unchanged, nothing to store");
        return Ok(CartView::from(&next));
    }

    api.inner()
        .users()
        .save_cart(&shopper.user_id, &CartInfo::from(&next))
        .await?;

    let view = CartView::from(&next);
    cart.replace(next);
    info!(
        user_id = %shopper.user_id,
        lines = view.entries.len(),
        total = %view.total_price,
        "Cart stored"
    );
    Ok(view)
}
