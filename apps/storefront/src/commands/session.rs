//! Session commands.

use tracing::debug;

use darb_core::cart::Cart;
use darb_core::{Action, Bill};

use crate::error::{AppError, AppResult};
use crate::state::{ApiState, CartState, SessionState, Shopper};

/// Logs in as `user_id` and restores their persisted cart.
pub async fn login(api: &ApiState, session: &SessionState, cart: &CartState, user_id: &str) -> AppResult<Shopper> {
    debug!(user_id = %user_id, "login command");

    let user = api.inner().users().get(user_id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::not_found("User", user_id)
        } else {
            AppError::from(e)
        }
    })?;

    let restored = user.cart_info.clone().map(Cart::from).unwrap_or_default();
    cart.replace(restored);
    Ok(session.login(&user))
}

/// Ends the session and forgets the local cart.
pub fn logout(session: &SessionState, cart: &CartState) {
    debug!("logout command");
    session.logout();
    cart.replace(Cart::new());
}

/// The shopper's past orders, oldest first.
pub async fn order_history(api: &ApiState, session: &SessionState) -> AppResult<Vec<Bill>> {
    debug!("order_history command");
    let shopper = session.require(Action::Shop)?;
    Ok(api.inner().bills().list_for_user(&shopper.user_id).await?)
}
