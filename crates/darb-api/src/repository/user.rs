//! # User Repository
//!
//! Account lookup and the persisted cart.

use serde::Serialize;
use tracing::debug;

use darb_core::cart::CartInfo;
use darb_core::User;

use crate::error::ApiResult;
use crate::http::HttpClient;

pub(crate) const USERS: &str = "users";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartPatch<'a> {
    cart_info: &'a CartInfo,
}

/// Repository for remote user operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    http: HttpClient,
}

impl UserRepository {
    pub fn new(http: HttpClient) -> Self {
        UserRepository { http }
    }

    /// Fetches a user with role, persisted cart and order history.
    pub async fn get(&self, id: &str) -> ApiResult<User> {
        debug!(user_id = %id, "Fetching user");
        self.http.get(&[USERS, id]).await
    }

    /// Replaces the user's persisted cart.
    ///
    /// ## Wire Format
    /// ```json
    /// { "cartInfo": { "cart": [...], "totalPrice": 900, "isEmpty": false } }
    /// ```
    pub async fn save_cart(&self, id: &str, cart: &CartInfo) -> ApiResult<()> {
        debug!(user_id = %id, lines = cart.cart.len(), "Persisting cart");
        let _: serde::de::IgnoredAny = self
            .http
            .patch(&[USERS, id], &CartPatch { cart_info: cart })
            .await?;
        Ok(())
    }
}
