//! # Bill Repository
//!
//! Order history stored on the user record.
//!
//! ## Append Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append("u-1", bill)                                                    │
//! │       │                                                                 │
//! │       ├── GET   /users/u-1        → billsHistory [b1, b2]               │
//! │       │                                                                 │
//! │       └── PATCH /users/u-1        { billsHistory: [b1, b2, bill] }      │
//! │                                                                         │
//! │  On any failure the history is left as the GET returned it.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use darb_core::Bill;

use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::repository::user::USERS;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryPatch<'a> {
    bills_history: &'a [Bill],
}

/// Repository for order history.
#[derive(Debug, Clone)]
pub struct BillRepository {
    http: HttpClient,
}

impl BillRepository {
    pub fn new(http: HttpClient) -> Self {
        BillRepository { http }
    }

    /// The user's past orders, oldest first.
    pub async fn list_for_user(&self, user_id: &str) -> ApiResult<Vec<Bill>> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct History {
            #[serde(default)]
            bills_history: Vec<Bill>,
        }

        let history: History = self.http.get(&[USERS, user_id]).await?;
        debug!(user_id = %user_id, count = history.bills_history.len(), "Fetched order history");
        Ok(history.bills_history)
    }

    /// Appends `bill` to the user's history.
    ///
    /// ## Returns
    /// The number of orders on record after the append.
    pub async fn append(&self, user_id: &str, bill: Bill) -> ApiResult<usize> {
        let bill_id = bill.id.clone();
        let mut history = self.list_for_user(user_id).await?;
        history.push(bill);

        let _: serde::de::IgnoredAny = self
            .http
            .patch(&[USERS, user_id], &HistoryPatch { bills_history: &history })
            .await?;

        info!(user_id = %user_id, bill_id = %bill_id, orders = history.len(), "Bill appended");
        Ok(history.len())
    }
}
