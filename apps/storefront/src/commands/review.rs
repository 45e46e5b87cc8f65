//! # Review Commands
//!
//! Posting and editing product reviews.
//!
//! A shopper has one review per product. Submitting again replaces it, and
//! the product rating is recomputed from every review on each submission.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use darb_core::review::{Rating, ReviewChange};
use darb_core::validation::{validate_product_id, validate_review};
use darb_core::{Action, Review};

use crate::commands::product::fetch_product;
use crate::error::{AppError, AppResult};
use crate::state::{ApiState, SessionState};

/// Result of a review submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReceipt {
    pub product_id: String,
    /// `true` when an earlier review by the same shopper was replaced.
    pub updated: bool,
    /// New product rating, one decimal, `None` without reviews.
    pub rating: Option<String>,
    pub review_count: usize,
}

/// Posts or replaces the shopper's review of `product_id`.
///
/// ## Errors
/// - `LOGIN_REQUIRED` for guests
/// - `VALIDATION_ERROR` for an empty comment or a rating outside 1..=5
/// - `NOT_FOUND` for an unknown product
pub async fn submit_review(
    api: &ApiState,
    session: &SessionState,
    product_id: &str,
    comment: &str,
    rating: u8,
) -> AppResult<ReviewReceipt> {
    debug!(product_id = %product_id, rating, "submit_review command");
    let shopper = session.require(Action::Review)?;
    validate_product_id(product_id)?;
    let comment = validate_review(comment, rating)?;

    let review = Review {
        client_id: shopper.user_id.clone(),
        client_name: shopper.display_name.clone(),
        comment,
        rating,
        timestamp: Utc::now(),
    };

    let submission = api
        .inner()
        .products()
        .submit_review(product_id, review)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::not_found("Product", product_id)
            } else {
                AppError::from(e)
            }
        })?;

    info!(
        product_id = %product_id,
        user_id = %shopper.user_id,
        change = ?submission.change,
        "Review stored"
    );

    Ok(ReviewReceipt {
        product_id: product_id.to_string(),
        updated: matches!(submission.change, ReviewChange::Updated { .. }),
        rating: submission.rating.map(|r| r.to_string()),
        review_count: submission.review_count,
    })
}

/// The shopper's current review of `product_id`, if any.
pub async fn my_review(api: &ApiState, session: &SessionState, product_id: &str) -> AppResult<Option<Review>> {
    let shopper = session.require(Action::Review)?;
    let product = fetch_product(api, product_id).await?;
    Ok(darb_core::review::find_by_client(&product.reviews, &shopper.user_id).cloned())
}

/// Formats a rating the way product pages show it.
pub fn format_rating(rating: Option<Rating>) -> String {
    rating.map_or_else(|| "No ratings yet".to_string(), |r| format!("{r} / 5"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "No ratings yet");
        assert_eq!(format_rating(Some(Rating::from_tenths(37))), "3.7 / 5");
    }
}
