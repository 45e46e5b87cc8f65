//! # Product Repository
//!
//! Catalog reads and the review read-modify-write.
//!
//! ## Review Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  submit_review("7", review)                                             │
//! │       │                                                                 │
//! │       ├── GET /products/7         → current reviews                     │
//! │       │                                                                 │
//! │       ├── ReviewPatch::build      → insert or replace, new mean         │
//! │       │                                                                 │
//! │       └── PATCH /products/7       { reviews, rating: "4.5" }            │
//! │                                                                         │
//! │  Two shoppers submitting at the same moment can overwrite each other:   │
//! │  the second PATCH is built from a list that lacks the first review.     │
//! │  The API offers no version field to detect this.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use darb_core::review::{Rating, ReviewChange, ReviewPatch};
use darb_core::{Product, Review};

use crate::error::ApiResult;
use crate::http::HttpClient;

const PRODUCTS: &str = "products";

/// What a review submission stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    pub change: ReviewChange,
    /// The product rating after the change.
    pub rating: Option<Rating>,
    pub review_count: usize,
}

/// Repository for remote product operations.
///
/// ## Usage
/// ```rust,ignore
/// let products = api.products().list().await?;
/// let amber = api.products().get("7").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    http: HttpClient,
}

impl ProductRepository {
    pub fn new(http: HttpClient) -> Self {
        ProductRepository { http }
    }

    /// Fetches the whole catalog.
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let products: Vec<Product> = self.http.get(&[PRODUCTS]).await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetches one product.
    ///
    /// ## Errors
    /// `ApiClientError::NotFound` when the id is unknown.
    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        debug!(product_id = %id, "Fetching product");
        self.http.get(&[PRODUCTS, id]).await
    }

    /// Stores `review` on product `id` and recomputes its rating.
    ///
    /// The review list is fetched fresh, so the caller's copy of the
    /// product may be stale. The read-modify-write is not atomic.
    pub async fn submit_review(&self, id: &str, review: Review) -> ApiResult<ReviewSubmission> {
        let client_id = review.client_id.clone();
        let current = self.get(id).await?;

        let (patch, change) = ReviewPatch::build(current.reviews, review);
        let submission = ReviewSubmission {
            change,
            rating: patch.rating,
            review_count: patch.reviews.len(),
        };

        let _: serde::de::IgnoredAny = self.http.patch(&[PRODUCTS, id], &patch).await?;

        info!(
            product_id = %id,
            client_id = %client_id,
            change = ?submission.change,
            rating = ?submission.rating.map(|r| r.to_string()),
            "Review stored"
        );
        Ok(submission)
    }
}
