//! # Product Commands
//!
//! Catalog browsing. Open to everyone, logged in or not.

use serde::Serialize;
use tracing::debug;

use darb_core::catalog::{best_sellers, StockStatus, BEST_SELLER_COUNT};
use darb_core::review::{find_by_client, StarBreakdown};
use darb_core::validation::validate_product_id;
use darb_core::{Product, Review};

use crate::error::{AppError, AppResult};
use crate::state::{ApiState, SessionState};

/// Product page data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    #[serde(skip)]
    pub stock: StockStatus,
    #[serde(skip)]
    pub stars: Option<StarBreakdown>,
    /// The logged-in shopper's own review; the form opens in edit mode.
    pub my_review: Option<Review>,
}

/// Lists the whole catalog.
pub async fn list_products(api: &ApiState) -> AppResult<Vec<Product>> {
    debug!("list_products command");
    Ok(api.inner().products().list().await?)
}

/// The best-selling products, most sold first.
pub async fn list_best_sellers(api: &ApiState, count: Option<usize>) -> AppResult<Vec<Product>> {
    let count = count.unwrap_or(BEST_SELLER_COUNT);
    debug!(count, "list_best_sellers command");

    let products = api.inner().products().list().await?;
    Ok(best_sellers(&products, count).into_iter().cloned().collect())
}

/// Fetches one product with its stock label and rating stars.
pub async fn get_product(api: &ApiState, session: &SessionState, product_id: &str) -> AppResult<ProductDetail> {
    debug!(product_id = %product_id, "get_product command");
    validate_product_id(product_id)?;

    let product = fetch_product(api, product_id).await?;
    let my_review = session
        .current()
        .and_then(|shopper| find_by_client(&product.reviews, &shopper.user_id).cloned());

    Ok(ProductDetail {
        stock: product.stock_status(),
        stars: product.rating.map(|r| r.stars()),
        my_review,
        product,
    })
}

/// Fetches a product, reporting an unknown id as `NOT_FOUND` for products.
pub(crate) async fn fetch_product(api: &ApiState, product_id: &str) -> AppResult<Product> {
    api.inner().products().get(product_id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::not_found("Product", product_id)
        } else {
            AppError::from(e)
        }
    })
}
