//! # Catalog Helpers
//!
//! Read-only views over the product list: availability labels, the
//! best-seller shelf, and the bottles a Discovery Set can be filled with.

use std::fmt;

use crate::types::Product;

/// Stock above this is shown as plainly "In Stock".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Size of the best-seller shelf on the home page.
pub const BEST_SELLER_COUNT: usize = 3;

/// Availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    /// Only this many left.
    LowStock(u32),
    OutOfStock,
}

impl StockStatus {
    pub fn from_stock(max_quantity: u32) -> Self {
        match max_quantity {
            0 => StockStatus::OutOfStock,
            n if n > LOW_STOCK_THRESHOLD => StockStatus::InStock,
            n => StockStatus::LowStock(n),
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "In Stock"),
            StockStatus::LowStock(n) => write!(f, "Only {} left", n),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// The `count` best-selling products, most sold first.
///
/// Ties keep catalog order.
pub fn best_sellers(products: &[Product], count: usize) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| b.sales.cmp(&a.sales));
    sorted.truncate(count);
    sorted
}

/// A bottle that can go into a Discovery Set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleCandidate {
    pub id: String,
    pub name: String,
    pub kind: Option<String>,
}

/// Every product except the Discovery Set itself, in catalog order.
pub fn bundle_candidates(products: &[Product]) -> Vec<BundleCandidate> {
    products
        .iter()
        .filter(|p| !p.is_discovery_set())
        .map(|p| BundleCandidate {
            id: p.id.clone(),
            name: p.name.clone(),
            kind: p.kind.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::DISCOVERY_SET_NAME;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Amber Oud", Money::from_major(450), 8).with_sales(40),
            Product::new(DISCOVERY_SET_NAME, DISCOVERY_SET_NAME, Money::from_major(900), 20).with_sales(90),
            Product::new("2", "Rose Musk", Money::from_major(400), 2).with_sales(40),
            Product::new("3", "Vetiver", Money::from_major(380), 0).with_sales(75),
        ]
    }

    #[test]
    fn test_stock_status_labels() {
        assert_eq!(StockStatus::from_stock(6).to_string(), "In Stock");
        assert_eq!(StockStatus::from_stock(5).to_string(), "Only 5 left");
        assert_eq!(StockStatus::from_stock(1), StockStatus::LowStock(1));
        assert_eq!(StockStatus::from_stock(0).to_string(), "Out of Stock");
    }

    #[test]
    fn test_best_sellers_sorted_and_stable() {
        let products = catalog();
        let top: Vec<&str> = best_sellers(&products, BEST_SELLER_COUNT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(top, vec![DISCOVERY_SET_NAME, "3", "1"]);
    }

    #[test]
    fn test_bundle_candidates_exclude_the_bundle() {
        let candidates = bundle_candidates(&catalog());
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.id != DISCOVERY_SET_NAME));
    }
}
