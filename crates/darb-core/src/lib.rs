//! # darb-core: Pure Business Logic for the Darb Storefront
//!
//! This crate holds every storefront rule as plain functions and small
//! value types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Darb Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (commands + CLI)                │   │
//! │  │   cart ops ──► checkout ──► WhatsApp link ──► review submit     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ darb-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐ ┌──────────┐ ┌────────┐ ┌────────┐ ┌──────────┐   │   │
//! │  │   │  cart  │ │ discount │ │ bundle │ │ order  │ │  review  │   │   │
//! │  │   │ Cart   │ │ Discount │ │ Bundle │ │ Order  │ │ Rating   │   │   │
//! │  │   │ Entry  │ │ Slot     │ │ Select │ │ Message│ │ Reviews  │   │   │
//! │  │   └────────┘ └──────────┘ └────────┘ └────────┘ └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   darb-api (REST access)                        │   │
//! │  │          products, users (cartInfo, billsHistory)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Review, Bill, Role, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart and its five mutation operations
//! - [`discount`] - First-order and code discounts
//! - [`bundle`] - Discovery Set bottle selection
//! - [`order`] - WhatsApp order message and bill records
//! - [`review`] - Review insert/replace and rating aggregation
//! - [`catalog`] - Stock status, best sellers, bundle candidates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use darb_core::cart::Cart;
//! use darb_core::discount::{calculate_discounts, DiscountCode};
//! use darb_core::money::Money;
//! use darb_core::types::Product;
//!
//! let mut cart = Cart::new();
//! cart.add(&Product::new("amber-oud", "Amber Oud", Money::from_major(500), 10));
//!
//! let result = calculate_discounts(cart.total_price(), 0, Some(DiscountCode::Ptcu60));
//! assert_eq!(result.amount, Money::from_major(150)); // 10% + 20%
//! assert_eq!(result.final_price, Money::from_major(350));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bundle;
pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod review;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name (and id) of the bundle product whose purchase entitles the buyer to
/// pick individual bottles.
pub const DISCOVERY_SET_NAME: &str = "Discovery set";

/// Bottles a buyer may pick per Discovery Set bought.
pub const BOTTLES_PER_DISCOVERY_SET: u32 = 6;

/// Store name used in order messages.
pub const STORE_NAME: &str = "Darb";
