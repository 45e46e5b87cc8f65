//! # Error Types
//!
//! Domain-specific error types for darb-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  darb-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rejections (codes, checkout, reviews)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  darb-api errors (separate crate)                                      │
//! │  └── ApiClientError   - HTTP / config failures                         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError ← ApiClientError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries a message fit to show the shopper as-is.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections.
///
/// None of these are fatal: the operation that produced one left all state
/// exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The entered discount code is not one of the known literals.
    #[error("Invalid discount code '{code}'. Please try PTCU59 or PTCU60.")]
    InvalidDiscountCode { code: String },

    /// Checkout attempted with an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Checkout attempted without a delivery address.
    #[error("Please enter your delivery address")]
    MissingAddress,

    /// The cart holds a Discovery Set but no bottles were picked for it.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: [Discovery set x1, Amber Oud x2]
    ///      │
    ///      ▼
    /// Order via WhatsApp
    ///      │
    ///      ▼
    /// Bottle picker: 0 / 6 selected ──► Confirm disabled
    ///      │
    ///      ▼
    /// EmptyBundleSelection (no bill, no link)
    /// ```
    #[error("Please select at least one perfume for your Discovery set")]
    EmptyBundleSelection,

    /// The picks outgrew the Discovery Sets left in the cart.
    #[error("You picked {selected} bottles but your Discovery sets hold {cap}")]
    TooManyBottles { selected: u32, cap: u32 },

    /// A pick that is not a bottle offered for the Discovery Set.
    #[error("'{0}' cannot go into a Discovery set")]
    UnknownBottle(String),

    /// A product id that is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed rating string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
