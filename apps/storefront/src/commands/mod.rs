//! # Commands Module
//!
//! Every storefront operation, as async functions over injected state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── session.rs   ◄─── Log in (loads the persisted cart)
//! ├── product.rs   ◄─── Catalog, product detail, best sellers
//! ├── cart.rs      ◄─── Add / increase / decrease / remove / clear
//! ├── checkout.rs  ◄─── Discount code, bottle picks, WhatsApp order
//! └── review.rs    ◄─── Post or edit a review
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the API
//! async fn list_products(api: &ApiState)
//!
//! // Needs the API, the shopper and the cart
//! async fn add_to_cart(api: &ApiState, session: &SessionState, cart: &CartState, ..)
//! ```

pub mod cart;
pub mod checkout;
pub mod product;
pub mod review;
pub mod session;
