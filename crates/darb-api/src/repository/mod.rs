//! # Repository Module
//!
//! Remote repositories for the storefront API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  storefront command                                                     │
//! │       │                                                                 │
//! │       │  api.products().submit_review("7", review)                      │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self)                      GET   /products                   │
//! │  ├── get(&self, id)                   GET   /products/{id}              │
//! │  └── submit_review(&self, id, review) GET + PATCH /products/{id}        │
//! │                                                                         │
//! │  UserRepository                                                         │
//! │  ├── get(&self, id)                   GET   /users/{id}                 │
//! │  └── save_cart(&self, id, cart)       PATCH /users/{id} {cartInfo}      │
//! │                                                                         │
//! │  BillRepository                                                         │
//! │  ├── list_for_user(&self, id)         GET   /users/{id}                 │
//! │  └── append(&self, id, bill)          GET + PATCH {billsHistory}        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog and reviews
//! - [`UserRepository`](user::UserRepository) - Accounts and persisted carts
//! - [`BillRepository`](bill::BillRepository) - Order history

pub mod bill;
pub mod product;
pub mod user;
