//! # darb-api: Remote Access for the Darb Storefront
//!
//! Typed access to the storefront's JSON REST API over `reqwest`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Darb Data Flow                                   │
//! │                                                                         │
//! │  storefront command (checkout, submit_review, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     darb-api (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   DarbApi     │    │  Repositories │    │  ApiConfig   │   │   │
//! │  │   │  (client.rs)  │    │               │    │ (config.rs)  │   │   │
//! │  │   │               │    │ ProductRepo   │    │              │   │   │
//! │  │   │ HttpClient    │◄───│ UserRepo      │    │ darb.toml    │   │   │
//! │  │   │ (reqwest)     │    │ BillRepo      │    │ DARB_* env   │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Storefront REST API (/products, /users)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The [`DarbApi`] handle
//! - [`config`] - Client configuration (TOML file + environment)
//! - [`http`] - JSON-over-HTTP client and status mapping
//! - [`repository`] - Product, user and bill repositories
//! - [`error`] - API client error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::DarbApi;
pub use config::ApiConfig;
pub use error::{ApiClientError, ApiResult};

pub use repository::bill::BillRepository;
pub use repository::product::{ProductRepository, ReviewSubmission};
pub use repository::user::UserRepository;
