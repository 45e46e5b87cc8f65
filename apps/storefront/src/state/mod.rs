//! # State Module
//!
//! Application state for the storefront, one container per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   ApiState   │  │  CartState   │  │ SessionState │  │ AppConfig  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  DarbApi     │  │  Arc<Mutex<  │  │  Mutex<      │  │ store name │  │
//! │  │  (reqwest    │  │    Cart      │  │   Option<    │  │ currency   │  │
//! │  │   client)    │  │  >>          │  │   Shopper>>  │  │ WhatsApp # │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ CheckoutSession (plain value, owned by the caller)              │   │
//! │  │ discount code slot + Discovery Set bottle picks                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ApiState: reqwest client is internally pooled and cloneable         │
//! │  • CartState / SessionState: Mutex, never held across an await         │
//! │  • AppConfig: read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod cart;
mod checkout;
mod config;
mod session;

pub use api::ApiState;
pub use cart::{CartState, CartView};
pub use checkout::{CheckoutSession, DiscountPreview};
pub use config::AppConfig;
pub use session::{SessionState, Shopper};
