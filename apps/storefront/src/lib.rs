//! # Darb Storefront Library
//!
//! The storefront's commands and state, and the `darb` command line that
//! drives them.
//!
//! ## Module Organization
//! ```text
//! darb_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup & run)
//! ├── cli.rs          ◄─── Argument parsing and output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── api.rs      ◄─── API client wrapper
//! │   ├── session.rs  ◄─── Logged-in shopper and role checks
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── checkout.rs ◄─── Discount code and bottle picker
//! │   └── config.rs   ◄─── Startup settings
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── session.rs  ◄─── Login, logout, order history
//! │   ├── product.rs  ◄─── Catalog commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── WhatsApp order commands
//! │   └── review.rs   ◄─── Review commands
//! └── error.rs        ◄─── Error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌───────────────┐  │
//! │  │   ApiState   │ │ SessionState │ │  CartState   │ │CheckoutSession│  │
//! │  │              │ │              │ │              │ │               │  │
//! │  │ • HTTP client│ │ • Shopper    │ │ • Cart lines │ │ • Code slot   │  │
//! │  │ • Config     │ │ • Role       │ │ • Total      │ │ • Bottle picks│  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └───────────────┘  │
//! │                                                                         │
//! │  Each command takes only the state it needs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use darb_api::ApiConfig;

use cli::Cli;
use error::AppResult;
use state::{ApiState, AppConfig, CartState, SessionState};

/// Runs one CLI invocation.
///
/// Loads the API configuration, logs in when a user is configured, then
/// executes the subcommand.
pub async fn run(cli: Cli) -> AppResult<()> {
    let api_config = ApiConfig::load(cli.config.clone())?;
    let app_config = AppConfig::from_env();
    info!(
        base_url = %api_config.base_url(),
        whatsapp = app_config.default_destination.phone(),
        "Storefront starting"
    );

    let user_id = cli
        .user
        .clone()
        .or_else(|| api_config.user_id().map(str::to_string));

    let api = ApiState::new(api_config)?;
    let session = SessionState::new();
    let cart = CartState::new();

    if let Some(user_id) = user_id.as_deref().filter(|_| cli.command.needs_session()) {
        commands::session::login(&api, &session, &cart, user_id).await?;
    }

    cli::execute(cli, &api, &session, &cart, &app_config).await
}

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,darb=debug,reqwest=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=darb=trace` - Show trace for darb crates only
/// - Default: INFO, DEBUG for darb crates; logs go to stderr
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(e) = tracing::subscriber::set_global_default(log_subscriber(filter)) {
        eprintln!("Tracing already initialized: {}", e);
    }
}

fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
