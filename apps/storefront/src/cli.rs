//! # Command Line
//!
//! `darb` subcommands and their terminal output.
//!
//! ## Usage
//! ```text
//! darb products --best-sellers
//! darb --user u-1 cart add 7
//! darb --user u-1 checkout --address "12 Nile St, Cairo" --code PTCU60 \
//!      --pick 3=4 --pick 5=2 --to secondary
//! darb --user u-1 review 7 --rating 5 --comment "Lasts all day"
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use darb_api::ApiConfig;
use darb_core::bundle::Adjustment;
use darb_core::catalog::StockStatus;
use darb_core::order::WhatsAppDestination;
use darb_core::{Bill, Product};

use crate::commands::{self, cart::CartOp, checkout::OrderInput};
use crate::error::{AppError, AppResult};
use crate::state::{ApiState, AppConfig, CartState, CartView, CheckoutSession, SessionState};

#[derive(Parser, Debug)]
#[command(name = "darb")]
#[command(about = "Shop the Darb perfume store and order over WhatsApp")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log in as this user id
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the catalog
    Products {
        /// Only the best sellers, most sold first
        #[arg(long)]
        best_sellers: bool,

        /// How many best sellers to show
        #[arg(long, short = 'n', requires = "best_sellers")]
        count: Option<usize>,
    },

    /// Show one product with its reviews
    Product {
        id: String,
    },

    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },

    /// Order the cart (or one line of it) over WhatsApp
    Checkout {
        /// Delivery address
        #[arg(long, short = 'a')]
        address: String,

        /// Discount code
        #[arg(long)]
        code: Option<String>,

        /// WhatsApp number to order through: primary or secondary
        #[arg(long)]
        to: Option<WhatsAppDestination>,

        /// Discovery Set bottle, as <product id>=<count>
        #[arg(long = "pick", value_parser = parse_pick)]
        picks: Vec<(String, u32)>,

        /// Order only this cart line, without discounts
        #[arg(long)]
        item: Option<String>,

        /// Show the totals without ordering
        #[arg(long)]
        dry_run: bool,
    },

    /// Post or edit your review of a product
    Review {
        product_id: String,

        /// Stars, 1 to 5
        #[arg(long, short = 'r')]
        rating: u8,

        #[arg(long, short = 'c')]
        comment: String,
    },

    /// List your past orders
    History,

    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CartAction {
    /// Show the cart (default)
    Show,
    /// Add a product, or one more of it
    Add { id: String },
    /// One more of a product already in the cart
    Inc { id: String },
    /// One less, down to 1
    Dec { id: String },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Remember a user id for later runs
    Login { user_id: String },
    /// Forget the remembered user id
    Logout,
}

impl Command {
    /// Config commands must work even when the saved user is gone.
    pub fn needs_session(&self) -> bool {
        !matches!(self, Command::Config { .. })
    }
}

fn parse_pick(s: &str) -> Result<(String, u32), String> {
    let (id, count) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <product id>=<count>, got `{s}`"))?;
    if id.trim().is_empty() {
        return Err("product id is empty".to_string());
    }
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid count `{count}`: {e}"))?;
    Ok((id.trim().to_string(), count))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Executes the parsed subcommand against the given state.
pub async fn execute(
    cli: Cli,
    api: &ApiState,
    session: &SessionState,
    cart: &CartState,
    app_config: &AppConfig,
) -> AppResult<()> {
    let json = cli.json;

    match cli.command {
        Command::Products { best_sellers, count } => {
            let products = if best_sellers {
                commands::product::list_best_sellers(api, count).await?
            } else {
                commands::product::list_products(api).await?
            };
            if json {
                return print_json(&products);
            }
            print_products(&products);
        }

        Command::Product { id } => {
            let detail = commands::product::get_product(api, session, &id).await?;
            if json {
                return print_json(&detail);
            }
            print_product(&detail.product, detail.stock);
            if let Some(mine) = &detail.my_review {
                println!("Your review: {}★ {}", mine.rating, mine.comment);
            }
        }

        Command::Cart { action } => {
            let view = match action.unwrap_or(CartAction::Show) {
                CartAction::Show => commands::cart::get_cart(cart),
                CartAction::Add { id } => commands::cart::add_to_cart(api, session, cart, &id).await?,
                CartAction::Inc { id } => update(api, session, cart, CartOp::Increase(&id)).await?,
                CartAction::Dec { id } => update(api, session, cart, CartOp::Decrease(&id)).await?,
                CartAction::Remove { id } => update(api, session, cart, CartOp::Remove(&id)).await?,
                CartAction::Clear => update(api, session, cart, CartOp::Clear).await?,
            };
            if json {
                return print_json(&view);
            }
            print_cart(&view);
        }

        Command::Checkout {
            address,
            code,
            to,
            picks,
            item,
            dry_run,
        } => {
            let input = OrderInput {
                address: &address,
                destination: to.unwrap_or(app_config.default_destination),
            };

            let receipt = if let Some(item) = item {
                let quantity = cart
                    .with_cart(|c| c.quantity_of(&item))
                    .ok_or_else(|| AppError::not_found("Cart item", &item))?;
                let bundle = if picks.is_empty() {
                    None
                } else {
                    Some(commands::checkout::select_bottles(quantity, &picks)?)
                };
                commands::checkout::order_item(api, session, cart, &item, bundle.as_ref(), input).await?
            } else {
                let mut checkout = CheckoutSession::new();
                if let Some(code) = code.as_deref() {
                    commands::checkout::apply_discount_code(&mut checkout, code)?;
                }
                for (id, count) in &picks {
                    let adjustment = commands::checkout::adjust_bottle(cart, &mut checkout, id, i64::from(*count))?;
                    if adjustment == Adjustment::Rejected {
                        let cap = checkout.bundle().map_or(0, |b| b.cap());
                        return Err(AppError::validation(format!("You can pick at most {cap} bottles")));
                    }
                }

                let preview = commands::checkout::preview_checkout(session, cart, &checkout)?;
                if dry_run {
                    if json {
                        return print_json(&preview);
                    }
                    println!("Total: {}", preview.total_price);
                    if preview.discount.has_discount() {
                        println!("{}: -{}", preview.discount.label, preview.discount.amount);
                    }
                    println!("Due: {}", preview.discount.final_price);
                    return Ok(());
                }
                commands::checkout::place_order(api, session, cart, &mut checkout, input).await?
            };

            if json {
                return print_json(&receipt);
            }
            println!("{}\n", receipt.message);
            if let Some(bill_id) = &receipt.bill_id {
                println!("Saved as {bill_id}");
            }
            println!("Send your order on WhatsApp ({}):", input.destination.display());
            println!("{}", receipt.whatsapp_url);
        }

        Command::Review {
            product_id,
            rating,
            comment,
        } => {
            let receipt = commands::review::submit_review(api, session, &product_id, &comment, rating).await?;
            if json {
                return print_json(&receipt);
            }
            let verb = if receipt.updated { "updated" } else { "posted" };
            println!(
                "Review {verb}. Rating is now {} from {} reviews.",
                receipt.rating.as_deref().unwrap_or("-"),
                receipt.review_count
            );
        }

        Command::History => {
            let bills = commands::session::order_history(api, session).await?;
            if json {
                return print_json(&bills);
            }
            print_history(&bills);
        }

        Command::Config { action } => config_command(action, cli.config, api.config())?,
    }

    Ok(())
}

async fn update(api: &ApiState, session: &SessionState, cart: &CartState, op: CartOp<'_>) -> AppResult<CartView> {
    commands::cart::update_cart(api, session, cart, op).await
}

fn config_command(action: ConfigAction, path: Option<PathBuf>, current: &ApiConfig) -> AppResult<()> {
    match action {
        ConfigAction::Show => {
            println!("API:     {}", current.base_url());
            println!("Timeout: {}s", current.timeout().as_secs());
            println!("User:    {}", current.user_id().unwrap_or("(not logged in)"));
        }
        ConfigAction::Login { user_id } => {
            let mut config = current.clone();
            config.session.user_id = Some(user_id);
            config.validate()?;
            let saved = config.save(path)?;
            println!("Saved to {}", saved.display());
        }
        ConfigAction::Logout => {
            let mut config = current.clone();
            config.session.user_id = None;
            let saved = config.save(path)?;
            println!("Saved to {}", saved.display());
        }
    }
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Could not format output: {e}")))?;
    println!("{text}");
    Ok(())
}

fn print_products(products: &[Product]) {
    for p in products {
        let rating = p.rating.map_or_else(|| "-".to_string(), |r| r.to_string());
        println!(
            "{:<6} {:<28} {:>12}  ★{:<4} {}",
            p.id,
            p.name,
            p.price.to_string(),
            rating,
            p.stock_status()
        );
    }
}

fn print_product(product: &Product, stock: StockStatus) {
    println!("{} ({})", product.name, product.id);
    if let Some(inspired_by) = &product.inspired_by {
        println!("Inspired by {inspired_by}");
    }
    if let Some(desc) = &product.desc {
        println!("{desc}");
    }
    println!("{}  {}", product.price, stock);
    println!("{}", commands::review::format_rating(product.rating));
    for review in &product.reviews {
        println!("  {}★ {}: {}", review.rating, review.client_name, review.comment);
    }
}

fn print_cart(view: &CartView) {
    if view.is_empty {
        println!("Your cart is empty");
        return;
    }
    for entry in &view.entries {
        println!(
            "{:<6} {:<28} x{:<3} {:>12}",
            entry.product.id,
            entry.product.name,
            entry.quantity,
            entry.subtotal().to_string()
        );
    }
    println!("Total: {}", view.total_price);
}

fn print_history(bills: &[Bill]) {
    if bills.is_empty() {
        println!("No orders yet");
        return;
    }
    for bill in bills {
        println!(
            "{}  {}  {:>12}  {:?}  {}",
            bill.order_date.format("%Y-%m-%d"),
            bill.id,
            bill.total_price.to_string(),
            bill.status,
            bill.location
        );
    }
}
