//! # WhatsApp Orders
//!
//! Turns the cart into the text message sent to the store over WhatsApp and
//! into the bill record kept in the shopper's order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order via WhatsApp                                   │
//! │                                                                         │
//! │  validate_checkout(cart, address, bundle)                               │
//! │       │                                                                 │
//! │       ├── cart empty?            → EmptyCart                            │
//! │       ├── address blank?         → MissingAddress                       │
//! │       ├── Discovery set, 0 picks → EmptyBundleSelection                 │
//! │       ├── picks > 6 × sets       → TooManyBottles                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_bill(...)            ──► appended to billsHistory (darb-api)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_order_message(...)   ──► whatsapp_link(destination, message)     │
//! │                                  https://wa.me/2010...?text=...          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here performs I/O. Validation runs before any remote call so a
//! rejected checkout never leaves a half-written order behind.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write as _;
use std::str::FromStr;
use uuid::Uuid;

use crate::bundle::BundleSelection;
use crate::cart::{Cart, CartEntry};
use crate::catalog::BundleCandidate;
use crate::discount::DiscountResult;
use crate::error::{CoreError, CoreResult};
use crate::types::{Bill, BillLine, OrderStatus, PaymentMethod};
use crate::{BOTTLES_PER_DISCOVERY_SET, STORE_NAME};

/// Deep-link prefix of WhatsApp's click-to-chat.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

// =============================================================================
// Destinations
// =============================================================================

/// The store's WhatsApp numbers. The shopper may message either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatsAppDestination {
    Primary,
    Secondary,
}

impl WhatsAppDestination {
    pub const ALL: [WhatsAppDestination; 2] = [WhatsAppDestination::Primary, WhatsAppDestination::Secondary];

    /// Number in international format without `+`, as wa.me expects.
    pub const fn phone(&self) -> &'static str {
        match self {
            WhatsAppDestination::Primary => "201015310668",
            WhatsAppDestination::Secondary => "201149260444",
        }
    }

    /// Number as printed on the order button.
    pub const fn display(&self) -> &'static str {
        match self {
            WhatsAppDestination::Primary => "+20 101 531 0668",
            WhatsAppDestination::Secondary => "+20 114 926 0444",
        }
    }
}

impl FromStr for WhatsAppDestination {
    type Err = String;

    /// Accepts `primary` / `secondary` or the bare phone literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        WhatsAppDestination::ALL
            .into_iter()
            .find(|d| d.phone() == s || s.eq_ignore_ascii_case(d.name()))
            .ok_or_else(|| {
                format!(
                    "unknown WhatsApp destination '{}' (expected primary, secondary, {} or {})",
                    s,
                    WhatsAppDestination::Primary.phone(),
                    WhatsAppDestination::Secondary.phone()
                )
            })
    }
}

impl WhatsAppDestination {
    const fn name(&self) -> &'static str {
        match self {
            WhatsAppDestination::Primary => "primary",
            WhatsAppDestination::Secondary => "secondary",
        }
    }
}

/// Click-to-chat URL carrying `message` as pre-filled text.
///
/// ```rust
/// use darb_core::order::{whatsapp_link, WhatsAppDestination};
///
/// let link = whatsapp_link(WhatsAppDestination::Primary, "Hi & bye");
/// assert_eq!(link, "https://wa.me/201015310668?text=Hi%20%26%20bye");
/// ```
pub fn whatsapp_link(destination: WhatsAppDestination, message: &str) -> String {
    let encoded = utf8_percent_encode(message, URI_COMPONENT);
    format!("{}/{}?text={}", WHATSAPP_BASE_URL, destination.phone(), encoded)
}

/// Bytes escaped in a URI component: everything but ASCII alphanumerics
/// and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// =============================================================================
// Validation
// =============================================================================

/// Checks that a whole-cart order may be sent.
pub fn validate_checkout(cart: &Cart, address: &str, bundle: Option<&BundleSelection>) -> CoreResult<()> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validate_address(address)?;
    if let Some(set) = cart.discovery_set() {
        validate_bundle(bundle, set.quantity)?;
    }
    Ok(())
}

/// Checks that a single cart line may be ordered on its own.
pub fn validate_item_checkout(entry: &CartEntry, address: &str, bundle: Option<&BundleSelection>) -> CoreResult<()> {
    validate_address(address)?;
    if entry.product.is_discovery_set() {
        validate_bundle(bundle, entry.quantity)?;
    }
    Ok(())
}

/// Checks that every pick is a bottle the catalog offers for the set.
pub fn validate_picks(selection: &BundleSelection, candidates: &[BundleCandidate]) -> CoreResult<()> {
    match selection
        .iter()
        .find(|(id, _)| !candidates.iter().any(|c| c.id == *id))
    {
        Some((id, _)) => Err(CoreError::UnknownBottle(id.to_string())),
        None => Ok(()),
    }
}

fn validate_address(address: &str) -> CoreResult<()> {
    if address.trim().is_empty() {
        return Err(CoreError::MissingAddress);
    }
    Ok(())
}

/// The cap comes from the cart's set quantity, not from the selection,
/// which may have been opened for a different quantity.
fn validate_bundle(bundle: Option<&BundleSelection>, set_quantity: u32) -> CoreResult<()> {
    let selection = bundle
        .filter(|s| s.can_confirm())
        .ok_or(CoreError::EmptyBundleSelection)?;

    let cap = BOTTLES_PER_DISCOVERY_SET.saturating_mul(set_quantity);
    let selected = selection.total_selected();
    if selected > cap {
        return Err(CoreError::TooManyBottles { selected, cap });
    }
    Ok(())
}

// =============================================================================
// Message Builder
// =============================================================================

/// Everything the order message is built from.
#[derive(Debug, Clone, Copy)]
pub struct OrderRequest<'a> {
    /// See [`crate::types::User::display_name`].
    pub customer_name: &'a str,
    pub address: &'a str,
    pub cart: &'a Cart,
    /// Bottles picked for the Discovery Set, if the cart holds one.
    pub bundle: Option<&'a BundleSelection>,
    /// Catalog used to name picked bottles.
    pub candidates: &'a [BundleCandidate],
    pub discount: &'a DiscountResult,
}

/// Formats the whole-cart order message.
///
/// The output depends only on the request: same cart, same text.
pub fn build_order_message(request: &OrderRequest<'_>) -> String {
    let mut message = String::new();
    push_header(&mut message, "New Order", request.customer_name, request.address);
    message.push_str("🛍️ *Fragrance Orders:*\n");

    for (index, entry) in request.cart.entries().iter().enumerate() {
        let _ = writeln!(message, "{}. *{}*", index + 1, entry.product.name);
        if entry.product.is_discovery_set() {
            if let Some(selection) = request.bundle {
                push_bundle_lines(&mut message, selection, request.candidates);
            }
        }
        let _ = writeln!(message, "   💰 Price: {}", entry.product.price);
        let _ = writeln!(message, "   🔢 Quantity: {}", entry.quantity);
        let _ = writeln!(message, "   💎 Subtotal: {}\n", entry.subtotal());
    }

    if request.discount.has_discount() {
        let _ = writeln!(message, "🎫 *Discount Applied:* {}", request.discount.label);
        let _ = writeln!(message, "💰 *Discount Amount:* -{}\n", request.discount.amount);
    }

    let _ = writeln!(message, "💳 *Total Order Value:* {}\n", request.discount.final_price);
    push_footer(&mut message);
    message
}

/// Formats the message for ordering one cart line on its own.
///
/// No discounts apply to single-item orders.
pub fn build_item_message(
    customer_name: &str,
    address: &str,
    entry: &CartEntry,
    bundle: Option<&BundleSelection>,
    candidates: &[BundleCandidate],
) -> String {
    let mut message = String::new();
    push_header(&mut message, "Individual Order", customer_name, address);
    message.push_str("🛍️ *Fragrance Order:*\n");
    let _ = writeln!(message, "*{}*", entry.product.name);
    if entry.product.is_discovery_set() {
        if let Some(selection) = bundle {
            push_bundle_lines(&mut message, selection, candidates);
        }
    }
    let _ = writeln!(message, "💰 Price: {}", entry.product.price);
    let _ = writeln!(message, "🔢 Quantity: {}", entry.quantity);
    let _ = writeln!(message, "💎 Total: {}\n", entry.subtotal());
    push_footer(&mut message);
    message
}

fn push_header(message: &mut String, kind: &str, customer_name: &str, address: &str) {
    let _ = writeln!(message, "🌸 *{} Perfume Store - {}* 🌸\n", STORE_NAME, kind);
    let _ = writeln!(message, "👤 *Customer:* {}", customer_name);
    let _ = writeln!(message, "📍 *Address:* {}\n", address.trim());
}

fn push_footer(message: &mut String) {
    let _ = write!(message, "✨ Thank you for choosing {} perfumes! ✨", STORE_NAME);
}

fn push_bundle_lines(message: &mut String, selection: &BundleSelection, candidates: &[BundleCandidate]) {
    if selection.is_empty() {
        return;
    }
    message.push_str("   🎁 Selected Perfumes:\n");
    for (id, quantity) in selection.iter() {
        // Picks whose product left the catalog are not listed.
        let Some(candidate) = candidates.iter().find(|c| c.id == id) else {
            continue;
        };
        match &candidate.kind {
            Some(kind) => {
                let _ = writeln!(message, "      - {} ({}) x{}", candidate.name, kind, quantity);
            }
            None => {
                let _ = writeln!(message, "      - {} x{}", candidate.name, quantity);
            }
        }
    }
    let _ = writeln!(message, "   📦 Total bottles: {}", selection.total_selected());
}

// =============================================================================
// Bill Records
// =============================================================================

/// Generates `bill_<unix-millis>_<9 alphanumerics>`.
pub fn new_bill_id(now: DateTime<Utc>) -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("bill_{}_{}", now.timestamp_millis(), &entropy[..9])
}

/// Freezes the cart into an order-history record.
///
/// The bill total is the discounted final price; the discount summary is
/// only kept when a reduction applied.
pub fn build_bill(cart: &Cart, discount: &DiscountResult, address: &str, now: DateTime<Utc>) -> Bill {
    Bill {
        id: new_bill_id(now),
        products: cart
            .entries()
            .iter()
            .map(|entry| BillLine {
                id: entry.product.id.clone(),
                img: entry.product.url.clone(),
                title: entry.product.name.clone(),
                price: entry.product.price,
                quantity: entry.quantity,
            })
            .collect(),
        total_price: discount.final_price,
        order_date: now,
        location: address.trim().to_string(),
        payment_method: PaymentMethod::WhatsApp,
        status: OrderStatus::Pending,
        discount: discount.has_discount().then(|| discount.clone()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bundle_candidates;
    use crate::discount::{calculate_discounts, DiscountCode};
    use crate::money::Money;
    use crate::types::Product;
    use crate::DISCOVERY_SET_NAME;
    use chrono::TimeZone;

    fn amber() -> Product {
        Product::new("1", "Amber Oud", Money::from_major(450), 10).with_kind("Men's perfume")
    }

    fn rose() -> Product {
        Product::new("2", "Rose Musk", Money::from_major(400), 10).with_kind("Women's perfume")
    }

    fn discovery_set() -> Product {
        Product::new(DISCOVERY_SET_NAME, DISCOVERY_SET_NAME, Money::from_major(900), 10)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 4, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        assert_eq!(validate_checkout(&cart, "Cairo", None), Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_blank_address_rejected() {
        let mut cart = Cart::new();
        cart.add(&amber());
        assert_eq!(validate_checkout(&cart, "   ", None), Err(CoreError::MissingAddress));
        assert_eq!(validate_checkout(&cart, "Zamalek, Cairo", None), Ok(()));
    }

    #[test]
    fn test_bundle_requires_selection() {
        let mut cart = Cart::new();
        cart.add(&discovery_set());

        assert_eq!(
            validate_checkout(&cart, "Cairo", None),
            Err(CoreError::EmptyBundleSelection)
        );
        let mut selection = BundleSelection::new(1);
        assert_eq!(
            validate_checkout(&cart, "Cairo", Some(&selection)),
            Err(CoreError::EmptyBundleSelection)
        );
        selection.adjust("1", 2);
        assert_eq!(validate_checkout(&cart, "Cairo", Some(&selection)), Ok(()));
    }

    #[test]
    fn test_picks_beyond_current_set_quantity_rejected() {
        let mut cart = Cart::new();
        cart.add(&discovery_set());
        cart.increase(DISCOVERY_SET_NAME);
        let mut selection = BundleSelection::new(2);
        assert_eq!(selection.adjust("1", 12), crate::bundle::Adjustment::Set(12));
        assert_eq!(validate_checkout(&cart, "Cairo", Some(&selection)), Ok(()));

        cart.decrease(DISCOVERY_SET_NAME);
        assert_eq!(
            validate_checkout(&cart, "Cairo", Some(&selection)),
            Err(CoreError::TooManyBottles { selected: 12, cap: 6 })
        );

        let entry = CartEntry {
            product: discovery_set(),
            quantity: 1,
        };
        assert_eq!(
            validate_item_checkout(&entry, "Cairo", Some(&selection)),
            Err(CoreError::TooManyBottles { selected: 12, cap: 6 })
        );
    }

    #[test]
    fn test_picks_must_be_catalog_bottles() {
        let candidates = bundle_candidates(&[amber(), rose(), discovery_set()]);
        let mut selection = BundleSelection::new(1);
        selection.adjust("1", 3);
        assert_eq!(validate_picks(&selection, &candidates), Ok(()));

        selection.adjust(DISCOVERY_SET_NAME, 3);
        assert_eq!(
            validate_picks(&selection, &candidates),
            Err(CoreError::UnknownBottle(DISCOVERY_SET_NAME.to_string()))
        );

        let mut bogus = BundleSelection::new(1);
        bogus.adjust("bogus", 1);
        assert_eq!(
            validate_picks(&bogus, &candidates),
            Err(CoreError::UnknownBottle("bogus".to_string()))
        );
    }

    #[test]
    fn test_order_message_layout() {
        let mut cart = Cart::new();
        cart.add(&amber());
        cart.increase("1");
        let discount = calculate_discounts(cart.total_price(), 0, None);
        let request = OrderRequest {
            customer_name: "layla_m",
            address: "12 Nile St, Cairo",
            cart: &cart,
            bundle: None,
            candidates: &[],
            discount: &discount,
        };

        let expected = "🌸 *Darb Perfume Store - New Order* 🌸\n\n\
👤 *Customer:* layla_m\n\
📍 *Address:* 12 Nile St, Cairo\n\n\
🛍️ *Fragrance Orders:*\n\
1. *Amber Oud*\n\
\x20  💰 Price: 450.00 EGP\n\
\x20  🔢 Quantity: 2\n\
\x20  💎 Subtotal: 900.00 EGP\n\n\
🎫 *Discount Applied:* First order discount (10%)\n\
💰 *Discount Amount:* -90.00 EGP\n\n\
💳 *Total Order Value:* 810.00 EGP\n\n\
✨ Thank you for choosing Darb perfumes! ✨";
        assert_eq!(build_order_message(&request), expected);
    }

    #[test]
    fn test_order_message_lists_bundle_picks() {
        let catalog = vec![amber(), rose(), discovery_set()];
        let mut cart = Cart::new();
        cart.add(&discovery_set());
        let mut selection = BundleSelection::new(1);
        selection.adjust("2", 2);
        selection.adjust("1", 1);
        let discount = calculate_discounts(cart.total_price(), 4, None);
        let candidates = bundle_candidates(&catalog);

        let message = build_order_message(&OrderRequest {
            customer_name: "Omar",
            address: "Giza",
            cart: &cart,
            bundle: Some(&selection),
            candidates: &candidates,
            discount: &discount,
        });

        assert!(message.contains(
            "1. *Discovery set*\n   🎁 Selected Perfumes:\n      - Amber Oud (Men's perfume) x1\n      - Rose Musk (Women's perfume) x2\n   📦 Total bottles: 3\n"
        ));
        assert!(!message.contains("Discount Applied"));
        assert!(message.contains("💳 *Total Order Value:* 900.00 EGP"));
    }

    #[test]
    fn test_item_message() {
        let entry = CartEntry {
            product: rose(),
            quantity: 3,
        };
        let message = build_item_message("Sarah", "Maadi", &entry, None, &[]);
        assert!(message.starts_with("🌸 *Darb Perfume Store - Individual Order* 🌸\n\n"));
        assert!(message.contains("*Rose Musk*\n💰 Price: 400.00 EGP\n🔢 Quantity: 3\n💎 Total: 1200.00 EGP\n"));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link(WhatsAppDestination::Secondary, "*Order*\n1. Oud");
        assert_eq!(link, "https://wa.me/201149260444?text=*Order*%0A1.%20Oud");

        let link = whatsapp_link(WhatsAppDestination::Primary, "🌸 (x2) Amber's!");
        assert_eq!(
            link,
            "https://wa.me/201015310668?text=%F0%9F%8C%B8%20(x2)%20Amber's!"
        );
    }

    #[test]
    fn test_destination_parsing() {
        assert_eq!("primary".parse(), Ok(WhatsAppDestination::Primary));
        assert_eq!("201149260444".parse(), Ok(WhatsAppDestination::Secondary));
        assert!("201000000000".parse::<WhatsAppDestination>().is_err());
    }

    #[test]
    fn test_build_bill() {
        let mut cart = Cart::new();
        cart.add(&amber());
        let discount = calculate_discounts(cart.total_price(), 0, Some(DiscountCode::Ptcu59));
        let bill = build_bill(&cart, &discount, " Heliopolis ", now());

        assert!(bill.id.starts_with(&format!("bill_{}_", now().timestamp_millis())));
        assert_eq!(bill.id.len(), "bill_".len() + 13 + 1 + 9);
        assert_eq!(bill.total_price, Money::from_major(315));
        assert_eq!(bill.location, "Heliopolis");
        assert_eq!(bill.status, OrderStatus::Pending);
        assert_eq!(bill.payment_method, PaymentMethod::WhatsApp);
        assert_eq!(bill.products[0].title, "Amber Oud");
        assert_eq!(bill.discount.as_ref().map(|d| d.amount), Some(Money::from_major(135)));
    }

    #[test]
    fn test_bill_without_discount_has_none() {
        let mut cart = Cart::new();
        cart.add(&rose());
        let discount = calculate_discounts(cart.total_price(), 2, None);
        let bill = build_bill(&cart, &discount, "Cairo", now());
        assert!(bill.discount.is_none());
        assert_eq!(bill.total_price, Money::from_major(400));
    }
}
