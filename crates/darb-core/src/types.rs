//! # Domain Types
//!
//! Core domain types shared by every layer of the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (bill_...)  │       │
//! │  │  name / type    │   │  username       │   │  products[]     │       │
//! │  │  price (Money)  │   │  role (Role)    │   │  total_price    │       │
//! │  │  max_quantity   │   │  cart_info      │   │  location       │       │
//! │  │  reviews[]      │   │  bills_history  │   │  status         │       │
//! │  │  rating         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Review      │   │      Role       │   │  PaymentMethod  │       │
//! │  │  client_id      │   │  Guest          │   │  WhatsApp       │       │
//! │  │  rating 1..=5   │   │  User           │   ├─────────────────┤       │
//! │  │  comment        │   │  Admin          │   │  OrderStatus    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names follow the storefront API (`camelCase`, `type`, `desc`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartInfo;
use crate::catalog::StockStatus;
use crate::discount::DiscountResult;
use crate::money::{self, Money};
use crate::review::Rating;
use crate::DISCOVERY_SET_NAME;

// =============================================================================
// Product
// =============================================================================

/// A fragrance (or the Discovery Set bundle) offered in the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown in the market and in order messages.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// The designer fragrance this one is inspired by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspired_by: Option<String>,

    /// "Men's perfume", "Women's perfume", ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Unit price. Decimal pounds on the wire.
    #[serde(with = "money::as_major")]
    pub price: Money,

    /// Units in stock; the cart never holds more than this.
    #[serde(default)]
    pub max_quantity: u32,

    /// Bottles sold so far.
    #[serde(default)]
    pub sales: u32,

    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Mean review rating, one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product with only the fields the cart needs.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, max_quantity: u32) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            brand: None,
            desc: None,
            inspired_by: None,
            kind: None,
            price,
            max_quantity,
            sales: 0,
            url: None,
            reviews: Vec::new(),
            rating: None,
        }
    }

    /// Sets the fragrance type label.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the number of bottles sold.
    pub fn with_sales(mut self, sales: u32) -> Self {
        self.sales = sales;
        self
    }

    /// True for the Discovery Set bundle.
    ///
    /// The storefront identifies the bundle by its literal name; its catalog
    /// id carries the same literal.
    pub fn is_discovery_set(&self) -> bool {
        self.name == DISCOVERY_SET_NAME || self.id == DISCOVERY_SET_NAME
    }

    /// Availability label derived from stock.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.max_quantity)
    }

    /// Checks if `quantity` units can be put in a cart.
    #[inline]
    pub fn can_hold(&self, quantity: u32) -> bool {
        quantity <= self.max_quantity
    }
}

// =============================================================================
// Review
// =============================================================================

/// One shopper's review of a product. A shopper has at most one per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub client_id: String,
    pub client_name: String,
    pub comment: String,
    /// Stars, 1 to 5.
    pub rating: u8,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Roles
// =============================================================================

/// Who is using the storefront.
///
/// The API stores `"user"` or `"admin"`; a missing role means nobody is
/// logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    User,
    Admin,
}

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List and view products.
    Browse,
    /// Cart operations and checkout.
    Shop,
    /// Post or edit a review.
    Review,
    /// Market management pages.
    ManageMarket,
}

impl Role {
    /// Whether this role may perform `action`.
    ///
    /// ```text
    ///                 Browse   Shop   Review   ManageMarket
    ///   Guest           ✔       ✘       ✘          ✘
    ///   User            ✔       ✔       ✔          ✘
    ///   Admin           ✔       ✘       ✔          ✔
    /// ```
    pub fn permits(&self, action: Action) -> bool {
        match (self, action) {
            (_, Action::Browse) => true,
            (Role::Guest, Action::Shop | Action::Review | Action::ManageMarket) => false,
            (Role::User, Action::Shop | Action::Review) => true,
            (Role::User, Action::ManageMarket) => false,
            (Role::Admin, Action::Shop) => false,
            (Role::Admin, Action::Review | Action::ManageMarket) => true,
        }
    }

    /// True once someone has logged in.
    pub fn is_authenticated(&self) -> bool {
        match self {
            Role::Guest => false,
            Role::User | Role::Admin => true,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Guest => write!(f, "guest"),
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// Greeting used when the shopper has neither username nor name.
pub const FALLBACK_CUSTOMER_NAME: &str = "Valued Customer";

/// A storefront account as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Role,

    /// The persisted cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_info: Option<CartInfo>,

    /// Past orders, oldest first.
    #[serde(default)]
    pub bills_history: Vec<Bill>,
}

impl User {
    /// Name printed on orders: username, else name, else a generic greeting.
    pub fn display_name(&self) -> &str {
        [self.username.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(FALLBACK_CUSTOMER_NAME)
    }

    /// Number of orders placed before, for the first-order discount.
    pub fn prior_order_count(&self) -> usize {
        self.bills_history.len()
    }
}

// =============================================================================
// Bills (Order History)
// =============================================================================

/// How an order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Order sent as a WhatsApp message, paid on delivery.
    WhatsApp,
}

/// Lifecycle state of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the shopper, awaiting confirmation by the store.
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
    /// Any status written by a newer admin tool.
    #[serde(other)]
    Unknown,
}

/// A frozen line of a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub id: String,
    #[serde(default)]
    pub img: Option<String>,
    pub title: String,
    #[serde(with = "money::as_major")]
    pub price: Money,
    pub quantity: u32,
}

/// A placed order as appended to the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// `bill_<unix-millis>_<9 alphanumerics>`.
    pub id: String,
    pub products: Vec<BillLine>,
    /// Amount due after discounts.
    #[serde(with = "money::as_major")]
    pub total_price: Money,
    pub order_date: DateTime<Utc>,
    /// Delivery address.
    pub location: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub discount: Option<DiscountResult>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Guest.permits(Action::Browse));
        assert!(!Role::Guest.permits(Action::Shop));
        assert!(Role::User.permits(Action::Shop));
        assert!(Role::User.permits(Action::Review));
        assert!(!Role::User.permits(Action::ManageMarket));
        assert!(!Role::Admin.permits(Action::Shop));
        assert!(Role::Admin.permits(Action::ManageMarket));
    }

    #[test]
    fn test_missing_role_is_guest() {
        let user: User = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(user.role, Role::Guest);
        assert!(!user.role.is_authenticated());

        let admin: User = serde_json::from_str(r#"{"id":"u2","role":"admin"}"#).unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user: User = serde_json::from_str(r#"{"id":"u1","name":"Layla"}"#).unwrap();
        assert_eq!(user.display_name(), "Layla");

        user.username = Some("layla_m".to_string());
        assert_eq!(user.display_name(), "layla_m");

        user.username = Some(String::new());
        user.name = None;
        assert_eq!(user.display_name(), FALLBACK_CUSTOMER_NAME);
    }

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "id": "7",
            "name": "Amber Oud",
            "type": "Men's perfume",
            "price": 450,
            "maxQuantity": 3,
            "sales": 120,
            "inspiredBy": "Oud Wood",
            "reviews": [],
            "rating": "4.5"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.kind.as_deref(), Some("Men's perfume"));
        assert_eq!(product.price, Money::from_major(450));
        assert_eq!(product.max_quantity, 3);
        assert_eq!(product.rating.map(|r| r.to_string()).as_deref(), Some("4.5"));
        assert!(!product.is_discovery_set());
    }

    #[test]
    fn test_discovery_set_detection() {
        let bundle = Product::new("Discovery set", "Discovery set", Money::from_major(900), 10);
        assert!(bundle.is_discovery_set());
    }

    #[test]
    fn test_order_status_wire_values() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), r#""pending""#);
        assert_eq!(serde_json::to_string(&PaymentMethod::WhatsApp).unwrap(), r#""WhatsApp""#);
        let status: OrderStatus = serde_json::from_str(r#""shipped""#).unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }
}
