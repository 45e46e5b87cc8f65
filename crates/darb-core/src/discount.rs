//! # Discounts
//!
//! First-order and discount-code reductions on the cart total.
//!
//! ## Rules (additive)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prior orders == 0        ──► + 10% of total  "First order discount"   │
//! │  code PTCU59 / PTCU60     ──► + 20% of total  "Discount code ..."      │
//! │                                                                         │
//! │  total 1000.00, first order, PTCU60:                                   │
//! │     amount = 100.00 + 200.00 = 300.00                                  │
//! │     final  = 700.00                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Codes compare case-sensitively. When both rules apply the code label is
//! the one reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::{self, Money, Percentage};

/// Reduction granted on a shopper's first order.
pub const FIRST_ORDER_RATE: Percentage = Percentage::from_percent(10);

/// Reduction granted by either discount code.
pub const CODE_RATE: Percentage = Percentage::from_percent(20);

/// Label of the first-order reduction.
pub const FIRST_ORDER_LABEL: &str = "First order discount (10%)";

// =============================================================================
// Discount Codes
// =============================================================================

/// A redeemable discount code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountCode {
    #[serde(rename = "PTCU59")]
    Ptcu59,
    #[serde(rename = "PTCU60")]
    Ptcu60,
}

impl DiscountCode {
    /// The literal the shopper types.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountCode::Ptcu59 => "PTCU59",
            DiscountCode::Ptcu60 => "PTCU60",
        }
    }

    /// Reduction granted by this code.
    pub const fn rate(&self) -> Percentage {
        CODE_RATE
    }

    /// Label shown next to the discount amount.
    pub fn label(&self) -> String {
        format!("Discount code {} ({}%)", self.as_str(), self.rate().whole_percent())
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountCode {
    type Err = CoreError;

    /// Exact, case-sensitive match. Surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PTCU59" => Ok(DiscountCode::Ptcu59),
            "PTCU60" => Ok(DiscountCode::Ptcu60),
            other => Err(CoreError::InvalidDiscountCode {
                code: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Discount Result
// =============================================================================

/// The reduction applicable to a cart.
///
/// Stored on bills as `{ amount, type, finalPrice }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    #[serde(with = "money::as_major")]
    pub amount: Money,
    /// Which rule produced the reduction; empty when there is none.
    #[serde(rename = "type")]
    pub label: String,
    #[serde(with = "money::as_major")]
    pub final_price: Money,
}

impl DiscountResult {
    /// True when any reduction applies.
    pub fn has_discount(&self) -> bool {
        self.amount.is_positive()
    }
}

/// Computes the reduction for a cart total.
///
/// ## Arguments
/// * `total` - cart total price
/// * `prior_orders` - number of orders in the shopper's history
/// * `code` - the applied discount code, if any
///
/// Each component is rounded to a minor unit on its own. The final price
/// never goes below zero.
pub fn calculate_discounts(total: Money, prior_orders: usize, code: Option<DiscountCode>) -> DiscountResult {
    let mut amount = Money::zero();
    let mut label = String::new();

    if prior_orders == 0 {
        amount += total.percentage(FIRST_ORDER_RATE);
        label = FIRST_ORDER_LABEL.to_string();
    }

    if let Some(code) = code {
        amount += total.percentage(code.rate());
        label = code.label();
    }

    DiscountResult {
        amount,
        label,
        final_price: total.saturating_sub(amount),
    }
}

// =============================================================================
// Discount Slot
// =============================================================================

/// Outcome of [`DiscountSlot::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The code is now applied.
    Applied(DiscountCode),
    /// A code was already applied; nothing changed.
    AlreadyApplied(DiscountCode),
}

/// The discount-code input of one checkout.
///
/// Once a code is applied the input is locked: further applies are no-ops
/// until [`DiscountSlot::remove`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscountSlot {
    applied: Option<DiscountCode>,
}

impl DiscountSlot {
    pub fn new() -> Self {
        DiscountSlot::default()
    }

    /// Applies `input` as a discount code.
    ///
    /// ## Errors
    /// `CoreError::InvalidDiscountCode` when the input is not a known code;
    /// the slot is left unchanged.
    pub fn apply(&mut self, input: &str) -> Result<ApplyOutcome, CoreError> {
        if let Some(current) = self.applied {
            return Ok(ApplyOutcome::AlreadyApplied(current));
        }
        let code = input.parse::<DiscountCode>()?;
        self.applied = Some(code);
        Ok(ApplyOutcome::Applied(code))
    }

    /// Clears the applied code, unlocking the input.
    pub fn remove(&mut self) -> Option<DiscountCode> {
        self.applied.take()
    }

    pub fn applied(&self) -> Option<DiscountCode> {
        self.applied
    }

    /// Whether the code input accepts text.
    pub fn is_locked(&self) -> bool {
        self.applied.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
