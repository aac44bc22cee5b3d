//! Cart pricing engine.
//!
//! Computes subtotal, tax, shipping and total for a list of line items. The
//! computation is pure and stateless; carts are never persisted.
//!
//! # Rounding
//!
//! Each stage is rounded on its own rather than rounding the final figure:
//!
//! 1. `subtotal` is summed from the unrounded per-item products
//! 2. `tax` is 7% of the *unrounded* subtotal, rounded to cents
//! 3. `total` adds the unrounded subtotal, the rounded tax and the shipping
//!    fee, then rounds to cents
//!
//! Rounding is half-to-even on the exact binary value of the float, so a
//! value such as `2.675` (stored as `2.67499...`) rounds down.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Sales tax applied to the subtotal.
pub const TAX_RATE: f64 = 0.07;

/// Carts with a subtotal strictly above this ship for free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 25.0;

/// Shipping charged on non-empty carts at or below the threshold.
pub const FLAT_SHIPPING_FEE: f64 = 4.99;

/// A single cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Caller-supplied product reference.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Quantity ordered.
    pub qty: u32,
}

impl CartItem {
    /// Unrounded `price * qty`.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// Totals for a cart, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

/// Price a cart.
///
/// ```
/// use supermarket_core::{CartItem, summarize};
///
/// let items = vec![CartItem {
///     id: "sku-1".to_string(),
///     name: "Oat milk".to_string(),
///     price: 10.0,
///     qty: 2,
/// }];
///
/// let summary = summarize(&items);
/// assert_eq!(summary.subtotal, 20.0);
/// assert_eq!(summary.tax, 1.4);
/// assert_eq!(summary.shipping, 4.99);
/// assert_eq!(summary.total, 26.39);
/// ```
#[must_use]
pub fn summarize(items: &[CartItem]) -> CartSummary {
    // Fold from +0.0 so an empty cart never reports -0.0.
    let subtotal = items
        .iter()
        .fold(0.0, |acc, item| acc + item.line_total());
    let shipping = shipping_for(subtotal);
    let tax = round_cents(subtotal * TAX_RATE);
    let total = round_cents(subtotal + tax + shipping);

    CartSummary {
        subtotal: round_cents(subtotal),
        tax,
        shipping: round_cents(shipping),
        total,
    }
}

/// Shipping fee for an unrounded subtotal.
///
/// Empty carts and carts over the threshold ship free; everything else,
/// including a subtotal of exactly 25.00, pays the flat fee.
#[must_use]
#[allow(clippy::float_cmp)] // an empty cart sums to exactly zero
pub fn shipping_for(subtotal: f64) -> f64 {
    if subtotal == 0.0 || subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Round to two decimal places, ties to even.
///
/// Values outside the range a `Decimal` can hold (and non-finite values) are
/// returned unchanged.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    let cents = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|d| d.to_i64());

    match cents {
        #[allow(clippy::cast_precision_loss)] // cents beyond 2^53 are already integral
        Some(cents) => cents as f64 / 100.0,
        None => value,
    }
}
