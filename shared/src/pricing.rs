//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary values travel as `f64` in models and over the wire, but every
//! calculation runs through `Decimal` and is rounded half-up to 2 decimal
//! places. Rounding happens once at the line level, never on unrounded
//! intermediate sums, so penny drift cannot accumulate across many lines.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i32 = 9999;

/// Pricing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Amount is negative, NaN, infinite, or out of range
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate that a monetary value is finite and non-negative
fn require_valid_amount(value: f64, field_name: &str) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    if value < 0.0 {
        return Err(PricingError::InvalidAmount(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a price field (finite, non-negative, bounded)
pub fn validate_price(value: f64, field_name: &str) -> PricingResult<()> {
    require_valid_amount(value, field_name)?;
    if value > MAX_PRICE {
        return Err(PricingError::InvalidAmount(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_PRICE, value
        )));
    }
    Ok(())
}

/// Display discount percentage derived from original vs. current price
///
/// Returns 0 when `original_price` is absent or not greater than `price`;
/// otherwise `round((original - price) / original * 100)` half-up, as an
/// integer percent for display.
pub fn discount_percent(price: f64, original_price: Option<f64>) -> u32 {
    let Some(original) = original_price else {
        return 0;
    };
    if !original.is_finite() || !price.is_finite() || original <= price || original <= 0.0 {
        return 0;
    }

    let original = to_decimal(original);
    let price = to_decimal(price);
    let percent = (original - price) / original * Decimal::ONE_HUNDRED;
    percent
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Line total: price × quantity, rounded once at the line level
pub fn line_total(price: f64, quantity: i32) -> f64 {
    let total = to_decimal(price) * Decimal::from(quantity);
    to_f64(total)
}

/// Order total: subtotal + shipping, same rounding rule
///
/// Fails with [`PricingError::InvalidAmount`] if either input is negative or
/// non-finite.
pub fn order_total(subtotal: f64, shipping: f64) -> PricingResult<f64> {
    require_valid_amount(subtotal, "subtotal")?;
    require_valid_amount(shipping, "shipping")?;

    Ok(to_f64(to_decimal(subtotal) + to_decimal(shipping)))
}
