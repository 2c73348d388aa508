//! Decimal <-> tick conversion.
//!
//! ## Overview
//!
//! The book only ever sees integer tick counts. Feeds and callers that
//! quote decimal prices convert here, once, using `rust_decimal` so that
//! no floating-point value is ever involved in a price comparison.
//!
//! A tick count is `price / tick_size`. Prices that do not sit exactly on
//! the tick grid are rejected rather than rounded, since a silently
//! rounded price would rest on a different level than the caller asked for.
//!
//! ## Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use tickbook::types::price::{to_ticks, from_ticks};
//!
//! let tick = Decimal::new(25, 2); // 0.25
//!
//! assert_eq!(to_ticks("100.75", tick), Some(403));
//! assert_eq!(to_ticks("100.10", tick), None); // off-grid
//! assert_eq!(from_ticks(403, tick), "100.75");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::Price;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal price string to ticks
///
/// # Returns
///
/// * `Some(Price)` - The tick count
/// * `None` - If parsing fails, the tick size is not positive, the price is
///   negative, off-grid, or does not fit in a `u64`
pub fn to_ticks(s: &str, tick_size: Decimal) -> Option<Price> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_ticks(decimal, tick_size)
}

/// Convert a Decimal price to ticks
///
/// See [`to_ticks`] for the rejection rules.
pub fn decimal_to_ticks(price: Decimal, tick_size: Decimal) -> Option<Price> {
    if tick_size <= Decimal::ZERO || price.is_sign_negative() {
        return None;
    }

    let ticks = price.checked_div(tick_size)?;
    if !ticks.fract().is_zero() {
        return None;
    }
    ticks.trunc().to_u64()
}

/// Convert ticks back to a Decimal price
pub fn ticks_to_decimal(ticks: Price, tick_size: Decimal) -> Decimal {
    Decimal::from(ticks) * tick_size
}

/// Convert ticks to a price string (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tickbook::types::price::from_ticks;
///
/// assert_eq!(from_ticks(10_000, Decimal::new(1, 2)), "100");
/// assert_eq!(from_ticks(10_050, Decimal::new(1, 2)), "100.5");
/// ```
pub fn from_ticks(ticks: Price, tick_size: Decimal) -> String {
    format!("{}", ticks_to_decimal(ticks, tick_size).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
