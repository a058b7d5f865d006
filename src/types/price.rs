//! Fixed-point price and size utilities.
//!
//! ## Overview
//!
//! Every price and size held by the book is a `u64` scaled by 10^8.
//! Wire values arrive as decimal strings and are converted exactly through
//! `rust_decimal`, so two strings naming the same price ("100.0" and
//! "100.00") always produce the same key.
//!
//! ## Scale Factor
//!
//! We use a scale factor of 10^8 (100,000,000), providing 8 decimal places.
//! Inputs with more significant places are rejected: rounding them would
//! turn a tiny non-zero size into a removal and merge distinct prices.
//!
//! ## Examples
//!
//! ```
//! use depth_book::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//!
//! assert_eq!(from_fixed(price), "50000.12345678");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

/// Decimal places carried by a fixed-point value
pub const DECIMALS: u32 = 8;

/// Largest whole value that can be represented (u64::MAX / SCALE).
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If parsing fails, the value is negative, or out of range
///
/// # Example
///
/// ```
/// use depth_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Returns `None` if the value is negative, has more than 8 significant
/// decimal places, or does not fit.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }
    // trailing zeros past the 8th place are fine
    if d.normalize().scale() > DECIMALS {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// ```
/// use depth_book::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format_fixed(value, 8)
}

/// Format a fixed-point value with exactly `decimals` places.
///
/// Rounds half away from zero, the way a ladder display is read.
///
/// ```
/// use depth_book::types::price::format_fixed;
///
/// assert_eq!(format_fixed(10_012_345_678, 2), "100.12");
/// assert_eq!(format_fixed(150_000_000, 4), "1.5000");
/// ```
pub fn format_fixed(value: u64, decimals: u32) -> String {
    format_decimal(fixed_to_decimal(value), decimals)
}

/// Format a decimal with exactly `decimals` places, rounding half away
/// from zero.
pub fn format_decimal(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// Convert fixed-point u64 to a human-readable string (trimmed trailing zeros)
///
/// ```
/// use depth_book::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
