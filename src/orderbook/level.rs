//! Price level: aggregate resting size at one exact price.
//!
//! ## Design
//!
//! A `PriceLevel` is a plain value. The book stores only `price -> size`
//! and builds `PriceLevel`s on the way out, so callers always hold copies
//! and can never reorder the book's storage from outside.
//!
//! ## SSZ Layout
//!
//! Serialized as a fixed-size container of two little-endian u64s
//! (16 bytes), used by [`BookSnapshot`](crate::orderbook::BookSnapshot).

use rust_decimal::Decimal;
use ssz_rs::prelude::*;

use crate::types::price::{fixed_to_decimal, from_fixed_trimmed};

/// One level of the book.
///
/// Both fields use fixed-point representation (scaled by 10^8). A level
/// held by the book never has `size == 0`.
///
/// ## Example
///
/// ```
/// use depth_book::orderbook::PriceLevel;
///
/// // 100.00 x 1.5
/// let level = PriceLevel::new(10_000_000_000, 150_000_000);
/// assert_eq!(level.to_string(), "1.5 @ 100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SimpleSerialize)]
pub struct PriceLevel {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Resting size in fixed-point (scaled by 10^8)
    pub size: u64,
}

impl PriceLevel {
    /// Create a new price level
    #[inline]
    pub fn new(price: u64, size: u64) -> Self {
        Self { price, size }
    }

    /// Price as a Decimal
    pub fn price_decimal(&self) -> Decimal {
        fixed_to_decimal(self.price)
    }

    /// Size as a Decimal
    pub fn size_decimal(&self) -> Decimal {
        fixed_to_decimal(self.size)
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {}",
            from_fixed_trimmed(self.size),
            from_fixed_trimmed(self.price)
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
