//! Book side.

use std::fmt;

// ============================================================================
// Side enum
// ============================================================================

/// Which collection of the book a price level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy side, best = highest price
    Bid,
    /// Sell side, best = lowest price
    Ask,
}

impl Side {
    /// Both sides, asks first (ladder display order)
    pub const ALL: [Side; 2] = [Side::Ask, Side::Bid];

    /// Whether `a` ranks ahead of `b` on this side.
    #[inline]
    pub fn is_better(self, a: u64, b: u64) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Ask => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Ask => f.write_str("ask"),
        }
    }
}
