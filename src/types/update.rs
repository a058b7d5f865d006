//! Depth update: the new absolute size at a set of prices.

use crate::types::price::to_fixed;
use crate::types::Side;

/// One `(price, size)` entry, both fixed-point (scaled by 10^8).
///
/// A `size` of zero means "remove the level at `price`".
pub type LevelChange = (u64, u64);

/// An incremental book update for a single instrument.
///
/// Sizes are absolute, never deltas: `(price, size)` states the new truth at
/// that price. Entries are applied in the order given; a repeated price
/// within one side's list resolves to the last entry.
///
/// ## Example
///
/// ```
/// use depth_book::types::DepthUpdate;
///
/// let update = DepthUpdate::new()
///     .with_ask(10_000_000_000, 150_000_000) // 100.00 x 1.5
///     .with_bid(9_950_000_000, 0);           // remove 99.50
///
/// assert_eq!(update.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthUpdate {
    /// Ask-side changes, in feed order
    pub asks: Vec<LevelChange>,
    /// Bid-side changes, in feed order
    pub bids: Vec<LevelChange>,
}

impl DepthUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-converted ask and bid lists
    pub fn from_levels(asks: Vec<LevelChange>, bids: Vec<LevelChange>) -> Self {
        Self { asks, bids }
    }

    /// Build from decimal string pairs.
    ///
    /// Returns `None` if any string is not a valid non-negative decimal.
    /// Handy for tests and fixtures; the feed decoder reports the offending
    /// field instead.
    ///
    /// ```
    /// use depth_book::types::DepthUpdate;
    ///
    /// let update = DepthUpdate::parse(&[("100.00", "1.5")], &[("99.50", "2.0")]).unwrap();
    /// assert_eq!(update.asks, vec![(10_000_000_000, 150_000_000)]);
    /// ```
    pub fn parse(asks: &[(&str, &str)], bids: &[(&str, &str)]) -> Option<Self> {
        Some(Self {
            asks: parse_pairs(asks)?,
            bids: parse_pairs(bids)?,
        })
    }

    /// Append an ask change
    pub fn with_ask(mut self, price: u64, size: u64) -> Self {
        self.asks.push((price, size));
        self
    }

    /// Append a bid change
    pub fn with_bid(mut self, price: u64, size: u64) -> Self {
        self.bids.push((price, size));
        self
    }

    /// Changes for one side
    pub fn side(&self, side: Side) -> &[LevelChange] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Total number of entries across both sides
    pub fn len(&self) -> usize {
        self.asks.len() + self.bids.len()
    }

    /// True if neither side carries an entry
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }
}

fn parse_pairs(pairs: &[(&str, &str)]) -> Option<Vec<LevelChange>> {
    pairs
        .iter()
        .map(|(price, size)| Some((to_fixed(price)?, to_fixed(size)?)))
        .collect()
}
