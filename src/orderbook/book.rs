//! Price-level book maintained from a depth feed.
//!
//! ## Architecture
//!
//! - **Asks**: [`AskSide`], sorted low-to-high (best ask = lowest price)
//! - **Bids**: [`BidSide`], sorted high-to-low (best bid = highest price)
//!
//! ## Update Semantics
//!
//! A [`DepthUpdate`] carries the new absolute size at each listed price.
//! Each entry is applied on its own side, in feed order:
//!
//! | size | level exists | effect             |
//! |------|--------------|--------------------|
//! | 0    | yes          | remove             |
//! | 0    | no           | no-op              |
//! | > 0  | yes          | overwrite in place |
//! | > 0  | no           | insert             |
//!
//! ## Example
//!
//! ```
//! use depth_book::orderbook::{PriceLevel, PriceLevelBook};
//! use depth_book::types::{DepthUpdate, Side};
//!
//! let mut book = PriceLevelBook::new();
//! let update = DepthUpdate::parse(&[("100.00", "1.5")], &[("99.50", "2.0")]).unwrap();
//! book.apply(&update);
//!
//! assert_eq!(book.best_of(Side::Ask), Some(PriceLevel::new(10_000_000_000, 150_000_000)));
//! assert_eq!(book.best_of(Side::Bid), Some(PriceLevel::new(9_950_000_000, 200_000_000)));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::orderbook::book_side::{AskSide, BidSide, LevelChangeKind};
use crate::orderbook::{BookSnapshot, PriceLevel};
use crate::types::{DepthUpdate, Side};

/// Counts of what one `apply` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// New levels inserted
    pub inserted: usize,
    /// Existing levels overwritten
    pub updated: usize,
    /// Levels removed
    pub removed: usize,
    /// Removals for prices with no level
    pub ignored: usize,
}

impl ApplyStats {
    /// Total number of entries processed
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.removed + self.ignored
    }

    fn record(&mut self, kind: LevelChangeKind) {
        match kind {
            LevelChangeKind::Inserted => self.inserted += 1,
            LevelChangeKind::Updated => self.updated += 1,
            LevelChangeKind::Removed => self.removed += 1,
            LevelChangeKind::Ignored => self.ignored += 1,
        }
    }
}

/// Two-sided book of aggregate price levels for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceLevelBook {
    /// Ask levels (sorted low to high)
    asks: AskSide,

    /// Bid levels (sorted high to low)
    bids: BidSide,
}

impl PriceLevelBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            asks: AskSide::new(),
            bids: BidSide::new(),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Apply a depth update.
    ///
    /// Asks and bids are independent; entries within a side are applied in
    /// order, so a repeated price resolves to its last entry. Never fails:
    /// numeric validation belongs to the decoder.
    pub fn apply(&mut self, update: &DepthUpdate) -> ApplyStats {
        let mut stats = ApplyStats::default();

        for &(price, size) in &update.asks {
            stats.record(self.asks.set(price, size));
        }

        for &(price, size) in &update.bids {
            stats.record(self.bids.set(price, size));
        }

        trace!(
            inserted = stats.inserted,
            updated = stats.updated,
            removed = stats.removed,
            ignored = stats.ignored,
            "applied depth update"
        );

        stats
    }

    /// Remove every level from both sides
    pub fn clear(&mut self) {
        self.asks.clear();
        self.bids.clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Up to `n` levels of `side`, best first.
    ///
    /// The result has length `min(n, level_count(side))`; `n == 0` yields
    /// an empty vector.
    pub fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        match side {
            Side::Bid => self.bids.top(n),
            Side::Ask => self.asks.top(n),
        }
    }

    /// Best level of `side`, or `None` if that side is empty
    pub fn best_of(&self, side: Side) -> Option<PriceLevel> {
        match side {
            Side::Bid => self.bids.best(),
            Side::Ask => self.asks.best(),
        }
    }

    /// Level at exactly `price` on `side`
    pub fn level_at(&self, side: Side, price: u64) -> Option<PriceLevel> {
        match side {
            Side::Bid => self.bids.get(price),
            Side::Ask => self.asks.get(price),
        }
    }

    /// Number of resting levels on `side`
    #[inline]
    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Bid => self.bids.len(),
            Side::Ask => self.asks.len(),
        }
    }

    /// Check if both sides are empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Best ask minus best bid.
    ///
    /// `None` if either side is empty or the book is crossed.
    pub fn spread(&self) -> Option<u64> {
        let bid = self.bids.best()?;
        let ask = self.asks.best()?;
        ask.price.checked_sub(bid.price)
    }

    /// Average of best bid and best ask
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.bids.best()?;
        let ask = self.asks.best()?;
        Some((bid.price_decimal() + ask.price_decimal()) / Decimal::TWO)
    }

    /// Cumulative size over the best `n` levels of `side` (fixed-point).
    ///
    /// Saturates at `u64::MAX`.
    pub fn depth_at(&self, side: Side, n: usize) -> u64 {
        self.top_n(side, n)
            .iter()
            .fold(0u64, |acc, level| acc.saturating_add(level.size))
    }

    /// Snapshot of the best `depth` levels per side
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot::new(self.top_n(Side::Bid, depth), self.top_n(Side::Ask, depth))
    }

    /// Snapshot of every level on both sides
    pub fn full_snapshot(&self) -> BookSnapshot {
        BookSnapshot::new(self.bids.iter().collect(), self.asks.iter().collect())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
