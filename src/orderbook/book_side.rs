//! One side of the book: price levels kept in best-first order.
//!
//! ## Ordering
//!
//! The ordering is carried by the map key rather than a comparator object:
//!
//! - **Asks**: key = `price` (ascending, best ask = lowest price)
//! - **Bids**: key = `Reverse(price)` (descending, best bid = highest price)
//!
//! Either way, `BTreeMap` iteration from the front yields the best level
//! first, and a point lookup is an ordinary O(log n) `get` on the key.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::orderbook::PriceLevel;

/// Map key that fixes a side's sort order.
pub trait LevelKey: Ord + Copy {
    /// Wrap a raw fixed-point price
    fn from_price(price: u64) -> Self;

    /// Recover the raw fixed-point price
    fn price(self) -> u64;
}

/// Ascending order (asks)
impl LevelKey for u64 {
    #[inline]
    fn from_price(price: u64) -> Self {
        price
    }

    #[inline]
    fn price(self) -> u64 {
        self
    }
}

/// Descending order (bids)
impl LevelKey for Reverse<u64> {
    #[inline]
    fn from_price(price: u64) -> Self {
        Reverse(price)
    }

    #[inline]
    fn price(self) -> u64 {
        self.0
    }
}

/// What a single `set` did to the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChangeKind {
    /// A new level was inserted
    Inserted,
    /// An existing level's size was overwritten
    Updated,
    /// An existing level was removed (size 0)
    Removed,
    /// Size 0 for a price with no level: nothing to do
    Ignored,
}

/// Sorted, unique-by-price collection of levels for one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSide<K: LevelKey> {
    /// Key -> resting size (fixed-point, never zero)
    levels: BTreeMap<K, u64>,
}

/// Ask side, lowest price first
pub type AskSide = BookSide<u64>;

/// Bid side, highest price first
pub type BidSide = BookSide<Reverse<u64>>;

impl<K: LevelKey> BookSide<K> {
    /// Create an empty side
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Set the absolute size at `price`.
    ///
    /// `size == 0` removes the level if present; any other size inserts or
    /// overwrites. The two branches never both run, so a zero-size level
    /// can never be stored.
    pub fn set(&mut self, price: u64, size: u64) -> LevelChangeKind {
        let key = K::from_price(price);

        if size == 0 {
            return match self.levels.remove(&key) {
                Some(_) => LevelChangeKind::Removed,
                None => LevelChangeKind::Ignored,
            };
        }

        match self.levels.get_mut(&key) {
            Some(existing) => {
                *existing = size;
                LevelChangeKind::Updated
            }
            None => {
                self.levels.insert(key, size);
                LevelChangeKind::Inserted
            }
        }
    }

    /// Exact lookup at `price`
    #[inline]
    pub fn get(&self, price: u64) -> Option<PriceLevel> {
        self.levels
            .get(&K::from_price(price))
            .map(|size| PriceLevel::new(price, *size))
    }

    /// Check whether a level exists at `price`
    #[inline]
    pub fn contains(&self, price: u64) -> bool {
        self.levels.contains_key(&K::from_price(price))
    }

    /// Best level, if any
    #[inline]
    pub fn best(&self) -> Option<PriceLevel> {
        self.iter().next()
    }

    /// Levels in best-first order
    pub fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.levels
            .iter()
            .map(|(key, size)| PriceLevel::new(key.price(), *size))
    }

    /// Up to `n` levels in best-first order
    pub fn top(&self, n: usize) -> Vec<PriceLevel> {
        self.iter().take(n).collect()
    }

    /// Number of resting levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the side has no levels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Remove every level
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
