//! Single-writer, many-reader handle to a [`PriceLevelBook`].
//!
//! ## Concurrency
//!
//! - The feed task is the only writer. Each [`SharedBook::apply`] holds the
//!   write lock for the whole update, so a reader sees the book either
//!   before or after a message, never halfway through one.
//! - Readers (render loop, strategies) take the shared read lock, copy what
//!   they need and release it. No reference into the book outlives a call.
//!
//! `parking_lot::RwLock` is used for its small uncontended cost and because
//! it does not let a steady stream of writes starve readers.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::orderbook::{ApplyStats, BookQuery, BookSnapshot, PriceLevel, PriceLevelBook};
use crate::types::{DepthUpdate, Side};

/// Cloneable handle; clones share the same book.
#[derive(Debug, Clone, Default)]
pub struct SharedBook {
    inner: Arc<RwLock<PriceLevelBook>>,
}

impl SharedBook {
    /// Create a handle to a new, empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing book
    pub fn from_book(book: PriceLevelBook) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    /// Apply an update atomically with respect to readers
    pub fn apply(&self, update: &DepthUpdate) -> ApplyStats {
        self.inner.write().apply(update)
    }

    /// Remove every level
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Run `f` against a consistent view of the book.
    ///
    /// Use this when several reads must agree with each other (for example
    /// both sides of a ladder frame).
    pub fn read<R>(&self, f: impl FnOnce(&PriceLevelBook) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Owned copy of the whole book
    pub fn clone_book(&self) -> PriceLevelBook {
        self.inner.read().clone()
    }

    /// Snapshot of the best `depth` levels per side
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        self.inner.read().snapshot(depth)
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl BookQuery for SharedBook {
    fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        self.inner.read().top_n(side, n)
    }

    fn best_of(&self, side: Side) -> Option<PriceLevel> {
        self.inner.read().best_of(side)
    }

    fn level_count(&self, side: Side) -> usize {
        self.inner.read().level_count(side)
    }

    fn spread(&self) -> Option<u64> {
        self.inner.read().spread()
    }

    fn mid_price(&self) -> Option<Decimal> {
        self.inner.read().mid_price()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
