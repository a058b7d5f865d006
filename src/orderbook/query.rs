//! Read-only query boundary between the book and its consumers.

use rust_decimal::Decimal;

use crate::orderbook::{PriceLevel, PriceLevelBook};
use crate::types::Side;

/// Pull-based view of a book.
///
/// Implemented by [`PriceLevelBook`] and by
/// [`SharedBook`](crate::orderbook::SharedBook), so a presenter or strategy
/// can read either without caring who owns the storage. Every method returns
/// owned values.
pub trait BookQuery {
    /// Up to `n` levels of `side`, best first
    fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel>;

    /// Best level of `side`
    fn best_of(&self, side: Side) -> Option<PriceLevel> {
        self.top_n(side, 1).into_iter().next()
    }

    /// Number of resting levels on `side`
    fn level_count(&self, side: Side) -> usize;

    /// Best ask minus best bid, `None` if a side is empty or crossed
    fn spread(&self) -> Option<u64> {
        let bid = self.best_of(Side::Bid)?;
        let ask = self.best_of(Side::Ask)?;
        ask.price.checked_sub(bid.price)
    }

    /// Average of best bid and best ask
    fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_of(Side::Bid)?;
        let ask = self.best_of(Side::Ask)?;
        Some((bid.price_decimal() + ask.price_decimal()) / Decimal::TWO)
    }
}

impl BookQuery for PriceLevelBook {
    fn top_n(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        PriceLevelBook::top_n(self, side, n)
    }

    fn best_of(&self, side: Side) -> Option<PriceLevel> {
        PriceLevelBook::best_of(self, side)
    }

    fn level_count(&self, side: Side) -> usize {
        PriceLevelBook::level_count(self, side)
    }

    fn spread(&self) -> Option<u64> {
        PriceLevelBook::spread(self)
    }

    fn mid_price(&self) -> Option<Decimal> {
        PriceLevelBook::mid_price(self)
    }
}
