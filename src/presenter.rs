//! Terminal depth ladder.
//!
//! Layout, top to bottom:
//!
//! ```text
//!  BTCUSDT  spread 0.10  mid 43250.05  msgs 1042  errs 0  gaps 0  live
//!        PRICE          SIZE
//!     43250.10        1.2000    <- asks, best first
//!     43250.20        0.5000
//!   ----------------------------
//!     43250.00        3.0000    <- bids, best first
//!     43249.90        0.2500
//! ```
//!
//! The ladder reads through [`BookQuery`] only. Callers holding a
//! [`SharedBook`](crate::orderbook::SharedBook) should render inside
//! `SharedBook::read` so both blocks come from the same book state.

use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::feed::IngestCounters;
use crate::orderbook::{BookQuery, PriceLevel};
use crate::types::price::{format_decimal, format_fixed};
use crate::types::Side;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Clear screen and move the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Width of the price and size columns.
const COLUMN_WIDTH: usize = 14;

/// One formatted ladder line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderRow {
    /// Side the level rests on
    pub side: Side,
    /// Price with the configured decimals
    pub price: String,
    /// Size with the configured decimals
    pub size: String,
}

/// Feed-side facts shown in the status line.
#[derive(Debug, Clone, Copy)]
pub struct FeedStatus<'a> {
    /// Instrument label
    pub symbol: &'a str,
    /// Ingest counters at render time
    pub counters: IngestCounters,
}

/// Renders a [`BookQuery`] as a price ladder.
#[derive(Debug, Clone)]
pub struct Ladder {
    depth: usize,
    price_decimals: u32,
    size_decimals: u32,
    color: bool,
}

impl Ladder {
    /// Ladder with depth, decimals and colour taken from the display settings.
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            depth: display.depth,
            price_decimals: display.price_decimals,
            size_decimals: display.size_decimals,
            color: display.color,
        }
    }

    /// Ask rows then bid rows, each block best first.
    pub fn rows<Q: BookQuery + ?Sized>(&self, book: &Q) -> Vec<LadderRow> {
        let mut rows = Vec::with_capacity(self.depth * 2);
        for side in [Side::Ask, Side::Bid] {
            rows.extend(
                book.top_n(side, self.depth)
                    .iter()
                    .map(|level| self.row(side, level)),
            );
        }
        rows
    }

    fn row(&self, side: Side, level: &PriceLevel) -> LadderRow {
        LadderRow {
            side,
            price: format_fixed(level.price, self.price_decimals),
            size: format_fixed(level.size, self.size_decimals),
        }
    }

    /// Status line: symbol, spread, mid and feed counters.
    pub fn status_line<Q: BookQuery + ?Sized>(&self, book: &Q, status: &FeedStatus<'_>) -> String {
        let spread = book
            .spread()
            .map(|s| format_fixed(s, self.price_decimals))
            .unwrap_or_else(|| "-".to_string());
        // mid can carry one more digit than either quote
        let mid = book
            .mid_price()
            .map(|m| format_decimal(m, self.price_decimals + 1))
            .unwrap_or_else(|| "-".to_string());
        let c = &status.counters;

        format!(
            "{}  spread {}  mid {}  msgs {}  errs {}  gaps {}  {}",
            status.symbol,
            spread,
            mid,
            c.messages,
            c.decode_errors,
            c.sequence_gaps,
            if c.connected { "live" } else { "offline" },
        )
    }

    /// Full frame as a string, one line per row, newline terminated.
    pub fn render<Q: BookQuery + ?Sized>(&self, book: &Q, status: &FeedStatus<'_>) -> String {
        let mut out = String::new();
        let w = COLUMN_WIDTH;

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", self.status_line(book, status));
        let _ = writeln!(out, "{}", self.paint(DIM, &format!("{:>w$}{:>w$}", "PRICE", "SIZE")));

        let rows = self.rows(book);
        let split = rows.iter().position(|r| r.side == Side::Bid).unwrap_or(rows.len());
        let (asks, bids) = rows.split_at(split);

        for row in asks {
            let _ = writeln!(out, "{}", self.format_row(row));
        }
        let _ = writeln!(out, "{}", self.paint(DIM, &"-".repeat(w * 2)));
        for row in bids {
            let _ = writeln!(out, "{}", self.format_row(row));
        }
        out
    }

    fn format_row(&self, row: &LadderRow) -> String {
        let w = COLUMN_WIDTH;
        let price_color = match row.side {
            Side::Ask => RED,
            Side::Bid => GREEN,
        };
        format!(
            "{}{}",
            self.paint(price_color, &format!("{:>w$}", row.price)),
            self.paint(CYAN, &format!("{:>w$}", row.size)),
        )
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
