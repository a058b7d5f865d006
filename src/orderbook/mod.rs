//! Order book module: the price-level engine.
//!
//! ## Architecture
//!
//! - **BookSide**: `BTreeMap` keyed by price, ordered best-first per side
//! - **PriceLevelBook**: ask side + bid side and the update algorithm
//! - **SharedBook**: single-writer / many-reader handle for the feed and
//!   render loop
//!
//! ## Performance
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | Apply one entry    | O(log n)   |
//! | Best bid/ask       | O(log n)   |
//! | Top N              | O(log n + N) |
//!
//! ## Example
//!
//! ```
//! use depth_book::orderbook::PriceLevelBook;
//! use depth_book::types::{DepthUpdate, Side};
//!
//! let mut book = PriceLevelBook::new();
//! let update = DepthUpdate::parse(
//!     &[("101.00", "1"), ("100.50", "2"), ("100.00", "3")],
//!     &[],
//! ).unwrap();
//! book.apply(&update);
//!
//! let top = book.top_n(Side::Ask, 2);
//! assert_eq!(top[0].price, 10_000_000_000);
//! assert_eq!(top[1].price, 10_050_000_000);
//! ```

pub mod book;
pub mod book_side;
pub mod level;
pub mod query;
pub mod shared;
pub mod snapshot;

pub use book::{ApplyStats, PriceLevelBook};
pub use book_side::{AskSide, BidSide, BookSide, LevelChangeKind, LevelKey};
pub use level::PriceLevel;
pub use query::BookQuery;
pub use shared::SharedBook;
pub use snapshot::{BookSnapshot, SnapshotHeader};
