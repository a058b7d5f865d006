//! # depth-book
//!
//! Price-level order book maintained from an incremental depth feed.
//!
//! ## Architecture
//!
//! - **Types**: fixed-point prices, `Side`, `DepthUpdate`
//! - **OrderBook**: `PriceLevelBook` (two sorted sides plus the update
//!   algorithm), `SharedBook` for one writer and many readers, and the
//!   `BookQuery` boundary
//! - **Feed**: WebSocket transport, Binance depth decoding, ingestion
//! - **Presenter**: terminal depth ladder
//!
//! ## Design Principles
//!
//! 1. **Full replace by price**: an update carries the new absolute size at
//!    a price; size zero removes the level
//! 2. **No Floating Point**: prices and sizes are `u64` scaled by 10^8, so
//!    equal wire prices are equal keys
//! 3. **No zero-size levels**: a side never stores a level with size 0
//! 4. **Consistent reads**: readers see the book before or after an update,
//!    never in between
//!
//! ## Example
//!
//! ```
//! use depth_book::{DepthUpdate, PriceLevelBook, Side};
//!
//! let mut book = PriceLevelBook::new();
//! book.apply(&DepthUpdate::parse(&[("101.0", "2")], &[("99.5", "1")]).unwrap());
//! book.apply(&DepthUpdate::parse(&[("101.0", "0")], &[]).unwrap());
//!
//! assert!(book.best_of(Side::Ask).is_none());
//! assert_eq!(book.best_of(Side::Bid).unwrap().price, 9_950_000_000);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Side, DepthUpdate, fixed-point helpers
pub mod types;

/// Order book: sorted price levels, shared handle, query trait
pub mod orderbook;

/// Error kinds for decoding, feed and snapshot failures
pub mod error;

/// Layered configuration (defaults, TOML, environment)
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Depth feed: transport, decoding, ingestion
pub mod feed;

/// Terminal depth ladder
pub mod presenter;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{BookError, DecodeError, FeedError};
pub use orderbook::{ApplyStats, BookQuery, BookSnapshot, PriceLevel, PriceLevelBook, SharedBook};
pub use types::{DepthUpdate, LevelChange, Side};
