//! Core data types for the depth book
//!
//! All numeric values use fixed-point representation (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Side`]: Bid or Ask
//! - [`DepthUpdate`]: New absolute sizes at a set of prices
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and sizes are stored as `u64` scaled by 10^8.
//! Example: 50000.12345678 is stored as 5_000_012_345_678u64

mod side;
mod update;
pub mod price;

pub use side::Side;
pub use update::{DepthUpdate, LevelChange};
