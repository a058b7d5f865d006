//! Point-in-time copy of the book with a deterministic state root.
//!
//! ## Encoding
//!
//! ```text
//! SnapshotHeader { bid_count: u64, ask_count: u64 }   16 bytes
//! PriceLevel * bid_count (best bid first)             16 bytes each
//! PriceLevel * ask_count (best ask first)             16 bytes each
//! ```
//!
//! Every part is SSZ-encoded (little-endian u64s), so two books holding the
//! same levels always produce identical bytes and the same SHA-256 root.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::error::BookError;
use crate::orderbook::PriceLevel;

/// Fixed-size header preceding the level list.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct SnapshotHeader {
    /// Number of bid levels that follow
    pub bid_count: u64,

    /// Number of ask levels that follow the bids
    pub ask_count: u64,
}

/// Levels copied out of a [`PriceLevelBook`](crate::orderbook::PriceLevelBook).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSnapshot {
    /// Bids, highest price first
    pub bids: Vec<PriceLevel>,

    /// Asks, lowest price first
    pub asks: Vec<PriceLevel>,
}

impl BookSnapshot {
    /// Create a snapshot from best-first level lists
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Header describing this snapshot's layout
    pub fn header(&self) -> SnapshotHeader {
        SnapshotHeader {
            bid_count: self.bids.len() as u64,
            ask_count: self.asks.len() as u64,
        }
    }

    /// SSZ-encode the snapshot
    pub fn encode(&self) -> Result<Vec<u8>, BookError> {
        let mut out = Vec::with_capacity(16 * (1 + self.bids.len() + self.asks.len()));
        out.extend(encode_part(&self.header())?);

        for level in self.bids.iter().chain(self.asks.iter()) {
            out.extend(encode_part(level)?);
        }

        Ok(out)
    }

    /// SHA-256 over the encoded snapshot
    pub fn state_root(&self) -> Result<[u8; 32], BookError> {
        let bytes = self.encode()?;
        let digest = Sha256::digest(&bytes);

        let mut root = [0u8; 32];
        root.copy_from_slice(&digest);
        Ok(root)
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> Result<String, BookError> {
        Ok(hex::encode(self.state_root()?))
    }
}

fn encode_part<T: SimpleSerialize>(value: &T) -> Result<Vec<u8>, BookError> {
    ssz_rs::serialize(value).map_err(|e| BookError::Encoding(format!("{e:?}")))
}

// ============================================================================
// Unit Tests
// ============================================================================
