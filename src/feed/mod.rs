//! Depth feed: WebSocket transport, Binance decoding and book ingestion.
//!
//! ```text
//! WsConnection ──frames──▶ DepthIngestor ──decode_depth──▶ SharedBook::apply
//! ```

pub mod binance;
pub mod ingest;
pub mod ws;

pub use binance::{decode_depth, DepthEvent};
pub use ingest::{DepthIngestor, IngestCounters, IngestStats};
pub use ws::{ConnectionState, ReconnectConfig, WsConnection, WsHandler};
