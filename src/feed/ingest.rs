//! Depth ingestion: frames in, book updates out.
//!
//! [`DepthIngestor`] is the single writer of a [`SharedBook`]. It decodes
//! each text frame, checks update-id continuity and applies the update.
//! Nothing that goes wrong with one message stops the feed: bad frames are
//! counted and skipped, sequence gaps are counted and the update is applied
//! anyway.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, trace, warn};

use crate::error::FeedError;
use crate::feed::binance::{decode_depth, DepthEvent};
use crate::feed::ws::{ConnectionState, WsHandler, WsSink};
use crate::orderbook::{ApplyStats, SharedBook};
use crate::types::Side;

/// Live feed counters, shared between the ingest task and readers.
#[derive(Debug, Default)]
pub struct IngestStats {
    messages: AtomicU64,
    applied: AtomicU64,
    decode_errors: AtomicU64,
    sequence_gaps: AtomicU64,
    reconnects: AtomicU64,
    connected: AtomicBool,
}

/// Point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestCounters {
    /// Text frames received
    pub messages: u64,
    /// Updates applied to the book
    pub applied: u64,
    /// Frames that failed to decode
    pub decode_errors: u64,
    /// Update-id discontinuities seen
    pub sequence_gaps: u64,
    /// Reconnect attempts made
    pub reconnects: u64,
    /// Whether the socket is currently up
    pub connected: bool,
}

impl IngestStats {
    /// Read all counters
    pub fn counters(&self) -> IngestCounters {
        IngestCounters {
            messages: self.messages.load(Ordering::Relaxed),
            applied: self.applied.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            sequence_gaps: self.sequence_gaps.load(Ordering::Relaxed),
            reconnects: self.reconnects.load(Ordering::Relaxed),
            connected: self.connected.load(Ordering::Relaxed),
        }
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Feed handler that keeps a [`SharedBook`] current.
pub struct DepthIngestor {
    book: SharedBook,
    stats: Arc<IngestStats>,
    /// `u` of the last applied event on the current connection
    last_final_id: Option<u64>,
}

impl DepthIngestor {
    /// Create an ingestor writing into `book`
    pub fn new(book: SharedBook) -> Self {
        Self {
            book,
            stats: Arc::new(IngestStats::default()),
            last_final_id: None,
        }
    }

    /// Handle to the live counters
    pub fn stats(&self) -> Arc<IngestStats> {
        Arc::clone(&self.stats)
    }

    /// The book this ingestor writes to
    pub fn book(&self) -> &SharedBook {
        &self.book
    }

    /// Decode and apply one text frame.
    pub fn handle_text(&mut self, text: &str) -> Result<ApplyStats, FeedError> {
        IngestStats::bump(&self.stats.messages);

        let event = match decode_depth(text) {
            Ok(event) => event,
            Err(e) => {
                IngestStats::bump(&self.stats.decode_errors);
                warn!(error = %e, "dropping undecodable depth message");
                return Err(e.into());
            }
        };

        self.check_sequence(&event);

        let applied = self.book.apply(&event.update);
        IngestStats::bump(&self.stats.applied);
        trace!(
            final_update_id = ?event.final_update_id,
            changes = applied.total(),
            "depth update applied"
        );

        Ok(applied)
    }

    /// Forget the last seen update id. The book itself is kept.
    pub fn reset_sequence(&mut self) {
        self.last_final_id = None;
    }

    /// Count a gap when `pu` does not continue the previous `u`.
    fn check_sequence(&mut self, event: &DepthEvent) {
        if let (Some(prev), Some(pu)) = (self.last_final_id, event.prev_final_update_id) {
            if pu != prev {
                IngestStats::bump(&self.stats.sequence_gaps);
                warn!(
                    expected = prev,
                    got = pu,
                    "depth sequence gap, book may be stale"
                );
            }
        }
        if event.final_update_id.is_some() {
            self.last_final_id = event.final_update_id;
        }
    }
}

#[async_trait::async_trait]
impl WsHandler for DepthIngestor {
    async fn on_connect(&mut self, _sink: &mut WsSink) -> Result<(), FeedError> {
        // The stream URL carries the subscription.
        self.reset_sequence();
        Ok(())
    }

    async fn on_message(&mut self, msg: Message) -> Result<(), FeedError> {
        match msg {
            Message::Text(text) => self.handle_text(&text).map(|_| ()),
            Message::Binary(bytes) => {
                debug!(len = bytes.len(), "ignoring binary frame");
                Ok(())
            }
            // ping replies are queued by tungstenite itself
            _ => Ok(()),
        }
    }

    fn on_state_change(&mut self, state: ConnectionState) {
        match &state {
            ConnectionState::Connected => {
                self.stats.connected.store(true, Ordering::Relaxed);
                let levels = self
                    .book
                    .read(|b| b.level_count(Side::Bid) + b.level_count(Side::Ask));
                info!(levels, "depth feed live");
            }
            ConnectionState::Reconnecting { attempt } => {
                IngestStats::bump(&self.stats.reconnects);
                debug!(attempt, "depth feed reconnecting");
            }
            ConnectionState::Disconnected { .. } | ConnectionState::Failed { .. } => {
                self.stats.connected.store(false, Ordering::Relaxed);
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
