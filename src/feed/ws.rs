//! WebSocket transport with automatic reconnection.
//!
//! [`WsConnection`] owns the connect / read / back off cycle and hands every
//! frame to a [`WsHandler`]. The handler decides what a frame means; the
//! connection only knows about sockets and retry policy.

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use crate::error::FeedError;

/// Sink half of a client connection.
pub type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Stream half of a client connection.
pub type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Lifecycle events reported to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake completed
    Connected,
    /// Connection lost or could not be opened
    Disconnected {
        /// What went wrong
        reason: String,
    },
    /// About to retry (1-based)
    Reconnecting {
        /// Consecutive attempt number
        attempt: u32,
    },
    /// Retry budget spent; the connection will not be retried
    Failed {
        /// Why the connection gave up
        reason: String,
    },
}

/// Exponential backoff policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectConfig {
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound on the delay (before jitter).
    pub max_backoff: Duration,
    /// Consecutive failed attempts allowed (0 = unlimited).
    pub max_retries: u32,
    /// Warn once this many consecutive attempts have failed.
    pub alert_after: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            max_retries: 0,
            alert_after: 5,
        }
    }
}

impl ReconnectConfig {
    /// Whether attempt number `attempt` exceeds the retry budget.
    pub fn exhausted(&self, attempt: u32) -> bool {
        self.max_retries > 0 && attempt > self.max_retries
    }
}

/// Callbacks driven by [`WsConnection::run`].
#[async_trait::async_trait]
pub trait WsHandler: Send + 'static {
    /// Called after every successful handshake, before any frame is read.
    /// An error here drops the connection and counts as a failed attempt.
    async fn on_connect(&mut self, sink: &mut WsSink) -> Result<(), FeedError>;

    /// Called for each frame. Errors are logged and the read loop carries on.
    async fn on_message(&mut self, msg: Message) -> Result<(), FeedError>;

    /// Called on every lifecycle transition.
    fn on_state_change(&mut self, state: ConnectionState);
}

/// A WebSocket URL plus its reconnect policy.
pub struct WsConnection {
    url: String,
    config: ReconnectConfig,
}

impl WsConnection {
    /// Create a connection; nothing is opened until [`run`](Self::run).
    pub fn new(url: impl Into<String>, config: ReconnectConfig) -> Self {
        Self {
            url: url.into(),
            config,
        }
    }

    /// Endpoint this connection dials
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Drive the connection until the retry budget is spent.
    ///
    /// A connection that delivered frames and then dropped restarts the
    /// attempt counter at 1. With `max_retries = 0` this never returns; the
    /// caller stops it by dropping the future.
    pub async fn run<H: WsHandler>(&self, handler: &mut H) -> Result<(), FeedError> {
        let mut attempt: u32 = 0;

        loop {
            if attempt > 0 {
                if self.config.exhausted(attempt) {
                    let reason = format!(
                        "exceeded max retries ({}) for {}",
                        self.config.max_retries, self.url
                    );
                    error!(url = %self.url, attempts = attempt - 1, "giving up on depth stream");
                    handler.on_state_change(ConnectionState::Failed { reason });
                    return Err(FeedError::RetriesExhausted {
                        attempts: attempt - 1,
                    });
                }

                handler.on_state_change(ConnectionState::Reconnecting { attempt });

                let backoff = calculate_backoff(
                    self.config.initial_backoff,
                    self.config.max_backoff,
                    attempt - 1,
                );
                info!(
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    url = %self.url,
                    "reconnecting"
                );
                if attempt >= self.config.alert_after {
                    warn!(attempt, url = %self.url, "reconnect attempts past alert threshold");
                }

                tokio::time::sleep(backoff).await;
            }

            let ws_stream = match tokio_tungstenite::connect_async(self.url.as_str()).await {
                Ok((stream, _response)) => stream,
                Err(e) => {
                    error!(url = %self.url, error = %e, "connect failed");
                    handler.on_state_change(ConnectionState::Disconnected {
                        reason: FeedError::Connection(e.to_string()).to_string(),
                    });
                    attempt = attempt.saturating_add(1);
                    continue;
                }
            };

            let (mut sink, mut stream) = ws_stream.split();
            info!(url = %self.url, "connected");
            handler.on_state_change(ConnectionState::Connected);

            if let Err(e) = handler.on_connect(&mut sink).await {
                error!(url = %self.url, error = %e, "on_connect failed");
                handler.on_state_change(ConnectionState::Disconnected {
                    reason: format!("on_connect failed: {e}"),
                });
                attempt = attempt.saturating_add(1);
                continue;
            }

            let reason = read_until_closed(&mut stream, handler).await;
            warn!(url = %self.url, %reason, "disconnected");
            handler.on_state_change(ConnectionState::Disconnected { reason });
            attempt = 1;
        }
    }
}

/// Feed frames to `handler` until the stream ends or errors.
/// Returns the disconnect reason.
async fn read_until_closed<H: WsHandler>(stream: &mut WsStream, handler: &mut H) -> String {
    loop {
        match stream.next().await {
            Some(Ok(Message::Close(frame))) => {
                debug!(?frame, "close frame received");
                return match frame {
                    Some(f) => format!("closed by server: {} {}", f.code, f.reason),
                    None => "closed by server".to_string(),
                };
            }
            Some(Ok(msg)) => {
                if let Err(e) = handler.on_message(msg).await {
                    warn!(error = %e, "frame handler error");
                }
            }
            Some(Err(e)) => return FeedError::Connection(e.to_string()).to_string(),
            None => return "stream ended".to_string(),
        }
    }
}

/// Backoff for zero-based retry `attempt`.
///
/// `initial * 2^attempt`, capped at `max`, plus up to 50% random jitter.
pub fn calculate_backoff(initial: Duration, max: Duration, attempt: u32) -> Duration {
    let base = initial.saturating_mul(2u32.saturating_pow(attempt)).min(max);
    let jitter = base.mul_f64(rand::random::<f64>() * 0.5);
    base + jitter
}
