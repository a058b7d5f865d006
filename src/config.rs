//! Layered configuration for the depth viewer.
//!
//! Configuration is loaded in layers with increasing priority:
//! 1. Compiled-in defaults (Binance USD-M BTCUSDT depth stream, 10 levels)
//! 2. TOML configuration file (if provided)
//! 3. Environment variable overrides (prefix `DEPTH_BOOK_`, nested with `__`,
//!    e.g. `DEPTH_BOOK_DISPLAY__DEPTH=20`)
//!
//! Any failure here is fatal: the binary exits before touching the feed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::feed::ws::ReconnectConfig;

/// Default combined-stream endpoint.
pub const DEFAULT_WS_URL: &str = "wss://fstream.binance.com/stream?streams=btcusdt@depth";

// ── Configuration structs ──────────────────────────────────────────────

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Depth stream settings.
    pub feed: FeedConfig,
    /// Ladder display settings.
    pub display: DisplayConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Depth stream settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// WebSocket URL of the depth stream.
    pub ws_url: String,
    /// Instrument label shown in the status line.
    pub symbol: String,
    /// Reconnect parameters.
    pub reconnect: ReconnectSettings,
}

/// WebSocket reconnect parameters with exponential backoff.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectSettings {
    /// Initial backoff delay in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Consecutive attempts before giving up (0 = unlimited).
    pub max_retries: u32,
    /// Log a warning once this many consecutive attempts have failed.
    pub alert_after: u32,
}

impl ReconnectSettings {
    /// Convert to the transport's reconnect policy.
    pub fn to_reconnect_config(&self) -> ReconnectConfig {
        ReconnectConfig {
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            max_retries: self.max_retries,
            alert_after: self.alert_after,
        }
    }
}

/// Ladder display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Levels shown per side.
    pub depth: usize,
    /// Redraw interval in milliseconds.
    pub refresh_ms: u64,
    /// Decimal places for prices.
    pub price_decimals: u32,
    /// Decimal places for sizes.
    pub size_decimals: u32,
    /// Emit ANSI colours.
    pub color: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// JSON lines instead of compact human-readable output.
    pub json: bool,
}

impl AppConfig {
    /// Load configuration using layered sources.
    ///
    /// 1. Compiled-in defaults.
    /// 2. TOML file at `config_path` (if `Some`).
    /// 3. Environment variable overrides with prefix `DEPTH_BOOK_` and `__`
    ///    as the nesting separator.
    ///
    /// The result is validated before it is returned.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder()
            // ── Layer 1: compiled-in defaults ───────────────────────
            .set_default("feed.ws_url", DEFAULT_WS_URL)?
            .set_default("feed.symbol", "BTCUSDT")?
            .set_default("feed.reconnect.initial_backoff_ms", 1000i64)?
            .set_default("feed.reconnect.max_backoff_ms", 30000i64)?
            .set_default("feed.reconnect.max_retries", 0i64)?
            .set_default("feed.reconnect.alert_after", 5i64)?
            .set_default("display.depth", 10i64)?
            .set_default("display.refresh_ms", 32i64)?
            .set_default("display.price_decimals", 2i64)?
            .set_default("display.size_decimals", 4i64)?
            .set_default("display.color", true)?
            .set_default("logging.json", false)?;

        // ── Layer 2: TOML file ─────────────────────────────────────
        if let Some(path) = config_path {
            let path_str = path
                .to_str()
                .context("config path is not valid UTF-8")?;
            builder = builder.add_source(File::with_name(path_str).required(true));
        }

        // ── Layer 3: env var overrides (DEPTH_BOOK_ prefix) ─────────
        // The prefix separator is pinned to `_`; otherwise the `config`
        // crate reuses the nesting separator and expects `DEPTH_BOOK__`.
        builder = builder.add_source(
            Environment::with_prefix("DEPTH_BOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: AppConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        cfg.validate()?;

        Ok(cfg)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.feed.ws_url.starts_with("ws://") || self.feed.ws_url.starts_with("wss://")) {
            bail!("feed.ws_url must be a ws:// or wss:// URL, got {:?}", self.feed.ws_url);
        }
        if self.display.depth == 0 {
            bail!("display.depth must be at least 1");
        }
        if self.display.refresh_ms == 0 {
            bail!("display.refresh_ms must be at least 1");
        }
        if self.display.price_decimals > 8 || self.display.size_decimals > 8 {
            bail!("display decimals cannot exceed 8 (the book's fixed-point precision)");
        }
        let reconnect = &self.feed.reconnect;
        if reconnect.initial_backoff_ms == 0 {
            bail!("feed.reconnect.initial_backoff_ms must be at least 1");
        }
        if reconnect.initial_backoff_ms > reconnect.max_backoff_ms {
            bail!(
                "feed.reconnect.initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                reconnect.initial_backoff_ms,
                reconnect.max_backoff_ms
            );
        }
        Ok(())
    }

    /// Redraw interval as a `Duration`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.display.refresh_ms)
    }
}
