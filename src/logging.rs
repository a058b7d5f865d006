//! Logging and tracing initialization.
//!
//! Provides [`init_tracing`] with two modes:
//! - **JSON mode** (`json = true`): one JSON object per line, for log
//!   aggregation.
//! - **Compact mode** (`json = false`): short human-readable lines.
//!
//! Both respect `RUST_LOG` (e.g. `RUST_LOG=depth_book=debug`) and fall back
//! to `info`. Output goes to stderr so it never interleaves with the ladder
//! drawn on stdout; redirect it (`2>depth-book.log`) while the viewer runs.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Build the level filter from `RUST_LOG`, or `fallback` if unset.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the global tracing subscriber.
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(json: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(DEFAULT_FILTER));

    if json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);

        registry
            .with(json_layer)
            .try_init()
            .context("tracing subscriber already installed")?;
    } else {
        let compact_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stderr);

        registry
            .with(compact_layer)
            .try_init()
            .context("tracing subscriber already installed")?;
    }

    Ok(())
}
