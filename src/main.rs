//! depth-book viewer
//!
//! Connects to a depth stream, keeps the book current and redraws a price
//! ladder on stdout until ctrl-c. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use depth_book::config::AppConfig;
use depth_book::feed::{DepthIngestor, IngestStats, WsConnection};
use depth_book::logging;
use depth_book::presenter::{FeedStatus, Ladder, CLEAR_SCREEN};
use depth_book::SharedBook;

/// Live order book depth viewer
#[derive(Parser, Debug)]
#[command(name = "depth-book", about = "Live order book depth ladder")]
struct Args {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Levels shown per side (overrides display.depth).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config)?;
    if let Some(depth) = args.depth {
        config.display.depth = depth;
        config.validate()?;
    }
    if args.json_logs {
        config.logging.json = true;
    }

    logging::init_tracing(config.logging.json)?;

    info!(
        url = %config.feed.ws_url,
        symbol = %config.feed.symbol,
        depth = config.display.depth,
        "starting depth-book"
    );

    let book = SharedBook::new();
    let mut ingestor = DepthIngestor::new(book.clone());
    let stats = ingestor.stats();
    let connection = WsConnection::new(
        config.feed.ws_url.clone(),
        config.feed.reconnect.to_reconnect_config(),
    );
    let mut feed = tokio::spawn(async move { connection.run(&mut ingestor).await });

    let ladder = Ladder::new(&config.display);
    let mut ticker = tokio::time::interval(config.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                draw(&book, &ladder, &config.feed.symbol, &stats)?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                info!("ctrl-c received, shutting down");
                feed.abort();
                return Ok(());
            }
            joined = &mut feed => {
                draw(&book, &ladder, &config.feed.symbol, &stats)?;
                return match joined {
                    Ok(Ok(())) => {
                        info!("depth feed finished");
                        Ok(())
                    }
                    Ok(Err(e)) => {
                        error!(error = %e, "depth feed stopped");
                        Err(e.into())
                    }
                    Err(e) => {
                        error!(error = %e, "depth feed task aborted");
                        Err(e.into())
                    }
                };
            }
        }
    }
}

/// Redraw one frame from a consistent view of the book.
fn draw(book: &SharedBook, ladder: &Ladder, symbol: &str, stats: &IngestStats) -> anyhow::Result<()> {
    let status = FeedStatus {
        symbol,
        counters: stats.counters(),
    };
    let frame = book.read(|b| ladder.render(b, &status));

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{CLEAR_SCREEN}{frame}").context("failed to write frame")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
