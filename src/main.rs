//! Geoquiz - proximity-triggered quiz engine
//!
//! Guides a user on foot toward geo-tagged points of interest and raises a
//! multiple-choice question when they get close. This binary is a thin
//! shell: it wires the JSONL position/heading feed on stdin to the engine
//! and the engine's render intents to a JSONL sink.
//!
//! Module structure:
//! - `domain/` - Core types, geo math, render intents, errors
//! - `io/` - External interfaces (catalog, feed, persistence, render)
//! - `services/` - Business logic (engine, store, scanner, judge, compass)
//! - `infra/` - Infrastructure (config)

use clap::Parser;
use geoquiz::infra::Config;
use geoquiz::io::{self, FilePersistence, JsonlRenderSink};
use geoquiz::services::{AnswerJudge, Engine};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Geoquiz - proximity-triggered quiz engine
#[derive(Parser, Debug)]
#[command(name = "geoquiz", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for full event visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(git_hash = env!("GIT_HASH"), "geoquiz starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        dataset = %config.dataset_id(),
        catalog_file = %config.catalog_file(),
        active_radius_m = %config.active_radius_m(),
        info_radius_m = %config.info_radius_m(),
        answer_cooldown_ms = %config.answer_cooldown_ms(),
        persistence_file = %config.persistence_file(),
        "config_loaded"
    );

    let records = io::catalog::load_catalog(config.catalog_file())?;

    let persistence = Box::new(FilePersistence::new(config.persistence_file()));
    let judge = AnswerJudge::new(config.dataset_id(), persistence);
    let mut engine = Engine::new(config.clone(), judge);
    engine.load_dataset(config.dataset_id(), records)?;

    let (event_tx, event_rx) = mpsc::channel(256);
    tokio::spawn(async move {
        io::feed::run_feed(BufReader::new(tokio::io::stdin()), event_tx).await;
    });

    let mut sink = JsonlRenderSink::new(config.render_output());

    // Runs until the feed closes
    engine.run(event_rx, &mut sink).await;

    info!(
        answered = %engine.session().answered_log.len(),
        correct = %engine.session().correct_count,
        "geoquiz shutdown complete"
    );
    Ok(())
}
