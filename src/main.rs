//! Song Catalog - an HTTP service for managing a song library.
//!
//! Songs are stored in SQLite together with their artist. Creating a song
//! looks up its release date, lyrics and link in an external music info
//! API. Lyrics can be read back verse by verse.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod library;
pub mod lyrics;
pub mod model;
pub mod pagination;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use cli::LogFormat;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default log directive when `RUST_LOG` is unset
const DEFAULT_LOG_DIRECTIVE: &str = "song_catalog=info";

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();
    init_tracing(args.log_format)?;

    cli::run_command(&args)
}

/// Install the global subscriber in the requested format.
fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_LOG_DIRECTIVE.parse()?)
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()?,
    }
    Ok(())
}
