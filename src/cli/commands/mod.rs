//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: HTTP service
//! - `list`: Query the catalog from the terminal
//! - `migrate`: Create or upgrade the database schema

mod list;
mod migrate;
mod serve;

use chrono::NaiveDate;
use clap::{Args, FromArgMatches, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::{self, Config, ConfigOverrides};
use crate::model::SongFilter;
use crate::pagination::{Page, SONG_LIST_DEFAULTS};

pub use list::cmd_list;
pub use migrate::cmd_migrate;
pub use serve::cmd_serve;

/// Song catalog service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeArgs),
    /// List songs in the catalog
    List {
        #[command(flatten)]
        db: DatabaseArgs,
        /// Filter by artist name (substring, case-insensitive)
        #[arg(long)]
        group: Option<String>,
        /// Filter by song title (substring, case-insensitive)
        #[arg(long)]
        song: Option<String>,
        /// Exact release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: Option<NaiveDate>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Songs per page (max 100)
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Apply database migrations and exit
    Migrate {
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Print the effective configuration as TOML
    ShowConfig(ServeArgs),
}

/// Settings that override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Base URL of the music info API
    #[arg(long, env = "MUSIC_API_URL")]
    pub music_api_url: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// SQLite connection URL, e.g. sqlite:songs.db
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// Flags for a bare invocation: only the environment is consulted.
    fn from_env() -> anyhow::Result<Self> {
        let matches = Self::augment_args(clap::Command::new("serve")).try_get_matches_from(["serve"])?;
        Ok(Self::from_arg_matches(&matches)?)
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            database_url: self.db.database_url.clone(),
            music_api_url: self.music_api_url.clone(),
        }
    }
}

impl DatabaseArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_url: self.database_url.clone(),
            ..Default::default()
        }
    }
}

/// Load the config file and apply overrides.
fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Config {
    config::load(path).with_overrides(overrides)
}

/// Run the specified CLI command. No subcommand means `serve`.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config_path = cli.config.as_deref();

    match &cli.command {
        None => cmd_serve(&rt, resolve_config(config_path, &ServeArgs::from_env()?.overrides())),
        Some(Commands::Serve(args)) => cmd_serve(&rt, resolve_config(config_path, &args.overrides())),
        Some(Commands::List {
            db,
            group,
            song,
            release_date,
            page,
            page_size,
        }) => {
            let filter = SongFilter {
                group: group.clone(),
                song: song.clone(),
                release_date: *release_date,
                ..Default::default()
            };
            cmd_list(
                &rt,
                &resolve_config(config_path, &db.overrides()),
                &filter,
                Page::new(*page, *page_size, SONG_LIST_DEFAULTS),
            )
        }
        Some(Commands::Migrate { db }) => {
            cmd_migrate(&rt, &resolve_config(config_path, &db.overrides()))
        }
        Some(Commands::ShowConfig(args)) => {
            let config = resolve_config(config_path, &args.overrides());
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
