//! Command-line interface for song-catalog.
//!
//! `serve` runs the HTTP service and is the default when no subcommand is
//! given. The other commands work against the database directly.

mod commands;

pub use commands::{Cli, Commands, LogFormat, run_command};
