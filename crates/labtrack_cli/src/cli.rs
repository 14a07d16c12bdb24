use crate::config::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI parser for the `labtrack` binary.
#[derive(Debug, Parser)]
#[command(name = "labtrack", version, about = "Track scientists, labs and experiments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./labtrack.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),
    /// Insert the demo dataset and print scientist page paths
    Seed,
    /// Print the version
    Version,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, host:port
    #[arg(long)]
    pub bind: Option<String>,

    /// Insert the demo dataset before serving
    #[arg(long)]
    pub seed: bool,
}

impl Cli {
    /// Applies flag overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Commands::Serve(ServeArgs {
            bind: Some(bind), ..
        }) = &self.command
        {
            config.server.bind = bind.clone();
        }
    }
}
