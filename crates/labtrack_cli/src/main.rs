//! `labtrack` command-line entry point.
//!
//! # Responsibility
//! - Load configuration and initialize logging before touching storage.
//! - Open (and migrate) the database, then dispatch the subcommand.

use anyhow::Context;
use clap::Parser;
use labtrack_core::db::open_db;
use labtrack_core::{core_version, init_logging, Console};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() {
    if let Err(error) = run() {
        eprintln!("labtrack error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        println!("labtrack {}", core_version());
        return Ok(());
    }

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let log_dir = config.resolved_log_dir()?;
    let console = match cli.command {
        Commands::Serve(_) => Console::Echo,
        _ => Console::Quiet,
    };
    init_logging(&config.logging.level, &log_dir, console)
        .context("failed to initialize logging")?;

    let mut conn = open_db(&config.database.path).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database.path.display()
        )
    })?;

    match &cli.command {
        Commands::Serve(args) => commands::serve(&mut conn, &config.server.bind, args.seed),
        Commands::Seed => commands::seed(&mut conn),
        Commands::Version => Ok(()),
    }
}
