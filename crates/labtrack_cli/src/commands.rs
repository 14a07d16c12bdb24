//! Subcommand implementations.

use anyhow::Context;
use labtrack_core::{active_log_dir, seed_demo_data, SeedSummary};
use labtrack_web::{App, HttpServer};
use log::info;
use rusqlite::Connection;
use std::fmt::Write;

/// Seeds optionally, then serves until the process is stopped.
pub fn serve(conn: &mut Connection, bind: &str, seed: bool) -> anyhow::Result<()> {
    if seed {
        let summary = seed_demo_data(conn).context("failed to seed demo data")?;
        print!("{}", seed_report(&summary));
    }

    let server = HttpServer::bind(bind)?;
    let listening = server
        .local_addr()
        .map_or_else(|| bind.to_string(), |addr| addr.to_string());
    println!("labtrack listening on http://{listening}");
    if let Some(dir) = active_log_dir() {
        println!("logs: {}", dir.display());
    }
    info!("event=serve module=cli status=start addr={listening}");

    let app = App::new(conn);
    server.serve(&app);
    Ok(())
}

/// Inserts the demo dataset and prints where to find each scientist.
pub fn seed(conn: &mut Connection) -> anyhow::Result<()> {
    let summary = seed_demo_data(conn).context("failed to seed demo data")?;
    print!("{}", seed_report(&summary));
    Ok(())
}

fn seed_report(summary: &SeedSummary) -> String {
    let mut out = format!(
        "seeded {} labs, {} scientists, {} experiments, {} links\n",
        summary.labs.len(),
        summary.scientists.len(),
        summary.experiments.len(),
        summary.links.len()
    );
    for scientist in &summary.scientists {
        let _ = writeln!(
            out,
            "  {:<24} /scientists/{}",
            scientist.name, scientist.id
        );
    }
    out
}
