//! `studyflow` entry point.

use anyhow::Context;
use clap::Parser;
use log::info;
use studyflow_core::db::open_db;
use studyflow_core::{core_version, init_logging, SqliteKeyValueStore};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() {
    if let Err(error) = run() {
        eprintln!("studyflow error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;

    // Logging is diagnostic only; the command still runs without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={} enrich={}",
        core_version(),
        config.enrich
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let kv = SqliteKeyValueStore::new(&conn);

    match cli.command {
        Commands::Board { action } => commands::board::handle(action, &kv),
        Commands::Plan { action } => commands::plan::handle(action, &kv, &config),
        Commands::Stats => commands::stats::handle(&kv),
        Commands::Timer { id } => commands::timer::handle(id, &kv, &config),
    }
}
