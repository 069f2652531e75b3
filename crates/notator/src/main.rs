mod app;
mod config;
mod document;
mod editor;
mod error;
mod events;
mod keymap;
mod overlay;
mod quotes;
mod state;
mod telemetry;
#[cfg(test)]
mod test_utils;
mod timer;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Terminal note editor", author, version)]
struct Cli {
    /// Directory holding the notes, the session file and quotes.txt.
    #[arg(long = "notes-dir", value_name = "DIR")]
    notes_dir: Option<PathBuf>,

    /// Extra config file, merged over the user and local ones.
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long = "no-logs", env = "NOTATOR_NO_LOGS", default_value_t = false)]
    no_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut config = config::load_config(&cwd, cli.config.as_deref());
    if let Some(notes_dir) = cli.notes_dir {
        config.storage.notes_dir = notes_dir;
    }
    telemetry::init_tracing(&config.log, cli.no_logs);
    app::run(config)
}
