use crate::config::LogConfig;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::Level;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// The terminal belongs to the UI, so logs always go to a file.
pub fn log_path(config: &LogConfig) -> PathBuf {
    if let Some(path) = &config.path {
        return path.clone();
    }
    if let Ok(path) = env::var("NOTATOR_LOG") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::state_dir()
        .unwrap_or_else(env::temp_dir)
        .join("notator")
        .join("notator.log")
}

pub fn init_tracing(config: &LogConfig, disabled: bool) {
    if disabled {
        return;
    }

    let _ = TRACING_INIT.get_or_init(|| {
        let path = log_path(config);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let level = Level::from_str(config.level.trim()).unwrap_or(Level::INFO);
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(level)
            .with_target(false)
            .with_writer(file)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
