use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::args::LogLevel;

pub const LOG_FILE: &str = "taxipot.log";

/// Filter for our own crates at `level`; `RUST_LOG` takes precedence.
fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,taxipot={level},taxipot_api={level},taxipot_engine={level}"
        ))
    })
}

/// One-shot commands: log to stderr so stdout stays clean for `--format json`.
pub fn init_stderr(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Interactive mode owns the terminal, so logs go to `<data_dir>/taxipot.log`.
pub fn init_file(level: LogLevel, data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
