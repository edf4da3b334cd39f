//! Logger setup
//!
//! Subcommands log to stderr. The TUI owns the terminal, so in TUI mode the
//! log goes to `shelfwise.log` in the data directory instead.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use shelfwise_config::Config;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "shelfwise.log";

fn builder(config: &Config) -> Builder {
    Builder::from_env(Env::default().default_filter_or(config.app.log_level.as_str()))
}

pub fn init_stderr(config: &Config) {
    // Keep any logger installed earlier
    let _ = builder(config).target(Target::Stderr).try_init();
}

/// Appends log output to the log file under `data_dir`
pub fn init_file(config: &Config, data_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = builder(config)
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(path)
}
