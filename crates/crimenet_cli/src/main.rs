//! `crimenet` command-line front end.
//!
//! # Responsibility
//! - Wire configuration, logging and storage into one `EntityStore`.
//! - Render store results as plain text; rejections exit non-zero.

mod cli;
mod commands;
mod prompt;

use clap::Parser;
use cli::Cli;
use crimenet_core::{init_logging, CoreConfig};

fn main() {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.to_string());

    // Logging is best effort; the desk stays usable without it.
    if let Some(log_dir) = absolute(config.log_dir()) {
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    if let Err(err) = commands::execute(cli, &config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn absolute(path: std::path::PathBuf) -> Option<std::path::PathBuf> {
    if path.is_absolute() {
        return Some(path);
    }
    std::env::current_dir().ok().map(|cwd| cwd.join(path))
}
