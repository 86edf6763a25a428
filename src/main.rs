//! brew-fuzzy - fuzzy Homebrew package installer
//!
//! CLI entry point that dispatches to the refresh or pick flow.

use brew_fuzzy::cli::{Cli, Mode};
use brew_fuzzy::config::Config;
use brew_fuzzy::error::BrewFuzzyResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BrewFuzzyResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("brew_fuzzy=warn"),
        1 => EnvFilter::new("brew_fuzzy=info"),
        _ => EnvFilter::new("brew_fuzzy=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    brew_fuzzy::ui::init_theme();

    let config = Config::from_env(cli.cache_dir.clone(), cli.max_age_hours)?;

    match cli.mode() {
        Mode::Refresh => brew_fuzzy::cli::commands::refresh(&config).await,
        Mode::Pick(args) => brew_fuzzy::cli::commands::pick(args, &config).await,
    }
}
