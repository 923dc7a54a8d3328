use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

mod catalog;
mod cli;
mod config;
mod error;
mod http;
mod output;
mod recommend;
mod retry;
mod selection;
mod session;
mod text;
mod tui;
mod view;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Commands::Tui(_));
    init_tracing(cli.verbose, cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Commands::Tui(args) => cli::tui::execute(args).await,
        Commands::View(args) => cli::view::execute(args).await,
        Commands::Recommend(args) => {
            let code = cli::recommend::execute(args).await?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Schema => cli::schema::execute(),
    }
}

// Logs go to stderr so stdout stays clean for --json; the TUI owns the
// terminal, so it only logs when a file is given
fn init_tracing(verbose: bool, log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("studyplan=debug")
    } else {
        EnvFilter::new("studyplan=warn")
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
