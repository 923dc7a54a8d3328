pub mod recommend;
pub mod schema;
pub mod tui;
pub mod view;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, Density};
use crate::error::SelectionError;

const DEFAULT_CONFIG: &str = "studyplan.yaml";

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(
    author,
    version,
    about = "Pick completed courses, check prerequisites, and request a schedule recommendation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr (required to see logs from the TUI)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive course picker
    Tui(TuiArgs),

    /// Print the grouped course view
    View(ViewArgs),

    /// Request a schedule recommendation
    Recommend(RecommendArgs),

    /// Print JSON Schema for config validation
    Schema,
}

/// Options shared by every command that talks to the planner server
#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// Path to config file [default: studyplan.yaml when present]
    #[arg(short, long, env = "STUDYPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the server base URL
    #[arg(long, env = "STUDYPLAN_SERVER")]
    pub server: Option<String>,
}

#[derive(Parser, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Read the plan from a JSON file instead of the server
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Start with these courses selected (comma-separated codes)
    #[arg(long, value_delimiter = ',')]
    pub taken: Vec<String>,
}

#[derive(Parser, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Read the plan from a JSON file instead of the server
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Courses already completed (comma-separated codes)
    #[arg(long, value_delimiter = ',')]
    pub taken: Vec<String>,

    /// Only show courses whose name or code contains this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// comfortable or compact
    #[arg(long)]
    pub density: Option<Density>,

    /// Ask the server to re-read its plan sheet
    #[arg(long)]
    pub reload: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Read the plan from a JSON file instead of the server
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Courses already completed (comma-separated codes)
    #[arg(long, value_delimiter = ',')]
    pub taken: Vec<String>,

    /// Hour cap for the generated schedule
    #[arg(long)]
    pub max_hours: Option<u32>,

    /// Ignore offered-section timing (names-only mode)
    #[arg(long)]
    pub no_offered: bool,

    /// Ask the server to refresh its offered-sections cache first
    #[arg(long)]
    pub refresh_offered: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Load, override and validate the config for a command
pub fn load_config(args: &ConnectionArgs) -> anyhow::Result<Config> {
    let (path, explicit) = match &args.config {
        Some(path) => (path.as_path(), true),
        None => (Path::new(DEFAULT_CONFIG), false),
    };

    let mut config = Config::load_or_default(path, explicit)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Non-empty `--taken` codes with surrounding whitespace removed
fn taken_codes(taken: &[String]) -> Vec<&str> {
    taken
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .collect()
}

/// Report `--taken` codes that stayed unselected
fn warn_rejected(rejected: &[SelectionError]) {
    for error in rejected {
        match error {
            SelectionError::Blocked { code, .. } => eprintln!("warning: {}: {}", code, error),
            SelectionError::UnknownCode(_) => eprintln!("warning: {}", error),
        }
    }
}
