//! TUI command - launches the interactive course picker

use anyhow::{Context, Result};
use std::sync::Arc;

use super::{load_config, TuiArgs};
use crate::catalog::create_source;
use crate::http::build_client;
use crate::recommend::HttpRecommendationService;
use crate::session::SessionController;
use crate::tui::{run_tui, TuiConfig};

pub async fn execute(args: TuiArgs) -> Result<()> {
    let config = load_config(&args.connection)?;
    let http = build_client(&config.server).context("Failed to build HTTP client")?;

    let tui_config = TuiConfig {
        session: SessionController::new(&config),
        source: create_source(&config, &http, args.catalog),
        service: Arc::new(HttpRecommendationService {
            http,
            url: config.server.recommend_url(),
        }),
        taken: args.taken,
    };

    // The event loop blocks on terminal input; network work runs on the runtime
    let handle = tokio::runtime::Handle::current();
    tokio::task::block_in_place(|| run_tui(tui_config, handle))
}
