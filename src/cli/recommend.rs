//! Recommend command - a single generate round trip

use anyhow::{bail, Context, Result};
use tracing::info;

use super::{load_config, taken_codes, warn_rejected, RecommendArgs};
use crate::catalog::create_source;
use crate::http::build_client;
use crate::output::render_outcome;
use crate::recommend::HttpRecommendationService;
use crate::session::SessionController;

/// Returns the process exit code: 0 when a schedule came back, 1 otherwise
pub async fn execute(args: RecommendArgs) -> Result<i32> {
    let mut config = load_config(&args.connection)?;
    if let Some(max_hours) = args.max_hours {
        config.generate.max_hours = max_hours;
    }
    if args.no_offered {
        config.generate.use_offered = false;
    }

    let http = build_client(&config.server).context("Failed to build HTTP client")?;
    let source = create_source(&config, &http, args.catalog.clone());
    let service = HttpRecommendationService {
        http,
        url: config.server.recommend_url(),
    };

    // Taken codes go through the same prerequisite gate as interactive toggles
    let mut session = SessionController::new(&config);
    if !session.load_catalog(source.as_ref(), false).await {
        bail!("Failed to load plan from {}", source.describe());
    }
    warn_rejected(&session.preselect(&taken_codes(&args.taken)));
    if session.selection().is_empty() {
        info!("No completed courses selected");
    }

    let Some(outcome) = session.generate(&service, args.refresh_offered).await else {
        bail!("Recommendation response was discarded");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print!("{}", render_outcome(outcome));
    }

    Ok(if outcome.is_success() { 0 } else { 1 })
}
