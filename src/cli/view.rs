//! View command - prints the grouped course view once

use anyhow::{bail, Context, Result};

use super::{load_config, taken_codes, warn_rejected, ViewArgs};
use crate::catalog::create_source;
use crate::http::build_client;
use crate::output::render_view;
use crate::session::SessionController;

pub async fn execute(args: ViewArgs) -> Result<()> {
    let config = load_config(&args.connection)?;
    let http = build_client(&config.server).context("Failed to build HTTP client")?;
    let source = create_source(&config, &http, args.catalog.clone());

    let mut session = SessionController::new(&config);
    if !session.load_catalog(source.as_ref(), args.reload).await {
        bail!("Failed to load plan from {}", source.describe());
    }

    warn_rejected(&session.preselect(&taken_codes(&args.taken)));
    session.take_notices();

    session.set_filter(args.filter.as_str());
    if let Some(density) = args.density {
        session.set_density(density);
    }

    let view = session.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render_view(view));
    }
    Ok(())
}
