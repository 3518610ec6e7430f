mod app;
mod cli;
mod config;

use anyhow::Result;
use app::state::AppState;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    app::logger::init();

    // CLI problems abort before the browser ever starts.
    let plan = cli::Args::parse().into_plan()?;

    let mut state = AppState::new(plan.headless).await?;
    info!("Browser started");

    let stats = app::workflow::pipeline::run(&mut state, &plan).await?;

    info!(
        written = stats.written,
        skipped = stats.skipped,
        empty_scopes = stats.empty_scopes,
        output = %plan.output.display(),
        "Scraping finished"
    );
    Ok(())
}
