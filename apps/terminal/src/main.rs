use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpStoryBackend, TurnController};
use rand::{rngs::StdRng, SeedableRng};
use shared::catalog::ScenarioCatalog;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod play;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "story-terminal", about = "Play an AI-narrated story in the terminal")]
struct Args {
    /// TOML settings file; defaults to ./story_client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// JSON array of `{ "story", "choices" }` scenarios.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Fixes the scenario pick.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(catalog) = args.catalog {
        settings.catalog_path = Some(catalog);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &settings.catalog_path {
        Some(path) => ScenarioCatalog::load(path)
            .with_context(|| format!("failed to load scenarios from '{}'", path.display()))?,
        None => ScenarioCatalog::builtin(),
    };
    let backend = HttpStoryBackend::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    info!(endpoint = %backend.endpoint(), scenarios = catalog.len(), "story client ready");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let controller = Arc::new(
        TurnController::init(&catalog, &mut rng, Arc::new(backend))
            .with_scroll_delay(settings.scroll_delay()),
    );

    play::run_play(controller.clone()).await?;

    match Arc::try_unwrap(controller) {
        Ok(controller) => {
            controller.teardown();
        }
        Err(_) => info!("turn still in flight at exit; session dropped"),
    }

    Ok(())
}
