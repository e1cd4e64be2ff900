mod cli;

use catalog::{BuiltinCatalog, CatalogError, CatalogSource, FileCatalog};
use clap::Parser;
use cli::Cli;
use fetch_service::{Config, ConfigError, FetchError, Fetcher, RunSummary};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use youtube_api::ApiError;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("could not set up HTTP client: {0}")]
    Client(#[from] ApiError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

async fn run(cli: &Cli) -> Result<RunSummary, AppError> {
    // The key is checked before the catalog is read or anything is requested
    let config = Config::from_env()?;
    debug!(?config, "Loaded configuration");

    let categories = match &cli.catalog {
        Some(path) => FileCatalog::new(path).load()?,
        None => BuiltinCatalog.load()?,
    };

    let fetcher = Fetcher::new(config)?;
    Ok(fetcher.run(&categories, &cli.output).await?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before logging is set up, so RUST_LOG may come from .env
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fetcher=info,fetch_service=info,youtube_api=info,catalog=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => {
            error!("Failed to read .env: {e}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli).await {
        Ok(summary) => {
            println!(
                "Fetched {} videos in {} categories and saved to {}",
                summary.videos,
                summary.categories,
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
