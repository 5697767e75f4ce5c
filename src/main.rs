//! driftgrid explorer - Entry Point

use clap::Parser;
use driftgrid::config::{resolve_config, CliOverrides, ResolvedConfig};
use driftgrid::model::AppError;
use driftgrid::provider::{Catalog, CatalogProvider, ProviderWorker};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// driftgrid - drag through an endless grid of movies and shows
#[derive(Parser, Debug)]
#[command(name = "driftgrid")]
#[command(version)]
#[command(about = "Terminal explorer for an infinite, lazily loaded content grid")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSONL catalog to explore (a synthetic catalog is used otherwise)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Seed for the synthetic catalog, its order and random focus picks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only show items of this media type (e.g. movie, tv)
    #[arg(long)]
    pub media_type: Option<String>,

    /// Only show items carrying this genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            catalog: self.catalog.clone(),
            seed: self.seed,
            media_type: self.media_type.clone(),
            genre: self.genre.clone(),
        }
    }
}

/// Load or generate the catalog described by the resolved config.
fn build_catalog(config: &ResolvedConfig) -> Result<Catalog, AppError> {
    let seed = config.catalog.seed.unwrap_or_else(rand::random);
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load_jsonl(path)?,
        None => Catalog::synthetic(config.catalog.synthetic_count, seed),
    };
    Ok(catalog.shuffled(seed))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args.config.clone(), args.overrides()).map_err(AppError::from)?;

    driftgrid::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let catalog = build_catalog(&config)?;
    info!(items = catalog.len(), "Catalog ready");

    let provider = CatalogProvider::new(catalog)
        .with_latency(Duration::from_millis(config.catalog.latency_ms));
    let worker = ProviderWorker::spawn(provider).map_err(AppError::from)?;

    driftgrid::view::run(&config, worker, args.no_color).map_err(AppError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["driftgrid", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["driftgrid", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["driftgrid"]);
        assert_eq!(args.config, None);
        assert_eq!(args.catalog, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.media_type, None);
        assert_eq!(args.genre, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_filter_flags() {
        let args = Args::parse_from(["driftgrid", "--media-type", "tv", "--genre", "Drama"]);
        let overrides = args.overrides();
        assert_eq!(overrides.media_type.as_deref(), Some("tv"));
        assert_eq!(overrides.genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_seed_rejects_negative() {
        let result = Args::try_parse_from(["driftgrid", "--seed", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_path() {
        let args = Args::parse_from(["driftgrid", "--catalog", "/tmp/items.jsonl"]);
        assert_eq!(args.catalog, Some(PathBuf::from("/tmp/items.jsonl")));
    }

    #[test]
    fn synthetic_catalog_is_built_without_path() {
        let mut config = ResolvedConfig::default();
        config.catalog.synthetic_count = 40;
        config.catalog.seed = Some(5);
        let catalog = build_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 40);
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let mut config = ResolvedConfig::default();
        config.catalog.path = Some(PathBuf::from("/definitely/not/here.jsonl"));
        assert!(matches!(build_catalog(&config), Err(AppError::Catalog(_))));
    }
}
