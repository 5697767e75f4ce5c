//! Configuration file loading with precedence handling.

use crate::grid::GridConfig;
use crate::model::{Filter, GridError};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DRIFTGRID_CONFIG";

/// Environment variable naming a catalog file.
pub const CATALOG_ENV_VAR: &str = "DRIFTGRID_CATALOG";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Resolved grid settings are unusable.
    #[error("Invalid grid settings: {0}")]
    Invalid(#[from] GridError),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/driftgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Grid engine tuning.
    #[serde(default)]
    pub grid: Option<GridSection>,

    /// Content catalog source.
    #[serde(default)]
    pub catalog: Option<CatalogSection>,

    /// Terminal projection.
    #[serde(default)]
    pub view: Option<ViewSection>,
}

/// `[grid]` section. Missing keys keep their default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Cell width in pixels.
    pub cell_width: Option<f32>,
    /// Cell height in pixels.
    pub cell_height: Option<f32>,
    /// Extra cells around the screen.
    pub buffer_cells: Option<u32>,
    /// Items requested per provider call.
    pub batch_size: Option<usize>,
    /// Newly revealed empty cells needed to trigger a load.
    pub min_empty_cells_to_load: Option<usize>,
    /// Interned position limit.
    pub position_cache_limit: Option<usize>,
    /// Vertical stagger of alternating cells.
    pub zigzag_value: Option<f32>,
    /// Column count driving the stagger parity.
    pub zigzag_columns: Option<i32>,
}

/// `[catalog]` section.
///
/// ```toml
/// [catalog]
/// path = "catalog.jsonl"
/// synthetic_count = 2000
/// seed = 7
/// latency_ms = 150
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// JSONL catalog file. A synthetic catalog is generated when absent.
    pub path: Option<PathBuf>,
    /// Size of the synthetic catalog.
    pub synthetic_count: Option<usize>,
    /// Seed for the synthetic catalog, the shuffle and random focus picks.
    pub seed: Option<u64>,
    /// Simulated provider latency.
    pub latency_ms: Option<u64>,
}

/// `[view]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewSection {
    /// Grid pixels per terminal column.
    pub px_per_column: Option<f32>,
    /// Grid pixels per terminal row.
    pub px_per_row: Option<f32>,
}

/// Resolved catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// JSONL file to load, if any.
    pub path: Option<PathBuf>,
    /// Size of the synthetic catalog used when `path` is `None`.
    pub synthetic_count: usize,
    /// Fixed seed; `None` means entropy.
    pub seed: Option<u64>,
    /// Simulated provider latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            synthetic_count: 2000,
            seed: None,
            latency_ms: 150,
        }
    }
}

/// Resolved terminal projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Grid pixels per terminal column.
    pub px_per_column: f32,
    /// Grid pixels per terminal row.
    pub px_per_row: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            px_per_column: 16.0,
            px_per_row: 38.0,
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Grid engine settings.
    pub grid: GridConfig,
    /// Catalog source.
    pub catalog: CatalogSettings,
    /// Terminal projection.
    pub view: ViewSettings,
    /// Initial provider filter.
    pub filter: Filter,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            catalog: CatalogSettings::default(),
            view: ViewSettings::default(),
            filter: Filter::any(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check the settings the engine and the projection depend on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        for (field, value) in [
            ("px_per_column", self.view.px_per_column),
            ("px_per_row", self.view.px_per_row),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::InvalidConfig {
                    field,
                    reason: format!("must be > 0 (got {value})"),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Flags given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--catalog`
    pub catalog: Option<PathBuf>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--media-type`
    pub media_type: Option<String>,
    /// `--genre`
    pub genre: Option<String>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/driftgrid/driftgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("driftgrid").join("driftgrid.log")
    } else {
        PathBuf::from("driftgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/driftgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("driftgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DRIFTGRID_CONFIG` environment variable
/// 3. Default path `~/.config/driftgrid/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DRIFTGRID_CATALOG`: catalog file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(CATALOG_ENV_VAR) {
        if !path.is_empty() {
            config.catalog.path = Some(PathBuf::from(path));
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let grid = config.grid.unwrap_or_default();
    let catalog = config.catalog.unwrap_or_default();
    let view = config.view.unwrap_or_default();

    ResolvedConfig {
        grid: GridConfig {
            cell_width: grid.cell_width.unwrap_or(defaults.grid.cell_width),
            cell_height: grid.cell_height.unwrap_or(defaults.grid.cell_height),
            buffer_cells: grid.buffer_cells.unwrap_or(defaults.grid.buffer_cells),
            batch_size: grid.batch_size.unwrap_or(defaults.grid.batch_size),
            min_empty_cells_to_load: grid
                .min_empty_cells_to_load
                .unwrap_or(defaults.grid.min_empty_cells_to_load),
            position_cache_limit: grid
                .position_cache_limit
                .unwrap_or(defaults.grid.position_cache_limit),
            zigzag_value: grid.zigzag_value.unwrap_or(defaults.grid.zigzag_value),
            zigzag_columns: grid.zigzag_columns.unwrap_or(defaults.grid.zigzag_columns),
        },
        catalog: CatalogSettings {
            path: catalog.path.or(defaults.catalog.path),
            synthetic_count: catalog
                .synthetic_count
                .unwrap_or(defaults.catalog.synthetic_count),
            seed: catalog.seed.or(defaults.catalog.seed),
            latency_ms: catalog.latency_ms.unwrap_or(defaults.catalog.latency_ms),
        },
        view: ViewSettings {
            px_per_column: view.px_per_column.unwrap_or(defaults.view.px_per_column),
            px_per_row: view.px_per_row.unwrap_or(defaults.view.px_per_row),
        },
        filter: defaults.filter,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }

    if let Some(seed) = cli.seed {
        config.catalog.seed = Some(seed);
    }

    if let Some(media_type) = cli.media_type {
        config.filter.media_type = Some(media_type);
    }

    if let Some(genre) = cli.genre {
        config.filter.genre = Some(genre);
    }

    config
}

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Returns [`ConfigError`] if a config file is unreadable or malformed, or
/// if the resolved settings fail validation.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_cli_overrides(apply_env_overrides(merge_config(file)), cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
