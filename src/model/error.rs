//! Error types for driftgrid.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the explorer binary
//!   - [`GridError`] - Invalid grid configuration handed to the engine
//!   - [`CatalogError`] - Catalog file loading failures
//!   - [`ProviderError`] - Content provider failures (only surfaced to the binary on
//!     worker startup; inside the engine they are recovered locally)
//!   - `ConfigError`, `LoggingError` - Configuration and tracing setup
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Nothing inside the grid engine is fatal. A failed provider call returns the loader to
//! idle and is retried implicitly on the next viewport change; an empty batch is not an
//! error at all but the exhaustion signal. The worst case is visibly empty cells.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the explorer.
///
/// # Examples
///
/// ```no_run
/// use driftgrid::model::error::{AppError, CatalogError};
///
/// fn run_app() -> Result<(), AppError> {
///     // CatalogError automatically converts to AppError via From
///     load_catalog()?;
///     Ok(())
/// }
/// # fn load_catalog() -> Result<(), CatalogError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Grid configuration was rejected by the engine.
    #[error("Invalid grid configuration: {0}")]
    Grid(#[from] GridError),

    /// Catalog could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Provider worker could not be started or died.
    #[error("Content provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the explorer cannot function. Terminal state is
    /// restored before the error is reported.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Invalid grid engine configuration.
///
/// Returned by `GridConfig::validate` and by every constructor that accepts a config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A configuration field holds an unusable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use driftgrid::model::error::GridError;
    ///
    /// let err = GridError::InvalidConfig { field: "cell_width", reason: "must be > 0".into() };
    /// assert!(err.to_string().contains("cell_width"));
    /// ```
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors returned by a `ContentProvider`.
///
/// Inside the engine these are recovered locally: logged, loader back to idle,
/// `has_more` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The backend could not serve the request (network, rate limit, ...).
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The background worker running the provider is gone.
    #[error("Provider worker disconnected")]
    Disconnected,
}

/// Errors encountered when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog path does not exist.
    #[error("Catalog not found: {path}")]
    NotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Generic I/O failure while reading the catalog.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
