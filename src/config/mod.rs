//! Configuration module.
//!
//! - [`loader`]: TOML config file and the defaults → file → env → CLI chain
//! - [`keybindings`]: key → [`KeyAction`](crate::model::KeyAction) mapping

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, resolve_config, CatalogSettings,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, ViewSettings,
};
