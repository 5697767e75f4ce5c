//! Cell and status bar styling.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Config with colors forced on or off.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== GridStyles =====

/// Styles for grid cells and the status bar.
///
/// Without colors, focus is still visible through modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyles {
    /// Border of a cell holding content.
    pub filled_border: Style,
    /// Border of an empty cell.
    pub empty_border: Style,
    /// Border of the focused cell.
    pub focused_border: Style,
    /// Item title.
    pub title: Style,
    /// Year, media type and genres.
    pub details: Style,
    /// Status bar background.
    pub status: Style,
    /// Loading marker in the status bar.
    pub loading: Style,
    /// Exhaustion marker in the status bar.
    pub exhausted: Style,
}

impl GridStyles {
    /// Styles for a color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                filled_border: Style::default().fg(Color::Cyan),
                empty_border: Style::default().fg(Color::DarkGray),
                focused_border: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                title: Style::default().add_modifier(Modifier::BOLD),
                details: Style::default().fg(Color::Gray),
                status: Style::default().bg(Color::DarkGray).fg(Color::White),
                loading: Style::default().fg(Color::Green),
                exhausted: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                filled_border: Style::default(),
                empty_border: Style::default().add_modifier(Modifier::DIM),
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                title: Style::default().add_modifier(Modifier::BOLD),
                details: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
                loading: Style::default(),
                exhausted: Style::default(),
            }
        }
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}
