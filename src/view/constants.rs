//! Layout and timing constants for the explorer.

use std::time::Duration;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Event poll timeout while idle.
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// Event poll timeout while an animation or a load is running (~30 fps).
pub const FRAME_TICK: Duration = Duration::from_millis(33);

/// Duration of a focus or recenter glide.
pub const FOCUS_GLIDE: Duration = Duration::from_millis(450);

/// Fallback terminal size when the backend cannot report one.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Help popup width as a percentage of the terminal width.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Help popup height as a percentage of the terminal height.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 50;
