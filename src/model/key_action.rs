//! Domain-level keyboard actions independent of key bindings.

/// Actions the explorer understands.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Panning
    /// Move the view one step up. Default: k/↑
    PanUp,
    /// Move the view one step down. Default: j/↓
    PanDown,
    /// Move the view one step left. Default: h/←
    PanLeft,
    /// Move the view one step right. Default: l/→
    PanRight,
    /// Move the view one screen up. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the view one screen down. Default: Ctrl+d/Page Down
    PageDown,

    // Discovery
    /// Glide to a random placed item. Default: r
    FocusRandom,
    /// Switch to the next media type filter and reset the grid. Default: f
    CycleFilter,
    /// Glide back to the origin. Default: 0/Home
    Recenter,
    /// Clear the grid and re-seed under the current filter. Default: R
    Reset,

    // Application
    /// Exit the application. Default: q/Ctrl+c/Esc
    Quit,
    /// Toggle the help overlay. Default: ?
    Help,
}

impl KeyAction {
    /// Unit pan direction as `(dx, dy)` in screens or steps; `None` for non-pan actions.
    ///
    /// Directions describe how the view moves, so panning right drags the
    /// content left.
    pub fn pan_direction(self) -> Option<(f32, f32)> {
        match self {
            KeyAction::PanUp | KeyAction::PageUp => Some((0.0, 1.0)),
            KeyAction::PanDown | KeyAction::PageDown => Some((0.0, -1.0)),
            KeyAction::PanLeft => Some((1.0, 0.0)),
            KeyAction::PanRight => Some((-1.0, 0.0)),
            _ => None,
        }
    }

    /// True for page-sized pans.
    pub fn is_page(self) -> bool {
        matches!(self, KeyAction::PageUp | KeyAction::PageDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_right_drags_content_left() {
        assert_eq!(KeyAction::PanRight.pan_direction(), Some((-1.0, 0.0)));
    }

    #[test]
    fn page_down_moves_like_pan_down() {
        assert_eq!(
            KeyAction::PageDown.pan_direction(),
            KeyAction::PanDown.pan_direction()
        );
        assert!(KeyAction::PageDown.is_page());
        assert!(!KeyAction::PanDown.is_page());
    }

    #[test]
    fn non_pan_actions_have_no_direction() {
        for action in [
            KeyAction::FocusRandom,
            KeyAction::CycleFilter,
            KeyAction::Recenter,
            KeyAction::Reset,
            KeyAction::Quit,
            KeyAction::Help,
        ] {
            assert_eq!(action.pan_direction(), None, "{action:?}");
        }
    }
}
