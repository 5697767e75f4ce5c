//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup, so press and repeat
    /// events of the same key resolve alike.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Vim-style panning
        keys.bind(KeyCode::Char('k'), none, KeyAction::PanUp);
        keys.bind(KeyCode::Char('j'), none, KeyAction::PanDown);
        keys.bind(KeyCode::Char('h'), none, KeyAction::PanLeft);
        keys.bind(KeyCode::Char('l'), none, KeyAction::PanRight);

        // Arrow key panning
        keys.bind(KeyCode::Up, none, KeyAction::PanUp);
        keys.bind(KeyCode::Down, none, KeyAction::PanDown);
        keys.bind(KeyCode::Left, none, KeyAction::PanLeft);
        keys.bind(KeyCode::Right, none, KeyAction::PanRight);

        // Page navigation
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);

        // Discovery
        keys.bind(KeyCode::Char('r'), none, KeyAction::FocusRandom);
        keys.bind(KeyCode::Char('f'), none, KeyAction::CycleFilter);
        keys.bind(KeyCode::Char('0'), none, KeyAction::Recenter);
        keys.bind(KeyCode::Home, none, KeyAction::Recenter);
        keys.bind(KeyCode::Char('R'), KeyModifiers::SHIFT, KeyAction::Reset);

        // Application
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys.bind(KeyCode::Esc, none, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);
        keys.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_and_arrow_keys_pan() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(key(KeyCode::Char('h'))), Some(KeyAction::PanLeft));
        assert_eq!(keys.get(key(KeyCode::Left)), Some(KeyAction::PanLeft));
        assert_eq!(keys.get(key(KeyCode::Char('j'))), Some(KeyAction::PanDown));
        assert_eq!(keys.get(key(KeyCode::Down)), Some(KeyAction::PanDown));
    }

    #[test]
    fn ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.get(event), Some(KeyAction::Quit));
        assert_eq!(keys.get(key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn shift_r_resets_while_r_focuses() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(key(KeyCode::Char('r'))), Some(KeyAction::FocusRandom));
        let shifted = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(keys.get(shifted), Some(KeyAction::Reset));
    }

    #[test]
    fn repeat_events_resolve_like_presses() {
        let keys = KeyBindings::default();
        let mut repeat = key(KeyCode::Char('l'));
        repeat.kind = KeyEventKind::Repeat;
        assert_eq!(keys.get(repeat), Some(KeyAction::PanRight));
    }

    #[test]
    fn unbound_key_is_none() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(key(KeyCode::Char('z'))), None);
    }
}
