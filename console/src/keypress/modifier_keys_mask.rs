// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

/// Which modifier keys were held down. `meta` is the Cmd key on macOS and the Windows
/// key elsewhere. Browsers report it, terminals mostly don't (crossterm calls it
/// `SUPER`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
    pub meta_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::NotPressed
        }
    }
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }

    /// Ctrl on Linux / Windows, Cmd on macOS. Both mean "shortcut" to the dispatcher.
    #[must_use]
    pub fn is_ctrl_or_meta(&self) -> bool {
        self.ctrl_key_state == KeyState::Pressed
            || self.meta_key_state == KeyState::Pressed
    }
}

/// Shift is dropped for printable characters by the caller, see
/// [`crate::KeyPress`]'s `TryFrom<KeyEvent>`.
impl From<KeyModifiers> for ModifierKeysMask {
    fn from(modifiers: KeyModifiers) -> Self {
        ModifierKeysMask {
            shift_key_state: modifiers.contains(KeyModifiers::SHIFT).into(),
            ctrl_key_state: modifiers.contains(KeyModifiers::CONTROL).into(),
            alt_key_state: modifiers.contains(KeyModifiers::ALT).into(),
            meta_key_state: (modifiers.contains(KeyModifiers::SUPER)
                || modifiers.contains(KeyModifiers::META))
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builders() {
        let mask = ModifierKeysMask::new().with_ctrl().with_shift();
        assert_eq!(mask.ctrl_key_state, KeyState::Pressed);
        assert_eq!(mask.shift_key_state, KeyState::Pressed);
        assert_eq!(mask.alt_key_state, KeyState::NotPressed);
        assert!(mask.is_ctrl_or_meta());
        assert!(!mask.is_empty());
        assert!(ModifierKeysMask::new().is_empty());
    }

    #[test]
    fn test_meta_counts_as_shortcut() {
        assert!(ModifierKeysMask::new().with_meta().is_ctrl_or_meta());
        assert!(!ModifierKeysMask::new().with_alt().is_ctrl_or_meta());
    }

    #[test]
    fn test_from_crossterm_modifiers() {
        let mask = ModifierKeysMask::from(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        assert_eq!(mask, ModifierKeysMask::new().with_ctrl().with_meta());
        assert!(ModifierKeysMask::from(KeyModifiers::NONE).is_empty());
    }
}
