// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::ModifierKeysMask;

/// Examples.
///
/// ```rust
/// use termline::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_c = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'c');
/// assert!(ctrl_c.mask().is_ctrl_or_meta());
///
/// let enter = keypress!(@special SpecialKey::Enter);
/// assert_eq!(enter, KeyPress::Plain { key: Key::SpecialKey(SpecialKey::Enter) });
///
/// let f1 = keypress!(@fn FunctionKey::F1);
/// assert_eq!(f1.key(), Key::FunctionKey(FunctionKey::F1));
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::Character($arg_char),
        }
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };

    (@fn $arg_modifiers : expr, $arg_function : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

/// A single key press, with the impossible states of the platform events removed. Please
/// use the [`keypress!`] macro instead of constructing this directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy)]
pub enum Key {
    /// A [char] that can be inserted into the line buffer.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(
    Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy, EnumString, Display, AsRefStr,
)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// The string forms are the DOM `KeyboardEvent.key` names.
#[derive(
    Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy, EnumString, Display, AsRefStr,
)]
pub enum SpecialKey {
    Backspace,
    Enter,
    #[strum(serialize = "ArrowLeft")]
    Left,
    #[strum(serialize = "ArrowRight")]
    Right,
    #[strum(serialize = "ArrowUp")]
    Up,
    #[strum(serialize = "ArrowDown")]
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    /// Shift + Tab in a terminal.
    BackTab,
    Delete,
    Insert,
    #[strum(to_string = "Escape", serialize = "Esc")]
    Esc,
    /// A key the engine has no use for, eg: a browser's modifier-only `"Shift"`. It is
    /// still dispatched (as [`crate::EditorEvent::Unhandled`]) so the host learns that
    /// the key was consumed.
    Unidentified,
}

impl KeyPress {
    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::default(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    /// Builds a [`KeyPress::Plain`] when `mask` is empty, so that equality with
    /// [`keypress!`] values doesn't depend on how the event was constructed.
    #[must_use]
    pub fn new(key: Key, mask: ModifierKeysMask) -> Self {
        if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        }
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only `KeyEventKind::Press` events convert. For displayable characters the `SHIFT`
/// modifier is dropped, since it is already reflected in the character itself: typing
/// "Shift + x" produces `keypress!(@char 'X')`.
pub mod convert_key_event {
    use super::*;

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind != KeyEventKind::Press {
                return Err(());
            }

            let key = match key_event.code {
                KeyCode::Char(character) => Key::Character(character),
                KeyCode::F(number) => Key::FunctionKey(function_key_from_number(number)?),
                KeyCode::Backspace => Key::SpecialKey(SpecialKey::Backspace),
                KeyCode::Enter => Key::SpecialKey(SpecialKey::Enter),
                KeyCode::Left => Key::SpecialKey(SpecialKey::Left),
                KeyCode::Right => Key::SpecialKey(SpecialKey::Right),
                KeyCode::Up => Key::SpecialKey(SpecialKey::Up),
                KeyCode::Down => Key::SpecialKey(SpecialKey::Down),
                KeyCode::Home => Key::SpecialKey(SpecialKey::Home),
                KeyCode::End => Key::SpecialKey(SpecialKey::End),
                KeyCode::PageUp => Key::SpecialKey(SpecialKey::PageUp),
                KeyCode::PageDown => Key::SpecialKey(SpecialKey::PageDown),
                KeyCode::Tab => Key::SpecialKey(SpecialKey::Tab),
                KeyCode::BackTab => Key::SpecialKey(SpecialKey::BackTab),
                KeyCode::Delete => Key::SpecialKey(SpecialKey::Delete),
                KeyCode::Insert => Key::SpecialKey(SpecialKey::Insert),
                KeyCode::Esc => Key::SpecialKey(SpecialKey::Esc),
                _ => return Err(()),
            };

            let mut modifiers = key_event.modifiers;
            if matches!(key, Key::Character(_)) {
                modifiers.remove(KeyModifiers::SHIFT);
            }

            Ok(KeyPress::new(key, ModifierKeysMask::from(modifiers)))
        }
    }

    fn function_key_from_number(number: u8) -> Result<FunctionKey, ()> {
        Ok(match number {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return Err(()),
        })
    }
}
