// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FunctionKey, Key, KeyPress, KeyState, ModifierKeysMask, SpecialKey};

/// The subset of a browser `KeyboardEvent` the engine cares about. Field names follow
/// the DOM (`event.key`, `event.ctrlKey`, ...) so a web host can forward the event as
/// JSON unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DomKeyEvent {
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
}

impl DomKeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

/// Keys that only change modifier state (`"Shift"`, `"Control"`, `"Meta"`, ...) and
/// names the engine doesn't know about become [`SpecialKey::Unidentified`].
impl From<&DomKeyEvent> for KeyPress {
    fn from(event: &DomKeyEvent) -> Self {
        let mut chars = event.key.chars();
        let key = match (chars.next(), chars.next()) {
            // A key name of exactly one char is printable.
            (Some(character), None) => Key::Character(character),
            _ => SpecialKey::from_str(&event.key)
                .map(Key::SpecialKey)
                .or_else(|_| FunctionKey::from_str(&event.key).map(Key::FunctionKey))
                .unwrap_or(Key::SpecialKey(SpecialKey::Unidentified)),
        };

        let mask = ModifierKeysMask {
            // Already reflected in the character.
            shift_key_state: (event.shift_key && !matches!(key, Key::Character(_))).into(),
            ctrl_key_state: KeyState::from(event.ctrl_key),
            alt_key_state: KeyState::from(event.alt_key),
            meta_key_state: KeyState::from(event.meta_key),
        };

        KeyPress::new(key, mask)
    }
}

impl From<DomKeyEvent> for KeyPress {
    fn from(event: DomKeyEvent) -> Self { Self::from(&event) }
}
