// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::LineSession;
use crate::{CommonResult, EditorEvent, IgnoreReason, Key, KeyPress, SafeHistory,
            SpecialKey, lock_or_report};

/// Host state that decides whether keys reach the dispatcher at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputGate {
    pub focused: bool,
    pub input_enabled: bool,
}

macro_rules! early_return_if_busy {
    ($self:ident) => {
        if $self.is_busy() {
            return Ok(EditorEvent::Ignored(IgnoreReason::Busy));
        }
    };
}

impl LineSession {
    /// Route one key press. Gating happens first: unfocused, input disabled, then busy.
    ///
    /// # Errors
    ///
    /// Returns an error only if the history store lock is poisoned.
    pub fn apply_key(
        &mut self,
        key_press: KeyPress,
        gate: InputGate,
        safe_history: &SafeHistory,
    ) -> CommonResult<EditorEvent> {
        if !gate.focused {
            return Ok(EditorEvent::Ignored(IgnoreReason::NotFocused));
        }
        if !gate.input_enabled {
            return Ok(EditorEvent::Ignored(IgnoreReason::InputDisabled));
        }
        early_return_if_busy!(self);

        let event = match key_press.key() {
            Key::Character(ch) if key_press.mask().is_ctrl_or_meta() => {
                handle_shortcut_key(key_press, ch)
            }
            key => handle_regular_key(self, key_press, key, safe_history)?,
        };

        tracing::debug!(
            message = "apply_key",
            key_press = ?key_press,
            event = ?event,
            caret = self.caret(),
            generation = self.generation()
        );

        Ok(event)
    }
}

/// Ctrl/Cmd + character.
fn handle_shortcut_key(key_press: KeyPress, ch: char) -> EditorEvent {
    match ch.to_ascii_lowercase() {
        'c' => EditorEvent::CopyRequested,
        'v' => EditorEvent::PasteSwallowed,
        _ => EditorEvent::Unhandled(key_press),
    }
}

/// Everything else. Modifiers other than Ctrl/Cmd are ignored.
fn handle_regular_key(
    session: &mut LineSession,
    key_press: KeyPress,
    key: Key,
    safe_history: &SafeHistory,
) -> CommonResult<EditorEvent> {
    Ok(match key {
        Key::SpecialKey(SpecialKey::Enter) => {
            EditorEvent::Submitted(session.submit())
        }
        Key::SpecialKey(SpecialKey::Tab) => {
            EditorEvent::CompletionRequested(session.request_completion())
        }
        Key::SpecialKey(SpecialKey::Backspace) => {
            session.delete_before_caret();
            EditorEvent::Edited
        }
        Key::SpecialKey(SpecialKey::Up) => handle_up(session, safe_history)?,
        Key::SpecialKey(SpecialKey::Down) => handle_down(session, safe_history)?,
        Key::SpecialKey(SpecialKey::Left) => {
            session.set_caret(session.caret().saturating_sub(1));
            EditorEvent::Edited
        }
        Key::SpecialKey(SpecialKey::Right) => {
            session.set_caret(session.caret() + 1);
            EditorEvent::Edited
        }
        Key::Character(ch) if !ch.is_control() => {
            let mut encoded = [0; 4];
            session.insert_at_caret(ch.encode_utf8(&mut encoded));
            EditorEvent::Edited
        }
        _ => EditorEvent::Unhandled(key_press),
    })
}

/// Recall an older line. Nothing to recall leaves the line as is.
fn handle_up(
    session: &mut LineSession,
    safe_history: &SafeHistory,
) -> CommonResult<EditorEvent> {
    let recalled = lock_or_report!(safe_history, "history").previous_command();
    if let Some(line) = recalled {
        session.set_buffer(line);
        session.set_caret_to_end();
    }
    Ok(EditorEvent::Edited)
}

/// Recall a newer line. Walking past the newest entry empties the line.
fn handle_down(
    session: &mut LineSession,
    safe_history: &SafeHistory,
) -> CommonResult<EditorEvent> {
    let recalled = lock_or_report!(safe_history, "history").next_command();
    match recalled {
        Some(line) => {
            session.set_buffer(line);
            session.set_caret_to_end();
        }
        None => session.reset(),
    }
    Ok(EditorEvent::Edited)
}
