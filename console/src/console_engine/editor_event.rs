// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::KeyPress;

/// What a key press did to the [`crate::LineSession`]. Some variants need the host (or
/// [`crate::Console`]) to follow up with async work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer, caret or candidates may have changed. Re-render.
    Edited,
    /// Enter was pressed. Run the command in the ticket, see
    /// [`crate::Console::begin_submission`].
    Submitted(SubmitTicket),
    /// Tab was pressed. Ask the completion provider, then feed the answer to
    /// [`crate::LineSession::apply_completion`].
    CompletionRequested(CompletionRequest),
    /// Ctrl/Cmd + C. Copy the host's current selection to the clipboard.
    CopyRequested,
    /// Ctrl/Cmd + V. Paste is not supported, the key is eaten.
    PasteSwallowed,
    /// A key the dispatcher has no binding for. The line is unchanged.
    Unhandled(KeyPress),
    /// The key never reached the dispatcher.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    NotFocused,
    InputDisabled,
    /// A command is executing.
    Busy,
}

/// Whether the host should suppress its own default handling of the key (eg: call
/// `preventDefault()` in a browser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDisposition {
    Consumed,
    PassThrough,
}

impl EditorEvent {
    /// Every key that passes the focus and input gates is consumed, even when it is a
    /// no-op. While busy the engine still owns the keyboard, so those are consumed too.
    #[must_use]
    pub fn disposition(&self) -> EventDisposition {
        match self {
            EditorEvent::Ignored(IgnoreReason::NotFocused | IgnoreReason::InputDisabled) => {
                EventDisposition::PassThrough
            }
            _ => EventDisposition::Consumed,
        }
    }
}

/// Issued when a line is submitted. Carries a snapshot of the submitted text, so that the
/// session is free to reset its buffer while the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub line: String,
}

/// Issued when Tab is pressed. `line` is the text as typed (quotes are not repaired).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub generation: u64,
    pub line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// One candidate, substituted for the last token.
    Applied,
    /// Many candidates, shown to the user.
    Ambiguous,
    NoMatch,
    /// The line changed (or another Tab was pressed) since the request was issued. The
    /// candidates were dropped.
    Stale,
}
