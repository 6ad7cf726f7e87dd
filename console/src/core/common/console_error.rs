// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the engine itself, as opposed to errors returned by command
/// handlers (those are caught by the failure boundary in
/// [`crate::PendingCommand::execute`] and rendered into the transcript).
#[derive(Debug, Error, Diagnostic)]
pub enum ConsoleError {
    /// A shared store was poisoned by a panic in another task.
    #[error("lock poisoned: {resource}")]
    #[diagnostic(
        code(termline::lock_poisoned),
        help("a task panicked while holding this lock")
    )]
    LockPoisoned { resource: String },

    /// The clipboard service could not be reached.
    #[error("clipboard unavailable: {message}")]
    #[diagnostic(code(termline::clipboard))]
    Clipboard { message: String },

    /// The console configuration could not be parsed or read.
    #[error("invalid console config")]
    #[diagnostic(code(termline::invalid_config))]
    InvalidConfig {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
