// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # termline
//!
//! A line-editing and command-dispatch engine for terminal-like consoles. It is the part
//! of an in-browser (or in-terminal) console that turns raw keystrokes into an edited
//! line, decides when that line becomes a submitted command, runs the command against a
//! pluggable handler table, and appends the result to a scrollback transcript.
//!
//! Rendering is not done here. The engine produces a [`ConsoleView`] snapshot, which is
//! plain data (and [`serde::Serialize`]), so any host can paint it: a web page, a
//! `crossterm` terminal (see the `tlsh` binary in the `cmdr` crate), or a test.
//!
//! # Architecture
//!
//! | Module            | Responsibility                                                 |
//! |-------------------|----------------------------------------------------------------|
//! | [`keypress`]      | [`KeyPress`] model, DOM key names and `crossterm` conversions  |
//! | [`console_engine`]| Tokenizer, [`LineSession`], dispatcher, completion, pipeline   |
//! | [`core`]          | Errors, declarative macros, logging, test fixtures             |
//!
//! # Data flow
//!
//! ```text
//! KeyPress ─▶ LineSession::apply_key ─▶ EditorEvent
//!                                          │
//!          ┌───────────────────────────────┼──────────────────────────────┐
//!          ▼                               ▼                              ▼
//!   CompletionRequested            Submitted(SubmitTicket)          Edited / Ignored
//!   (await provider, then          (history append, provisional     (re-render view)
//!    apply_completion)              entry, PendingCommand::execute,
//!                                   finish_submission)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use termline::{Console, ConsoleConfig, CommandTable, Fragment, keypress, SpecialKey};
//!
//! # async fn run() -> miette::Result<()> {
//! let commands = CommandTable::default()
//!     .with_dynamic("echo", |args| async move { Ok(Fragment::from(args)) });
//!
//! let mut console = Console::new(ConsoleConfig::default(), commands);
//! console.set_focused(true);
//!
//! for ch in "echo hi".chars() {
//!     console.handle_key(keypress!(@char ch)).await?;
//! }
//! console.handle_key(keypress!(@special SpecialKey::Enter)).await?;
//!
//! assert_eq!(console.transcript_text()?, "$ \necho hi\nhi");
//! # Ok(())
//! # }
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod console_engine;
pub mod core;
pub mod keypress;

// Re-export.
pub use console_engine::*;
pub use crate::core::*;
pub use keypress::*;

// Type aliases.
use std::{pin::Pin, sync::Arc};

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SafeHistory = Arc<StdMutex<dyn HistoryStore + Send>>;
pub type SafeTranscript = Arc<StdMutex<dyn TranscriptStore + Send>>;
pub type SafeClipboard = Arc<StdMutex<dyn ClipboardService + Send>>;

pub type InlineVec<T> = smallvec::SmallVec<[T; INLINE_VEC_SIZE]>;

pub type PinnedInputStream<T> = Pin<Box<dyn futures_core::Stream<Item = T>>>;

// Constants.
pub const HISTORY_SIZE_MAX: usize = 1_000;
pub const INLINE_VEC_SIZE: usize = 8;
pub const DEFAULT_PROMPT: &str = "$ ";
pub const DEFAULT_CLEAR_KEYWORD: &str = "clear";
