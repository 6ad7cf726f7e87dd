// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line-editing and command-dispatch engine.
//!
//! | Module          | Responsibility                                                 |
//! |-----------------|----------------------------------------------------------------|
//! | `tokenizer`     | Quote aware splitting of a line                                |
//! | `line_session`  | [`LineSession`]: buffer, caret, candidates, state, dispatcher  |
//! | `completion`    | [`CompletionProvider`] and candidate fetching                  |
//! | `command_table` | [`CommandTable`], fallbacks, and the single resolve function   |
//! | `pipeline`      | [`PendingCommand`] and its failure boundary                    |
//! | `history`       | [`HistoryStore`] and the default [`History`]                   |
//! | `transcript`    | [`Transcript`], [`TranscriptStore`]                            |
//! | `console`       | [`Console`], which ties all of the above together              |

// Attach sources.
pub mod clipboard;
pub mod command_table;
pub mod completion;
pub mod config;
pub mod console;
pub mod editor_event;
pub mod fragment;
pub mod history;
pub mod line_session;
pub mod pipeline;
pub mod tokenizer;
pub mod transcript;
pub mod view;

// Re-export.
pub use clipboard::{clipboard_test_fixtures::*, *};
pub use command_table::*;
pub use completion::*;
pub use config::*;
pub use console::*;
pub use editor_event::*;
pub use fragment::*;
pub use history::*;
pub use line_session::*;
pub use pipeline::*;
pub use tokenizer::*;
pub use transcript::*;
pub use view::*;
