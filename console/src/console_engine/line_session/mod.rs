// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editable line.
//!
//! | Module          | Responsibility                                              |
//! |-----------------|-------------------------------------------------------------|
//! | `caret`         | Grapheme aware split of a line at the caret                 |
//! | `core`          | [`LineSession`] struct, [`SessionState`], generation counter |
//! | `event_handlers`| Key dispatch, input gating                                  |

// Private modules organized by functional responsibility.
mod caret;
mod core;
mod event_handlers;

// Public re-exports (expose stable API).
pub use caret::*;
pub use core::*;
pub use event_handlers::*;
