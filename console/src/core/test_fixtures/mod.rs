// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scripted key input for tests and demos. The clipboard doubles live next to
//! [`crate::SystemClipboard`].

// Attach sources.
pub mod key_stream_fixtures;

// Re-export.
pub use key_stream_fixtures::*;
