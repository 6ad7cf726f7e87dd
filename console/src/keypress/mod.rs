// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key model for the console. Hosts translate whatever their platform gives them (a DOM
//! `KeyboardEvent`, a [`crossterm::event::KeyEvent`]) into a [`KeyPress`] and hand it to
//! the engine.

// Attach sources.
pub mod dom_key;
pub mod keypress_impl;
pub mod modifier_keys_mask;

// Re-export.
pub use dom_key::*;
pub use keypress_impl::*;
pub use modifier_keys_mask::*;
