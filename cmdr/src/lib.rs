// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # termline-cmdr
//!
//! Apps that host the [`termline`] engine in a real terminal. Today that is `tlsh`, a
//! tiny shell with a handful of built-in commands:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ > cargo run --bin tlsh -- -l │
//! └──────────────────────────────┘
//! ```
//!
//! Then try `help`, `echo hello`, `sleep 2000` (press Ctrl+C to abandon it), `fail`,
//! `clear`, Tab after `s`, and Up / Down to walk the history. Ctrl+D on an empty line
//! exits.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod tlsh;

// Re-export.
pub use tlsh::*;

// Constants.
pub const TLSH_ISSUES_URL: &str = "https://github.com/termline/termline/issues/new";
