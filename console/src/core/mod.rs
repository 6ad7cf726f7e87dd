// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Ambient support for the engine: error types, declarative macros, logging setup, and
//! test fixtures.

// Attach sources.
pub mod common;
pub mod decl_macros;
pub mod log;
pub mod test_fixtures;

// Re-export.
pub use common::*;
pub use log::*;
pub use test_fixtures::*;
