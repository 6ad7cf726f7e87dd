// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod builtins;
pub mod clap_config;
pub mod config_folder;
pub mod launcher;
pub mod render;
pub mod ui_str;

// Re-export.
pub use builtins::*;
pub use clap_config::*;
pub use config_folder::*;
pub use launcher::*;
pub use render::*;
