// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use crate::{CommonResult, ConsoleError, DEFAULT_CLEAR_KEYWORD, DEFAULT_PROMPT};

/// Static settings of a console. Focus is not here, it changes at runtime, see
/// [`crate::Console::set_focused`]. Every field has a default, so a config file only
/// needs the fields it wants to change.
///
/// ```rust
/// use termline::ConsoleConfig;
///
/// let config = ConsoleConfig::try_from_json_str(r#"{ "prompt": "> " }"#).unwrap();
/// assert_eq!(config.prompt, "> ");
/// assert!(config.show_caret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
    pub show_caret: bool,
    pub enable_input: bool,
    /// Submitting a line whose first word is this wipes the transcript.
    pub clear_keyword: String,
    pub welcome_message: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            show_caret: true,
            enable_input: true,
            clear_keyword: DEFAULT_CLEAR_KEYWORD.to_string(),
            welcome_message: None,
        }
    }
}

impl ConsoleConfig {
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidConfig`] if `json` doesn't parse.
    pub fn try_from_json_str(json: &str) -> CommonResult<Self> {
        serde_json::from_str(json).map_err(|source| {
            miette::Report::new(ConsoleError::InvalidConfig {
                source: Box::new(source),
            })
        })
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be read, or
    /// [`ConsoleError::InvalidConfig`] if it doesn't parse.
    pub fn try_from_json_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .into_diagnostic()
            .map_err(|report| report.wrap_err(format!("reading {}", path.display())))?;
        Self::try_from_json_str(&json)
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_show_caret(mut self, show_caret: bool) -> Self {
        self.show_caret = show_caret;
        self
    }

    #[must_use]
    pub fn with_enable_input(mut self, enable_input: bool) -> Self {
        self.enable_input = enable_input;
        self
    }

    #[must_use]
    pub fn with_welcome_message(mut self, welcome_message: impl Into<String>) -> Self {
        self.welcome_message = Some(welcome_message.into());
        self
    }
}
