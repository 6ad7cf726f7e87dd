// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// A displayable piece of the transcript. Hosts decide how each variant looks (prompt
/// color, monospace input, red failures, ...). The engine only ever builds trees of
/// these and flattens them to plain text with [`Fragment::text_content`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Fragment {
    #[default]
    Empty,
    /// Output text, as returned by a handler.
    Text(String),
    /// The prompt shown in front of a submitted line.
    Prompt(String),
    /// A submitted line, exactly as typed.
    Input(String),
    LineBreak,
    Group(Vec<Fragment>),
    /// A handler failed. Produced by the failure boundary, never by handlers.
    HandlerFailure { command: String, message: String },
}

impl Fragment {
    #[must_use]
    pub fn group(children: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::Group(children.into_iter().collect())
    }

    /// `true` if this renders to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Fragment::Empty => true,
            Fragment::Text(text) | Fragment::Prompt(text) | Fragment::Input(text) => {
                text.is_empty()
            }
            Fragment::Group(children) => children.iter().all(Fragment::is_empty),
            Fragment::LineBreak | Fragment::HandlerFailure { .. } => false,
        }
    }

    /// Plain text of the fragment. Children of a group are flattened, empty ones are
    /// skipped, and the rest are joined with `\n`. A line break on its own is empty,
    /// it only separates group children.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Fragment::Empty | Fragment::LineBreak => String::new(),
            Fragment::Text(text) | Fragment::Prompt(text) | Fragment::Input(text) => {
                text.clone()
            }
            Fragment::HandlerFailure { command, message } => {
                format!("{command}: {message}")
            }
            Fragment::Group(children) => children
                .iter()
                .map(Fragment::text_content)
                .filter(|it| !it.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}", self.text_content()) }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self { Fragment::Text(text) }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self { Fragment::Text(text.to_string()) }
}

impl From<Vec<Fragment>> for Fragment {
    fn from(children: Vec<Fragment>) -> Self { Fragment::Group(children) }
}
