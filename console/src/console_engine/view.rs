// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::Transcript;

/// Everything a host needs to paint the console. Plain data: a browser host can ship it
/// over as JSON, a terminal host can walk it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleView {
    pub welcome_message: Option<String>,
    pub transcript: Transcript,
    pub current_line: CurrentLineView,
    /// Space joined completion candidates. Empty means nothing to show.
    pub candidates: String,
}

/// The editable line. While a command is executing the line text is blank and only the
/// caret is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLineView {
    pub prompt: String,
    pub before_caret: String,
    pub after_caret: String,
    pub show_caret: bool,
    pub busy: bool,
}

impl CurrentLineView {
    /// `prompt + before + after`, without the caret.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}{}", self.prompt, self.before_caret, self.after_caret)
    }
}

impl ConsoleView {
    /// Plain text rendering, caret drawn as `█`. Used by `tlsh` and handy in tests.
    #[must_use]
    pub fn render_plain_text(&self) -> String {
        let mut lines = vec![];

        if let Some(welcome_message) = &self.welcome_message {
            lines.push(welcome_message.clone());
        }

        let transcript_text = self.transcript.text_content();
        if !transcript_text.is_empty() {
            lines.push(transcript_text);
        }

        let line = &self.current_line;
        let caret = if line.show_caret { "█" } else { "" };
        let prompt = if line.busy { "" } else { line.prompt.as_str() };
        lines.push(format!(
            "{prompt}{}{caret}{}",
            line.before_caret, line.after_caret
        ));

        if !self.candidates.is_empty() {
            lines.push(self.candidates.clone());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view(busy: bool) -> ConsoleView {
        ConsoleView {
            welcome_message: Some("welcome".into()),
            transcript: Transcript::default(),
            current_line: CurrentLineView {
                prompt: "$ ".into(),
                before_caret: "ec".into(),
                after_caret: "ho".into(),
                show_caret: true,
                busy,
            },
            candidates: "echo exit".into(),
        }
    }

    #[test]
    fn test_render_plain_text() {
        assert_eq!(view(false).render_plain_text(), "welcome\n$ ec█ho\necho exit");
        assert_eq!(view(false).current_line.text(), "$ echo");
    }

    #[test]
    fn test_render_busy_hides_prompt() {
        let mut it = view(true);
        it.current_line.before_caret.clear();
        it.current_line.after_caret.clear();
        it.candidates.clear();
        assert_eq!(it.render_plain_text(), "welcome\n█");
    }
}
