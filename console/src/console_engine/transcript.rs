// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::Fragment;

/// The scrollback. The engine appends to it, and empties it on `clear`. Nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub entries: Vec<Fragment>,
}

impl Transcript {
    /// Prompt + submitted line, waiting for output.
    #[must_use]
    pub fn provisional_entry(prompt: &str, line: &str) -> Fragment {
        Fragment::group([
            Fragment::Prompt(prompt.to_string()),
            Fragment::Input(line.to_string()),
            Fragment::LineBreak,
        ])
    }

    /// Prompt + submitted line + output. The line break before the output is only added
    /// if there is output.
    #[must_use]
    pub fn final_entry(prompt: &str, line: &str, output: Fragment) -> Fragment {
        let mut children = vec![
            Fragment::Prompt(prompt.to_string()),
            Fragment::Input(line.to_string()),
        ];
        if !output.is_empty() {
            children.push(Fragment::LineBreak);
            children.push(output);
        }
        children.push(Fragment::LineBreak);
        Fragment::Group(children)
    }

    pub fn push(&mut self, entry: Fragment) { self.entries.push(entry); }

    /// Swap out the last entry, or push if there is none.
    pub fn replace_last(&mut self, entry: Fragment) {
        match self.entries.last_mut() {
            Some(last) => *last = entry,
            None => self.entries.push(entry),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Plain text of the whole scrollback, as handed to the default handler.
    #[must_use]
    pub fn text_content(&self) -> String {
        Fragment::Group(self.entries.clone()).text_content()
    }
}

/// Where the transcript lives. Hosts that persist the scrollback (or share it with other
/// widgets) implement this and pass it to [`crate::Console::with_transcript`].
pub trait TranscriptStore {
    fn get(&self) -> Transcript;
    fn set(&mut self, transcript: Transcript);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTranscript {
    pub transcript: Transcript,
}

impl TranscriptStore for InMemoryTranscript {
    fn get(&self) -> Transcript { self.transcript.clone() }

    fn set(&mut self, transcript: Transcript) { self.transcript = transcript; }
}
