// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{grapheme_len, split_at_caret};
use crate::{CompletionOutcome, CompletionRequest, SubmitTicket, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Editing,
    /// A submitted command has not finished yet. Edit keys are rejected.
    Executing,
}

/// The one and only owner of the line being edited.
///
/// - `caret` is counted in grapheme clusters and is always in `[0, len(buffer)]`.
/// - `generation` goes up on every buffer change, every Tab, and every submission. Async
///   results carry the generation they were issued at, and are dropped if it is no
///   longer current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSession {
    buffer: String,
    caret: usize,
    candidates: String,
    state: SessionState,
    generation: u64,
}

impl LineSession {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn buffer(&self) -> &str { &self.buffer }

    #[must_use]
    pub fn caret(&self) -> usize { self.caret }

    /// Space joined completion candidates. Empty means nothing to show.
    #[must_use]
    pub fn candidates(&self) -> &str { &self.candidates }

    #[must_use]
    pub fn state(&self) -> SessionState { self.state }

    #[must_use]
    pub fn is_busy(&self) -> bool { self.state == SessionState::Executing }

    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    /// Length of the buffer in grapheme clusters.
    #[must_use]
    pub fn len(&self) -> usize { grapheme_len(&self.buffer) }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Text before and after the caret.
    #[must_use]
    pub fn split_at_caret(&self) -> (&str, &str) { split_at_caret(&self.buffer, self.caret) }

    /// Replace the buffer. Candidates are cleared, the caret is re-clamped, and the
    /// generation is bumped so in-flight completions go stale.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.candidates.clear();
        self.caret = self.caret.min(self.len());
        self.bump_generation();
    }

    /// Clamped to `[0, len]`.
    pub fn set_caret(&mut self, caret: usize) { self.caret = caret.min(self.len()); }

    pub fn set_caret_to_end(&mut self) { self.caret = self.len(); }

    pub fn set_candidates(&mut self, candidates: impl Into<String>) {
        self.candidates = candidates.into();
    }

    pub fn clear_candidates(&mut self) { self.candidates.clear(); }

    /// Insert `text` at the caret and move the caret past it. A combining mark merges
    /// into the grapheme before it, so the caret doesn't always move.
    pub fn insert_at_caret(&mut self, text: &str) {
        let (before, after) = self.split_at_caret();
        let new_caret = grapheme_len(&format!("{before}{text}"));
        let new_buffer = format!("{before}{text}{after}");
        self.set_buffer(new_buffer);
        self.set_caret(new_caret);
    }

    /// Delete the grapheme before the caret. Returns `false` (and does nothing) at caret
    /// 0.
    pub fn delete_before_caret(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let new_caret = self.caret - 1;
        let (before, _) = split_at_caret(&self.buffer, new_caret);
        let (_, after) = self.split_at_caret();
        let new_buffer = format!("{before}{after}");
        self.set_buffer(new_buffer);
        self.set_caret(new_caret);
        true
    }

    /// Empty the buffer and candidates, caret to 0.
    pub fn reset(&mut self) {
        self.set_buffer(String::new());
        self.caret = 0;
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Enter. Snapshot the line, reset the buffer, and go to
    /// [`SessionState::Executing`].
    pub fn submit(&mut self) -> SubmitTicket {
        let line = std::mem::take(&mut self.buffer);
        self.reset();
        self.state = SessionState::Executing;
        SubmitTicket {
            generation: self.bump_generation(),
            line,
        }
    }

    /// Go back to [`SessionState::Editing`] once the command for `ticket` has finished.
    /// Returns `false` if the ticket is stale, in which case its output must be dropped.
    pub fn finish(&mut self, ticket: &SubmitTicket) -> bool {
        let is_current = self.is_busy() && ticket.generation == self.generation;
        if is_current {
            self.state = SessionState::Editing;
        }
        is_current
    }

    /// Abandon whatever is in flight: the line is emptied, the session goes back to
    /// [`SessionState::Editing`], and every outstanding ticket or completion request
    /// becomes stale.
    pub fn abort(&mut self) {
        self.reset();
        self.state = SessionState::Editing;
    }

    /// Tab.
    pub fn request_completion(&mut self) -> CompletionRequest {
        CompletionRequest {
            generation: self.bump_generation(),
            line: self.buffer.clone(),
        }
    }

    /// Apply the candidates returned for `request`.
    ///
    /// - none: line unchanged, candidates cleared.
    /// - one: the last token is replaced by the candidate, tokens are joined with single
    ///   spaces, caret to the end, candidates cleared.
    /// - many: line and caret unchanged, candidates shown.
    pub fn apply_completion(
        &mut self,
        request: &CompletionRequest,
        candidates: &[String],
    ) -> CompletionOutcome {
        if self.is_busy() || request.generation != self.generation {
            return CompletionOutcome::Stale;
        }

        match candidates {
            [] => {
                self.clear_candidates();
                CompletionOutcome::NoMatch
            }
            [only] => {
                let mut tokens = tokenize(&request.line);
                match tokens.last_mut() {
                    Some(last) => last.clone_from(only),
                    None => tokens.push(only.clone()),
                }
                self.set_buffer(tokens.join(" "));
                self.set_caret_to_end();
                CompletionOutcome::Applied
            }
            many => {
                self.set_candidates(many.join(" "));
                CompletionOutcome::Ambiguous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with(text: &str) -> LineSession {
        let mut it = LineSession::new();
        it.set_buffer(text);
        it.set_caret_to_end();
        it
    }

    #[test]
    fn test_set_buffer_clamps_caret_and_bumps_generation() {
        let mut session = session_with("hello");
        let generation = session.generation();
        session.set_buffer("hi");
        assert_eq!(session.caret(), 2);
        assert!(session.generation() > generation);
    }

    #[test]
    fn test_insert_and_delete_at_caret() {
        let mut session = session_with("held");
        session.set_caret(3);
        session.insert_at_caret("l");
        assert_eq!(session.buffer(), "helld");
        assert_eq!(session.caret(), 4);

        session.set_caret(1);
        assert!(session.delete_before_caret());
        assert_eq!(session.buffer(), "elld");
        assert_eq!(session.caret(), 0);
        assert!(!session.delete_before_caret());
        assert_eq!(session.buffer(), "elld");
    }

    #[test]
    fn test_insert_combining_mark_keeps_caret_on_its_grapheme() {
        let mut session = session_with("ex");
        session.set_caret(1);
        session.insert_at_caret("\u{301}");
        assert_eq!(session.buffer(), "e\u{301}x");
        assert_eq!(session.caret(), 1);

        session.insert_at_caret("y");
        assert_eq!(session.buffer(), "e\u{301}yx");
        assert_eq!(session.caret(), 2);
    }

    #[test]
    fn test_delete_removes_whole_grapheme() {
        let mut session = session_with("ae\u{301}");
        assert!(session.delete_before_caret());
        assert_eq!(session.buffer(), "a");
        assert_eq!(session.caret(), 1);
    }

    #[test]
    fn test_submit_and_finish() {
        let mut session = session_with("echo hi");
        session.set_candidates("x y");

        let ticket = session.submit();
        assert_eq!(ticket.line, "echo hi");
        assert!(session.is_busy());
        assert_eq!(session.buffer(), "");
        assert_eq!(session.caret(), 0);
        assert_eq!(session.candidates(), "");

        assert!(session.finish(&ticket));
        assert_eq!(session.state(), SessionState::Editing);
        assert!(!session.finish(&ticket));
    }

    #[test]
    fn test_abort_makes_ticket_stale() {
        let mut session = session_with("sleep 1000");
        let ticket = session.submit();
        session.abort();
        assert!(!session.is_busy());
        assert!(!session.finish(&ticket));
    }

    #[test]
    fn test_completion_single_candidate() {
        let mut session = session_with("run bui");
        let request = session.request_completion();
        let outcome = session.apply_completion(&request, &["build".to_string()]);
        assert_eq!(outcome, CompletionOutcome::Applied);
        assert_eq!(session.buffer(), "run build");
        assert_eq!(session.caret(), 9);
        assert_eq!(session.candidates(), "");
    }

    #[test]
    fn test_completion_on_empty_line() {
        let mut session = LineSession::new();
        let request = session.request_completion();
        session.apply_completion(&request, &["help".to_string()]);
        assert_eq!(session.buffer(), "help");
        assert_eq!(session.caret(), 4);
    }

    #[test]
    fn test_completion_many_candidates() {
        let mut session = session_with("run bu");
        session.set_caret(2);
        let request = session.request_completion();
        let outcome = session
            .apply_completion(&request, &["build".to_string(), "bundle".to_string()]);
        assert_eq!(outcome, CompletionOutcome::Ambiguous);
        assert_eq!(session.buffer(), "run bu");
        assert_eq!(session.caret(), 2);
        assert_eq!(session.candidates(), "build bundle");
    }

    #[test]
    fn test_completion_no_match_clears_candidates() {
        let mut session = session_with("zz");
        session.set_candidates("a b");
        let request = session.request_completion();
        assert_eq!(
            session.apply_completion(&request, &[]),
            CompletionOutcome::NoMatch
        );
        assert_eq!(session.candidates(), "");
        assert_eq!(session.buffer(), "zz");
    }

    #[test]
    fn test_completion_is_stale_after_edit() {
        let mut session = session_with("run bu");
        let request = session.request_completion();
        session.insert_at_caret("n");
        let outcome = session.apply_completion(&request, &["build".to_string()]);
        assert_eq!(outcome, CompletionOutcome::Stale);
        assert_eq!(session.buffer(), "run bun");
    }

    #[test]
    fn test_completion_is_stale_after_second_tab() {
        let mut session = session_with("run bu");
        let first = session.request_completion();
        let second = session.request_completion();
        assert_eq!(
            session.apply_completion(&first, &["build".to_string()]),
            CompletionOutcome::Stale
        );
        assert_eq!(
            session.apply_completion(&second, &["bundle".to_string()]),
            CompletionOutcome::Applied
        );
        assert_eq!(session.buffer(), "run bundle");
    }

    #[test]
    fn test_completion_repairs_quotes() {
        let mut session = session_with("cat 'my fi");
        let request = session.request_completion();
        session.apply_completion(&request, &["'my file.txt'".to_string()]);
        assert_eq!(session.buffer(), "cat 'my file.txt'");
    }
}
