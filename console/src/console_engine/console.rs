// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{CommandOutcome, CommandTable, CommonResult, CompletionOutcome,
            CompletionProvider, CompletionRequest, ConsoleConfig, ConsoleError,
            ConsoleView, CurrentLineView, EditorEvent, Fragment, History,
            InMemoryTranscript, InputGate, Invocation, KeyPress, LineSession,
            PendingCommand, SafeClipboard, SafeHistory, SafeTranscript, StdMutex, SubmitTicket, Submission, Transcript,
            fetch_candidates, lock_or_report, ok, split_command_and_args};

/// Called after the clear keyword wiped the transcript, eg: to clear the screen.
pub type ClearCallback = Arc<dyn Fn() + Send + Sync>;

/// The whole engine: a [`LineSession`], the history and transcript stores, the command
/// table, and the optional providers. Hosts feed it [`KeyPress`]es and paint its
/// [`ConsoleView`].
///
/// There are two ways to drive it.
///
/// 1. [`Console::handle_key`] does everything inline, including awaiting completion and
///    command handlers. Simple, but no keys are read while a command runs.
/// 2. [`Console::dispatch_key`] only edits the line. On
///    [`EditorEvent::Submitted`] the host calls [`Console::begin_submission`], runs
///    [`PendingCommand::execute`] wherever it likes, and hands the outcome to
///    [`Console::finish_submission`]. Keys dispatched in the meantime are answered with
///    [`crate::IgnoreReason::Busy`].
pub struct Console {
    config: ConsoleConfig,
    session: LineSession,
    focused: bool,
    selection: String,
    commands: CommandTable,
    safe_history: SafeHistory,
    safe_transcript: SafeTranscript,
    maybe_completion_provider: Option<CompletionProvider>,
    maybe_clear_callback: Option<ClearCallback>,
    maybe_clipboard: Option<SafeClipboard>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("focused", &self.focused)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Starts unfocused, with an in-memory [`History`] and transcript.
    #[must_use]
    pub fn new(config: ConsoleConfig, commands: CommandTable) -> Self {
        Self {
            config,
            session: LineSession::new(),
            focused: false,
            selection: String::new(),
            commands,
            safe_history: Arc::new(StdMutex::new(History::default())),
            safe_transcript: Arc::new(StdMutex::new(InMemoryTranscript::default())),
            maybe_completion_provider: None,
            maybe_clear_callback: None,
            maybe_clipboard: None,
        }
    }

    #[must_use]
    pub fn with_history(mut self, safe_history: SafeHistory) -> Self {
        self.safe_history = safe_history;
        self
    }

    #[must_use]
    pub fn with_transcript(mut self, safe_transcript: SafeTranscript) -> Self {
        self.safe_transcript = safe_transcript;
        self
    }

    #[must_use]
    pub fn with_completion_provider(mut self, provider: CompletionProvider) -> Self {
        self.maybe_completion_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn with_clear_callback(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.maybe_clear_callback = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, safe_clipboard: SafeClipboard) -> Self {
        self.maybe_clipboard = Some(safe_clipboard);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig { &self.config }

    #[must_use]
    pub fn session(&self) -> &LineSession { &self.session }

    #[must_use]
    pub fn commands(&self) -> &CommandTable { &self.commands }

    #[must_use]
    pub fn is_focused(&self) -> bool { self.focused }

    pub fn set_focused(&mut self, focused: bool) { self.focused = focused; }

    pub fn set_input_enabled(&mut self, enable_input: bool) {
        self.config.enable_input = enable_input;
    }

    /// The text the host currently has selected. Ctrl/Cmd + C copies this.
    pub fn set_selection(&mut self, selection: impl Into<String>) {
        self.selection = selection.into();
    }

    #[must_use]
    pub fn input_gate(&self) -> InputGate {
        InputGate {
            focused: self.focused,
            input_enabled: self.config.enable_input,
        }
    }

    /// Edit the line. Doesn't await anything, see [`Console::handle_key`] for the
    /// follow ups each event needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the history lock is poisoned.
    pub fn dispatch_key(&mut self, key_press: KeyPress) -> CommonResult<EditorEvent> {
        let gate = self.input_gate();
        self.session.apply_key(key_press, gate, &self.safe_history)
    }

    /// Dispatch a key and do whatever it asks for: completion, running the submitted
    /// command, copying the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if a store lock is poisoned or the clipboard fails. Handler
    /// failures are not errors, they end up in the transcript.
    pub async fn handle_key(&mut self, key_press: KeyPress) -> CommonResult<EditorEvent> {
        let event = self.dispatch_key(key_press)?;

        match &event {
            EditorEvent::CompletionRequested(request) => {
                self.complete(request).await;
            }
            EditorEvent::Submitted(ticket) => {
                if let Submission::Pending(pending_command) =
                    self.begin_submission(ticket.clone())?
                {
                    let outcome = pending_command.execute().await;
                    self.finish_submission(outcome)?;
                }
            }
            EditorEvent::CopyRequested => self.copy_selection()?,
            EditorEvent::Edited
            | EditorEvent::PasteSwallowed
            | EditorEvent::Unhandled(_)
            | EditorEvent::Ignored(_) => {}
        }

        Ok(event)
    }

    /// Ask the completion provider and apply its answer, unless the line moved on in
    /// the meantime.
    pub async fn complete(&mut self, request: &CompletionRequest) -> CompletionOutcome {
        let candidates = fetch_candidates(
            self.maybe_completion_provider.as_ref(),
            request.line.clone(),
        )
        .await;

        let outcome = self.session.apply_completion(request, &candidates);
        tracing::debug!(
            message = "complete",
            line = %request.line,
            candidates = ?candidates,
            outcome = ?outcome
        );
        outcome
    }

    /// First half of running a submitted line. Records it in history, then either
    /// handles the clear keyword, or commits a provisional transcript entry and resolves
    /// the command.
    ///
    /// # Errors
    ///
    /// Returns an error if a store lock is poisoned.
    pub fn begin_submission(&mut self, ticket: SubmitTicket) -> CommonResult<Submission> {
        lock_or_report!(self.safe_history, "history").append_command(&ticket.line);

        let (name, args) = split_command_and_args(&ticket.line);
        tracing::info!(message = "submit", line = %ticket.line, name = %name, args = %args);

        if !name.is_empty() && name == self.config.clear_keyword {
            lock_or_report!(self.safe_transcript, "transcript").set(Transcript::default());
            self.session.finish(&ticket);
            if let Some(callback) = &self.maybe_clear_callback {
                callback();
            }
            return Ok(Submission::Cleared);
        }

        let mut transcript = lock_or_report!(self.safe_transcript, "transcript").get();
        // Only a truly empty line skips the table. A line of spaces still reaches the
        // fallbacks, with an empty name.
        let invocation = if ticket.line.is_empty() {
            Invocation::Ready(Fragment::Empty)
        } else {
            self.commands
                .resolve(&name, &args, || transcript.text_content())
        };
        transcript.push(Transcript::provisional_entry(&self.config.prompt, &ticket.line));
        lock_or_report!(self.safe_transcript, "transcript").set(transcript);

        Ok(Submission::Pending(PendingCommand {
            ticket,
            name,
            invocation,
        }))
    }

    /// Second half. Swaps the provisional entry for the final one and goes back to
    /// editing. Returns `false` if the outcome is stale (see [`Console::abort_pending`]),
    /// in which case it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript lock is poisoned.
    pub fn finish_submission(&mut self, outcome: CommandOutcome) -> CommonResult<bool> {
        let CommandOutcome { ticket, output } = outcome;

        if !self.session.finish(&ticket) {
            tracing::debug!(
                message = "dropping stale command output",
                line = %ticket.line,
                generation = ticket.generation,
                current_generation = self.session.generation()
            );
            return Ok(false);
        }

        let entry = Transcript::final_entry(&self.config.prompt, &ticket.line, output);
        let mut store = lock_or_report!(self.safe_transcript, "transcript");
        let mut transcript = store.get();
        transcript.replace_last(entry);
        store.set(transcript);
        Ok(true)
    }

    /// Stop waiting for the running command. Its output will be dropped when it arrives,
    /// and the provisional transcript entry stays as is.
    pub fn abort_pending(&mut self) {
        if self.session.is_busy() {
            tracing::info!(message = "abort pending command");
        }
        self.session.abort();
    }

    /// Put the host's selection on the clipboard. A no-op without a clipboard service.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Clipboard`] if the clipboard service fails.
    pub fn copy_selection(&mut self) -> CommonResult<()> {
        let Some(safe_clipboard) = &self.maybe_clipboard else {
            return ok!();
        };

        lock_or_report!(safe_clipboard, "clipboard")
            .try_to_put_content_into_clipboard(self.selection.clone())
            .map_err(|error| {
                miette::Report::new(ConsoleError::Clipboard {
                    message: error.to_string(),
                })
            })
    }

    /// Snapshot of what to draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript lock is poisoned.
    pub fn view(&self) -> CommonResult<ConsoleView> {
        let busy = self.session.is_busy();
        let (before_caret, after_caret) = if busy {
            ("", "")
        } else {
            self.session.split_at_caret()
        };

        Ok(ConsoleView {
            welcome_message: self.config.welcome_message.clone(),
            transcript: lock_or_report!(self.safe_transcript, "transcript").get(),
            current_line: CurrentLineView {
                prompt: self.config.prompt.clone(),
                before_caret: before_caret.to_string(),
                after_caret: after_caret.to_string(),
                show_caret: self.focused && self.config.show_caret,
                busy,
            },
            candidates: self.session.candidates().to_string(),
        })
    }

    /// Plain text of the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript lock is poisoned.
    pub fn transcript_text(&self) -> CommonResult<String> {
        Ok(lock_or_report!(self.safe_transcript, "transcript")
            .get()
            .text_content())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{ErrorHandler, IgnoreReason, SpecialKey, TestClipboard,
                UnavailableClipboard, keypress};
    use pretty_assertions::assert_eq;

    async fn type_line(console: &mut Console, text: &str) {
        for ch in text.chars() {
            console.handle_key(keypress!(@char ch)).await.unwrap();
        }
    }

    async fn submit(console: &mut Console, text: &str) {
        type_line(console, text).await;
        console
            .handle_key(keypress!(@special SpecialKey::Enter))
            .await
            .unwrap();
    }

    fn echo_console() -> Console {
        let commands = CommandTable::default()
            .with_dynamic("echo", |args| async move { Ok(Fragment::from(args)) });
        let mut console = Console::new(ConsoleConfig::default(), commands);
        console.set_focused(true);
        console
    }

    #[tokio::test]
    async fn test_echo() {
        let mut console = echo_console();
        submit(&mut console, "echo hi").await;
        assert_eq!(console.transcript_text().unwrap(), "$ \necho hi\nhi");
        assert_eq!(console.session().buffer(), "");
        assert!(!console.session().is_busy());
    }

    #[tokio::test]
    async fn test_unfocused_console_ignores_keys() {
        let mut console = echo_console();
        console.set_focused(false);
        let event = console.handle_key(keypress!(@char 'x')).await.unwrap();
        assert_eq!(event, EditorEvent::Ignored(IgnoreReason::NotFocused));
        assert_eq!(console.session().buffer(), "");
    }

    #[tokio::test]
    async fn test_clear_wipes_transcript_and_calls_back() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let mut console = echo_console().with_clear_callback(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        submit(&mut console, "echo a").await;
        submit(&mut console, "clear now").await;

        assert_eq!(console.transcript_text().unwrap(), "");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(console.session().buffer(), "");
        assert_eq!(console.session().caret(), 0);
        assert!(!console.session().is_busy());
    }

    #[tokio::test]
    async fn test_split_style_with_abort() {
        let mut console = echo_console();
        type_line(&mut console, "echo late").await;
        let EditorEvent::Submitted(ticket) = console
            .dispatch_key(keypress!(@special SpecialKey::Enter))
            .unwrap()
        else {
            panic!("expected submission");
        };

        let Submission::Pending(pending) = console.begin_submission(ticket).unwrap() else {
            panic!("expected pending command");
        };
        assert_eq!(
            console.dispatch_key(keypress!(@char 'x')).unwrap(),
            EditorEvent::Ignored(IgnoreReason::Busy)
        );
        assert!(console.view().unwrap().current_line.busy);

        console.abort_pending();
        let outcome = pending.execute().await;
        assert!(!console.finish_submission(outcome).unwrap());
        assert_eq!(console.transcript_text().unwrap(), "$ \necho late");
    }

    #[tokio::test]
    async fn test_copy_selection() {
        let clipboard = Arc::new(StdMutex::new(TestClipboard::default()));
        let mut console = echo_console().with_clipboard(clipboard.clone());
        console.set_selection("selected text");

        let ctrl_c = keypress!(@char crate::ModifierKeysMask::new().with_ctrl(), 'c');
        console.handle_key(ctrl_c).await.unwrap();
        assert_eq!(clipboard.lock().unwrap().content, "selected text");
    }

    #[tokio::test]
    async fn test_copy_selection_failure_is_reported() {
        let clipboard = Arc::new(StdMutex::new(UnavailableClipboard));
        let mut console = echo_console().with_clipboard(clipboard);
        let report = console.copy_selection().unwrap_err();
        assert!(matches!(
            report.downcast_ref::<ConsoleError>(),
            Some(ConsoleError::Clipboard { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_error_handler() {
        let commands = CommandTable::default()
            .with_error_handler(ErrorHandler::Static("??".into()));
        let mut console = Console::new(ConsoleConfig::default(), commands);
        console.set_focused(true);
        submit(&mut console, "foo").await;
        assert_eq!(console.transcript_text().unwrap(), "$ \nfoo\n??");
    }

    #[tokio::test]
    async fn test_view_hides_caret_when_unfocused() {
        let mut console = echo_console();
        type_line(&mut console, "ab").await;
        assert!(console.view().unwrap().current_line.show_caret);
        console.set_focused(false);
        assert!(!console.view().unwrap().current_line.show_caret);
        assert_eq!(console.view().unwrap().current_line.before_caret, "ab");
    }
}
