// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `tlsh` main event loop. It waits (on the current thread) for either of:
//!
//! - An event from the terminal. Ctrl+D and Ctrl+C are handled here, everything else is
//!   converted into a [`KeyPress`] and dispatched to the [`Console`].
//! - The command that is currently running (on its own task) to finish. Its output is
//!   handed back to the console, which leaves the busy state.
//!
//! The view is repainted after each of these.

use std::{io::{Stdout, Write, stdout},
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

use crossterm::{cursor::{Hide, Show},
                event::{DisableFocusChange, EnableFocusChange, Event, EventStream,
                        KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
                execute,
                terminal::{self, EnterAlternateScreen, LeaveAlternateScreen}};
use futures_util::StreamExt;
use miette::IntoDiagnostic;
use termline::{CommandOutcome, CommonResult, Console, ConsoleConfig, EditorEvent,
               KeyPress, ModifierKeysMask, SafeClipboard, StdMutex, Submission,
               SystemClipboard, keypress, ok};
use tokio::task::{JoinError, JoinHandle};

use super::{create_command_table, create_completion_provider, layout_view, paint_rows};

/// Determine the control flow of the program based on the event received from the
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlFlow {
    /// Ctrl+D.
    EndOfInput,
    /// Ctrl+C.
    Interrupt,
    Key(KeyPress),
    Focus(bool),
    Repaint,
    Ignore,
    /// The event stream ended or failed.
    Shutdown,
}

/// Convert an item of the [`EventStream`] to a [`ControlFlow`]. This leverages the type
/// system to make it simpler to reason about what to do with the user input.
impl From<Option<std::io::Result<Event>>> for ControlFlow {
    fn from(maybe_event: Option<std::io::Result<Event>>) -> Self {
        match maybe_event {
            Some(Ok(Event::Key(key_event))) => ControlFlow::from(key_event),
            Some(Ok(Event::FocusGained)) => ControlFlow::Focus(true),
            Some(Ok(Event::FocusLost)) => ControlFlow::Focus(false),
            Some(Ok(Event::Resize(..))) => ControlFlow::Repaint,
            Some(Ok(_)) => ControlFlow::Ignore,
            Some(Err(_)) | None => ControlFlow::Shutdown,
        }
    }
}

impl From<KeyEvent> for ControlFlow {
    fn from(key_event: KeyEvent) -> Self {
        match key_event {
            KeyEvent {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                ..
            } => ControlFlow::EndOfInput,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                ..
            } => ControlFlow::Interrupt,
            _ => KeyPress::try_from(key_event).map_or(ControlFlow::Ignore, ControlFlow::Key),
        }
    }
}

/// The console plus the bits of host state around it: the task running the current
/// command, and whether `clear` asked for the scrollback to be purged.
pub struct TlshApp {
    console: Console,
    maybe_running_command: Option<JoinHandle<CommandOutcome>>,
    clear_requested: Arc<AtomicBool>,
}

impl std::fmt::Debug for TlshApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlshApp")
            .field("console", &self.console)
            .field("running", &self.maybe_running_command.is_some())
            .finish_non_exhaustive()
    }
}

impl TlshApp {
    #[must_use]
    pub fn new(config: ConsoleConfig, safe_clipboard: SafeClipboard) -> Self {
        let clear_requested = Arc::new(AtomicBool::new(false));
        let commands = create_command_table(&config.clear_keyword);
        let provider = create_completion_provider(&config.clear_keyword);

        let mut console = Console::new(config, commands)
            .with_completion_provider(provider)
            .with_clipboard(safe_clipboard)
            .with_clear_callback({
                let clear_requested = Arc::clone(&clear_requested);
                move || clear_requested.store(true, Ordering::SeqCst)
            });
        console.set_focused(true);

        Self {
            console,
            maybe_running_command: None,
            clear_requested,
        }
    }

    #[must_use]
    pub fn console(&self) -> &Console { &self.console }

    #[must_use]
    pub fn is_command_running(&self) -> bool { self.maybe_running_command.is_some() }

    /// Returns `true` once after each `clear`.
    #[must_use]
    pub fn take_clear_request(&self) -> bool {
        self.clear_requested.swap(false, Ordering::SeqCst)
    }

    /// Returns `Ok(false)` when the app should exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails (eg: a poisoned lock).
    pub async fn handle_control_flow(
        &mut self,
        control_flow: ControlFlow,
    ) -> CommonResult<bool> {
        match control_flow {
            ControlFlow::Shutdown => return ok!(false),
            ControlFlow::EndOfInput => {
                let session = self.console.session();
                if !session.is_busy() && session.is_empty() {
                    return ok!(false);
                }
            }
            ControlFlow::Interrupt => match self.maybe_running_command.take() {
                Some(handle) => {
                    handle.abort();
                    self.console.abort_pending();
                }
                None => {
                    // A terminal has no selection to speak of, so copy the line.
                    let line = self.console.session().buffer().to_string();
                    self.console.set_selection(line);
                    self.dispatch(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'c'))
                        .await?;
                }
            },
            ControlFlow::Key(key_press) => self.dispatch(key_press).await?,
            ControlFlow::Focus(focused) => self.console.set_focused(focused),
            ControlFlow::Repaint | ControlFlow::Ignore => {}
        }
        ok!(true)
    }

    async fn dispatch(&mut self, key_press: KeyPress) -> CommonResult<()> {
        match self.console.dispatch_key(key_press)? {
            EditorEvent::Submitted(ticket) => {
                if let Submission::Pending(pending_command) =
                    self.console.begin_submission(ticket)?
                {
                    self.maybe_running_command =
                        Some(tokio::spawn(pending_command.execute()));
                }
            }
            EditorEvent::CompletionRequested(request) => {
                self.console.complete(&request).await;
            }
            EditorEvent::CopyRequested => {
                if let Err(report) = self.console.copy_selection() {
                    // % is Display, ? is Debug.
                    tracing::warn!(message = "copy failed", error = ?report);
                }
            }
            EditorEvent::Edited
            | EditorEvent::PasteSwallowed
            | EditorEvent::Unhandled(_)
            | EditorEvent::Ignored(_) => {}
        }
        ok!()
    }

    /// The command task is done (or was cancelled).
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript lock is poisoned.
    pub fn handle_command_finished(
        &mut self,
        join_result: Result<CommandOutcome, JoinError>,
    ) -> CommonResult<()> {
        self.maybe_running_command = None;
        match join_result {
            Ok(outcome) => {
                self.console.finish_submission(outcome)?;
            }
            Err(join_error) => {
                tracing::warn!(message = "command task did not finish", error = ?join_error);
                self.console.abort_pending();
            }
        }
        ok!()
    }

    /// Resolves when the running command finishes. Never resolves if nothing runs.
    /// Cancel safe, since awaiting a `&mut JoinHandle` is.
    pub async fn join_running_command(&mut self) -> Result<CommandOutcome, JoinError> {
        join_running_command(&mut self.maybe_running_command).await
    }

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    pub fn paint(&self, stdout: &mut impl Write) -> CommonResult<()> {
        let (_columns, rows) = terminal::size().into_diagnostic()?;
        let purge = self.take_clear_request();
        paint_rows(stdout, &layout_view(&self.console.view()?), rows, purge)
    }
}

async fn join_running_command(
    maybe_handle: &mut Option<JoinHandle<CommandOutcome>>,
) -> Result<CommandOutcome, JoinError> {
    match maybe_handle {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Raw mode, alternate screen, focus events, hidden cursor (the caret is drawn by
/// [`layout_view`]). All undone on drop.
struct RawTerminalGuard;

impl RawTerminalGuard {
    fn try_new(stdout: &mut Stdout) -> CommonResult<Self> {
        terminal::enable_raw_mode().into_diagnostic()?;
        execute!(stdout, EnterAlternateScreen, EnableFocusChange, Hide).into_diagnostic()?;
        ok!(Self)
    }
}

impl Drop for RawTerminalGuard {
    fn drop(&mut self) {
        // We don't care about the result of the following operations.
        let mut stdout = stdout();
        execute!(stdout, Show, DisableFocusChange, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Run `tlsh` until Ctrl+D (on an empty line) or the terminal goes away.
///
/// # Errors
///
/// Returns an error if the terminal is not interactive, or can't be written to.
pub async fn run_tlsh(config: ConsoleConfig) -> CommonResult<()> {
    let safe_clipboard: SafeClipboard = Arc::new(StdMutex::new(SystemClipboard));
    let mut app = TlshApp::new(config, safe_clipboard);

    let mut stdout = stdout();
    let _guard = RawTerminalGuard::try_new(&mut stdout)?;
    let mut event_stream = EventStream::new();

    app.paint(&mut stdout)?;

    loop {
        tokio::select! {
            // Branch: Monitor the terminal for user input. This is cancel safe as
            // `next()` is cancel safe.
            maybe_event = event_stream.next() => {
                let control_flow = ControlFlow::from(maybe_event);
                if !app.handle_control_flow(control_flow).await? {
                    break;
                }
            }

            // Branch: Monitor the running command, if any.
            join_result = app.join_running_command() => {
                app.handle_command_finished(join_result)?;
            }
        }

        app.paint(&mut stdout)?;
    }

    if let Some(handle) = app.maybe_running_command.take() {
        handle.abort();
    }

    ok!()
}
