// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::{Fragment, Invocation, SubmitTicket};

/// What [`crate::Console::begin_submission`] did with a submitted line.
#[derive(Debug)]
pub enum Submission {
    /// The clear keyword. The transcript is already wiped and the session is editing
    /// again. Nothing to run.
    Cleared,
    /// Run [`PendingCommand::execute`] (inline, or on a task), then hand the outcome to
    /// [`crate::Console::finish_submission`].
    Pending(PendingCommand),
}

/// A resolved command that hasn't produced its output yet. Owns everything it needs, so
/// it can be moved to another task.
#[derive(Debug)]
pub struct PendingCommand {
    pub ticket: SubmitTicket,
    pub name: String,
    pub invocation: Invocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub ticket: SubmitTicket,
    pub output: Fragment,
}

impl PendingCommand {
    /// Await the handler. Never fails: a handler error (or panic) becomes a
    /// [`Fragment::HandlerFailure`] output.
    pub async fn execute(self) -> CommandOutcome {
        let Self {
            ticket,
            name,
            invocation,
        } = self;

        let output = match invocation {
            Invocation::Ready(output) => output,
            Invocation::Deferred(future) => {
                match AssertUnwindSafe(future).catch_unwind().await {
                    Ok(Ok(output)) => output,
                    Ok(Err(report)) => {
                        tracing::error!(
                            message = "command handler failed",
                            command = %name,
                            error = ?report
                        );
                        Fragment::HandlerFailure {
                            command: name,
                            message: report.to_string(),
                        }
                    }
                    Err(panic_payload) => {
                        let message = panic_message(panic_payload.as_ref());
                        tracing::error!(
                            message = "command handler panicked",
                            command = %name,
                            panic = %message
                        );
                        Fragment::HandlerFailure {
                            command: name,
                            message,
                        }
                    }
                }
            }
        };

        CommandOutcome { ticket, output }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(it) = payload.downcast_ref::<&str>() {
        (*it).to_string()
    } else if let Some(it) = payload.downcast_ref::<String>() {
        it.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandTable, CommonError};
    use pretty_assertions::assert_eq;

    fn pending(table: &CommandTable, name: &str) -> PendingCommand {
        PendingCommand {
            ticket: SubmitTicket {
                generation: 1,
                line: name.to_string(),
            },
            name: name.to_string(),
            invocation: table.resolve(name, "", String::new),
        }
    }

    #[tokio::test]
    async fn test_handler_error_is_rendered() {
        let table = CommandTable::default().with_dynamic("fail", |_| async {
            CommonError::new_error_result_with_only_msg("boom")
        });
        let outcome = pending(&table, "fail").execute().await;
        assert_eq!(
            outcome.output,
            Fragment::HandlerFailure {
                command: "fail".into(),
                message: "boom".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_handler_panic_is_rendered() {
        let table = CommandTable::default().with_dynamic("oops", |_| async {
            let state: Option<&str> = None;
            Ok(Fragment::from(state.expect("bad state")))
        });
        let outcome = pending(&table, "oops").execute().await;
        assert_eq!(
            outcome.output,
            Fragment::HandlerFailure {
                command: "oops".into(),
                message: "bad state".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_execute_is_spawnable() {
        let table = CommandTable::default()
            .with_dynamic("echo", |_| async { Ok(Fragment::from("spawned")) });
        let handle = tokio::spawn(pending(&table, "echo").execute());
        let outcome = handle.await.unwrap();
        assert_eq!(outcome.output, Fragment::from("spawned"));
        assert_eq!(outcome.ticket.generation, 1);
    }
}
