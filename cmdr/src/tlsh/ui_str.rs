// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Stylize;
use miette::Report;

pub const WELCOME_MSG: &str =
    "tlsh: type `help` to list commands, Tab to complete, Ctrl+D to exit.";

pub const ABOUT_MSG: &str =
    "tlsh hosts the termline engine in a terminal. Commands run async; while one runs the \
     prompt is busy, and Ctrl+C abandons it.";

#[must_use]
pub fn command_not_found_msg(name: &str) -> String { format!("command not found: {name}") }

#[must_use]
pub fn help_msg(names: &[String]) -> String {
    format!("Available commands: {}", names.join(", "))
}

#[must_use]
pub fn slept_msg(millis: u64) -> String { format!("slept for {millis}ms") }

#[must_use]
pub fn sleep_invalid_args_msg(args: &str) -> String {
    format!("sleep expects a number of milliseconds, got `{args}`")
}

#[must_use]
pub fn fail_msg(args: &str) -> String {
    if args.is_empty() {
        "this command always fails".to_string()
    } else {
        format!("this command always fails ({args})")
    }
}

/// Shown after the terminal is restored.
#[must_use]
pub fn goodbye_msg() -> String {
    let plain_text_exit_msg = match std::env::var("USER") {
        Ok(username) => format!("Goodbye, {username}. Thanks for using tlsh!"),
        Err(_) => "Thanks for using tlsh!".to_owned(),
    };
    plain_text_exit_msg.green().to_string()
}

/// Unknown and unrecoverable errors, eg: the terminal is not interactive.
#[must_use]
pub fn unrecoverable_error_msg(report: Report) -> String {
    format!(
        "{a}:\n{b:?}",
        a = "Could not run tlsh due to the following problem".red().bold(),
        b = report
    )
}
