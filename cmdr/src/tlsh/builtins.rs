// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The commands `tlsh` ships with.

use std::{sync::Arc, time::Duration};

use termline::{CommandTable, CommonError, CommonErrorType, CommonResult,
               CompletionProvider, Fragment, ok, prefix_completion_provider};

use super::ui_str;

pub const ECHO: &str = "echo";
pub const HELP: &str = "help";
pub const ABOUT: &str = "about";
pub const SLEEP: &str = "sleep";
pub const FAIL: &str = "fail";

pub const BUILTIN_COMMANDS: [&str; 5] = [ECHO, HELP, ABOUT, SLEEP, FAIL];

/// Used by `sleep` without args.
pub const DEFAULT_SLEEP_MILLIS: u64 = 1_000;

/// Everything a user can type as the first word: the built-ins and the clear keyword
/// (when there is one), sorted.
#[must_use]
pub fn command_names(clear_keyword: &str) -> Vec<String> {
    let mut names: Vec<String> = BUILTIN_COMMANDS.iter().map(ToString::to_string).collect();
    if !clear_keyword.is_empty() {
        names.push(clear_keyword.to_string());
    }
    names.sort();
    names.dedup();
    names
}

/// The built-in command table. Unknown names end up in the error handler.
#[must_use]
pub fn create_command_table(clear_keyword: &str) -> CommandTable {
    let help_text = Arc::new(ui_str::help_msg(&command_names(clear_keyword)));

    CommandTable::default()
        .with_dynamic(ECHO, |args| async move { ok!(Fragment::from(args)) })
        .with_dynamic(HELP, move |_args| {
            let help_text = Arc::clone(&help_text);
            async move { ok!(Fragment::Text(help_text.to_string())) }
        })
        .with_static(ABOUT, ui_str::ABOUT_MSG)
        .with_dynamic(SLEEP, run_sleep)
        .with_dynamic(FAIL, |args| async move {
            CommonError::new_error_result(
                CommonErrorType::CommandExecutionError,
                &ui_str::fail_msg(&args),
            )
        })
        .with_dynamic_error_handler(|name, _args| async move {
            ok!(Fragment::from(ui_str::command_not_found_msg(&name)))
        })
}

/// Completes the last word of the line against [`command_names`].
#[must_use]
pub fn create_completion_provider(clear_keyword: &str) -> CompletionProvider {
    prefix_completion_provider(command_names(clear_keyword))
}

/// `sleep [millis]`. Keeps the console busy, so there is something to Ctrl+C.
async fn run_sleep(args: String) -> CommonResult<Fragment> {
    let millis = parse_millis(&args)?;
    tokio::time::sleep(Duration::from_millis(millis)).await;
    ok!(Fragment::from(ui_str::slept_msg(millis)))
}

fn parse_millis(args: &str) -> CommonResult<u64> {
    let args = args.trim();
    if args.is_empty() {
        return ok!(DEFAULT_SLEEP_MILLIS);
    }
    match args.parse::<u64>() {
        Ok(millis) => ok!(millis),
        Err(_) => CommonError::new_error_result(
            CommonErrorType::InvalidArguments,
            &ui_str::sleep_invalid_args_msg(args),
        ),
    }
}
