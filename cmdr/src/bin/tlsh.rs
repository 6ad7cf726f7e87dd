// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

use clap::Parser;
use termline::{CommonResult, TracingConfig, WriterConfig, ok,
               setup_default_miette_global_report_handler,
               try_initialize_logging_global};
use termline_cmdr::{CLIArg, TLSH_ISSUES_URL, run_tlsh, ui_str};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Logs go to a file, since the terminal is busy showing the console.
const LOG_FILE_NAME: &str = "tlsh.log";

#[tokio::main]
async fn main() -> CommonResult<()> {
    setup_default_miette_global_report_handler(TLSH_ISSUES_URL);

    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    if should_log {
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::File(LOG_FILE_NAME.to_string()),
            level_filter: tracing_core::LevelFilter::DEBUG,
        };
        try_initialize_logging_global(tracing_config).ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let config = cli_arg.try_into_console_config()?;

    match run_tlsh(config).await {
        Ok(()) => println!("{}", ui_str::goodbye_msg()),
        // This branch is for strange errors like terminal not interactive.
        Err(report) => {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "Could not run tlsh due to the following problem",
                error = ?report
            );
            println!("{}", ui_str::unrecoverable_error_msg(report));
        }
    }

    if should_log {
        tracing::debug!(message = "Stop logging...");
    }

    ok!()
}
