// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Install a graphical [`miette`] report handler for binaries that host the console.
//! The hook is lazy: the terminal width is only queried when a report is actually
//! displayed.

use miette::MietteHandlerOpts;
use tracing::debug;

/// The [`miette::ErrorHook`] is lazily evaluated.
///
/// The terminal width will be calculated just at the time of the global error handler
/// being used. So if an error never occurs, then the terminal width will never be
/// calculated.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(move |_report| {
        let terminal_width = {
            let it = crossterm::terminal::size()
                .map(|(columns, _rows)| columns)
                .unwrap_or(80);
            let it = usize::from(it);
            debug!(message = "miette::set_hook", terminal_width = it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
