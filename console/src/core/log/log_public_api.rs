// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;
use tracing_core::LevelFilter;

use super::TracingConfig;
use crate::ok;

/// Global default subscriber, which once set, can't be unset or changed. This is what
/// the `tlsh` binary uses.
///
/// Logging is **DISABLED** by **default**. Passing [`LevelFilter::OFF`] is a no-op.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been installed.
pub fn try_initialize_logging_global(
    options: impl Into<TracingConfig>,
) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    if matches!(it.get_level_filter(), LevelFilter::OFF) {
        return ok!();
    }

    it.install_global()
}

/// Thread local subscriber. This is what tests use, so each test can capture (or
/// discard) its own log output. The subscriber is removed when the guard is dropped.
///
/// Logging is **DISABLED** by **default**. Passing [`LevelFilter::OFF`] returns
/// `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let it: TracingConfig = options.into();

    if matches!(it.get_level_filter(), LevelFilter::OFF) {
        return Ok(None);
    }

    it.install_thread_local().map(Some)
}
