// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Anything that converts [`Into<TracingConfig>`] can be passed to
/// [`crate::try_initialize_logging_global`]:
///
/// ```no_run
/// use termline::{DisplayPreference, TracingConfig, WriterConfig,
///                try_initialize_logging_global};
///
/// let config_1: TracingConfig = tracing_core::LevelFilter::DEBUG.into();
/// let config_2: TracingConfig = DisplayPreference::Stderr.into();
/// let config_3: TracingConfig = WriterConfig::File("tlsh.log".to_string()).into();
///
/// try_initialize_logging_global(config_1 + config_2 + config_3).ok();
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The `String` is the file path (and prefix) of the log file, eg: `log.txt` or
/// `/tmp/tlsh.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

/// Raw mode terminals (like the one `tlsh` runs in) should log to [`Self::Stderr`] or a
/// file, never to stdout, since that is where the console is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// Merge two [`TracingConfig`] instances together. The more verbose level filter wins.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two [`WriterConfig`] instances together. The `rhs` clobbers the `self` when
/// both set the same thing, ie: the value in `rhs` has higher specificity.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            // No collision merge.
            (None, wc_rhs) => wc_rhs,
            (wc_lhs, None) => wc_lhs,
            (Display(dp_lhs), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
            (File(f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),

            // Collision (rhs has higher specificity).
            (Display(_), Display(dp_rhs)) => Display(dp_rhs),
            (File(_), File(f_rhs)) => File(f_rhs),
            (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(dp_rhs, f_rhs)) => {
                DisplayAndFile(dp_rhs, f_rhs)
            }
            (DisplayAndFile(_, f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),
            (DisplayAndFile(dp_lhs, _), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
        }
    }
}
