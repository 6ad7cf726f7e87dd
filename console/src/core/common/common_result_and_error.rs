// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

use std::{error::Error,
          fmt::{Debug, Display, Formatter, Result}};

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`].
///
/// - It is basically `miette::Result<T, miette::Report>`.
/// - Works hand in hand w/ [`CommonError`], [`crate::ConsoleError`] and any other type
///   of error, including the ones returned by command handlers.
pub type CommonResult<T> = miette::Result<T>;

/// Common error struct, used when a command handler or host wants to fail with a
/// category and a message, without defining its own error type.
///
/// # Example
///
/// ```
/// use termline::{CommonError, CommonErrorType, CommonResult};
///
/// fn parse_millis(args: &str) -> CommonResult<u64> {
///     match args.trim().parse::<u64>() {
///         Ok(it) => Ok(it),
///         Err(_) => CommonError::new_error_result(
///             CommonErrorType::InvalidArguments,
///             &format!("not a number: {args}"),
///         ),
///     }
/// }
///
/// assert_eq!(parse_millis("25").unwrap(), 25);
/// assert!(parse_millis("soon").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CommonError {
    pub error_type: CommonErrorType,
    pub error_message: Option<String>,
}

/// Some common errors that can occur.
#[non_exhaustive]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonErrorType {
    #[default]
    General,
    InvalidArguments,
    InvalidState,
    IOError,
    NotFound,
    CommandExecutionError,
    ConfigFolderPathCouldNotBeGenerated,
}

/// Implement [`Error`] trait.
impl Error for CommonError {}

/// Implement [`Display`] trait (needed by [`Error`] trait). Shows the message when there
/// is one, since that is what ends up in a handler failure fragment.
impl Display for CommonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.error_message {
            Some(msg) => write!(f, "{msg}"),
            None => Debug::fmt(&self.error_type, f),
        }
    }
}

impl CommonError {
    /// Both [`CommonError::error_type`] and [`CommonError::error_message`] available.
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result<T>(err_type: CommonErrorType, msg: &str) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: err_type,
            error_message: Some(msg.to_string()),
        }))
    }

    /// Only [`CommonError::error_type`] available, and no [`CommonError::error_message`].
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result_with_only_type<T>(
        err_type: CommonErrorType,
    ) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: err_type,
            error_message: None,
        }))
    }

    /// Only [`CommonError::error_message`] available, and no [`CommonError::error_type`].
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result_with_only_msg<T>(msg: &str) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: CommonErrorType::default(),
            error_message: Some(msg.to_string()),
        }))
    }
}
