// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given block or stmt so that it returns a `Result<()>`. It is just syntactic
/// sugar that helps having to write `Ok(())` repeatedly at the end of each function.
///
/// ```rust
/// use termline::{throws, CommonResult};
///
/// fn submit() -> CommonResult<()> {
///     throws!({
///         let line = "echo hi".to_string();
///         assert!(!line.is_empty());
///     });
/// }
/// # submit().unwrap();
/// ```
#[macro_export]
macro_rules! throws {
  ($it: block) => {{
    $it
    return Ok(())
  }};
  ($it: stmt) => {{
    $it
    return Ok(())
  }};
}

/// Short for `Ok(())` or `Ok(value)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Lock a [`crate::StdMutex`] and convert a poisoned lock into a
/// [`crate::ConsoleError::LockPoisoned`] report, so callers can use `?` instead of
/// `.unwrap()`.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use termline::{lock_or_report, CommonResult};
///
/// fn bump(counter: &Arc<Mutex<u8>>) -> CommonResult<u8> {
///     let mut it = lock_or_report!(counter, "counter");
///     *it += 1;
///     Ok(*it)
/// }
/// # assert_eq!(bump(&Arc::new(Mutex::new(0))).unwrap(), 1);
/// ```
#[macro_export]
macro_rules! lock_or_report {
    ($mutex: expr, $what: expr) => {
        $mutex.lock().map_err(|_| {
            miette::Report::new($crate::ConsoleError::LockPoisoned {
                resource: $what.to_string(),
            })
        })?
    };
}
