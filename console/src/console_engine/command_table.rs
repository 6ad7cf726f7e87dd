// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, fmt::Debug, future::Future, sync::Arc};

use futures_util::{FutureExt, future::BoxFuture};

use crate::{CommonResult, Fragment};

/// `(args) -> output`.
pub type CommandHandler =
    Arc<dyn Fn(String) -> BoxFuture<'static, CommonResult<Fragment>> + Send + Sync>;

/// `(name, args, transcript_text) -> output`. Used when the name is not in the table.
/// `transcript_text` is the plain text of the scrollback before the current entry.
pub type DefaultHandler = Arc<
    dyn Fn(String, String, String) -> BoxFuture<'static, CommonResult<Fragment>>
        + Send
        + Sync,
>;

/// `(name, args) -> output`.
pub type ErrorHandlerFn =
    Arc<dyn Fn(String, String) -> BoxFuture<'static, CommonResult<Fragment>> + Send + Sync>;

#[derive(Clone)]
pub enum CommandEntry {
    Static(Fragment),
    Dynamic(CommandHandler),
}

/// Last resort when the name is unknown and there is no default handler.
#[derive(Clone)]
pub enum ErrorHandler {
    Static(Fragment),
    Dynamic(ErrorHandlerFn),
}

/// What running a command boils down to: either the output is already known, or a
/// future has to be awaited for it.
pub enum Invocation {
    Ready(Fragment),
    Deferred(BoxFuture<'static, CommonResult<Fragment>>),
}

impl Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invocation::Ready(fragment) => f.debug_tuple("Ready").field(fragment).finish(),
            Invocation::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Commands by name, plus the fallbacks for names that aren't in the table.
///
/// ```rust
/// use termline::{CommandTable, ErrorHandler, Fragment};
///
/// let table = CommandTable::default()
///     .with_static("about", "termline demo")
///     .with_dynamic("echo", |args| async move { Ok(Fragment::from(args)) })
///     .with_error_handler(ErrorHandler::Static("??".into()));
///
/// assert_eq!(table.names().collect::<Vec<_>>(), ["about", "echo"]);
/// ```
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, CommandEntry>,
    default_handler: Option<DefaultHandler>,
    error_handler: Option<ErrorHandler>,
}

impl Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .field("default_handler", &self.default_handler.is_some())
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl CommandTable {
    #[must_use]
    pub fn with_static(
        mut self,
        name: impl Into<String>,
        output: impl Into<Fragment>,
    ) -> Self {
        self.entries
            .insert(name.into(), CommandEntry::Static(output.into()));
        self
    }

    #[must_use]
    pub fn with_dynamic<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommonResult<Fragment>> + Send + 'static,
    {
        let handler: CommandHandler = Arc::new(move |args| handler(args).boxed());
        self.entries
            .insert(name.into(), CommandEntry::Dynamic(handler));
        self
    }

    #[must_use]
    pub fn with_default_handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(String, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommonResult<Fragment>> + Send + 'static,
    {
        let handler: DefaultHandler = Arc::new(move |name, args, transcript_text| {
            handler(name, args, transcript_text).boxed()
        });
        self.default_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_error_handler(mut self, error_handler: ErrorHandler) -> Self {
        self.error_handler = Some(error_handler);
        self
    }

    /// Convenience for [`ErrorHandler::Dynamic`].
    #[must_use]
    pub fn with_dynamic_error_handler<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommonResult<Fragment>> + Send + 'static,
    {
        let handler: ErrorHandlerFn = Arc::new(move |name, args| handler(name, args).boxed());
        self.with_error_handler(ErrorHandler::Dynamic(handler))
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandEntry> { self.entries.get(name) }

    /// Decide what to run for `name`. First match wins:
    ///
    /// 1. [`CommandEntry::Dynamic`]: the handler, with `args`.
    /// 2. [`CommandEntry::Static`]: the value.
    /// 3. default handler: with `name`, `args` and the transcript text.
    /// 4. error handler: [`ErrorHandler::Dynamic`] with `name` and `args`, or the
    ///    [`ErrorHandler::Static`] value.
    /// 5. empty output.
    ///
    /// An empty `name` (eg: a line of only spaces) goes through the same steps. An empty
    /// line never gets here, see [`crate::Console::begin_submission`].
    ///
    /// `transcript_text` is only called if the default handler is used.
    pub fn resolve(
        &self,
        name: &str,
        args: &str,
        transcript_text: impl FnOnce() -> String,
    ) -> Invocation {
        let invocation = match (self.entries.get(name), &self.default_handler, &self.error_handler)
        {
            (Some(CommandEntry::Dynamic(handler)), _, _) => {
                Invocation::Deferred(handler(args.to_string()))
            }
            (Some(CommandEntry::Static(output)), _, _) => Invocation::Ready(output.clone()),
            (None, Some(default_handler), _) => Invocation::Deferred(default_handler(
                name.to_string(),
                args.to_string(),
                transcript_text(),
            )),
            (None, None, Some(ErrorHandler::Dynamic(error_handler))) => {
                Invocation::Deferred(error_handler(name.to_string(), args.to_string()))
            }
            (None, None, Some(ErrorHandler::Static(output))) => {
                Invocation::Ready(output.clone())
            }
            (None, None, None) => Invocation::Ready(Fragment::Empty),
        };

        tracing::debug!(message = "resolve", name, args, invocation = ?invocation);

        invocation
    }
}
