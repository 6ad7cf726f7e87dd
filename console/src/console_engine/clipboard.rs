// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};

use crate::throws;

pub type ClipboardResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Where Ctrl/Cmd + C puts the selected text. Browsers hand this off to
/// `navigator.clipboard`, terminals to the OS clipboard.
pub trait ClipboardService {
    fn try_to_put_content_into_clipboard(&mut self, content: String)
    -> ClipboardResult<()>;
}

#[derive(Debug)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        throws!({
            let mut ctx = ClipboardContext::new()?;
            ctx.set_contents(content.clone())?;
            // % is Display, ? is Debug.
            tracing::debug!(message = "copied selection to clipboard", copied = %content);
        })
    }
}

pub mod clipboard_test_fixtures {
    use super::{ClipboardResult, ClipboardService};

    /// Remembers the last thing copied.
    #[derive(Debug, Default)]
    pub struct TestClipboard {
        pub content: String,
    }

    impl ClipboardService for TestClipboard {
        fn try_to_put_content_into_clipboard(
            &mut self,
            content: String,
        ) -> ClipboardResult<()> {
            self.content = content;
            Ok(())
        }
    }

    /// Always fails, like a headless box without a clipboard.
    #[derive(Debug, Default)]
    pub struct UnavailableClipboard;

    impl ClipboardService for UnavailableClipboard {
        fn try_to_put_content_into_clipboard(
            &mut self,
            _content: String,
        ) -> ClipboardResult<()> {
            Err("no clipboard on this host".into())
        }
    }
}
