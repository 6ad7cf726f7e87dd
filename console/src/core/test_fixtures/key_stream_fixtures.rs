// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use async_stream::stream;
use futures_util::StreamExt;

use crate::{CommonResult, Console, EditorEvent, InlineVec, KeyPress, PinnedInputStream,
            SpecialKey, keypress};

pub fn gen_key_stream<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// Like [`gen_key_stream`], with a pause before each item, to simulate a user typing
/// while a command is running.
pub fn gen_key_stream_with_delay<T>(
    generator_vec: InlineVec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// One [`KeyPress`] per char of `text`.
#[must_use]
pub fn key_presses_for_text(text: &str) -> InlineVec<KeyPress> {
    text.chars().map(|ch| keypress!(@char ch)).collect()
}

/// `text` followed by Enter.
#[must_use]
pub fn key_presses_for_submission(text: &str) -> InlineVec<KeyPress> {
    let mut it = key_presses_for_text(text);
    it.push(keypress!(@special SpecialKey::Enter));
    it
}

/// Feed every key of `input_stream` to [`Console::handle_key`], in order, and collect
/// the events.
///
/// # Errors
///
/// Stops at the first engine error.
pub async fn feed_key_stream(
    console: &mut Console,
    mut input_stream: PinnedInputStream<KeyPress>,
) -> CommonResult<Vec<EditorEvent>> {
    let mut events = vec![];
    while let Some(key_press) = input_stream.next().await {
        events.push(console.handle_key(key_press).await?);
    }
    Ok(events)
}
