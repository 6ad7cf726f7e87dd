// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation;

/// Length of `text` in grapheme clusters. This is the unit the caret moves in.
#[must_use]
pub fn grapheme_len(text: &str) -> usize { text.graphemes(true).count() }

/// Byte offset of the grapheme at `caret`, or `text.len()` when `caret` is at or past
/// the end.
#[must_use]
pub fn byte_offset_of_caret(text: &str, caret: usize) -> usize {
    text.grapheme_indices(true)
        .nth(caret)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

/// Split `text` at `caret` (counted in grapheme clusters) into the text before and after
/// the caret. A caret past the end is clamped to the end.
///
/// ```rust
/// use termline::split_at_caret;
///
/// assert_eq!(split_at_caret("hello", 2), ("he", "llo"));
/// assert_eq!(split_at_caret("hello", 99), ("hello", ""));
/// ```
#[must_use]
pub fn split_at_caret(text: &str, caret: usize) -> (&str, &str) {
    text.split_at(byte_offset_of_caret(text, caret))
}
