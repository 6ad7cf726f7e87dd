// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::HISTORY_SIZE_MAX;

/// Previously submitted lines. Hosts can plug in their own store (eg: one backed by
/// `localStorage` or a file) by implementing this trait and passing it to
/// [`crate::Console::with_history`].
pub trait HistoryStore {
    /// Walk one step towards older entries.
    fn previous_command(&mut self) -> Option<String>;

    /// Walk one step towards newer entries.
    fn next_command(&mut self) -> Option<String>;

    /// Record a submitted line. Resets the walk.
    fn append_command(&mut self, line: &str);
}

/// Newest entry first. Every submitted line is kept, including empty and repeated ones,
/// up to `max_size` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub entries: VecDeque<String>,
    pub max_size: usize,
    current_position: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: VecDeque::default(),
            max_size: HISTORY_SIZE_MAX,
            current_position: None,
        }
    }
}

impl History {
    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Default::default()
        }
    }

    /// Older entry. Clamps at the oldest one. `None` if there is nothing recorded.
    pub fn search_next(&mut self) -> Option<&str> {
        if let Some(index) = &mut self.current_position {
            if *index + 1 < self.entries.len() {
                *index += 1;
            }
            self.entries.get(*index).map(String::as_str)
        } else if !self.entries.is_empty() {
            self.current_position = Some(0);
            self.entries.front().map(String::as_str)
        } else {
            None
        }
    }

    /// Newer entry. Stepping past the newest one yields `""` and ends the walk. `None`
    /// if no walk is in progress.
    pub fn search_previous(&mut self) -> Option<&str> {
        let index = self.current_position.as_mut()?;
        if *index == 0 {
            self.current_position = None;
            return Some("");
        }
        *index -= 1;
        self.entries.get(*index).map(String::as_str)
    }
}

impl HistoryStore for History {
    fn previous_command(&mut self) -> Option<String> {
        self.search_next().map(ToString::to_string)
    }

    fn next_command(&mut self) -> Option<String> {
        self.search_previous().map(ToString::to_string)
    }

    fn append_command(&mut self, line: &str) {
        self.entries.push_front(line.to_string());
        self.current_position = None;
        if self.entries.len() > self.max_size {
            self.entries.pop_back();
        }
    }
}
