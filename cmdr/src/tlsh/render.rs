// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turn a [`ConsoleView`] into styled rows ([`layout_view`]), and paint the bottom of
//! that onto the terminal ([`paint_rows`]).
//!
//! Unlike [`Fragment::text_content`], the layout keeps a prompt and its input on the
//! same row, which is what a shell looks like.

use std::io::Write;

use crossterm::{cursor::MoveTo,
                queue,
                style::{Print, PrintStyledContent, Stylize},
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic;
use termline::{CommonResult, ConsoleView, Fragment, ok};

pub const CARET_GLYPH: &str = "█";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Welcome,
    Prompt,
    Input,
    Failure,
    Caret,
    Candidates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: SpanStyle,
    pub text: String,
}

impl Span {
    #[must_use]
    pub fn new(style: SpanStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

pub type Row = Vec<Span>;

/// Accumulates spans into rows. A line break (or a `\n` inside a text) ends the current
/// row.
#[derive(Debug, Default)]
struct RowBuilder {
    rows: Vec<Row>,
    current: Row,
}

impl RowBuilder {
    fn push(&mut self, style: SpanStyle, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next().filter(|it| !it.is_empty()) {
            self.current.push(Span::new(style, first));
        }
        for line in lines {
            self.break_row();
            if !line.is_empty() {
                self.current.push(Span::new(style, line));
            }
        }
    }

    fn break_row(&mut self) { self.rows.push(std::mem::take(&mut self.current)); }

    /// Flush a non-empty current row. Used at the end of each transcript entry, so a
    /// trailing line break doesn't leave a blank row behind.
    fn end_entry(&mut self) {
        if !self.current.is_empty() {
            self.break_row();
        }
    }

    fn layout_fragment(&mut self, fragment: &Fragment) {
        match fragment {
            Fragment::Empty => {}
            Fragment::Text(text) => self.push(SpanStyle::Plain, text),
            Fragment::Prompt(text) => self.push(SpanStyle::Prompt, text),
            Fragment::Input(text) => self.push(SpanStyle::Input, text),
            Fragment::LineBreak => self.break_row(),
            Fragment::Group(children) => {
                for child in children {
                    self.layout_fragment(child);
                }
            }
            Fragment::HandlerFailure { .. } => {
                self.push(SpanStyle::Failure, &fragment.text_content());
            }
        }
    }
}

/// Every row of the view, top to bottom: welcome message, transcript entries, the
/// current line, and the completion candidates (if any).
#[must_use]
pub fn layout_view(view: &ConsoleView) -> Vec<Row> {
    let mut builder = RowBuilder::default();

    if let Some(welcome_message) = &view.welcome_message {
        builder.push(SpanStyle::Welcome, welcome_message);
        builder.end_entry();
    }

    for entry in &view.transcript.entries {
        builder.layout_fragment(entry);
        builder.end_entry();
    }

    let line = &view.current_line;
    if !line.busy {
        builder.push(SpanStyle::Prompt, &line.prompt);
        builder.push(SpanStyle::Input, &line.before_caret);
    }
    if line.show_caret {
        builder.current.push(Span::new(SpanStyle::Caret, CARET_GLYPH));
    }
    if !line.busy {
        builder.push(SpanStyle::Input, &line.after_caret);
    }
    // The current line always gets a row, even if it is blank.
    builder.break_row();

    if !view.candidates.is_empty() {
        builder.push(SpanStyle::Candidates, &view.candidates);
        builder.end_entry();
    }

    builder.rows
}

/// The last `height` rows, since the most recent output and the line are what matter.
#[must_use]
pub fn visible_rows(rows: &[Row], height: usize) -> &[Row] {
    let skip = rows.len().saturating_sub(height);
    &rows[skip..]
}

/// Repaint the whole screen with the bottom of `rows`. Pass `purge` to also drop the
/// terminal's scrollback, eg: after `clear`.
///
/// # Errors
///
/// Returns an error if the terminal can't be written to.
pub fn paint_rows(
    stdout: &mut impl Write,
    rows: &[Row],
    height: u16,
    purge: bool,
) -> CommonResult<()> {
    if purge {
        queue!(stdout, Clear(ClearType::Purge)).into_diagnostic()?;
    }
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All)).into_diagnostic()?;

    for (row_index, row) in (0..height).zip(visible_rows(rows, usize::from(height))) {
        queue!(stdout, MoveTo(0, row_index)).into_diagnostic()?;
        for span in row {
            paint_span(stdout, span)?;
        }
    }

    stdout.flush().into_diagnostic()?;
    ok!()
}

fn paint_span(stdout: &mut impl Write, span: &Span) -> CommonResult<()> {
    let text = span.text.as_str();
    match span.style {
        SpanStyle::Plain | SpanStyle::Input => queue!(stdout, Print(text)),
        SpanStyle::Welcome => queue!(stdout, PrintStyledContent(text.magenta())),
        SpanStyle::Prompt => queue!(stdout, PrintStyledContent(text.green().bold())),
        SpanStyle::Failure => queue!(stdout, PrintStyledContent(text.red())),
        SpanStyle::Caret => queue!(stdout, PrintStyledContent(text.grey())),
        SpanStyle::Candidates => queue!(stdout, PrintStyledContent(text.dark_grey())),
    }
    .into_diagnostic()
}
