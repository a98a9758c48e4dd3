use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typerush::session::input::CharStatus;
use typerush::session::typing::SessionView;

use crate::ui::theme::ThemeColors;

/// Number of wrapped lines shown at once; the cursor sits on the second.
const VISIBLE_LINES: usize = 3;

pub struct TypingArea<'a> {
    view: &'a SessionView<'a>,
    colors: &'a ThemeColors,
}

impl<'a> TypingArea<'a> {
    pub fn new(view: &'a SessionView<'a>, colors: &'a ThemeColors) -> Self {
        Self { view, colors }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Correct,
    Incorrect,
    Overflow,
    Cursor,
    Pending,
}

/// One word expanded into display cells, overflow keystrokes appended after the word.
fn word_cells(view: &SessionView<'_>, word_idx: usize) -> Vec<(char, Mark)> {
    let word = &view.words[word_idx];
    let is_current = word_idx == view.word_index;
    let mut cells: Vec<(char, Mark)> = word
        .chars()
        .enumerate()
        .map(|(i, expected)| match view.typed_at(word_idx, i) {
            Some(t) if t.status == CharStatus::Correct => (expected, Mark::Correct),
            Some(_) => (expected, Mark::Incorrect),
            None if is_current && i == view.char_index => (expected, Mark::Cursor),
            None => (expected, Mark::Pending),
        })
        .collect();

    let mut i = cells.len();
    while let Some(t) = view.typed_at(word_idx, i) {
        cells.push((t.ch, Mark::Overflow));
        i += 1;
    }
    cells
}

/// Greedy word wrap; returns `(first, end)` word ranges per line.
fn wrap_words(widths: &[usize], line_width: usize) -> Vec<(usize, usize)> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, &w) in widths.iter().enumerate() {
        // +1 for the separating space
        let needed = if used == 0 { w + 1 } else { used + w + 1 };
        if used > 0 && needed > line_width {
            lines.push((start, i));
            start = i;
            used = w + 1;
        } else {
            used = needed;
        }
    }
    if start < widths.len() {
        lines.push((start, widths.len()));
    }
    lines
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || self.view.words.is_empty() {
            return;
        }

        let style_for = |mark: Mark| match mark {
            Mark::Correct => Style::default().fg(colors.text_correct()),
            Mark::Incorrect => Style::default()
                .fg(colors.text_incorrect())
                .bg(colors.text_incorrect_bg())
                .add_modifier(Modifier::UNDERLINED),
            Mark::Overflow => Style::default()
                .fg(colors.text_incorrect())
                .add_modifier(Modifier::CROSSED_OUT),
            Mark::Cursor => Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
            Mark::Pending => Style::default().fg(colors.text_pending()),
        };

        // Laying out a little beyond the cursor is enough to fill the window.
        let last_word = (self.view.word_index + 60).min(self.view.words.len());
        let cells: Vec<Vec<(char, Mark)>> =
            (0..last_word).map(|w| word_cells(self.view, w)).collect();
        let widths: Vec<usize> = cells.iter().map(Vec::len).collect();
        let wrapped = wrap_words(&widths, inner.width as usize);

        let cursor_line = wrapped
            .iter()
            .position(|&(s, e)| (s..e).contains(&self.view.word_index))
            .unwrap_or(0);
        let first = cursor_line.saturating_sub(1);

        let lines: Vec<Line> = wrapped
            .iter()
            .skip(first)
            .take(VISIBLE_LINES.min(inner.height as usize))
            .map(|&(start, end)| {
                let mut spans = Vec::new();
                for w in start..end {
                    for &(ch, mark) in &cells[w] {
                        spans.push(Span::styled(ch.to_string(), style_for(mark)));
                    }
                    let at_gap =
                        w == self.view.word_index && self.view.char_index >= cells[w].len();
                    spans.push(if at_gap {
                        Span::styled(" ", style_for(Mark::Cursor))
                    } else {
                        Span::raw(" ")
                    });
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
