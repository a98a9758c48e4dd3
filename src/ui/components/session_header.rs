use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typerush::generator::TestMode;
use typerush::session::SessionStatus;
use typerush::session::typing::{DURATION_PRESETS, SessionView};

use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::ThemeColors;

pub const HEADER_HEIGHT: u16 = 4;

/// Mode and duration selectors, the countdown, and live stats.
pub struct SessionHeader<'a> {
    view: &'a SessionView<'a>,
    colors: &'a ThemeColors,
}

impl<'a> SessionHeader<'a> {
    pub fn new(view: &'a SessionView<'a>, colors: &'a ThemeColors) -> Self {
        Self { view, colors }
    }

    fn selector<T: PartialEq>(&self, items: &[(T, String)], current: &T) -> Line<'static> {
        let colors = self.colors;
        // Selection is locked while the clock runs.
        let locked = self.view.status == SessionStatus::Running;
        let mut spans = vec![Span::raw(" ")];
        for (value, label) in items {
            let style = if value == current {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else if locked {
                Style::default().fg(colors.border())
            } else {
                Style::default().fg(colors.text_pending())
            };
            spans.push(Span::styled(format!("{label}  "), style));
        }
        Line::from(spans)
    }
}

impl Widget for SessionHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        Block::default()
            .style(Style::default().bg(colors.header_bg()))
            .render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); HEADER_HEIGHT as usize])
            .split(area);

        let modes: Vec<(TestMode, String)> = TestMode::ALL
            .iter()
            .enumerate()
            .map(|(i, m)| (*m, format!("F{} {}", i + 1, m)))
            .collect();
        Paragraph::new(self.selector(&modes, &self.view.mode)).render(rows[0], buf);

        let durations: Vec<(u32, String)> = DURATION_PRESETS
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, format!("F{} {d}s", i + 6)))
            .collect();
        let mut duration_line = self.selector(&durations, &self.view.duration_secs);
        if !DURATION_PRESETS.contains(&self.view.duration_secs) {
            duration_line.spans.push(Span::styled(
                format!("{}s", self.view.duration_secs),
                Style::default().fg(colors.accent()),
            ));
        }
        Paragraph::new(duration_line).render(rows[1], buf);

        let ratio = if self.view.duration_secs == 0 {
            0.0
        } else {
            self.view.remaining_secs as f64 / self.view.duration_secs as f64
        };
        ProgressBar::new(format!("{}s", self.view.remaining_secs), ratio, colors)
            .render(rows[2], buf);

        let hint = match self.view.status {
            SessionStatus::Idle => "start typing to begin",
            SessionStatus::Running => "",
            SessionStatus::Finished => "finished",
        };
        let stats = Line::from(vec![
            Span::styled(" WPM ", Style::default().fg(colors.header_fg())),
            Span::styled(
                format!("{:<4}", self.view.wpm),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ACC ", Style::default().fg(colors.header_fg())),
            Span::styled(
                format!("{}%", self.view.accuracy),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   {hint}"), Style::default().fg(colors.text_pending())),
        ]);
        Paragraph::new(stats).render(rows[3], buf);
    }
}
