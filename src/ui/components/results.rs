use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typerush::session::result::SessionSummary;

use crate::ui::components::chart::SessionChart;
use crate::ui::components::key_list::KeyList;
use crate::ui::theme::ThemeColors;

pub struct ResultsDashboard<'a> {
    pub summary: &'a SessionSummary,
    pub colors: &'a ThemeColors,
}

impl<'a> ResultsDashboard<'a> {
    pub fn new(summary: &'a SessionSummary, colors: &'a ThemeColors) -> Self {
        Self { summary, colors }
    }
}

impl Widget for ResultsDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let summary = self.summary;

        let block = Block::bordered()
            .title(format!(" {}s {} ", summary.duration_secs, summary.mode))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(12),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let wpm_line = Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} WPM", summary.wpm),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(wpm_line).render(layout[1], buf);

        let acc_color = if summary.accuracy >= 95 {
            colors.success()
        } else if summary.accuracy >= 85 {
            colors.warning()
        } else {
            colors.error()
        };
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}%", summary.accuracy),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let chars_line = Line::from(vec![
            Span::styled("  Chars:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} correct", summary.correct),
                Style::default().fg(colors.success()),
            ),
            Span::styled(" / ", Style::default().fg(colors.text_pending())),
            Span::styled(
                format!("{} incorrect", summary.incorrect),
                Style::default().fg(if summary.incorrect == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]);
        Paragraph::new(chars_line).render(layout[3], buf);

        let series = summary.chart();
        SessionChart::new(&series, colors).render(layout[4], buf);

        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[5]);
        let strong = summary.strong_keys();
        let weak = summary.weak_keys();
        KeyList::new("Strong keys", &strong, colors.success(), colors).render(lists[0], buf);
        KeyList::new("Weak keys", &weak, colors.error(), colors).render(lists[1], buf);
    }
}
