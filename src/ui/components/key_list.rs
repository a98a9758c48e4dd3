use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use typerush::engine::analysis::KeyReport;

use crate::ui::theme::ThemeColors;

pub struct KeyList<'a> {
    title: &'a str,
    keys: &'a [KeyReport],
    highlight: Color,
    colors: &'a ThemeColors,
}

impl<'a> KeyList<'a> {
    pub fn new(
        title: &'a str,
        keys: &'a [KeyReport],
        highlight: Color,
        colors: &'a ThemeColors,
    ) -> Self {
        Self {
            title,
            keys,
            highlight,
            colors,
        }
    }
}

fn key_label(key: char) -> String {
    match key {
        ' ' => "spc".to_string(),
        c => c.to_string(),
    }
}

impl Widget for KeyList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));

        let lines: Vec<Line> = if self.keys.is_empty() {
            vec![Line::from(Span::styled(
                "  none yet",
                Style::default().fg(colors.text_pending()),
            ))]
        } else {
            self.keys
                .iter()
                .map(|r| {
                    Line::from(vec![
                        Span::styled(
                            format!("  {:>3} ", key_label(r.key)),
                            Style::default()
                                .fg(self.highlight)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("{:>5.1}%", r.accuracy),
                            Style::default().fg(colors.fg()),
                        ),
                        Span::styled(
                            format!("  ({}x)", r.total),
                            Style::default().fg(colors.text_pending()),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(keys: &[KeyReport]) -> String {
        let colors = ThemeColors::default();
        let area = Rect::new(0, 0, 30, 4);
        let mut buffer = Buffer::empty(area);
        KeyList::new("Weakest", keys, Color::Red, &colors).render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn lists_key_accuracy_and_count() {
        let keys = [KeyReport {
            key: ' ',
            total: 4,
            accuracy: 50.0,
        }];
        let out = rendered(&keys);
        assert!(out.contains("Weakest"));
        assert!(out.contains("spc  50.0%  (4x)"));
    }

    #[test]
    fn empty_list_says_none_yet() {
        assert!(rendered(&[]).contains("none yet"));
    }
}
