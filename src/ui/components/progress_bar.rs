use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::ThemeColors;

/// Single-row bar with a centred label, used for the countdown.
pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub colors: &'a ThemeColors,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: impl Into<String>, ratio: f64, colors: &'a ThemeColors) -> Self {
        Self {
            label: label.into(),
            ratio: ratio.clamp(0.0, 1.0),
            colors,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (self.ratio * area.width as f64).round() as u16;
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.accent())
            } else {
                Style::default().fg(colors.fg()).bg(colors.header_bg())
            };
            buf[(x, area.y)].set_style(style);
        }

        let label_x = area.x + (area.width.saturating_sub(self.label.len() as u16)) / 2;
        buf.set_string(label_x, area.y, &self.label, Style::default().fg(colors.header_fg()));
    }
}
