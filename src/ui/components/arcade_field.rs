use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use typerush::game::{ArcadeSnapshot, FieldSize};

use crate::ui::layout::centered_rect;
use crate::ui::theme::ThemeColors;

/// Field units per terminal cell. Cells are roughly twice as tall as wide.
pub const UNITS_PER_COL: f64 = 8.0;
pub const UNITS_PER_ROW: f64 = 16.0;

/// The game field size matching a terminal area.
pub fn field_for(area: Rect) -> FieldSize {
    FieldSize {
        width: area.width as f64 * UNITS_PER_COL,
        height: area.height as f64 * UNITS_PER_ROW,
    }
}

/// Maps a target's centre to the cell its first letter starts on, if visible.
fn cell_for(area: Rect, x: f64, y: f64, text_len: usize) -> Option<(u16, u16)> {
    if y < 0.0 {
        return None;
    }
    let row = (y / UNITS_PER_ROW) as u16;
    if row >= area.height {
        return None;
    }
    let centre = (x / UNITS_PER_COL) as i64;
    let start = (centre - text_len as i64 / 2).clamp(0, area.width.saturating_sub(1) as i64);
    Some((area.x + start as u16, area.y + row))
}

pub struct ArcadeField<'a> {
    snapshot: &'a ArcadeSnapshot,
    colors: &'a ThemeColors,
}

impl<'a> ArcadeField<'a> {
    pub fn new(snapshot: &'a ArcadeSnapshot, colors: &'a ThemeColors) -> Self {
        Self { snapshot, colors }
    }
}

impl Widget for ArcadeField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let snap = self.snapshot;

        let hud = format!(
            " {}  score {}  lives {}  kills {}/{} ",
            snap.level_name, snap.score, snap.lives, snap.kills, snap.required_kills
        );
        let block = Block::bordered()
            .title(hud)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let floor_row = (snap.field.floor() / UNITS_PER_ROW) as u16;
        if floor_row < inner.height {
            for x in inner.x..inner.x + inner.width {
                buf[(x, inner.y + floor_row)]
                    .set_symbol("\u{2500}")
                    .set_style(Style::default().fg(colors.error()));
            }
        }

        for target in &snap.targets {
            let len = target.text.chars().count();
            let Some((cx, cy)) = cell_for(inner, target.x, target.y, len) else {
                continue;
            };
            let locked = snap.locked == Some(target.id);
            let rest_style = if locked {
                Style::default()
                    .fg(colors.target_locked())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let spans = Line::from(vec![
                Span::styled(target.typed(), Style::default().fg(colors.target_typed())),
                Span::styled(target.remaining(), rest_style),
            ]);
            let width = inner.x + inner.width - cx;
            buf.set_line(cx, cy, &spans, width);
        }

        if snap.over {
            let popup = centered_rect(30, 5, inner);
            Clear.render(popup, buf);
            let lines = vec![
                Line::from(Span::styled(
                    "GAME OVER",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("final score {}", snap.score)),
                Line::from(Span::styled(
                    "[Enter] again  [Esc] back",
                    Style::default().fg(colors.text_pending()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(
                    Block::bordered()
                        .border_style(Style::default().fg(colors.accent()))
                        .style(Style::default().bg(colors.header_bg())),
                )
                .render(popup, buf);
        }
    }
}
