use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Widget};

use typerush::engine::analysis::ChartSeries;

use crate::ui::theme::ThemeColors;

/// WPM and accuracy per second of the finished test, on a shared 0..max y axis.
pub struct SessionChart<'a> {
    pub series: &'a ChartSeries,
    pub colors: &'a ThemeColors,
}

impl<'a> SessionChart<'a> {
    pub fn new(series: &'a ChartSeries, colors: &'a ThemeColors) -> Self {
        Self { series, colors }
    }
}

fn y_bound(series: &ChartSeries) -> f64 {
    series
        .wpm
        .iter()
        .chain(series.accuracy.iter())
        .map(|(_, y)| *y)
        .fold(0.0f64, f64::max)
        .max(10.0)
        * 1.1
}

impl Widget for SessionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors;
        let block = Block::bordered()
            .title(" WPM / Accuracy ")
            .border_style(Style::default().fg(colors.border()));

        if self.series.wpm.is_empty() {
            block.render(area, buf);
            return;
        }

        let max_x = self.series.wpm.last().map(|(x, _)| *x).unwrap_or(1.0);

        let datasets = vec![
            Dataset::default()
                .name("wpm")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.accent()))
                .data(&self.series.wpm),
            Dataset::default()
                .name("acc %")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.success()))
                .data(&self.series.accuracy),
        ];

        let top = y_bound(self.series);
        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("second")
                    .style(Style::default().fg(colors.text_pending()))
                    .bounds([1.0, max_x.max(2.0)])
                    .labels(vec![Span::raw("1"), Span::raw(format!("{max_x:.0}"))]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(colors.text_pending()))
                    .bounds([0.0, top])
                    .labels(vec![Span::raw("0"), Span::raw(format!("{top:.0}"))]),
            );

        chart.render(area, buf);
    }
}
