//! Statistics view rendering

use super::panel;
use crate::{
    app::App,
    collection::{rating_bars, status_bars},
    theme::Theme,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{BarChart, Gauge, Paragraph},
    Frame,
};

/// Renders totals, reading progress and the rating and status charts
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let stats = app.snapshot().stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Overview
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Charts
        ])
        .split(area);

    let average = stats
        .average_rating()
        .map_or_else(|| "-".to_string(), |a| format!("{a:.1}/5"));
    let overview = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Books: ", theme.text_secondary_style()),
            Span::styled(stats.total_books.to_string(), theme.highlight_style()),
            Span::raw("  "),
            Span::styled("Authors: ", theme.text_secondary_style()),
            Span::styled(stats.authors_count.to_string(), theme.highlight_style()),
        ]),
        Line::from(vec![
            Span::styled("Rated: ", theme.text_secondary_style()),
            Span::styled(stats.rated_count().to_string(), theme.highlight_style()),
            Span::raw("  "),
            Span::styled("Unrated: ", theme.text_secondary_style()),
            Span::styled(stats.unrated_count.to_string(), theme.highlight_style()),
            Span::raw("  "),
            Span::styled("Average: ", theme.text_secondary_style()),
            Span::styled(average, theme.stars_style()),
        ]),
    ])
    .block(panel("Overview", theme));
    frame.render_widget(overview, chunks[0]);

    let percent = stats.finished_percentage().round().clamp(0.0, 100.0) as u16;
    let progress = Gauge::default()
        .block(panel("Finished", theme))
        .gauge_style(theme.success_style())
        .percent(percent)
        .label(format!(
            "{} of {} ({percent}%)",
            stats.finished_count, stats.total_books
        ));
    frame.render_widget(progress, chunks[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_chart(frame, charts[0], "Ratings", &rating_bars(&stats), theme.stars_style(), theme);
    render_chart(frame, charts[1], "Status", &status_bars(&stats), theme.accent_style(), theme);
}

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    bars: &[(String, u64)],
    bar_style: Style,
    theme: &Theme,
) {
    let data: Vec<(&str, u64)> = bars.iter().map(|(label, n)| (label.as_str(), *n)).collect();
    let chart = BarChart::default()
        .block(panel(title.to_string(), theme))
        .data(data.as_slice())
        .bar_width(7)
        .bar_gap(2)
        .bar_style(bar_style)
        .value_style(theme.highlight_style())
        .label_style(theme.text_style());

    frame.render_widget(chart, area);
}
