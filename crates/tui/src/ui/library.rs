//! Library view rendering

use super::panel;
use crate::{app::App, collection::BookRow, theme::Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Renders the book list, the selected book's details and a summary line
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let collection = app.collection();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    if collection.is_empty() {
        let empty = Paragraph::new(collection.empty_message())
            .alignment(Alignment::Center)
            .style(theme.text_secondary_style())
            .block(panel(list_title(app), theme));
        frame.render_widget(empty, chunks[0]);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[0]);

        render_book_list(frame, columns[0], app);
        if let Some(row) = collection.row(app.state().selected_item) {
            render_details(frame, columns[1], row, theme);
        }
    }

    render_library_info(frame, chunks[1], app);
}

fn list_title(app: &App) -> String {
    format!(
        "Library: {} (↑/↓ Navigate | s Status | 0-5 Rate | Enter Summary | d Remove | f Filter)",
        app.collection().filter.label()
    )
}

fn render_book_list(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let selected = app.state().selected_item;

    let items: Vec<ListItem> = app
        .collection()
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let title_style = if i == selected {
                theme.highlight_style()
            } else {
                theme.text_style()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(row.title.as_str(), title_style),
                    Span::raw("  "),
                    Span::styled(row.stars(), theme.stars_style()),
                ]),
                Line::from(vec![
                    Span::styled(format!("  {}", row.byline()), theme.text_secondary_style()),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", row.status.label()), theme.status_style(row.status)),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel(list_title(app), theme))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_details(frame: &mut Frame, area: Rect, row: &BookRow, theme: &Theme) {
    let toggle_style = if row.can_toggle() {
        theme.accent_style()
    } else {
        theme.text_secondary_style()
    };

    let mut lines = vec![
        Line::from(Span::styled(row.title.as_str(), theme.highlight_style())),
        Line::from(Span::styled(row.byline(), theme.text_secondary_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", theme.text_secondary_style()),
            Span::styled(row.status.label(), theme.status_style(row.status)),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", theme.text_secondary_style()),
            Span::styled(row.stars(), theme.stars_style()),
        ]),
        Line::from(vec![
            Span::styled("Cover: ", theme.text_secondary_style()),
            Span::styled(row.cover_url.as_str(), theme.text_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!("[Enter] {}", row.panel.label()), toggle_style)),
    ];

    if let Some(summary) = &row.summary {
        lines.push(Line::from(""));
        lines.extend(
            summary
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), theme.text_style()))),
        );
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Details", theme));
    frame.render_widget(details, area);
}

fn render_library_info(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let stats = app.snapshot().stats();

    let info = Paragraph::new(Line::from(vec![
        Span::styled("Total: ", theme.text_secondary_style()),
        Span::styled(format!("{} books", stats.total_books), theme.highlight_style()),
        Span::raw("  |  "),
        Span::styled("Finished: ", theme.text_secondary_style()),
        Span::styled(stats.finished_count.to_string(), theme.success_style()),
        Span::raw("  |  "),
        Span::styled("Not finished: ", theme.text_secondary_style()),
        Span::styled(stats.unfinished_count.to_string(), theme.text_style()),
    ]))
    .block(panel("Info", theme));

    frame.render_widget(info, area);
}
