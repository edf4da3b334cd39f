//! Search view rendering

use super::panel;
use crate::{
    app::{App, SearchFocus},
    search::SearchPhase,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the search box, the results and the paging footer
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Paging
        ])
        .split(area);

    render_search_input(frame, chunks[0], app);
    render_search_results(frame, chunks[1], app);
    render_paging(frame, chunks[2], app);
}

fn render_search_input(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let typing = app.search_focus() == SearchFocus::Input;
    let (cursor, title) = if typing {
        ("_", "Search (Enter: Search | Esc: Back)")
    } else {
        ("", "Search (i: Edit)")
    };

    let style = if typing {
        theme.text_style()
    } else {
        theme.text_secondary_style()
    };
    let input = Paragraph::new(format!("🔍 {}{cursor}", app.search().input))
        .style(style)
        .block(panel(title, theme));

    frame.render_widget(input, area);
}

fn render_search_results(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let search = app.search();
    let title = "Results (↑/↓: Navigate | Enter: Add to library)";

    let message = match search.phase() {
        SearchPhase::Idle => Some(Line::from(Span::styled(
            "Type a title or author and press Enter.",
            theme.text_secondary_style(),
        ))),
        SearchPhase::Searching if search.books().is_empty() => Some(Line::from(Span::styled(
            "Searching...",
            theme.accent_style(),
        ))),
        SearchPhase::Error => Some(Line::from(Span::styled(
            search.error().unwrap_or_default(),
            theme.error_style(),
        ))),
        SearchPhase::Results if search.books().is_empty() => Some(Line::from(Span::styled(
            "No results.",
            theme.text_secondary_style(),
        ))),
        _ => None,
    };

    if let Some(message) = message {
        frame.render_widget(Paragraph::new(message).block(panel(title, theme)), area);
        return;
    }

    let library = app.snapshot();
    let items: Vec<ListItem> = search
        .books()
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let title_style = if i == search.selected() {
                theme.highlight_style()
            } else {
                theme.text_style()
            };
            let mut first = vec![Span::styled(book.title.as_str(), title_style)];
            if library.get(&book.key).is_some() {
                first.push(Span::styled("  ✓ in library", theme.success_style()));
            }
            ListItem::new(vec![
                Line::from(first),
                Line::from(Span::styled(
                    format!("  by {}", book.author),
                    theme.text_secondary_style(),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel(title, theme))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(search.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_paging(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let search = app.search();

    let mut spans = Vec::new();
    if let Some(page) = search.results() {
        spans.push(Span::styled(
            format!("Page {} of {}", page.page, page.total_pages.max(1)),
            theme.text_style(),
        ));
        spans.push(Span::styled(
            format!("  ({} results)", page.total_results),
            theme.text_secondary_style(),
        ));
        if page.has_previous() {
            spans.push(Span::styled("  ←/p: Previous", theme.accent_style()));
        }
        if page.has_next() {
            spans.push(Span::styled("  →/n: Next", theme.accent_style()));
        }
    }
    if search.is_searching() {
        spans.push(Span::styled("  Searching...", theme.accent_style()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(panel("Pages", theme)),
        area,
    );
}
