//! UI rendering modules

pub mod help;
pub mod library;
pub mod search;
pub mod statistics;

use crate::{app::App, search::NoticeKind, state::View, theme::Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Renders the whole screen: tabs, the current view and the status bar
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], app);
    match app.state().view {
        View::Library => library::render(frame, chunks[1], app),
        View::Search => search::render(frame, chunks[1], app),
        View::Statistics => statistics::render(frame, chunks[1], app),
        View::Help => help::render(frame, chunks[1], app.theme()),
    }
    render_status_bar(frame, chunks[2], app);
}

/// Bordered block in the theme's border color
pub(crate) fn panel<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    let title: Line<'a> = title.into();
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title)
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let titles: Vec<&str> = View::ALL.iter().map(View::title).collect();
    let tabs = Tabs::new(titles)
        .block(panel("📚 Shelfwise", theme))
        .select(app.state().view.index())
        .style(theme.text_style())
        .highlight_style(theme.highlight_style());

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let line = match app.search().notice() {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Info => theme.success_style(),
                NoticeKind::Warning => theme.warning_style(),
            };
            Line::from(Span::styled(notice.message.as_str(), style))
        }
        None => match &app.state().status_message {
            Some(message) => Line::from(Span::styled(message.as_str(), theme.text_style())),
            None => Line::from(vec![Span::styled(
                format!(
                    "q: Quit | ?: Help | Tab: Switch | /: Search | t: Theme ({})",
                    theme.theme_type.name()
                ),
                theme.text_secondary_style(),
            )]),
        },
    };

    frame.render_widget(Paragraph::new(line).block(panel("", theme)), area);
}
