//! Help view rendering

use super::panel;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Key bindings, grouped by view
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "General",
        &[
            ("Tab / Shift-Tab", "Next / previous view"),
            ("/", "Search the catalog"),
            ("?", "Toggle this help"),
            ("t", "Cycle color theme"),
            ("q / Ctrl-C", "Quit"),
        ],
    ),
    (
        "Library",
        &[
            ("↑/↓ or k/j", "Move selection"),
            ("s", "Cycle status: owned, started, finished"),
            ("0-5", "Set rating (0 clears it)"),
            ("Enter / Space", "Show or hide the summary"),
            ("d / Delete", "Remove from library"),
            ("f", "Filter: all, not finished, finished"),
        ],
    ),
    (
        "Search",
        &[
            ("Enter", "Run the search, or add the selected result"),
            ("a", "Add the selected result"),
            ("→/n  ←/p", "Next / previous page"),
            ("i", "Edit the query"),
            ("Esc", "Clear results, or leave the search box"),
        ],
    ),
];

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = Vec::new();
    for (heading, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(*heading, theme.highlight_style())));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<18}"), theme.accent_style()),
                Span::styled(*action, theme.text_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Help (Esc: Back)", theme));
    frame.render_widget(help, area);
}
