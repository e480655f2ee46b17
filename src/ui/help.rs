//! Help overlay listing the practice keys

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use crate::theme::Theme;

/// Keys and what they do, in display order
pub const KEYS: &[(&str, &str)] = &[
    ("y / Enter / \u{2192}", "Read it correctly"),
    ("n / \u{2190}", "Could not read it"),
    ("u / Ctrl-z", "Undo the last read (5 seconds)"),
    ("space", "Skip without scoring"),
    ("p / Tab", "Next learner"),
    ("s", "Progress and weak words"),
    ("R", "Reset this set (press twice)"),
    ("X", "Reset all progress (press twice)"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

/// Draw the help overlay centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(60, 70, area);

    // Clear the background area
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let mut lines = vec![Line::from("")];
    for (key, what) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {key:<20}"),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(*what, Style::default().fg(theme.fg_secondary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Five correct reads in a row masters a word.",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
