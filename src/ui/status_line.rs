//! Status line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::StatusLine;
use crate::theme::Theme;

/// Hint shown when there is no message
pub const KEY_HINT: &str = "[y] read it  [n] not yet  [u] undo  [space] skip  [?] help";

/// Draw the status line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &StatusLine, theme: &Theme) {
    let (text, style) = match &state.message {
        Some(msg) if state.is_error => (msg.as_str(), Style::default().fg(theme.error)),
        Some(msg) => (msg.as_str(), Style::default().fg(theme.info)),
        None => (KEY_HINT, Style::default().fg(theme.fg_muted)),
    };

    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}
