//! Practice screen: the word to read, set progress and word tiles

use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::{layout::vertical_padding, status_line};
use crate::app::state::AppState;
use crate::mastery::MASTERY_STREAK_REQUIRED;
use crate::session::{Clock, Session};
use crate::store::StorageBackend;
use crate::theme::Theme;

/// Height of the tile panel including borders
const TILES_HEIGHT: u16 = 5;

/// Draw the practice screen
pub fn draw<B, C, R>(frame: &mut Frame, state: &AppState, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header, word, gauge, tiles, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(TILES_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header, session, theme);
    draw_word(frame, word, state, session, theme);
    draw_set_gauge(frame, gauge, session, theme);
    draw_tiles(frame, tiles, session, theme);
    status_line::draw(frame, status, &state.status, theme);
}

fn draw_header<B, C, R>(frame: &mut Frame, area: Rect, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let stats = session.stats();
    let set_label = if stats.has_active_set {
        format!("Set {} of {}", stats.set_number, stats.total_sets)
    } else {
        "Warming up".to_string()
    };

    let left = Line::from(vec![
        Span::styled(
            format!(" {} ", session.profile()),
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {set_label}"), Style::default().fg(theme.fg_secondary)),
    ]);
    let right = Line::from(Span::styled(
        format!("TV {} min ", session.tv_minutes()),
        Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    frame.render_widget(Paragraph::new(left), area);
    frame.render_widget(Paragraph::new(right), area);
}

fn draw_word<B, C, R>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &Session<B, C, R>,
    theme: &Theme,
) where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    match session.current_word() {
        Some(word) => {
            let streak = session.mastery_map().get(word).map(|wp| wp.streak).unwrap_or(0);
            lines.push(Line::from(Span::styled(
                spaced(word),
                Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                streak_dots(streak),
                Style::default().fg(theme.accent_secondary),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No words to practise",
            Style::default().fg(theme.fg_muted),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(feedback_line(state, session, theme));

    let padding = vertical_padding(inner.height, lines.len() as u16);
    let mut padded = vec![Line::from(""); padding as usize];
    padded.extend(lines);

    frame.render_widget(Paragraph::new(padded).alignment(Alignment::Center), inner);
}

/// Result of the last read plus the undo countdown
fn feedback_line<B, C, R>(
    state: &AppState,
    session: &Session<B, C, R>,
    theme: &Theme,
) -> Line<'static>
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let mut spans = Vec::new();

    if let Some(last) = &state.last_read {
        // ✓ or ✗
        let (mark, color) =
            if last.correct { ("\u{2713}", theme.success) } else { ("\u{2717}", theme.error) };
        spans.push(Span::styled(
            format!("{mark} {}", last.word),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(remaining) = session.undo_remaining_ms() {
        let seconds = (remaining + 999) / 1000;
        spans.push(Span::styled(
            format!("   [u] undo ({seconds}s)"),
            Style::default().fg(theme.fg_muted),
        ));
    }

    Line::from(spans)
}

fn draw_set_gauge<B, C, R>(frame: &mut Frame, area: Rect, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let stats = session.stats();
    let (ratio, label) = if stats.has_active_set && stats.total_in_set > 0 {
        (
            stats.mastered_in_set as f64 / stats.total_in_set as f64,
            format!("{}/{} mastered in this set", stats.mastered_in_set, stats.total_in_set),
        )
    } else {
        (0.0, format!("{} words mastered", stats.total_mastered))
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Progress "),
        )
        .gauge_style(Style::default().fg(theme.success).bg(theme.bg_tertiary))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}

fn draw_tiles<B, C, R>(frame: &mut Frame, area: Rect, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Words ");

    let current = session.current_word();
    let mut spans = Vec::new();
    for wp in session.panel_words() {
        let tone = session.tile_tone(&wp);
        let mut style = Style::default().fg(theme.bg_primary).bg(theme.tone_color(tone));
        if Some(wp.word.as_str()) == current {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {} ", wp.word), style));
        spans.push(Span::raw(" "));
    }

    let text = if spans.is_empty() {
        Line::from(Span::styled(
            "Tiles appear once words have been tried",
            Style::default().fg(theme.fg_muted),
        ))
    } else {
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

/// Letter-spaced rendering of a word so it reads large on a terminal
pub fn spaced(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for (i, c) in word.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Filled and empty dots for progress towards mastery
pub fn streak_dots(streak: u32) -> String {
    let filled = streak.min(MASTERY_STREAK_REQUIRED) as usize;
    let empty = MASTERY_STREAK_REQUIRED as usize - filled;
    format!("{}{}", "\u{25CF} ".repeat(filled), "\u{25CB} ".repeat(empty)).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::input::Action;
    use crate::config::Config;
    use crate::session::ManualClock;
    use crate::store::{MemoryBackend, ProfileStore};
    use crate::vocab::Vocabulary;

    type TestSession = Session<MemoryBackend, ManualClock, ChaCha8Rng>;

    fn render(state: &AppState, session: &TestSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::default();
        terminal.draw(|frame| draw(frame, state, session, &theme)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn spaced_separates_letters() {
        assert_eq!(spaced("cat"), "c a t");
        assert_eq!(spaced(""), "");
    }

    #[test]
    fn streak_dots_cap_at_mastery() {
        assert_eq!(streak_dots(2), "\u{25CF} \u{25CF} \u{25CB} \u{25CB} \u{25CB}");
        assert_eq!(streak_dots(9), streak_dots(MASTERY_STREAK_REQUIRED));
    }

    #[test]
    fn screen_shows_word_profile_and_minutes() {
        let mut session = Session::open(
            ProfileStore::new(MemoryBackend::new()),
            "Asha",
            Vocabulary::from_words(["elephant"]),
            ManualClock::new(0),
            ChaCha8Rng::seed_from_u64(1),
        );
        let mut state = AppState::default();

        let screen = render(&state, &session);
        assert!(screen.contains("e l e p h a n t"));
        assert!(screen.contains("Asha"));
        assert!(screen.contains("TV 0 min"));

        state.handle_action(Action::MarkCorrect, &mut session, &Config::default());
        let screen = render(&state, &session);
        assert!(screen.contains("TV 1 min"));
        assert!(screen.contains("undo (5s)"));
    }
}
