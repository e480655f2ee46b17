//! Progress statistics and the weak-word report

use rand::Rng;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::status_line;
use crate::app::state::AppState;
use crate::session::{Clock, Session};
use crate::store::StorageBackend;
use crate::theme::Theme;

/// Draw the statistics screen
pub fn draw<B, C, R>(frame: &mut Frame, state: &AppState, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [summary, weak, status] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(4), Constraint::Length(1)])
            .areas(area);

    draw_summary(frame, summary, session, theme);
    draw_weak_words(frame, weak, session, theme);
    status_line::draw(frame, status, &state.status, theme);
}

fn draw_summary<B, C, R>(frame: &mut Frame, area: Rect, session: &Session<B, C, R>, theme: &Theme)
where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let stats = session.stats();
    let label =
        |text: &str| Span::styled(format!("{text:<18}"), Style::default().fg(theme.fg_muted));
    let value = |text: String| {
        Span::styled(text, Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD))
    };

    let set = if stats.has_active_set {
        format!(
            "{} of {} ({}/{} mastered)",
            stats.set_number, stats.total_sets, stats.mastered_in_set, stats.total_in_set
        )
    } else {
        "none yet".to_string()
    };

    let lines = vec![
        Line::from(vec![label("Learner"), value(session.profile().to_string())]),
        Line::from(vec![label("Practice set"), value(set)]),
        Line::from(vec![
            label("Words mastered"),
            value(format!("{} of {}", stats.total_mastered, session.vocabulary().len())),
        ]),
        Line::from(vec![label("Words tried"), value(stats.total_attempted.to_string())]),
        Line::from(vec![label("TV minutes"), value(session.tv_minutes().to_string())]),
    ];

    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_weak_words<B, C, R>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<B, C, R>,
    theme: &Theme,
) where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let header = Row::new(vec!["Word", "Reads", "Accuracy", "Streak", ""])
        .style(Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = session
        .weak_words()
        .into_iter()
        .map(|w| {
            let tone = session
                .mastery_map()
                .get(&w.word)
                .map(|wp| session.tile_tone(wp))
                .map(|tone| theme.tone_color(tone))
                .unwrap_or(theme.fg_primary);

            Row::new(vec![
                Cell::from(w.word.clone()).style(Style::default().fg(tone)),
                Cell::from(format!("{}/{}", w.correct, w.attempts)),
                Cell::from(format!("{:.0}%", w.accuracy * 100.0)),
                Cell::from(w.streak.to_string()),
                Cell::from(if w.mastered { "mastered" } else { "" }),
            ])
            .style(Style::default().fg(theme.fg_primary))
        })
        .collect();

    let widths = [
        Constraint::Ratio(2, 6),
        Constraint::Ratio(1, 6),
        Constraint::Ratio(1, 6),
        Constraint::Ratio(1, 6),
        Constraint::Ratio(1, 6),
    ];

    let block = Block::default()
        .title(" Words to work on ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if rows.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No reads yet. Practise a few words to see which need work.",
            Style::default().fg(theme.fg_muted),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
