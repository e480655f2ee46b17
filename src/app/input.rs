//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Practice key mapping (without modifiers)
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('y') | KeyCode::Enter | KeyCode::Right => Some(Action::MarkCorrect),
        KeyCode::Char('n') | KeyCode::Left => Some(Action::MarkMissed),
        KeyCode::Char('u') | KeyCode::Backspace => Some(Action::Undo),
        KeyCode::Char(' ') => Some(Action::Skip),
        KeyCode::Char('p') | KeyCode::Tab => Some(Action::NextProfile),
        KeyCode::Char('s') => Some(Action::ToggleStats),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        // Destructive, so capitals only
        KeyCode::Char('R') => Some(Action::ResetSet),
        KeyCode::Char('X') => Some(Action::ResetAll),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('z') => Some(Action::Undo),
            _ => None,
        }
    } else {
        key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Scoring
    MarkCorrect,
    MarkMissed,
    Undo,
    Skip,

    // Learners
    NextProfile,

    // Screens
    ToggleStats,
    ToggleHelp,
    Back,

    // Progress
    ResetSet,
    ResetAll,

    Quit,
}

impl Action {
    /// Whether the action needs a second press before it runs
    pub fn needs_confirmation(self) -> bool {
        matches!(self, Action::ResetSet | Action::ResetAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_and_enter_mark_correct() {
        assert_eq!(key_to_action(KeyCode::Char('y')), Some(Action::MarkCorrect));
        assert_eq!(key_to_action(KeyCode::Enter), Some(Action::MarkCorrect));
        assert_eq!(key_to_action(KeyCode::Right), Some(Action::MarkCorrect));
    }

    #[test]
    fn n_and_left_mark_missed() {
        assert_eq!(key_to_action(KeyCode::Char('n')), Some(Action::MarkMissed));
        assert_eq!(key_to_action(KeyCode::Left), Some(Action::MarkMissed));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(key_to_action(KeyCode::Char('j')), None);
    }

    #[test]
    fn lowercase_does_not_reset() {
        assert_eq!(key_to_action(KeyCode::Char('r')), None);
        assert_eq!(key_to_action(KeyCode::Char('x')), None);
        assert!(key_to_action(KeyCode::Char('R')).unwrap().needs_confirmation());
        assert!(key_to_action(KeyCode::Char('X')).unwrap().needs_confirmation());
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn ctrl_z_undoes() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('z'), KeyModifiers::CONTROL),
            Some(Action::Undo)
        );
    }

    #[test]
    fn no_modifier_uses_practice_keys() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('u'), KeyModifiers::NONE),
            Some(Action::Undo)
        );
    }
}
