//! Application state definitions

use rand::Rng;

use super::input::Action;
use crate::config::Config;
use crate::session::{Clock, MarkOutcome, Session, SetChange, UndoOutcome};
use crate::store::StorageBackend;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Practice,
    Stats,
    Help,
}

/// Status message shown on the bottom line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// A destructive action waiting for its second key press
    pub pending_confirm: Option<Action>,

    /// The read that was scored last, for feedback
    pub last_read: Option<MarkOutcome>,

    /// Bottom status line
    pub status: StatusLine,
}

impl AppState {
    /// Apply an action to the session. Returns true if the app should exit.
    pub fn handle_action<B, C, R>(
        &mut self,
        action: Action,
        session: &mut Session<B, C, R>,
        config: &Config,
    ) -> bool
    where
        B: StorageBackend,
        C: Clock,
        R: Rng,
    {
        let pending = self.pending_confirm.take();
        if action.needs_confirmation() && pending != Some(action) {
            self.pending_confirm = Some(action);
            let what = if action == Action::ResetSet { "this set" } else { "ALL progress" };
            self.status.set_error(format!(
                "Reset {what} for {}? Press {} again to confirm",
                session.profile(),
                if action == Action::ResetSet { 'R' } else { 'X' }
            ));
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::Back => {
                if pending.is_some() {
                    self.status.set_message("Cancelled");
                } else if self.screen == Screen::Practice {
                    return true;
                } else {
                    self.screen = Screen::Practice;
                }
            }
            Action::ToggleStats => self.toggle_screen(Screen::Stats),
            Action::ToggleHelp => self.toggle_screen(Screen::Help),
            Action::MarkCorrect | Action::MarkMissed if self.screen == Screen::Practice => {
                self.mark(session, action == Action::MarkCorrect);
            }
            Action::Undo if self.screen == Screen::Practice => self.undo(session),
            Action::Skip if self.screen == Screen::Practice => {
                session.skip();
                self.status.clear_message();
            }
            Action::NextProfile => {
                let next = config.next_profile(session.profile());
                session.switch_profile(&next);
                self.last_read = None;
                self.status.set_message(format!("Now practising as {next}"));
            }
            Action::ResetSet => {
                self.last_read = None;
                if session.reset_current_set() {
                    self.status.set_message("Current set reset");
                } else {
                    self.status.set_error("No practice set to reset yet");
                }
            }
            Action::ResetAll => {
                session.reset_all();
                self.last_read = None;
                self.status.set_message(format!("All progress for {} reset", session.profile()));
            }
            _ => {}
        }

        false
    }

    fn toggle_screen(&mut self, screen: Screen) {
        self.screen = if self.screen == screen { Screen::Practice } else { screen };
    }

    fn mark<B: StorageBackend, C: Clock, R: Rng>(
        &mut self,
        session: &mut Session<B, C, R>,
        correct: bool,
    ) {
        let Some(outcome) = session.mark(correct) else {
            self.status.set_error("No word to practise");
            return;
        };

        match outcome.set_change {
            Some(SetChange::Started { set_number }) => {
                self.status.set_message(format!("Practice set {set_number} started"))
            }
            Some(SetChange::Next { set_number }) => {
                self.status.set_message(format!("Set complete! On to set {set_number}"))
            }
            Some(SetChange::Final { set_number }) => {
                self.status.set_message(format!("Set complete! Set {set_number} is the last one"))
            }
            Some(SetChange::Finished) => {
                self.status.set_message("Every practised word is mastered!")
            }
            None if outcome.newly_mastered => {
                self.status.set_message(format!("Mastered \"{}\"!", outcome.word))
            }
            None => self.status.clear_message(),
        }

        self.last_read = Some(outcome);
    }

    fn undo<B: StorageBackend, C: Clock, R: Rng>(&mut self, session: &mut Session<B, C, R>) {
        match session.undo() {
            UndoOutcome::Restored { word } => {
                self.last_read = None;
                self.status.set_message(format!("Undid \"{word}\""));
            }
            UndoOutcome::Expired => self.status.set_error("Too late to undo"),
            UndoOutcome::Nothing => self.status.set_error("Nothing to undo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::session::ManualClock;
    use crate::store::{MemoryBackend, ProfileStore};
    use crate::vocab::Vocabulary;

    type TestSession = Session<MemoryBackend, ManualClock, ChaCha8Rng>;

    fn session() -> TestSession {
        Session::open(
            ProfileStore::new(MemoryBackend::new()),
            "Asha",
            Vocabulary::from_words(["cat", "dog", "sun", "hat"]),
            ManualClock::new(1_000),
            ChaCha8Rng::seed_from_u64(3),
        )
    }

    fn config() -> Config {
        Config {
            profiles: vec!["Asha".into(), "Ravi".into()],
            default_profile: "Asha".into(),
            ..Default::default()
        }
    }

    #[test]
    fn marking_records_last_read() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        let word = session.current_word().unwrap().to_string();

        assert!(!state.handle_action(Action::MarkCorrect, &mut session, &config));
        let last = state.last_read.as_ref().unwrap();
        assert_eq!(last.word, word);
        assert!(last.correct);
    }

    #[test]
    fn undo_clears_feedback() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::MarkMissed, &mut session, &config);
        state.handle_action(Action::Undo, &mut session, &config);

        assert!(state.last_read.is_none());
        assert!(session.mastery_map().is_empty());
        assert!(!state.status.is_error);
    }

    #[test]
    fn undo_with_nothing_reports_error() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::Undo, &mut session, &config);
        assert!(state.status.is_error);
    }

    #[test]
    fn reset_needs_second_press() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::MarkCorrect, &mut session, &config);

        state.handle_action(Action::ResetAll, &mut session, &config);
        assert_eq!(state.pending_confirm, Some(Action::ResetAll));
        assert_eq!(session.mastery_map().len(), 1);

        state.handle_action(Action::ResetAll, &mut session, &config);
        assert_eq!(state.pending_confirm, None);
        assert!(session.mastery_map().is_empty());
    }

    #[test]
    fn other_key_cancels_pending_reset() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::MarkCorrect, &mut session, &config);
        state.handle_action(Action::ResetAll, &mut session, &config);
        state.handle_action(Action::Skip, &mut session, &config);
        state.handle_action(Action::ResetAll, &mut session, &config);

        assert_eq!(state.pending_confirm, Some(Action::ResetAll));
        assert_eq!(session.mastery_map().len(), 1);
    }

    #[test]
    fn escape_cancels_before_quitting() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::ResetSet, &mut session, &config);
        assert!(!state.handle_action(Action::Back, &mut session, &config));
        assert!(state.handle_action(Action::Back, &mut session, &config));
    }

    #[test]
    fn screens_toggle_and_block_scoring() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::ToggleStats, &mut session, &config);
        assert_eq!(state.screen, Screen::Stats);

        state.handle_action(Action::MarkCorrect, &mut session, &config);
        assert!(session.mastery_map().is_empty());

        state.handle_action(Action::ToggleHelp, &mut session, &config);
        assert_eq!(state.screen, Screen::Help);
        assert!(!state.handle_action(Action::Back, &mut session, &config));
        assert_eq!(state.screen, Screen::Practice);
    }

    #[test]
    fn next_profile_cycles_learners() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        state.handle_action(Action::NextProfile, &mut session, &config);
        assert_eq!(session.profile(), "Ravi");
        state.handle_action(Action::NextProfile, &mut session, &config);
        assert_eq!(session.profile(), "Asha");
    }

    #[test]
    fn quit_exits() {
        let (mut state, mut session, config) = (AppState::default(), session(), config());
        assert!(state.handle_action(Action::Quit, &mut session, &config));
    }
}
