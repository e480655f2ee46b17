//! UI rendering components

pub mod help;
pub mod layout;
pub mod practice;
pub mod stats;
pub mod status_line;

use rand::Rng;
use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::config::Config;
use crate::session::{Clock, Session};
use crate::store::StorageBackend;

/// Main draw function
pub fn draw<B, C, R>(
    frame: &mut Frame,
    state: &AppState,
    session: &Session<B, C, R>,
    config: &Config,
) where
    B: StorageBackend,
    C: Clock,
    R: Rng,
{
    let theme = config.active_theme();

    match state.screen {
        Screen::Practice => practice::draw(frame, state, session, &theme),
        Screen::Stats => stats::draw(frame, state, session, &theme),
        Screen::Help => {
            practice::draw(frame, state, session, &theme);
            let area = frame.area();
            help::draw(frame, area, &theme);
        }
    }
}
