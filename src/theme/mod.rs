//! Theming system for sightread

mod tokyo_night;

pub use tokyo_night::{TOKYO_NIGHT, TOKYO_NIGHT_DAY};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::mastery::TileTone;

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Word tiles
    pub tile_mastered: Color,
    pub tile_untried: Color,
    pub tile_failing: Color,
    pub tile_near_mastery: Color,
    pub tile_progressing: Color,
    pub tile_low_accuracy: Color,
    pub tile_fair_accuracy: Color,
    pub tile_good_accuracy: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Theme {
    /// Theme names accepted in the config file
    pub const NAMES: [&'static str; 2] = ["Tokyo Night", "Tokyo Night Day"];

    /// Look up a theme by name, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("Tokyo Night") {
            Some(Self::tokyo_night())
        } else if name.eq_ignore_ascii_case("Tokyo Night Day") {
            Some(Self::tokyo_night_day())
        } else {
            None
        }
    }

    /// Tile color for a word's classification
    pub fn tone_color(&self, tone: TileTone) -> Color {
        match tone {
            TileTone::Mastered => self.tile_mastered,
            TileTone::Untried => self.tile_untried,
            TileTone::Failing => self.tile_failing,
            TileTone::NearMastery => self.tile_near_mastery,
            TileTone::Progressing => self.tile_progressing,
            TileTone::LowAccuracy => self.tile_low_accuracy,
            TileTone::FairAccuracy => self.tile_fair_accuracy,
            TileTone::GoodAccuracy => self.tile_good_accuracy,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
