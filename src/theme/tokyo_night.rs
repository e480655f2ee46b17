//! Tokyo Night themes

use ratatui::style::Color;

use super::Theme;

/// Tokyo Night color palette
pub const TOKYO_NIGHT: Theme = Theme {
    name: String::new(), // Will be set properly with const fn when stabilized

    // Background colors
    bg_primary: Color::Rgb(26, 27, 38),   // #1a1b26
    bg_secondary: Color::Rgb(36, 40, 59), // #24283b
    bg_tertiary: Color::Rgb(65, 72, 104), // #414868

    // Foreground colors
    fg_primary: Color::Rgb(169, 177, 214),   // #a9b1d6
    fg_secondary: Color::Rgb(192, 202, 245), // #c0caf5
    fg_muted: Color::Rgb(86, 95, 137),       // #565f89

    // Accent colors
    accent_primary: Color::Rgb(122, 162, 247),   // #7aa2f7
    accent_secondary: Color::Rgb(187, 154, 247), // #bb9af7

    // Semantic colors
    success: Color::Rgb(158, 206, 106), // #9ece6a
    warning: Color::Rgb(224, 175, 104), // #e0af68
    error: Color::Rgb(247, 118, 142),   // #f7768e
    info: Color::Rgb(125, 207, 255),    // #7dcfff

    // Word tiles
    tile_mastered: Color::Rgb(158, 206, 106),      // #9ece6a
    tile_untried: Color::Rgb(86, 95, 137),         // #565f89
    tile_failing: Color::Rgb(219, 75, 75),         // #db4b4b
    tile_near_mastery: Color::Rgb(224, 175, 104),  // #e0af68
    tile_progressing: Color::Rgb(255, 117, 127),   // #ff757f
    tile_low_accuracy: Color::Rgb(247, 118, 142),  // #f7768e
    tile_fair_accuracy: Color::Rgb(255, 158, 100), // #ff9e64
    tile_good_accuracy: Color::Rgb(115, 218, 202), // #73daca

    // UI elements
    border: Color::Rgb(65, 72, 104),           // #414868
    border_focused: Color::Rgb(122, 162, 247), // #7aa2f7
    selection: Color::Rgb(40, 52, 87),         // #283457
};

/// Tokyo Night Day, the light variant
pub const TOKYO_NIGHT_DAY: Theme = Theme {
    name: String::new(),

    bg_primary: Color::Rgb(225, 226, 231),   // #e1e2e7
    bg_secondary: Color::Rgb(208, 213, 227), // #d0d5e3
    bg_tertiary: Color::Rgb(196, 200, 218),  // #c4c8da

    fg_primary: Color::Rgb(55, 96, 191),    // #3760bf
    fg_secondary: Color::Rgb(97, 114, 176), // #6172b0
    fg_muted: Color::Rgb(132, 140, 181),    // #848cb5

    accent_primary: Color::Rgb(46, 125, 233),   // #2e7de9
    accent_secondary: Color::Rgb(152, 84, 241), // #9854f1

    success: Color::Rgb(88, 117, 57),  // #587539
    warning: Color::Rgb(140, 108, 62), // #8c6c3e
    error: Color::Rgb(245, 42, 101),   // #f52a65
    info: Color::Rgb(0, 113, 151),     // #007197

    tile_mastered: Color::Rgb(88, 117, 57),       // #587539
    tile_untried: Color::Rgb(132, 140, 181),      // #848cb5
    tile_failing: Color::Rgb(198, 67, 67),        // #c64343
    tile_near_mastery: Color::Rgb(140, 108, 62),  // #8c6c3e
    tile_progressing: Color::Rgb(216, 46, 109),   // #d82e6d
    tile_low_accuracy: Color::Rgb(245, 42, 101),  // #f52a65
    tile_fair_accuracy: Color::Rgb(177, 92, 0),   // #b15c00
    tile_good_accuracy: Color::Rgb(17, 140, 116), // #118c74

    border: Color::Rgb(168, 174, 203),        // #a8aecb
    border_focused: Color::Rgb(46, 125, 233), // #2e7de9
    selection: Color::Rgb(182, 191, 226),     // #b6bfe2
};

// Workaround for const String
impl Theme {
    pub fn tokyo_night() -> Self {
        Theme { name: "Tokyo Night".to_string(), ..TOKYO_NIGHT }
    }

    pub fn tokyo_night_day() -> Self {
        Theme { name: "Tokyo Night Day".to_string(), ..TOKYO_NIGHT_DAY }
    }
}
