//! Sightread - sight-word reading practice in the terminal
//!
//! A parent shows a word, the child reads it aloud, and the parent marks the
//! read. Five correct reads in a row masters a word; practice rotates through
//! bounded sets of unknown words until the whole list is learned.

pub mod app;
pub mod config;
pub mod mastery;
pub mod rewards;
pub mod session;
pub mod store;
pub mod theme;
pub mod ui;
pub mod vocab;

pub use app::App;
pub use config::Config;
pub use session::Session;
pub use theme::Theme;
pub use vocab::Vocabulary;
