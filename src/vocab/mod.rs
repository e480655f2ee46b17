//! The static word list being practised

mod dolch;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::mastery::{MasteryMap, untested_words};

/// An ordered list of unique words, fixed for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// The Dolch sight words, easiest level first
    pub fn builtin() -> Self {
        Self::from_words(dolch::LEVELS.iter().flat_map(|level| level.iter().copied()))
    }

    /// Build from words, trimming them and dropping blanks and repeats
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    /// Read a word list: one word per line, `#` starts a comment line
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list from {:?}", path))?;
        let vocabulary =
            Self::from_words(contents.lines().filter(|line| !line.trim_start().starts_with('#')));
        anyhow::ensure!(!vocabulary.is_empty(), "Word list {:?} has no words", path);
        Ok(vocabulary)
    }

    /// Custom list if configured, otherwise the built-in words
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// A random never-attempted word, falling back to any word once every
    /// word has been tried
    pub fn pick_fresh<R: Rng>(&self, map: &MasteryMap, rng: &mut R) -> Option<String> {
        let untested = untested_words(map, &self.words);
        match untested.choose(rng) {
            Some(word) => Some(word.to_string()),
            None => self.words.choose(rng).cloned(),
        }
    }
}
