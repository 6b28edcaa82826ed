//! Candidate words and the tombstoning container that holds them.
//!
//! A `Vocabulary` never changes its slot count after construction. Filtering
//! empties slots in place, so a slot that has been removed stays removed and
//! the remaining words keep their slot positions.

use std::fmt;
use std::str::FromStr;

pub const WORD_LENGTH: usize = 5;
pub const ALPHABET_SIZE: usize = 26;

/// Error type for text that is not a valid five-letter word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength(usize),
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "word must be exactly {WORD_LENGTH} letters, got {len}")
            }
            Self::NonAscii => write!(f, "word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "word contains characters other than a-z"),
        }
    }
}

impl std::error::Error for WordError {}

/// A lowercase five-letter word, stored as ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Validate and lowercase `text`.
    /// Returns `WordError` if the text is not exactly five ASCII letters.
    pub fn new(text: &str) -> Result<Self, WordError> {
        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }
        let lower = text.to_ascii_lowercase();
        let bytes: [u8; WORD_LENGTH] = lower
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(lower.len()))?;
        if !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(WordError::InvalidCharacters);
        }
        Ok(Self(bytes))
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII lowercase letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub const fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    /// Letter at `position`, which must be below `WORD_LENGTH`.
    pub fn letter_at(&self, position: usize) -> u8 {
        assert!(
            position < WORD_LENGTH,
            "position {position} out of range for a {WORD_LENGTH}-letter word"
        );
        self.0[position]
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Ordered candidate words with tombstoned slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    slots: Vec<Option<Word>>,
}

impl Vocabulary {
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        Self {
            slots: words.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, live or emptied. Fixed at construction.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live words.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Live words in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.slots.iter().flatten()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.iter().any(|w| w == word)
    }

    /// Empty every live slot whose word matches `predicate`, returning how
    /// many were emptied.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Word) -> bool,
    {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(&mut predicate) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    /// Empty the slot(s) holding `word`. Returns whether anything was removed.
    pub fn remove(&mut self, word: &Word) -> bool {
        self.remove_where(|w| w == word) > 0
    }
}

impl FromIterator<Word> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter)
    }
}
