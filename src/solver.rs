use crate::vocabulary::{ALPHABET_SIZE, Vocabulary, WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use std::fmt;
use std::str::FromStr;

/// Outcome for one letter position of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter does not occur in the secret (gray)
    Absent,
    /// Letter occurs in the secret, but not here (yellow)
    PresentElsewhere,
    /// Letter occurs in the secret at this position (green)
    CorrectPosition,
}

impl Feedback {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(Self::CorrectPosition),
            'y' => Some(Self::PresentElsewhere),
            'x' => Some(Self::Absent),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Self::CorrectPosition => 'g',
            Self::PresentElsewhere => 'y',
            Self::Absent => 'x',
        }
    }

    pub const fn color_name(self) -> &'static str {
        match self {
            Self::CorrectPosition => "green",
            Self::PresentElsewhere => "yellow",
            Self::Absent => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    InvalidLength(usize),
    InvalidSymbol(char),
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "feedback must be exactly {WORD_LENGTH} characters, got {len}")
            }
            Self::InvalidSymbol(c) => {
                write!(f, "'{c}' is not a feedback symbol (use g, y or x)")
            }
        }
    }
}

impl std::error::Error for FeedbackError {}

/// Feedback for a whole guess, one class per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern([Feedback; WORD_LENGTH]);

impl FeedbackPattern {
    pub const SOLVED: Self = Self([Feedback::CorrectPosition; WORD_LENGTH]);

    pub const fn new(classes: [Feedback; WORD_LENGTH]) -> Self {
        Self(classes)
    }

    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&f| f == Feedback::CorrectPosition)
    }

    pub const fn classes(&self) -> &[Feedback; WORD_LENGTH] {
        &self.0
    }

    pub fn get(&self, position: usize) -> Feedback {
        self.0[position]
    }
}

impl FromStr for FeedbackPattern {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != WORD_LENGTH {
            return Err(FeedbackError::InvalidLength(count));
        }
        let mut classes = [Feedback::Absent; WORD_LENGTH];
        for (slot, c) in classes.iter_mut().zip(s.chars()) {
            *slot = Feedback::from_char(c).ok_or(FeedbackError::InvalidSymbol(c))?;
        }
        Ok(Self(classes))
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|fb| write!(f, "{}", fb.to_char()))
    }
}

/// Coverage count for each of the 26 letters, slot 0 is 'a'.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterScores([usize; ALPHABET_SIZE]);

impl LetterScores {
    pub const fn from_counts(counts: [usize; ALPHABET_SIZE]) -> Self {
        Self(counts)
    }

    /// Coverage count for a lowercase ASCII letter.
    pub fn get(&self, letter: u8) -> usize {
        assert!(letter.is_ascii_lowercase(), "not a lowercase letter: {letter}");
        self.0[usize::from(letter - b'a')]
    }
}

/// Number of live words containing `letter` at least once.
pub fn score_letter(letter: u8, vocabulary: &Vocabulary) -> usize {
    vocabulary.iter().filter(|w| w.contains(letter)).count()
}

/// Coverage counts for the whole alphabet, recomputed from scratch.
pub fn letter_scores(vocabulary: &Vocabulary) -> LetterScores {
    let mut counts = [0; ALPHABET_SIZE];
    for (letter, count) in (b'a'..=b'z').zip(counts.iter_mut()) {
        *count = score_letter(letter, vocabulary);
    }
    LetterScores(counts)
}

/// Sum of coverage counts over the distinct letters of `word`.
pub fn score_word(word: &Word, scores: &LetterScores) -> usize {
    (b'a'..=b'z')
        .filter(|&letter| word.contains(letter))
        .map(|letter| scores.get(letter))
        .sum()
}

/// Highest-scoring live word. The earliest word wins ties.
///
/// Returns `None` once the vocabulary is empty.
#[must_use]
pub fn select_guess(vocabulary: &Vocabulary) -> Option<Word> {
    let scores = letter_scores(vocabulary);
    let mut best: Option<(Word, usize)> = None;
    for word in vocabulary.iter() {
        let score = score_word(word, &scores);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((*word, score));
        }
    }
    if let Some((word, score)) = best {
        info_log!(
            "select_guess() - '{}' scores {} among {} words",
            word,
            score,
            vocabulary.len()
        );
    }
    best.map(|(word, _)| word)
}

/// Feedback for `guess` against a known `secret`, plus whether they match.
///
/// A guessed letter is marked present whenever it occurs anywhere in the
/// secret. Repeated guess letters are not capped by the number of times the
/// letter occurs in the secret.
#[must_use]
pub fn evaluate(secret: &Word, guess: &Word) -> (FeedbackPattern, bool) {
    let mut classes = [Feedback::Absent; WORD_LENGTH];
    for (i, class) in classes.iter_mut().enumerate() {
        let letter = guess.letter_at(i);
        if letter == secret.letter_at(i) {
            *class = Feedback::CorrectPosition;
        } else if secret.contains(letter) {
            *class = Feedback::PresentElsewhere;
        }
    }
    (FeedbackPattern(classes), secret == guess)
}

/// Remove every word containing `letter`.
pub fn exclude_letter(letter: u8, vocabulary: &mut Vocabulary) -> usize {
    let removed = vocabulary.remove_where(|w| w.contains(letter));
    debug_log!("exclude_letter({}) removed {}", char::from(letter), removed);
    removed
}

/// Remove every word that lacks `letter`, or has it at `position`.
/// Panics if `position >= WORD_LENGTH`.
pub fn relocate_letter(letter: u8, position: usize, vocabulary: &mut Vocabulary) -> usize {
    assert!(position < WORD_LENGTH, "filter position {position} out of range");
    let removed =
        vocabulary.remove_where(|w| !w.contains(letter) || w.letter_at(position) == letter);
    debug_log!(
        "relocate_letter({}, {}) removed {}",
        char::from(letter),
        position,
        removed
    );
    removed
}

/// Remove every word whose letter at `position` is not `letter`.
/// Panics if `position >= WORD_LENGTH`.
pub fn pin_letter(letter: u8, position: usize, vocabulary: &mut Vocabulary) -> usize {
    assert!(position < WORD_LENGTH, "filter position {position} out of range");
    let removed = vocabulary.remove_where(|w| w.letter_at(position) != letter);
    debug_log!(
        "pin_letter({}, {}) removed {}",
        char::from(letter),
        position,
        removed
    );
    removed
}
