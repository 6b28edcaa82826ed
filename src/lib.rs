// Library interface for wordle-sieve
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod vocabulary;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{
    FilterAction, FilterStep, GameInterface, SolveLoop, SolveOutcome, SolveState, apply_feedback,
    game_loop,
};
pub use solver::{
    Feedback, FeedbackError, FeedbackPattern, LetterScores, evaluate, exclude_letter,
    letter_scores, pin_letter, relocate_letter, score_letter, score_word, select_guess,
};
pub use vocabulary::{Vocabulary, WORD_LENGTH, Word, WordError};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
