use crate::game_state::{FilterAction, FilterStep, GameInterface};
use crate::info_log;
use crate::solver::{FeedbackPattern, evaluate};
use crate::vocabulary::{Vocabulary, Word};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Letter-coverage solver for five-letter word games
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Secret word to solve against; omit it to type feedback yourself
    pub secret: Option<String>,

    /// Path to a whitespace-delimited vocabulary file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Mark feedback in a terminal UI instead of typing it
    #[arg(long)]
    pub tui: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum FeedbackInput {
    Valid(FeedbackPattern),
    Invalid,
    Exit,
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

pub fn read_feedback<R: BufRead>(reader: &mut R) -> FeedbackInput {
    println!("please enter result as 5 characters (g,y,x):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => {
            info_log!("read_feedback() - input closed");
            return FeedbackInput::Exit;
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("Failed to read feedback: {e}");
            return FeedbackInput::Exit;
        }
    }
    let input = input.trim_end_matches(['\n', '\r']);

    if is_exit_command(input) {
        return FeedbackInput::Exit;
    }
    match input.parse::<FeedbackPattern>() {
        Ok(pattern) => FeedbackInput::Valid(pattern),
        Err(e) => {
            println!("Invalid feedback: {e}.");
            FeedbackInput::Invalid
        }
    }
}

pub fn display_start(vocabulary_size: usize) {
    println!("Loaded {vocabulary_size} words.");
}

pub fn display_guess(round: usize, guess: &Word) {
    println!("GUESS #{round}: {guess}");
}

pub fn display_filter(step: &FilterStep) {
    match step.action {
        FilterAction::Applied { removed } => {
            println!(
                "filtering with {} letter: {}",
                step.feedback.color_name(),
                char::from(step.letter)
            );
            println!("removed {removed} words.");
        }
        FilterAction::SkippedDuplicate => {
            println!(
                "keeping words with {}: it is marked elsewhere in the guess",
                char::from(step.letter)
            );
        }
    }
}

pub fn display_remaining(vocabulary: &Vocabulary) {
    println!("{} candidates remain.", vocabulary.len());
}

pub fn display_solved(guesses: usize) {
    println!("correct! got it in {guesses} guesses!");
}

pub fn display_exhausted() {
    println!("oh no, could not guess it -- maybe outside the vocabulary?");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Interactive `GameInterface`: feedback is typed on a line per guess.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_start(&mut self, vocabulary_size: usize) {
        display_start(vocabulary_size);
    }

    fn display_guess(&mut self, round: usize, guess: &Word) {
        display_guess(round, guess);
    }

    fn read_feedback(&mut self, _guess: &Word) -> Option<FeedbackPattern> {
        loop {
            match read_feedback(&mut self.reader) {
                FeedbackInput::Valid(pattern) => return Some(pattern),
                FeedbackInput::Exit => return None,
                FeedbackInput::Invalid => {}
            }
        }
    }

    fn display_filter(&mut self, step: &FilterStep) {
        display_filter(step);
    }

    fn display_remaining(&mut self, vocabulary: &Vocabulary) {
        display_remaining(vocabulary);
    }

    fn display_solved(&mut self, guesses: usize, _word: &Word) {
        display_solved(guesses);
    }

    fn display_exhausted(&mut self, _guesses: usize) {
        display_exhausted();
    }

    fn display_exit(&mut self) {
        display_exit_message();
    }
}

/// Self-play `GameInterface`: feedback is computed against a known secret.
pub struct SelfPlayInterface {
    secret: Word,
}

impl SelfPlayInterface {
    pub fn new(secret: Word) -> Self {
        Self { secret }
    }
}

impl GameInterface for SelfPlayInterface {
    fn display_start(&mut self, vocabulary_size: usize) {
        display_start(vocabulary_size);
    }

    fn display_guess(&mut self, round: usize, guess: &Word) {
        display_guess(round, guess);
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<FeedbackPattern> {
        let (pattern, is_match) = evaluate(&self.secret, guess);
        info_log!("'{}' against the secret: {} (match: {})", guess, pattern, is_match);
        Some(pattern)
    }

    fn display_filter(&mut self, step: &FilterStep) {
        display_filter(step);
    }

    fn display_remaining(&mut self, vocabulary: &Vocabulary) {
        display_remaining(vocabulary);
    }

    fn display_solved(&mut self, guesses: usize, _word: &Word) {
        display_solved(guesses);
    }

    fn display_exhausted(&mut self, _guesses: usize) {
        display_exhausted();
    }

    fn display_exit(&mut self) {
        display_exit_message();
    }
}
