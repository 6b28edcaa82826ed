use crate::solver::{
    Feedback, FeedbackPattern, exclude_letter, pin_letter, relocate_letter, select_guess,
};
use crate::vocabulary::{Vocabulary, WORD_LENGTH, Word};
use crate::{debug_log, info_log};

/// What happened to the vocabulary for one position of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Applied { removed: usize },
    /// Absent letter that is marked present or correct elsewhere in the same
    /// guess, so it does occur in the secret.
    SkippedDuplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStep {
    pub position: usize,
    pub letter: u8,
    pub feedback: Feedback,
    pub action: FilterAction,
}

impl FilterStep {
    pub fn removed(&self) -> usize {
        match self.action {
            FilterAction::Applied { removed } => removed,
            FilterAction::SkippedDuplicate => 0,
        }
    }
}

/// Source of feedback plus the display side of a solving session.
///
/// Interactive front ends ask a person for feedback; self-play computes it
/// against a known secret.
pub trait GameInterface {
    fn display_start(&mut self, vocabulary_size: usize);
    fn display_guess(&mut self, round: usize, guess: &Word);
    /// `None` means the user quit or input ended.
    fn read_feedback(&mut self, guess: &Word) -> Option<FeedbackPattern>;
    fn display_filter(&mut self, step: &FilterStep);
    fn display_remaining(&mut self, vocabulary: &Vocabulary);
    fn display_solved(&mut self, guesses: usize, word: &Word);
    fn display_exhausted(&mut self, guesses: usize);
    fn display_exit(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    SelectingGuess,
    AwaitingFeedback(Word),
    Filtering(Word, FeedbackPattern),
    Solved(Word),
    Exhausted,
    Aborted,
}

impl SolveState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Solved(_) | Self::Exhausted | Self::Aborted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved { guesses: usize, word: Word },
    Exhausted { guesses: usize },
    Aborted { guesses: usize },
}

impl SolveOutcome {
    pub fn guesses(&self) -> usize {
        match *self {
            Self::Solved { guesses, .. }
            | Self::Exhausted { guesses }
            | Self::Aborted { guesses } => guesses,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }
}

/// True when the letter at `position` also appears at another position of
/// `guess` whose feedback is not `Absent`.
pub fn non_gray_elsewhere(guess: &Word, pattern: &FeedbackPattern, position: usize) -> bool {
    let letter = guess.letter_at(position);
    (0..WORD_LENGTH).any(|j| {
        j != position && guess.letter_at(j) == letter && pattern.get(j) != Feedback::Absent
    })
}

/// Run the filter rule for every position of `guess`, in order.
pub fn apply_feedback(
    guess: &Word,
    pattern: &FeedbackPattern,
    vocabulary: &mut Vocabulary,
) -> Vec<FilterStep> {
    (0..WORD_LENGTH)
        .map(|position| {
            let letter = guess.letter_at(position);
            let feedback = pattern.get(position);
            let action = match feedback {
                Feedback::Absent if non_gray_elsewhere(guess, pattern, position) => {
                    debug_log!(
                        "apply_feedback() - '{}' at {} is gray but marked elsewhere, not excluding",
                        char::from(letter),
                        position
                    );
                    FilterAction::SkippedDuplicate
                }
                Feedback::Absent => FilterAction::Applied {
                    removed: exclude_letter(letter, vocabulary),
                },
                Feedback::PresentElsewhere => FilterAction::Applied {
                    removed: relocate_letter(letter, position, vocabulary),
                },
                Feedback::CorrectPosition => FilterAction::Applied {
                    removed: pin_letter(letter, position, vocabulary),
                },
            };
            FilterStep {
                position,
                letter,
                feedback,
                action,
            }
        })
        .collect()
}

/// Guess / feedback / filter state machine over an owned vocabulary.
#[derive(Debug, Clone)]
pub struct SolveLoop {
    vocabulary: Vocabulary,
    state: SolveState,
    guesses: usize,
}

impl SolveLoop {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            state: SolveState::SelectingGuess,
            guesses: 0,
        }
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn guesses(&self) -> usize {
        self.guesses
    }

    pub fn outcome(&self) -> Option<SolveOutcome> {
        let guesses = self.guesses;
        match self.state {
            SolveState::Solved(word) => Some(SolveOutcome::Solved { guesses, word }),
            SolveState::Exhausted => Some(SolveOutcome::Exhausted { guesses }),
            SolveState::Aborted => Some(SolveOutcome::Aborted { guesses }),
            SolveState::SelectingGuess
            | SolveState::AwaitingFeedback(_)
            | SolveState::Filtering(..) => None,
        }
    }

    /// Perform one transition and return the new state. Terminal states are
    /// left unchanged.
    pub fn step<I: GameInterface + ?Sized>(&mut self, interface: &mut I) -> SolveState {
        self.state = match self.state {
            SolveState::SelectingGuess => match select_guess(&self.vocabulary) {
                Some(guess) => {
                    self.guesses += 1;
                    interface.display_guess(self.guesses, &guess);
                    SolveState::AwaitingFeedback(guess)
                }
                None => {
                    info_log!("No guess available after {} guesses", self.guesses);
                    interface.display_exhausted(self.guesses);
                    SolveState::Exhausted
                }
            },
            SolveState::AwaitingFeedback(guess) => match interface.read_feedback(&guess) {
                Some(pattern) if pattern.is_solved() => {
                    interface.display_solved(self.guesses, &guess);
                    SolveState::Solved(guess)
                }
                Some(pattern) => SolveState::Filtering(guess, pattern),
                None => {
                    interface.display_exit();
                    SolveState::Aborted
                }
            },
            SolveState::Filtering(guess, pattern) => {
                info_log!("Filtering with '{}' -> {}", guess, pattern);
                for step in apply_feedback(&guess, &pattern, &mut self.vocabulary) {
                    interface.display_filter(&step);
                }
                // Not the secret, whatever the rules concluded.
                if self.vocabulary.remove(&guess) {
                    debug_log!("'{}' survived its own feedback, removed", guess);
                }
                interface.display_remaining(&self.vocabulary);
                SolveState::SelectingGuess
            }
            terminal => terminal,
        };
        self.state
    }

    pub fn run<I: GameInterface + ?Sized>(mut self, interface: &mut I) -> SolveOutcome {
        loop {
            self.step(interface);
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
        }
    }
}

/// Solve starting from `initial_vocabulary` until solved, exhausted, or
/// the interface gives up.
pub fn game_loop<I: GameInterface + ?Sized>(
    initial_vocabulary: &[Word],
    interface: &mut I,
) -> SolveOutcome {
    interface.display_start(initial_vocabulary.len());
    let outcome = SolveLoop::new(initial_vocabulary.iter().copied().collect()).run(interface);
    info_log!("game_loop() - finished: {:?}", outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::evaluate;
    use std::collections::VecDeque;

    const DEMO_WORDS: [&str; 10] = [
        "stalk", "scrap", "shear", "batch", "motif", "tense", "ultra", "vital", "ether", "nadir",
    ];

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn demo_words() -> Vec<Word> {
        DEMO_WORDS.iter().map(|w| word(w)).collect()
    }

    fn pattern(text: &str) -> FeedbackPattern {
        text.parse().unwrap()
    }

    /// Replays canned feedback, or evaluates against a secret when given one.
    #[derive(Default)]
    struct ScriptedInterface {
        secret: Option<Word>,
        script: VecDeque<Option<FeedbackPattern>>,
        guesses: Vec<Word>,
        steps: Vec<FilterStep>,
        remaining: Vec<usize>,
        solved: Option<(usize, Word)>,
        exhausted: Option<usize>,
        exited: bool,
    }

    impl ScriptedInterface {
        fn against(secret: &str) -> Self {
            Self {
                secret: Some(word(secret)),
                ..Self::default()
            }
        }

        fn scripted(feedback: &[Option<&str>]) -> Self {
            Self {
                script: feedback.iter().map(|f| f.map(pattern)).collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_start(&mut self, _vocabulary_size: usize) {}

        fn display_guess(&mut self, round: usize, guess: &Word) {
            assert_eq!(round, self.guesses.len() + 1);
            self.guesses.push(*guess);
        }

        fn read_feedback(&mut self, guess: &Word) -> Option<FeedbackPattern> {
            match self.secret {
                Some(secret) => Some(evaluate(&secret, guess).0),
                None => self.script.pop_front().flatten(),
            }
        }

        fn display_filter(&mut self, step: &FilterStep) {
            self.steps.push(*step);
        }

        fn display_remaining(&mut self, vocabulary: &Vocabulary) {
            self.remaining.push(vocabulary.len());
        }

        fn display_solved(&mut self, guesses: usize, word: &Word) {
            self.solved = Some((guesses, *word));
        }

        fn display_exhausted(&mut self, guesses: usize) {
            self.exhausted = Some(guesses);
        }

        fn display_exit(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_self_play_solves_nadir() {
        let mut interface = ScriptedInterface::against("nadir");
        let outcome = game_loop(&demo_words(), &mut interface);

        assert!(outcome.is_solved());
        assert!(outcome.guesses() <= DEMO_WORDS.len());
        assert_eq!(
            outcome,
            SolveOutcome::Solved {
                guesses: interface.guesses.len(),
                word: word("nadir"),
            }
        );
        assert_eq!(interface.solved, Some((outcome.guesses(), word("nadir"))));
    }

    #[test]
    fn test_self_play_solves_every_demo_word() {
        for secret in DEMO_WORDS {
            let mut interface = ScriptedInterface::against(secret);
            let outcome = game_loop(&demo_words(), &mut interface);
            assert_eq!(
                outcome,
                SolveOutcome::Solved {
                    guesses: outcome.guesses(),
                    word: word(secret),
                },
                "secret {secret}"
            );
            assert!(outcome.guesses() <= DEMO_WORDS.len());
        }
    }

    #[test]
    fn test_remaining_shrinks_every_round() {
        let mut interface = ScriptedInterface::against("nadir");
        game_loop(&demo_words(), &mut interface);

        let mut previous = DEMO_WORDS.len();
        for &remaining in &interface.remaining {
            assert!(remaining < previous);
            previous = remaining;
        }
    }

    #[test]
    fn test_empty_vocabulary_is_exhausted_immediately() {
        let mut interface = ScriptedInterface::against("nadir");
        let outcome = game_loop(&[], &mut interface);

        assert_eq!(outcome, SolveOutcome::Exhausted { guesses: 0 });
        assert_eq!(interface.exhausted, Some(0));
        assert!(interface.guesses.is_empty());
    }

    #[test]
    fn test_secret_outside_vocabulary_is_exhausted() {
        let mut interface = ScriptedInterface::against("zzzzz");
        let outcome = game_loop(&demo_words(), &mut interface);

        assert!(matches!(outcome, SolveOutcome::Exhausted { .. }));
        assert!(outcome.guesses() >= 1);
        assert!(interface.solved.is_none());
    }

    #[test]
    fn test_quit_aborts() {
        let mut interface = ScriptedInterface::scripted(&[Some("xxxyy"), None]);
        let outcome = game_loop(&demo_words(), &mut interface);

        assert_eq!(outcome, SolveOutcome::Aborted { guesses: 2 });
        assert!(interface.exited);
    }

    #[test]
    fn test_step_walks_through_states() {
        let mut solve = SolveLoop::new(demo_words().into_iter().collect());
        let mut interface = ScriptedInterface::scripted(&[Some("xxxyy"), Some("ggggg")]);
        assert_eq!(solve.state(), SolveState::SelectingGuess);

        let SolveState::AwaitingFeedback(first) = solve.step(&mut interface) else {
            panic!("expected a guess");
        };
        assert_eq!(solve.guesses(), 1);
        assert_eq!(
            solve.step(&mut interface),
            SolveState::Filtering(first, pattern("xxxyy"))
        );
        assert_eq!(solve.step(&mut interface), SolveState::SelectingGuess);
        assert!(!solve.vocabulary().contains(&first));

        let SolveState::AwaitingFeedback(second) = solve.step(&mut interface) else {
            panic!("expected a second guess");
        };
        assert_eq!(solve.step(&mut interface), SolveState::Solved(second));
        assert!(solve.state().is_terminal());
        assert_eq!(solve.step(&mut interface), SolveState::Solved(second));
        assert_eq!(
            solve.outcome(),
            Some(SolveOutcome::Solved {
                guesses: 2,
                word: second,
            })
        );
    }

    #[test]
    fn test_apply_feedback_skips_gray_duplicate() {
        let mut vocabulary: Vocabulary =
            ["sheer", "agent", "often"].iter().map(|w| word(w)).collect();
        let steps = apply_feedback(&word("sheer"), &pattern("xxgxx"), &mut vocabulary);

        let actions: Vec<FilterAction> = steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                FilterAction::Applied { removed: 1 },
                FilterAction::Applied { removed: 0 },
                FilterAction::Applied { removed: 1 },
                FilterAction::SkippedDuplicate,
                FilterAction::Applied { removed: 0 },
            ]
        );
        let live: Vec<&str> = vocabulary.iter().map(Word::as_str).collect();
        assert_eq!(live, vec!["agent"]);
    }

    #[test]
    fn test_apply_feedback_excludes_when_every_copy_is_gray() {
        let mut vocabulary: Vocabulary =
            ["sheer", "agent", "plank"].iter().map(|w| word(w)).collect();
        let steps = apply_feedback(&word("sheer"), &pattern("xxxxx"), &mut vocabulary);

        assert!(
            steps
                .iter()
                .all(|s| matches!(s.action, FilterAction::Applied { .. }))
        );
        let live: Vec<&str> = vocabulary.iter().map(Word::as_str).collect();
        assert_eq!(live, vec!["plank"]);
    }

    /// Same per-position rules as `apply_feedback`, last position first.
    fn apply_feedback_reversed(
        guess: &Word,
        feedback: &FeedbackPattern,
        vocabulary: &mut Vocabulary,
    ) {
        for position in (0..WORD_LENGTH).rev() {
            let letter = guess.letter_at(position);
            match feedback.get(position) {
                Feedback::Absent if non_gray_elsewhere(guess, feedback, position) => {}
                Feedback::Absent => {
                    exclude_letter(letter, vocabulary);
                }
                Feedback::PresentElsewhere => {
                    relocate_letter(letter, position, vocabulary);
                }
                Feedback::CorrectPosition => {
                    pin_letter(letter, position, vocabulary);
                }
            }
        }
    }

    fn assert_order_independent(words: &[Word], guess: &Word, feedback: &FeedbackPattern) {
        let mut forward: Vocabulary = words.iter().copied().collect();
        let mut reversed = forward.clone();

        let steps = apply_feedback(guess, feedback, &mut forward);
        apply_feedback_reversed(guess, feedback, &mut reversed);

        assert_eq!(forward, reversed, "guess {guess} with {feedback}");
        let removed: usize = steps.iter().map(FilterStep::removed).sum();
        assert_eq!(removed, words.len() - forward.len(), "guess {guess} with {feedback}");
    }

    #[test]
    fn test_rule_order_does_not_change_result() {
        let words = demo_words();
        assert_order_independent(&words, &word("ultra"), &pattern("xxxyy"));
        assert_order_independent(&words, &word("stalk"), &pattern("gxxyx"));

        let doubles: Vec<Word> = ["sheer", "agent", "often", "geese", "tense", "plank"]
            .iter()
            .map(|w| word(w))
            .collect();
        // Both exercise the skipped gray duplicate.
        assert_order_independent(&doubles, &word("sheer"), &pattern("xxgxx"));
        assert_order_independent(&doubles, &word("geese"), &pattern("xgxxy"));
        assert_order_independent(&doubles, &word("sheer"), &pattern("xxxxx"));

        for secret in &words {
            for guess in &words {
                let (feedback, _) = evaluate(secret, guess);
                assert_order_independent(&words, guess, &feedback);
            }
        }
    }

    #[test]
    fn test_non_gray_elsewhere() {
        let guess = word("geese");
        let feedback = pattern("xgxxy");
        assert!(non_gray_elsewhere(&guess, &feedback, 2));
        assert!(non_gray_elsewhere(&guess, &feedback, 4));
        assert!(!non_gray_elsewhere(&guess, &feedback, 0));
        assert!(!non_gray_elsewhere(&guess, &feedback, 3));
    }

    #[test]
    fn test_guess_surviving_contradictory_feedback_is_removed() {
        // The last 'e' is gray but the others are green, so no rule drops "geese".
        let mut interface = ScriptedInterface::scripted(&[Some("ggggx")]);
        let outcome = game_loop(&[word("geese")], &mut interface);

        assert_eq!(outcome, SolveOutcome::Exhausted { guesses: 1 });
        assert_eq!(interface.remaining, vec![0]);
        assert!(interface.steps.iter().all(|s| s.removed() == 0));
    }
}
