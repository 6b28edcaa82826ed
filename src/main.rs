use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use wordle_sieve::cli::{self, CliInterface, SelfPlayInterface, parse_cli};
use wordle_sieve::game_state::{SolveOutcome, game_loop};
use wordle_sieve::logging::{LogDestination, init_logging};
use wordle_sieve::tui::TuiInterface;
use wordle_sieve::vocabulary::Word;
use wordle_sieve::wordbank::{DEFAULT_VOCABULARY_FILE, load_vocabulary, resolve_source};

fn main() -> Result<()> {
    let args = parse_cli();
    let use_tui = args.tui && args.secret.is_none();
    let destination = if use_tui {
        LogDestination::File
    } else {
        LogDestination::Stderr
    };
    let log_path = init_logging(args.verbose, destination).context("Failed to set up logging")?;
    if let Some(path) = log_path {
        log::info!("Logging to {}", path.display());
    }
    if args.tui && !use_tui {
        log::warn!("--tui has no effect when a secret word is given");
    }

    let secret = match args.secret.as_deref() {
        Some(text) => {
            Some(Word::new(text).with_context(|| format!("Invalid secret word '{text}'"))?)
        }
        None => None,
    };

    let source = resolve_source(
        args.wordbank_path.as_deref(),
        Path::new(DEFAULT_VOCABULARY_FILE),
    );
    let words = load_vocabulary(&source)
        .with_context(|| format!("Failed to load vocabulary from '{source}'"))?;

    let outcome = match secret {
        Some(secret) => game_loop(&words, &mut SelfPlayInterface::new(secret)),
        None if use_tui => {
            let mut tui = TuiInterface::new().context("Failed to start the terminal UI")?;
            game_loop(&words, &mut tui)
        }
        None => game_loop(&words, &mut CliInterface::new(io::stdin().lock())),
    };

    // The alternate screen is gone by now; leave a record on the normal one.
    if use_tui {
        match outcome {
            SolveOutcome::Solved { guesses, .. } => cli::display_solved(guesses),
            SolveOutcome::Exhausted { .. } => cli::display_exhausted(),
            SolveOutcome::Aborted { .. } => cli::display_exit_message(),
        }
    }
    log::info!("Finished: {outcome:?}");
    Ok(())
}
