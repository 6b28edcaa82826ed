//! TUI (Terminal User Interface) for interactive solving
//!
//! The solver proposes a guess and the user marks each of its letters with
//! the colour the game showed.
//!
//! # Architecture
//! - `FeedbackBoard`: key handling and board model, no terminal access
//! - `TuiInterface`: owns the terminal, renders the board and implements
//!   `GameInterface`
//!
//! # State Machine
//! `Idle` → `Marking { index }` → `Confirming` → back to `Idle` once the
//! feedback is handed to the solve loop. `GameOver` is terminal.

use crate::game_state::{FilterAction, FilterStep, GameInterface};
use crate::solver::{Feedback, FeedbackPattern};
use crate::vocabulary::{Vocabulary, WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LetterState {
    Unmarked,
    Marked(Feedback),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Unmarked => (Color::DarkGray, Color::White),
            Self::Marked(Feedback::CorrectPosition) => (Color::Green, Color::Black),
            Self::Marked(Feedback::PresentElsewhere) => (Color::Yellow, Color::Black),
            Self::Marked(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug, Clone)]
struct GuessRow {
    word: Word,
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn new(word: Word) -> Self {
        Self {
            word,
            states: [LetterState::Unmarked; WORD_LENGTH],
        }
    }

    fn pattern(&self) -> Option<FeedbackPattern> {
        let mut classes = [Feedback::Absent; WORD_LENGTH];
        for (class, state) in classes.iter_mut().zip(self.states) {
            match state {
                LetterState::Marked(feedback) => *class = feedback,
                LetterState::Unmarked => return None,
            }
        }
        Some(FeedbackPattern::new(classes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardState {
    #[default]
    Idle,
    Marking {
        index: usize,
    },
    Confirming,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Pending,
    Confirmed(FeedbackPattern),
    Exit,
    Dismissed,
}

/// Board model and key handling, independent of the terminal.
#[derive(Debug, Default)]
pub struct FeedbackBoard {
    rows: Vec<GuessRow>,
    state: BoardState,
    error_message: String,
}

impl FeedbackBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Start marking a freshly proposed guess.
    pub fn push_guess(&mut self, guess: Word) {
        self.rows.push(GuessRow::new(guess));
        self.state = BoardState::Marking { index: 0 };
        self.error_message.clear();
    }

    pub fn finish(&mut self) {
        self.state = BoardState::GameOver;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Pending;
        }
        match self.state {
            BoardState::Idle => {
                if key.code == KeyCode::Esc {
                    KeyOutcome::Exit
                } else {
                    KeyOutcome::Pending
                }
            }
            BoardState::Marking { index } => self.handle_marking_key(key, index),
            BoardState::Confirming => self.handle_confirming_key(key),
            BoardState::GameOver => KeyOutcome::Dismissed,
        }
    }

    fn handle_marking_key(&mut self, key: KeyEvent, index: usize) -> KeyOutcome {
        if has_modifier_keys(&key) {
            debug_log!("handle_marking_key() - Ignoring input with modifier: {:?}", key.modifiers);
            return KeyOutcome::Pending;
        }
        let Some(row) = self.rows.last_mut() else {
            return KeyOutcome::Pending;
        };

        match key.code {
            KeyCode::Esc => return KeyOutcome::Exit,
            KeyCode::Backspace if index > 0 => {
                row.states[index - 1] = LetterState::Unmarked;
                self.state = BoardState::Marking { index: index - 1 };
                self.error_message.clear();
            }
            KeyCode::Char(c) => match Feedback::from_char(c.to_ascii_lowercase()) {
                Some(feedback) => {
                    row.states[index] = LetterState::Marked(feedback);
                    self.error_message.clear();
                    self.state = if index + 1 < WORD_LENGTH {
                        BoardState::Marking { index: index + 1 }
                    } else {
                        BoardState::Confirming
                    };
                }
                None => {
                    self.error_message = format!(
                        "Invalid feedback! Use G (green), Y (yellow), or X (gray). ('{c}' is not valid)"
                    );
                }
            },
            _ => {
                debug_log!("handle_marking_key() - Ignoring key: {:?}", key.code);
            }
        }
        KeyOutcome::Pending
    }

    fn handle_confirming_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => KeyOutcome::Exit,
            KeyCode::Enter => match self.rows.last().and_then(GuessRow::pattern) {
                Some(pattern) => {
                    info_log!("handle_confirming_key() - Feedback confirmed: {}", pattern);
                    self.state = BoardState::Idle;
                    KeyOutcome::Confirmed(pattern)
                }
                None => KeyOutcome::Pending,
            },
            KeyCode::Backspace => {
                if let Some(row) = self.rows.last_mut() {
                    row.states[WORD_LENGTH - 1] = LetterState::Unmarked;
                    self.state = BoardState::Marking {
                        index: WORD_LENGTH - 1,
                    };
                }
                KeyOutcome::Pending
            }
            _ => KeyOutcome::Pending,
        }
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

// Garbage characters show up when alt-tabbing in some terminals.
fn is_garbage_char(c: char) -> bool {
    c == '\u{FFFD}'
        || ((c as u32) < ASCII_CONTROL_CHAR_THRESHOLD && c != '\t' && c != '\n' && c != '\r')
}

/// Context for rendering the UI
struct RenderContext<'a> {
    board: &'a FeedbackBoard,
    remaining: usize,
    candidates: &'a [String],
    last_steps: &'a [FilterStep],
    message: &'a str,
    status: &'a str,
}

/// Terminal-backed `GameInterface`.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: FeedbackBoard,
    remaining: usize,
    candidates: Vec<String>,
    last_steps: Vec<FilterStep>,
    message: String,
    status: String,
}

impl TuiInterface {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: FeedbackBoard::new(),
            remaining: 0,
            candidates: Vec::new(),
            last_steps: Vec::new(),
            message: String::new(),
            status: "Ready".to_string(),
        })
    }

    /// Leave raw mode and the alternate screen.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: &self.board,
            remaining: self.remaining,
            candidates: &self.candidates,
            last_steps: &self.last_steps,
            message: &self.message,
            status: &self.status,
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Next key press, or `None` if nothing arrived within the poll timeout.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeyCode::Char(c) = key.code
                    && is_garbage_char(c)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn wait_for_dismiss(&mut self) {
        loop {
            self.draw_or_log();
            match self.next_key() {
                Ok(Some(key)) => {
                    if self.board.handle_key(key) == KeyOutcome::Dismissed {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_dismiss() - Input error: {}", e);
                    return;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_start(&mut self, vocabulary_size: usize) {
        self.remaining = vocabulary_size;
        self.message = format!("Loaded {vocabulary_size} words.");
        self.draw_or_log();
    }

    fn display_guess(&mut self, round: usize, guess: &Word) {
        self.board.push_guess(*guess);
        self.last_steps.clear();
        self.status = format!(
            "Guess #{round}: {} - mark each letter",
            guess.as_str().to_uppercase()
        );
        self.draw_or_log();
    }

    fn read_feedback(&mut self, _guess: &Word) -> Option<FeedbackPattern> {
        loop {
            if matches!(self.board.state(), BoardState::Confirming) {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            if self.draw().is_err() {
                debug_log!("read_feedback() - Draw failed");
                return None;
            }
            match self.next_key() {
                Ok(Some(key)) => match self.board.handle_key(key) {
                    KeyOutcome::Confirmed(pattern) => {
                        self.status = format!("Feedback recorded: {pattern}");
                        return Some(pattern);
                    }
                    KeyOutcome::Exit => return None,
                    KeyOutcome::Pending | KeyOutcome::Dismissed => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_feedback() - Input error: {}", e);
                    return None;
                }
            }
        }
    }

    fn display_filter(&mut self, step: &FilterStep) {
        self.last_steps.push(*step);
    }

    fn display_remaining(&mut self, vocabulary: &Vocabulary) {
        self.remaining = vocabulary.len();
        self.candidates = vocabulary
            .iter()
            .take(MAX_CANDIDATES_DISPLAY)
            .map(|w| w.as_str().to_uppercase())
            .collect();
        self.draw_or_log();
    }

    fn display_solved(&mut self, guesses: usize, word: &Word) {
        self.board.finish();
        self.message = format!(
            "✓ Solved: {} in {guesses} guesses",
            word.as_str().to_uppercase()
        );
        self.status = "Game Over - press any key".to_string();
        self.wait_for_dismiss();
    }

    fn display_exhausted(&mut self, guesses: usize) {
        self.board.finish();
        self.message = format!(
            "Out of candidates after {guesses} guesses - maybe the word is outside the vocabulary?"
        );
        self.status = "Game Over - press any key".to_string();
        self.wait_for_dismiss();
    }

    fn display_exit(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Guess board
            Constraint::Min(8),     // Info panel
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], ctx.board);
    render_info(f, chunks[2], ctx);
    render_status(f, chunks[3], ctx.status);
    render_instructions(f, chunks[4], ctx.board.state());
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE SIEVE")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, board: &FeedbackBoard) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Most recent rows win when the board is full.
    let available_rows = usize::from(inner.height / ROW_SPACING);
    let skip_count = board.rows.len().saturating_sub(available_rows);
    let last_index = board.rows.len().saturating_sub(1);

    for (display_index, (row_index, row)) in
        board.rows.iter().enumerate().skip(skip_count).enumerate()
    {
        let marking = match board.state {
            BoardState::Marking { index } if row_index == last_index => Some(index),
            _ => None,
        };
        render_guess_row(f, inner, display_index, row, marking);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_guess_row(
    f: &mut Frame,
    area: Rect,
    row_index: usize,
    row: &GuessRow,
    marking: Option<usize>,
) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for (letter, state) in row.word.letters().iter().zip(row.states) {
        let (bg_color, fg_color) = state.colors();
        spans.push(Span::styled(
            format!(" {} ", char::from(*letter).to_ascii_uppercase()),
            Style::default().fg(fg_color).bg(bg_color),
        ));
        spans.push(Span::raw(" "));
    }
    if let Some(index) = marking {
        spans.push(Span::raw(format!(" <- Marking letter {} (G/Y/X)", index + 1)));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = vec![Line::from(vec![Span::styled(
        format!("Possible candidates ({}):", ctx.remaining),
        INFO_STYLE,
    )])];
    for word in ctx.candidates {
        lines.push(Line::from(format!("  {word}")));
    }
    if ctx.remaining > ctx.candidates.len() && !ctx.candidates.is_empty() {
        lines.push(Line::from(format!(
            "  ... and {} more",
            ctx.remaining - ctx.candidates.len()
        )));
    }
    lines.push(Line::from(""));

    for step in ctx.last_steps {
        let letter = char::from(step.letter).to_ascii_uppercase();
        let text = match step.action {
            FilterAction::Applied { removed } => format!(
                "{} {letter} at {}: removed {removed}",
                step.feedback.color_name(),
                step.position + 1
            ),
            FilterAction::SkippedDuplicate => {
                format!("gray {letter} at {}: kept, marked elsewhere", step.position + 1)
            }
        };
        lines.push(Line::from(text));
    }

    if !ctx.message.is_empty() {
        let style = if matches!(ctx.board.state(), BoardState::GameOver) {
            SUCCESS_STYLE
        } else {
            MESSAGE_STYLE
        };
        lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
    }
    if !ctx.board.error_message().is_empty() {
        lines.push(Line::from(vec![Span::styled(
            ctx.board.error_message(),
            ERROR_STYLE,
        )]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: BoardState) {
    let text = match state {
        BoardState::Idle => "Working... | ESC: Quit",
        BoardState::Marking { .. } => {
            "G: Green (correct) | Y: Yellow (wrong position) | X: Gray (not in word) | BACKSPACE: Go back | ESC: Quit"
        }
        BoardState::Confirming => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
        BoardState::GameOver => "Press any key to quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}
