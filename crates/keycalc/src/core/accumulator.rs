//! Input accumulator - the calculator's state machine
//!
//! Holds the committed tokens, the numeral currently being typed and the
//! "just evaluated" flag, and applies one input event at a time. Every
//! operation returns the refreshed equation display.
//!
//! ```text
//! Empty ──digit/dot──▶ Entering ──evaluate ok──▶ Evaluated
//!   ▲                    │  ▲                       │
//!   │                    │  └──── operator ─────────┤
//!   │                    └─ evaluate failed (stays) │
//!   └──────────── clear all (from anywhere) ────────┘
//! ```

use tracing::{debug, instrument, warn};

use crate::core::evaluator::Evaluator;
use crate::core::format::{format_number, raw_numeral};
use crate::core::history::{History, HistoryEntry};
use crate::core::token::{self, Operator, Token};
use crate::core::CalcError;

/// Display shown when nothing has been entered
pub const EMPTY_DISPLAY: &str = "0";

/// Coarse position in the input state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tokens and no current entry
    Empty,
    /// Accumulating input that has not been evaluated yet
    Entering,
    /// The last action was a successful evaluation
    Evaluated,
}

/// Outcome of an evaluate event
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Nothing to evaluate, or the expression ends in an operator
    Skipped,
    /// The evaluator rejected the expression; state is unchanged
    Failed(CalcError),
    /// The expression was evaluated and recorded in the history
    Success {
        /// The raw result value
        value: f64,
        /// The history entry that was appended
        entry: HistoryEntry,
    },
}

impl Evaluation {
    /// Returns true if the evaluation succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Calculator input state, explicitly owned by its caller
#[derive(Debug, Clone)]
pub struct InputAccumulator {
    tokens: Vec<Token>,
    entry: String,
    just_evaluated: bool,
    history: History,
    evaluator: Evaluator,
}

impl Default for InputAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAccumulator {
    /// Creates an empty accumulator with default history capacity and evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(History::new(), Evaluator::new())
    }

    /// Creates an empty accumulator from an explicit history and evaluator
    #[must_use]
    pub fn with_parts(history: History, evaluator: Evaluator) -> Self {
        Self {
            tokens: Vec::new(),
            entry: String::new(),
            just_evaluated: false,
            history,
            evaluator,
        }
    }

    // ----- accessors -----

    /// Committed tokens
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The numeral currently being typed (may be empty)
    #[must_use]
    pub fn current_entry(&self) -> &str {
        &self.entry
    }

    /// Whether the last completed action was a successful evaluation
    #[must_use]
    pub const fn just_evaluated(&self) -> bool {
        self.just_evaluated
    }

    /// Log of successful evaluations
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Current state machine phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.just_evaluated {
            Phase::Evaluated
        } else if self.tokens.is_empty() && self.entry.is_empty() {
            Phase::Empty
        } else {
            Phase::Entering
        }
    }

    /// Renders committed tokens plus the current entry, or `"0"` when empty
    #[must_use]
    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = self.tokens.iter().map(Token::as_str).collect();
        if !self.entry.is_empty() {
            parts.push(&self.entry);
        }
        if parts.is_empty() {
            EMPTY_DISPLAY.to_string()
        } else {
            parts.join(" ")
        }
    }

    // ----- input events -----

    /// Appends a digit or decimal point to the current entry
    ///
    /// Starts a fresh expression if the previous action was an evaluation.
    /// A second `.` in the same entry and characters that are neither digit
    /// nor `.` are ignored.
    pub fn on_digit_or_dot(&mut self, ch: char) -> String {
        if !(ch.is_ascii_digit() || ch == '.') {
            warn!(%ch, "ignoring non-numeric input");
            return self.display();
        }
        if self.just_evaluated {
            self.tokens.clear();
            self.entry.clear();
            self.just_evaluated = false;
        }
        if ch == '.' && self.entry.contains('.') {
            return self.display();
        }
        self.entry.push(ch);
        self.display()
    }

    /// Appends a digit `0-9`; larger values are ignored
    pub fn on_digit(&mut self, digit: u8) -> String {
        match char::from_digit(u32::from(digit), 10) {
            Some(ch) => self.on_digit_or_dot(ch),
            None => {
                warn!(digit, "ignoring out-of-range digit");
                self.display()
            }
        }
    }

    /// Appends a decimal point
    pub fn on_dot(&mut self) -> String {
        self.on_digit_or_dot('.')
    }

    /// Commits the current entry and appends an operator
    ///
    /// Continues from a previous result rather than starting over. Pressing
    /// two operators in a row keeps only the last one.
    pub fn on_operator(&mut self, op: Operator) -> String {
        self.just_evaluated = false;
        if self.tokens.is_empty() && self.entry.is_empty() {
            return self.display();
        }
        self.commit_entry();
        if self.tokens.last().is_some_and(Token::is_operator) {
            self.tokens.pop();
        }
        self.tokens.push(Token::Operator(op));
        self.display()
    }

    /// Toggles the sign of the current entry, or else of the last committed numeral
    pub fn on_toggle_sign(&mut self) -> String {
        if !self.entry.is_empty() {
            self.entry = token::toggle_sign(&self.entry);
        } else if let Some(Token::Numeral(text)) = self.tokens.last_mut() {
            *text = token::toggle_sign(text);
        }
        self.display()
    }

    /// Resets tokens, entry and the evaluated flag; history is kept
    pub fn on_clear_all(&mut self) -> String {
        self.tokens.clear();
        self.entry.clear();
        self.just_evaluated = false;
        self.display()
    }

    /// Evaluates the accumulated expression
    ///
    /// On success the token sequence collapses into a single numeral holding
    /// the raw result so further operators chain onto it. On failure the
    /// display is left as it was and the last numeral stays editable, so the
    /// input can be corrected and evaluated again.
    #[instrument(level = "debug", skip(self), fields(tokens = self.tokens.len()))]
    pub fn on_evaluate(&mut self) -> Evaluation {
        let committed = self.commit_entry();
        if matches!(self.tokens.last(), None | Some(Token::Operator(_))) {
            debug!("nothing to evaluate");
            return Evaluation::Skipped;
        }

        let snapshot = token::render(&self.tokens);
        let value = match self.evaluator.evaluate(&self.tokens) {
            Ok(value) => value,
            Err(err) => {
                if committed {
                    self.reopen_entry();
                }
                if err == CalcError::IncompleteExpression {
                    return Evaluation::Skipped;
                }
                debug!(expression = %snapshot, error = %err, "evaluation failed");
                return Evaluation::Failed(err);
            }
        };

        let entry = HistoryEntry::new(snapshot, format_number(value));
        debug!(expression = %entry.expression, result = %entry.result, "evaluated");
        if let Some(evicted) = self.history.push(entry.clone()) {
            debug!(expression = %evicted.expression, "evicted oldest history entry");
        }

        self.tokens = vec![Token::Numeral(raw_numeral(value))];
        self.entry.clear();
        self.just_evaluated = true;
        Evaluation::Success { value, entry }
    }

    /// Clears the history log
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Moves the current entry into the tokens; returns whether anything moved
    fn commit_entry(&mut self) -> bool {
        if self.entry.is_empty() {
            return false;
        }
        let text = std::mem::take(&mut self.entry);
        debug!(numeral = %text, "committed entry");
        self.tokens.push(Token::Numeral(text));
        true
    }

    /// Undoes [`Self::commit_entry`]: the trailing numeral becomes the entry again
    fn reopen_entry(&mut self) {
        if !matches!(self.tokens.last(), Some(Token::Numeral(_))) {
            return;
        }
        if let Some(Token::Numeral(text)) = self.tokens.pop() {
            self.entry = text;
        }
    }
}
