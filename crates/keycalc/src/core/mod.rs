//! Calculator core: tokens, input accumulation, evaluation and history
//!
//! Everything here is synchronous and owned by a single caller; no state
//! is shared between sessions.

pub mod accumulator;
pub mod evaluator;
pub mod format;
pub mod history;
pub mod token;

pub use accumulator::{Evaluation, InputAccumulator, Phase};
pub use evaluator::Evaluator;
pub use format::{format_number, raw_numeral};
pub use history::{History, HistoryEntry};
pub use token::{Operator, Token};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
///
/// None of these are fatal. The accumulator swallows
/// [`CalcError::IncompleteExpression`] and reports the rest to the display
/// as a single error indicator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Evaluate requested with nothing to evaluate or a trailing operator
    #[error("Incomplete expression")]
    IncompleteExpression,
    /// Token sequence does not alternate numeral/operator
    #[error("Malformed expression: {0}")]
    Malformed(String),
    /// A numeral did not parse as a finite decimal
    #[error("Invalid number: {0}")]
    ParseFailure(String),
    /// Right operand of a division is (approximately) zero
    #[error("Division by zero")]
    DivisionByZero,
    /// An intermediate or final result is NaN or infinite
    #[error("Result is not a finite number")]
    NonFinite,
    /// A key script contained a key with no keypad mapping
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),
}

impl CalcError {
    /// Returns true for failures produced by the evaluator itself
    #[must_use]
    pub const fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::ParseFailure(_) | Self::DivisionByZero | Self::NonFinite
        )
    }
}
