//! keycalc - keypad-driven arithmetic core
//!
//! Discrete key presses (digits, decimal point, the four binary operators,
//! sign toggle, clear, evaluate) accumulate into a flat token sequence that
//! is evaluated with two-tier precedence (`×`/`÷` before `+`/`-`, both left
//! to right). Successful evaluations are kept in a bounded history.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut session = Session::new();
//! for event in parse_script("10-6/2=").unwrap() {
//!     session.press(event);
//! }
//! assert_eq!(session.result(), "7");
//! assert_eq!(session.history().last().unwrap().display(), "10 - 6 ÷ 2 = 7");
//!
//! // Failures show the error indicator and keep the input for correction
//! let frame = session.run_script("C5/0=").unwrap();
//! assert_eq!(frame.result, "Error");
//! assert_eq!(frame.equation, "5 ÷ 0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod keypad;
pub mod session;

pub use crate::core::{CalcError, CalcResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        format_number, CalcError, CalcResult, Evaluation, Evaluator, History, HistoryEntry,
        InputAccumulator, Operator, Phase, Token,
    };
    pub use crate::keypad::{key_to_event, parse_script, InputEvent};
    pub use crate::session::{Frame, Session, SessionConfig};
}
