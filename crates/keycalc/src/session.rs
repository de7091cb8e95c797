//! Session: binds input events to the two calculator displays
//!
//! A [`Session`] owns one [`InputAccumulator`] plus the result display
//! string, and turns each [`InputEvent`] into a [`Frame`] that an input
//! surface can render directly.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::accumulator::EMPTY_DISPLAY;
use crate::core::{
    CalcError, CalcResult, Evaluation, Evaluator, History, HistoryEntry, InputAccumulator,
};
use crate::keypad::{self, InputEvent};

/// Result display text after a failed evaluation, unless configured
pub const DEFAULT_ERROR_INDICATOR: &str = "Error";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Divisors with a smaller magnitude count as zero
    pub zero_tolerance: f64,
    /// Text shown in the result display when an evaluation fails
    pub error_indicator: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            zero_tolerance: Evaluator::DEFAULT_ZERO_TOLERANCE,
            error_indicator: DEFAULT_ERROR_INDICATOR.to_string(),
        }
    }
}

impl SessionConfig {
    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set zero tolerance for divisors
    #[must_use]
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance.abs();
        self
    }

    /// Set error indicator text
    #[must_use]
    pub fn with_error_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.error_indicator = indicator.into();
        self
    }
}

/// What an input surface shows after one event
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Equation display
    pub equation: String,
    /// Result display
    pub result: String,
    /// History entry appended by this event, if it was a successful evaluate
    pub appended: Option<HistoryEntry>,
    /// Why the evaluate in this event failed, if it did
    pub failure: Option<CalcError>,
}

impl Frame {
    /// Returns true if this event ended in a failed evaluation
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// A calculator session
#[derive(Debug, Clone)]
pub struct Session {
    accumulator: InputAccumulator,
    result: String,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session from a configuration
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        let accumulator = InputAccumulator::with_parts(
            History::with_capacity(config.history_capacity),
            Evaluator::with_zero_tolerance(config.zero_tolerance),
        );
        Self {
            accumulator,
            result: EMPTY_DISPLAY.to_string(),
            config,
        }
    }

    /// Applies one input event
    pub fn press(&mut self, event: InputEvent) -> Frame {
        let mut appended = None;
        let mut failure = None;

        let equation = match event {
            InputEvent::Digit(d) => self.accumulator.on_digit(d),
            InputEvent::Dot => self.accumulator.on_dot(),
            InputEvent::Operator(op) => self.accumulator.on_operator(op),
            InputEvent::ToggleSign => self.accumulator.on_toggle_sign(),
            InputEvent::ClearAll => {
                self.result = EMPTY_DISPLAY.to_string();
                self.accumulator.on_clear_all()
            }
            InputEvent::Evaluate => {
                match self.accumulator.on_evaluate() {
                    Evaluation::Skipped => {}
                    Evaluation::Failed(err) => {
                        self.result.clone_from(&self.config.error_indicator);
                        failure = Some(err);
                    }
                    Evaluation::Success { entry, .. } => {
                        self.result.clone_from(&entry.result);
                        appended = Some(entry);
                    }
                }
                self.accumulator.display()
            }
        };

        debug!(key = %event, %equation, result = %self.result, "pressed");
        Frame {
            equation,
            result: self.result.clone(),
            appended,
            failure,
        }
    }

    /// Applies a sequence of events and returns the last frame
    ///
    /// With no events the current frame is returned.
    pub fn press_all(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Frame {
        events
            .into_iter()
            .map(|event| self.press(event))
            .last()
            .unwrap_or_else(|| self.frame())
    }

    /// Parses a key script and applies it
    ///
    /// ```
    /// use keycalc::session::Session;
    ///
    /// let mut session = Session::new();
    /// let frame = session.run_script("2+3*4=").unwrap();
    /// assert_eq!(frame.result, "14");
    /// assert_eq!(frame.appended.unwrap().expression, "2 + 3 × 4");
    /// ```
    pub fn run_script(&mut self, script: &str) -> CalcResult<Frame> {
        let events = keypad::parse_script(script)?;
        info!(keys = events.len(), "running script");
        Ok(self.press_all(events))
    }

    /// Current displays with nothing appended
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            equation: self.equation(),
            result: self.result.clone(),
            appended: None,
            failure: None,
        }
    }

    /// Equation display
    #[must_use]
    pub fn equation(&self) -> String {
        self.accumulator.display()
    }

    /// Result display
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// History log
    #[must_use]
    pub const fn history(&self) -> &History {
        self.accumulator.history()
    }

    /// Underlying input state
    #[must_use]
    pub const fn accumulator(&self) -> &InputAccumulator {
        &self.accumulator
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Clears the history log; displays are unaffected
    pub fn clear_history(&mut self) {
        self.accumulator.clear_history();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::{Operator, Phase};

    fn run(session: &mut Session, script: &str) -> Frame {
        session.run_script(script).unwrap()
    }

    // ===== SessionConfig =====

    #[test]
    fn test_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_capacity, 30);
        assert_eq!(config.zero_tolerance, Evaluator::DEFAULT_ZERO_TOLERANCE);
        assert_eq!(config.error_indicator, "Error");
    }

    #[test]
    fn test_config_builders() {
        let config = SessionConfig::default()
            .with_history_capacity(5)
            .with_zero_tolerance(-1e-9)
            .with_error_indicator("E");
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.zero_tolerance, 1e-9);
        assert_eq!(config.error_indicator, "E");
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SessionConfig::default().with_history_capacity(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"error_indicator":"NaN"}"#).unwrap();
        assert_eq!(config.error_indicator, "NaN");
        assert_eq!(config.history_capacity, 30);
    }

    // ===== Displays =====

    #[test]
    fn test_new_session_displays() {
        let session = Session::new();
        assert_eq!(session.equation(), "0");
        assert_eq!(session.result(), "0");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_equation_updates_every_event() {
        let mut session = Session::new();
        assert_eq!(session.press(InputEvent::Digit(1)).equation, "1");
        assert_eq!(session.press(InputEvent::Digit(2)).equation, "12");
        assert_eq!(
            session.press(InputEvent::Operator(Operator::Add)).equation,
            "12 +"
        );
        assert_eq!(session.press(InputEvent::Digit(3)).equation, "12 + 3");
    }

    #[test]
    fn test_successful_evaluate() {
        let mut session = Session::new();
        let frame = run(&mut session, "2+3*4=");
        assert_eq!(frame.equation, "14");
        assert_eq!(frame.result, "14");
        assert_eq!(frame.appended, Some(HistoryEntry::new("2 + 3 × 4", "14")));
        assert!(frame.failure.is_none());
    }

    #[test]
    fn test_failed_evaluate_shows_indicator() {
        let mut session = Session::new();
        let frame = run(&mut session, "5/0=");
        assert_eq!(frame.result, "Error");
        assert_eq!(frame.failure, Some(CalcError::DivisionByZero));
        assert!(frame.is_failure());
        assert_eq!(frame.equation, "5 ÷ 0");
        assert!(frame.appended.is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_typing_after_failure_extends_last_operand() {
        let mut session = Session::new();
        assert!(run(&mut session, ".=").is_failure());
        let frame = run(&mut session, "5+");
        assert_eq!(frame.equation, ".5 +");
        let tokens = session.accumulator().tokens();
        for (index, token) in tokens.iter().enumerate() {
            assert_eq!(token.is_numeral(), index % 2 == 0, "token {index}");
        }
        assert_eq!(run(&mut session, "1=").result, "1.5");
    }

    #[test]
    fn test_custom_error_indicator() {
        let config = SessionConfig::default().with_error_indicator("oops");
        let mut session = Session::with_config(config);
        assert_eq!(run(&mut session, "1/0=").result, "oops");
    }

    #[test]
    fn test_result_display_is_stale_until_next_evaluate() {
        let mut session = Session::new();
        run(&mut session, "2+3=");
        let frame = run(&mut session, "+1");
        assert_eq!(frame.equation, "5 + 1");
        assert_eq!(frame.result, "5");
        assert_eq!(run(&mut session, "=").result, "6");
    }

    #[test]
    fn test_skipped_evaluate_leaves_displays() {
        let mut session = Session::new();
        run(&mut session, "2+3=");
        let frame = run(&mut session, "+=");
        assert_eq!(frame.equation, "5 +");
        assert_eq!(frame.result, "5");
        assert!(frame.appended.is_none());
        assert!(frame.failure.is_none());
    }

    #[test]
    fn test_clear_all_resets_both_displays() {
        let mut session = Session::new();
        run(&mut session, "7*6=");
        let frame = session.press(InputEvent::ClearAll);
        assert_eq!(frame.equation, "0");
        assert_eq!(frame.result, "0");
        assert_eq!(session.accumulator().phase(), Phase::Empty);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_toggle_sign_event() {
        let mut session = Session::new();
        let frame = run(&mut session, "2+3~");
        assert_eq!(frame.equation, "2 + -3");
        assert_eq!(run(&mut session, "=").result, "-1");
    }

    #[test]
    fn test_one_third_result() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "1/3=").result, "0.333333333333333");
    }

    // ===== press_all / run_script =====

    #[test]
    fn test_press_all_empty_returns_current_frame() {
        let mut session = Session::new();
        run(&mut session, "9");
        let frame = session.press_all(Vec::new());
        assert_eq!(frame, session.frame());
        assert_eq!(frame.equation, "9");
    }

    #[test]
    fn test_run_script_unknown_key_changes_nothing() {
        let mut session = Session::new();
        run(&mut session, "12");
        assert_eq!(
            session.run_script("3^"),
            Err(CalcError::UnknownKey("^".into()))
        );
        assert_eq!(session.equation(), "12");
    }

    // ===== History =====

    #[test]
    fn test_history_capacity_from_config() {
        let mut session = Session::with_config(SessionConfig::default().with_history_capacity(2));
        for script in ["1+1=", "2+2=", "3+3="] {
            run(&mut session, script);
        }
        let results: Vec<&str> = session.history().iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["4", "6"]);
    }

    #[test]
    fn test_clear_history_keeps_displays() {
        let mut session = Session::new();
        run(&mut session, "4*4=");
        session.clear_history();
        assert!(session.history().is_empty());
        assert_eq!(session.result(), "16");
        assert_eq!(session.equation(), "16");
    }

    #[test]
    fn test_zero_tolerance_from_config() {
        let mut session = Session::with_config(SessionConfig::default().with_zero_tolerance(0.01));
        assert_eq!(
            run(&mut session, "1/0.001=").failure,
            Some(CalcError::DivisionByZero)
        );
        assert_eq!(session.config().zero_tolerance, 0.01);
    }
}
