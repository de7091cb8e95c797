//! Two-pass token evaluator
//!
//! The first pass folds every `×`/`÷` into its neighbours, scanning left to
//! right; the second pass folds the remaining `+`/`-` chain from the left.
//! There is no parenthesization, so two tiers are all the precedence needed.

use tracing::trace;

use crate::core::format::raw_numeral;
use crate::core::token::{Operator, Token};
use crate::core::{CalcError, CalcResult};

/// Evaluator for finalized token sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    zero_tolerance: f64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Divisors with a magnitude below this count as zero.
    ///
    /// Eight times the smallest positive `f32` subnormal: the single-precision
    /// "approximately zero" threshold.
    pub const DEFAULT_ZERO_TOLERANCE: f64 = 1.121_039e-44;

    /// Creates an evaluator with the default zero tolerance
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zero_tolerance: Self::DEFAULT_ZERO_TOLERANCE,
        }
    }

    /// Creates an evaluator with a custom zero tolerance for divisors
    #[must_use]
    pub fn with_zero_tolerance(zero_tolerance: f64) -> Self {
        Self {
            zero_tolerance: zero_tolerance.abs(),
        }
    }

    /// Returns the zero tolerance applied to divisors
    #[must_use]
    pub const fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }

    /// Evaluates a finalized token sequence
    ///
    /// ```
    /// use keycalc::core::{Evaluator, Operator, Token};
    ///
    /// let tokens = [
    ///     Token::numeral("2"),
    ///     Token::Operator(Operator::Add),
    ///     Token::numeral("3"),
    ///     Token::Operator(Operator::Multiply),
    ///     Token::numeral("4"),
    /// ];
    /// assert_eq!(Evaluator::new().evaluate(&tokens), Ok(14.0));
    /// ```
    pub fn evaluate(&self, tokens: &[Token]) -> CalcResult<f64> {
        check_shape(tokens)?;

        let mut work = tokens.to_vec();
        self.reduce_multiplicative(&mut work)?;
        self.reduce_additive(&mut work)?;

        let result = match work.as_slice() {
            [only] => only.value()?,
            _ => return Err(CalcError::Malformed("reduction left extra tokens".into())),
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::NonFinite)
        }
    }

    fn reduce_multiplicative(&self, work: &mut Vec<Token>) -> CalcResult<()> {
        let mut i = 1;
        while i < work.len() {
            match work[i].as_operator() {
                Some(op) if op.is_multiplicative() => {
                    let value = self.apply(&work[i - 1], op, &work[i + 1])?;
                    trace!(position = i, %op, value, "folded multiplicative pair");
                    work[i - 1] = Token::Numeral(raw_numeral(value));
                    work.drain(i..=i + 1);
                    // the next operator, if any, has moved back to i
                }
                _ => i += 2,
            }
        }
        Ok(())
    }

    fn reduce_additive(&self, work: &mut Vec<Token>) -> CalcResult<()> {
        while work.len() > 1 {
            let op = work[1]
                .as_operator()
                .ok_or_else(|| CalcError::Malformed("expected an operator".into()))?;
            let value = self.apply(&work[0], op, &work[2])?;
            trace!(%op, value, "folded additive pair");
            work[0] = Token::Numeral(raw_numeral(value));
            work.drain(1..3);
        }
        Ok(())
    }

    fn apply(&self, lhs: &Token, op: Operator, rhs: &Token) -> CalcResult<f64> {
        let lhs = lhs.value()?;
        let rhs = rhs.value()?;
        if op == Operator::Divide && rhs.abs() < self.zero_tolerance {
            return Err(CalcError::DivisionByZero);
        }
        let value = op.apply(lhs, rhs);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite)
        }
    }
}

/// Checks numeral/operator alternation, starting and ending with a numeral
fn check_shape(tokens: &[Token]) -> CalcResult<()> {
    match tokens.last() {
        None | Some(Token::Operator(_)) => return Err(CalcError::IncompleteExpression),
        Some(Token::Numeral(_)) => {}
    }
    for (index, token) in tokens.iter().enumerate() {
        let expect_numeral = index % 2 == 0;
        if token.is_numeral() != expect_numeral {
            return Err(CalcError::Malformed(format!(
                "unexpected '{token}' at position {index}"
            )));
        }
    }
    Ok(())
}
