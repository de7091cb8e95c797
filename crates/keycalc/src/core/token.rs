//! Expression tokens
//!
//! A token is either a numeral (kept as the text the user typed) or one of
//! the four binary operators. Operators and numerals alternate in a
//! finalized sequence.

use std::fmt;

use crate::core::{CalcError, CalcResult};

/// Type-safe binary operator - compile-time guarantee of valid operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the canonical symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses an operator character; `*` and `/` are aliases for `×` and `÷`
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '×' | '*' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Parses an operator symbol, accepting the same aliases as [`Self::from_char`]
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch),
            _ => None,
        }
    }

    /// Returns true for `×` and `÷`, which bind tighter than `+` and `-`
    #[must_use]
    pub const fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// Applies the operator without any validation
    #[must_use]
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A committed token of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Numeric literal, as entered or as produced by a previous evaluation
    Numeral(String),
    /// Binary operator
    Operator(Operator),
}

impl Token {
    /// Creates a numeral token
    #[must_use]
    pub fn numeral(text: impl Into<String>) -> Self {
        Self::Numeral(text.into())
    }

    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a numeral
    #[must_use]
    pub const fn is_numeral(&self) -> bool {
        matches!(self, Self::Numeral(_))
    }

    /// Returns the operator, if this token is one
    #[must_use]
    pub const fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            Self::Numeral(_) => None,
        }
    }

    /// Returns the display text of the token
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Numeral(text) => text,
            Self::Operator(op) => op.symbol(),
        }
    }

    /// Parses the numeral as a finite number
    pub fn value(&self) -> CalcResult<f64> {
        match self {
            Self::Numeral(text) => parse_numeral(text),
            Self::Operator(op) => Err(CalcError::ParseFailure(op.symbol().to_string())),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses numeral text as a finite decimal
///
/// Accepts an optional sign and at most one `.`; exponents, `inf` and `NaN`
/// spellings are rejected even though `f64::from_str` would take them.
pub fn parse_numeral(text: &str) -> CalcResult<f64> {
    let digits = text.strip_prefix(|c| c == '-' || c == '+').unwrap_or(text);
    let well_formed = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return Err(CalcError::ParseFailure(text.to_string()));
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::ParseFailure(text.to_string()))
}

/// Adds a leading `-` to numeral text, or strips it if present
#[must_use]
pub fn toggle_sign(text: &str) -> String {
    text.strip_prefix('-')
        .map_or_else(|| format!("-{text}"), str::to_string)
}

/// Renders tokens as the expression text used for displays and history
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
