//! Keypad: input events and the keys that produce them
//!
//! An input surface (buttons, a keyboard, a scripted test) never touches
//! calculator state directly; it maps whatever it receives to an
//! [`InputEvent`] and hands that to a [`crate::session::Session`].

use std::fmt;

use crate::core::{CalcError, CalcResult, Operator};

/// Discrete input events accepted by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A digit 0-9
    Digit(u8),
    /// Decimal point
    Dot,
    /// Binary operator
    Operator(Operator),
    /// Toggle the sign of the current number
    ToggleSign,
    /// Reset everything except history
    ClearAll,
    /// Evaluate the expression
    Evaluate,
}

impl InputEvent {
    /// Returns the button label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Dot => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::ClearAll => "AC".to_string(),
            Self::Evaluate => "=".to_string(),
        }
    }

    /// Maps a single script character to an event
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        if let Some(d) = ch.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        match ch {
            '.' => Some(Self::Dot),
            'x' | 'X' => Some(Self::Operator(Operator::Multiply)),
            '=' => Some(Self::Evaluate),
            'c' | 'C' => Some(Self::ClearAll),
            '~' | 'n' | '±' => Some(Self::ToggleSign),
            _ => Operator::from_char(ch).map(Self::Operator),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Maps a key name to an event
///
/// Accepts everything [`InputEvent::from_char`] does plus the key names a
/// keyboard or a button surface reports.
#[must_use]
pub fn key_to_event(key: &str) -> Option<InputEvent> {
    match key {
        "Enter" | "Return" => Some(InputEvent::Evaluate),
        "Escape" | "AC" | "Delete" => Some(InputEvent::ClearAll),
        "+/-" | "neg" | "Negate" => Some(InputEvent::ToggleSign),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => InputEvent::from_char(ch),
                _ => None,
            }
        }
    }
}

/// Parses a compact key script such as `"12+3*4="` into events
///
/// Whitespace is ignored; any other unmapped character is an error.
pub fn parse_script(script: &str) -> CalcResult<Vec<InputEvent>> {
    script
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| InputEvent::from_char(ch).ok_or_else(|| CalcError::UnknownKey(ch.to_string())))
        .collect()
}

/// Standard button layout, row by row
/// ```text
/// [ AC ] [ ± ] [ ÷ ] [ × ]
/// [ 7  ] [ 8 ] [ 9 ] [ - ]
/// [ 4  ] [ 5 ] [ 6 ] [ + ]
/// [ 1  ] [ 2 ] [ 3 ] [ = ]
/// [ 0  ] [ . ]
/// ```
pub const LAYOUT: [&[InputEvent]; 5] = [
    &[
        InputEvent::ClearAll,
        InputEvent::ToggleSign,
        InputEvent::Operator(Operator::Divide),
        InputEvent::Operator(Operator::Multiply),
    ],
    &[
        InputEvent::Digit(7),
        InputEvent::Digit(8),
        InputEvent::Digit(9),
        InputEvent::Operator(Operator::Subtract),
    ],
    &[
        InputEvent::Digit(4),
        InputEvent::Digit(5),
        InputEvent::Digit(6),
        InputEvent::Operator(Operator::Add),
    ],
    &[
        InputEvent::Digit(1),
        InputEvent::Digit(2),
        InputEvent::Digit(3),
        InputEvent::Evaluate,
    ],
    &[InputEvent::Digit(0), InputEvent::Dot],
];

/// Returns the button at a grid position
#[must_use]
pub fn button_at(row: usize, col: usize) -> Option<InputEvent> {
    LAYOUT.get(row).and_then(|r| r.get(col)).copied()
}

/// Renders the layout as a text grid, one line per row
#[must_use]
pub fn render_layout() -> String {
    LAYOUT
        .iter()
        .map(|row| {
            row.iter()
                .map(|event| format!("[{:^4}]", event.label()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ===== InputEvent =====

    #[test]
    fn test_event_labels() {
        assert_eq!(InputEvent::Digit(7).label(), "7");
        assert_eq!(InputEvent::Dot.label(), ".");
        assert_eq!(InputEvent::Operator(Operator::Multiply).label(), "×");
        assert_eq!(InputEvent::ToggleSign.label(), "±");
        assert_eq!(InputEvent::ClearAll.label(), "AC");
        assert_eq!(InputEvent::Evaluate.to_string(), "=");
    }

    #[test]
    fn test_from_char_digits() {
        for d in 0..=9u8 {
            let ch = char::from_digit(u32::from(d), 10).unwrap();
            assert_eq!(InputEvent::from_char(ch), Some(InputEvent::Digit(d)));
        }
    }

    #[test]
    fn test_from_char_operators_and_aliases() {
        let mul = Some(InputEvent::Operator(Operator::Multiply));
        let div = Some(InputEvent::Operator(Operator::Divide));
        assert_eq!(InputEvent::from_char('*'), mul);
        assert_eq!(InputEvent::from_char('x'), mul);
        assert_eq!(InputEvent::from_char('×'), mul);
        assert_eq!(InputEvent::from_char('/'), div);
        assert_eq!(InputEvent::from_char('÷'), div);
        assert_eq!(
            InputEvent::from_char('-'),
            Some(InputEvent::Operator(Operator::Subtract))
        );
    }

    #[test]
    fn test_from_char_specials() {
        assert_eq!(InputEvent::from_char('='), Some(InputEvent::Evaluate));
        assert_eq!(InputEvent::from_char('C'), Some(InputEvent::ClearAll));
        assert_eq!(InputEvent::from_char('~'), Some(InputEvent::ToggleSign));
        assert_eq!(InputEvent::from_char('.'), Some(InputEvent::Dot));
        assert_eq!(InputEvent::from_char('('), None);
        assert_eq!(InputEvent::from_char('^'), None);
    }

    // ===== key_to_event =====

    #[test]
    fn test_key_to_event_names() {
        assert_eq!(key_to_event("Enter"), Some(InputEvent::Evaluate));
        assert_eq!(key_to_event("Escape"), Some(InputEvent::ClearAll));
        assert_eq!(key_to_event("AC"), Some(InputEvent::ClearAll));
        assert_eq!(key_to_event("+/-"), Some(InputEvent::ToggleSign));
        assert_eq!(key_to_event("5"), Some(InputEvent::Digit(5)));
        assert_eq!(key_to_event("F1"), None);
        assert_eq!(key_to_event(""), None);
    }

    #[test]
    fn test_every_label_maps_back() {
        for event in LAYOUT.iter().flat_map(|row| row.iter()) {
            assert_eq!(key_to_event(&event.label()), Some(*event), "{event:?}");
        }
    }

    // ===== parse_script =====

    #[test]
    fn test_parse_script() {
        let events = parse_script("12 + 3*4=").unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::Digit(1),
                InputEvent::Digit(2),
                InputEvent::Operator(Operator::Add),
                InputEvent::Digit(3),
                InputEvent::Operator(Operator::Multiply),
                InputEvent::Digit(4),
                InputEvent::Evaluate,
            ]
        );
    }

    #[test]
    fn test_parse_script_unknown_key() {
        assert_eq!(
            parse_script("2^3"),
            Err(CalcError::UnknownKey("^".into()))
        );
    }

    #[test]
    fn test_parse_script_empty() {
        assert!(parse_script("   ").unwrap().is_empty());
    }

    // ===== Layout =====

    #[test]
    fn test_layout_covers_every_event() {
        let mut seen: Vec<InputEvent> = LAYOUT.iter().flat_map(|r| r.iter().copied()).collect();
        seen.sort_by_key(InputEvent::label);
        seen.dedup();
        // 10 digits, dot, 4 operators, toggle, clear, evaluate
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn test_button_at() {
        assert_eq!(button_at(0, 0), Some(InputEvent::ClearAll));
        assert_eq!(button_at(3, 3), Some(InputEvent::Evaluate));
        assert_eq!(button_at(4, 1), Some(InputEvent::Dot));
        assert_eq!(button_at(4, 2), None);
        assert_eq!(button_at(5, 0), None);
    }

    #[test]
    fn test_render_layout() {
        let grid = render_layout();
        assert_eq!(grid.lines().count(), 5);
        assert!(grid.lines().next().unwrap().contains("AC"));
    }
}
