//! Output formatting for frames, history and the keypad

use std::io::Write;

use console::Style;
use keycalc::core::History;
use keycalc::keypad::{self, InputEvent};
use keycalc::session::Frame;

use crate::error::CliResult;

/// Accepted key aliases, shown by `keycalc keys`
const KEY_ALIASES: &[(&str, &str)] = &[
    ("0-9 .", "digits and decimal point"),
    ("+ -", "add, subtract"),
    ("* x ×", "multiply"),
    ("/ ÷", "divide"),
    ("~ n ±", "toggle sign"),
    ("c C", "clear all (history is kept)"),
    ("=", "evaluate"),
];

/// Styles calculator output and writes it out
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Follow failed frames with the reason
    pub explain: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Renderer {
    /// Create a new renderer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            use_color,
            quiet,
            explain: false,
        }
    }

    /// Set whether failed frames are followed by the reason
    #[must_use]
    pub const fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.use_color)
    }

    /// Formats both displays as `<equation> | <result>`
    ///
    /// The result is green after a successful evaluate and red after a
    /// failed one.
    #[must_use]
    pub fn frame(&self, frame: &Frame) -> String {
        let result = if frame.is_failure() {
            self.style(Style::new().red().bold()).apply_to(&frame.result)
        } else if frame.appended.is_some() {
            self.style(Style::new().green().bold()).apply_to(&frame.result)
        } else {
            self.style(Style::new()).apply_to(&frame.result)
        };
        format!("{} | {}", frame.equation, result)
    }

    /// Reason line for a failed frame, when explaining is on
    #[must_use]
    pub fn failure_note(&self, frame: &Frame) -> Option<String> {
        if !self.explain {
            return None;
        }
        let err = frame.failure.as_ref()?;
        Some(self.style(Style::new().red()).apply_to(format!("  {err}")).to_string())
    }

    /// Formats one traced key press
    #[must_use]
    pub fn trace_line(&self, event: InputEvent, frame: &Frame) -> String {
        let key = self.style(Style::new().cyan()).apply_to(format!("{:>2}", event.label()));
        format!("{key}  {}", self.frame(frame))
    }

    /// Formats the history log, oldest first, dimmed
    #[must_use]
    pub fn history_text(&self, history: &History) -> String {
        let text = history.export_formatted();
        if text.is_empty() {
            return text;
        }
        self.style(Style::new().dim()).apply_to(text).to_string()
    }

    /// Formats the history log as a pretty JSON array
    pub fn history_json(&self, history: &History) -> CliResult<String> {
        Ok(history.to_json()?)
    }

    /// Formats the keypad grid followed by the key aliases
    #[must_use]
    pub fn keys(&self) -> String {
        let bold = self.style(Style::new().bold());
        let mut out = keypad::render_layout();
        out.push_str("\n\n");
        for (keys, meaning) in KEY_ALIASES {
            out.push_str(&format!("{:<8} {meaning}\n", bold.apply_to(keys)));
        }
        out
    }

    /// Writes a line unless quiet
    pub fn emit(&self, out: &mut impl Write, text: &str) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        self.emit_always(out, text)
    }

    /// Writes a line even in quiet mode; used for explicitly requested data
    pub fn emit_always(&self, out: &mut impl Write, text: &str) -> CliResult<()> {
        writeln!(out, "{text}")?;
        Ok(())
    }
}
