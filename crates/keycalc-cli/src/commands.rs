//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keycalc: keypad-driven arithmetic calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Maximum number of history entries kept
    #[arg(long, global = true, env = "KEYCALC_HISTORY_CAPACITY")]
    pub history_capacity: Option<usize>,

    /// Divisors with a smaller magnitude count as zero
    #[arg(long, global = true, env = "KEYCALC_ZERO_TOLERANCE")]
    pub zero_tolerance: Option<f64>,

    /// Result display text after a failed evaluation
    #[arg(long, global = true)]
    pub error_indicator: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run key scripts such as "2+3*4="
    Run(RunArgs),

    /// Read key scripts from stdin, one per line, in a single session
    Repl(ReplArgs),

    /// Run key scripts and print the history log
    History(HistoryArgs),

    /// Show the effective configuration
    Config,

    /// Show the keypad layout and accepted keys
    Keys,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key scripts, applied in order to one session
    pub scripts: Vec<String>,

    /// Read additional scripts from a file, one per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print both displays after every key instead of once per script
    #[arg(long)]
    pub trace: bool,

    /// Print the history log at the end
    #[arg(long)]
    pub history: bool,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Print both displays after every key instead of once per line
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Key scripts, applied in order to one session
    #[arg(required = true)]
    pub scripts: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: HistoryFormat,
}

/// History output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryFormat {
    /// One "expression = result" line per entry
    #[default]
    Text,
    /// JSON array of entries, oldest first
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
