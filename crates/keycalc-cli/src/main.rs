//! keycalc: keypad-driven calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! keycalc run "2+3*4="                # 2 + 3 × 4 = 14
//! keycalc run --trace "12/0="         # both displays after every key
//! keycalc history --format json 1+1=  # history log as JSON
//! echo "6*7=" | keycalc repl          # one session, one script per line
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use keycalc_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands};
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = CliConfig::from_cli(&cli)?;
    logging::init(&config)?;
    debug!(?config, "configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Run(args) => handlers::execute_run(&config, &args, &mut out),
        Commands::Repl(args) => handlers::execute_repl(&config, &args, io::stdin().lock(), &mut out),
        Commands::History(args) => handlers::execute_history(&config, &args, &mut out),
        Commands::Config => handlers::execute_config(&config, &mut out),
        Commands::Keys => handlers::execute_keys(&config, &mut out),
    }
}
