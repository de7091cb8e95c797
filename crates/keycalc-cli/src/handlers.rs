//! Subcommand handlers
//!
//! Each handler writes to the given output so it can be driven from tests
//! with an in-memory buffer.

use std::io::{BufRead, Write};

use keycalc::keypad;
use keycalc::session::{Frame, Session};
use tracing::{debug, info, warn};

use crate::commands::{HistoryArgs, HistoryFormat, ReplArgs, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Renderer;

/// Builds the renderer for a configuration
#[must_use]
pub fn renderer(config: &CliConfig) -> Renderer {
    Renderer::new(config.color.should_color(), config.verbosity.is_quiet())
        .with_explain(config.verbosity.is_verbose())
}

/// Collects scripts from the arguments and the optional script file
pub fn collect_scripts(args: &RunArgs) -> CliResult<Vec<String>> {
    let mut scripts = args.scripts.clone();
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)?;
        scripts.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    if scripts.is_empty() {
        return Err(CliError::invalid_argument(
            "no key scripts given; pass them as arguments or with --file",
        ));
    }
    Ok(scripts)
}

/// Prints a rendered frame, plus the failure reason when verbose
fn emit_frame(
    renderer: Renderer,
    out: &mut impl Write,
    line: &str,
    frame: &Frame,
) -> CliResult<()> {
    renderer.emit(out, line)?;
    if let Some(note) = renderer.failure_note(frame) {
        renderer.emit(out, &note)?;
    }
    Ok(())
}

/// Applies one script, printing a frame per key or one at the end
fn apply_script(
    session: &mut Session,
    script: &str,
    trace: bool,
    renderer: Renderer,
    out: &mut impl Write,
) -> CliResult<()> {
    let events = keypad::parse_script(script)?;
    if trace {
        for event in events {
            let frame = session.press(event);
            emit_frame(renderer, out, &renderer.trace_line(event, &frame), &frame)?;
        }
    } else {
        let frame = session.press_all(events);
        emit_frame(renderer, out, &renderer.frame(&frame), &frame)?;
    }
    Ok(())
}

/// `keycalc run`
pub fn execute_run(config: &CliConfig, args: &RunArgs, out: &mut impl Write) -> CliResult<()> {
    let renderer = renderer(config);
    let scripts = collect_scripts(args)?;
    info!(scripts = scripts.len(), "run");

    let mut session = Session::with_config(config.session.clone());
    for script in &scripts {
        apply_script(&mut session, script, args.trace, renderer, out)?;
    }

    if args.history && !session.history().is_empty() {
        renderer.emit(out, &renderer.history_text(session.history()))?;
    }
    Ok(())
}

/// `keycalc repl`
///
/// Each input line is a key script applied to one persistent session.
/// Lines starting with `:` are commands: `:history`, `:clear-history`,
/// `:keys` and `:quit`. A bad line is reported and skipped.
pub fn execute_repl(
    config: &CliConfig,
    args: &ReplArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let renderer = renderer(config);
    let mut session = Session::with_config(config.session.clone());

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            ":quit" | ":q" => break,
            ":history" => renderer.emit(out, &renderer.history_text(session.history()))?,
            ":clear-history" => {
                session.clear_history();
                debug!("history cleared");
            }
            ":keys" => renderer.emit(out, &renderer.keys())?,
            _ => match apply_script(&mut session, line, args.trace, renderer, out) {
                Ok(()) => {}
                Err(CliError::Calc(err)) => {
                    warn!(%line, error = %err, "skipping line");
                    renderer.emit(out, &format!("! {err}"))?;
                }
                Err(err) => return Err(err),
            },
        }
    }
    Ok(())
}

/// `keycalc history`
pub fn execute_history(
    config: &CliConfig,
    args: &HistoryArgs,
    out: &mut impl Write,
) -> CliResult<()> {
    let renderer = renderer(config);
    let mut session = Session::with_config(config.session.clone());
    for script in &args.scripts {
        session.run_script(script)?;
    }

    let text = match args.format {
        HistoryFormat::Text => renderer.history_text(session.history()),
        HistoryFormat::Json => renderer.history_json(session.history())?,
    };
    if !text.is_empty() {
        renderer.emit_always(out, &text)?;
    }
    Ok(())
}

/// `keycalc config`
pub fn execute_config(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    let json = serde_json::to_string_pretty(config)?;
    renderer(config).emit_always(out, &json)
}

/// `keycalc keys`
pub fn execute_keys(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    let renderer = renderer(config);
    renderer.emit_always(out, renderer.keys().trim_end())
}
