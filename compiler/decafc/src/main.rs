//! decaf command-line driver.
//!
//! Reads each input, runs the transpile pipeline, and writes the JavaScript
//! to stdout. Failures are reported on stderr with a source excerpt.

mod args;

use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Once;

use decaf_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use decaf_patch::{transpile, Options, TranspileError};
use tracing::debug;

use args::{parse_args, Input, USAGE};

static TRACING_INIT: Once = Once::new();

/// Install the hierarchical subscriber, only when `RUST_LOG` is set.
///
/// `RUST_LOG=decaf_patch=trace` shows every patched node and edit.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

fn read_input(input: &Input) -> Result<String, String> {
    match input {
        Input::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok(text)
        }
        Input::File(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("cannot read `{path}`: {e}"))
        }
    }
}

fn report(input: &Input, err: &TranspileError, color: ColorMode) {
    let is_tty = std::io::stderr().is_terminal();
    let mut diagnostic = err.diagnostic.clone();
    if let Some(stage) = err.stage {
        diagnostic = diagnostic.with_note(format!("raised in the {stage} stage"));
    }
    eprintln!("{}:", input.name());
    let mut emitter = TerminalEmitter::stderr(color, is_tty).with_source(&err.source);
    emitter.emit(&diagnostic);
    emitter.flush();
}

/// Transpile one input, printing the output or the diagnostic.
fn run_one(input: &Input, options: &Options, color: ColorMode, suggestions: bool) -> bool {
    let source = match read_input(input) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return false;
        }
    };
    debug!(input = input.name(), len = source.len(), "transpiling");

    match transpile(&source, options) {
        Ok(output) => {
            print!("{}", output.code);
            if suggestions {
                for suggestion in &output.suggestions {
                    eprintln!("{}: suggestion {suggestion}", input.name());
                }
            }
            true
        }
        Err(err) => {
            report(input, &err, color);
            false
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    if cli.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut ok = true;
    for input in &cli.inputs {
        ok &= run_one(input, &cli.options, cli.color, cli.suggestions);
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
