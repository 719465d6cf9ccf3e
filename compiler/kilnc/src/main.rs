//! Kiln compiler CLI

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use kiln_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use kiln_diagnostic::Severity;
use kilnc::commands::run;
use kilnc::config::COLOR_ENV;
use kilnc::{init_tracing, Command, Config, Session};

fn main() -> ExitCode {
    init_tracing();

    let config = Config::default().with_env_color(std::env::var(COLOR_ENV).ok().as_deref());
    let mut config = match config {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    let positional = match config.apply_args(std::env::args().skip(1)) {
        Ok(positional) => positional,
        Err(error) => {
            eprintln!("error: {error}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let [command, path] = positional.as_slice() else {
        print_usage();
        return ExitCode::FAILURE;
    };
    let command: Command = match command.parse() {
        Ok(command) => command,
        Err(error) => {
            eprintln!("error: {error}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(config.clone());
    let mut stdout = io::stdout().lock();
    let succeeded = match run(command, &mut session, Path::new(path), &mut stdout) {
        Ok(succeeded) => succeeded,
        Err(error) => {
            eprintln!("error: cannot write output: {error}");
            return ExitCode::FAILURE;
        }
    };

    let diagnostics = session.diagnostics();
    let mut emitter = TerminalEmitter::stderr(config.color, io::stderr().is_terminal());
    emitter.emit_all(diagnostics);
    emitter.emit_summary(
        diagnostics.count(Severity::Error),
        diagnostics.count(Severity::Warning),
    );
    emitter.flush();

    if succeeded && !session.has_errors() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_usage() {
    eprintln!("Kiln compiler front end");
    eprintln!();
    eprintln!("Usage: kiln <command> <file.kn> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lex      Print the pre-scanned tokens and directives");
    eprintln!("  parse    Print an outline of the parsed document");
    eprintln!("  check    Parse and run semantic checks");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --color=<auto|always|never>         Colored diagnostics (env: {COLOR_ENV})");
    eprintln!("  --threshold=<error|warning|note>    Severity that fails the run");
    eprintln!("  --no-check                          Skip semantic checks");
}
