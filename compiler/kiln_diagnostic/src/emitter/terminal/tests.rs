use super::*;
use crate::{Context, ErrorCode, Highlight};
use kiln_source::SourceFile;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn sample_diagnostic() -> Diagnostic {
    let file = SourceFile::new("main.kn", "fun add(a int, a int) {}\n");
    let context = |start, end| {
        Context::at(
            Arc::clone(file.name()),
            Arc::clone(&file.lines()[0]),
            Highlight::new(start, end),
        )
    };
    Diagnostic::error(ErrorCode::E5001, "duplicate argument `a`", context(15, 16))
        .with_related(Diagnostic::note("first declared here", context(8, 9)))
}

fn emitted(mode: ColorMode, f: impl FnOnce(&mut TerminalEmitter<Vec<u8>>)) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
    f(&mut emitter);
    emitter.flush();
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[test]
fn no_color_output_matches_display() {
    let diag = sample_diagnostic();
    let text = emitted(ColorMode::Never, |e| e.emit(&diag));
    assert_eq!(text, diag.to_string());
    assert!(text.contains("first declared here"));
}

#[test]
fn color_output_has_escape_codes() {
    let text = emitted(ColorMode::Always, |e| e.emit(&sample_diagnostic()));
    assert!(text.contains("\x1b[1;31merror\x1b[0m"));
    assert!(text.contains("\x1b[1;36mnote\x1b[0m"));
}

#[test]
fn auto_mode_follows_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!("never".parse::<ColorMode>(), Ok(ColorMode::Never));
    assert!("sometimes".parse::<ColorMode>().is_err());
}

#[test]
fn emit_all_writes_every_diagnostic() {
    let diagnostics = vec![
        Diagnostic::error(ErrorCode::E1001, "error 1", Context::default()),
        Diagnostic::error(ErrorCode::E3001, "error 2", Context::default()),
    ];
    let text = emitted(ColorMode::Never, |e| e.emit_all(&diagnostics));
    assert_eq!(text, "error: error 1\nerror: error 2\n");
}

#[test]
fn summary_wording() {
    let text = emitted(ColorMode::Never, |e| e.emit_summary(2, 1));
    assert_eq!(text, "error: aborting due to 2 previous errors; 1 warning emitted\n");

    let text = emitted(ColorMode::Never, |e| e.emit_summary(1, 0));
    assert_eq!(text, "error: aborting due to previous error\n");

    let text = emitted(ColorMode::Never, |e| e.emit_summary(0, 3));
    assert_eq!(text, "warning: 3 warnings emitted\n");

    let text = emitted(ColorMode::Never, |e| e.emit_summary(0, 0));
    assert_eq!(text, "");
}
