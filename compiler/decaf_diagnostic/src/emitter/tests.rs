use decaf_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn render(diagnostic: &Diagnostic, source: Option<&str>) -> String {
    let mut emitter = TerminalEmitter::new(Vec::new(), ColorMode::Never, false);
    if let Some(source) = source {
        emitter = emitter.with_source(source);
    }
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

#[test]
fn test_emit_with_source_renders_snippet() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("expected expression")
        .with_label(Span::new(4, 5), "found `)`");
    assert_eq!(
        render(&diag, Some("a = )")),
        "error[E1002]: expected expression\n  --> 1:5\n  |\n1 | a = )\n  |     ^ found `)`\n"
    );
}

#[test]
fn test_emit_without_source_falls_back_to_offsets() {
    let diag = Diagnostic::error(ErrorCode::E9001)
        .with_message("cannot patch")
        .with_label(Span::new(2, 3), "here")
        .with_note("rewrite rule bug");
    assert_eq!(
        render(&diag, None),
        "error[E9001]: cannot patch\n  --> 2..3: here\n  = note: rewrite rule bug\n"
    );
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("sometimes"), None);
}
