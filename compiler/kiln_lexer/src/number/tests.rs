use super::*;
use kiln_diagnostic::ErrorCode;
use kiln_source::SourceFile;
use pretty_assertions::assert_eq;

fn lex(text: &str) -> Result<Terminal, Diagnostic> {
    let file = SourceFile::new("n.kn", text);
    let mut cursor = Cursor::new(&file);
    lex_number(&mut cursor)
}

fn ok(text: &str) -> (TerminalKind, String) {
    let terminal = lex(text).unwrap_or_else(|e| panic!("{text:?}: {e}"));
    (terminal.kind, terminal.value)
}

fn err(text: &str) -> (String, Option<String>) {
    match lex(text) {
        Err(diagnostic) => {
            assert_eq!(diagnostic.code, Some(ErrorCode::E1003));
            (diagnostic.message.clone(), diagnostic.position())
        }
        Ok(terminal) => panic!("{text:?} lexed as {terminal:?}"),
    }
}

#[test]
fn integer_bases() {
    let decimal = TerminalKind::Integer(IntBase::Decimal);
    assert_eq!(ok("42"), (decimal, "42".to_string()));
    assert_eq!(ok("0"), (decimal, "0".to_string()));
    assert_eq!(ok("7 + 1"), (decimal, "7".to_string()));
    assert_eq!(
        ok("017"),
        (TerminalKind::Integer(IntBase::Octal), "017".to_string())
    );
    assert_eq!(
        ok("0x1F)"),
        (TerminalKind::Integer(IntBase::Hex), "0x1F".to_string())
    );
    assert_eq!(
        ok("0XaB"),
        (TerminalKind::Integer(IntBase::Hex), "0XaB".to_string())
    );
}

#[test]
fn floats() {
    for text in ["1.5", "0.25", "3.", "2e10", "2E-3", "1.5e+2", "09.5"] {
        assert_eq!(ok(text), (TerminalKind::Float, text.to_string()));
    }
    assert_eq!(ok("1.5.x").1, "1.5");
}

#[test]
fn missing_hex_digits() {
    assert_eq!(
        err("0x;"),
        (
            "expected hexadecimal digits after `0x`".to_string(),
            Some("n.kn:1:3".to_string())
        )
    );
    assert_eq!(err("0x").1.as_deref(), Some("n.kn:1:3"));
}

#[test]
fn invalid_octal_digit_is_pointed_at() {
    assert_eq!(
        err("0179"),
        (
            "invalid digit `9` in octal literal".to_string(),
            Some("n.kn:1:4".to_string())
        )
    );
    assert_eq!(err("08").0, "invalid digit `8` in octal literal");
}

#[test]
fn missing_exponent_digits() {
    assert_eq!(
        err("1e+"),
        (
            "expected digits in exponent".to_string(),
            Some("n.kn:1:4".to_string())
        )
    );
    assert_eq!(err("2.5e x").1.as_deref(), Some("n.kn:1:5"));
}

#[test]
fn glued_identifier_characters() {
    assert_eq!(
        err("12ab"),
        (
            "invalid character `a` in decimal literal".to_string(),
            Some("n.kn:1:3".to_string())
        )
    );
    assert_eq!(
        err("0x1G").0,
        "invalid character `G` in hexadecimal literal"
    );
    assert_eq!(err("1.5f").0, "invalid character `f` in floating-point literal");
    assert_eq!(err("07_").0, "invalid character `_` in octal literal");
}

#[test]
fn context_covers_the_literal() {
    let terminal = lex("123 + 4").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(terminal.context.text(), "123");
    assert_eq!(terminal.context.position().as_deref(), Some("n.kn:1:1"));
}
