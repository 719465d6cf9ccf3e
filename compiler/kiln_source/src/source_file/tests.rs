use super::*;
use pretty_assertions::assert_eq;

fn texts(file: &SourceFile) -> Vec<(String, LineEnding)> {
    file.lines()
        .iter()
        .map(|line| (line.text(), line.ending()))
        .collect()
}

#[test]
fn empty_source_is_one_empty_line() {
    let file = SourceFile::new("a.kn", "");
    assert_eq!(file.line_count(), 1);
    assert_eq!(texts(&file), vec![(String::new(), LineEnding::None)]);
}

#[test]
fn splits_on_every_terminator_kind() {
    let file = SourceFile::new("a.kn", "one\ntwo\r\nthree\rfour");
    assert_eq!(
        texts(&file),
        vec![
            ("one".to_string(), LineEnding::Lf),
            ("two".to_string(), LineEnding::CrLf),
            ("three".to_string(), LineEnding::Cr),
            ("four".to_string(), LineEnding::None),
        ]
    );
}

#[test]
fn trailing_terminator_adds_no_line() {
    let file = SourceFile::new("a.kn", "fun\n");
    assert_eq!(texts(&file), vec![("fun".to_string(), LineEnding::Lf)]);
}

#[test]
fn blank_lines_are_kept() {
    let file = SourceFile::new("a.kn", "a\n\n\nb");
    assert_eq!(file.line_count(), 4);
    assert!(file.lines()[1].is_empty());
    assert!(file.lines()[2].is_empty());
    assert_eq!(file.lines()[3].index(), 3);
    assert_eq!(file.lines()[3].number(), 4);
}

#[test]
fn cr_followed_by_lf_on_next_chunk_is_crlf() {
    let file = SourceFile::new("a.kn", "a\r\n\r\nb");
    assert_eq!(
        texts(&file),
        vec![
            ("a".to_string(), LineEnding::CrLf),
            (String::new(), LineEnding::CrLf),
            ("b".to_string(), LineEnding::None),
        ]
    );
}

#[test]
fn columns_are_code_points() {
    let file = SourceFile::new("a.kn", "\u{4e2d}\u{6587} x");
    let line = &file.lines()[0];
    assert_eq!(line.len(), 4);
    assert_eq!(line.get(3), Some('x'));
    assert_eq!(line.slice(0, 2), "\u{4e2d}\u{6587}");
}

#[test]
fn invalid_utf8_is_replaced() {
    let file = SourceFile::from_bytes("a.kn", b"ok\xff");
    assert_eq!(file.lines()[0].text(), "ok\u{fffd}");
}

#[test]
fn read_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("missing.kn");
    let err = SourceFile::read(&path).err();
    assert!(matches!(err, Some(LoadError::Io { .. })));
}

#[test]
fn read_uses_path_as_name() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("main.kn");
    std::fs::write(&path, "fun main() {}\n").unwrap_or_else(|e| panic!("write: {e}"));
    let file = SourceFile::read(&path).unwrap_or_else(|e| panic!("read: {e}"));
    assert_eq!(&**file.name(), path.display().to_string());
    assert_eq!(file.line_count(), 1);
}

#[test]
fn escapes_are_printable() {
    assert_eq!(LineEnding::Lf.escape(), "\\n");
    assert_eq!(LineEnding::CrLf.escape(), "\\r\\n");
    assert_eq!(LineEnding::None.escape(), "");
    assert_eq!(LineEnding::Cr.escape(), "\\r");
}
