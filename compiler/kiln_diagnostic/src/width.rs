//! Display width of code points on a monospaced terminal.
//!
//! Tabs advance to the next multiple of [`TAB_STOP`] measured from the start
//! of the line. Wide characters (UAX #11, e.g. CJK) take two columns; every
//! other code point, including zero-width ones, is counted as one so that each
//! highlighted code point gets at least one indicator.

use unicode_width::UnicodeWidthChar;

/// Columns between tab stops.
pub const TAB_STOP: usize = 8;

/// Width of a non-tab code point: 2 for wide characters, 1 otherwise.
pub fn char_width(ch: char) -> usize {
    if UnicodeWidthChar::width(ch) == Some(2) {
        2
    } else {
        1
    }
}

/// Display column reached after printing `ch` at display column `column`.
pub fn advance(column: usize, ch: char) -> usize {
    if ch == '\t' {
        (column / TAB_STOP + 1) * TAB_STOP
    } else {
        column + char_width(ch)
    }
}

/// Display column of every code-point boundary in `chars`.
///
/// The result has `chars.len() + 1` entries; entry `i` is the display column
/// at which code point `i` starts.
pub fn columns(chars: &[char]) -> Vec<usize> {
    let mut out = Vec::with_capacity(chars.len() + 1);
    let mut column = 0;
    out.push(column);
    for &ch in chars {
        column = advance(column, ch);
        out.push(column);
    }
    out
}

/// Total display width of a string printed from column 0.
pub fn str_width(s: &str) -> usize {
    s.chars().fold(0, advance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii_is_one_column() {
        assert_eq!(str_width("abc"), 3);
    }

    #[test]
    fn cjk_is_two_columns() {
        assert_eq!(char_width('\u{4e2d}'), 2);
        assert_eq!(str_width("a\u{4e2d}b"), 4);
    }

    #[test]
    fn zero_width_counts_as_one() {
        assert_eq!(char_width('\u{301}'), 1);
    }

    #[test]
    fn tab_advances_to_next_stop() {
        assert_eq!(advance(0, '\t'), 8);
        assert_eq!(advance(3, '\t'), 8);
        assert_eq!(advance(8, '\t'), 16);
        assert_eq!(str_width("ab\tc"), 9);
    }

    #[test]
    fn columns_has_boundary_per_code_point() {
        assert_eq!(columns(&['a', '\t', 'b']), vec![0, 1, 8, 9]);
    }
}
