//! Error codes for all front-end diagnostics.
//!
//! Each code is a unique identifier (e.g., `E1001`) whose first digit names
//! the failure category. Codes are carried on [`Diagnostic`](crate::Diagnostic)
//! for tests and tooling; they are not part of the rendered text.

use std::fmt;

/// Failure category of an [`ErrorCode`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Category {
    /// The source could not be loaded.
    Io,
    /// Invalid character or malformed literal.
    Lex,
    /// Malformed, unknown or unterminated preprocessor directive.
    Directive,
    /// Grammar mismatch while parsing.
    Syntax,
    /// Structural AST divergence found by the comparator.
    Mismatch,
    /// Semantic check failure.
    Semantic,
}

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit is the category:
/// - E0xxx: I/O
/// - E1xxx: Lexer
/// - E2xxx: Preprocessor directives
/// - E3xxx: Parser
/// - E4xxx: Structural comparison
/// - E5xxx: Semantic checks
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // I/O (E0xxx)
    /// Source file could not be read
    E0001,

    // Lexer (E1xxx)
    /// Invalid character in source
    E1001,
    /// Symbol with no operator or punctuation entry
    E1002,
    /// Malformed numeric literal
    E1003,
    /// Unterminated string literal
    E1004,

    // Directives (E2xxx)
    /// `#` is not the first non-whitespace character on its line
    E2001,
    /// Missing directive name
    E2002,
    /// Unknown directive
    E2003,
    /// Include path does not start with `<` or `"`
    E2004,
    /// Include path not closed before end of line
    E2005,
    /// Include path closed with the wrong quote
    E2006,
    /// Empty include path
    E2007,
    /// Missing inline block type
    E2008,
    /// Inline block not closed before end of input
    E2009,
    /// Unexpected input after a directive
    E2010,

    // Parser (E3xxx)
    /// Unexpected token
    E3001,
    /// Unexpected end of input
    E3002,
    /// Expected expression
    E3003,
    /// Directive outside the top level
    E3004,

    // Structural comparison (E4xxx)
    /// Node variant differs
    E4001,
    /// Expected child is absent
    E4002,
    /// Unexpected child present
    E4003,
    /// Collection length differs
    E4004,
    /// Terminal value differs
    E4005,

    // Semantic checks (E5xxx)
    /// Duplicate argument name
    E5001,
    /// Return value count does not match the declared return types
    E5002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ErrorCode::E0001 => Category::Io,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004 => {
                Category::Lex
            }
            ErrorCode::E2001
            | ErrorCode::E2002
            | ErrorCode::E2003
            | ErrorCode::E2004
            | ErrorCode::E2005
            | ErrorCode::E2006
            | ErrorCode::E2007
            | ErrorCode::E2008
            | ErrorCode::E2009
            | ErrorCode::E2010 => Category::Directive,
            ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003 | ErrorCode::E3004 => {
                Category::Syntax
            }
            ErrorCode::E4001
            | ErrorCode::E4002
            | ErrorCode::E4003
            | ErrorCode::E4004
            | ErrorCode::E4005 => Category::Mismatch,
            ErrorCode::E5001 | ErrorCode::E5002 => Category::Semantic,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
