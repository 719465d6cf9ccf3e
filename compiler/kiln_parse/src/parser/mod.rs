//! Recursive descent over the pre-scanned item stream.
//!
//! The parser never recovers: the first mismatch becomes the result. Errors
//! name what was expected and what was found; at end of input the excerpt
//! also shows the lines leading up to it.

mod expr;
mod function;

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};
use kiln_ir::{Document, Keyword, Node, Punct, Terminal, TerminalKind};
use kiln_lexer_core::{Cursor, CursorState};
use kiln_source::SourceFile;
use tracing::{debug, trace};

use crate::directive::DirectiveRegistry;
use crate::scan::{scan, Item};

/// Lines shown above an end-of-input error.
const LEADING_LINES: usize = 2;

/// Parser state: the item stream and an index into it.
pub struct Parser<'a> {
    items: &'a [Item],
    pos: usize,
    eof: Context,
}

impl<'a> Parser<'a> {
    /// Create a parser over items scanned from `file`.
    pub fn new(items: &'a [Item], file: &SourceFile) -> Self {
        let last = file.last_line();
        let mut cursor = Cursor::new(file);
        cursor.set_state(CursorState::new(last, file.lines()[last].len()));
        Parser {
            items,
            pos: 0,
            eof: cursor.surrounding(cursor.here(), LEADING_LINES, 0),
        }
    }

    /// Parse the whole stream as a document.
    ///
    /// # Errors
    ///
    /// The first syntax error.
    pub fn document(mut self) -> Result<Document, Diagnostic> {
        let mut declarations = Vec::new();
        while let Some(item) = self.peek() {
            let declaration = match item {
                Item::Declaration(declaration) => {
                    self.pos += 1;
                    declaration.clone()
                }
                Item::Terminal(terminal) if terminal.is_keyword(Keyword::Fun) => self.function()?,
                Item::Terminal(_) => {
                    return Err(self.unexpected(ErrorCode::E3001, "`fun` or a directive"));
                }
            };
            trace!(
                kind = declaration.kind_name(),
                position = ?declaration.context().position(),
                "declaration"
            );
            declarations.push(declaration);
        }
        debug!(declarations = declarations.len(), "parsed document");
        Ok(Document::new(declarations))
    }

    #[inline]
    fn peek(&self) -> Option<&'a Item> {
        self.items.get(self.pos)
    }

    #[inline]
    fn peek_terminal(&self) -> Option<&'a Terminal> {
        self.peek().and_then(Item::as_terminal)
    }

    /// Consume the current terminal if `pred` holds for it.
    fn eat(&mut self, pred: impl FnOnce(&Terminal) -> bool) -> Option<Terminal> {
        let terminal = self.peek_terminal().filter(|&t| pred(t))?.clone();
        self.pos += 1;
        Some(terminal)
    }

    fn at_punct(&self, punct: Punct) -> bool {
        self.peek_terminal().is_some_and(|t| t.is_punct(punct))
    }

    fn eat_punct(&mut self, punct: Punct) -> Option<Terminal> {
        self.eat(|t| t.is_punct(punct))
    }

    fn expect_punct(&mut self, punct: Punct) -> Result<Terminal, Diagnostic> {
        self.eat_punct(punct).ok_or_else(|| {
            self.unexpected(ErrorCode::E3001, &format!("`{}`", punct.as_symbol()))
        })
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Terminal, Diagnostic> {
        self.eat(|t| t.is_keyword(keyword)).ok_or_else(|| {
            self.unexpected(ErrorCode::E3001, &format!("`{}`", keyword.as_str()))
        })
    }

    fn expect_identifier(&mut self, what: &str) -> Result<Terminal, Diagnostic> {
        self.eat(|t| t.kind == TerminalKind::Identifier)
            .ok_or_else(|| self.unexpected(ErrorCode::E3001, what))
    }

    /// "expected X, got Y" for the current item.
    #[cold]
    fn unexpected(&self, code: ErrorCode, expected: &str) -> Diagnostic {
        match self.peek() {
            None => Diagnostic::error(
                ErrorCode::E3002,
                format!("expected {expected}, got end of input"),
                self.eof.clone(),
            ),
            Some(Item::Declaration(declaration)) => Diagnostic::error(
                ErrorCode::E3004,
                format!("expected {expected}, got a directive"),
                declaration.context(),
            )
            .with_note("directives are only allowed at the top level"),
            Some(Item::Terminal(terminal)) => Diagnostic::error(
                code,
                format!("expected {expected}, got `{}`", terminal.value),
                terminal.context.clone(),
            ),
        }
    }
}

/// Scan and parse `file`.
///
/// # Errors
///
/// The first lex, directive or syntax diagnostic.
pub fn parse(file: &SourceFile, registry: &DirectiveRegistry) -> Result<Document, Diagnostic> {
    let items = scan(file, registry)?;
    debug!(file = %file.name(), items = items.len(), "parsing");
    Parser::new(&items, file).document()
}

#[cfg(test)]
mod tests;
