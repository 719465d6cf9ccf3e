//! Pre-scan of a whole file into terminals and directive declarations.

use kiln_diagnostic::{Context, Diagnostic};
use kiln_ir::{Declaration, Node, Terminal};
use kiln_lexer::{lex_token, skip_trivia};
use kiln_lexer_core::Cursor;
use kiln_source::SourceFile;
use tracing::trace;

use crate::directive::{scan_directive, DirectiveRegistry};

/// One element of the pre-scanned stream.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Item {
    Terminal(Terminal),
    Declaration(Declaration),
}

impl Item {
    pub fn context(&self) -> Context {
        match self {
            Item::Terminal(terminal) => terminal.context.clone(),
            Item::Declaration(declaration) => declaration.context(),
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Item::Terminal(terminal) => Some(terminal),
            Item::Declaration(_) => None,
        }
    }
}

/// Lex `file`, dispatching every `#` to the directive registry.
///
/// # Errors
///
/// The first lex or directive diagnostic.
pub fn scan(file: &SourceFile, registry: &DirectiveRegistry) -> Result<Vec<Item>, Diagnostic> {
    let mut cursor = Cursor::new(file);
    let mut items = Vec::new();
    loop {
        skip_trivia(&mut cursor);
        if cursor.at_eof() {
            trace!(file = %file.name(), items = items.len(), "scan finished");
            return Ok(items);
        }
        let item = if cursor.current() == Some('#') {
            Item::Declaration(scan_directive(&mut cursor, registry)?)
        } else {
            Item::Terminal(lex_token(&mut cursor)?)
        };
        items.push(item);
    }
}
