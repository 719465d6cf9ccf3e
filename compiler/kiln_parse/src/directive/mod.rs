//! Preprocessor directive dispatch.
//!
//! A directive is a line whose first non-whitespace character is `#`,
//! followed by a name made of alphanumerics, `_` and `-`. The name selects a
//! handler from a [`DirectiveRegistry`]; the handler continues from the
//! cursor right after the name and may consume further lines.
//!
//! Each parser owns its registry, so two parsers in one process can
//! recognise different directive sets.

mod include;
mod inline;

use std::fmt;

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};
use kiln_ir::{Declaration, DirectiveHead, Punct, Terminal, TerminalKind};
use kiln_lexer_core::{Cursor, CursorState};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

pub use include::include;
pub use inline::inline;

/// Builds a declaration from the rest of a directive.
///
/// The cursor is positioned right after the directive name.
pub type DirectiveHandler = fn(&mut Cursor<'_>, DirectiveHead) -> Result<Declaration, Diagnostic>;

/// Directive names and their handlers.
#[derive(Clone)]
pub struct DirectiveRegistry {
    handlers: FxHashMap<String, DirectiveHandler>,
}

impl DirectiveRegistry {
    /// A registry that recognises no directives.
    pub fn empty() -> Self {
        DirectiveRegistry {
            handlers: FxHashMap::default(),
        }
    }

    /// `include` and `inline`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("include", include);
        registry.register("inline", inline);
        registry
    }

    /// Register `handler` under `name`, returning the handler it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: DirectiveHandler,
    ) -> Option<DirectiveHandler> {
        self.handlers.insert(name.into(), handler)
    }

    pub fn get(&self, name: &str) -> Option<DirectiveHandler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[inline]
fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Scan the directive at the cursor and hand it to its registered handler.
///
/// # Errors
///
/// If the `#` is not the first non-whitespace character on its line, the
/// name is missing or unregistered, or the handler fails.
///
/// # Panics
///
/// In debug builds, if the cursor is not on a `#`.
pub fn scan_directive(
    cursor: &mut Cursor<'_>,
    registry: &DirectiveRegistry,
) -> Result<Declaration, Diagnostic> {
    debug_assert_eq!(cursor.current(), Some('#'));
    if !cursor.is_first_non_whitespace() {
        return Err(Diagnostic::error(
            ErrorCode::E2001,
            "`#` must be the first non-whitespace character on its line",
            char_context(cursor, cursor.state()),
        ));
    }
    let hash = take(cursor, TerminalKind::Punctuation(Punct::Hash));

    let begin = cursor.state();
    cursor.eat_while(is_name_char);
    let (name, context) = cursor.finish(begin);
    if name.is_empty() {
        return Err(Diagnostic::error(
            ErrorCode::E2002,
            "expected a directive name after `#`",
            char_context(cursor, begin),
        ));
    }
    let Some(handler) = registry.get(&name) else {
        return Err(Diagnostic::error(
            ErrorCode::E2003,
            format!("unknown directive `#{name}`"),
            context,
        )
        .with_note(format!("known directives: {}", registry.names().join(", "))));
    };

    debug!(directive = %name, position = %cursor.position(), "dispatching directive");
    let head = DirectiveHead {
        hash,
        name: Terminal::new(TerminalKind::Identifier, name, context),
    };
    let declaration = handler(cursor, head)?;
    trace!(position = %cursor.position(), "directive finished");
    Ok(declaration)
}

/// Consume one code point as a terminal of `kind`.
pub(crate) fn take(cursor: &mut Cursor<'_>, kind: TerminalKind) -> Terminal {
    let begin = cursor.state();
    cursor.next_in_line();
    let (value, context) = cursor.finish(begin);
    Terminal::new(kind, value, context)
}

/// The code point at `state`, or a point at end of line.
pub(crate) fn char_context(cursor: &Cursor<'_>, state: CursorState) -> Context {
    if state.column >= cursor.file().lines()[state.line].len() {
        return cursor.point(state);
    }
    cursor
        .finish_with(state, CursorState::new(state.line, state.column + 1))
        .1
}

/// Nothing but whitespace or a `//` comment may follow a directive.
pub(crate) fn expect_end_of_line(
    cursor: &mut Cursor<'_>,
    directive: &str,
) -> Result<(), Diagnostic> {
    cursor.skip_whitespace_in_line();
    if cursor.at_eol() || cursor.peek_string("//") {
        return Ok(());
    }
    let begin = cursor.state();
    let line = cursor.line();
    let trailing = line.chars().iter().rev().take_while(|c| c.is_whitespace()).count();
    let end = CursorState::new(begin.line, line.len() - trailing);
    let (text, context) = cursor.finish_with(begin, end);
    Err(Diagnostic::error(
        ErrorCode::E2010,
        format!("unexpected `{text}` after `#{directive}`"),
        context,
    ))
}

#[cfg(test)]
mod tests;
