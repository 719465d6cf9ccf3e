//! AST node types.
//!
//! Every node owns the [`Terminal`]s it was built from, so its context is the
//! join of its children's contexts. Nodes built by [`crate::build`] carry
//! detached terminals and serve as location-free expectations for the
//! structural comparator in [`compare`].

mod compare;

use kiln_diagnostic::{Context, Diagnostic};
use kiln_stack::ensure_sufficient_stack;

use crate::{Terminal, TerminalKind};

pub use compare::{Anchor, Node};

/// A parsed source file: its top-level declarations in order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Document {
    pub declarations: Vec<Declaration>,
}

impl Document {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Document { declarations }
    }

    /// Function declarations, skipping directives.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            _ => None,
        })
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Include(IncludeDirective),
    Inline(InlineDirective),
}

/// `fun name(args) (returns) { statements }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionDeclaration {
    pub keyword: Terminal,
    pub name: Terminal,
    pub open_paren: Terminal,
    pub arguments: Vec<ArgumentDeclaration>,
    pub close_paren: Terminal,
    pub returns: Option<ReturnTypes>,
    pub open_brace: Terminal,
    pub statements: Vec<Statement>,
    pub close_brace: Terminal,
}

/// `name type`, and the comma that followed it, if any.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ArgumentDeclaration {
    pub name: Terminal,
    pub ty: Type,
    pub comma: Option<Terminal>,
}

/// The parenthesized return type list of a function.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReturnTypes {
    pub open: Terminal,
    pub types: Vec<TypeListItem>,
    pub close: Terminal,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeListItem {
    pub ty: Type,
    pub comma: Option<Terminal>,
}

/// Zero or more `*` followed by a base type name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Type {
    pub pointers: Vec<Terminal>,
    pub base: Terminal,
}

impl Type {
    #[inline]
    pub fn pointer_depth(&self) -> usize {
        self.pointers.len()
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Statement {
    Return(ReturnStatement),
}

/// `return` followed by a possibly empty expression list.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReturnStatement {
    pub keyword: Terminal,
    pub values: ExpressionList,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ExpressionList {
    pub items: Vec<ExpressionListItem>,
}

impl ExpressionList {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One list element. Trailing-comma presence is part of the structure.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExpressionListItem {
    pub expression: Expression,
    pub comma: Option<Terminal>,
}

#[derive(Eq, Debug)]
pub enum Expression {
    Terminal(Terminal),
    Infix(Box<InfixExpression>),
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Expression::Terminal(t) => Expression::Terminal(t.clone()),
            Expression::Infix(i) => Expression::Infix(i.clone()),
        })
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Expression::Terminal(a), Expression::Terminal(b)) => a == b,
            (Expression::Infix(a), Expression::Infix(b)) => a == b,
            _ => false,
        })
    }
}

/// `left operator right`.
///
/// Operator chains nest one level per operator, so dropping a node moves
/// nested infix children onto a heap worklist instead of recursing.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InfixExpression {
    pub left: Expression,
    pub operator: Terminal,
    pub right: Expression,
}

impl Expression {
    /// Leaves in source order, found without recursion.
    pub fn terminals(&self) -> Vec<&Terminal> {
        enum Step<'a> {
            Visit(&'a Expression),
            Emit(&'a Terminal),
        }

        let mut out = Vec::new();
        let mut pending = vec![Step::Visit(self)];
        while let Some(step) = pending.pop() {
            match step {
                Step::Emit(terminal) => out.push(terminal),
                Step::Visit(Expression::Terminal(terminal)) => out.push(terminal),
                Step::Visit(Expression::Infix(infix)) => {
                    pending.push(Step::Visit(&infix.right));
                    pending.push(Step::Emit(&infix.operator));
                    pending.push(Step::Visit(&infix.left));
                }
            }
        }
        out
    }

    /// Move a nested infix child out, leaving an empty leaf in its place.
    fn take_infix(&mut self) -> Option<Box<InfixExpression>> {
        if !matches!(self, Expression::Infix(_)) {
            return None;
        }
        let placeholder = Expression::Terminal(Terminal::unlocated(TerminalKind::Identifier, ""));
        match std::mem::replace(self, placeholder) {
            Expression::Infix(infix) => Some(infix),
            Expression::Terminal(_) => None,
        }
    }
}

impl Drop for InfixExpression {
    fn drop(&mut self) {
        let mut worklist: Vec<Box<InfixExpression>> = Vec::new();
        worklist.extend(self.left.take_infix());
        worklist.extend(self.right.take_infix());
        while let Some(mut infix) = worklist.pop() {
            worklist.extend(infix.left.take_infix());
            worklist.extend(infix.right.take_infix());
        }
    }
}

/// `#` and the directive name that follows it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DirectiveHead {
    pub hash: Terminal,
    pub name: Terminal,
}

/// Delimiters of an include path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum QuoteKind {
    /// `<path>`
    Angle,
    /// `"path"`
    Quote,
}

impl QuoteKind {
    pub fn from_opener(ch: char) -> Option<QuoteKind> {
        match ch {
            '<' => Some(QuoteKind::Angle),
            '"' => Some(QuoteKind::Quote),
            _ => None,
        }
    }

    pub const fn opener(self) -> char {
        match self {
            QuoteKind::Angle => '<',
            QuoteKind::Quote => '"',
        }
    }

    pub const fn closer(self) -> char {
        match self {
            QuoteKind::Angle => '>',
            QuoteKind::Quote => '"',
        }
    }
}

/// `#include <path>` or `#include "path"`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IncludeDirective {
    pub head: DirectiveHead,
    pub quote: QuoteKind,
    pub opener: Terminal,
    pub path: Terminal,
    pub closer: Terminal,
}

/// `#inline <tag>` ... `#end-inline <tag>`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InlineDirective {
    pub head: DirectiveHead,
    pub tag: Terminal,
    /// `None` when the closer directly follows the opener.
    pub body: Option<InlineBody>,
    /// The closing `#end-inline` line.
    pub end: Context,
}

/// Raw lines between an inline opener and closer, joined with `\n`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InlineBody {
    pub text: String,
    pub context: Context,
}

/// Join already-computed contexts of one file.
pub(crate) fn union(parts: impl IntoIterator<Item = Context>) -> Context {
    let parts: Vec<Context> = parts.into_iter().collect();
    Context::union(&parts)
}

/// Structural comparison of two documents; see [`Node::equal_to`].
pub fn compare_documents(actual: &Document, expected: &Document) -> Result<(), Diagnostic> {
    actual.equal_within(&|| actual.context(), expected)
}
