//! Constructors for location-free trees.
//!
//! Expected trees for the structural comparator are written with these
//! helpers. Separators are filled in: every argument, type or list item but
//! the last gets a comma, and the `*_trailing` variants add one to the last.
//!
//! ```
//! use kiln_ir::{build, Operator};
//!
//! let add = build::function(
//!     "add",
//!     vec![("a", build::ty("int")), ("b", build::ty("int"))],
//!     Some(vec![build::ty("int")]),
//!     vec![build::ret(vec![build::infix(
//!         build::var("a"),
//!         Operator::Add,
//!         build::var("b"),
//!     )])],
//! );
//! # let _ = add;
//! ```

use kiln_diagnostic::Context;

use crate::ast::{
    ArgumentDeclaration, Declaration, DirectiveHead, Document, Expression, ExpressionList,
    ExpressionListItem, FunctionDeclaration, IncludeDirective, InfixExpression, InlineBody,
    InlineDirective, QuoteKind, ReturnStatement, ReturnTypes, Statement, Type, TypeListItem,
};
use crate::{IntBase, Keyword, Operator, Punct, Terminal, TerminalKind};

pub fn ident(name: &str) -> Terminal {
    Terminal::unlocated(TerminalKind::Identifier, name)
}

/// Integer literal; the base is taken from the prefix as the lexer does.
pub fn int(text: &str) -> Terminal {
    let base = if text.starts_with("0x") || text.starts_with("0X") {
        IntBase::Hex
    } else if text.len() > 1 && text.starts_with('0') {
        IntBase::Octal
    } else {
        IntBase::Decimal
    };
    Terminal::unlocated(TerminalKind::Integer(base), text)
}

pub fn float(text: &str) -> Terminal {
    Terminal::unlocated(TerminalKind::Float, text)
}

/// String literal with `contents` between the quotes, as written.
pub fn string(contents: &str) -> Terminal {
    Terminal::unlocated(TerminalKind::String, format!("\"{contents}\""))
}

/// Identifier expression.
pub fn var(name: &str) -> Expression {
    Expression::Terminal(ident(name))
}

/// Integer literal expression.
pub fn num(text: &str) -> Expression {
    Expression::Terminal(int(text))
}

pub fn infix(left: Expression, operator: Operator, right: Expression) -> Expression {
    Expression::Infix(Box::new(InfixExpression {
        left,
        operator: Terminal::operator(operator),
        right,
    }))
}

pub fn ty(base: &str) -> Type {
    pointer(0, base)
}

/// `depth` stars followed by `base`.
pub fn pointer(depth: usize, base: &str) -> Type {
    Type {
        pointers: (0..depth).map(|_| Terminal::operator(Operator::Mul)).collect(),
        base: ident(base),
    }
}

/// Commas after every element but the last, and after the last if `trailing`.
fn commas(len: usize, trailing: bool) -> impl Iterator<Item = Option<Terminal>> {
    (0..len).map(move |i| (i + 1 < len || trailing).then(|| Terminal::punct(Punct::Comma)))
}

pub fn function(
    name: &str,
    arguments: Vec<(&str, Type)>,
    returns: Option<Vec<Type>>,
    statements: Vec<Statement>,
) -> Declaration {
    let arity = arguments.len();
    let arguments = arguments
        .into_iter()
        .zip(commas(arity, false))
        .map(|((name, ty), comma)| ArgumentDeclaration {
            name: ident(name),
            ty,
            comma,
        })
        .collect();
    let returns = returns.map(|types| {
        let count = types.len();
        ReturnTypes {
            open: Terminal::punct(Punct::LParen),
            types: types
                .into_iter()
                .zip(commas(count, false))
                .map(|(ty, comma)| TypeListItem { ty, comma })
                .collect(),
            close: Terminal::punct(Punct::RParen),
        }
    });
    Declaration::Function(FunctionDeclaration {
        keyword: Terminal::keyword(Keyword::Fun),
        name: ident(name),
        open_paren: Terminal::punct(Punct::LParen),
        arguments,
        close_paren: Terminal::punct(Punct::RParen),
        returns,
        open_brace: Terminal::punct(Punct::LBrace),
        statements,
        close_brace: Terminal::punct(Punct::RBrace),
    })
}

fn make_list(values: Vec<Expression>, trailing: bool) -> ExpressionList {
    let len = values.len();
    ExpressionList {
        items: values
            .into_iter()
            .zip(commas(len, trailing))
            .map(|(expression, comma)| ExpressionListItem { expression, comma })
            .collect(),
    }
}

/// Expression list without a trailing comma.
pub fn list(values: Vec<Expression>) -> ExpressionList {
    make_list(values, false)
}

/// Expression list whose last item has a trailing comma.
pub fn list_trailing(values: Vec<Expression>) -> ExpressionList {
    make_list(values, true)
}

pub fn ret(values: Vec<Expression>) -> Statement {
    return_list(list(values))
}

pub fn ret_trailing(values: Vec<Expression>) -> Statement {
    return_list(list_trailing(values))
}

pub fn return_list(values: ExpressionList) -> Statement {
    Statement::Return(ReturnStatement {
        keyword: Terminal::keyword(Keyword::Return),
        values,
    })
}

fn head(name: &str) -> DirectiveHead {
    DirectiveHead {
        hash: Terminal::punct(Punct::Hash),
        name: ident(name),
    }
}

fn include(quote: QuoteKind, path: &str) -> Declaration {
    let (opener, closer) = match quote {
        QuoteKind::Angle => (
            Terminal::operator(Operator::Lt),
            Terminal::operator(Operator::Gt),
        ),
        QuoteKind::Quote => (Terminal::punct(Punct::Quote), Terminal::punct(Punct::Quote)),
    };
    Declaration::Include(IncludeDirective {
        head: head("include"),
        quote,
        opener,
        path: Terminal::unlocated(TerminalKind::String, path),
        closer,
    })
}

/// `#include <path>`
pub fn include_angle(path: &str) -> Declaration {
    include(QuoteKind::Angle, path)
}

/// `#include "path"`
pub fn include_quote(path: &str) -> Declaration {
    include(QuoteKind::Quote, path)
}

/// `#inline tag` with the given body, `None` for an empty block.
pub fn inline(tag: &str, body: Option<&str>) -> Declaration {
    Declaration::Inline(InlineDirective {
        head: head("inline"),
        tag: ident(tag),
        body: body.map(|text| InlineBody {
            text: text.to_string(),
            context: Context::default(),
        }),
        end: Context::default(),
    })
}

pub fn document(declarations: Vec<Declaration>) -> Document {
    Document::new(declarations)
}
