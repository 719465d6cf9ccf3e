//! Kiln IR - tokens and syntax tree
//!
//! - [`Terminal`] and its [`TerminalKind`]: one token with its source context
//! - [`ast`]: the node types produced by the parser
//! - [`Node`]: context, detaching, and the structural comparator
//! - [`build`]: location-free constructors for expected trees

pub mod ast;
pub mod build;
mod token;

pub use ast::{
    compare_documents, Anchor, ArgumentDeclaration, Declaration, DirectiveHead, Document,
    Expression, ExpressionList, ExpressionListItem, FunctionDeclaration, IncludeDirective,
    InfixExpression, InlineBody, InlineDirective, Node, QuoteKind, ReturnStatement, ReturnTypes,
    Statement, Type, TypeListItem,
};
pub use token::{IntBase, Keyword, Operator, Punct, Terminal, TerminalKind};
