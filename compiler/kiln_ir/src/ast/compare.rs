//! Structural comparison of AST trees.
//!
//! `actual.equal_to(anchor, expected)` walks both trees in declaration order
//! and reports the first divergence as a [`Diagnostic`]. Only the actual tree
//! supplies locations, so the expected tree can be built without any.
//! `anchor` is the context of the enclosing node on the actual side; it is
//! where a missing child or an empty collection is reported. Internally the
//! anchor is an [`Anchor`] closure, evaluated only when reporting.

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};
use kiln_stack::ensure_sufficient_stack;

use super::{
    union, ArgumentDeclaration, Declaration, DirectiveHead, Document, Expression,
    ExpressionList, ExpressionListItem, FunctionDeclaration, IncludeDirective, InfixExpression,
    InlineBody, InlineDirective, ReturnStatement, ReturnTypes, Statement, Type, TypeListItem,
};
use crate::Terminal;

/// Produces the enclosing node's context when a divergence is reported.
pub type Anchor<'a> = &'a dyn Fn() -> Context;

/// Operations every AST node supports.
pub trait Node: Sized {
    /// Node variant name used in mismatch messages.
    fn kind_name(&self) -> &'static str;

    /// How the node is named in "expected `...`" messages.
    fn describe(&self) -> String {
        self.kind_name().to_string()
    }

    /// Join of every child's context; detached for nodes without locations.
    fn context(&self) -> Context;

    /// Compare against `expected`, reporting the first divergence.
    fn equal_to(&self, anchor: &Context, expected: &Self) -> Result<(), Diagnostic> {
        self.equal_within(&|| anchor.clone(), expected)
    }

    /// [`Node::equal_to`] with the anchor built on demand. Contexts are only
    /// joined on the path that reports a divergence.
    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic>;

    /// Deep copy with every context removed.
    #[must_use]
    fn detached(&self) -> Self;
}

fn kind_mismatch(actual: &impl Node, expected: &impl Node) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::E4001,
        format!(
            "expected a `{}`, got a `{}`",
            expected.kind_name(),
            actual.kind_name()
        ),
        actual.context(),
    )
}

fn compare_option<T: Node>(
    anchor: Anchor<'_>,
    actual: Option<&T>,
    expected: Option<&T>,
) -> Result<(), Diagnostic> {
    match (actual, expected) {
        (Some(a), Some(e)) => a.equal_within(anchor, e),
        (None, None) => Ok(()),
        (None, Some(e)) => Err(Diagnostic::error(
            ErrorCode::E4002,
            format!("expected `{}`, got nothing", e.describe()),
            anchor(),
        )),
        (Some(a), None) => Err(Diagnostic::error(
            ErrorCode::E4003,
            format!("unexpected `{}` found", a.describe()),
            a.context(),
        )),
    }
}

fn compare_list<T: Node>(
    anchor: Anchor<'_>,
    noun: &str,
    actual: &[T],
    expected: &[T],
) -> Result<(), Diagnostic> {
    if actual.len() != expected.len() {
        let context = if actual.is_empty() {
            anchor()
        } else {
            union(actual.iter().map(Node::context))
        };
        return Err(Diagnostic::error(
            ErrorCode::E4004,
            format!(
                "expected {} {noun}{}, got {}",
                expected.len(),
                if expected.len() == 1 { "" } else { "s" },
                actual.len()
            ),
            context,
        ));
    }
    for (a, e) in actual.iter().zip(expected) {
        a.equal_within(anchor, e)?;
    }
    Ok(())
}

fn detach_all<T: Node>(nodes: &[T]) -> Vec<T> {
    nodes.iter().map(Node::detached).collect()
}

impl Node for Terminal {
    fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    fn describe(&self) -> String {
        self.value.clone()
    }

    fn context(&self) -> Context {
        self.context.clone()
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        if !self.kind.is_category_of(expected.kind) {
            return Err(kind_mismatch(self, expected));
        }
        if self.kind != expected.kind || self.value != expected.value {
            return Err(Diagnostic::error(
                ErrorCode::E4005,
                format!("expected `{}`, got `{}`", expected.value, self.value),
                self.context(),
            ));
        }
        Ok(())
    }

    fn detached(&self) -> Self {
        Terminal::unlocated(self.kind, self.value.clone())
    }
}

impl Node for Document {
    fn kind_name(&self) -> &'static str {
        "Document"
    }

    fn context(&self) -> Context {
        union(self.declarations.iter().map(Node::context))
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        compare_list(
            anchor,
            "declaration",
            &self.declarations,
            &expected.declarations,
        )
    }

    fn detached(&self) -> Self {
        Document::new(detach_all(&self.declarations))
    }
}

impl Node for Declaration {
    fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "FunctionDeclaration",
            Declaration::Include(_) => "IncludeDirective",
            Declaration::Inline(_) => "InlineDirective",
        }
    }

    fn context(&self) -> Context {
        match self {
            Declaration::Function(f) => f.context(),
            Declaration::Include(i) => i.context(),
            Declaration::Inline(i) => i.context(),
        }
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        match (self, expected) {
            (Declaration::Function(a), Declaration::Function(e)) => a.equal_within(anchor, e),
            (Declaration::Include(a), Declaration::Include(e)) => a.equal_within(anchor, e),
            (Declaration::Inline(a), Declaration::Inline(e)) => a.equal_within(anchor, e),
            _ => Err(kind_mismatch(self, expected)),
        }
    }

    fn detached(&self) -> Self {
        match self {
            Declaration::Function(f) => Declaration::Function(f.detached()),
            Declaration::Include(i) => Declaration::Include(i.detached()),
            Declaration::Inline(i) => Declaration::Inline(i.detached()),
        }
    }
}

impl Node for FunctionDeclaration {
    fn kind_name(&self) -> &'static str {
        "FunctionDeclaration"
    }

    fn context(&self) -> Context {
        let mut parts = vec![
            self.keyword.context(),
            self.name.context(),
            self.open_paren.context(),
        ];
        parts.extend(self.arguments.iter().map(Node::context));
        parts.push(self.close_paren.context());
        parts.extend(self.returns.iter().map(Node::context));
        parts.push(self.open_brace.context());
        parts.extend(self.statements.iter().map(Node::context));
        parts.push(self.close_brace.context());
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.name.equal_within(&here, &expected.name)?;
        compare_list(&here, "argument", &self.arguments, &expected.arguments)?;
        compare_option(&here, self.returns.as_ref(), expected.returns.as_ref())?;
        compare_list(&here, "statement", &self.statements, &expected.statements)
    }

    fn detached(&self) -> Self {
        FunctionDeclaration {
            keyword: self.keyword.detached(),
            name: self.name.detached(),
            open_paren: self.open_paren.detached(),
            arguments: detach_all(&self.arguments),
            close_paren: self.close_paren.detached(),
            returns: self.returns.as_ref().map(Node::detached),
            open_brace: self.open_brace.detached(),
            statements: detach_all(&self.statements),
            close_brace: self.close_brace.detached(),
        }
    }
}

impl Node for ArgumentDeclaration {
    fn kind_name(&self) -> &'static str {
        "ArgumentDeclaration"
    }

    fn context(&self) -> Context {
        let mut parts = vec![self.name.context(), self.ty.context()];
        parts.extend(self.comma.iter().map(Node::context));
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.name.equal_within(&here, &expected.name)?;
        self.ty.equal_within(&here, &expected.ty)?;
        compare_option(&here, self.comma.as_ref(), expected.comma.as_ref())
    }

    fn detached(&self) -> Self {
        ArgumentDeclaration {
            name: self.name.detached(),
            ty: self.ty.detached(),
            comma: self.comma.as_ref().map(Node::detached),
        }
    }
}

impl Node for ReturnTypes {
    fn kind_name(&self) -> &'static str {
        "ReturnTypes"
    }

    fn context(&self) -> Context {
        let mut parts = vec![self.open.context()];
        parts.extend(self.types.iter().map(Node::context));
        parts.push(self.close.context());
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        compare_list(&|| self.context(), "return type", &self.types, &expected.types)
    }

    fn detached(&self) -> Self {
        ReturnTypes {
            open: self.open.detached(),
            types: detach_all(&self.types),
            close: self.close.detached(),
        }
    }
}

impl Node for TypeListItem {
    fn kind_name(&self) -> &'static str {
        "TypeListItem"
    }

    fn context(&self) -> Context {
        let mut parts = vec![self.ty.context()];
        parts.extend(self.comma.iter().map(Node::context));
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.ty.equal_within(&here, &expected.ty)?;
        compare_option(&here, self.comma.as_ref(), expected.comma.as_ref())
    }

    fn detached(&self) -> Self {
        TypeListItem {
            ty: self.ty.detached(),
            comma: self.comma.as_ref().map(Node::detached),
        }
    }
}

impl Node for Type {
    fn kind_name(&self) -> &'static str {
        "Type"
    }

    fn context(&self) -> Context {
        let mut parts: Vec<Context> = self.pointers.iter().map(Node::context).collect();
        parts.push(self.base.context());
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        compare_list(&here, "pointer", &self.pointers, &expected.pointers)?;
        self.base.equal_within(&here, &expected.base)
    }

    fn detached(&self) -> Self {
        Type {
            pointers: detach_all(&self.pointers),
            base: self.base.detached(),
        }
    }
}

impl Node for Statement {
    fn kind_name(&self) -> &'static str {
        match self {
            Statement::Return(_) => "ReturnStatement",
        }
    }

    fn context(&self) -> Context {
        match self {
            Statement::Return(r) => r.context(),
        }
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        match (self, expected) {
            (Statement::Return(a), Statement::Return(e)) => a.equal_within(anchor, e),
        }
    }

    fn detached(&self) -> Self {
        match self {
            Statement::Return(r) => Statement::Return(r.detached()),
        }
    }
}

impl Node for ReturnStatement {
    fn kind_name(&self) -> &'static str {
        "ReturnStatement"
    }

    fn context(&self) -> Context {
        union([self.keyword.context(), self.values.context()])
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        self.values.equal_within(&|| self.context(), &expected.values)
    }

    fn detached(&self) -> Self {
        ReturnStatement {
            keyword: self.keyword.detached(),
            values: self.values.detached(),
        }
    }
}

impl Node for ExpressionList {
    fn kind_name(&self) -> &'static str {
        "ExpressionList"
    }

    fn context(&self) -> Context {
        union(self.items.iter().map(Node::context))
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        compare_list(anchor, "expression", &self.items, &expected.items)
    }

    fn detached(&self) -> Self {
        ExpressionList {
            items: detach_all(&self.items),
        }
    }
}

impl Node for ExpressionListItem {
    fn kind_name(&self) -> &'static str {
        "ExpressionListItem"
    }

    fn context(&self) -> Context {
        let mut parts = vec![self.expression.context()];
        parts.extend(self.comma.iter().map(Node::context));
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.expression.equal_within(&here, &expected.expression)?;
        compare_option(&here, self.comma.as_ref(), expected.comma.as_ref())
    }

    fn detached(&self) -> Self {
        ExpressionListItem {
            expression: self.expression.detached(),
            comma: self.comma.as_ref().map(Node::detached),
        }
    }
}

impl Node for Expression {
    fn kind_name(&self) -> &'static str {
        match self {
            Expression::Terminal(t) => t.kind_name(),
            Expression::Infix(_) => "InfixExpression",
        }
    }

    fn describe(&self) -> String {
        match self {
            Expression::Terminal(t) => t.describe(),
            Expression::Infix(_) => self.kind_name().to_string(),
        }
    }

    fn context(&self) -> Context {
        match self {
            Expression::Terminal(t) => t.context(),
            Expression::Infix(_) => union(self.terminals().into_iter().map(Node::context)),
        }
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        ensure_sufficient_stack(|| match (self, expected) {
            (Expression::Terminal(a), Expression::Terminal(e)) => a.equal_within(anchor, e),
            (Expression::Infix(a), Expression::Infix(e)) => a.equal_within(anchor, e),
            _ => Err(kind_mismatch(self, expected)),
        })
    }

    fn detached(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Expression::Terminal(t) => Expression::Terminal(t.detached()),
            Expression::Infix(i) => Expression::Infix(Box::new(i.detached())),
        })
    }
}

impl Node for InfixExpression {
    fn kind_name(&self) -> &'static str {
        "InfixExpression"
    }

    fn context(&self) -> Context {
        let terminals = self.left.terminals().into_iter().chain([&self.operator]);
        union(terminals.chain(self.right.terminals()).map(Node::context))
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.left.equal_within(&here, &expected.left)?;
        self.operator.equal_within(&here, &expected.operator)?;
        self.right.equal_within(&here, &expected.right)
    }

    fn detached(&self) -> Self {
        InfixExpression {
            left: self.left.detached(),
            operator: self.operator.detached(),
            right: self.right.detached(),
        }
    }
}

impl Node for DirectiveHead {
    fn kind_name(&self) -> &'static str {
        "DirectiveHead"
    }

    fn context(&self) -> Context {
        union([self.hash.context(), self.name.context()])
    }

    fn equal_within(&self, anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        self.name.equal_within(anchor, &expected.name)
    }

    fn detached(&self) -> Self {
        DirectiveHead {
            hash: self.hash.detached(),
            name: self.name.detached(),
        }
    }
}

impl Node for IncludeDirective {
    fn kind_name(&self) -> &'static str {
        "IncludeDirective"
    }

    fn context(&self) -> Context {
        union([
            self.head.context(),
            self.opener.context(),
            self.path.context(),
            self.closer.context(),
        ])
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.head.equal_within(&here, &expected.head)?;
        if self.quote != expected.quote {
            return Err(Diagnostic::error(
                ErrorCode::E4005,
                format!(
                    "expected `{}`, got `{}`",
                    expected.quote.opener(),
                    self.quote.opener()
                ),
                self.opener.context(),
            ));
        }
        self.path.equal_within(&here, &expected.path)
    }

    fn detached(&self) -> Self {
        IncludeDirective {
            head: self.head.detached(),
            quote: self.quote,
            opener: self.opener.detached(),
            path: self.path.detached(),
            closer: self.closer.detached(),
        }
    }
}

impl Node for InlineDirective {
    fn kind_name(&self) -> &'static str {
        "InlineDirective"
    }

    fn context(&self) -> Context {
        let mut parts = vec![self.head.context(), self.tag.context()];
        parts.extend(self.body.iter().map(Node::context));
        parts.push(self.end.clone());
        union(parts)
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        let here = || self.context();
        self.head.equal_within(&here, &expected.head)?;
        self.tag.equal_within(&here, &expected.tag)?;
        compare_option(&here, self.body.as_ref(), expected.body.as_ref())
    }

    fn detached(&self) -> Self {
        InlineDirective {
            head: self.head.detached(),
            tag: self.tag.detached(),
            body: self.body.as_ref().map(Node::detached),
            end: Context::default(),
        }
    }
}

impl Node for InlineBody {
    fn kind_name(&self) -> &'static str {
        "InlineBody"
    }

    fn context(&self) -> Context {
        self.context.clone()
    }

    fn equal_within(&self, _anchor: Anchor<'_>, expected: &Self) -> Result<(), Diagnostic> {
        if self.text != expected.text {
            return Err(Diagnostic::error(
                ErrorCode::E4005,
                format!("expected `{}`, got `{}`", expected.text, self.text),
                self.context(),
            ));
        }
        Ok(())
    }

    fn detached(&self) -> Self {
        InlineBody {
            text: self.text.clone(),
            context: Context::default(),
        }
    }
}
