//! Terminal nodes: one lexical token and the context it came from.

use std::fmt;

use kiln_diagnostic::Context;

/// Reserved words. Matching is exact and case-sensitive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Fun,
    Return,
    If,
    Else,
    While,
    Var,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::Fun,
        Keyword::Return,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Var,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Fun => "fun",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Var => "var",
        }
    }

    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|k| k.as_str() == word)
    }
}

/// Operators, including those the grammar does not use in expressions yet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Logical
    Or,
    And,
    Not,

    // Bitwise
    BitOr,
    BitXor,
    BitAnd,
    BitNot,
    Shl,
    Shr,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Increment,
    Decrement,

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
}

impl Operator {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Not => "!",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::BitNot => "~",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
        }
    }

    /// Binding power of a binary infix operator; higher binds tighter.
    ///
    /// `None` for operators that cannot appear between two operands.
    pub const fn precedence(self) -> Option<u8> {
        match self {
            Self::Or => Some(1),
            Self::And => Some(2),
            Self::BitOr => Some(3),
            Self::BitXor => Some(4),
            Self::BitAnd => Some(5),
            Self::Eq | Self::NotEq => Some(6),
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => Some(7),
            Self::Shl | Self::Shr => Some(8),
            Self::Add | Self::Sub => Some(9),
            Self::Mul | Self::Div | Self::Mod => Some(10),
            _ => None,
        }
    }
}

/// Punctuation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Punct {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    Arrow,
    Question,
    /// `#`, only produced by the directive scanner.
    Hash,
    /// `"` delimiting an include path.
    Quote,
}

impl Punct {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Ellipsis => "...",
            Self::Arrow => "->",
            Self::Question => "?",
            Self::Hash => "#",
            Self::Quote => "\"",
        }
    }
}

/// Base of an integer literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IntBase {
    Decimal,
    Octal,
    Hex,
}

/// Token category of a [`Terminal`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TerminalKind {
    Keyword(Keyword),
    Operator(Operator),
    Punctuation(Punct),
    Identifier,
    Integer(IntBase),
    Float,
    String,
}

impl TerminalKind {
    /// Category name used in structural mismatch messages.
    pub const fn name(self) -> &'static str {
        match self {
            TerminalKind::Keyword(_) => "Keyword",
            TerminalKind::Operator(_) => "Operator",
            TerminalKind::Punctuation(_) => "Punctuation",
            TerminalKind::Identifier => "Identifier",
            TerminalKind::Integer(_) => "Integer",
            TerminalKind::Float => "Float",
            TerminalKind::String => "String",
        }
    }

    /// Whether a token of this kind can start an expression.
    pub const fn starts_expression(self) -> bool {
        matches!(
            self,
            TerminalKind::Identifier
                | TerminalKind::Integer(_)
                | TerminalKind::Float
                | TerminalKind::String
        )
    }

    pub fn is_category_of(self, other: TerminalKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// An AST leaf: one token's kind, its literal source text, and its context.
///
/// `value` is the text exactly as written: string literals keep their quotes
/// and escapes, numbers keep their prefix.
#[derive(Clone, Eq, PartialEq)]
pub struct Terminal {
    pub kind: TerminalKind,
    pub value: String,
    pub context: Context,
}

impl Terminal {
    pub fn new(kind: TerminalKind, value: impl Into<String>, context: Context) -> Self {
        Terminal {
            kind,
            value: value.into(),
            context,
        }
    }

    /// A terminal with no source location, for expected trees.
    pub fn unlocated(kind: TerminalKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, Context::default())
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Self::unlocated(TerminalKind::Keyword(keyword), keyword.as_str())
    }

    pub fn operator(operator: Operator) -> Self {
        Self::unlocated(TerminalKind::Operator(operator), operator.as_symbol())
    }

    pub fn punct(punct: Punct) -> Self {
        Self::unlocated(TerminalKind::Punctuation(punct), punct.as_symbol())
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TerminalKind::Keyword(keyword)
    }

    #[inline]
    pub fn is_punct(&self, punct: Punct) -> bool {
        self.kind == TerminalKind::Punctuation(punct)
    }

    /// The operator, if this terminal is one.
    pub fn as_operator(&self) -> Option<Operator> {
        match self.kind {
            TerminalKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context.position() {
            Some(position) => write!(f, "{:?}({:?}) @ {position}", self.kind, self.value),
            None => write!(f, "{:?}({:?})", self.kind, self.value),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
