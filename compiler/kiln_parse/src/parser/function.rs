//! Function declarations, types and statements.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{
    ArgumentDeclaration, Declaration, FunctionDeclaration, Keyword, Operator, Punct,
    ReturnStatement, ReturnTypes, Statement, Type, TypeListItem,
};
use tracing::trace;

use super::Parser;

impl Parser<'_> {
    /// `fun Name ( [Arg (, Arg)*] ) [ ( [Type (, Type)*] ) ] { Statement* }`
    pub(super) fn function(&mut self) -> Result<Declaration, Diagnostic> {
        let keyword = self.expect_keyword(Keyword::Fun)?;
        let name = self.expect_identifier("a function name")?;
        trace!(name = %name.value, "function");

        let open_paren = self.expect_punct(Punct::LParen)?;
        let mut arguments = Vec::new();
        if !self.at_punct(Punct::RParen) {
            loop {
                let name = self.expect_identifier("an argument name")?;
                let ty = self.ty()?;
                let comma = self.eat_punct(Punct::Comma);
                let more = comma.is_some();
                arguments.push(ArgumentDeclaration { name, ty, comma });
                if !more {
                    break;
                }
            }
        }
        let close_paren = self.expect_punct(Punct::RParen)?;

        let returns = if self.at_punct(Punct::LParen) {
            Some(self.return_types()?)
        } else {
            None
        };

        let open_brace = self.expect_punct(Punct::LBrace)?;
        let mut statements = Vec::new();
        while !self.at_punct(Punct::RBrace) {
            statements.push(self.statement()?);
        }
        let close_brace = self.expect_punct(Punct::RBrace)?;

        Ok(Declaration::Function(FunctionDeclaration {
            keyword,
            name,
            open_paren,
            arguments,
            close_paren,
            returns,
            open_brace,
            statements,
            close_brace,
        }))
    }

    fn return_types(&mut self) -> Result<ReturnTypes, Diagnostic> {
        let open = self.expect_punct(Punct::LParen)?;
        let mut types = Vec::new();
        if !self.at_punct(Punct::RParen) {
            loop {
                let ty = self.ty()?;
                let comma = self.eat_punct(Punct::Comma);
                let more = comma.is_some();
                types.push(TypeListItem { ty, comma });
                if !more {
                    break;
                }
            }
        }
        let close = self.expect_punct(Punct::RParen)?;
        Ok(ReturnTypes { open, types, close })
    }

    /// `*`... followed by the base type name.
    fn ty(&mut self) -> Result<Type, Diagnostic> {
        let mut pointers = Vec::new();
        while let Some(star) = self.eat(|t| t.as_operator() == Some(Operator::Mul)) {
            pointers.push(star);
        }
        let base = self.expect_identifier("a type")?;
        Ok(Type { pointers, base })
    }

    fn statement(&mut self) -> Result<Statement, Diagnostic> {
        let Some(keyword) = self.eat(|t| t.is_keyword(Keyword::Return)) else {
            return Err(self.unexpected(ErrorCode::E3001, "a statement or `}`"));
        };
        let values = self.expression_list()?;
        Ok(Statement::Return(ReturnStatement { keyword, values }))
    }
}
