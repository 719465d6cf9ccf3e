//! Expressions by precedence climbing.
//!
//! Binary operators bind by [`Operator::precedence`], lowest first:
//!
//! | Level | Operators              |
//! |-------|------------------------|
//! | 1     | `\|\|`                 |
//! | 2     | `&&`                   |
//! | 3     | `\|`                   |
//! | 4     | `^`                    |
//! | 5     | `&`                    |
//! | 6     | `==` `!=`              |
//! | 7     | `<` `<=` `>` `>=`      |
//! | 8     | `<<` `>>`              |
//! | 9     | `+` `-`                |
//! | 10    | `*` `/` `%`            |
//!
//! All levels are left-associative.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{Expression, ExpressionList, ExpressionListItem, InfixExpression, Operator, Punct};

use super::Parser;

/// Lowest binding power of any binary operator.
const MIN_PRECEDENCE: u8 = 1;

impl Parser<'_> {
    /// Comma-separated expressions; each may carry a trailing comma.
    pub(super) fn expression_list(&mut self) -> Result<ExpressionList, Diagnostic> {
        let mut items = Vec::new();
        while self
            .peek_terminal()
            .is_some_and(|t| t.kind.starts_expression())
        {
            let expression = self.expression(MIN_PRECEDENCE)?;
            let comma = self.eat_punct(Punct::Comma);
            let more = comma.is_some();
            items.push(ExpressionListItem { expression, comma });
            if !more {
                break;
            }
        }
        Ok(ExpressionList { items })
    }

    fn peek_precedence(&self) -> Option<u8> {
        self.peek_terminal()
            .and_then(|t| t.as_operator())
            .and_then(Operator::precedence)
    }

    /// An operand followed by operators binding at least as tightly as `min`.
    fn expression(&mut self, min: u8) -> Result<Expression, Diagnostic> {
        let mut left = self.primary()?;
        while let Some(precedence) = self.peek_precedence().filter(|&p| p >= min) {
            let Some(operator) = self.eat(|_| true) else {
                break;
            };
            let right = self.expression(precedence + 1)?;
            left = Expression::Infix(Box::new(InfixExpression {
                left,
                operator,
                right,
            }));
        }
        Ok(left)
    }

    fn primary(&mut self) -> Result<Expression, Diagnostic> {
        self.eat(|t| t.kind.starts_expression())
            .map(Expression::Terminal)
            .ok_or_else(|| self.unexpected(ErrorCode::E3003, "an expression"))
    }
}
