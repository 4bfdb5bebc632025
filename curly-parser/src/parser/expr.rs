use super::*;
use crate::ast::BinOp;
use curly_source::stack::ensure_sufficient_stack;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression, including assignments and `++`/`--`.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let lhs = self.parse_binary_expr()?;
            self.parse_assignment_suffix(lhs)
        })
    }

    /// Continues parsing an expression whose leftmost primary has already been consumed.
    pub(crate) fn parse_expr_with_primary(&mut self, primary: Expr) -> Result<Expr, ParseError> {
        let primary = self.parse_postfix_expr(primary)?;
        let lhs = self.parse_binary_rest(primary)?;
        self.parse_assignment_suffix(lhs)
    }

    /// Folds a trailing `=`, `++` or `--` into an assignment to `lhs`.
    /// `x++` is rewritten to `x = x + 1`.
    fn parse_assignment_suffix(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let pos = self.position();
        match self.current_token.kind {
            TokenKind::Equal => {
                let Expr::Identifier { ident, .. } = lhs else {
                    return Err(self.unexpected("Left side of assignment must be an identifier"));
                };
                self.next();
                let value = self.parse_expr()?;
                Ok(Expr::Assign {
                    target: ident,
                    value: Box::new(value),
                    pos,
                })
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let Expr::Identifier { ident, .. } = &lhs else {
                    return Err(
                        self.unexpected("Left side of increment/decrement must be an identifier")
                    );
                };
                let target = ident.clone();
                let op = if self.check(TokenKind::PlusPlus) {
                    BinOp::Add
                } else {
                    BinOp::Sub
                };
                self.next();
                let value = Expr::Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(Expr::NumberLit { value: 1, pos }),
                    pos,
                };
                Ok(Expr::Assign {
                    target,
                    value: Box::new(value),
                    pos,
                })
            }
            _ => Ok(lhs),
        }
    }

    /// Parses a primary followed by any number of binary operators.
    /// Every operator has the same precedence and the right operand is a full
    /// expression, so `a - b - c` parses as `a - (b - c)`.
    fn parse_binary_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_primary_expr()?;
        self.parse_binary_rest(lhs)
    }

    fn parse_binary_rest(&mut self, mut lhs: Expr) -> Result<Expr, ParseError> {
        while let Some(op) = self.current_token.kind.binop() {
            let pos = self.position();
            self.next();
            let rhs = self.parse_expr()?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                pos,
            };
        }
        Ok(lhs)
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.current_token.kind {
            TokenKind::Identifier => {
                let token = self.next();
                let ident = Expr::Identifier {
                    ident: token.lexeme.to_string(),
                    pos: token.position,
                };
                self.parse_postfix_expr(ident)
            }
            TokenKind::Number => self.parse_number_lit(),
            TokenKind::LParen => {
                self.next();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                let pos = self.next().position;
                let elements = if self.check(TokenKind::RBracket) {
                    Vec::new()
                } else {
                    self.parse_args()?
                };
                self.expect(TokenKind::RBracket, "Expected ']' after array literal")?;
                Ok(Expr::ArrayLit { elements, pos })
            }
            _ => Err(self.unexpected("Unsupported expression")),
        }
    }

    /* Expressions.Literals */
    fn parse_number_lit(&mut self) -> Result<Expr, ParseError> {
        let lexeme = self.current_token.lexeme;
        if lexeme.contains('.') {
            return Err(self.unexpected("Fractional number literals are not supported"));
        }
        let value = lexeme
            .parse()
            .map_err(|_| self.unexpected("Number literal out of range"))?;
        let pos = self.next().position;
        Ok(Expr::NumberLit { value, pos })
    }

    /* Expressions.Postfix */
    /// Parses call and index chains: `f(x)[i](y)`.
    fn parse_postfix_expr(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            match self.current_token.kind {
                TokenKind::LParen => {
                    let pos = self.next().position;
                    let args = if self.check(TokenKind::RParen) {
                        Vec::new()
                    } else {
                        self.parse_args()?
                    };
                    self.expect(TokenKind::RParen, "Expected ')' after function call")?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                        pos,
                    };
                }
                TokenKind::LBracket => {
                    let pos = self.next().position;
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket, "Expected ']' after array index")?;
                    expr = Expr::Index {
                        array: Box::new(expr),
                        index: Box::new(index),
                        pos,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Parses a comma separated, non-empty list of expressions.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }
}
