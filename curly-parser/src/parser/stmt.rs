use super::*;
use crate::ast::{BaseType, Param, Type};
use curly_source::stack::ensure_sufficient_stack;

impl<'a> Parser<'a> {
    /// Parses a function declaration.
    pub fn parse_fn_declaration(&mut self) -> Result<FnDeclaration, ParseError> {
        self.expect(TokenKind::Function, "Expected 'function' keyword")?;
        let pos = self.position();
        let ident = self.expect_ident("Expected function name")?;
        self.expect(TokenKind::LParen, "Expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "Expected ')' after parameters")?;

        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(FnDeclaration {
            ident,
            params,
            return_type,
            body,
            pos,
        })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let ident = self.expect_ident("Expected identifier in parameter")?;
        self.expect(TokenKind::Colon, "Expected colon after parameter name")?;
        let ty = self.parse_type()?;
        Ok(Param { ident, ty })
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let base = match self.current_token.kind {
            TokenKind::Int => BaseType::Int,
            TokenKind::Double => BaseType::Double,
            TokenKind::Bool => BaseType::Bool,
            _ => return Err(self.unexpected("Expected type")),
        };
        self.next();
        let is_array = if self.eat(TokenKind::LBracket) {
            self.expect(TokenKind::RBracket, "Expected ']' after '[' in type")?;
            true
        } else {
            false
        };
        Ok(Type { base, is_array })
    }

    /// Parses a braced list of statements.
    pub fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, "Expected '{' to start block")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "Expected '}' to end block")?;

        Ok(body)
    }

    /// Parses a loop body: either a block or a single statement.
    fn parse_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.check(TokenKind::LBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_stmt()?])
        }
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| match self.current_token.kind {
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Let => {
                let stmt = self.parse_var_declaration()?;
                self.expect(TokenKind::Semicolon, "Expected ';' after variable declaration")?;
                Ok(stmt)
            }
            TokenKind::Identifier => self.parse_identifier_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            _ => {
                // expression statement
                let pos = self.position();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "Expected ';' after expression")?;
                Ok(Stmt::ExprStmt { expr, pos })
            }
        })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.expect(TokenKind::Return, "Expected 'return'")?.position;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after return")?;
        Ok(Stmt::Return { expr, pos })
    }

    fn parse_print_stmt(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.expect(TokenKind::Print, "Expected 'print'")?.position;
        self.expect(TokenKind::LParen, "Expected '(' after print")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after print expression")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after print")?;
        Ok(Stmt::Print { expr, pos })
    }

    /// Parses `let IDENT ':' Type '=' Expression` without the trailing semicolon.
    fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.expect(TokenKind::Let, "Expected 'let'")?.position;
        let ident = self.expect_ident("Expected identifier after 'let'")?;
        self.expect(TokenKind::Colon, "Expected ':' after variable name")?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Equal, "Expected '=' after type")?;
        let initializer = self.parse_expr()?;
        Ok(Stmt::VarDecl {
            ident,
            ty,
            initializer,
            pos,
        })
    }

    /// Parses a statement starting with an identifier: an assignment, a call or
    /// any other expression whose leftmost primary is that identifier.
    fn parse_identifier_stmt(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect(TokenKind::Identifier, "Expected identifier")?;
        let pos = token.position;
        let ident = token.lexeme.to_string();

        if self.eat(TokenKind::Equal) {
            let value = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after assignment")?;
            return Ok(Stmt::Assign {
                target: ident,
                value,
                pos,
            });
        }

        let expr = self.parse_expr_with_primary(Expr::Identifier { ident, pos })?;
        let message = if matches!(expr, Expr::Call { .. }) {
            "Expected ';' after function call"
        } else {
            "Expected ';' after expression"
        };
        self.expect(TokenKind::Semicolon, message)?;
        Ok(Stmt::ExprStmt { expr, pos })
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.expect(TokenKind::For, "Expected 'for'")?.position;
        self.expect(TokenKind::LParen, "Expected '(' after for")?;

        let init = if self.eat(TokenKind::Semicolon) {
            None
        } else {
            let init = match self.current_token.kind {
                TokenKind::Let => self.parse_var_declaration()?,
                TokenKind::Identifier => {
                    let token = self.next();
                    self.expect(TokenKind::Equal, "Expected '=' after variable name")?;
                    let value = self.parse_expr()?;
                    Stmt::Assign {
                        target: token.lexeme.to_string(),
                        value,
                        pos: token.position,
                    }
                }
                _ => return Err(self.unexpected("Unsupported for-loop initializer")),
            };
            self.expect(TokenKind::Semicolon, "Expected ';' after for initializer")?;
            Some(Box::new(init))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after for condition")?;

        let increment = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RParen, "Expected ')' after for increment")?;

        let body = self.parse_body()?;

        Ok(Stmt::For {
            init,
            condition,
            increment,
            body,
            pos,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.expect(TokenKind::While, "Expected 'while'")?.position;
        self.expect(TokenKind::LParen, "Expected '(' after while")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after while")?;
        let body = self.parse_body()?;
        Ok(Stmt::While {
            condition,
            body,
            pos,
        })
    }
}
