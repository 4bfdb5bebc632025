use crate::ast::{Expr, FnDeclaration, Item, Stmt};
use crate::lexer::{Lexer, Token, TokenKind};
use curly_source::{Position, Source};
use std::mem;
use thiserror::Error;

mod expr;
mod stmt;

/// A fatal syntax error. The parser does not recover: the first error aborts parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}. Got: {found} at {position}")]
pub struct ParseError {
    pub message: String,
    /// Description of the offending token.
    pub found: String,
    pub position: Position,
}

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token<'a>,
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        let mut lexer = Lexer::new(source);
        Self {
            current_token: lexer.next_token(),
            lexer,
        }
    }

    /// Returns `true` once every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.current_token.kind == TokenKind::End
    }

    /// Parses a single top-level node: a function declaration or a statement.
    pub fn parse_top_level(&mut self) -> Result<Item, ParseError> {
        match self.current_token.kind {
            TokenKind::Function => Ok(Item::FnDeclaration(self.parse_fn_declaration()?)),
            _ => Ok(Item::Stmt(self.parse_stmt()?)),
        }
    }

    /// Parses top-level nodes until the end of the source.
    pub fn parse_program(&mut self) -> Result<Vec<Item>, ParseError> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_top_level()?);
        }
        Ok(items)
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Advances to the next token and returns the previous one.
    fn next(&mut self) -> Token<'a> {
        let token = self.lexer.next_token();
        mem::replace(&mut self.current_token, token)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// Predicate that tests whether the current token is of kind `kind` and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    /// Eats a token of kind `kind` or fails with `message`.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token<'a>, ParseError> {
        if self.check(kind) {
            Ok(self.next())
        } else {
            Err(self.unexpected(message))
        }
    }

    /// Eats an identifier and returns its name, or fails with `message`.
    fn expect_ident(&mut self, message: &str) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Identifier, message)?.lexeme.to_string())
    }

    fn position(&self) -> Position {
        self.current_token.position
    }

    /// Creates an unexpected token error pointing at the current token.
    fn unexpected(&self, message: impl ToString) -> ParseError {
        let token = &self.current_token;
        let found = match token.kind {
            TokenKind::Unexpected => format!("{} ({})", token.kind, token.lexeme),
            kind => kind.to_string(),
        };
        ParseError {
            message: message.to_string(),
            found,
            position: token.position,
        }
    }
}
