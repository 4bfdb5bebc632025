use crate::ast::BinOp;
use curly_source::{Position, Source};
use logos::{Filter, Logos};
use std::fmt;
use std::ops::Range;

/// Lexer failures. Surfaced to the parser as [`TokenKind::Unexpected`] tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
}

impl LexError {
    pub fn message(self) -> &'static str {
        match self {
            LexError::UnexpectedCharacter => "Unexpected character",
            LexError::UnterminatedString => "Unterminated string",
        }
    }
}

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")] // single line comments
pub enum TokenKind {
    // literals
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[token("\"", string_literal)]
    String,

    // keywords
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("class")]
    Class,
    #[token("function")]
    Function,
    #[token("int")]
    Int,
    #[token("double")]
    Double,
    #[token("bool")]
    Bool,
    #[token("return")]
    Return,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("in")]
    In,
    #[token("print")]
    Print,

    // operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,

    // punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";", semicolon)]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    /// Produced by [`Lexer::next_token`] once the source is exhausted.
    End,
    /// Produced by [`Lexer::next_token`] for lex errors. The token lexeme holds the message.
    Unexpected,
}

/// Consumes the rest of a string literal after its opening quote.
/// A backslash escapes the character following it, whatever it is.
fn string_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexError> {
    let (len, terminated) = {
        let rest = lex.remainder();
        let mut chars = rest.char_indices();
        let mut end = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    end = Some(i + 1);
                    break;
                }
                '\\' => {
                    chars.next();
                }
                _ => {}
            }
        }
        match end {
            Some(end) => (end, true),
            None => (rest.len(), false),
        }
    };
    lex.bump(len);
    if terminated {
        Ok(())
    } else {
        Err(LexError::UnterminatedString)
    }
}

/// A semicolon placed directly after a newline is dropped from the token stream.
fn semicolon(lex: &mut logos::Lexer<TokenKind>) -> Filter<()> {
    if lex.source()[..lex.span().start].ends_with('\n') {
        Filter::Skip
    } else {
        Filter::Emit(())
    }
}

impl TokenKind {
    /// Returns the binary operator for this token or `None` if it is not a binop token.
    pub fn binop(&self) -> Option<BinOp> {
        Some(match self {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Less => BinOp::Less,
            TokenKind::LessEqual => BinOp::LessEqual,
            TokenKind::Greater => BinOp::Greater,
            TokenKind::GreaterEqual => BinOp::GreaterEqual,
            TokenKind::EqualEqual => BinOp::Equal,
            TokenKind::BangEqual => BinOp::NotEqual,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A token together with the slice of source it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Exact source slice, or the error message for [`TokenKind::Unexpected`].
    pub lexeme: &'a str,
    /// Byte range in the source.
    pub span: Range<usize>,
    /// Position of the first character.
    pub position: Position,
}

/// Renders as `L:C Kind 'lexeme'`.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} '{}'",
            self.position.line, self.position.column, self.kind, self.lexeme
        )
    }
}

/// On-demand tokenizer over a [`Source`].
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    source: &'a Source<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            inner: TokenKind::lexer(source.content),
            source,
        }
    }

    /// Returns the next token. Never fails: errors become [`TokenKind::Unexpected`] tokens
    /// and an exhausted source keeps returning [`TokenKind::End`].
    pub fn next_token(&mut self) -> Token<'a> {
        match self.inner.next() {
            Some(Ok(kind)) => self.make_token(kind, self.inner.slice()),
            Some(Err(err)) => self.make_token(TokenKind::Unexpected, err.message()),
            None => {
                let end = self.source.content.len();
                Token {
                    kind: TokenKind::End,
                    lexeme: "",
                    span: end..end,
                    position: self.source.position(end),
                }
            }
        }
    }

    fn make_token(&self, kind: TokenKind, lexeme: &'a str) -> Token<'a> {
        let span = self.inner.span();
        Token {
            kind,
            lexeme,
            position: self.source.position(span.start),
            span,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to, but not including, [`TokenKind::End`].
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::End {
            None
        } else {
            Some(token)
        }
    }
}
