//! Tokens produced by the lexer.

use crate::ast::OperatorKind;
use std::fmt;

/// The kind of a token, borrowing identifier and string text from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// A word that is not a grammar keyword.
    Ident(&'a str),
    /// String literal body and the quote character that delimited it.
    Str { body: &'a str, quote: char },
    /// Integer literal, sign included.
    Int(i64),
    /// `=`, `!=`, `>`, `<`, `>=`, `<=`
    Op(OperatorKind),
    And,
    Or,
    Not,
    In,
    Between,
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
    Eof,
}

impl TokenKind<'_> {
    /// Classify a word as a keyword token or an identifier.
    pub(crate) fn word(word: &str) -> TokenKind<'_> {
        if word.eq_ignore_ascii_case("and") {
            TokenKind::And
        } else if word.eq_ignore_ascii_case("or") {
            TokenKind::Or
        } else if word.eq_ignore_ascii_case("not") {
            TokenKind::Not
        } else if word.eq_ignore_ascii_case("in") {
            TokenKind::In
        } else if word.eq_ignore_ascii_case("between") {
            TokenKind::Between
        } else {
            TokenKind::Ident(word)
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(word) => write!(f, "identifier `{word}`"),
            Self::Str { body, quote } => write!(f, "string {quote}{body}{quote}"),
            Self::Int(i) => write!(f, "integer {i}"),
            Self::Op(op) => write!(f, "`{}`", op.symbol()),
            Self::And => f.write_str("`and`"),
            Self::Or => f.write_str("`or`"),
            Self::Not => f.write_str("`not`"),
            Self::In => f.write_str("`in`"),
            Self::Between => f.write_str("`between`"),
            Self::LParen => f.write_str("`(`"),
            Self::RParen => f.write_str("`)`"),
            Self::Comma => f.write_str("`,`"),
            Self::Dot => f.write_str("`.`"),
            Self::Semicolon => f.write_str("`;`"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind<'a>,
    pub(crate) offset: usize,
}
