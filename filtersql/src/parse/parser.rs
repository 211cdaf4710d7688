//! Recursive-descent parser with one token of lookahead.
//!
//! Each precedence level has its own function, loosest first:
//! `or` → `and` → `not` → primary (parenthesized expression or predicate).
//! Source parentheses only group; they leave no trace in the tree.
//!
//! A chain of one connective (`a and b and c and d`) is folded pairwise into a
//! balanced tree, so its depth grows with the logarithm of its length. Every
//! fold renders back to the same flat chain.

use super::error::ParseError;
use super::ident::is_reserved_word;
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::ast::{ColumnRef, Expr, OperatorKind, Value};

/// Deepest nesting of parentheses and `not` the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

#[derive(Debug)]
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse one expression that spans the whole input.
    pub(crate) fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;
        let Token { kind, offset } = self.current;
        match kind {
            TokenKind::Eof => Ok(expr),
            TokenKind::Semicolon => Err(ParseError::MultipleStatements { offset }),
            found => Err(ParseError::TrailingInput {
                found: found.to_string(),
                offset,
            }),
        }
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind<'a>, expected: &'static str) -> Result<(), ParseError> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let Token { kind, offset } = self.current;
        match kind {
            TokenKind::Eof => ParseError::UnexpectedEnd {
                expected,
                offset: self.lexer.len(),
            },
            found => ParseError::UnexpectedToken {
                found: found.to_string(),
                expected,
                offset,
            },
        }
    }

    fn enter(&mut self, offset: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
                offset,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Boolean structure
    // =========================================================================

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_and()?;
        let mut rest = Vec::new();
        while self.current.kind == TokenKind::Or {
            self.advance()?;
            rest.push(self.parse_and()?);
        }
        Ok(balanced(first, rest, Expr::or))
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_not()?;
        let mut rest = Vec::new();
        while self.current.kind == TokenKind::And {
            self.advance()?;
            rest.push(self.parse_not()?);
        }
        Ok(balanced(first, rest, Expr::and))
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.current.kind != TokenKind::Not {
            return self.parse_primary();
        }
        let not = self.advance()?;
        self.enter(not.offset)?;
        let inner = self.parse_not()?;
        self.leave();
        Ok(Expr::not(inner))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.current.kind != TokenKind::LParen {
            return self.parse_predicate();
        }
        let open = self.advance()?;
        self.enter(open.offset)?;
        let inner = self.parse_or()?;
        self.expect(TokenKind::RParen, "`)`")?;
        self.leave();
        Ok(inner)
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    fn parse_predicate(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_column()?;

        match self.current.kind {
            TokenKind::Op(op) => {
                self.advance()?;
                let right = self.parse_scalar()?;
                Ok(Expr::comparison(left, op, right))
            },
            TokenKind::In => {
                self.advance()?;
                let right = self.parse_tuple()?;
                Ok(Expr::comparison(left, OperatorKind::In, right))
            },
            TokenKind::Not => {
                self.advance()?;
                self.expect(TokenKind::In, "`in` after `not`")?;
                let right = self.parse_tuple()?;
                Ok(Expr::comparison(left, OperatorKind::NotIn, right))
            },
            TokenKind::Between => {
                self.advance()?;
                let from = self.parse_scalar()?;
                self.expect(TokenKind::And, "`and` in `between`")?;
                let to = self.parse_scalar()?;
                Ok(Expr::between(left, from, to))
            },
            _ => Err(self.unexpected("comparison operator")),
        }
    }

    fn parse_column(&mut self) -> Result<ColumnRef, ParseError> {
        let first = self.parse_identifier()?;
        if self.current.kind != TokenKind::Dot {
            return Ok(ColumnRef::new(first));
        }
        self.advance()?;
        let name = self.parse_identifier()?;
        Ok(ColumnRef::qualified(first, name))
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let Token { kind, offset } = self.current;
        match kind {
            TokenKind::Ident(word) if is_reserved_word(word) => Err(ParseError::ReservedWord {
                word: word.to_string(),
                offset,
            }),
            TokenKind::Ident(word) => {
                self.advance()?;
                Ok(word.to_string())
            },
            _ => Err(self.unexpected("column name")),
        }
    }

    fn parse_scalar(&mut self) -> Result<Value, ParseError> {
        let value = match self.current.kind {
            TokenKind::Str { body, .. } => Value::String(body.to_string()),
            TokenKind::Int(i) => Value::Integer(i),
            _ => return Err(self.unexpected("string or integer literal")),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_tuple(&mut self) -> Result<Value, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut items = vec![self.parse_scalar()?];
        while self.current.kind == TokenKind::Comma {
            self.advance()?;
            items.push(self.parse_scalar()?);
        }
        self.expect(TokenKind::RParen, "`)` or `,`")?;
        Ok(Value::Tuple(items))
    }
}

/// Join `first` and `rest` with `join`, pairing neighbours level by level.
/// Operand order is preserved and up to three operands fold left-deep.
fn balanced(first: Expr, rest: Vec<Expr>, join: fn(Expr, Expr) -> Expr) -> Expr {
    let mut level = rest;
    level.insert(0, first);
    loop {
        match <[Expr; 1]>::try_from(level) {
            Ok([root]) => return root,
            Err(many) => {
                let mut next = Vec::with_capacity(many.len().div_ceil(2));
                let mut items = many.into_iter();
                while let Some(left) = items.next() {
                    next.push(match items.next() {
                        Some(right) => join(left, right),
                        None => left,
                    });
                }
                level = next;
            },
        }
    }
}
