//! Filter lexer.
//!
//! Produces one token at a time on demand. Offsets are byte offsets into the
//! input. Only ASCII is meaningful outside string literals; any other
//! character is an error.

use super::error::ParseError;
use super::token::{Token, TokenKind};
use crate::ast::OperatorKind;

/// Lexer over a borrowed filter string.
#[derive(Debug)]
pub(crate) struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Length of the input, the offset reported for end-of-input errors.
    pub(crate) const fn len(&self) -> usize {
        self.input.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_byte_at(&self, ahead: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + ahead).copied()
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    fn skip_whitespace(&mut self) {
        while self.peek_byte().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Read the next token, or [`TokenKind::Eof`] at the end of input.
    pub(crate) fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        self.skip_whitespace();
        let offset = self.pos;

        let Some(byte) = self.peek_byte() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = match byte {
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b',' => self.single(TokenKind::Comma),
            b'.' => self.single(TokenKind::Dot),
            b';' => self.single(TokenKind::Semicolon),
            b'=' => self.single(TokenKind::Op(OperatorKind::Eq)),
            b'!' if self.peek_byte_at(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Op(OperatorKind::NotEq)
            },
            b'>' if self.peek_byte_at(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Op(OperatorKind::GtEq)
            },
            b'<' if self.peek_byte_at(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Op(OperatorKind::LtEq)
            },
            b'>' => self.single(TokenKind::Op(OperatorKind::Gt)),
            b'<' => self.single(TokenKind::Op(OperatorKind::Lt)),
            b'\'' | b'"' => self.read_string(char::from(byte))?,
            b'0'..=b'9' => self.read_integer()?,
            b'-' if self.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.read_integer()?
            },
            b if b.is_ascii_alphabetic() || b == b'_' => self.read_word(),
            _ => {
                let ch = self.rest().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::UnexpectedChar { ch, offset });
            },
        };

        Ok(Token { kind, offset })
    }

    fn single(&mut self, kind: TokenKind<'a>) -> TokenKind<'a> {
        self.pos += 1;
        kind
    }

    fn read_word(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        while self
            .peek_byte()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        TokenKind::word(self.input.get(start..self.pos).unwrap_or(""))
    }

    fn read_integer(&mut self) -> Result<TokenKind<'a>, ParseError> {
        let start = self.pos;
        if self.peek_byte() == Some(b'-') {
            self.pos += 1;
        }
        while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        let literal = self.input.get(start..self.pos).unwrap_or("");
        literal
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| ParseError::IntegerOutOfRange {
                literal: literal.to_string(),
                offset: start,
            })
    }

    /// Read a quoted literal. The body runs to the next occurrence of the
    /// opening quote; there are no escapes.
    fn read_string(&mut self, quote: char) -> Result<TokenKind<'a>, ParseError> {
        let start = self.pos;
        let after_quote = self.input.get(start + 1..).unwrap_or("");

        let Some(len) = after_quote.find(quote) else {
            return Err(ParseError::UnterminatedString { offset: start });
        };

        let body = after_quote.get(..len).unwrap_or("");
        self.pos = start + 1 + len + 1;
        Ok(TokenKind::Str { body, quote })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                return out;
            }
            out.push(token.kind);
        }
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    #[test]
    fn test_simple_comparison() {
        assert_eq!(
            kinds("a = 'test'"),
            vec![
                TokenKind::Ident("a"),
                TokenKind::Op(OperatorKind::Eq),
                TokenKind::Str {
                    body: "test",
                    quote: '\''
                },
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= != > < >= <="),
            vec![
                TokenKind::Op(OperatorKind::Eq),
                TokenKind::Op(OperatorKind::NotEq),
                TokenKind::Op(OperatorKind::Gt),
                TokenKind::Op(OperatorKind::Lt),
                TokenKind::Op(OperatorKind::GtEq),
                TokenKind::Op(OperatorKind::LtEq),
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("AND or Not iN BeTwEeN"),
            vec![
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::In,
                TokenKind::Between,
            ]
        );
    }

    #[test]
    fn test_identifiers_keep_case() {
        assert_eq!(
            kinds("Something.D"),
            vec![
                TokenKind::Ident("Something"),
                TokenKind::Dot,
                TokenKind::Ident("D"),
            ]
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(
            kinds("0 42 -7"),
            vec![TokenKind::Int(0), TokenKind::Int(42), TokenKind::Int(-7)]
        );
        assert_eq!(
            kinds("-9223372036854775808"),
            vec![TokenKind::Int(i64::MIN)]
        );
    }

    #[test]
    fn test_double_quoted_string_keeps_single_quote() {
        assert_eq!(
            kinds(r#""it's""#),
            vec![TokenKind::Str {
                body: "it's",
                quote: '"'
            }]
        );
    }

    #[test]
    fn test_string_body_is_opaque() {
        assert_eq!(
            kinds("'a and (b'"),
            vec![TokenKind::Str {
                body: "a and (b",
                quote: '\''
            }]
        );
    }

    #[test]
    fn test_whitespace_variants() {
        assert_eq!(
            kinds("a\tand\nb"),
            vec![TokenKind::Ident("a"), TokenKind::And, TokenKind::Ident("b")]
        );
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("a = 'test");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::UnterminatedString { offset: 4 })
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        let mut lexer = Lexer::new("99999999999999999999");
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::IntegerOutOfRange {
                literal: "99999999999999999999".into(),
                offset: 0
            })
        );
    }

    #[test]
    fn test_unexpected_characters() {
        for (input, ch) in [("*", '*'), ("a @ b", '@'), ("-- c", '-'), ("é", 'é'), ("!", '!')] {
            let mut lexer = Lexer::new(input);
            let err = loop {
                match lexer.next_token() {
                    Ok(token) if token.kind == TokenKind::Eof => panic!("no error for {input}"),
                    Ok(_) => {},
                    Err(err) => break err,
                }
            };
            assert!(
                matches!(err, ParseError::UnexpectedChar { ch: c, .. } if c == ch),
                "{input}: {err:?}"
            );
        }
    }

    #[test]
    fn test_offsets() {
        let mut lexer = Lexer::new("  a  >=  2");
        assert_eq!(lexer.next_token().unwrap().offset, 2);
        assert_eq!(lexer.next_token().unwrap().offset, 5);
        assert_eq!(lexer.next_token().unwrap().offset, 9);
        assert_eq!(lexer.next_token().unwrap().offset, 10);
    }
}
