//! Filter text to [`Expr`].
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr      := or_expr
//! or_expr   := and_expr ( "or" and_expr )*
//! and_expr  := not_expr ( "and" not_expr )*
//! not_expr  := "not" not_expr | primary
//! primary   := "(" expr ")" | predicate
//! predicate := column ( "=" | "!=" | ">" | "<" | ">=" | "<=" ) scalar
//!            | column "in" tuple
//!            | column "not" "in" tuple
//!            | column "between" scalar "and" scalar
//! column    := [ identifier "." ] identifier
//! scalar    := string | integer
//! tuple     := "(" scalar ( "," scalar )* ")"
//! ```
//!
//! Keywords are case-insensitive; identifiers are not. Strings are single- or
//! double-quoted with no escapes. The parser never sees a policy.

mod error;
mod ident;
mod lexer;
mod parser;
mod token;

pub use error::ParseError;
pub use ident::{is_reserved_word, is_valid_identifier};
pub use parser::MAX_NESTING_DEPTH;

use crate::ast::Expr;
use parser::Parser;

/// Parse a filter expression.
///
/// The whole input must be exactly one expression. Empty input is an error
/// here; [`validate_and_canonicalize`](crate::validate_and_canonicalize)
/// treats it as an empty filter before parsing.
///
/// # Example
///
/// ```
/// use filtersql::{ColumnRef, Expr, OperatorKind, Value, parse_filter};
///
/// let expr = parse_filter("b >= 2").unwrap();
/// assert_eq!(
///     expr,
///     Expr::comparison(ColumnRef::new("b"), OperatorKind::GtEq, Value::Integer(2))
/// );
///
/// assert!(parse_filter("b >= 2; drop table users").is_err());
/// ```
pub fn parse_filter(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input)?.parse()
}
