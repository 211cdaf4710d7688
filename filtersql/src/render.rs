//! Canonical rendering.
//!
//! Keywords are lower-case, operators have one space on each side, integers
//! are decimal and tuples are `(v1, v2)`. Parentheses appear only where a
//! child binds looser than its parent; source parentheses are not kept.

use crate::ast::{ColumnRef, Connective, Expr, OperatorKind, Value};
use std::fmt;

/// Binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Or,
    And,
    Not,
    Predicate,
}

impl Expr {
    const fn precedence(&self) -> Precedence {
        match self {
            Self::Or(..) => Precedence::Or,
            Self::And(..) => Precedence::And,
            Self::Not(_) => Precedence::Not,
            Self::Comparison { .. } | Self::Between { .. } | Self::Column(_) | Self::Value(_) => {
                Precedence::Predicate
            },
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parent: Precedence) -> fmt::Result {
    if operand.precedence() < parent {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// Render an expression in canonical form.
///
/// Same as `expr.to_string()`.
///
/// ```
/// use filtersql::{canonicalize, parse_filter};
///
/// let expr = parse_filter("((A = 'x') OR a = 'y') AND NOT (b = 2)").unwrap();
/// assert_eq!(canonicalize(&expr), "(A = 'x' or a = 'y') and not b = 2");
/// ```
#[must_use]
pub fn canonicalize(expr: &Expr) -> String {
    expr.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(left, right) => {
                write_operand(f, left, Precedence::And)?;
                f.write_str(" and ")?;
                write_operand(f, right, Precedence::And)
            },
            Self::Or(left, right) => {
                write_operand(f, left, Precedence::Or)?;
                f.write_str(" or ")?;
                write_operand(f, right, Precedence::Or)
            },
            Self::Not(inner) => {
                f.write_str("not ")?;
                write_operand(f, inner, Precedence::Not)
            },
            Self::Comparison { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Between { left, from, to } => write!(f, "{left} between {from} and {to}"),
            Self::Column(column) => write!(f, "{column}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier.as_deref() {
            Some(qualifier) if !qualifier.is_empty() => write!(f, "{qualifier}.{}", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Single-quoted unless the body itself holds a single quote.
            Self::String(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            },
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
