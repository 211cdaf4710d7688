//! Rejection reasons.

use crate::ast::Connective;
use crate::parse::ParseError;
use crate::policy::{Bound, Complexity};
use std::fmt;

/// Machine-readable tag for a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Not a single well-formed expression.
    Syntax,
    /// `(` and `)` counts differ.
    UnbalancedParentheses,
    /// A connective or parenthesis count is over its bound.
    ComplexityExceeded,
    /// A connective whose bound is `AtMost(0)`.
    UnsupportedConnective,
    /// No column entry matches.
    UnsupportedColumn,
    /// Column known, operator or `between` not configured for it.
    UnsupportedOperator,
    /// Operator configured, no matcher accepts the value.
    InvalidRightHandSide,
    /// A tree shape outside the allowed set.
    UnsupportedSyntax,
}

impl ErrorKind {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax_error",
            Self::UnbalancedParentheses => "unbalanced_parentheses",
            Self::ComplexityExceeded => "complexity_exceeded",
            Self::UnsupportedConnective => "unsupported_connective",
            Self::UnsupportedColumn => "unsupported_column",
            Self::UnsupportedOperator => "unsupported_operator",
            Self::InvalidRightHandSide => "invalid_right_hand_side",
            Self::UnsupportedSyntax => "unsupported_syntax",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a filter was rejected.
///
/// Only the first violation is reported. Every variant except
/// [`Syntax`](Self::Syntax) and
/// [`UnbalancedParentheses`](Self::UnbalancedParentheses) carries the
/// offending fragment; for tree-level errors that is the canonical rendering
/// of the smallest rejected sub-expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The text is not one expression in the filter grammar.
    Syntax(ParseError),
    /// Raw `(` and `)` counts differ.
    UnbalancedParentheses {
        /// Number of `(` outside string literals.
        open: usize,
        /// Number of `)` outside string literals.
        close: usize,
    },
    /// A counted construct occurs more often than its bound allows.
    ComplexityExceeded {
        /// What was counted.
        complexity: Complexity,
        /// The bound that was exceeded.
        bound: Bound,
        /// How many were found.
        found: usize,
        /// The trimmed input text.
        fragment: String,
    },
    /// A connective is used while its bound is `AtMost(0)`.
    UnsupportedConnective {
        /// The connective.
        connective: Connective,
        /// Rendering of the connective's sub-tree.
        fragment: String,
    },
    /// A column reference matches no column entry.
    UnsupportedColumn {
        /// Rendering of the column reference.
        column: String,
        /// Rendering of the predicate using it.
        fragment: String,
    },
    /// The column does not allow this operator or `between`.
    UnsupportedOperator {
        /// Rendering of the predicate.
        fragment: String,
    },
    /// No configured matcher accepts the right-hand side.
    InvalidRightHandSide {
        /// Rendering of the predicate.
        fragment: String,
    },
    /// A tree shape that no rule allows.
    UnsupportedSyntax {
        /// Rendering of the node.
        fragment: String,
    },
}

impl ValidationError {
    /// The tag for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::UnbalancedParentheses { .. } => ErrorKind::UnbalancedParentheses,
            Self::ComplexityExceeded { .. } => ErrorKind::ComplexityExceeded,
            Self::UnsupportedConnective { .. } => ErrorKind::UnsupportedConnective,
            Self::UnsupportedColumn { .. } => ErrorKind::UnsupportedColumn,
            Self::UnsupportedOperator { .. } => ErrorKind::UnsupportedOperator,
            Self::InvalidRightHandSide { .. } => ErrorKind::InvalidRightHandSide,
            Self::UnsupportedSyntax { .. } => ErrorKind::UnsupportedSyntax,
        }
    }

    /// The offending fragment, if this kind carries one.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Syntax(_) | Self::UnbalancedParentheses { .. } => None,
            Self::ComplexityExceeded { fragment, .. }
            | Self::UnsupportedConnective { fragment, .. }
            | Self::UnsupportedColumn { fragment, .. }
            | Self::UnsupportedOperator { fragment }
            | Self::InvalidRightHandSide { fragment }
            | Self::UnsupportedSyntax { fragment } => Some(fragment),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "syntax error: {err}"),
            Self::UnbalancedParentheses { open, close } => {
                write!(f, "unbalanced parentheses: {open} '(' and {close} ')'")
            },
            Self::ComplexityExceeded {
                complexity,
                bound,
                found,
                ..
            } => write!(f, "too many {complexity}: found {found}, {bound} allowed"),
            Self::UnsupportedConnective {
                connective,
                fragment,
            } => write!(f, "unsupported {}: {fragment}", connective.keyword()),
            Self::UnsupportedColumn { column, fragment } => {
                write!(f, "unsupported column name {column}: {fragment}")
            },
            Self::UnsupportedOperator { fragment } => {
                write!(f, "unsupported operator: {fragment}")
            },
            Self::InvalidRightHandSide { fragment } => {
                write!(f, "unsupported or invalid RHS: {fragment}")
            },
            Self::UnsupportedSyntax { fragment } => write!(f, "unsupported syntax: {fragment}"),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for ValidationError {
    fn from(err: ParseError) -> Self {
        Self::Syntax(err)
    }
}
