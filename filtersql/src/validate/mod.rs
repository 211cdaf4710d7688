//! Policy enforcement over a parsed tree.
//!
//! Default-deny and fail-fast: every node must be allowed by a rule, and the
//! first node that is not ends the walk. Per node kind:
//!
//! | Node | Allowed when |
//! |---|---|
//! | `and` / `or` / `not` | its bound is not `AtMost(0)` |
//! | bare column | it resolves to a column entry |
//! | comparison | column resolves, operator configured, a matcher accepts the value |
//! | `between` | column resolves, `between` configured, both bounds accepted |
//! | bare value | never |

mod shape;

use crate::ast::{ColumnRef, Connective, Expr, OperatorKind, Value};
use crate::error::ValidationError;
use crate::policy::{ColumnPolicy, Policy};

/// Walks an [`Expr`] against a [`Policy`].
///
/// # Example
///
/// ```
/// use filtersql::{ColumnPolicy, OperatorKind, Policy, Validator, ValueMatcher, parse_filter};
///
/// let policy = Policy::new().column(
///     ColumnPolicy::new("b").comparison(OperatorKind::Eq, [ValueMatcher::one_of_integers([2])]),
/// );
/// let validator = Validator::new(&policy);
///
/// assert!(validator.validate(&parse_filter("b = 2").unwrap()).is_ok());
/// assert!(validator.validate(&parse_filter("b = 3").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'p> {
    policy: &'p Policy,
    debug: bool,
}

impl<'p> Validator<'p> {
    /// Validator for `policy`, debug logging off.
    #[must_use]
    pub const fn new(policy: &'p Policy) -> Self {
        Self {
            policy,
            debug: false,
        }
    }

    /// Log each rejection as a structured `debug` line on stderr.
    /// Has no effect on the verdict.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check every node of `expr`.
    pub fn validate(&self, expr: &Expr) -> Result<(), ValidationError> {
        match expr {
            Expr::And(left, right) => {
                self.connective(Connective::And, expr)?;
                self.validate(left)?;
                self.validate(right)
            },
            Expr::Or(left, right) => {
                self.connective(Connective::Or, expr)?;
                self.validate(left)?;
                self.validate(right)
            },
            Expr::Not(inner) => {
                self.connective(Connective::Not, expr)?;
                self.validate(inner)
            },
            Expr::Column(column) => self.resolve(column, expr).map(|_| ()),
            Expr::Comparison { left, op, right } => self.comparison(expr, left, *op, right),
            Expr::Between { left, from, to } => self.between(expr, left, from, to),
            Expr::Value(_) => Err(self.unsupported_syntax(expr)),
        }
    }

    fn connective(&self, connective: Connective, node: &Expr) -> Result<(), ValidationError> {
        if self.policy.connective_bound(connective).is_enabled() {
            return Ok(());
        }
        Err(self.reject(
            node,
            ValidationError::UnsupportedConnective {
                connective,
                fragment: node.to_string(),
            },
        ))
    }

    fn resolve(&self, column: &ColumnRef, node: &Expr) -> Result<&'p ColumnPolicy, ValidationError> {
        if !shape::is_well_formed_column(column) {
            return Err(self.unsupported_syntax(node));
        }
        self.policy.find_column(column).ok_or_else(|| {
            self.reject(
                node,
                ValidationError::UnsupportedColumn {
                    column: column.to_string(),
                    fragment: node.to_string(),
                },
            )
        })
    }

    fn comparison(
        &self,
        node: &Expr,
        left: &ColumnRef,
        op: OperatorKind,
        right: &Value,
    ) -> Result<(), ValidationError> {
        let well_formed = if op.takes_tuple() {
            shape::is_flat_tuple(right)
        } else {
            shape::is_scalar(right)
        };
        if !well_formed {
            return Err(self.unsupported_syntax(node));
        }

        let column = self.resolve(left, node)?;
        let Some(entry) = column.comparison_for(op) else {
            return Err(self.unsupported_operator(node));
        };
        if entry.accepts(right) {
            Ok(())
        } else {
            Err(self.invalid_right_hand_side(node))
        }
    }

    fn between(
        &self,
        node: &Expr,
        left: &ColumnRef,
        from: &Value,
        to: &Value,
    ) -> Result<(), ValidationError> {
        if !shape::is_scalar(from) || !shape::is_scalar(to) {
            return Err(self.unsupported_syntax(node));
        }

        let column = self.resolve(left, node)?;
        let Some(between) = &column.between else {
            return Err(self.unsupported_operator(node));
        };
        if between.accepts_from(from) && between.accepts_to(to) {
            Ok(())
        } else {
            Err(self.invalid_right_hand_side(node))
        }
    }

    fn unsupported_operator(&self, node: &Expr) -> ValidationError {
        self.reject(
            node,
            ValidationError::UnsupportedOperator {
                fragment: node.to_string(),
            },
        )
    }

    fn invalid_right_hand_side(&self, node: &Expr) -> ValidationError {
        self.reject(
            node,
            ValidationError::InvalidRightHandSide {
                fragment: node.to_string(),
            },
        )
    }

    fn unsupported_syntax(&self, node: &Expr) -> ValidationError {
        self.reject(
            node,
            ValidationError::UnsupportedSyntax {
                fragment: node.to_string(),
            },
        )
    }

    fn reject(&self, node: &Expr, err: ValidationError) -> ValidationError {
        if self.debug {
            crate::log!(
                debug,
                "filter rejected",
                kind: err.kind(),
                fragment: err.fragment().unwrap_or_default(),
                node: format!("{node:?}"),
            );
        }
        err
    }
}
