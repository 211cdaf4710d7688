//! Expression tree produced by the parser.
//!
//! The tree is owned by the call that parsed it and never mutated afterwards.
//! The validator walks it against a [`Policy`](crate::Policy) and the
//! canonical serializer (the `Display` impls in `render`) turns it back into text.

/// Comparison operators a filter predicate can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Equal: `=`
    Eq,
    /// Not equal: `!=`
    NotEq,
    /// Greater than: `>`
    Gt,
    /// Less than: `<`
    Lt,
    /// Greater than or equal: `>=`
    GtEq,
    /// Less than or equal: `<=`
    LtEq,
    /// Membership: `in (...)`
    In,
    /// Negated membership: `not in (...)`
    NotIn,
}

impl OperatorKind {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::Lt,
        Self::GtEq,
        Self::LtEq,
        Self::In,
        Self::NotIn,
    ];

    /// Canonical spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    /// Whether the right-hand side is a tuple rather than a scalar.
    #[must_use]
    pub const fn takes_tuple(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Parse an operator from its symbol or name.
    ///
    /// Accepts the canonical symbols (`=`, `!=`, `>`, `<`, `>=`, `<=`, `in`,
    /// `not in`) and snake_case names (`eq`, `not_eq`, `gt`, `lt`, `gt_eq`,
    /// `lt_eq`, `in`, `not_in`). Keyword forms are case-insensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use filtersql::OperatorKind;
    ///
    /// assert_eq!(OperatorKind::from_symbol(">="), Some(OperatorKind::GtEq));
    /// assert_eq!(OperatorKind::from_symbol("NOT  IN"), Some(OperatorKind::NotIn));
    /// assert_eq!(OperatorKind::from_symbol("not_eq"), Some(OperatorKind::NotEq));
    /// assert_eq!(OperatorKind::from_symbol("<>"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "=" | "eq" => Some(Self::Eq),
            "!=" | "not_eq" | "ne" => Some(Self::NotEq),
            ">" | "gt" => Some(Self::Gt),
            "<" | "lt" => Some(Self::Lt),
            ">=" | "gt_eq" | "gte" => Some(Self::GtEq),
            "<=" | "lt_eq" | "lte" => Some(Self::LtEq),
            "in" => Some(Self::In),
            "not in" | "not_in" => Some(Self::NotIn),
            _ => None,
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
}

impl Connective {
    /// Lower-case keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

/// A column reference, optionally qualified: `name` or `qualifier.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ColumnRef {
    /// Table or alias prefix. `None` for an unqualified reference.
    pub qualifier: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    /// Qualified column reference (`qualifier.name`).
    #[must_use]
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

/// A literal on the right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// String literal, body only (quotes stripped, no escapes).
    String(String),
    /// Integer literal.
    Integer(i64),
    /// Parenthesized list of literals, as used by `in` / `not in`.
    Tuple(Vec<Value>),
}

impl Value {
    /// The string body, if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer literal.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether this is a string or integer literal.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Integer(_))
    }
}

/// A node of the filter expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// `left and right`
    And(Box<Expr>, Box<Expr>),
    /// `left or right`
    Or(Box<Expr>, Box<Expr>),
    /// `not inner`
    Not(Box<Expr>),
    /// `column op value`
    Comparison {
        /// Column on the left.
        left: ColumnRef,
        /// Operator.
        op: OperatorKind,
        /// Literal or tuple on the right.
        right: Value,
    },
    /// `column between from and to`
    Between {
        /// Column on the left.
        left: ColumnRef,
        /// Lower bound.
        from: Value,
        /// Upper bound.
        to: Value,
    },
    /// A bare column reference. The parser never produces one in boolean
    /// position; the validator still has a rule for it.
    Column(ColumnRef),
    /// A bare literal. Never produced by the parser; always rejected.
    Value(Value),
}

impl Expr {
    /// Build `left and right`.
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Build `left or right`.
    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Build `not inner`.
    #[must_use]
    #[allow(clippy::should_implement_trait)] // mirrors the `and`/`or` constructors
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Build `left op right`.
    #[must_use]
    pub const fn comparison(left: ColumnRef, op: OperatorKind, right: Value) -> Self {
        Self::Comparison { left, op, right }
    }

    /// Build `left between from and to`.
    #[must_use]
    pub const fn between(left: ColumnRef, from: Value, to: Value) -> Self {
        Self::Between { left, from, to }
    }
}
