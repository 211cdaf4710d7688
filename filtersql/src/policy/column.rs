//! Per-column allow-list entries.

use super::matcher::ValueMatcher;
use crate::ast::{ColumnRef, OperatorKind, Value};
use std::fmt;

/// Operators and value matchers allowed for one column.
///
/// The identity of an entry is `(qualifier, name)`. An entry without a
/// qualifier only matches unqualified references; a qualified entry only
/// matches `qualifier.name` spelled exactly.
///
/// # Example
///
/// ```
/// use filtersql::{ColumnPolicy, OperatorKind, ValueMatcher};
///
/// let status = ColumnPolicy::new("status")
///     .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["active", "pending"])])
///     .comparison(OperatorKind::In, [ValueMatcher::subset_of_strings(["active", "pending"])]);
///
/// let created = ColumnPolicy::qualified("orders", "created")
///     .between([ValueMatcher::any_string()], [ValueMatcher::any_string()]);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ColumnPolicy {
    /// Required qualifier. `None` means the column must appear unqualified.
    pub qualifier: Option<String>,
    /// Column name.
    pub name: String,
    /// Allowed comparison operators. The first entry with a matching operator wins.
    pub comparisons: Vec<ComparisonPolicy>,
    /// `between` support, if any.
    pub between: Option<BetweenPolicy>,
}

impl ColumnPolicy {
    /// Unqualified column with nothing allowed yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
            comparisons: Vec::new(),
            between: None,
        }
    }

    /// Column that must be referenced as `qualifier.name`.
    ///
    /// An empty qualifier is the same as [`new`](Self::new).
    #[must_use]
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        let qualifier = qualifier.into();
        Self {
            qualifier: (!qualifier.is_empty()).then_some(qualifier),
            ..Self::new(name)
        }
    }

    /// Allow `op` with a right-hand side accepted by one of `matchers`.
    #[must_use]
    pub fn comparison(
        mut self,
        op: OperatorKind,
        matchers: impl IntoIterator<Item = ValueMatcher>,
    ) -> Self {
        self.comparisons.push(ComparisonPolicy::new(op, matchers));
        self
    }

    /// Allow `between`, with separate matchers for each bound.
    #[must_use]
    pub fn between(
        mut self,
        from: impl IntoIterator<Item = ValueMatcher>,
        to: impl IntoIterator<Item = ValueMatcher>,
    ) -> Self {
        self.between = Some(BetweenPolicy::new(from, to));
        self
    }

    /// Whether `column` refers to this entry.
    #[must_use]
    pub fn matches(&self, column: &ColumnRef) -> bool {
        let wanted = self.qualifier.as_deref().filter(|q| !q.is_empty());
        let given = column.qualifier.as_deref().filter(|q| !q.is_empty());
        self.name == column.name && wanted == given
    }

    /// The first comparison entry configured for `op`.
    #[must_use]
    pub fn comparison_for(&self, op: OperatorKind) -> Option<&ComparisonPolicy> {
        self.comparisons.iter().find(|c| c.operator == op)
    }
}

impl fmt::Display for ColumnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier.as_deref() {
            Some(q) if !q.is_empty() => write!(f, "{q}.{}", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

/// One allowed operator for a column.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ComparisonPolicy {
    /// The operator.
    pub operator: OperatorKind,
    /// Matchers tried in order against the right-hand side.
    pub right_matchers: Vec<ValueMatcher>,
}

impl ComparisonPolicy {
    /// Allow `operator` with the given matchers.
    pub fn new(operator: OperatorKind, matchers: impl IntoIterator<Item = ValueMatcher>) -> Self {
        Self {
            operator,
            right_matchers: matchers.into_iter().collect(),
        }
    }

    /// Whether some matcher accepts `value`.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.right_matchers.iter().any(|m| m.matches(value))
    }
}

/// `between` support for a column.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BetweenPolicy {
    /// Matchers for the lower bound.
    pub from_matchers: Vec<ValueMatcher>,
    /// Matchers for the upper bound.
    pub to_matchers: Vec<ValueMatcher>,
}

impl BetweenPolicy {
    /// Allow `between` with the given bound matchers.
    pub fn new(
        from: impl IntoIterator<Item = ValueMatcher>,
        to: impl IntoIterator<Item = ValueMatcher>,
    ) -> Self {
        Self {
            from_matchers: from.into_iter().collect(),
            to_matchers: to.into_iter().collect(),
        }
    }

    /// Whether some lower-bound matcher accepts `value`.
    #[must_use]
    pub fn accepts_from(&self, value: &Value) -> bool {
        self.from_matchers.iter().any(|m| m.matches(value))
    }

    /// Whether some upper-bound matcher accepts `value`.
    #[must_use]
    pub fn accepts_to(&self, value: &Value) -> bool {
        self.to_matchers.iter().any(|m| m.matches(value))
    }
}
