//! Allow-list policy: which columns, operators and values a filter may use,
//! and how many connectives and parentheses it may contain.
//!
//! A [`Policy`] is plain data. It is built once, shared read-only, and only
//! consulted by the validator and the guard.
//!
//! # Example
//!
//! ```
//! use filtersql::{Bound, ColumnPolicy, OperatorKind, Policy, ValueMatcher};
//!
//! let policy = Policy::new()
//!     .column(
//!         ColumnPolicy::new("status")
//!             .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["active"])]),
//!     )
//!     .column(
//!         ColumnPolicy::new("age")
//!             .comparison(OperatorKind::Gt, [ValueMatcher::integer_range(0..=150)]),
//!     )
//!     .max_ands(Bound::AtMost(4))
//!     .max_grouping_parens(Bound::Unlimited);
//!
//! assert!(policy.find_column(&filtersql::ColumnRef::new("age")).is_some());
//! ```

mod bound;
mod column;
mod matcher;

pub use bound::{Bound, Complexity};
pub use column::{BetweenPolicy, ColumnPolicy, ComparisonPolicy};
pub use matcher::{ValueMatcher, ValueShape};

use crate::ast::{ColumnRef, Connective};

/// The full allow-list for one deployment.
///
/// Every bound defaults to `AtMost(0)`: with [`Policy::default`] no
/// connective and no parenthesis is allowed.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Policy {
    /// Allowed columns.
    pub columns: Vec<ColumnPolicy>,
    /// Ceiling on `and`.
    pub max_ands: Bound,
    /// Ceiling on `or`.
    pub max_ors: Bound,
    /// Ceiling on `not`.
    pub max_nots: Bound,
    /// Ceiling on parenthesis pairs.
    pub max_grouping_parens: Bound,
}

impl Policy {
    /// Empty policy: no columns, every bound `AtMost(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column entry.
    #[must_use]
    pub fn column(mut self, column: ColumnPolicy) -> Self {
        self.columns.push(column);
        self
    }

    /// Add several column entries.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnPolicy>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Set the `and` ceiling.
    #[must_use]
    pub const fn max_ands(mut self, bound: Bound) -> Self {
        self.max_ands = bound;
        self
    }

    /// Set the `or` ceiling.
    #[must_use]
    pub const fn max_ors(mut self, bound: Bound) -> Self {
        self.max_ors = bound;
        self
    }

    /// Set the `not` ceiling.
    #[must_use]
    pub const fn max_nots(mut self, bound: Bound) -> Self {
        self.max_nots = bound;
        self
    }

    /// Set the parenthesis-pair ceiling.
    #[must_use]
    pub const fn max_grouping_parens(mut self, bound: Bound) -> Self {
        self.max_grouping_parens = bound;
        self
    }

    /// The entry `column` resolves to. The first matching entry wins.
    #[must_use]
    pub fn find_column(&self, column: &ColumnRef) -> Option<&ColumnPolicy> {
        self.columns.iter().find(|c| c.matches(column))
    }

    /// The bound configured for a counted construct.
    #[must_use]
    pub const fn bound(&self, complexity: Complexity) -> Bound {
        match complexity {
            Complexity::Ands => self.max_ands,
            Complexity::Ors => self.max_ors,
            Complexity::Nots => self.max_nots,
            Complexity::GroupingParens => self.max_grouping_parens,
        }
    }

    /// The bound governing a connective.
    #[must_use]
    pub const fn connective_bound(&self, connective: Connective) -> Bound {
        match connective {
            Connective::And => self.max_ands,
            Connective::Or => self.max_ors,
            Connective::Not => self.max_nots,
        }
    }
}
