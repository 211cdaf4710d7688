// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // SQL keywords in docs
#![allow(clippy::return_self_not_must_use)] // builder methods
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! # filtersql - allow-list validation for user-written SQL filters
//!
//! Takes a boolean filter in a small SQL WHERE-clause subset, checks it
//! against a [`Policy`] of allowed columns, operators, values and complexity
//! bounds, and returns a canonical rendering of it. Nothing is executed.
//!
//! ## Quick Start
//!
//! ```
//! use filtersql::prelude::*;
//!
//! let policy = Policy::new()
//!     .column(
//!         ColumnPolicy::new("status")
//!             .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["active", "pending"])])
//!             .comparison(OperatorKind::In, [ValueMatcher::subset_of_strings(["active", "pending"])]),
//!     )
//!     .column(
//!         ColumnPolicy::new("age")
//!             .comparison(OperatorKind::GtEq, [ValueMatcher::integer_range(0..=150)]),
//!     )
//!     .max_ands(Bound::AtMost(3))
//!     .max_grouping_parens(Bound::AtMost(2));
//!
//! let canonical =
//!     validate_and_canonicalize("STATUS_IS_NOT_A_COLUMN = 1", &policy, false);
//! assert_eq!(canonical.unwrap_err().kind(), ErrorKind::UnsupportedColumn);
//!
//! let canonical =
//!     validate_and_canonicalize("status IN ('active')  AND age >= 18", &policy, false);
//! assert_eq!(canonical.unwrap(), "status in ('active') and age >= 18");
//! ```
//!
//! ## Pipeline
//!
//! 1. [`guard::check`] scans the raw text: balanced parentheses and the
//!    connective and parenthesis bounds.
//! 2. [`parse_filter`] builds an [`Expr`] under a fixed grammar.
//! 3. [`Validator`] walks the tree against the policy.
//! 4. [`canonicalize`] (or `Display`) renders the tree.
//!
//! ## Grammar
//!
//! | Construct | Example |
//! |-----------|---------|
//! | comparison | `b >= 2`, `a != 'x'` |
//! | membership | `a in ('x', 'y')`, `a not in (1, 2)` |
//! | range | `t between '2020-01-01' and '2021-01-01'` |
//! | qualified column | `orders.status = 'open'` |
//! | connectives | `and`, `or`, `not`, parentheses |
//!
//! Anything else (`like`, `is null`, sub-queries, functions, a second
//! statement) is a syntax error.

pub mod guard;
pub mod log;

mod ast;
mod error;
mod parse;
mod policy;
mod render;
mod validate;

pub use ast::{ColumnRef, Connective, Expr, OperatorKind, Value};
pub use error::{ErrorKind, ValidationError};
pub use parse::{MAX_NESTING_DEPTH, ParseError, is_reserved_word, is_valid_identifier, parse_filter};
pub use policy::{
    BetweenPolicy, Bound, ColumnPolicy, ComparisonPolicy, Complexity, Policy, ValueMatcher,
    ValueShape,
};
pub use render::canonicalize;
pub use validate::Validator;

/// Validate `filter` against `policy` and return its canonical form.
///
/// Empty or all-whitespace input yields `Ok("")`. Otherwise the guard, the
/// parser and the validator run in that order and the first failure is
/// returned. With `debug` set, a validator rejection is also logged as a
/// structured `debug` line on stderr.
///
/// # Example
///
/// ```
/// use filtersql::{Bound, ColumnPolicy, OperatorKind, Policy, ValueMatcher, validate_and_canonicalize};
///
/// let policy = Policy::new()
///     .column(ColumnPolicy::new("a").comparison(OperatorKind::Eq, [ValueMatcher::any_string()]))
///     .max_ors(Bound::Unlimited);
///
/// assert_eq!(validate_and_canonicalize("   ", &policy, false).unwrap(), "");
/// // parentheses are not allowed by this policy
/// assert!(validate_and_canonicalize("(a = 'x') OR a = 'y'", &policy, false).is_err());
/// assert_eq!(
///     validate_and_canonicalize("a = 'x' OR a = \"y\"", &policy, false).unwrap(),
///     "a = 'x' or a = 'y'"
/// );
/// ```
pub fn validate_and_canonicalize(
    filter: &str,
    policy: &Policy,
    debug: bool,
) -> Result<String, ValidationError> {
    if filter.trim().is_empty() {
        return Ok(String::new());
    }

    guard::check(filter, policy)?;
    let expr = parse_filter(filter)?;
    Validator::new(policy).debug(debug).validate(&expr)?;
    Ok(canonicalize(&expr))
}

/// A policy bundled with the debug flag.
///
/// ```
/// use filtersql::{ColumnPolicy, FilterSql, OperatorKind, Policy, ValueMatcher};
///
/// let filters = FilterSql::new(
///     Policy::new().column(ColumnPolicy::new("b").comparison(OperatorKind::Gt, [ValueMatcher::any_integer()])),
/// );
/// assert_eq!(filters.canonicalize("b>2").unwrap(), "b > 2");
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct FilterSql {
    /// The allow-list.
    pub policy: Policy,
    /// Log rejections.
    pub debug: bool,
}

impl FilterSql {
    /// Wrap `policy` with debug logging off.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            policy,
            debug: false,
        }
    }

    /// Turn rejection logging on or off.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Same as [`validate_and_canonicalize`] with this policy and flag.
    pub fn canonicalize(&self, filter: &str) -> Result<String, ValidationError> {
        validate_and_canonicalize(filter, &self.policy, self.debug)
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Bound, ColumnPolicy, ColumnRef, Complexity, Connective, ErrorKind, Expr, FilterSql,
        OperatorKind, ParseError, Policy, ValidationError, Validator, Value, ValueMatcher,
        ValueShape, canonicalize, parse_filter, validate_and_canonicalize,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

#[cfg(test)]
mod api_contracts {
    use static_assertions::assert_impl_all;

    // ========================================================================
    // Policy types are shared read-only across threads
    // ========================================================================

    assert_impl_all!(crate::Policy: Send, Sync, Clone, std::fmt::Debug, Default);
    assert_impl_all!(crate::ColumnPolicy: Send, Sync, Clone, std::fmt::Debug);
    assert_impl_all!(crate::ValueMatcher: Send, Sync, Clone, std::fmt::Debug);
    assert_impl_all!(crate::FilterSql: Send, Sync, Clone, std::fmt::Debug);
    assert_impl_all!(crate::Validator<'static>: Send, Sync, Copy, std::fmt::Debug);

    // ========================================================================
    // Tree types
    // ========================================================================

    assert_impl_all!(crate::Expr: Clone, std::fmt::Debug, std::fmt::Display, PartialEq, Eq, std::hash::Hash);
    assert_impl_all!(crate::Value: Clone, std::fmt::Debug, std::fmt::Display, PartialEq, Eq);
    assert_impl_all!(crate::ColumnRef: Clone, std::fmt::Debug, std::fmt::Display, PartialEq, Eq);
    assert_impl_all!(crate::OperatorKind: Copy, Clone, std::fmt::Debug, PartialEq, Eq);
    assert_impl_all!(crate::Bound: Copy, Clone, std::fmt::Debug, PartialEq, Eq, Default);

    // ========================================================================
    // Error types
    // ========================================================================

    assert_impl_all!(crate::ValidationError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error, Send, Sync);
    assert_impl_all!(crate::ParseError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error, Send, Sync);
    assert_impl_all!(crate::ErrorKind: Copy, Clone, std::fmt::Debug, PartialEq, Eq);
}
