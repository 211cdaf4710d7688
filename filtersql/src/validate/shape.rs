//! Structural checks on hand-built trees.
//!
//! The parser never produces a tree that fails these checks. They keep a
//! programmatically built [`Expr`](crate::Expr) from validating when its
//! rendering would not parse back to the same tree.

use crate::ast::{ColumnRef, Value};
use crate::parse::is_valid_identifier;

/// Qualifier (if any) and name are both valid identifiers.
pub(super) fn is_well_formed_column(column: &ColumnRef) -> bool {
    let qualifier_ok = match column.qualifier.as_deref() {
        None | Some("") => true,
        Some(qualifier) => is_valid_identifier(qualifier),
    };
    qualifier_ok && is_valid_identifier(&column.name)
}

/// A string or integer whose rendering re-lexes to the same literal.
pub(super) fn is_scalar(value: &Value) -> bool {
    match value {
        Value::String(s) => !(s.contains('\'') && s.contains('"')),
        Value::Integer(_) => true,
        Value::Tuple(_) => false,
    }
}

/// A non-empty tuple of scalars.
pub(super) fn is_flat_tuple(value: &Value) -> bool {
    match value {
        Value::Tuple(items) => !items.is_empty() && items.iter().all(is_scalar),
        _ => false,
    }
}
