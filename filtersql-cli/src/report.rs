//! Output formatting for `check` and `policy`.

use std::fmt::Write as _;

use anyhow::Result;
use filtersql::{Complexity, Policy, ValidationError, ValueMatcher};
use serde::Serialize;

/// Verdict for one filter.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome<'a> {
    /// Accepted, with its canonical form.
    Accepted {
        filter: &'a str,
        ok: bool,
        canonical: String,
    },
    /// Rejected by the guard, the parser or the validator.
    Rejected {
        filter: &'a str,
        ok: bool,
        kind: &'static str,
        fragment: Option<String>,
        error: String,
    },
}

impl<'a> Outcome<'a> {
    pub fn new(filter: &'a str, result: &Result<String, ValidationError>) -> Self {
        match result {
            Ok(canonical) => Self::Accepted {
                filter,
                ok: true,
                canonical: canonical.clone(),
            },
            Err(err) => Self::Rejected {
                filter,
                ok: false,
                kind: err.kind().as_str(),
                fragment: err.fragment().map(str::to_string),
                error: err.to_string(),
            },
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// One JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The canonical form, or `rejected (<kind>): <message>`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Accepted { canonical, .. } => canonical.clone(),
            Self::Rejected { kind, error, .. } => format!("rejected ({kind}): {error}"),
        }
    }
}

/// Human-readable summary of a policy.
pub fn describe_policy(policy: &Policy) -> String {
    let mut out = String::from("limits:\n");
    for complexity in [
        Complexity::Ands,
        Complexity::Ors,
        Complexity::Nots,
        Complexity::GroupingParens,
    ] {
        let _ = writeln!(out, "  {complexity}: {}", policy.bound(complexity));
    }

    if policy.columns.is_empty() {
        out.push_str("columns: none\n");
        return out;
    }

    out.push_str("columns:\n");
    for column in &policy.columns {
        let _ = writeln!(out, "  {column}");
        for comparison in &column.comparisons {
            let _ = writeln!(
                out,
                "    {} {}",
                comparison.operator.symbol(),
                shapes(&comparison.right_matchers)
            );
        }
        if let Some(between) = &column.between {
            let _ = writeln!(
                out,
                "    between {} and {}",
                shapes(&between.from_matchers),
                shapes(&between.to_matchers)
            );
        }
    }
    out
}

fn shapes(matchers: &[ValueMatcher]) -> String {
    if matchers.is_empty() {
        return "(nothing)".to_string();
    }
    let names: Vec<&str> = matchers.iter().map(|m| m.shape().as_str()).collect();
    names.join(" | ")
}
