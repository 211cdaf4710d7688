//! TOML policy files.
//!
//! ```toml
//! [limits]
//! ands = 4
//! ors = "unlimited"
//!
//! [[columns]]
//! name = "status"
//!
//! [[columns.comparisons]]
//! operator = "in"
//! accept = [{ shape = "strings", subset_of = ["open", "closed"], max_items = 2 }]
//!
//! [[columns]]
//! qualifier = "orders"
//! name = "placed"
//! between = { from = [{ shape = "string", max_len = 10 }], to = [{ shape = "string", max_len = 10 }] }
//! ```
//!
//! Limits default to `0`, which disables the construct.

use std::path::Path;

use anyhow::{Context, Result, bail};
use filtersql::{Bound, ColumnPolicy, OperatorKind, Policy, ValueMatcher, is_valid_identifier};
use serde::Deserialize;

/// Top-level policy file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    #[serde(default)]
    limits: Limits,
    #[serde(default)]
    columns: Vec<ColumnConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Limits {
    ands: Option<BoundConfig>,
    ors: Option<BoundConfig>,
    nots: Option<BoundConfig>,
    grouping_parens: Option<BoundConfig>,
}

/// An integer or the keyword `"unlimited"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BoundConfig {
    Count(usize),
    Keyword(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnConfig {
    name: String,
    qualifier: Option<String>,
    #[serde(default)]
    comparisons: Vec<ComparisonConfig>,
    between: Option<BetweenConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComparisonConfig {
    operator: String,
    accept: Vec<MatcherConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BetweenConfig {
    from: Vec<MatcherConfig>,
    to: Vec<MatcherConfig>,
}

/// A declarative value matcher. No constraint means any value of the shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
enum MatcherConfig {
    String {
        one_of: Option<Vec<String>>,
        max_len: Option<usize>,
    },
    Integer {
        one_of: Option<Vec<i64>>,
        min: Option<i64>,
        max: Option<i64>,
    },
    Strings {
        subset_of: Option<Vec<String>>,
        max_len: Option<usize>,
        max_items: Option<usize>,
    },
    Integers {
        subset_of: Option<Vec<i64>>,
        min: Option<i64>,
        max: Option<i64>,
        max_items: Option<usize>,
    },
}

/// Read and convert the policy file at `path`.
pub fn load(path: &Path) -> Result<Policy> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid policy file {}", path.display()))
}

/// Parse and convert policy TOML.
pub fn parse(text: &str) -> Result<Policy> {
    let file: PolicyFile = toml::from_str(text).context("malformed TOML")?;
    file.into_policy()
}

impl PolicyFile {
    /// Convert into a [`Policy`], rejecting unknown operators, bound keywords
    /// and invalid column names.
    pub fn into_policy(self) -> Result<Policy> {
        let mut policy = Policy::new()
            .max_ands(resolve_bound("ands", self.limits.ands.as_ref())?)
            .max_ors(resolve_bound("ors", self.limits.ors.as_ref())?)
            .max_nots(resolve_bound("nots", self.limits.nots.as_ref())?)
            .max_grouping_parens(resolve_bound(
                "grouping_parens",
                self.limits.grouping_parens.as_ref(),
            )?);

        for column in self.columns {
            policy = policy.column(column.into_policy()?);
        }
        Ok(policy)
    }
}

fn resolve_bound(key: &str, raw: Option<&BoundConfig>) -> Result<Bound> {
    match raw {
        None => Ok(Bound::AtMost(0)),
        Some(BoundConfig::Count(n)) => Ok(Bound::AtMost(*n)),
        Some(BoundConfig::Keyword(word)) if word.eq_ignore_ascii_case("unlimited") => {
            Ok(Bound::Unlimited)
        },
        Some(BoundConfig::Keyword(word)) => {
            bail!("limits.{key}: expected a count or \"unlimited\", got {word:?}")
        },
    }
}

impl ColumnConfig {
    fn into_policy(self) -> Result<ColumnPolicy> {
        if !is_valid_identifier(&self.name) {
            bail!("invalid column name {:?}", self.name);
        }
        let mut column = match self.qualifier {
            Some(qualifier) if !qualifier.is_empty() => {
                if !is_valid_identifier(&qualifier) {
                    bail!("invalid qualifier {qualifier:?} for column {}", self.name);
                }
                ColumnPolicy::qualified(qualifier, self.name)
            },
            _ => ColumnPolicy::new(self.name),
        };

        for comparison in self.comparisons {
            let Some(op) = OperatorKind::from_symbol(&comparison.operator) else {
                bail!(
                    "column {column}: unknown operator {:?}",
                    comparison.operator
                );
            };
            column = column.comparison(op, comparison.accept.into_iter().map(MatcherConfig::build));
        }

        if let Some(between) = self.between {
            column = column.between(
                between.from.into_iter().map(MatcherConfig::build),
                between.to.into_iter().map(MatcherConfig::build),
            );
        }

        Ok(column)
    }
}

impl MatcherConfig {
    fn build(self) -> ValueMatcher {
        match self {
            Self::String { one_of, max_len } => {
                ValueMatcher::string(move |s| string_allowed(s, one_of.as_deref(), max_len))
            },
            Self::Integer { one_of, min, max } => ValueMatcher::integer(move |n| {
                one_of.as_ref().is_none_or(|allowed| allowed.contains(&n))
                    && in_range(n, min, max)
            }),
            Self::Strings {
                subset_of,
                max_len,
                max_items,
            } => ValueMatcher::strings(move |items| {
                max_items.is_none_or(|limit| items.len() <= limit)
                    && items
                        .iter()
                        .all(|s| string_allowed(s, subset_of.as_deref(), max_len))
            }),
            Self::Integers {
                subset_of,
                min,
                max,
                max_items,
            } => ValueMatcher::integers(move |items| {
                max_items.is_none_or(|limit| items.len() <= limit)
                    && items.iter().all(|n| {
                        subset_of.as_ref().is_none_or(|allowed| allowed.contains(n))
                            && in_range(*n, min, max)
                    })
            }),
        }
    }
}

fn string_allowed(s: &str, allowed: Option<&[String]>, max_len: Option<usize>) -> bool {
    allowed.is_none_or(|allowed| allowed.iter().any(|a| a == s))
        && max_len.is_none_or(|limit| s.chars().count() <= limit)
}

fn in_range(n: i64, min: Option<i64>, max: Option<i64>) -> bool {
    min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
}
