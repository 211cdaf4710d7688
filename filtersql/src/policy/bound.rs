//! Occurrence ceilings for connectives and grouping parentheses.

use std::fmt;

/// Ceiling on how many times a construct may occur in one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// No ceiling.
    Unlimited,
    /// At most this many occurrences. `AtMost(0)` disables the construct.
    AtMost(usize),
}

impl Bound {
    /// Whether `count` occurrences stay within the bound.
    #[must_use]
    pub const fn permits(self, count: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::AtMost(max) => count <= max,
        }
    }

    /// Whether the construct is allowed at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::AtMost(0))
    }

    /// The numeric ceiling, `None` when unlimited.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::AtMost(max) => Some(max),
        }
    }
}

/// Disabled unless configured otherwise.
impl Default for Bound {
    fn default() -> Self {
        Self::AtMost(0)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::AtMost(max) => write!(f, "at most {max}"),
        }
    }
}

/// The constructs the lexical guard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complexity {
    /// ` and ` occurrences.
    Ands,
    /// ` or ` occurrences.
    Ors,
    /// ` not ` occurrences.
    Nots,
    /// `(` / `)` pairs, tuple parentheses included.
    GroupingParens,
}

impl Complexity {
    /// Stable lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ands => "ands",
            Self::Ors => "ors",
            Self::Nots => "nots",
            Self::GroupingParens => "grouping parens",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
