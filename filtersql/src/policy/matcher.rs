//! Shape-tagged predicates over right-hand-side literals.

use crate::ast::Value;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

type StringPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type IntegerPredicate = Arc<dyn Fn(i64) -> bool + Send + Sync>;
type StringsPredicate = Arc<dyn Fn(&[&str]) -> bool + Send + Sync>;
type IntegersPredicate = Arc<dyn Fn(&[i64]) -> bool + Send + Sync>;

/// The literal shape a [`ValueMatcher`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// A single string literal.
    ScalarString,
    /// A single integer literal.
    ScalarInteger,
    /// A tuple whose elements are all string literals.
    TupleOfStrings,
    /// A tuple whose elements are all integer literals.
    TupleOfIntegers,
}

impl ValueShape {
    /// Stable lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScalarString => "string",
            Self::ScalarInteger => "integer",
            Self::TupleOfStrings => "strings",
            Self::TupleOfIntegers => "integers",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate that accepts or rejects a right-hand-side literal.
///
/// A matcher only looks at values of its own shape. A value of any other
/// shape is a non-match, never an error. Tuple matchers require every
/// element to decode to the element shape, so `('a', 2)` matches neither
/// [`TupleOfStrings`](Self::TupleOfStrings) nor
/// [`TupleOfIntegers`](Self::TupleOfIntegers).
///
/// # Example
///
/// ```
/// use filtersql::{Value, ValueMatcher};
///
/// let matcher = ValueMatcher::one_of_strings(["active", "pending"]);
/// assert!(matcher.matches(&Value::String("active".into())));
/// assert!(!matcher.matches(&Value::String("deleted".into())));
/// assert!(!matcher.matches(&Value::Integer(1)));
/// ```
#[derive(Clone)]
pub enum ValueMatcher {
    /// Matches a string literal accepted by the predicate.
    ScalarString(StringPredicate),
    /// Matches an integer literal accepted by the predicate.
    ScalarInteger(IntegerPredicate),
    /// Matches an all-string tuple accepted by the predicate.
    TupleOfStrings(StringsPredicate),
    /// Matches an all-integer tuple accepted by the predicate.
    TupleOfIntegers(IntegersPredicate),
}

impl ValueMatcher {
    /// String literal accepted by `predicate`.
    pub fn string(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::ScalarString(Arc::new(predicate))
    }

    /// Integer literal accepted by `predicate`.
    pub fn integer(predicate: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Self::ScalarInteger(Arc::new(predicate))
    }

    /// All-string tuple accepted by `predicate`.
    pub fn strings(predicate: impl Fn(&[&str]) -> bool + Send + Sync + 'static) -> Self {
        Self::TupleOfStrings(Arc::new(predicate))
    }

    /// All-integer tuple accepted by `predicate`.
    pub fn integers(predicate: impl Fn(&[i64]) -> bool + Send + Sync + 'static) -> Self {
        Self::TupleOfIntegers(Arc::new(predicate))
    }

    /// Any string literal.
    #[must_use]
    pub fn any_string() -> Self {
        Self::string(|_| true)
    }

    /// Any integer literal.
    #[must_use]
    pub fn any_integer() -> Self {
        Self::integer(|_| true)
    }

    /// Any all-string tuple.
    #[must_use]
    pub fn any_strings() -> Self {
        Self::strings(|_| true)
    }

    /// Any all-integer tuple.
    #[must_use]
    pub fn any_integers() -> Self {
        Self::integers(|_| true)
    }

    /// String literal equal to one of `allowed`.
    pub fn one_of_strings<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        Self::string(move |s| allowed.iter().any(|a| a == s))
    }

    /// Integer literal equal to one of `allowed`.
    pub fn one_of_integers(allowed: impl IntoIterator<Item = i64>) -> Self {
        let allowed: Vec<i64> = allowed.into_iter().collect();
        Self::integer(move |i| allowed.contains(&i))
    }

    /// Integer literal inside `range`.
    #[must_use]
    pub fn integer_range(range: RangeInclusive<i64>) -> Self {
        Self::integer(move |i| range.contains(&i))
    }

    /// All-string tuple whose every element is one of `allowed`.
    pub fn subset_of_strings<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        Self::strings(move |values| {
            values
                .iter()
                .all(|value| allowed.iter().any(|a| a == value))
        })
    }

    /// All-integer tuple whose every element is one of `allowed`.
    pub fn subset_of_integers(allowed: impl IntoIterator<Item = i64>) -> Self {
        let allowed: Vec<i64> = allowed.into_iter().collect();
        Self::integers(move |values| values.iter().all(|value| allowed.contains(value)))
    }

    /// The shape this matcher inspects.
    #[must_use]
    pub const fn shape(&self) -> ValueShape {
        match self {
            Self::ScalarString(_) => ValueShape::ScalarString,
            Self::ScalarInteger(_) => ValueShape::ScalarInteger,
            Self::TupleOfStrings(_) => ValueShape::TupleOfStrings,
            Self::TupleOfIntegers(_) => ValueShape::TupleOfIntegers,
        }
    }

    /// Whether `value` has this matcher's shape and satisfies its predicate.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::ScalarString(predicate), Value::String(s)) => predicate(s),
            (Self::ScalarInteger(predicate), Value::Integer(i)) => predicate(*i),
            (Self::TupleOfStrings(predicate), Value::Tuple(items)) => {
                let decoded: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                decoded.is_some_and(|values| predicate(&values))
            },
            (Self::TupleOfIntegers(predicate), Value::Tuple(items)) => {
                let decoded: Option<Vec<i64>> = items.iter().map(Value::as_integer).collect();
                decoded.is_some_and(|values| predicate(&values))
            },
            _ => false,
        }
    }
}

impl fmt::Debug for ValueMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueMatcher").field(&self.shape()).finish()
    }
}
