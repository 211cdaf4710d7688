//! Lexical complexity guard.
//!
//! Runs on raw text before parsing. String literals are masked, then the text
//! is scanned for parentheses and for the space-padded substrings ` and `,
//! ` or `, ` not `. The scan is coarse:
//!
//! - a connective at the very start or end of the text is not counted
//! - words separated by tabs or newlines are not counted
//! - identifiers are not masked, so `android` does not count as `and`
//! - in `not not`, only the first `not` is counted
//! - the `not` of `not in` counts as a `not`
//! - the `and` of `between .. and ..` counts as an `and`
//! - tuple parentheses count as grouping parentheses
//!
//! Every bound is enforced here, `AtMost(0)` included. A connective that
//! slips past the count (a leading `not`, a tab-separated `and`) is still
//! caught by the validator as
//! [`UnsupportedConnective`](crate::ValidationError::UnsupportedConnective).

use crate::error::ValidationError;
use crate::policy::{Complexity, Policy};

const CONNECTIVES: [(Complexity, &str); 3] = [
    (Complexity::Ands, " and "),
    (Complexity::Ors, " or "),
    (Complexity::Nots, " not "),
];

/// Check parenthesis balance and the policy's occurrence bounds.
///
/// Checks run in a fixed order and the first failure is returned:
/// balance, grouping parentheses, `and`, `or`, `not`.
///
/// # Example
///
/// ```
/// use filtersql::{Bound, Complexity, Policy, ValidationError, guard};
///
/// let policy = Policy::new().max_ors(Bound::AtMost(1));
///
/// assert!(guard::check("a = 'x or y' or a = 'z'", &policy).is_ok());
/// assert!(matches!(
///     guard::check("a = 1 or a = 2 or a = 3", &policy),
///     Err(ValidationError::ComplexityExceeded { complexity: Complexity::Ors, found: 2, .. })
/// ));
/// ```
pub fn check(text: &str, policy: &Policy) -> Result<(), ValidationError> {
    let masked = mask_string_literals(text);

    let open = masked.matches('(').count();
    let close = masked.matches(')').count();
    if open != close {
        return Err(ValidationError::UnbalancedParentheses { open, close });
    }

    let bound = policy.max_grouping_parens;
    if !bound.permits(open) {
        return Err(exceeded(text, Complexity::GroupingParens, policy, open));
    }

    let lowered = masked.to_ascii_lowercase();
    for (complexity, padded) in CONNECTIVES {
        let found = lowered.matches(padded).count();
        if !policy.bound(complexity).permits(found) {
            return Err(exceeded(text, complexity, policy, found));
        }
    }

    Ok(())
}

fn exceeded(text: &str, complexity: Complexity, policy: &Policy, found: usize) -> ValidationError {
    ValidationError::ComplexityExceeded {
        complexity,
        bound: policy.bound(complexity),
        found,
        fragment: text.trim().to_string(),
    }
}

/// Replace every quoted literal, quotes included, with `''`.
///
/// A literal ends at the next occurrence of its opening quote character. An
/// unterminated literal masks everything up to the end of the text.
///
/// ```
/// use filtersql::guard::mask_string_literals;
///
/// assert_eq!(mask_string_literals("a = 'x and (y' or b = \"it's\""), "a = '' or b = ''");
/// ```
#[must_use]
pub fn mask_string_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\'' || c == '"' {
            out.push_str("''");
            for inner in chars.by_ref() {
                if inner == c {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}
