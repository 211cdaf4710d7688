//! Identifier rules for column names and qualifiers.

/// SQL words that may never be used as a column name or qualifier.
///
/// Grammar keywords (`and`, `or`, `not`, `in`, `between`) are lexed as their
/// own tokens and are listed here too so programmatically built trees are
/// held to the same rule.
const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "any", "as", "asc", "between", "by", "case", "cast", "create", "cross",
    "delete", "desc", "distinct", "drop", "else", "end", "except", "exists", "false", "from",
    "full", "group", "having", "ilike", "in", "inner", "insert", "intersect", "into", "is", "join",
    "left", "like", "limit", "not", "null", "offset", "on", "or", "order", "outer", "returning",
    "right", "select", "set", "some", "table", "then", "true", "truncate", "union", "update",
    "using", "values", "when", "where", "with",
];

/// Whether `word` is a reserved SQL word, ignoring ASCII case.
#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// Whether `s` is usable as a column name or qualifier.
///
/// A valid identifier:
/// - Starts with an ASCII letter or underscore
/// - Contains only ASCII letters, digits and underscores
/// - Is not a reserved SQL word
///
/// # Examples
///
/// ```
/// use filtersql::is_valid_identifier;
///
/// assert!(is_valid_identifier("user_id"));
/// assert!(is_valid_identifier("_private"));
///
/// assert!(!is_valid_identifier(""));
/// assert!(!is_valid_identifier("1abc"));
/// assert!(!is_valid_identifier("user.id"));
/// assert!(!is_valid_identifier("select"));
/// ```
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_reserved_word(s)
}
