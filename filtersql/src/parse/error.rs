use std::fmt;

/// Why filter text is not a single well-formed expression.
///
/// Every variant carries the byte offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A character that starts no token.
    UnexpectedChar {
        /// The character.
        ch: char,
        /// Byte offset.
        offset: usize,
    },
    /// A quoted string without its closing quote.
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// An integer literal that does not fit in 64 bits.
    IntegerOutOfRange {
        /// The literal as written.
        literal: String,
        /// Byte offset.
        offset: usize,
    },
    /// A token that cannot appear here.
    UnexpectedToken {
        /// Description of the token found.
        found: String,
        /// What the grammar required instead.
        expected: &'static str,
        /// Byte offset.
        offset: usize,
    },
    /// Input ended while more was required.
    UnexpectedEnd {
        /// What the grammar required.
        expected: &'static str,
        /// Byte offset (the input length).
        offset: usize,
    },
    /// A reserved SQL word used where a column name was expected.
    ReservedWord {
        /// The word as written.
        word: String,
        /// Byte offset.
        offset: usize,
    },
    /// A `;` statement separator.
    MultipleStatements {
        /// Byte offset of the separator.
        offset: usize,
    },
    /// Text left over after a complete expression.
    TrailingInput {
        /// Description of the first leftover token.
        found: String,
        /// Byte offset.
        offset: usize,
    },
    /// Parentheses or `not` chains nested deeper than the parser allows.
    NestingTooDeep {
        /// The ceiling.
        max: usize,
        /// Byte offset of the token that went over it.
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset at which the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedChar { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::IntegerOutOfRange { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEnd { offset, .. }
            | Self::ReservedWord { offset, .. }
            | Self::MultipleStatements { offset }
            | Self::TrailingInput { offset, .. }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { ch, offset } => {
                write!(f, "unexpected character {ch:?} at offset {offset}")
            },
            Self::UnterminatedString { offset } => {
                write!(f, "unterminated string literal starting at offset {offset}")
            },
            Self::IntegerOutOfRange { literal, offset } => {
                write!(f, "integer literal {literal} at offset {offset} is out of range")
            },
            Self::UnexpectedToken {
                found,
                expected,
                offset,
            } => write!(f, "expected {expected}, found {found} at offset {offset}"),
            Self::UnexpectedEnd { expected, offset } => {
                write!(f, "expected {expected}, found end of input at offset {offset}")
            },
            Self::ReservedWord { word, offset } => {
                write!(f, "reserved word `{word}` at offset {offset} cannot be a column name")
            },
            Self::MultipleStatements { offset } => {
                write!(f, "statement separator ';' at offset {offset} is not allowed")
            },
            Self::TrailingInput { found, offset } => {
                write!(f, "unexpected {found} after expression at offset {offset}")
            },
            Self::NestingTooDeep { max, offset } => {
                write!(f, "nesting deeper than {max} levels at offset {offset}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
