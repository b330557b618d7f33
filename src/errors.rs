//! Errors reported by the filter parser.

use std::{error, fmt};

use crate::audio_format::ParseAudioFormatError;

/// Errors which can occur when parsing a song filter.
///
/// Every failure carries a message suitable for reporting back to the client
/// that submitted the filter.
#[derive(Debug)]
pub enum ParseFilterError {
    /// The keyword at the filter-name position is not a filter kind or a
    /// known tag name.
    UnknownFilterType(String),
    /// No operator prefix matched; carries the unparsed remainder.
    UnknownOperator(String),
    /// A keyword was required.
    WordExpected,
    /// A quoted value was required.
    QuotedExpected,
    /// A quoted value ran into the end of input.
    ClosingQuoteMissing,
    /// A quoted value exceeded the per-token length cap.
    QuotedTooLong,
    /// `(` or `)` missing where required.
    ParenExpected(char),
    /// Grouped expressions must be joined by `AND`.
    AndExpected,
    /// Audio formats support only the `==` and `=~` comparisons.
    AudioFormatOperatorExpected,
    /// A `base` value failed the URI-safety check.
    BadUri,
    /// A timestamp value is neither ISO 8601 nor an integer epoch.
    BadTimestamp(chrono::ParseError),
    /// An audio format value was rejected.
    BadAudioFormat(ParseAudioFormatError),
    /// `prio` comparisons take the form `prio >= N` with `N` in `0..=255`;
    /// the `>=` was missing or `N` was out of range.
    BadPriority,
    /// A decimal number was required but no digits were present.
    BadNumber,
    /// Input remaining after a complete expression.
    TrailingGarbage,
    /// The flat form had no arguments or an odd number of tokens.
    ArgumentCount,
    /// A regular expression operand failed to compile.
    BadRegex(regex::Error),
}

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFilterType(name) => write!(f, "Unknown filter type: {name}"),
            Self::UnknownOperator(rest) => write!(f, "Unknown filter operator: {rest}"),
            Self::WordExpected => write!(f, "Word expected"),
            Self::QuotedExpected => write!(f, "Quoted string expected"),
            Self::ClosingQuoteMissing => write!(f, "Closing quote not found"),
            Self::QuotedTooLong => write!(f, "Quoted value is too long"),
            Self::ParenExpected(paren) => write!(f, "'{paren}' expected"),
            Self::AndExpected => write!(f, "'AND' expected"),
            Self::AudioFormatOperatorExpected => write!(f, "'==' or '=~' expected"),
            Self::BadUri => write!(f, "Bad URI"),
            Self::BadTimestamp(e) => write!(f, "Invalid timestamp: {e}"),
            Self::BadAudioFormat(e) => write!(f, "Invalid audio format: {e}"),
            Self::BadPriority => write!(f, "Invalid priority value"),
            Self::BadNumber => write!(f, "Number expected"),
            Self::TrailingGarbage => write!(f, "Unparsed garbage after expression"),
            Self::ArgumentCount => write!(f, "Incorrect number of filter arguments"),
            Self::BadRegex(e) => write!(f, "Invalid regular expression: {e}"),
        }
    }
}

impl error::Error for ParseFilterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::BadTimestamp(e) => Some(e),
            Self::BadAudioFormat(e) => Some(e),
            Self::BadRegex(e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<ParseAudioFormatError> for ParseFilterError {
    fn from(e: ParseAudioFormatError) -> Self {
        ParseFilterError::BadAudioFormat(e)
    }
}

#[doc(hidden)]
impl From<regex::Error> for ParseFilterError {
    fn from(e: regex::Error) -> Self {
        ParseFilterError::BadRegex(e)
    }
}
