//! String matching for filter expressions.

use regex::{Regex, RegexBuilder};

/// Where a literal pattern must occur in the haystack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// The whole haystack must equal the pattern.
    Full,
    /// The haystack must begin with the pattern.
    Prefix,
    /// The haystack must contain the pattern.
    Anywhere,
}

impl Position {
    fn test(self, hay: &str, needle: &str) -> bool {
        match self {
            Position::Full => hay == needle,
            Position::Prefix => hay.starts_with(needle),
            Position::Anywhere => hay.contains(needle),
        }
    }
}

/// A matcher for a single string, the second operand of the textual
/// comparison operators.
///
/// Holds a literal pattern or a compiled regular expression, the position
/// the pattern must occur at, an ASCII case-folding flag and a negation
/// flag. Immutable once constructed.
#[derive(Clone, Debug)]
pub struct StringFilter {
    value: String,
    fold_case: bool,
    position: Position,
    negated: bool,
    regex: Option<Regex>,
}

impl StringFilter {
    /// Creates a literal matcher.
    pub fn new(value: impl Into<String>, fold_case: bool, position: Position, negated: bool) -> Self {
        StringFilter {
            value: value.into(),
            fold_case,
            position,
            negated,
            regex: None,
        }
    }

    /// Creates a matcher backed by a regular expression compiled from
    /// `value`.
    ///
    /// The pattern must match the entire haystack, so it is compiled
    /// anchored; `fold_case` compiles it case-insensitively.
    pub fn with_regex(
        value: impl Into<String>,
        fold_case: bool,
        negated: bool,
    ) -> Result<Self, regex::Error> {
        let value = value.into();
        let regex = RegexBuilder::new(&format!(r"\A(?:{value})\z"))
            .case_insensitive(fold_case)
            .build()?;

        Ok(StringFilter {
            value,
            fold_case,
            position: Position::Full,
            negated,
            regex: Some(regex),
        })
    }

    /// The literal pattern (or regex source).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether comparisons fold ASCII case.
    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    /// Where the pattern must occur.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the match decision is inverted.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether a regular expression is attached.
    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    /// Evaluates the matcher against `s`.
    pub fn matches(&self, s: &str) -> bool {
        let found = match &self.regex {
            Some(regex) => regex.is_match(s),
            None if self.fold_case => self
                .position
                .test(&s.to_ascii_lowercase(), &self.value.to_ascii_lowercase()),
            None => self.position.test(s, &self.value),
        };

        found != self.negated
    }

    /// The shortest operator spelling that reproduces this matcher under a
    /// default (case-sensitive) re-parse.
    pub(crate) fn to_operator(&self) -> &'static str {
        if self.is_regex() {
            return if self.negated { "!~" } else { "=~" };
        }

        match (self.position, self.fold_case, self.negated) {
            (Position::Full, false, false) => "==",
            (Position::Full, false, true) => "!=",
            (Position::Full, true, false) => "eq_ci",
            (Position::Full, true, true) => "!eq_ci",
            (Position::Prefix, false, false) => "starts_with",
            (Position::Prefix, false, true) => "!starts_with",
            (Position::Prefix, true, false) => "starts_with_ci",
            (Position::Prefix, true, true) => "!starts_with_ci",
            (Position::Anywhere, false, false) => "contains",
            (Position::Anywhere, false, true) => "!contains",
            (Position::Anywhere, true, false) => "contains_ci",
            (Position::Anywhere, true, true) => "!contains_ci",
        }
    }
}

impl PartialEq for StringFilter {
    fn eq(&self, other: &StringFilter) -> bool {
        // the regex is derived from value + fold_case, comparing its
        // presence is enough
        self.value == other.value
            && self.fold_case == other.fold_case
            && self.position == other.position
            && self.negated == other.negated
            && self.regex.is_some() == other.regex.is_some()
    }
}

impl Eq for StringFilter {}
