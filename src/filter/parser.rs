//! Parsers for the two filter surfaces: parenthesized expressions and flat
//! legacy `tag`/`value` pairs.

use chrono::{DateTime, Utc};

use super::{node::Filter, ParseOptions};
use crate::{
    audio_format::AudioFormat,
    errors::ParseFilterError,
    iso8601::parse_iso8601,
    string_filter::{Position, StringFilter},
    tag::Tag,
    uri::uri_safe_local,
};

/// Quoted values longer than this are rejected.
const QUOTED_VALUE_MAX: usize = 4096;

/// Operator definition used to parse the operator from the expression and
/// create the [`StringFilter`] if it matched the operator prefix.
struct OperatorDef {
    prefix: &'static str,
    fold_case: bool,
    negated: bool,
    position: Position,
}

/// Pre-defined operators with explicit case-sensitivity. The trailing space
/// is part of the prefix and delimits the operator from its operand.
#[rustfmt::skip]
const OPERATORS: [OperatorDef; 12] = [
    //            operator prefix               fold case  negated  position
    OperatorDef { prefix: "contains_cs ",       fold_case: false, negated: false, position: Position::Anywhere },
    OperatorDef { prefix: "!contains_cs ",      fold_case: false, negated: true,  position: Position::Anywhere },
    OperatorDef { prefix: "contains_ci ",       fold_case: true,  negated: false, position: Position::Anywhere },
    OperatorDef { prefix: "!contains_ci ",      fold_case: true,  negated: true,  position: Position::Anywhere },

    OperatorDef { prefix: "starts_with_cs ",    fold_case: false, negated: false, position: Position::Prefix },
    OperatorDef { prefix: "!starts_with_cs ",   fold_case: false, negated: true,  position: Position::Prefix },
    OperatorDef { prefix: "starts_with_ci ",    fold_case: true,  negated: false, position: Position::Prefix },
    OperatorDef { prefix: "!starts_with_ci ",   fold_case: true,  negated: true,  position: Position::Prefix },

    OperatorDef { prefix: "eq_cs ",             fold_case: false, negated: false, position: Position::Full },
    OperatorDef { prefix: "!eq_cs ",            fold_case: false, negated: true,  position: Position::Full },
    OperatorDef { prefix: "eq_ci ",             fold_case: true,  negated: false, position: Position::Full },
    OperatorDef { prefix: "!eq_ci ",            fold_case: true,  negated: true,  position: Position::Full },
];

/// The filter kind a keyword at the name position selects.
enum FilterKind {
    Uri,
    Any,
    Base,
    ModifiedSince,
    AddedSince,
    AudioFormat,
    Priority,
    Tag(Tag),
}

fn resolve_filter_kind(name: &str) -> Result<FilterKind, ParseFilterError> {
    if name.eq_ignore_ascii_case("file") || name.eq_ignore_ascii_case("filename") {
        return Ok(FilterKind::Uri);
    }

    if name.eq_ignore_ascii_case("any") {
        return Ok(FilterKind::Any);
    }

    if name == "base" {
        return Ok(FilterKind::Base);
    }

    if name == "modified-since" {
        return Ok(FilterKind::ModifiedSince);
    }

    if name == "added-since" {
        return Ok(FilterKind::AddedSince);
    }

    if name.eq_ignore_ascii_case("AudioFormat") {
        return Ok(FilterKind::AudioFormat);
    }

    if name.eq_ignore_ascii_case("prio") {
        return Ok(FilterKind::Priority);
    }

    Tag::try_from(name)
        .map(FilterKind::Tag)
        .map_err(|_| ParseFilterError::UnknownFilterType(name.to_owned()))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

/// Parses a timestamp operand: ISO 8601, or an integer epoch if the whole
/// string is one. The ISO 8601 error wins when both fail.
fn parse_time_stamp(s: &str) -> Result<DateTime<Utc>, ParseFilterError> {
    match parse_iso8601(s) {
        Ok((instant, _)) => Ok(instant),
        Err(e) => {
            if let Ok(epoch) = s.parse::<u64>() {
                let instant = i64::try_from(epoch)
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0));
                if let Some(instant) = instant {
                    return Ok(instant);
                }
            }

            Err(ParseFilterError::BadTimestamp(e))
        }
    }
}

/// Builds the matcher for the flat tag/value form. The flat form predates
/// the expression language; its `fold_case` flag historically also switched
/// on substring matching.
fn compat_string_filter(value: &str, fold_case: bool) -> StringFilter {
    let position = if fold_case {
        Position::Anywhere
    } else {
        Position::Full
    };

    StringFilter::new(value, fold_case, position, false)
}

/// Parses one flat `tag`/`value` pair into a filter node.
pub(super) fn parse_pair(
    tag: &str,
    value: &str,
    fold_case: bool,
) -> Result<Filter, ParseFilterError> {
    match resolve_filter_kind(tag)? {
        FilterKind::Base => {
            if !uri_safe_local(value) {
                return Err(ParseFilterError::BadUri);
            }

            Ok(Filter::Base(value.to_owned()))
        }
        FilterKind::ModifiedSince => Ok(Filter::ModifiedSince(parse_time_stamp(value)?)),
        FilterKind::AddedSince => Ok(Filter::AddedSince(parse_time_stamp(value)?)),
        FilterKind::Uri => Ok(Filter::Uri(compat_string_filter(value, fold_case))),
        FilterKind::Any => Ok(Filter::Tag {
            tag: None,
            filter: compat_string_filter(value, fold_case),
        }),
        FilterKind::Tag(tag) => Ok(Filter::Tag {
            tag: Some(tag),
            filter: compat_string_filter(value, fold_case),
        }),
        // these kinds have no flat spelling
        FilterKind::AudioFormat | FilterKind::Priority => {
            Err(ParseFilterError::UnknownFilterType(tag.to_owned()))
        }
    }
}

/// Cursor over a single expression argument.
///
/// All lexical primitives advance the cursor only when they succeed.
pub(super) struct Parser<'a> {
    s: &'a str,
    fold_case: bool,
    regex: bool,
}

impl<'a> Parser<'a> {
    pub(super) fn new(s: &'a str, options: ParseOptions) -> Self {
        Parser {
            s,
            fold_case: options.fold_case,
            regex: options.regex,
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.s.is_empty()
    }

    fn strip_left(&mut self) {
        self.s = self.s.trim_start_matches([' ', '\t']);
    }

    /// Consumes `c` and trailing whitespace if the input starts with it.
    fn eat(&mut self, c: char) -> bool {
        match self.s.strip_prefix(c) {
            Some(rest) => {
                self.s = rest;
                self.strip_left();
                true
            }
            None => false,
        }
    }

    fn expect_close(&mut self) -> Result<(), ParseFilterError> {
        if self.eat(')') {
            Ok(())
        } else {
            Err(ParseFilterError::ParenExpected(')'))
        }
    }

    /// Reads a maximal run of word characters and trailing whitespace.
    fn expect_word(&mut self) -> Result<&'a str, ParseFilterError> {
        let end = self
            .s
            .find(|c: char| !is_word_char(c))
            .unwrap_or(self.s.len());
        if end == 0 {
            return Err(ParseFilterError::WordExpected);
        }

        let (word, rest) = self.s.split_at(end);
        self.s = rest;
        self.strip_left();
        Ok(word)
    }

    /// Reads a quoted value delimited by `'` or `"`. A backslash escapes
    /// the following character. Consumes the closing quote and trailing
    /// whitespace.
    fn expect_quoted(&mut self) -> Result<String, ParseFilterError> {
        let mut chars = self.s.chars();
        let quote = match chars.next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(ParseFilterError::QuotedExpected),
        };

        let mut value = String::new();
        loop {
            let c = match chars.next() {
                None => return Err(ParseFilterError::ClosingQuoteMissing),
                Some(c) if c == quote => break,
                Some('\\') => chars
                    .next()
                    .ok_or(ParseFilterError::ClosingQuoteMissing)?,
                Some(c) => c,
            };

            value.push(c);
            if value.len() >= QUOTED_VALUE_MAX {
                return Err(ParseFilterError::QuotedTooLong);
            }
        }

        self.s = chars.as_str();
        self.strip_left();
        Ok(value)
    }

    /// ASCII-case-insensitive prefix test; returns the remainder on a
    /// match.
    fn after_prefix_ignore_case(&self, prefix: &str) -> Option<&'a str> {
        let len = prefix.len();
        if self.s.len() >= len && self.s.as_bytes()[..len].eq_ignore_ascii_case(prefix.as_bytes())
        {
            Some(&self.s[len..])
        } else {
            None
        }
    }

    /// Consumes an operator prefix plus its operand if one matches.
    fn eat_operator(&mut self, prefix: &str) -> Result<Option<String>, ParseFilterError> {
        match self.after_prefix_ignore_case(prefix) {
            Some(rest) => {
                self.s = rest;
                self.strip_left();
                self.expect_quoted().map(Some)
            }
            None => Ok(None),
        }
    }

    /// Parses a string operator and its operand.
    fn parse_string_filter(&mut self) -> Result<StringFilter, ParseFilterError> {
        for op in &OPERATORS {
            if let Some(value) = self.eat_operator(op.prefix)? {
                return Ok(StringFilter::new(
                    value,
                    op.fold_case,
                    op.position,
                    op.negated,
                ));
            }
        }

        // operators without an explicit case-sensitivity inherit the
        // top-level fold_case flag
        if let Some(value) = self.eat_operator("contains ")? {
            return Ok(StringFilter::new(
                value,
                self.fold_case,
                Position::Anywhere,
                false,
            ));
        }

        if let Some(value) = self.eat_operator("!contains ")? {
            return Ok(StringFilter::new(
                value,
                self.fold_case,
                Position::Anywhere,
                true,
            ));
        }

        if let Some(value) = self.eat_operator("starts_with ")? {
            return Ok(StringFilter::new(
                value,
                self.fold_case,
                Position::Prefix,
                false,
            ));
        }

        if let Some(value) = self.eat_operator("!starts_with ")? {
            return Ok(StringFilter::new(
                value,
                self.fold_case,
                Position::Prefix,
                true,
            ));
        }

        let bytes = self.s.as_bytes();

        if self.regex && bytes.len() >= 2 && (bytes[0] == b'!' || bytes[0] == b'=') && bytes[1] == b'~'
        {
            let negated = bytes[0] == b'!';
            self.s = &self.s[2..];
            self.strip_left();
            let value = self.expect_quoted()?;
            return Ok(StringFilter::with_regex(value, self.fold_case, negated)?);
        }

        let negated = if self.s.starts_with("!=") {
            true
        } else if self.s.starts_with("==") {
            false
        } else {
            return Err(ParseFilterError::UnknownOperator(self.s.to_owned()));
        };

        self.s = &self.s[2..];
        self.strip_left();
        let value = self.expect_quoted()?;

        Ok(StringFilter::new(value, self.fold_case, Position::Full, negated))
    }

    /// Parses one parenthesized expression, leaving the cursor after its
    /// closing parenthesis.
    pub(super) fn parse_expression(&mut self) -> Result<Filter, ParseFilterError> {
        if !self.eat('(') {
            return Err(ParseFilterError::ParenExpected('('));
        }

        if self.s.starts_with('(') {
            let first = self.parse_expression()?;
            if self.eat(')') {
                return Ok(first);
            }

            if self.expect_word()? != "AND" {
                return Err(ParseFilterError::AndExpected);
            }

            let mut children = vec![first];
            loop {
                children.push(self.parse_expression()?);

                if self.eat(')') {
                    return Ok(Filter::And(children));
                }

                if self.expect_word()? != "AND" {
                    return Err(ParseFilterError::AndExpected);
                }
            }
        }

        if self.eat('!') {
            if !self.s.starts_with('(') {
                return Err(ParseFilterError::ParenExpected('('));
            }

            let inner = self.parse_expression()?;
            self.expect_close()?;
            return Ok(Filter::Not(Box::new(inner)));
        }

        let name = self.expect_word()?;

        match resolve_filter_kind(name)? {
            FilterKind::ModifiedSince => {
                let value = self.expect_quoted()?;
                self.expect_close()?;
                Ok(Filter::ModifiedSince(parse_time_stamp(&value)?))
            }
            FilterKind::AddedSince => {
                let value = self.expect_quoted()?;
                self.expect_close()?;
                Ok(Filter::AddedSince(parse_time_stamp(&value)?))
            }
            FilterKind::Base => {
                let value = self.expect_quoted()?;
                self.expect_close()?;

                if !uri_safe_local(&value) {
                    return Err(ParseFilterError::BadUri);
                }

                Ok(Filter::Base(value))
            }
            FilterKind::AudioFormat => {
                let mask = if self.s.starts_with("==") {
                    false
                } else if self.s.starts_with("=~") {
                    true
                } else {
                    return Err(ParseFilterError::AudioFormatOperatorExpected);
                };

                self.s = &self.s[2..];
                self.strip_left();

                let value = self.expect_quoted()?;
                let format = AudioFormat::parse(&value, mask)?;

                self.expect_close()?;

                Ok(Filter::AudioFormat { format, mask })
            }
            FilterKind::Priority => {
                if !self.s.starts_with(">=") {
                    return Err(ParseFilterError::BadPriority);
                }

                self.s = &self.s[2..];
                self.strip_left();

                let end = self
                    .s
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(self.s.len());
                if end == 0 {
                    return Err(ParseFilterError::BadNumber);
                }

                let (digits, rest) = self.s.split_at(end);
                let threshold = digits
                    .parse()
                    .map_err(|_| ParseFilterError::BadPriority)?;

                // no whitespace is accepted between the number and the
                // closing parenthesis
                self.s = rest;
                self.expect_close()?;

                Ok(Filter::Priority(threshold))
            }
            FilterKind::Uri => {
                let filter = self.parse_string_filter()?;
                self.expect_close()?;
                Ok(Filter::Uri(filter))
            }
            FilterKind::Any => {
                let filter = self.parse_string_filter()?;
                self.expect_close()?;
                Ok(Filter::Tag { tag: None, filter })
            }
            FilterKind::Tag(tag) => {
                let filter = self.parse_string_filter()?;
                self.expect_close()?;
                Ok(Filter::Tag {
                    tag: Some(tag),
                    filter,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn parse(s: &str) -> Result<Filter, ParseFilterError> {
        parse_with(s, ParseOptions::default())
    }

    fn parse_with(s: &str, options: ParseOptions) -> Result<Filter, ParseFilterError> {
        let mut parser = Parser::new(s, options);
        let filter = parser.parse_expression()?;
        assert!(parser.is_at_end(), "unparsed input: {:?}", parser.s);
        Ok(filter)
    }

    #[test]
    fn simple_tag_expression() {
        let filter = parse("(artist == \"foo\")").unwrap();
        assert_eq!(
            filter,
            Filter::tag(
                Tag::Artist,
                StringFilter::new("foo", false, Position::Full, false)
            )
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_matches!(parse("(ARTIST == \"foo\")"), Ok(Filter::Tag { .. }));
        assert_matches!(parse("(FILE == \"foo\")"), Ok(Filter::Uri(_)));
        assert_matches!(parse("(filename == \"foo\")"), Ok(Filter::Uri(_)));
        assert_matches!(parse("(ANY == \"foo\")"), Ok(Filter::Tag { tag: None, .. }));
        assert_matches!(parse("(audioformat == \"44100:16:2\")"), Ok(Filter::AudioFormat { .. }));
        assert_matches!(parse("(PRIO >= 5)"), Ok(Filter::Priority(5)));

        // `base` and the timestamp kinds are case-sensitive
        assert_matches!(
            parse("(BASE \"a\")"),
            Err(ParseFilterError::UnknownFilterType(name)) if name == "BASE"
        );
        assert_matches!(
            parse("(Modified-Since \"2023-01-01\")"),
            Err(ParseFilterError::UnknownFilterType(_))
        );
    }

    #[test]
    fn operator_table() {
        let cases: [(&str, bool, Position, bool); 12] = [
            ("contains_cs", false, Position::Anywhere, false),
            ("!contains_cs", false, Position::Anywhere, true),
            ("contains_ci", true, Position::Anywhere, false),
            ("!contains_ci", true, Position::Anywhere, true),
            ("starts_with_cs", false, Position::Prefix, false),
            ("!starts_with_cs", false, Position::Prefix, true),
            ("starts_with_ci", true, Position::Prefix, false),
            ("!starts_with_ci", true, Position::Prefix, true),
            ("eq_cs", false, Position::Full, false),
            ("!eq_cs", false, Position::Full, true),
            ("eq_ci", true, Position::Full, false),
            ("!eq_ci", true, Position::Full, true),
        ];

        for (operator, fold_case, position, negated) in cases {
            let filter = parse(&format!("(title {operator} \"x\")")).unwrap();
            assert_eq!(
                filter,
                Filter::tag(
                    Tag::Title,
                    StringFilter::new("x", fold_case, position, negated)
                ),
                "operator {operator}"
            );
        }
    }

    #[test]
    fn operators_inherit_fold_case() {
        let options = ParseOptions {
            fold_case: true,
            ..ParseOptions::default()
        };

        for operator in ["contains", "starts_with", "=="] {
            let filter = parse_with(&format!("(title {operator} \"x\")"), options).unwrap();
            let Filter::Tag { filter, .. } = filter else {
                panic!("expected a tag filter");
            };
            assert!(filter.fold_case(), "operator {operator}");
        }
    }

    #[test]
    fn operator_prefixes_are_case_insensitive() {
        let filter = parse("(title CONTAINS_CS \"x\")").unwrap();
        assert_eq!(
            filter,
            Filter::tag(
                Tag::Title,
                StringFilter::new("x", false, Position::Anywhere, false)
            )
        );
    }

    #[test]
    fn unknown_operator() {
        assert_matches!(
            parse("(title mep \"x\")"),
            Err(ParseFilterError::UnknownOperator(rest)) if rest.starts_with("mep")
        );
        assert_matches!(
            parse("(title = \"x\")"),
            Err(ParseFilterError::UnknownOperator(_))
        );
    }

    #[test]
    fn quoting() {
        let filter = parse("(title == 'single quoted')").unwrap();
        assert_matches!(
            filter,
            Filter::Tag { filter, .. } if filter.value() == "single quoted"
        );

        let filter = parse(r#"(title == "esc \" and \\ done")"#).unwrap();
        assert_matches!(
            filter,
            Filter::Tag { filter, .. } if filter.value() == r#"esc " and \ done"#
        );

        // escaping works for arbitrary characters, including quotes of the
        // other kind
        let filter = parse(r#"(title == "\a\'")"#).unwrap();
        assert_matches!(
            filter,
            Filter::Tag { filter, .. } if filter.value() == "a'"
        );
    }

    #[test]
    fn quoting_errors() {
        assert_matches!(
            parse("(title == x)"),
            Err(ParseFilterError::QuotedExpected)
        );
        assert_matches!(
            parse("(title == \"x"),
            Err(ParseFilterError::ClosingQuoteMissing)
        );
        assert_matches!(
            parse("(title == \"x\\"),
            Err(ParseFilterError::ClosingQuoteMissing)
        );

        let long = "x".repeat(QUOTED_VALUE_MAX);
        assert_matches!(
            parse(&format!("(title == \"{long}\")")),
            Err(ParseFilterError::QuotedTooLong)
        );

        // one byte below the cap is accepted
        let just_fits = "x".repeat(QUOTED_VALUE_MAX - 1);
        assert_matches!(parse(&format!("(title == \"{just_fits}\")")), Ok(_));
    }

    #[test]
    fn group_and() {
        let filter = parse("((artist == \"a\") AND (title == \"b\"))").unwrap();
        assert_matches!(filter, Filter::And(children) if children.len() == 2);

        let filter = parse("((artist == \"a\") AND (title == \"b\") AND (genre == \"c\"))")
            .unwrap();
        assert_matches!(filter, Filter::And(children) if children.len() == 3);

        // a redundantly parenthesized single expression passes through
        let filter = parse("((artist == \"a\"))").unwrap();
        assert_matches!(filter, Filter::Tag { .. });
    }

    #[test]
    fn group_errors() {
        assert_matches!(
            parse("((artist == \"a\") OR (title == \"b\"))"),
            Err(ParseFilterError::AndExpected)
        );
        assert_matches!(
            parse("((artist == \"a\") (title == \"b\"))"),
            Err(ParseFilterError::WordExpected)
        );
        assert_matches!(
            parse("((artist == \"a\") AND title)"),
            Err(ParseFilterError::ParenExpected('('))
        );
    }

    #[test]
    fn negation() {
        let filter = parse("(!(artist == \"a\"))").unwrap();
        assert_matches!(filter, Filter::Not(_));

        assert_matches!(
            parse("(!artist == \"a\")"),
            Err(ParseFilterError::ParenExpected('('))
        );
    }

    #[test]
    fn unknown_filter_type() {
        assert_matches!(
            parse("(nosuchtag == \"a\")"),
            Err(ParseFilterError::UnknownFilterType(name)) if name == "nosuchtag"
        );
    }

    #[test]
    fn base_expression() {
        assert_eq!(parse("(base \"a/b\")").unwrap(), Filter::Base(String::from("a/b")));

        assert_matches!(parse("(base \"../x\")"), Err(ParseFilterError::BadUri));
        assert_matches!(parse("(base \"/x\")"), Err(ParseFilterError::BadUri));
        assert_matches!(parse("(base \"x/\")"), Err(ParseFilterError::BadUri));
    }

    #[test]
    fn timestamp_expression() {
        let filter = parse("(modified-since \"2023-01-01\")").unwrap();
        let expected = DateTime::from_timestamp(1672531200, 0).unwrap();
        assert_eq!(filter, Filter::ModifiedSince(expected));

        // the integer form is seconds since the epoch
        let filter = parse("(added-since \"1672531200\")").unwrap();
        assert_eq!(filter, Filter::AddedSince(expected));

        assert_matches!(
            parse("(modified-since \"not a date\")"),
            Err(ParseFilterError::BadTimestamp(_))
        );
        // trailing garbage invalidates the integer form
        assert_matches!(
            parse("(modified-since \"1672531200x\")"),
            Err(ParseFilterError::BadTimestamp(_))
        );
        // as does an epoch beyond the representable range
        assert_matches!(
            parse("(modified-since \"18446744073709551615\")"),
            Err(ParseFilterError::BadTimestamp(_))
        );
    }

    #[test]
    fn audio_format_expression() {
        let filter = parse("(AudioFormat == \"44100:16:2\")").unwrap();
        assert_matches!(filter, Filter::AudioFormat { mask: false, .. });

        let filter = parse("(AudioFormat =~ \"44100:*:2\")").unwrap();
        assert_matches!(filter, Filter::AudioFormat { mask: true, .. });

        assert_matches!(
            parse("(AudioFormat >= \"44100:16:2\")"),
            Err(ParseFilterError::AudioFormatOperatorExpected)
        );
        // wildcards are only valid with the mask operator
        assert_matches!(
            parse("(AudioFormat == \"44100:*:2\")"),
            Err(ParseFilterError::BadAudioFormat(_))
        );
    }

    #[test]
    fn priority_expression() {
        assert_eq!(parse("(prio >= 5)").unwrap(), Filter::Priority(5));
        assert_eq!(parse("(prio >= 255)").unwrap(), Filter::Priority(255));

        assert_matches!(parse("(prio >= 300)"), Err(ParseFilterError::BadPriority));
        assert_matches!(parse("(prio == 5)"), Err(ParseFilterError::BadPriority));

        // `>=` matched but no digits follow
        assert_matches!(parse("(prio >= \"5\")"), Err(ParseFilterError::BadNumber));
        assert_matches!(parse("(prio >= )"), Err(ParseFilterError::BadNumber));
    }

    #[test]
    fn regex_operators() {
        let filter = parse("(title =~ \"Ra.n\")").unwrap();
        assert_matches!(filter, Filter::Tag { filter, .. } if filter.is_regex());

        let filter = parse("(title !~ \"Ra.n\")").unwrap();
        assert_matches!(
            filter,
            Filter::Tag { filter, .. } if filter.is_regex() && filter.is_negated()
        );

        assert_matches!(
            parse("(title =~ \"(unclosed\")"),
            Err(ParseFilterError::BadRegex(_))
        );
    }

    #[test]
    fn regex_can_be_disabled() {
        let options = ParseOptions {
            regex: false,
            ..ParseOptions::default()
        };

        assert_matches!(
            parse_with("(title =~ \"Ra.n\")", options),
            Err(ParseFilterError::UnknownOperator(_))
        );
        assert_matches!(
            parse_with("(title !~ \"Ra.n\")", options),
            Err(ParseFilterError::UnknownOperator(_))
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        let filter = parse("(  title   ==   \"x\"  )").unwrap();
        assert_eq!(
            filter,
            Filter::tag(
                Tag::Title,
                StringFilter::new("x", false, Position::Full, false)
            )
        );
    }

    #[test]
    fn flat_pairs() {
        assert_eq!(
            parse_pair("base", "a/b", false).unwrap(),
            Filter::Base(String::from("a/b"))
        );
        assert_matches!(
            parse_pair("base", "../x", false),
            Err(ParseFilterError::BadUri)
        );

        // fold_case switches the legacy form to substring matching
        assert_eq!(
            parse_pair("title", "x", false).unwrap(),
            Filter::tag(Tag::Title, StringFilter::new("x", false, Position::Full, false))
        );
        assert_eq!(
            parse_pair("title", "x", true).unwrap(),
            Filter::tag(Tag::Title, StringFilter::new("x", true, Position::Anywhere, false))
        );

        assert_matches!(
            parse_pair("file", "x", false),
            Ok(Filter::Uri(_))
        );
        assert_matches!(
            parse_pair("any", "x", false),
            Ok(Filter::Tag { tag: None, .. })
        );

        assert_matches!(
            parse_pair("modified-since", "2023-01-01", false),
            Ok(Filter::ModifiedSince(_))
        );

        assert_matches!(
            parse_pair("nosuchtag", "x", false),
            Err(ParseFilterError::UnknownFilterType(_))
        );

        // no flat spelling for these
        assert_matches!(
            parse_pair("prio", "5", false),
            Err(ParseFilterError::UnknownFilterType(name)) if name == "prio"
        );
        assert_matches!(
            parse_pair("AudioFormat", "44100:16:2", false),
            Err(ParseFilterError::UnknownFilterType(_))
        );
    }
}
