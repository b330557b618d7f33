//! The filter tree and its per-node operations.

use std::{borrow::Cow, fmt::Write, ops::Not};

use chrono::{DateTime, Utc};

use crate::{
    audio_format::AudioFormat,
    song::Song,
    string_filter::StringFilter,
    tag::Tag,
};

/// A single node of a song filter tree.
///
/// Nodes are built by the parser or programmatically via the constructor
/// methods; [`matches`] evaluates a node against a [`Song`] and
/// [`to_expression`] renders its canonical textual form.
///
/// [`matches`]: Filter::matches
/// [`to_expression`]: Filter::to_expression
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Matches any value of one tag kind (or of all tag kinds) against a
    /// string matcher.
    Tag {
        /// The tag kind to inspect; `None` inspects all of them.
        tag: Option<Tag>,
        /// The matcher applied to the values.
        filter: StringFilter,
    },
    /// Matches the song URI against a string matcher.
    Uri(StringFilter),
    /// Restricts songs to a directory subtree of the library.
    Base(String),
    /// Matches songs modified at or after an instant.
    ModifiedSince(DateTime<Utc>),
    /// Matches songs added to the database at or after an instant.
    AddedSince(DateTime<Utc>),
    /// Matches the song's decoded audio format.
    AudioFormat {
        /// The format to compare with; masks carry wildcard fields.
        format: AudioFormat,
        /// Compare field-wise with wildcards (`=~`) instead of exactly
        /// (`==`).
        mask: bool,
    },
    /// Matches songs whose queue priority is at least the threshold.
    Priority(u8),
    /// Matches when every child matches; an empty list matches everything.
    And(Vec<Filter>),
    /// Inverts the inner filter.
    Not(Box<Filter>),
}

impl Filter {
    /// Creates a filter matching values of `tag`.
    pub fn tag(tag: Tag, filter: StringFilter) -> Self {
        Filter::Tag {
            tag: Some(tag),
            filter,
        }
    }

    /// Creates a filter matching values of *any* tag.
    pub fn any_tag(filter: StringFilter) -> Self {
        Filter::Tag { tag: None, filter }
    }

    /// Creates a filter matching the song URI.
    pub fn uri(filter: StringFilter) -> Self {
        Filter::Uri(filter)
    }

    /// Creates a directory-scope filter. `prefix` must be a URI-safe
    /// relative path without a trailing slash (see
    /// [`uri_safe_local`](crate::uri_safe_local)).
    pub fn base(prefix: impl Into<String>) -> Self {
        Filter::Base(prefix.into())
    }

    /// Negates the filter.
    ///
    /// You can also use the negation operator (`!`) if you prefer to negate
    /// at the start of an expression.
    pub fn negate(self) -> Self {
        Filter::Not(Box::new(self))
    }

    /// Chains the given filter onto this one with an `AND`.
    ///
    /// Automatically flattens nested `AND` conditions.
    pub fn and(self, other: Self) -> Self {
        let mut out = match self {
            Filter::And(inner) => inner,
            condition => {
                let mut out = Vec::with_capacity(2);
                out.push(condition);
                out
            }
        };

        match other {
            Filter::And(inner) => out.extend(inner),
            condition => out.push(condition),
        }

        Filter::And(out)
    }

    /// Evaluates the filter against a song. Never fails; absent metadata
    /// fails the node inspecting it.
    pub fn matches(&self, song: &Song) -> bool {
        match self {
            Filter::Tag {
                tag: Some(tag),
                filter,
            } => {
                let values = song.tag_values(*tag);
                if values.is_empty() {
                    // an absent tag satisfies exactly the negated matchers
                    filter.is_negated()
                } else {
                    values.iter().any(|v| filter.matches(v))
                }
            }
            Filter::Tag { tag: None, filter } => {
                if song.tags.values().all(|values| values.is_empty()) {
                    filter.is_negated()
                } else {
                    song.tags.values().flatten().any(|v| filter.matches(v))
                }
            }
            Filter::Uri(filter) => filter.matches(&song.uri),
            Filter::Base(prefix) => song
                .uri
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            Filter::ModifiedSince(instant) => {
                song.last_modified.is_some_and(|t| t >= *instant)
            }
            Filter::AddedSince(instant) => song.added.is_some_and(|t| t >= *instant),
            Filter::AudioFormat { format, mask } => match &song.audio_format {
                Some(actual) if *mask => format.matches_mask(actual),
                Some(actual) => format == actual,
                None => false,
            },
            Filter::Priority(threshold) => song.priority >= *threshold,
            Filter::And(children) => children.iter().all(|c| c.matches(song)),
            Filter::Not(inner) => !inner.matches(song),
        }
    }

    /// Renders the canonical parenthesized form of the filter.
    pub fn to_expression(&self) -> String {
        match self {
            Filter::Tag { tag, filter } => {
                let name = tag.map_or("any", |t| t.as_str());
                render_string_filter(name, filter)
            }
            Filter::Uri(filter) => render_string_filter("file", filter),
            Filter::Base(prefix) => {
                format!("(base \"{}\")", escape_filter_value(prefix))
            }
            Filter::ModifiedSince(instant) => {
                format!("(modified-since \"{}\")", format_instant(*instant))
            }
            Filter::AddedSince(instant) => {
                format!("(added-since \"{}\")", format_instant(*instant))
            }
            Filter::AudioFormat { format, mask } => {
                let operator = if *mask { "=~" } else { "==" };
                format!("(AudioFormat {operator} \"{format}\")")
            }
            Filter::Priority(threshold) => format!("(prio >= {threshold})"),
            Filter::And(children) => and_to_expression(children),
            Filter::Not(inner) => format!("(!{})", inner.to_expression()),
        }
    }

    /// Rewrites the subtree into its minimal equivalent form: nested `AND`s
    /// are flattened, equivalent `AND` children are merged (keeping the
    /// first occurrence), single-child `AND`s unwrapped and double
    /// negations collapsed.
    pub(crate) fn optimize(self) -> Filter {
        match self {
            Filter::And(children) => {
                let mut out = optimize_and(children);
                if out.len() == 1 {
                    out.remove(0)
                } else {
                    Filter::And(out)
                }
            }
            Filter::Not(inner) => match inner.optimize() {
                Filter::Not(x) => *x,
                f => Filter::Not(Box::new(f)),
            },
            other => other,
        }
    }
}

impl Not for Filter {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

/// Optimizes each child of an `AND`, splicing nested `AND`s into the list
/// and dropping duplicates.
pub(super) fn optimize_and(children: Vec<Filter>) -> Vec<Filter> {
    fn push_unique(out: &mut Vec<Filter>, f: Filter) {
        if !out.contains(&f) {
            out.push(f);
        }
    }

    let mut out = Vec::with_capacity(children.len());

    for child in children {
        match child.optimize() {
            Filter::And(nested) => {
                for f in nested {
                    push_unique(&mut out, f);
                }
            }
            f => push_unique(&mut out, f),
        }
    }

    out
}

/// Joins the children of an `AND` node. A single child stands for itself,
/// an empty list renders as nothing.
pub(super) fn and_to_expression(children: &[Filter]) -> String {
    match children {
        [] => String::new(),
        [single] => single.to_expression(),
        children => {
            let mut out = String::from("(");

            let mut first = true;
            for child in children {
                if first {
                    first = false;
                } else {
                    out.push_str(" AND ");
                }

                out.push_str(&child.to_expression());
            }

            out.push(')');
            out
        }
    }
}

fn render_string_filter(name: &str, filter: &StringFilter) -> String {
    let mut out = String::new();
    write!(
        out,
        "({} {} \"{}\")",
        name,
        filter.to_operator(),
        escape_filter_value(filter.value())
    )
    .unwrap();
    out
}

fn format_instant(instant: DateTime<Utc>) -> impl std::fmt::Display {
    instant.format("%Y-%m-%dT%H:%M:%SZ")
}

/// Escapes `"` and `\` for embedding in a quoted value.
pub(crate) fn escape_filter_value(value: &str) -> Cow<'_, str> {
    if value.contains(['"', '\\']) {
        let mut out = String::with_capacity(value.len() + 2);
        for c in value.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}
