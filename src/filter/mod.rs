//! Song filter trees: parsing, matching, introspection and serialization.
//!
//! A [`SongFilter`] owns the children of an implicit top-level `AND` and is
//! built from one or more arguments, each either a parenthesized
//! [filter expression] or a flat legacy `tag`/`value` pair:
//!
//! ```
//! use song_filter::{Song, SongFilter};
//!
//! let mut filter = SongFilter::new();
//! filter.parse(&["(artist contains \"Beatles\")"], false).unwrap();
//!
//! let song = Song {
//!     uri: String::from("a/day.flac"),
//!     ..Song::default()
//! };
//! assert!(!filter.matches(&song));
//! ```
//!
//! [filter expression]: https://www.musicpd.org/doc/html/protocol.html#filters

mod node;
mod parser;

use std::mem;

use crate::{errors::ParseFilterError, song::Song};

pub use self::node::Filter;

/// Options for the [`SongFilter`] parsing entry points.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Fold ASCII case in the operators that inherit their case
    /// sensitivity (`contains`, `starts_with`, `==`, `!=`, `=~`, `!~`) and
    /// in flat pairs.
    pub fold_case: bool,
    /// Availability of the `=~` / `!~` operators. When disabled, those
    /// prefixes are reported as unknown operators instead of compiling
    /// their operand.
    pub regex: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            fold_case: false,
            regex: true,
        }
    }
}

/// A parsed song filter.
///
/// The filter is the conjunction of its root filters; a filter without any
/// root filters matches every song. Parsing entry points append to the
/// conjunction; all other methods leave the filter unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongFilter {
    root: Vec<Filter>,
}

impl SongFilter {
    /// Creates an empty filter which matches every song.
    pub fn new() -> Self {
        SongFilter::default()
    }

    /// Parses a list of arguments, appending one root filter per
    /// expression or flat pair.
    ///
    /// Equivalent to [`parse_with`](SongFilter::parse_with) with the regex
    /// operators enabled.
    pub fn parse(&mut self, args: &[&str], fold_case: bool) -> Result<(), ParseFilterError> {
        self.parse_with(
            args,
            ParseOptions {
                fold_case,
                ..ParseOptions::default()
            },
        )
    }

    /// Parses a list of arguments, appending one root filter per
    /// expression or flat pair.
    ///
    /// An argument starting with `(` is parsed as a filter expression; any
    /// other argument must be followed by a value argument, and the two
    /// form a flat pair. Expressions and pairs may be mixed freely.
    ///
    /// On failure the filter is left unchanged.
    #[tracing::instrument(skip(self), err)]
    pub fn parse_with(
        &mut self,
        args: &[&str],
        options: ParseOptions,
    ) -> Result<(), ParseFilterError> {
        if args.is_empty() {
            return Err(ParseFilterError::ArgumentCount);
        }

        let mut parsed = Vec::new();
        let mut args = args;

        while let Some((&first, rest)) = args.split_first() {
            if first.starts_with('(') {
                let mut parser = parser::Parser::new(first, options);
                parsed.push(parser.parse_expression()?);

                if !parser.is_at_end() {
                    return Err(ParseFilterError::TrailingGarbage);
                }

                args = rest;
            } else {
                let Some((&value, rest)) = rest.split_first() else {
                    return Err(ParseFilterError::ArgumentCount);
                };

                parsed.push(parser::parse_pair(first, value, options.fold_case)?);
                args = rest;
            }
        }

        self.root.extend(parsed);
        Ok(())
    }

    /// Parses a single flat `tag`/`value` pair, appending one root filter.
    #[tracing::instrument(skip(self), err)]
    pub fn parse_pair(
        &mut self,
        tag: &str,
        value: &str,
        fold_case: bool,
    ) -> Result<(), ParseFilterError> {
        self.root.push(parser::parse_pair(tag, value, fold_case)?);
        Ok(())
    }

    /// Whether the filter has no root filters (and thus matches every
    /// song).
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Evaluates the filter against a song.
    pub fn matches(&self, song: &Song) -> bool {
        self.root.iter().all(|f| f.matches(song))
    }

    /// Renders the canonical textual form of the filter. Root filters are
    /// joined with ` AND ` when there is more than one.
    pub fn to_expression(&self) -> String {
        node::and_to_expression(&self.root)
    }

    /// Whether any root filter matches tags or the URI case-insensitively.
    pub fn has_fold_case(&self) -> bool {
        self.root.iter().any(|f| match f {
            Filter::Tag { filter, .. } | Filter::Uri(filter) => filter.fold_case(),
            _ => false,
        })
    }

    /// Whether the filter contains anything other than directory scopes.
    pub fn has_other_than_base(&self) -> bool {
        self.root.iter().any(|f| !matches!(f, Filter::Base(_)))
    }

    /// Returns the directory scope of the first `base` root filter, if
    /// any.
    pub fn get_base(&self) -> Option<&str> {
        self.root.iter().find_map(|f| match f {
            Filter::Base(prefix) => Some(prefix.as_str()),
            _ => None,
        })
    }

    /// Returns a copy of the filter with `prefix` stripped from its `base`
    /// scopes.
    ///
    /// A `base` equal to `prefix` is dropped entirely; one below it is
    /// rebased onto the remainder. A `base` whose remainder does not align
    /// on a path separator is kept unchanged, as are all other root
    /// filters.
    pub fn without_base_prefix(&self, prefix: &str) -> SongFilter {
        let mut result = SongFilter::new();

        for f in &self.root {
            if let Filter::Base(value) = f {
                if let Some(rest) = value.strip_prefix(prefix) {
                    if rest.is_empty() {
                        continue;
                    }

                    if let Some(rebased) = rest.strip_prefix('/') {
                        if !rebased.is_empty() {
                            result.root.push(Filter::Base(rebased.to_owned()));
                        }

                        continue;
                    }
                }
            }

            result.root.push(f.clone());
        }

        result
    }

    /// Optimizes the filter in place; see [`Filter::And`] for the
    /// rewrites. Idempotent.
    pub fn optimize(&mut self) {
        let children = mem::take(&mut self.root);
        self.root = node::optimize_and(children);
        tracing::trace!(children = self.root.len(), "optimized filter");
    }
}
