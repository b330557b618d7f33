#![warn(
    rustdoc::broken_intra_doc_links,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    unused_import_braces,
    unused_qualifications
)]
#![forbid(unsafe_code)]

//! Parser and evaluator for song filter expressions, as used by music
//! player daemons to select songs from their library.
//!
//! A filter is submitted as a list of arguments, each either a
//! parenthesized [filter expression] or a flat legacy `tag`/`value` pair,
//! and becomes a [`SongFilter`]: a tree of [`Filter`] nodes under an
//! implicit top-level `AND`. The tree can be matched against [`Song`]s,
//! optimized, introspected, and serialized back to its canonical textual
//! form.
//!
//! ```
//! use song_filter::{Song, SongFilter, Tag};
//!
//! let mut filter = SongFilter::new();
//! filter
//!     .parse(&["((base \"albums\") AND (artist contains \"Beatles\"))"], false)
//!     .unwrap();
//! filter.optimize();
//!
//! let song = Song {
//!     uri: String::from("albums/help/dizzy.flac"),
//!     tags: [(Tag::Artist, vec![String::from("The Beatles")])].into(),
//!     ..Song::default()
//! };
//!
//! assert!(filter.matches(&song));
//! assert_eq!(filter.get_base(), Some("albums"));
//! assert_eq!(
//!     filter.to_expression(),
//!     "((base \"albums\") AND (artist contains \"Beatles\"))"
//! );
//! ```
//!
//! Matching never fails: metadata a song lacks simply fails the filter
//! nodes inspecting it. Parsing reports [`ParseFilterError`] with a
//! client-facing message and leaves the filter unchanged on failure.
//!
//! [filter expression]: https://www.musicpd.org/doc/html/protocol.html#filters

pub mod audio_format;
pub mod filter;
pub mod song;
pub mod tag;

mod errors;
mod iso8601;
mod string_filter;
mod uri;

pub use self::{
    audio_format::{AudioFormat, SampleFormat},
    errors::ParseFilterError,
    filter::{Filter, ParseOptions, SongFilter},
    iso8601::parse_iso8601,
    song::Song,
    string_filter::{Position, StringFilter},
    tag::{Tag, TagError},
    uri::uri_safe_local,
};
