//! The song view consumed by filters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{audio_format::AudioFormat, tag::Tag};

/// A read-only view of a single library song, as handed out by the song
/// database.
///
/// Matching a filter against a `Song` is total: absent metadata (an unknown
/// modification time, a stream without a decoded audio format) simply fails
/// the filter nodes that inspect it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Song {
    /// Path of the song relative to the library root, without a scheme.
    pub uri: String,
    /// Tag values of the song. A tag may carry multiple values.
    pub tags: HashMap<Tag, Vec<String>>,
    /// Last modification time of the underlying file.
    pub last_modified: Option<DateTime<Utc>>,
    /// Time the song was added to the database.
    pub added: Option<DateTime<Utc>>,
    /// Decoded audio format, if known.
    pub audio_format: Option<AudioFormat>,
    /// Queue priority, defaults to 0.
    pub priority: u8,
}

impl Song {
    /// Returns all values of the given tag, or an empty slice if the song
    /// doesn't have it.
    pub fn tag_values(&self, tag: Tag) -> &[String] {
        match self.tags.get(&tag) {
            Some(v) => v.as_slice(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_values() {
        let song = Song {
            uri: String::from("foo.flac"),
            tags: [(Tag::Artist, vec![String::from("a"), String::from("b")])].into(),
            ..Song::default()
        };

        assert_eq!(song.tag_values(Tag::Artist), ["a", "b"]);
        assert_eq!(song.tag_values(Tag::Title), Vec::<String>::new());
    }
}
