//! Metadata tags.

use std::{error::Error, fmt};

/// Tags which can be set on a [`Song`].
///
/// Tag names are resolved ASCII-case-insensitively; the canonical spelling
/// produced by [`as_str`] (and used when serializing filter expressions) is
/// all-lowercase.
///
/// The enum is marked as non-exhaustive, so additional tags may be added
/// without breaking compatibility.
///
/// [`Song`]: crate::song::Song
/// [`as_str`]: Tag::as_str
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum Tag {
    Album,
    AlbumArtist,
    AlbumArtistSort,
    AlbumSort,
    Artist,
    ArtistSort,
    Comment,
    Composer,
    ComposerSort,
    Conductor,
    Date,
    Disc,
    Ensemble,
    Genre,
    Grouping,
    Label,
    Location,
    Mood,
    Movement,
    MovementNumber,
    MusicBrainzArtistId,
    MusicBrainzRecordingId,
    MusicBrainzReleaseArtistId,
    MusicBrainzReleaseId,
    MusicBrainzTrackId,
    MusicBrainzWorkId,
    Name,
    OriginalDate,
    Performer,
    Title,
    TitleSort,
    Track,
    Work,
}

impl Tag {
    /// Returns the canonical spelling of the tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Album => "album",
            Tag::AlbumArtist => "albumartist",
            Tag::AlbumArtistSort => "albumartistsort",
            Tag::AlbumSort => "albumsort",
            Tag::Artist => "artist",
            Tag::ArtistSort => "artistsort",
            Tag::Comment => "comment",
            Tag::Composer => "composer",
            Tag::ComposerSort => "composersort",
            Tag::Conductor => "conductor",
            Tag::Date => "date",
            Tag::Disc => "disc",
            Tag::Ensemble => "ensemble",
            Tag::Genre => "genre",
            Tag::Grouping => "grouping",
            Tag::Label => "label",
            Tag::Location => "location",
            Tag::Mood => "mood",
            Tag::Movement => "movement",
            Tag::MovementNumber => "movementnumber",
            Tag::MusicBrainzArtistId => "musicbrainz_artistid",
            Tag::MusicBrainzRecordingId => "musicbrainz_trackid",
            Tag::MusicBrainzReleaseArtistId => "musicbrainz_albumartistid",
            Tag::MusicBrainzReleaseId => "musicbrainz_albumid",
            Tag::MusicBrainzTrackId => "musicbrainz_releasetrackid",
            Tag::MusicBrainzWorkId => "musicbrainz_workid",
            Tag::Name => "name",
            Tag::OriginalDate => "originaldate",
            Tag::Performer => "performer",
            Tag::Title => "title",
            Tag::TitleSort => "titlesort",
            Tag::Track => "track",
            Tag::Work => "work",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! match_ignore_case {
    ($raw:ident, $($pattern:literal => $result:expr),+) => {
        $(
            if $raw.eq_ignore_ascii_case($pattern) {
                return Ok($result);
            }
        )+
    };
}

impl<'a> TryFrom<&'a str> for Tag {
    type Error = TagError;

    fn try_from(raw: &'a str) -> Result<Self, Self::Error> {
        if raw.is_empty() {
            return Err(TagError::Empty);
        } else if let Some((pos, chr)) = raw
            .char_indices()
            .find(|&(_, ch)| !(ch.is_ascii_alphabetic() || ch == '_' || ch == '-'))
        {
            return Err(TagError::InvalidCharacter { chr, pos });
        }

        match_ignore_case! {
            raw,
            "album" => Self::Album,
            "albumartist" => Self::AlbumArtist,
            "albumartistsort" => Self::AlbumArtistSort,
            "albumsort" => Self::AlbumSort,
            "artist" => Self::Artist,
            "artistsort" => Self::ArtistSort,
            "comment" => Self::Comment,
            "composer" => Self::Composer,
            "composersort" => Self::ComposerSort,
            "conductor" => Self::Conductor,
            "date" => Self::Date,
            "disc" => Self::Disc,
            "ensemble" => Self::Ensemble,
            "genre" => Self::Genre,
            "grouping" => Self::Grouping,
            "label" => Self::Label,
            "location" => Self::Location,
            "mood" => Self::Mood,
            "movement" => Self::Movement,
            "movementnumber" => Self::MovementNumber,
            "musicbrainz_artistid" => Self::MusicBrainzArtistId,
            "musicbrainz_trackid" => Self::MusicBrainzRecordingId,
            "musicbrainz_albumartistid" => Self::MusicBrainzReleaseArtistId,
            "musicbrainz_albumid" => Self::MusicBrainzReleaseId,
            "musicbrainz_releasetrackid" => Self::MusicBrainzTrackId,
            "musicbrainz_workid" => Self::MusicBrainzWorkId,
            "name" => Self::Name,
            "originaldate" => Self::OriginalDate,
            "performer" => Self::Performer,
            "title" => Self::Title,
            "titlesort" => Self::TitleSort,
            "track" => Self::Track,
            "work" => Self::Work
        }

        Err(TagError::Unknown(raw.into()))
    }
}

/// Errors that may occur when attempting to create a [`Tag`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagError {
    /// The raw tag was empty.
    Empty,
    /// The raw tag contained an invalid character.
    InvalidCharacter {
        /// The character.
        chr: char,
        /// Byte position of `chr`.
        pos: usize,
    },
    /// The raw tag is not a known tag name.
    Unknown(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty tag"),
            Self::InvalidCharacter { chr, pos } => {
                write!(f, "invalid character {:?} at index {}", chr, pos)
            }
            Self::Unknown(raw) => write!(f, "unknown tag name {:?}", raw),
        }
    }
}

impl Error for TagError {}
