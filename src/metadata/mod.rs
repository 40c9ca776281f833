//! Tag reading for playlist display.
//!
//! Uses the lofty crate. Every field is optional: a file with no tags, a
//! corrupt tag block, or an unsupported container all degrade to an
//! all-`None` record and the UI falls back to the filename and "Unknown"
//! placeholders. Extraction never returns an error to the caller.
//!
//! Field mapping differs per container (MP4 atoms, FLAC/OGG Vorbis
//! comments, ID3v2 frames), so the mapping lives in a small strategy
//! table keyed by [`Container`]: one pure `&Tag -> TagRecord` function
//! per container type.

use lofty::file::TaggedFileExt;
use lofty::picture::PictureType;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagType};
use std::path::Path;

/// Metadata for a single track. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Release date as stored in the tag (free-form, often just a year)
    pub year: Option<String>,
    pub track_number: Option<u32>,
    /// Embedded artwork bytes (front cover preferred)
    pub artwork: Option<Vec<u8>>,
}

impl TagRecord {
    /// Title for display: tag title, else the file stem.
    pub fn display_title(&self, path: &Path) -> String {
        self.title.clone().unwrap_or_else(|| {
            path.file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        })
    }

    /// Artist for display.
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown Artist")
    }

    /// Album for display.
    pub fn display_album(&self) -> &str {
        self.album.as_deref().unwrap_or("Unknown Album")
    }
}

/// Tag container family, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `.m4a` (MP4 ilst atoms)
    Mp4,
    /// `.flac` (Vorbis comments + picture blocks)
    Flac,
    /// `.ogg` (Vorbis comments)
    Vorbis,
    /// Everything else is treated as ID3v2
    Id3,
}

impl Container {
    /// Which container's mapping applies to this path.
    pub fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("m4a") => Self::Mp4,
            Some("flac") => Self::Flac,
            Some("ogg") => Self::Vorbis,
            _ => Self::Id3,
        }
    }

    /// The lofty tag type this container stores.
    fn tag_type(self) -> TagType {
        match self {
            Self::Mp4 => TagType::Mp4Ilst,
            Self::Flac | Self::Vorbis => TagType::VorbisComments,
            Self::Id3 => TagType::Id3v2,
        }
    }
}

/// A pure mapping from a parsed tag to a [`TagRecord`].
pub type TagReader = fn(&Tag) -> TagRecord;

/// Strategy table: one reader per container family.
pub fn reader_for(container: Container) -> TagReader {
    match container {
        Container::Mp4 => read_mp4,
        Container::Flac => read_flac,
        Container::Vorbis => read_vorbis,
        Container::Id3 => read_id3,
    }
}

/// Read metadata for `path`. Never fails; missing or unreadable tags
/// yield an all-`None` record.
pub fn extract(path: &Path) -> TagRecord {
    let Ok(probe) = Probe::open(path) else {
        return TagRecord::default();
    };
    let Ok(tagged_file) = probe.read() else {
        tracing::debug!("Unreadable tags in {:?}", path);
        return TagRecord::default();
    };

    let container = Container::for_path(path);
    let tag = tagged_file
        .tag(container.tag_type())
        .or_else(|| tagged_file.primary_tag())
        .or_else(|| tagged_file.first_tag());

    match tag {
        Some(tag) => reader_for(container)(tag),
        None => TagRecord::default(),
    }
}

// ============================================================================
// Per-container readers
// ============================================================================

/// MP4 ilst atoms: date is a free-form string ("©day"), track comes from
/// the "trkn" pair.
fn read_mp4(tag: &Tag) -> TagRecord {
    TagRecord {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        year: tag
            .get_string(&ItemKey::RecordingDate)
            .map(|s| s.to_string()),
        track_number: tag.track(),
        artwork: front_cover(tag),
    }
}

/// FLAC Vorbis comments: DATE holds the release date, TRACKNUMBER the
/// track; pictures come from the FLAC picture blocks.
fn read_flac(tag: &Tag) -> TagRecord {
    TagRecord {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        year: tag
            .get_string(&ItemKey::RecordingDate)
            .map(|s| s.to_string())
            .or_else(|| tag.year().map(|y| y.to_string())),
        track_number: tag.track(),
        artwork: front_cover(tag),
    }
}

/// OGG Vorbis comments: identical field names to FLAC, artwork arrives
/// as a METADATA_BLOCK_PICTURE comment which lofty exposes as a picture.
fn read_vorbis(tag: &Tag) -> TagRecord {
    TagRecord {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        year: tag
            .get_string(&ItemKey::RecordingDate)
            .map(|s| s.to_string()),
        track_number: tag.track(),
        artwork: front_cover(tag),
    }
}

/// ID3v2 frames: TDRC/TYER for the date, TRCK may carry "track/total"
/// so only the leading number counts.
fn read_id3(tag: &Tag) -> TagRecord {
    let track_number = tag
        .get_string(&ItemKey::TrackNumber)
        .and_then(|s| s.split('/').next())
        .and_then(|s| s.trim().parse::<u32>().ok())
        .or_else(|| tag.track());

    TagRecord {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        year: tag
            .year()
            .map(|y| y.to_string())
            .or_else(|| {
                tag.get_string(&ItemKey::RecordingDate)
                    .map(|s| s.to_string())
            }),
        track_number,
        artwork: front_cover(tag),
    }
}

/// Front cover bytes, falling back to the first embedded picture.
fn front_cover(tag: &Tag) -> Option<Vec<u8>> {
    let pictures = tag.pictures();
    pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
        .map(|p| p.data().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_container_for_path() {
        assert_eq!(Container::for_path(Path::new("a.m4a")), Container::Mp4);
        assert_eq!(Container::for_path(Path::new("a.M4A")), Container::Mp4);
        assert_eq!(Container::for_path(Path::new("a.flac")), Container::Flac);
        assert_eq!(Container::for_path(Path::new("a.ogg")), Container::Vorbis);
        assert_eq!(Container::for_path(Path::new("a.mp3")), Container::Id3);
        assert_eq!(Container::for_path(Path::new("a.wav")), Container::Id3);
        assert_eq!(Container::for_path(Path::new("noext")), Container::Id3);
    }

    #[test]
    fn test_extract_non_audio_file_is_all_none() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "This is just some text, not music.").expect("Failed to write");

        let record = extract(file.path());
        assert_eq!(record, TagRecord::default());
    }

    #[test]
    fn test_extract_non_existent_file_is_all_none() {
        let record = extract(Path::new("non_existent_file.mp3"));
        assert_eq!(record, TagRecord::default());
    }

    #[test]
    fn test_id3_reader_splits_track_total() {
        let mut tag = Tag::new(TagType::Id3v2);
        tag.insert_text(ItemKey::TrackNumber, "3/12".to_string());

        let record = read_id3(&tag);
        assert_eq!(record.track_number, Some(3));
    }

    #[test]
    fn test_vorbis_reader_keeps_raw_date() {
        let mut tag = Tag::new(TagType::VorbisComments);
        tag.set_title("Song".to_string());
        tag.insert_text(ItemKey::RecordingDate, "1997-05-01".to_string());

        let record = read_vorbis(&tag);
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.year.as_deref(), Some("1997-05-01"));
        assert!(record.artwork.is_none());
    }

    #[test]
    fn test_display_fallbacks() {
        let record = TagRecord::default();
        let path = Path::new("/music/07 - encore.mp3");
        assert_eq!(record.display_title(path), "07 - encore.mp3");
        assert_eq!(record.display_artist(), "Unknown Artist");
        assert_eq!(record.display_album(), "Unknown Album");
    }

    #[test]
    fn test_display_prefers_tags() {
        let record = TagRecord {
            title: Some("Encore".to_string()),
            artist: Some("Someone".to_string()),
            ..TagRecord::default()
        };
        assert_eq!(record.display_title(Path::new("x.mp3")), "Encore");
        assert_eq!(record.display_artist(), "Someone");
    }
}
