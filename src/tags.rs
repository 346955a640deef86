use std::path::Path;

use id3::{Tag, TagLike};
use lofty::file::AudioFile;
use lofty::probe::Probe;

use crate::error::TagError;

/// Embedded cover art pulled from an APIC frame
#[derive(Debug, Clone)]
pub struct EmbeddedArtwork {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// The episode facts extractable from a file's ID3 tags
#[derive(Debug, Clone, Default)]
pub struct EpisodeTags {
    /// TIT2 title
    pub title: Option<String>,
    /// TRCK track number; "5/12" style values yield the track part
    pub track: Option<u32>,
    /// Labeled lines assembled from the descriptive frames
    pub description: Option<String>,
    /// First embedded picture, if any
    pub artwork: Option<EmbeddedArtwork>,
}

/// Read the episode-relevant ID3 tags from an audio file.
///
/// A file without any ID3 tag is not an error; it simply yields empty
/// tags and the caller falls back to filename parsing.
pub fn read_episode_tags(path: &Path) -> Result<EpisodeTags, TagError> {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => return Ok(EpisodeTags::default()),
        Err(e) => {
            return Err(TagError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let artwork = tag.pictures().next().map(|picture| EmbeddedArtwork {
        data: picture.data.clone(),
        mime_type: picture.mime_type.clone(),
    });

    Ok(EpisodeTags {
        title: tag.title().map(String::from),
        track: tag.track(),
        description: build_description(&tag),
        artwork,
    })
}

/// Assemble a detailed description from all descriptive frames,
/// one labeled line each, in a stable order.
fn build_description(tag: &Tag) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(title) = tag.title() {
        lines.push(format!("Title: {}", title));
    }
    if let Some(artist) = tag.artist() {
        lines.push(format!("Artist: {}", artist));
    }
    if let Some(album) = tag.album() {
        lines.push(format!("Album: {}", album));
    }
    if let Some(genre) = tag.genre() {
        lines.push(format!("Genre: {}", genre));
    }
    if let Some(date) = tag.date_recorded() {
        lines.push(format!("Date: {}", date));
    }
    for comment in tag.comments() {
        if !comment.text.is_empty() {
            lines.push(format!("Comment: {}", comment.text));
        }
    }
    for lyrics in tag.lyrics() {
        if !lyrics.text.is_empty() {
            lines.push(format!("Lyrics: {}", lyrics.text));
        }
    }
    for extended in tag.extended_texts() {
        if !extended.description.is_empty() && !extended.value.is_empty() {
            lines.push(format!("{}: {}", extended.description, extended.value));
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Probe the audio duration and format it for itunes:duration.
///
/// Unreadable audio yields no duration rather than an error; the
/// element is simply omitted from the feed item.
pub fn probe_duration(path: &Path) -> Option<String> {
    let tagged_file = Probe::open(path).ok()?.read().ok()?;
    let seconds = tagged_file.properties().duration().as_secs();
    Some(format_duration(seconds))
}

/// Format seconds as "H:MM:SS", or "M:SS" under an hour
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
