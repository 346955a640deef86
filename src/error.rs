use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the feed configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when scanning the audio directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Audio directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No MP3 files found in {0}")]
    NoAudioFiles(PathBuf),
}

/// Errors that can occur when reading ID3 tags from an audio file
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Failed to read ID3 tags from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },
}

/// Errors that can occur when processing episode artwork
#[derive(Error, Debug)]
pub enum ArtworkError {
    #[error("Failed to decode embedded artwork: {0}")]
    DecodeFailed(#[source] image::ImageError),

    #[error("Failed to encode artwork as JPEG: {0}")]
    EncodeFailed(#[source] image::ImageError),

    #[error("Failed to create artwork directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artwork file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when building or writing the RSS feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to serialize RSS feed: {0}")]
    SerializeFailed(#[from] rss::Error),

    #[error("Failed to write feed file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors for feed generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Artwork error: {0}")]
    Artwork(#[from] ArtworkError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
}
