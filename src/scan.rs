use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// List the MP3 files in the audio directory, sorted by filename.
///
/// The extension match is case-insensitive. An existing but empty
/// directory (no MP3 files at all) is an error: there is nothing to
/// build a feed from.
pub fn list_audio_files(audio_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !audio_dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(audio_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(audio_dir).map_err(|e| ScanError::ReadDirectoryFailed {
        path: audio_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::ReadDirectoryFailed {
            path: audio_dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file() && is_mp3(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ScanError::NoAudioFiles(audio_dir.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// Extract an episode number from a leading digit run in the filename.
///
/// "042 Some Title.mp3" parses to 42. Used as the fallback when a file
/// carries no usable track number in its tags.
pub fn episode_number_from_filename(filename: &str) -> Option<u32> {
    let digits: String = filename.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
