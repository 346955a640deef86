use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{imageops, Rgb, RgbImage};

use crate::error::ArtworkError;

/// JPEG quality for normalized artwork; visually lossless for covers
const JPEG_QUALITY: u8 = 85;

/// Filename for an episode's artwork, zero-padded to two digits
pub fn artwork_filename(episode_number: u32) -> String {
    format!("cover-{:02}.jpg", episode_number)
}

/// Normalize embedded cover art onto a square canvas.
///
/// The image is scaled to fit within `size` x `size` preserving its
/// aspect ratio, centered on a black canvas, and encoded as JPEG.
pub fn letterbox_to_square(data: &[u8], size: u32) -> Result<Vec<u8>, ArtworkError> {
    let decoded = image::load_from_memory(data).map_err(ArtworkError::DecodeFailed)?;

    let scaled = decoded.resize(size, size, FilterType::Lanczos3).to_rgb8();

    let mut canvas = RgbImage::from_pixel(size, size, Rgb([0, 0, 0]));
    let x = (size - scaled.width()) / 2;
    let y = (size - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));

    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
    canvas
        .write_with_encoder(encoder)
        .map_err(ArtworkError::EncodeFailed)?;

    Ok(encoded)
}

/// Write normalized artwork for an episode into the artwork directory.
///
/// An existing file is kept untouched unless `overwrite` is set, so
/// repeated runs do not re-encode every cover. Returns the written
/// path, or `None` when the existing file was kept.
pub fn write_episode_artwork(
    data: &[u8],
    artwork_dir: &Path,
    episode_number: u32,
    size: u32,
    overwrite: bool,
) -> Result<Option<PathBuf>, ArtworkError> {
    let path = artwork_dir.join(artwork_filename(episode_number));

    if path.exists() && !overwrite {
        return Ok(None);
    }

    let encoded = letterbox_to_square(data, size)?;
    std::fs::write(&path, encoded).map_err(|e| ArtworkError::WriteFailed {
        path: path.clone(),
        source: e,
    })?;

    Ok(Some(path))
}

/// Create the artwork directory if it does not exist yet
pub fn ensure_artwork_dir(artwork_dir: &Path) -> Result<(), ArtworkError> {
    std::fs::create_dir_all(artwork_dir).map_err(|e| ArtworkError::CreateDirectoryFailed {
        path: artwork_dir.to_path_buf(),
        source: e,
    })
}
