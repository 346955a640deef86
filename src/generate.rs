// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::artwork;
use crate::config::FeedConfig;
use crate::dates;
use crate::error::GenerateError;
use crate::feed::{self, FeedItem};
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::scan;
use crate::summary;
use crate::tags::{self, EmbeddedArtwork, EpisodeTags};

/// Options for feed generation
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output path for the feed document (default: feed.xml in the
    /// audio directory)
    pub output: Option<PathBuf>,
    /// Directory for extracted episode artwork (default:
    /// episode_artwork under the audio directory)
    pub artwork_dir: Option<PathBuf>,
    /// Re-encode artwork even when a file already exists
    pub overwrite_artwork: bool,
}

/// Result of a feed generation run
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Number of episodes written into the feed
    pub episode_count: usize,
    /// Number of files left out of the feed
    pub skipped: usize,
    /// Number of artwork files newly written
    pub artwork_written: usize,
    /// Where the feed document was written
    pub output_path: PathBuf,
    /// Details of skipped files (filename, reason)
    pub skipped_files: Vec<(String, String)>,
}

/// Per-file episode facts collected before serialization
#[derive(Debug, Clone)]
struct EpisodeSource {
    number: u32,
    filename: String,
    file_size: u64,
    title: String,
    tag_description: Option<String>,
    artwork: Option<EmbeddedArtwork>,
    duration: Option<String>,
}

/// Generate a podcast feed from a directory of MP3 files
///
/// This is the main entry point for the library. It:
/// 1. Scans the audio directory for MP3 files
/// 2. Reads episode facts from each file's ID3 tags, falling back to
///    filename parsing for the episode number
/// 3. Assigns publication dates from the configured anchor table
/// 4. Extracts and normalizes episode artwork
/// 5. Builds the RSS document and writes it out
pub fn generate_feed(
    audio_dir: &Path,
    config: &FeedConfig,
    options: &GenerateOptions,
    reporter: SharedProgressReporter,
) -> Result<GenerateResult, GenerateError> {
    reporter.report(ProgressEvent::ScanningDirectory {
        path: audio_dir.display().to_string(),
    });

    let files = scan::list_audio_files(audio_dir)?;

    reporter.report(ProgressEvent::DirectoryScanned {
        file_count: files.len(),
    });

    let (sources, skipped_files) = collect_sources(&files, &reporter);

    // One date per distinct episode number; files sharing a number end
    // up with the same publication date
    let now = Utc::now();
    let numbers: Vec<u32> = sources.iter().map(|source| source.number).collect();
    let assigned = dates::assign_dates(&numbers, &config.anchor_points(), now);

    reporter.report(ProgressEvent::EpisodesPlanned {
        episode_count: sources.len(),
    });

    let artwork_dir = options
        .artwork_dir
        .clone()
        .unwrap_or_else(|| audio_dir.join("episode_artwork"));
    artwork::ensure_artwork_dir(&artwork_dir)?;

    let mut artwork_written = 0;
    let mut items = Vec::with_capacity(sources.len());

    for source in &sources {
        let has_artwork = match &source.artwork {
            Some(embedded) => match artwork::write_episode_artwork(
                &embedded.data,
                &artwork_dir,
                source.number,
                config.artwork_size,
                options.overwrite_artwork,
            ) {
                Ok(Some(path)) => {
                    artwork_written += 1;
                    reporter.report(ProgressEvent::ArtworkWritten {
                        episode_number: source.number,
                        filename: path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default(),
                    });
                    true
                }
                // Existing artwork kept from a previous run
                Ok(None) => true,
                Err(e) => {
                    reporter.report(ProgressEvent::FileWarning {
                        filename: source.filename.clone(),
                        message: e.to_string(),
                    });
                    false
                }
            },
            None => false,
        };

        let image_url = if has_artwork {
            feed::media_url(
                &config.artwork_base_url,
                &artwork::artwork_filename(source.number),
            )?
            .to_string()
        } else {
            config.cover_image_url.clone()
        };

        let enclosure_url = feed::media_url(&config.media_base_url, &source.filename)?;
        let description = build_item_description(source, config, &reporter);

        items.push(FeedItem {
            title: format!(
                "{} #{:02}: {}",
                config.episode_prefix, source.number, source.title
            ),
            description,
            enclosure_url,
            enclosure_length: source.file_size,
            pub_date: assigned.get(&source.number).copied().unwrap_or(now),
            image_url,
            duration: source.duration.clone(),
        });
    }

    let channel = feed::build_channel(config, &items);
    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| audio_dir.join("feed.xml"));
    feed::write_feed(&channel, &output_path)?;

    reporter.report(ProgressEvent::FeedWritten {
        path: output_path.display().to_string(),
        episode_count: items.len(),
    });

    reporter.report(ProgressEvent::GenerationCompleted {
        episode_count: items.len(),
        skipped_count: skipped_files.len(),
        artwork_count: artwork_written,
    });

    Ok(GenerateResult {
        episode_count: items.len(),
        skipped: skipped_files.len(),
        artwork_written,
        output_path,
        skipped_files,
    })
}

/// Read tags from every scanned file and keep the ones that can be
/// keyed to an episode number, sorted by number
fn collect_sources(
    files: &[PathBuf],
    reporter: &SharedProgressReporter,
) -> (Vec<EpisodeSource>, Vec<(String, String)>) {
    let mut sources = Vec::new();
    let mut skipped_files = Vec::new();

    for (file_index, path) in files.iter().enumerate() {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        reporter.report(ProgressEvent::ReadingTags {
            filename: filename.clone(),
            file_index,
            total_files: files.len(),
        });

        let episode_tags = match tags::read_episode_tags(path) {
            Ok(episode_tags) => episode_tags,
            Err(e) => {
                reporter.report(ProgressEvent::FileWarning {
                    filename: filename.clone(),
                    message: e.to_string(),
                });
                EpisodeTags::default()
            }
        };

        let number = episode_tags
            .track
            .or_else(|| scan::episode_number_from_filename(&filename));

        let Some(number) = number else {
            let reason = "no episode number in tags or filename".to_string();
            reporter.report(ProgressEvent::FileSkipped {
                filename: filename.clone(),
                reason: reason.clone(),
            });
            skipped_files.push((filename, reason));
            continue;
        };

        let file_size = match std::fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                reporter.report(ProgressEvent::FileWarning {
                    filename: filename.clone(),
                    message: format!("Could not read file size: {}", e),
                });
                0
            }
        };

        let title = episode_tags.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| filename.clone())
        });

        sources.push(EpisodeSource {
            number,
            filename,
            file_size,
            title,
            tag_description: episode_tags.description,
            artwork: episode_tags.artwork,
            duration: tags::probe_duration(path),
        });
    }

    sources.sort_by_key(|source| source.number);
    (sources, skipped_files)
}

/// Item description: ID3-derived text, the standard header, and the
/// hand-written summary when one exists
fn build_item_description(
    source: &EpisodeSource,
    config: &FeedConfig,
    reporter: &SharedProgressReporter,
) -> String {
    let header = summary::episode_header(
        &config.episode_prefix,
        source.number,
        &source.title,
        &config.author,
        &config.title,
    );

    let summary_text = config.summaries_dir.as_deref().and_then(|dir| {
        let text = summary::read_summary(dir, source.number);
        if text.is_none() {
            reporter.report(ProgressEvent::FileWarning {
                filename: source.filename.clone(),
                message: format!("No summary file for episode {}", source.number),
            });
        }
        text
    });

    let mut parts = Vec::new();
    if let Some(tag_description) = &source.tag_description {
        parts.push(tag_description.clone());
    }
    parts.push(header);
    if let Some(summary_text) = summary_text {
        parts.push(summary_text);
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AnchorEntry;
    use crate::progress::NoopReporter;
    use chrono::NaiveDate;
    use id3::frame::{Picture, PictureType};
    use id3::{Tag, TagLike, Version};
    use image::{Rgb, RgbImage};
    use rss::Channel;
    use tempfile::tempdir;

    fn write_mp3(dir: &Path, filename: &str, build: Option<&dyn Fn(&mut Tag)>) -> PathBuf {
        let path = dir.join(filename);
        std::fs::write(&path, vec![0u8; 256]).unwrap();
        if let Some(build) = build {
            let mut tag = Tag::new();
            build(&mut tag);
            tag.write_to_path(&path, Version::Id3v24).unwrap();
        }
        path
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(16, 16, Rgb([30, 200, 30]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    fn read_channel(path: &Path) -> Channel {
        let bytes = std::fs::read(path).unwrap();
        Channel::read_from(bytes.as_slice()).unwrap()
    }

    #[test]
    fn generates_feed_from_tagged_files() {
        let dir = tempdir().unwrap();
        write_mp3(
            dir.path(),
            "a.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(2);
                tag.set_title("Second Talk");
            }),
        );
        write_mp3(
            dir.path(),
            "b.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(1);
                tag.set_title("First Talk");
            }),
        );

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        assert_eq!(result.episode_count, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.output_path, dir.path().join("feed.xml"));

        let channel = read_channel(&result.output_path);
        assert_eq!(channel.items().len(), 2);
        // Sorted by episode number, not by filename
        assert_eq!(channel.items()[0].title(), Some("Episode #01: First Talk"));
        assert_eq!(channel.items()[1].title(), Some("Episode #02: Second Talk"));
        assert!(channel.items()[0].pub_date().is_some());
    }

    #[test]
    fn filename_number_is_used_when_tags_are_missing() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "07 Untagged Talk.mp3", None);

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        assert_eq!(result.episode_count, 1);

        let channel = read_channel(&result.output_path);
        assert_eq!(
            channel.items()[0].title(),
            Some("Episode #07: 07 Untagged Talk")
        );
    }

    #[test]
    fn unnumbered_files_are_skipped_with_reason() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "01 Kept.mp3", None);
        write_mp3(dir.path(), "notes.mp3", None);

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        assert_eq!(result.episode_count, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.skipped_files[0].0, "notes.mp3");
    }

    #[test]
    fn anchored_episode_gets_pinned_date() {
        let dir = tempdir().unwrap();
        write_mp3(
            dir.path(),
            "a.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(3);
                tag.set_title("Anchored");
            }),
        );

        let mut config = FeedConfig::default();
        config.anchors = vec![AnchorEntry {
            episode: 3,
            date: NaiveDate::from_ymd_opt(2015, 12, 12).unwrap(),
        }];

        let result = generate_feed(
            dir.path(),
            &config,
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        let channel = read_channel(&result.output_path);
        let pub_date = channel.items()[0].pub_date().unwrap();
        assert!(pub_date.contains("12 Dec 2015"), "got {}", pub_date);
    }

    #[test]
    fn artwork_is_extracted_and_referenced() {
        let dir = tempdir().unwrap();
        let artwork = png_bytes();
        write_mp3(
            dir.path(),
            "a.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(5);
                tag.set_title("With Art");
                tag.add_frame(Picture {
                    mime_type: "image/png".to_string(),
                    picture_type: PictureType::CoverFront,
                    description: String::new(),
                    data: artwork.clone(),
                });
            }),
        );

        let mut config = FeedConfig::default();
        config.artwork_size = 32;

        let result = generate_feed(
            dir.path(),
            &config,
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        assert_eq!(result.artwork_written, 1);
        assert!(dir.path().join("episode_artwork").join("cover-05.jpg").exists());

        let channel = read_channel(&result.output_path);
        let itunes = channel.items()[0].itunes_ext().unwrap();
        assert_eq!(
            itunes.image(),
            Some("https://example.com/podcast/episode_artwork/cover-05.jpg")
        );
    }

    #[test]
    fn episodes_without_artwork_inherit_channel_cover() {
        let dir = tempdir().unwrap();
        write_mp3(
            dir.path(),
            "a.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(1);
            }),
        );

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        let channel = read_channel(&result.output_path);
        let itunes = channel.items()[0].itunes_ext().unwrap();
        assert_eq!(itunes.image(), Some("https://example.com/podcast/cover.jpg"));
    }

    #[test]
    fn summary_file_is_appended_to_description() {
        let dir = tempdir().unwrap();
        let summaries = tempdir().unwrap();
        std::fs::write(
            summaries.path().join("summary-004.txt"),
            "A talk about patience.",
        )
        .unwrap();

        write_mp3(
            dir.path(),
            "a.mp3",
            Some(&|tag: &mut Tag| {
                tag.set_track(4);
                tag.set_title("Patience");
            }),
        );

        let mut config = FeedConfig::default();
        config.summaries_dir = Some(summaries.path().to_path_buf());

        let result = generate_feed(
            dir.path(),
            &config,
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        let channel = read_channel(&result.output_path);
        let description = channel.items()[0].description().unwrap();
        assert!(description.contains("Episode #4: Patience"));
        assert!(description.contains("A talk about patience."));
    }

    #[test]
    fn output_path_override_is_respected() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_mp3(dir.path(), "01 Talk.mp3", None);

        let options = GenerateOptions {
            output: Some(out.path().join("custom.xml")),
            ..Default::default()
        };

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &options,
            NoopReporter::shared(),
        )
        .unwrap();

        assert_eq!(result.output_path, out.path().join("custom.xml"));
        assert!(result.output_path.exists());
        assert!(!dir.path().join("feed.xml").exists());
    }

    #[test]
    fn empty_directory_returns_scan_error() {
        let dir = tempdir().unwrap();

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        );

        assert!(matches!(result, Err(GenerateError::Scan(_))));
    }

    #[test]
    fn enclosure_urls_are_percent_encoded() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "01 Two Words.mp3", None);

        let result = generate_feed(
            dir.path(),
            &FeedConfig::default(),
            &GenerateOptions::default(),
            NoopReporter::shared(),
        )
        .unwrap();

        let channel = read_channel(&result.output_path);
        let enclosure = channel.items()[0].enclosure().unwrap();
        assert_eq!(
            enclosure.url(),
            "https://example.com/podcast/media/01%20Two%20Words.mp3"
        );
    }
}
