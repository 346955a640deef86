// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::Anchor;
use crate::error::ConfigError;

/// Default pixel size for the square episode artwork canvas. Apple
/// Podcasts requires at least 1400x1400 and recommends 3000x3000.
pub const DEFAULT_ARTWORK_SIZE: u32 = 3000;

/// A hand-curated (episode number, date) fact in the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnchorEntry {
    pub episode: u32,
    pub date: NaiveDate,
}

/// An iTunes category with an optional subcategory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

/// Channel-level settings and the episode date anchor table.
///
/// Loaded from a JSON file; every field has a default so a partial
/// config only needs to name what differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Podcast title
    pub title: String,
    /// Channel link shown by podcast clients
    pub link: String,
    /// Channel description and itunes:summary
    pub description: String,
    /// RSS language code
    pub language: String,
    /// itunes:author
    pub author: String,
    /// itunes:explicit flag
    pub explicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    /// iTunes categories, each with an optional subcategory
    pub categories: Vec<Category>,
    /// Base URL under which the MP3 files are served
    pub media_base_url: String,
    /// Channel cover image, also the fallback episode image
    pub cover_image_url: String,
    /// Base URL under which extracted episode artwork is served
    pub artwork_base_url: String,
    /// Square canvas size for normalized episode artwork, in pixels
    pub artwork_size: u32,
    /// Prefix for item titles: "<prefix> #NN: <raw title>"
    pub episode_prefix: String,
    /// Known-correct episode dates driving interpolation
    pub anchors: Vec<AnchorEntry>,
    /// Directory holding per-episode summary-NNN.txt files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries_dir: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "My Podcast".to_string(),
            link: "https://example.com/podcast".to_string(),
            description: "A podcast generated from a directory of MP3 files.".to_string(),
            language: "en-us".to_string(),
            author: "Unknown Author".to_string(),
            explicit: false,
            copyright: None,
            owner_name: None,
            owner_email: None,
            categories: vec![],
            media_base_url: "https://example.com/podcast/media/".to_string(),
            cover_image_url: "https://example.com/podcast/cover.jpg".to_string(),
            artwork_base_url: "https://example.com/podcast/episode_artwork/".to_string(),
            artwork_size: DEFAULT_ARTWORK_SIZE,
            episode_prefix: "Episode".to_string(),
            anchors: vec![],
            summaries_dir: None,
        }
    }
}

impl FeedConfig {
    /// Convert the configured anchor table into interpolator anchors
    pub fn anchor_points(&self) -> Vec<Anchor> {
        self.anchors
            .iter()
            .map(|entry| Anchor::new(entry.episode, entry.date))
            .collect()
    }
}

/// Read a feed configuration from a JSON file
pub fn read_feed_config(path: &Path) -> Result<FeedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_no_anchors() {
        let config = FeedConfig::default();

        assert!(config.anchors.is_empty());
        assert!(config.anchor_points().is_empty());
        assert_eq!(config.artwork_size, DEFAULT_ARTWORK_SIZE);
        assert_eq!(config.language, "en-us");
        assert!(!config.explicit);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("podforge.json");
        std::fs::write(
            &path,
            r#"{
                "title": "Dhamma on Air",
                "author": "Samahita Thera",
                "anchors": [
                    { "episode": 3, "date": "2015-12-12" },
                    { "episode": 22, "date": "2016-05-15" }
                ]
            }"#,
        )
        .unwrap();

        let config = read_feed_config(&path).unwrap();

        assert_eq!(config.title, "Dhamma on Air");
        assert_eq!(config.author, "Samahita Thera");
        assert_eq!(config.language, "en-us");
        assert_eq!(config.anchors.len(), 2);

        let anchors = config.anchor_points();
        assert_eq!(anchors[0].number, 3);
        assert_eq!(
            anchors[1].date,
            NaiveDate::from_ymd_opt(2016, 5, 15).unwrap()
        );
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = FeedConfig::default();
        config.title = "Test Feed".to_string();
        config.owner_email = Some("owner@example.com".to_string());
        config.categories = vec![Category {
            name: "Religion & Spirituality".to_string(),
            subcategory: Some("Buddhism".to_string()),
        }];
        config.anchors = vec![AnchorEntry {
            episode: 7,
            date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        }];

        let json = serde_json::to_string_pretty(&config).unwrap();
        let read_back: FeedConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(read_back.title, "Test Feed");
        assert_eq!(read_back.owner_email, Some("owner@example.com".to_string()));
        assert_eq!(read_back.categories.len(), 1);
        assert_eq!(
            read_back.categories[0].subcategory,
            Some("Buddhism".to_string())
        );
        assert_eq!(read_back.anchors[0].episode, 7);
    }

    #[test]
    fn read_nonexistent_config_returns_error() {
        let dir = tempdir().unwrap();
        let result = read_feed_config(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }

    #[test]
    fn read_invalid_json_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = read_feed_config(&path);
        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }
}
