// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use rss::extension::itunes::{
    ITunesCategoryBuilder, ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder,
    ITunesOwnerBuilder,
};
use rss::{
    CategoryBuilder, Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder,
    ItemBuilder,
};
use url::Url;

use crate::config::FeedConfig;
use crate::error::FeedError;

/// Everything the serializer needs to render one feed item
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// Display title, already prefixed and numbered
    pub title: String,
    pub description: String,
    /// Enclosure URL; doubles as the item guid
    pub enclosure_url: Url,
    pub enclosure_length: u64,
    pub pub_date: DateTime<Utc>,
    /// Per-episode artwork, or the channel cover as fallback
    pub image_url: String,
    pub duration: Option<String>,
}

/// Resolve a filename against a base URL, percent-encoding as needed.
///
/// The base is normalized to end with a slash so the filename is
/// appended instead of replacing the last path segment.
pub fn media_url(base: &str, filename: &str) -> Result<Url, FeedError> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };

    let base_url = Url::parse(&normalized).map_err(|e| FeedError::InvalidBaseUrl {
        url: base.to_string(),
        source: e,
    })?;

    base_url.join(filename).map_err(|e| FeedError::InvalidBaseUrl {
        url: format!("{}{}", normalized, filename),
        source: e,
    })
}

/// Assemble the complete RSS channel from config and prepared items
pub fn build_channel(config: &FeedConfig, items: &[FeedItem]) -> Channel {
    let explicit = explicit_label(config.explicit).to_string();

    let itunes_categories = config
        .categories
        .iter()
        .map(|category| {
            let mut builder = ITunesCategoryBuilder::default();
            builder.text(category.name.clone());
            if let Some(sub) = &category.subcategory {
                builder.subcategory(Some(Box::new(
                    ITunesCategoryBuilder::default().text(sub.clone()).build(),
                )));
            }
            builder.build()
        })
        .collect::<Vec<_>>();

    let plain_categories = config
        .categories
        .iter()
        .map(|category| CategoryBuilder::default().name(category.name.clone()).build())
        .collect::<Vec<_>>();

    let owner = match (&config.owner_name, &config.owner_email) {
        (None, None) => None,
        (name, email) => Some(
            ITunesOwnerBuilder::default()
                .name(name.clone())
                .email(email.clone())
                .build(),
        ),
    };

    let itunes_ext = ITunesChannelExtensionBuilder::default()
        .author(Some(config.author.clone()))
        .summary(Some(config.description.clone()))
        .explicit(Some(explicit.clone()))
        .image(Some(config.cover_image_url.clone()))
        .owner(owner)
        .categories(itunes_categories)
        .r#type(Some("episodic".to_string()))
        .build();

    let image = ImageBuilder::default()
        .url(config.cover_image_url.clone())
        .title(config.title.clone())
        .link(config.link.clone())
        .build();

    let rss_items = items
        .iter()
        .map(|item| build_item(item, &explicit, &config.link))
        .collect::<Vec<_>>();

    ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.link.clone())
        .description(config.description.clone())
        .language(Some(config.language.clone()))
        .copyright(config.copyright.clone())
        .itunes_ext(Some(itunes_ext))
        .image(Some(image))
        .categories(plain_categories)
        .items(rss_items)
        .build()
}

fn build_item(item: &FeedItem, explicit: &str, channel_link: &str) -> rss::Item {
    let enclosure = EnclosureBuilder::default()
        .url(item.enclosure_url.to_string())
        .length(item.enclosure_length.to_string())
        .mime_type("audio/mpeg".to_string())
        .build();

    let guid = GuidBuilder::default()
        .value(item.enclosure_url.to_string())
        .permalink(true)
        .build();

    let itunes_ext = ITunesItemExtensionBuilder::default()
        .image(Some(item.image_url.clone()))
        .explicit(Some(explicit.to_string()))
        .duration(item.duration.clone())
        .build();

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(channel_link.to_string()))
        .description(Some(item.description.clone()))
        .enclosure(Some(enclosure))
        .guid(Some(guid))
        .pub_date(Some(item.pub_date.to_rfc2822()))
        .itunes_ext(Some(itunes_ext))
        .build()
}

fn explicit_label(explicit: bool) -> &'static str {
    if explicit { "true" } else { "false" }
}
