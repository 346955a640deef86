mod build;
mod write;

pub use build::{FeedItem, build_channel, media_url};
pub use write::{feed_to_string, write_feed};
