pub mod artwork;
pub mod config;
pub mod dates;
pub mod error;
pub mod feed;
pub mod generate;
pub mod progress;
pub mod scan;
pub mod summary;
pub mod tags;

// Re-export main types for convenience
pub use config::{AnchorEntry, Category, FeedConfig, read_feed_config};
pub use dates::{Anchor, assign_dates};
pub use error::{ArtworkError, ConfigError, FeedError, GenerateError, ScanError, TagError};
pub use feed::{FeedItem, build_channel, feed_to_string, write_feed};
pub use generate::{GenerateOptions, GenerateResult, generate_feed};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
