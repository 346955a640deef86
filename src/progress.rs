use std::sync::Arc;

/// Events emitted during feed generation for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The audio directory is being scanned for MP3 files
    ScanningDirectory { path: String },

    /// The directory scan finished
    DirectoryScanned { file_count: usize },

    /// Tags are being read from an audio file
    ReadingTags {
        filename: String,
        /// Index of this file in the scan order
        file_index: usize,
        /// Total number of files being read
        total_files: usize,
    },

    /// A file produced a non-fatal warning (unreadable tags, shadowed
    /// episode number, missing summary, broken artwork)
    FileWarning { filename: String, message: String },

    /// A file was left out of the feed entirely
    FileSkipped { filename: String, reason: String },

    /// All usable episodes have been collected and dated
    EpisodesPlanned { episode_count: usize },

    /// Episode artwork was written to the artwork directory
    ArtworkWritten {
        episode_number: u32,
        filename: String,
    },

    /// The feed document was written
    FeedWritten {
        path: String,
        episode_count: usize,
    },

    /// Feed generation completed
    GenerationCompleted {
        episode_count: usize,
        skipped_count: usize,
        artwork_count: usize,
    },
}

/// Trait for reporting progress events during feed generation.
///
/// Implementations can use this to display progress bars, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
