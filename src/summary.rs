use std::path::Path;

/// Standard header prepended to every episode description
pub fn episode_header(
    prefix: &str,
    episode_number: u32,
    title: &str,
    author: &str,
    podcast_title: &str,
) -> String {
    format!(
        "{} #{}: {}\nArtist: {}\n{}",
        prefix, episode_number, title, author, podcast_title
    )
}

/// Load the hand-written summary for an episode, if one exists.
///
/// Summaries live as `summary-NNN.txt` (zero-padded to three digits)
/// in the summaries directory. A missing or empty file yields `None`;
/// the caller decides whether that is worth a warning.
pub fn read_summary(summaries_dir: &Path, episode_number: u32) -> Option<String> {
    let path = summaries_dir.join(format!("summary-{:03}.txt", episode_number));
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
