use std::time::Duration;

/// Longest title kept for display, ellipsis included.
pub const MAX_TITLE_CHARS: usize = 245;

const ELLIPSIS: &str = "...";
const UNKNOWN_TITLE: &str = "Unknown Title";

/// A resolved, playable queue entry.
///
/// `source_ref` is the canonical page URL of the track. Stream URLs handed out
/// by the resolver expire, so the controller re-resolves `source_ref` right
/// before a track starts instead of storing a stream URL here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    source_ref: String,
    title: String,
    duration: Duration,
}

impl Track {
    pub fn new(source_ref: impl Into<String>, title: &str, duration_secs: u64) -> Self {
        Self {
            source_ref: source_ref.into(),
            title: clamp_title(title),
            duration: Duration::from_secs(duration_secs),
        }
    }

    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `Duration::ZERO` when the length is unknown (live streams, missing metadata).
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

fn clamp_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return UNKNOWN_TITLE.to_string();
    }

    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }

    let mut clamped: String = title
        .chars()
        .take(MAX_TITLE_CHARS - ELLIPSIS.len())
        .collect();
    clamped.push_str(ELLIPSIS);
    clamped
}
