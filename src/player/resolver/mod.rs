//! Turns user queries into tracks and tracks into fresh stream URLs.

/// `yt-dlp` backed implementation.
pub mod ytdlp;

use serenity::async_trait;
use url::Url;

use super::error::{MusicError, MusicResult};
use super::track::Track;

/// A playlist entry that could not be resolved.
#[derive(Debug)]
pub struct EntryFailure {
    /// The entry URL, or whatever identified it in the playlist listing.
    pub reference: String,
    pub error: MusicError,
}

/// Outcome of resolving one query: the playable tracks in order, plus the
/// entries that were skipped because they failed.
#[derive(Debug, Default)]
pub struct Resolution {
    pub tracks: Vec<Track>,
    pub failures: Vec<EntryFailure>,
}

impl Resolution {
    pub fn single(track: Track) -> Self {
        Self {
            tracks: vec![track],
            failures: Vec::new(),
        }
    }
}

/// Resolution backend used by the controller.
///
/// Both calls perform network I/O and suspend the calling task; neither
/// retries.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    /// Expand a direct URL, playlist URL or free-text search into tracks.
    async fn resolve(&self, query: &str) -> MusicResult<Resolution>;

    /// Fetch a fresh, short-lived stream URL for a track's `source_ref`.
    async fn refresh_stream_url(&self, source_ref: &str) -> MusicResult<String>;
}

/// Performs a basic check if the input string can be parsed as a URL.
pub fn is_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true ; "watch url")]
    #[test_case("https://www.youtube.com/playlist?list=PL123", true ; "playlist url")]
    #[test_case("http://youtu.be/dQw4w9WgXcQ", true ; "short url")]
    #[test_case("never gonna give you up", false ; "free text")]
    #[test_case("ytsearch:lofi", false ; "search prefix")]
    #[test_case("ftp://example.com/song.mp3", false ; "unsupported scheme")]
    fn detects_urls(input: &str, expected: bool) {
        assert_eq!(is_url(input), expected);
    }
}
