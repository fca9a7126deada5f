//! Sample ids and tracks shared by the integration tests.

use rusty_dj::player::Track;
use serenity::all::{ChannelId, GuildId};

pub const GUILD: GuildId = GuildId::new(1111);
pub const VOICE_A: ChannelId = ChannelId::new(2221);
pub const VOICE_B: ChannelId = ChannelId::new(2222);
pub const TEXT: ChannelId = ChannelId::new(3331);

pub fn track(id: &str, duration_secs: u64) -> Track {
    Track::new(
        format!("https://www.youtube.com/watch?v={id}"),
        &format!("Song {id}"),
        duration_secs,
    )
}

/// Tracks `a`, `b`, `c`, ... with ten second durations.
pub fn tracks(count: usize) -> Vec<Track> {
    (b'a'..)
        .take(count)
        .map(|c| track(&(c as char).to_string(), 10))
        .collect()
}

pub fn stream_url(track: &Track) -> String {
    format!("{}#stream", track.source_ref())
}
