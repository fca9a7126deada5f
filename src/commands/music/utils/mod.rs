use poise::serenity_prelude as serenity;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::time::Duration;

use crate::Context;
use crate::player::{MusicError, MusicResult, SessionHandle};

pub mod embedded_messages;
pub mod status_messages;
pub mod voice_output;

/// Format a duration into a human-readable string (e.g., "3:45" or "1:23:45")
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Get the voice channel ID that the user is currently in
pub fn user_voice_channel(
    ctx: &serenity::Context,
    guild_id: GuildId,
    user_id: UserId,
) -> MusicResult<ChannelId> {
    let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

    guild
        .voice_states
        .get(&user_id)
        .and_then(|voice_state| voice_state.channel_id)
        .ok_or(MusicError::UserNotInVoiceChannel)
}

/// The session of the guild the command was invoked in, created on first use.
pub fn guild_session(ctx: Context<'_>) -> MusicResult<SessionHandle> {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;
    Ok(ctx.data().sessions.get_or_create(guild_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "0:00")]
    #[test_case(59, "0:59")]
    #[test_case(225, "3:45")]
    #[test_case(3600, "1:00:00")]
    #[test_case(5025, "1:23:45")]
    fn formats_durations(secs: u64, expected: &str) {
        assert_eq!(format_duration(Duration::from_secs(secs)), expected);
    }
}
