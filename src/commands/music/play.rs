use super::*;
use crate::commands::music::utils::user_voice_channel;
use crate::player::MusicError;
use tracing::{error, info};

/// Play a song or playlist from a URL, or search YouTube
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"]
    #[rest]
    query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;

    if query.trim().is_empty() {
        let err = MusicError::InvalidArgument("give me a URL or something to search for".into());
        ctx.send(embedded_messages::error(&err)).await?;
        return Ok(());
    }

    let channel_id = match user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id) {
        Ok(channel_id) => channel_id,
        Err(err) => {
            ctx.send(embedded_messages::error(&err)).await?;
            return Ok(());
        }
    };

    // Resolving a playlist can take a while
    ctx.defer().await?;

    let session = guild_session(ctx)?;
    match session.enqueue(channel_id, &query, ctx.channel_id()).await {
        Ok(report) => {
            ctx.send(embedded_messages::enqueued(&report)).await?;
        }
        Err(err) => {
            error!("Failed to queue '{}' in guild {}: {}", query, guild_id, err);
            ctx.send(embedded_messages::error(&err)).await?;
        }
    }

    Ok(())
}
