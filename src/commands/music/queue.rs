use super::*;
use crate::player::{MusicError, QueueView};

/// View the current music queue
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;

    // Reading never starts a session
    let reply = match ctx.data().sessions.get(guild_id) {
        Some(session) => embedded_messages::music_queue(&session.queue_view()),
        None => {
            embedded_messages::music_queue(&QueueView::empty(ctx.data().config.default_gain()))
        }
    };
    ctx.send(reply).await?;

    Ok(())
}
