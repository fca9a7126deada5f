use super::*;

/// Stop the music, clear the queue, and leave the voice channel
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;
    session.stop().await?;

    ctx.send(embedded_messages::stopped()).await?;

    Ok(())
}
