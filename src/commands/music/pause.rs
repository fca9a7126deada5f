use super::*;

/// Pause the current track
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;

    let reply = match session.pause().await? {
        Some(track) => embedded_messages::paused(&track),
        None => embedded_messages::no_track_playing(),
    };
    ctx.send(reply).await?;

    Ok(())
}

/// Resume a paused track
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;

    let reply = match session.resume().await? {
        Some(track) => embedded_messages::resumed(&track),
        None => embedded_messages::not_paused(),
    };
    ctx.send(reply).await?;

    Ok(())
}
