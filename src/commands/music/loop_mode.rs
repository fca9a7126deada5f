use super::*;

/// Toggle repeating the current song
#[poise::command(slash_command, prefix_command, rename = "loop", category = "Music")]
pub async fn loop_song(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;
    let enabled = session.toggle_loop_song().await?;

    ctx.send(embedded_messages::loop_song(enabled)).await?;

    Ok(())
}

/// Toggle repeating the whole queue
#[poise::command(slash_command, prefix_command, rename = "loopqueue", category = "Music")]
pub async fn loop_queue(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;
    let enabled = session.toggle_loop_queue().await?;

    ctx.send(embedded_messages::loop_queue(enabled)).await?;

    Ok(())
}
