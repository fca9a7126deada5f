use super::*;

/// Skip the currently playing song
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;
    let skipped = session.skip().await?;

    ctx.send(embedded_messages::skipped(skipped.as_ref())).await?;

    Ok(())
}
