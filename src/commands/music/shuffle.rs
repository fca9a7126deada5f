use super::*;

/// Shuffle the upcoming tracks
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn shuffle(ctx: Context<'_>) -> CommandResult {
    let session = guild_session(ctx)?;
    let count = session.shuffle().await?;

    ctx.send(embedded_messages::shuffled(count)).await?;

    Ok(())
}
