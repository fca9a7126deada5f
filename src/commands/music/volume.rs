use super::*;

/// Set the playback volume
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Volume from 0 to 100"] level: i64,
) -> CommandResult {
    let session = guild_session(ctx)?;

    let reply = match session.change_volume(level).await {
        Ok(gain) => embedded_messages::volume_set(gain),
        Err(err) => embedded_messages::error(&err),
    };
    ctx.send(reply).await?;

    Ok(())
}
