use super::*;
use crate::player::MusicError;

/// Remove a track from the queue by its position
#[poise::command(slash_command, prefix_command, category = "Music")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Position of the track to remove (1-based)"] position: usize,
) -> CommandResult {
    let session = guild_session(ctx)?;

    let Some(index) = position.checked_sub(1) else {
        let err = MusicError::InvalidArgument("positions start at 1".to_string());
        ctx.send(embedded_messages::error(&err)).await?;
        return Ok(());
    };

    let reply = match session.delete_at(index).await {
        Ok(track) => embedded_messages::track_removed(&track, position),
        Err(err) => embedded_messages::error(&err),
    };
    ctx.send(reply).await?;

    Ok(())
}
