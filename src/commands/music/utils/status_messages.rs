//! Posts session status messages to Discord text channels.

use poise::serenity_prelude as serenity;
use serenity::all::{CreateMessage, Http};
use serenity::async_trait;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tracing::debug;

use super::embedded_messages;
use crate::player::{MusicError, MusicResult, StatusHandle, StatusKind, StatusSink};

pub struct DiscordStatusSink {
    http: Arc<Http>,
}

impl DiscordStatusSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => {
            http_err.status_code().map(|status| status.as_u16()) == Some(404)
        }
        _ => false,
    }
}

#[async_trait]
impl StatusSink for DiscordStatusSink {
    async fn post_status(&self, channel_id: ChannelId, kind: StatusKind) -> MusicResult<StatusHandle> {
        let message = CreateMessage::new().embed(embedded_messages::status_embed(&kind));
        let sent = channel_id
            .send_message(self.http.clone(), message)
            .await
            .map_err(|e| MusicError::Status(e.to_string()))?;

        Ok(StatusHandle {
            channel_id,
            message_id: sent.id,
        })
    }

    async fn delete_status(&self, handle: StatusHandle) -> MusicResult<()> {
        match self
            .http
            .delete_message(handle.channel_id, handle.message_id, None)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Player message {} was already deleted", handle.message_id);
                Ok(())
            }
            Err(e) => Err(MusicError::Status(e.to_string())),
        }
    }
}
