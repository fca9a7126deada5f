//! Collaborator contracts the playback controller drives: the voice output
//! backend and the sink for status messages.

use serenity::all::{ChannelId, GuildId, MessageId};
use serenity::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::error::MusicResult;
use super::session::SessionEvent;
use super::track::Track;

/// A live voice connection, owned by exactly one session.
#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionHandle {
    guild_id: GuildId,
    channel_id: ChannelId,
}

impl ConnectionHandle {
    pub fn new(guild_id: GuildId, channel_id: ChannelId) -> Self {
        Self {
            guild_id,
            channel_id,
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Record a migration performed by the backend.
    pub fn set_channel(&mut self, channel_id: ChannelId) {
        self.channel_id = channel_id;
    }
}

/// Handed to the output backend with every stream it starts.
///
/// Calling [`notify`](Self::notify) only posts an event to the owning session;
/// the session decides on its own task whether the stream is still the active
/// one and what plays next.
#[derive(Debug, Clone)]
pub struct CompletionNotifier {
    ticket: u64,
    events: UnboundedSender<SessionEvent>,
}

impl CompletionNotifier {
    pub(crate) fn new(ticket: u64, events: UnboundedSender<SessionEvent>) -> Self {
        Self { ticket, events }
    }

    /// Report that the stream ended, normally or with an error.
    pub fn notify(&self) {
        if self
            .events
            .send(SessionEvent::StreamEnded {
                ticket: self.ticket,
            })
            .is_err()
        {
            debug!("Session already gone, dropping end of stream {}", self.ticket);
        }
    }
}

/// Voice output backend.
#[async_trait]
pub trait OutputBackend: Send + Sync {
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId)
    -> MusicResult<ConnectionHandle>;

    /// Migrate an existing connection to another channel of the same guild.
    async fn move_to(&self, conn: &mut ConnectionHandle, channel_id: ChannelId) -> MusicResult<()>;

    /// Start streaming `stream_url`, replacing whatever is playing. `notifier`
    /// must be called once the stream ends or fails.
    async fn start_stream(
        &self,
        conn: &ConnectionHandle,
        stream_url: &str,
        volume: f32,
        notifier: CompletionNotifier,
    ) -> MusicResult<()>;

    async fn stop_stream(&self, conn: &ConnectionHandle) -> MusicResult<()>;

    async fn pause(&self, conn: &ConnectionHandle) -> MusicResult<()>;

    async fn resume(&self, conn: &ConnectionHandle) -> MusicResult<()>;

    async fn set_volume(&self, conn: &ConnectionHandle, volume: f32) -> MusicResult<()>;

    async fn disconnect(&self, conn: ConnectionHandle) -> MusicResult<()>;

    async fn is_active(&self, conn: &ConnectionHandle) -> bool;
}

/// What a status message announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    NowPlaying(Track),
    Paused(Track),
    Resumed(Track),
    Stopped,
    TrackFailed { title: String, reason: String },
    QueueFinished,
}

/// A posted status message that can be deleted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusHandle {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Where the controller posts status messages.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn post_status(&self, channel_id: ChannelId, kind: StatusKind)
    -> MusicResult<StatusHandle>;

    /// Deleting a message that is already gone is not an error.
    async fn delete_status(&self, handle: StatusHandle) -> MusicResult<()>;
}
