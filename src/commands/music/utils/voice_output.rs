//! Songbird-backed voice output.

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use songbird::input::HttpRequest;
use songbird::tracks::{Track, TrackHandle};
use songbird::{Event, EventContext, EventHandler, Songbird, TrackEvent};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::player::{
    CompletionNotifier, ConnectionHandle, MusicError, MusicResult, OutputBackend,
};

/// Forwards the end (or failure) of a songbird track to its session.
struct TrackEndNotifier {
    guild_id: GuildId,
    notifier: CompletionNotifier,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(tracks) = ctx {
            for (state, _) in tracks.iter() {
                debug!("Track in guild {} finished as {:?}", self.guild_id, state.playing);
            }
            self.notifier.notify();
        }
        None
    }
}

/// Plays stream URLs through songbird, one track per guild.
pub struct SongbirdOutput {
    manager: Arc<Songbird>,
    http: reqwest::Client,
    tracks: DashMap<GuildId, TrackHandle>,
}

impl SongbirdOutput {
    pub fn new(manager: Arc<Songbird>, http: reqwest::Client) -> Self {
        Self {
            manager,
            http,
            tracks: DashMap::new(),
        }
    }

    fn track(&self, conn: &ConnectionHandle) -> MusicResult<TrackHandle> {
        self.tracks
            .get(&conn.guild_id())
            .map(|entry| entry.clone())
            .ok_or(MusicError::NotConnected)
    }
}

fn output_error(err: impl std::fmt::Display) -> MusicError {
    MusicError::Output(err.to_string())
}

#[async_trait]
impl OutputBackend for SongbirdOutput {
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> MusicResult<ConnectionHandle> {
        self.manager
            .join(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;
        Ok(ConnectionHandle::new(guild_id, channel_id))
    }

    async fn move_to(&self, conn: &mut ConnectionHandle, channel_id: ChannelId) -> MusicResult<()> {
        // Joining again on the same guild migrates the existing call.
        self.manager
            .join(conn.guild_id(), channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;
        conn.set_channel(channel_id);
        Ok(())
    }

    async fn start_stream(
        &self,
        conn: &ConnectionHandle,
        stream_url: &str,
        volume: f32,
        notifier: CompletionNotifier,
    ) -> MusicResult<()> {
        let call = self
            .manager
            .get(conn.guild_id())
            .ok_or(MusicError::NotConnected)?;

        let input = HttpRequest::new(self.http.clone(), stream_url.to_string());
        let track_handle = {
            let mut handler = call.lock().await;
            handler.stop();
            handler.play(Track::new(input.into()).volume(volume))
        };

        for event in [TrackEvent::End, TrackEvent::Error] {
            track_handle
                .add_event(
                    Event::Track(event),
                    TrackEndNotifier {
                        guild_id: conn.guild_id(),
                        notifier: notifier.clone(),
                    },
                )
                .map_err(output_error)?;
        }

        info!("Started stream in guild {}", conn.guild_id());
        self.tracks.insert(conn.guild_id(), track_handle);
        Ok(())
    }

    async fn stop_stream(&self, conn: &ConnectionHandle) -> MusicResult<()> {
        if let Some((_, track)) = self.tracks.remove(&conn.guild_id()) {
            track.stop().map_err(output_error)?;
        }
        Ok(())
    }

    async fn pause(&self, conn: &ConnectionHandle) -> MusicResult<()> {
        self.track(conn)?.pause().map_err(output_error)
    }

    async fn resume(&self, conn: &ConnectionHandle) -> MusicResult<()> {
        self.track(conn)?.play().map_err(output_error)
    }

    async fn set_volume(&self, conn: &ConnectionHandle, volume: f32) -> MusicResult<()> {
        self.track(conn)?.set_volume(volume).map_err(output_error)
    }

    async fn disconnect(&self, conn: ConnectionHandle) -> MusicResult<()> {
        if let Some((_, track)) = self.tracks.remove(&conn.guild_id()) {
            if let Err(e) = track.stop() {
                warn!("Failed to stop track in guild {}: {}", conn.guild_id(), e);
            }
        }

        if self.manager.get(conn.guild_id()).is_none() {
            return Ok(());
        }
        self.manager
            .remove(conn.guild_id())
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))
    }

    async fn is_active(&self, conn: &ConnectionHandle) -> bool {
        match self.manager.get(conn.guild_id()) {
            Some(call) => call.lock().await.current_connection().is_some(),
            None => false,
        }
    }
}
