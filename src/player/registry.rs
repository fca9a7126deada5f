use dashmap::DashMap;
use futures::future::join_all;
use serenity::all::GuildId;
use tracing::{info, warn};

use super::session::{SessionDeps, SessionHandle};

/// Owns one playback session per guild.
///
/// Sessions are created on first use and live until [`stop_all`] clears them
/// on shutdown.
///
/// [`stop_all`]: SessionRegistry::stop_all
pub struct SessionRegistry {
    sessions: DashMap<GuildId, SessionHandle>,
    deps: SessionDeps,
    default_volume: f32,
}

impl SessionRegistry {
    pub fn new(deps: SessionDeps, default_volume: f32) -> Self {
        Self {
            sessions: DashMap::new(),
            deps,
            default_volume,
        }
    }

    /// Session for `guild_id`, starting one if none exists.
    pub fn get_or_create(&self, guild_id: GuildId) -> SessionHandle {
        self.sessions
            .entry(guild_id)
            .or_insert_with(|| {
                info!("Creating music session for guild {}", guild_id);
                SessionHandle::spawn(guild_id, self.deps.clone(), self.default_volume)
            })
            .clone()
    }

    pub fn get(&self, guild_id: GuildId) -> Option<SessionHandle> {
        self.sessions.get(&guild_id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Stop every session, e.g. before shutting down.
    pub async fn stop_all(&self) {
        let handles: Vec<SessionHandle> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let results = join_all(handles.iter().map(|handle| handle.stop())).await;
        for (handle, result) in handles.iter().zip(results) {
            if let Err(e) = result {
                warn!("Failed to stop session for guild {}: {}", handle.guild_id(), e);
            }
        }
        self.sessions.clear();
    }
}
