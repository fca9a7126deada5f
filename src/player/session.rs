//! The playback controller: one actor task per session.
//!
//! All state (queue, now playing, loop flags, volume, the voice connection)
//! lives inside [`SessionActor`] and is only touched from its task. Callers talk
//! to it through a cloneable [`SessionHandle`]; the output backend talks to it
//! through [`CompletionNotifier`]. After every message the actor publishes an
//! immutable [`SessionSnapshot`] that readers can inspect without queueing
//! behind writers.

use serenity::all::{ChannelId, GuildId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::backend::{
    CompletionNotifier, ConnectionHandle, OutputBackend, StatusHandle, StatusKind, StatusSink,
};
use super::error::{MusicError, MusicResult};
use super::queue::PlayQueue;
use super::resolver::{EntryFailure, TrackResolver};
use super::track::Track;

const COMMAND_BUFFER: usize = 32;

/// Coarse playback state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing queued, nothing playing, no voice connection.
    Idle,
    Playing,
    Paused,
    /// Between two tracks: the next stream URL is being fetched.
    Advancing,
}

/// Point-in-time copy of a session's state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: PlaybackState,
    pub now_playing: Option<Track>,
    pub queue: Vec<Track>,
    pub volume: f32,
    pub loop_song: bool,
    pub loop_queue: bool,
    /// Voice channel the session is connected to, if any.
    pub voice_channel: Option<ChannelId>,
}

impl SessionSnapshot {
    fn idle(volume: f32) -> Self {
        Self {
            state: PlaybackState::Idle,
            now_playing: None,
            queue: Vec::new(),
            volume,
            loop_song: false,
            loop_queue: false,
            voice_channel: None,
        }
    }

    pub fn queue_view(&self) -> QueueView {
        QueueView {
            now_playing: self.now_playing.clone(),
            entries: self
                .queue
                .iter()
                .enumerate()
                .map(|(index, track)| QueueEntry {
                    index,
                    title: track.title().to_string(),
                    duration: track.duration(),
                })
                .collect(),
            total_duration: self.queue.iter().map(Track::duration).sum(),
            volume: self.volume,
            loop_song: self.loop_song,
            loop_queue: self.loop_queue,
        }
    }
}

/// One line of the queue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// Zero-based index, as accepted by [`SessionHandle::delete_at`].
    pub index: usize,
    pub title: String,
    pub duration: Duration,
}

/// Read-only listing of a session's queue for display.
#[derive(Debug, Clone)]
pub struct QueueView {
    pub now_playing: Option<Track>,
    pub entries: Vec<QueueEntry>,
    pub total_duration: Duration,
    pub volume: f32,
    pub loop_song: bool,
    pub loop_queue: bool,
}

impl QueueView {
    /// Listing of a session that has never played anything.
    pub fn empty(volume: f32) -> Self {
        SessionSnapshot::idle(volume).queue_view()
    }

    /// True when nothing is waiting to play (now playing is not counted).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of [`SessionHandle::enqueue`].
#[derive(Debug)]
pub struct EnqueueReport {
    pub added: Vec<Track>,
    /// Playlist entries that were skipped.
    pub failures: Vec<EntryFailure>,
    /// True when the session was idle and this request started playback.
    pub started_playback: bool,
    /// Queue length after the tracks were appended.
    pub queue_len: usize,
}

#[derive(Debug)]
struct AppendOutcome {
    started_playback: bool,
    queue_len: usize,
}

enum SessionCommand {
    Join {
        channel_id: ChannelId,
        status_channel: ChannelId,
        reply: oneshot::Sender<MusicResult<()>>,
    },
    Append {
        tracks: Vec<Track>,
        /// Voice and status channel to (re)join before appending.
        join: Option<(ChannelId, ChannelId)>,
        reply: oneshot::Sender<MusicResult<AppendOutcome>>,
    },
    Skip {
        reply: oneshot::Sender<Option<Track>>,
    },
    Pause {
        reply: oneshot::Sender<Option<Track>>,
    },
    Resume {
        reply: oneshot::Sender<Option<Track>>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Shuffle {
        reply: oneshot::Sender<usize>,
    },
    SetVolume {
        level: i64,
        reply: oneshot::Sender<MusicResult<f32>>,
    },
    ToggleLoopSong {
        reply: oneshot::Sender<bool>,
    },
    ToggleLoopQueue {
        reply: oneshot::Sender<bool>,
    },
    DeleteAt {
        index: usize,
        reply: oneshot::Sender<MusicResult<Track>>,
    },
}

/// Events raised outside the actor and handled on its task.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    /// The stream started under `ticket` has ended.
    StreamEnded { ticket: u64 },
    /// A stream URL refresh finished.
    StreamReady {
        ticket: u64,
        track: Track,
        result: MusicResult<String>,
    },
}

/// Shared collaborators of every session.
#[derive(Clone)]
pub struct SessionDeps {
    pub output: Arc<dyn OutputBackend>,
    pub status: Arc<dyn StatusSink>,
    pub resolver: Arc<dyn TrackResolver>,
}

/// Cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    guild_id: GuildId,
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<Arc<SessionSnapshot>>,
    resolver: Arc<dyn TrackResolver>,
}

impl SessionHandle {
    /// Start the session task for `guild_id`.
    pub fn spawn(guild_id: GuildId, deps: SessionDeps, default_volume: f32) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let volume = default_volume.clamp(0.0, 1.0);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(SessionSnapshot::idle(volume)));

        let actor = SessionActor {
            guild_id,
            output: deps.output,
            status: deps.status,
            resolver: deps.resolver.clone(),
            events: event_tx,
            snapshots: snapshot_tx,
            state: PlaybackState::Idle,
            queue: PlayQueue::new(),
            now_playing: None,
            volume,
            loop_song: false,
            loop_queue: false,
            connection: None,
            status_channel: None,
            now_playing_status: None,
            ticket: 0,
            pending: None,
            active: None,
        };
        tokio::spawn(actor.run(command_rx, event_rx));

        Self {
            guild_id,
            commands: command_tx,
            snapshots: snapshot_rx,
            resolver: deps.resolver,
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> MusicResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| MusicError::SessionClosed)?;
        response.await.map_err(|_| MusicError::SessionClosed)
    }

    /// Connect (or migrate) to `channel_id`, resolve `query` and append the
    /// result. Playback starts if the session was idle.
    ///
    /// Resolution runs on the caller's task, so a slow lookup never blocks the
    /// session. A failed playlist entry is reported in the result; a query that
    /// cannot be resolved at all is returned as an error.
    pub async fn enqueue(
        &self,
        channel_id: ChannelId,
        query: &str,
        status_channel: ChannelId,
    ) -> MusicResult<EnqueueReport> {
        self.request(|reply| SessionCommand::Join {
            channel_id,
            status_channel,
            reply,
        })
        .await??;

        let resolution = match self.resolver.resolve(query).await {
            Ok(resolution) => resolution,
            Err(err) => {
                warn!("Failed to resolve '{}' for guild {}: {}", query, self.guild_id, err);
                // Lets an idle session drop the connection it just opened.
                self.append(Vec::new(), None).await?;
                return Err(err);
            }
        };

        // The connection may have been released while resolving, so it is
        // ensured again in the same step that appends.
        let outcome = self
            .append(resolution.tracks.clone(), Some((channel_id, status_channel)))
            .await?;
        info!(
            "Queued {} track(s) for guild {} ({} failed)",
            resolution.tracks.len(),
            self.guild_id,
            resolution.failures.len()
        );

        Ok(EnqueueReport {
            added: resolution.tracks,
            failures: resolution.failures,
            started_playback: outcome.started_playback,
            queue_len: outcome.queue_len,
        })
    }

    async fn append(
        &self,
        tracks: Vec<Track>,
        join: Option<(ChannelId, ChannelId)>,
    ) -> MusicResult<AppendOutcome> {
        self.request(|reply| SessionCommand::Append {
            tracks,
            join,
            reply,
        })
        .await?
    }

    /// Skip the current track. Returns the track that was playing.
    pub async fn skip(&self) -> MusicResult<Option<Track>> {
        self.request(|reply| SessionCommand::Skip { reply }).await
    }

    /// Pause playback. `None` when nothing was playing.
    pub async fn pause(&self) -> MusicResult<Option<Track>> {
        self.request(|reply| SessionCommand::Pause { reply }).await
    }

    /// Resume playback. `None` when nothing was paused.
    pub async fn resume(&self) -> MusicResult<Option<Track>> {
        self.request(|reply| SessionCommand::Resume { reply }).await
    }

    /// Stop playback, clear the queue and leave the voice channel.
    pub async fn stop(&self) -> MusicResult<()> {
        self.request(|reply| SessionCommand::Stop { reply }).await
    }

    /// Shuffle the pending queue. Returns the number of shuffled entries.
    pub async fn shuffle(&self) -> MusicResult<usize> {
        self.request(|reply| SessionCommand::Shuffle { reply }).await
    }

    /// Set the volume from a 0..=100 level. Returns the resulting gain.
    pub async fn change_volume(&self, level: i64) -> MusicResult<f32> {
        self.request(|reply| SessionCommand::SetVolume { level, reply })
            .await?
    }

    pub async fn toggle_loop_song(&self) -> MusicResult<bool> {
        self.request(|reply| SessionCommand::ToggleLoopSong { reply })
            .await
    }

    pub async fn toggle_loop_queue(&self) -> MusicResult<bool> {
        self.request(|reply| SessionCommand::ToggleLoopQueue { reply })
            .await
    }

    /// Remove the queue entry at the zero-based `index`.
    pub async fn delete_at(&self, index: usize) -> MusicResult<Track> {
        self.request(|reply| SessionCommand::DeleteAt { index, reply })
            .await?
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn queue_view(&self) -> QueueView {
        self.snapshot().queue_view()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.snapshots.clone()
    }
}

struct SessionActor {
    guild_id: GuildId,
    output: Arc<dyn OutputBackend>,
    status: Arc<dyn StatusSink>,
    resolver: Arc<dyn TrackResolver>,
    events: mpsc::UnboundedSender<SessionEvent>,
    snapshots: watch::Sender<Arc<SessionSnapshot>>,

    state: PlaybackState,
    queue: PlayQueue,
    now_playing: Option<Track>,
    volume: f32,
    loop_song: bool,
    loop_queue: bool,
    connection: Option<ConnectionHandle>,
    status_channel: Option<ChannelId>,
    now_playing_status: Option<StatusHandle>,

    /// Bumped on every advance and stop; identifies streams and refreshes.
    ticket: u64,
    /// Ticket of the refresh whose result may still start playback.
    pending: Option<u64>,
    /// Ticket of the stream currently owned by the output backend.
    active: Option<u64>,
}

impl SessionActor {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        info!("Music session started for guild {}", self.guild_id);

        loop {
            tokio::select! {
                biased;
                Some(event) = events.recv() => {
                    self.handle_event(event).await;
                    self.publish();
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
            }
        }

        if self.connection.is_some() || !self.queue.is_empty() {
            self.stop().await;
        }
        info!("Music session ended for guild {}", self.guild_id);
    }

    fn publish(&self) {
        let snapshot = SessionSnapshot {
            state: self.state,
            now_playing: self.now_playing.clone(),
            queue: self.queue.to_vec(),
            volume: self.volume,
            loop_song: self.loop_song,
            loop_queue: self.loop_queue,
            voice_channel: self.connection.as_ref().map(ConnectionHandle::channel_id),
        };
        self.snapshots.send_replace(Arc::new(snapshot));
    }

    /// Publish the new state, then answer the caller, so a caller always sees
    /// its own change in [`SessionHandle::snapshot`].
    fn respond<T>(&self, reply: oneshot::Sender<T>, value: T) {
        self.publish();
        // A dropped receiver only means the caller stopped waiting.
        let _ = reply.send(value);
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Join {
                channel_id,
                status_channel,
                reply,
            } => {
                let result = self.join(channel_id, status_channel).await;
                self.respond(reply, result);
            }
            SessionCommand::Append {
                tracks,
                join,
                reply,
            } => {
                let outcome = match join {
                    Some((channel_id, status_channel)) => {
                        match self.join(channel_id, status_channel).await {
                            Ok(()) => Ok(self.append(tracks).await),
                            Err(err) => Err(err),
                        }
                    }
                    None => Ok(self.append(tracks).await),
                };
                self.respond(reply, outcome);
            }
            SessionCommand::Skip { reply } => {
                let skipped = self.skip().await;
                self.respond(reply, skipped);
            }
            SessionCommand::Pause { reply } => {
                let paused = self.pause().await;
                self.respond(reply, paused);
            }
            SessionCommand::Resume { reply } => {
                let resumed = self.resume().await;
                self.respond(reply, resumed);
            }
            SessionCommand::Stop { reply } => {
                self.stop().await;
                self.respond(reply, ());
            }
            SessionCommand::Shuffle { reply } => {
                self.queue.shuffle();
                debug!("Shuffled {} tracks for guild {}", self.queue.len(), self.guild_id);
                self.respond(reply, self.queue.len());
            }
            SessionCommand::SetVolume { level, reply } => {
                let result = self.set_volume(level).await;
                self.respond(reply, result);
            }
            SessionCommand::ToggleLoopSong { reply } => {
                self.loop_song = !self.loop_song;
                info!("Loop song for guild {}: {}", self.guild_id, self.loop_song);
                self.respond(reply, self.loop_song);
            }
            SessionCommand::ToggleLoopQueue { reply } => {
                self.loop_queue = !self.loop_queue;
                info!("Loop queue for guild {}: {}", self.guild_id, self.loop_queue);
                self.respond(reply, self.loop_queue);
            }
            SessionCommand::DeleteAt { index, reply } => {
                let len = self.queue.len();
                let result = self.queue.remove(index).ok_or_else(|| {
                    MusicError::InvalidArgument(format!(
                        "position {} is out of range, the queue has {} tracks",
                        index.saturating_add(1),
                        len
                    ))
                });
                self.respond(reply, result);
            }
        }
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StreamEnded { ticket } => {
                if self.active != Some(ticket) {
                    debug!("Ignoring end of stale stream {} in guild {}", ticket, self.guild_id);
                    return;
                }
                info!("Track ended for guild {}", self.guild_id);
                self.active = None;
                self.requeue_for_song_loop();
                self.advance().await;
            }
            SessionEvent::StreamReady {
                ticket,
                track,
                result,
            } => {
                if self.pending != Some(ticket) {
                    debug!(
                        "Discarding stream for '{}' in guild {}: playback moved on",
                        track.title(),
                        self.guild_id
                    );
                    return;
                }
                self.pending = None;
                self.start_track(ticket, track, result).await;
            }
        }
    }

    async fn join(&mut self, channel_id: ChannelId, status_channel: ChannelId) -> MusicResult<()> {
        self.status_channel = Some(status_channel);

        if let Some(conn) = self.connection.as_mut() {
            if self.output.is_active(conn).await {
                if conn.channel_id() != channel_id {
                    info!(
                        "Moving guild {} from channel {} to {}",
                        self.guild_id,
                        conn.channel_id(),
                        channel_id
                    );
                    self.output.move_to(conn, channel_id).await?;
                }
                return Ok(());
            }
            warn!("Voice connection for guild {} went away, reconnecting", self.guild_id);
            self.connection = None;
            self.active = None;
            if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
                self.requeue_for_song_loop();
                self.now_playing = None;
                self.state = if self.queue.is_empty() {
                    PlaybackState::Idle
                } else {
                    PlaybackState::Advancing
                };
            }
        }

        let conn = self.output.connect(self.guild_id, channel_id).await?;
        info!("Joined voice channel {} in guild {}", channel_id, self.guild_id);
        self.connection = Some(conn);

        // Resume a queue that was interrupted by the lost connection.
        if self.state == PlaybackState::Advancing && self.pending.is_none() {
            self.advance().await;
        }
        Ok(())
    }

    async fn append(&mut self, tracks: Vec<Track>) -> AppendOutcome {
        self.queue.extend(tracks);

        let started_playback = self.state == PlaybackState::Idle;
        if started_playback {
            self.advance().await;
        }

        AppendOutcome {
            started_playback: started_playback && self.state != PlaybackState::Idle,
            queue_len: self.queue.len(),
        }
    }

    /// Pop the next track and fetch its stream URL in the background. The
    /// result comes back as [`SessionEvent::StreamReady`].
    async fn advance(&mut self) {
        self.ticket += 1;
        self.pending = None;
        self.now_playing = None;

        let Some(track) = self.queue.pop_front() else {
            self.finish().await;
            return;
        };

        let ticket = self.ticket;
        debug!(
            "Advancing guild {} to '{}' (ticket {})",
            self.guild_id,
            track.title(),
            ticket
        );
        self.state = PlaybackState::Advancing;
        self.pending = Some(ticket);

        let resolver = self.resolver.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = resolver.refresh_stream_url(track.source_ref()).await;
            // The actor owns a sender too, so this only fails once it is gone.
            let _ = events.send(SessionEvent::StreamReady {
                ticket,
                track,
                result,
            });
        });
    }

    async fn start_track(&mut self, ticket: u64, track: Track, stream_url: MusicResult<String>) {
        let started = match (stream_url, self.connection.as_ref()) {
            (Err(err), _) => Err(err),
            (Ok(_), None) => Err(MusicError::NotConnected),
            (Ok(url), Some(conn)) => {
                let notifier = CompletionNotifier::new(ticket, self.events.clone());
                self.output
                    .start_stream(conn, &url, self.volume, notifier)
                    .await
            }
        };

        if let Err(err) = started {
            error!(
                "Could not play '{}' in guild {}: {}",
                track.title(),
                self.guild_id,
                err
            );
            self.post(StatusKind::TrackFailed {
                title: track.title().to_string(),
                reason: err.to_string(),
            })
            .await;
            if matches!(err, MusicError::NotConnected) {
                self.reset().await;
                return;
            }
            self.advance().await;
            return;
        }

        info!("Now playing '{}' in guild {}", track.title(), self.guild_id);
        if self.loop_queue && !self.loop_song {
            self.queue.push_back(track.clone());
        }
        self.active = Some(ticket);
        self.state = PlaybackState::Playing;
        self.now_playing = Some(track.clone());
        self.replace_now_playing_status(track).await;
    }

    /// Queue ran dry: release everything and go idle.
    async fn finish(&mut self) {
        info!("No more tracks in queue for guild {}", self.guild_id);
        self.active = None;
        self.clear_now_playing_status().await;
        if self.state != PlaybackState::Idle {
            self.post(StatusKind::QueueFinished).await;
        }
        self.release_connection().await;
        self.state = PlaybackState::Idle;
    }

    fn requeue_for_song_loop(&mut self) {
        if self.loop_song {
            if let Some(track) = self.now_playing.take() {
                self.queue.push_front(track);
            }
        }
    }

    async fn skip(&mut self) -> Option<Track> {
        let skipped = self.now_playing.clone();

        if self.active.take().is_some() {
            if let Some(conn) = &self.connection {
                if let Err(e) = self.output.stop_stream(conn).await {
                    warn!("Failed to stop stream in guild {}: {}", self.guild_id, e);
                }
            }
        }

        if let Some(track) = &skipped {
            info!("Skipping '{}' in guild {}", track.title(), self.guild_id);
        }
        self.requeue_for_song_loop();

        if self.state != PlaybackState::Idle || !self.queue.is_empty() {
            self.advance().await;
        }
        skipped
    }

    async fn pause(&mut self) -> Option<Track> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let conn = self.connection.as_ref()?;
        if let Err(e) = self.output.pause(conn).await {
            warn!("Failed to pause in guild {}: {}", self.guild_id, e);
            return None;
        }

        self.state = PlaybackState::Paused;
        let track = self.now_playing.clone()?;
        self.post(StatusKind::Paused(track.clone())).await;
        Some(track)
    }

    async fn resume(&mut self) -> Option<Track> {
        if self.state != PlaybackState::Paused {
            return None;
        }
        let conn = self.connection.as_ref()?;
        if let Err(e) = self.output.resume(conn).await {
            warn!("Failed to resume in guild {}: {}", self.guild_id, e);
            return None;
        }

        self.state = PlaybackState::Playing;
        let track = self.now_playing.clone()?;
        self.post(StatusKind::Resumed(track.clone())).await;
        Some(track)
    }

    async fn stop(&mut self) {
        info!("Stopping playback for guild {}", self.guild_id);
        // Invalidates any refresh still in flight.
        self.ticket += 1;
        self.pending = None;

        if self.active.take().is_some() {
            if let Some(conn) = &self.connection {
                if let Err(e) = self.output.stop_stream(conn).await {
                    warn!("Failed to stop stream in guild {}: {}", self.guild_id, e);
                }
            }
        }

        self.queue.clear();
        self.now_playing = None;
        self.clear_now_playing_status().await;
        self.post(StatusKind::Stopped).await;
        self.release_connection().await;
        self.state = PlaybackState::Idle;
    }

    /// Drop everything, queue included; used when the voice connection is
    /// gone and nothing can play.
    async fn reset(&mut self) {
        warn!(
            "No voice connection in guild {}, dropping {} queued tracks",
            self.guild_id,
            self.queue.len()
        );
        self.ticket += 1;
        self.pending = None;
        self.active = None;
        self.queue.clear();
        self.now_playing = None;
        self.clear_now_playing_status().await;
        self.release_connection().await;
        self.state = PlaybackState::Idle;
    }

    async fn set_volume(&mut self, level: i64) -> MusicResult<f32> {
        if !(0..=100).contains(&level) {
            return Err(MusicError::InvalidArgument(format!(
                "volume must be between 0 and 100, got {level}"
            )));
        }

        let volume = level as f32 / 100.0;
        if self.active.is_some() {
            if let Some(conn) = &self.connection {
                self.output.set_volume(conn, volume).await?;
            }
        }
        self.volume = volume;
        info!("Volume for guild {} set to {}", self.guild_id, level);
        Ok(self.volume)
    }

    async fn release_connection(&mut self) {
        if let Some(conn) = self.connection.take() {
            info!("Leaving voice channel {} in guild {}", conn.channel_id(), self.guild_id);
            if let Err(e) = self.output.disconnect(conn).await {
                warn!("Failed to leave voice channel in guild {}: {}", self.guild_id, e);
            }
        }
    }

    async fn post(&self, kind: StatusKind) -> Option<StatusHandle> {
        let channel_id = self.status_channel?;
        match self.status.post_status(channel_id, kind).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Failed to post status in guild {}: {}", self.guild_id, e);
                None
            }
        }
    }

    async fn replace_now_playing_status(&mut self, track: Track) {
        self.clear_now_playing_status().await;
        self.now_playing_status = self.post(StatusKind::NowPlaying(track)).await;
    }

    async fn clear_now_playing_status(&mut self) {
        if let Some(handle) = self.now_playing_status.take() {
            if let Err(e) = self.status.delete_status(handle).await {
                warn!(
                    "Failed to delete player message {} in channel {}: {}",
                    handle.message_id, handle.channel_id, e
                );
            }
        }
    }
}
