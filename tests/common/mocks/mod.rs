//! In-memory stand-ins for the voice backend, the resolver and the status sink.

use async_trait::async_trait;
use rusty_dj::player::{
    CompletionNotifier, ConnectionHandle, EntryFailure, MusicError, MusicResult, OutputBackend,
    Resolution, StatusHandle, StatusKind, StatusSink, Track, TrackResolver,
};
use serenity::all::{ChannelId, GuildId, MessageId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Connect(ChannelId),
    Move(ChannelId),
    Start { url: String, volume: f32 },
    Stop,
    Pause,
    Resume,
    SetVolume(f32),
    Disconnect,
}

/// Records every call and hands completion back to the test.
#[derive(Default)]
pub struct FakeOutput {
    calls: Mutex<Vec<OutputCall>>,
    notifiers: Mutex<Vec<CompletionNotifier>>,
    connected: AtomicBool,
    failing_urls: Mutex<HashSet<String>>,
    failing_volume: AtomicBool,
    unreachable_urls: Mutex<HashSet<String>>,
}

impl FakeOutput {
    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn started_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                OutputCall::Start { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn started(&self) -> usize {
        self.notifiers.lock().unwrap().len()
    }

    pub fn count(&self, expected: &OutputCall) -> usize {
        self.calls().iter().filter(|call| *call == expected).count()
    }

    /// Make `start_stream` fail for `url`.
    pub fn fail_stream(&self, url: impl Into<String>) {
        self.failing_urls.lock().unwrap().insert(url.into());
    }

    /// Report the voice connection as gone when `stream_url` is started.
    pub fn lose_connection_on(&self, stream_url: String) {
        self.unreachable_urls.lock().unwrap().insert(stream_url);
    }

    /// Make every live volume change fail.
    pub fn fail_volume_changes(&self) {
        self.failing_volume.store(true, Ordering::SeqCst);
    }

    /// Report the end of the `index`th stream that was started.
    pub fn finish_stream(&self, index: usize) {
        self.notifiers.lock().unwrap()[index].notify();
    }

    /// Report the end of the most recently started stream.
    pub fn finish_current(&self) {
        let notifiers = self.notifiers.lock().unwrap();
        notifiers.last().expect("no stream was started").notify();
    }

    /// Simulate the gateway dropping the voice connection.
    pub fn drop_connection(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn record(&self, call: OutputCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OutputBackend for FakeOutput {
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> MusicResult<ConnectionHandle> {
        self.record(OutputCall::Connect(channel_id));
        self.connected.store(true, Ordering::SeqCst);
        Ok(ConnectionHandle::new(guild_id, channel_id))
    }

    async fn move_to(&self, conn: &mut ConnectionHandle, channel_id: ChannelId) -> MusicResult<()> {
        self.record(OutputCall::Move(channel_id));
        conn.set_channel(channel_id);
        Ok(())
    }

    async fn start_stream(
        &self,
        _conn: &ConnectionHandle,
        stream_url: &str,
        volume: f32,
        notifier: CompletionNotifier,
    ) -> MusicResult<()> {
        if self.unreachable_urls.lock().unwrap().contains(stream_url) {
            return Err(MusicError::NotConnected);
        }
        if self.failing_urls.lock().unwrap().contains(stream_url) {
            return Err(MusicError::Output(format!("cannot open {stream_url}")));
        }
        self.record(OutputCall::Start {
            url: stream_url.to_string(),
            volume,
        });
        self.notifiers.lock().unwrap().push(notifier);
        Ok(())
    }

    async fn stop_stream(&self, _conn: &ConnectionHandle) -> MusicResult<()> {
        self.record(OutputCall::Stop);
        Ok(())
    }

    async fn pause(&self, _conn: &ConnectionHandle) -> MusicResult<()> {
        self.record(OutputCall::Pause);
        Ok(())
    }

    async fn resume(&self, _conn: &ConnectionHandle) -> MusicResult<()> {
        self.record(OutputCall::Resume);
        Ok(())
    }

    async fn set_volume(&self, _conn: &ConnectionHandle, volume: f32) -> MusicResult<()> {
        if self.failing_volume.load(Ordering::SeqCst) {
            return Err(MusicError::Output("volume control unavailable".to_string()));
        }
        self.record(OutputCall::SetVolume(volume));
        Ok(())
    }

    async fn disconnect(&self, _conn: ConnectionHandle) -> MusicResult<()> {
        self.record(OutputCall::Disconnect);
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn is_active(&self, _conn: &ConnectionHandle) -> bool {
        self.is_connected()
    }
}

/// Resolves queries from a fixed table. Stream URLs are `<source_ref>#stream`.
#[derive(Default)]
pub struct StubResolver {
    results: HashMap<String, Vec<Track>>,
    broken_entries: HashMap<String, Vec<String>>,
    dead_sources: HashSet<String>,
    gate: Option<Arc<Semaphore>>,
    resolve_gate: Option<Arc<Semaphore>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, tracks: Vec<Track>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    /// Playlist entries of `query` that fail to resolve.
    pub fn with_broken_entries(mut self, query: &str, references: &[&str]) -> Self {
        self.broken_entries.insert(
            query.to_string(),
            references.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Tracks whose stream URL can no longer be fetched.
    pub fn with_dead_source(mut self, track: &Track) -> Self {
        self.dead_sources.insert(track.source_ref().to_string());
        self
    }

    /// Hold every stream URL refresh until a permit is added to the returned
    /// semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Hold every `resolve` call until a permit is added to the returned
    /// semaphore.
    pub fn gated_resolve(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.resolve_gate = Some(gate.clone());
        (self, gate)
    }
}

#[async_trait]
impl TrackResolver for StubResolver {
    async fn resolve(&self, query: &str) -> MusicResult<Resolution> {
        if let Some(gate) = &self.resolve_gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let tracks = self
            .results
            .get(query)
            .cloned()
            .ok_or_else(|| MusicError::NoResults(query.to_string()))?;

        let failures = self
            .broken_entries
            .get(query)
            .into_iter()
            .flatten()
            .map(|reference| EntryFailure {
                reference: reference.clone(),
                error: MusicError::resolution(reference.as_str(), "video unavailable"),
            })
            .collect();

        Ok(Resolution { tracks, failures })
    }

    async fn refresh_stream_url(&self, source_ref: &str) -> MusicResult<String> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if self.dead_sources.contains(source_ref) {
            return Err(MusicError::resolution(source_ref, "video unavailable"));
        }
        Ok(format!("{source_ref}#stream"))
    }
}

/// Keeps every posted and deleted status message.
#[derive(Default)]
pub struct RecordingStatusSink {
    posted: Mutex<Vec<(ChannelId, StatusKind)>>,
    deleted: Mutex<Vec<StatusHandle>>,
    next_id: AtomicU64,
}

impl RecordingStatusSink {
    pub fn posted(&self) -> Vec<StatusKind> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, kind)| kind.clone())
            .collect()
    }

    pub fn channels(&self) -> Vec<ChannelId> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(channel_id, _)| *channel_id)
            .collect()
    }

    pub fn deleted(&self) -> Vec<StatusHandle> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSink for RecordingStatusSink {
    async fn post_status(&self, channel_id: ChannelId, kind: StatusKind) -> MusicResult<StatusHandle> {
        self.posted.lock().unwrap().push((channel_id, kind));
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StatusHandle {
            channel_id,
            message_id: MessageId::new(id),
        })
    }

    async fn delete_status(&self, handle: StatusHandle) -> MusicResult<()> {
        self.deleted.lock().unwrap().push(handle);
        Ok(())
    }
}
