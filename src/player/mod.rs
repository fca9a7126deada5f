//! Queue-driven playback: tracks, the per-session controller, and the
//! contracts it uses to resolve queries, output audio and post status.

/// Output backend and status sink contracts.
pub mod backend;
/// Error type shared by the player.
pub mod error;
/// Pending tracks in play order.
pub mod queue;
/// One session per guild.
pub mod registry;
/// Query and stream URL resolution.
pub mod resolver;
/// The per-session playback controller.
pub mod session;
/// The `Track` record.
pub mod track;

pub use backend::{
    CompletionNotifier, ConnectionHandle, OutputBackend, StatusHandle, StatusKind, StatusSink,
};
pub use error::{MusicError, MusicResult};
pub use registry::SessionRegistry;
pub use resolver::{EntryFailure, Resolution, TrackResolver};
pub use session::{
    EnqueueReport, PlaybackState, QueueEntry, QueueView, SessionDeps, SessionHandle,
    SessionSnapshot,
};
pub use track::Track;
