//! Common test utilities, fixtures, and mocks
#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use rusty_dj::player::{PlaybackState, SessionDeps, SessionHandle, SessionSnapshot};
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing::Level;

use fixtures::GUILD;
use mocks::{FakeOutput, RecordingStatusSink, StubResolver};

const WAIT: Duration = Duration::from_secs(2);

static INIT: Once = Once::new();

/// Initialize tracing once for the whole test binary
pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A session wired to fake collaborators.
pub struct Harness {
    pub output: Arc<FakeOutput>,
    pub status: Arc<RecordingStatusSink>,
    pub session: SessionHandle,
}

impl Harness {
    pub fn deps(resolver: StubResolver) -> (SessionDeps, Arc<FakeOutput>, Arc<RecordingStatusSink>) {
        let output = Arc::new(FakeOutput::default());
        let status = Arc::new(RecordingStatusSink::default());
        let deps = SessionDeps {
            output: output.clone(),
            status: status.clone(),
            resolver: Arc::new(resolver),
        };
        (deps, output, status)
    }

    pub fn start(resolver: StubResolver) -> Self {
        init();
        let (deps, output, status) = Self::deps(resolver);
        Self {
            output,
            status,
            session: SessionHandle::spawn(GUILD, deps, 1.0),
        }
    }

    /// Wait until the snapshot satisfies `predicate`.
    pub async fn wait_until(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Arc<SessionSnapshot> {
        let mut snapshots = self.session.subscribe();
        let snapshot = tokio::time::timeout(WAIT, snapshots.wait_for(|s| predicate(s)))
            .await
            .expect("timed out waiting for session state")
            .expect("session closed");
        Arc::clone(&snapshot)
    }

    /// Wait until the `count`th stream has started playing.
    pub async fn wait_for_start(&self, count: usize) -> Arc<SessionSnapshot> {
        let output = self.output.clone();
        self.wait_until(move |s| s.state == PlaybackState::Playing && output.started() >= count)
            .await
    }

    pub async fn wait_for_idle(&self) -> Arc<SessionSnapshot> {
        self.wait_until(|s| s.state == PlaybackState::Idle).await
    }

    /// Round-trip a command so every event sent before it has been handled.
    pub async fn flush(&self) {
        // Out of range, so the queue is left alone.
        let result = self.session.delete_at(usize::MAX).await;
        assert!(result.is_err());
    }
}
