//! One session per guild.

mod common;

use pretty_assertions::assert_eq;
use rusty_dj::player::{PlaybackState, SessionRegistry};
use serenity::all::GuildId;

use common::Harness;
use common::fixtures::{GUILD, TEXT, VOICE_A, tracks};
use common::mocks::{OutputCall, StubResolver};

fn registry(resolver: StubResolver) -> (SessionRegistry, Harness) {
    common::init();
    let (deps, output, status) = Harness::deps(resolver);
    let registry = SessionRegistry::new(deps, 0.8);
    let session = registry.get_or_create(GUILD);
    (
        registry,
        Harness {
            output,
            status,
            session,
        },
    )
}

#[tokio::test]
async fn reuses_the_session_of_a_guild() {
    let (registry, harness) = registry(StubResolver::new());

    harness.session.toggle_loop_song().await.unwrap();
    let again = registry.get_or_create(GUILD);

    assert_eq!(registry.len(), 1);
    assert!(again.snapshot().loop_song);
    assert_eq!(again.snapshot().volume, 0.8);
}

#[tokio::test]
async fn keeps_guilds_apart() {
    let (registry, harness) = registry(StubResolver::new());
    let other = registry.get_or_create(GuildId::new(4444));

    harness.session.toggle_loop_queue().await.unwrap();

    assert_eq!(registry.len(), 2);
    assert!(!other.snapshot().loop_queue);
    assert!(registry.get(GuildId::new(5555)).is_none());
}

#[tokio::test]
async fn stop_all_leaves_every_voice_channel() {
    let (registry, harness) = registry(StubResolver::new().with("ab", tracks(2)));
    harness.session.enqueue(VOICE_A, "ab", TEXT).await.unwrap();
    harness.wait_for_start(1).await;

    registry.stop_all().await;

    assert!(registry.is_empty());
    assert_eq!(harness.session.snapshot().state, PlaybackState::Idle);
    assert_eq!(harness.output.calls().last(), Some(&OutputCall::Disconnect));
}
