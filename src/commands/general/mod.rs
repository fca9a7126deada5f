//! Commands that do not touch playback.

pub(crate) mod help;
pub(crate) mod ping;

pub(crate) fn commands() -> Vec<poise::Command<crate::Data, crate::Error>> {
    vec![help::help(), help::register(), ping::ping(), ping::test()]
}
