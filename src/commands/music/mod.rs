//! Slash and prefix commands that drive a guild's playback session.

pub(crate) mod loop_mode;
pub(crate) mod pause;
pub(crate) mod play;
pub(crate) mod queue;
pub(crate) mod remove;
pub(crate) mod shuffle;
pub(crate) mod skip;
pub(crate) mod stop;
pub(crate) mod volume;

pub mod utils;

use crate::{CommandResult, Context};
use utils::{embedded_messages, guild_session};

pub(crate) fn commands() -> Vec<poise::Command<crate::Data, crate::Error>> {
    vec![
        play::play(),
        pause::pause(),
        pause::resume(),
        skip::skip(),
        stop::stop(),
        shuffle::shuffle(),
        volume::volume(),
        loop_mode::loop_song(),
        loop_mode::loop_queue(),
        remove::remove(),
        queue::queue(),
    ]
}
