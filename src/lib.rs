//! Rusty DJ: a Discord bot that streams YouTube audio into voice channels
//! from a per-guild playback queue.

pub mod commands;
pub mod config;
pub mod player;

use std::sync::Arc;

use config::BotConfig;
use player::SessionRegistry;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub sessions: Arc<SessionRegistry>,
    pub config: BotConfig,
}
