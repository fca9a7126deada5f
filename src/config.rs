//! Bot configuration, read from the environment (a `.env` file is loaded first
//! by `main`).

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub discord_token: String,
    pub command_prefix: String,
    /// Initial session volume, 0..=100.
    pub default_volume: u8,
    pub ytdlp_path: String,
    pub ytdlp_timeout: Duration,
    pub max_concurrent_resolutions: usize,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let default_volume: u8 = parse_or(&lookup, "DEFAULT_VOLUME", 100)?;
        if default_volume > 100 {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_VOLUME",
                value: default_volume.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }

        let timeout_secs: u64 = parse_or(&lookup, "YTDLP_TIMEOUT_SECS", 30)?;
        let max_concurrent_resolutions: usize = parse_or(&lookup, "MAX_CONCURRENT_RESOLUTIONS", 4)?;
        if max_concurrent_resolutions == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_CONCURRENT_RESOLUTIONS",
                value: "0".to_string(),
                reason: "at least one resolver must be allowed".to_string(),
            });
        }

        Ok(Self {
            discord_token,
            command_prefix: lookup("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string()),
            default_volume,
            ytdlp_path: lookup("YTDLP_PATH").unwrap_or_else(|| "yt-dlp".to_string()),
            ytdlp_timeout: Duration::from_secs(timeout_secs),
            max_concurrent_resolutions,
        })
    }

    /// Default volume as the 0.0..=1.0 gain the player uses.
    pub fn default_gain(&self) -> f32 {
        f32::from(self.default_volume) / 100.0
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
