//! Implements [`TrackResolver`] with the `yt-dlp` command-line tool.
//!
//! Metadata comes from `yt-dlp -J` (one JSON document per call). Playlists are
//! listed flat first and every entry is then resolved on its own, because the
//! flat listing lacks reliable per-item titles and durations.

use serde::Deserialize;
use serenity::async_trait;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::{AcquireError, Semaphore};
use tracing::{debug, info, warn};

use super::{EntryFailure, Resolution, TrackResolver, is_url};
use crate::config::BotConfig;
use crate::player::error::{MusicError, MusicResult};
use crate::player::track::Track;

const AUDIO_FORMAT: &str = "bestaudio/best";

/// Errors raised while running or reading `yt-dlp`.
#[derive(Error, Debug)]
pub enum YtDlpError {
    #[error("failed to launch yt-dlp: {0}")]
    Launch(#[from] std::io::Error),

    #[error("yt-dlp exited unsuccessfully ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("yt-dlp did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("unreadable yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("yt-dlp printed no stream URL")]
    NoStreamUrl,

    #[error("playlist entry has no URL")]
    MissingEntryUrl,

    #[error("resolver is shutting down")]
    Closed(#[from] AcquireError),
}

/// Runs `yt-dlp` with the given arguments and returns its stdout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: Vec<String>) -> Result<String, YtDlpError>;
}

/// Spawns the real `yt-dlp` process.
///
/// At most `max_concurrent` processes run at once; extra callers wait for a
/// permit instead of piling up processes.
pub struct ProcessRunner {
    program: String,
    timeout: Duration,
    permits: Semaphore,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>, timeout: Duration, max_concurrent: usize) -> Self {
        Self {
            program: program.into(),
            timeout,
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, args: Vec<String>) -> Result<String, YtDlpError> {
        let _permit = self.permits.acquire().await?;
        debug!("Running {} {}", self.program, args.join(" "));

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| YtDlpError::TimedOut(self.timeout))??;

        if !output.status.success() {
            return Err(YtDlpError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The subset of a `yt-dlp -J` document the resolver reads.
#[derive(Debug, Deserialize)]
struct VideoInfo {
    #[serde(rename = "_type")]
    kind: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
    webpage_url: Option<String>,
    original_url: Option<String>,
    url: Option<String>,
    entries: Option<Vec<Option<VideoInfo>>>,
}

impl VideoInfo {
    fn is_playlist(&self) -> bool {
        matches!(self.kind.as_deref(), Some("playlist" | "multi_video"))
    }

    /// Page URL of a flat playlist entry.
    fn entry_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or(self.webpage_url.as_deref())
            .filter(|url| is_url(url))
    }

    fn into_track(self, requested: &str) -> Track {
        let source_ref = self
            .webpage_url
            .or(self.original_url)
            .unwrap_or_else(|| requested.to_string());
        let duration = self
            .duration
            .map(|secs| secs.max(0.0).round() as u64)
            .unwrap_or(0);

        Track::new(source_ref, self.title.as_deref().unwrap_or_default(), duration)
    }
}

/// [`TrackResolver`] backed by `yt-dlp`.
pub struct YtDlpResolver<R = ProcessRunner> {
    runner: R,
}

impl YtDlpResolver<ProcessRunner> {
    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(ProcessRunner::new(
            config.ytdlp_path.clone(),
            config.ytdlp_timeout,
            config.max_concurrent_resolutions,
        ))
    }
}

impl<R: CommandRunner> YtDlpResolver<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn run(&self, flags: &[&str], target: &str) -> Result<String, YtDlpError> {
        let mut args: Vec<String> = flags.iter().map(|flag| flag.to_string()).collect();
        args.push("--no-warnings".to_string());
        // Everything after `--` is a URL, never an option.
        args.push("--".to_string());
        args.push(target.to_string());

        self.runner.run(args).await
    }

    async fn fetch_info(&self, flags: &[&str], target: &str) -> Result<VideoInfo, YtDlpError> {
        let stdout = self.run(flags, target).await?;
        Ok(serde_json::from_str(&stdout)?)
    }

    /// Canonical URL of the first search hit.
    async fn search(&self, query: &str) -> MusicResult<String> {
        info!("Searching YouTube for: {}", query);
        let results = self
            .fetch_info(&["-J", "--flat-playlist"], &format!("ytsearch1:{query}"))
            .await
            .map_err(|e| MusicError::resolution(query, e))?;

        results
            .entries
            .into_iter()
            .flatten()
            .flatten()
            .find_map(|entry| entry.entry_url().map(str::to_string))
            .ok_or_else(|| MusicError::NoResults(query.to_string()))
    }

    async fn resolve_url(&self, url: &str, query: &str) -> MusicResult<Resolution> {
        let info = self
            .fetch_info(&["-J", "--flat-playlist"], url)
            .await
            .map_err(|e| MusicError::resolution(query, e))?;

        if !info.is_playlist() {
            let track = info.into_track(url);
            debug!("Resolved '{}' to '{}'", query, track.title());
            return Ok(Resolution::single(track));
        }

        let entries: Vec<VideoInfo> = info.entries.into_iter().flatten().flatten().collect();
        info!("Resolving playlist {} with {} entries", url, entries.len());
        if entries.is_empty() {
            return Err(MusicError::NoResults(query.to_string()));
        }

        let mut resolution = Resolution::default();
        for entry in entries {
            let reference = entry
                .entry_url()
                .map(str::to_string)
                .or_else(|| entry.title.clone())
                .unwrap_or_else(|| "unknown entry".to_string());

            match self.resolve_entry(&entry).await {
                Ok(track) => resolution.tracks.push(track),
                Err(e) => {
                    warn!("Skipping playlist entry {}: {}", reference, e);
                    resolution.failures.push(EntryFailure {
                        error: MusicError::resolution(reference.clone(), e),
                        reference,
                    });
                }
            }
        }

        Ok(resolution)
    }

    async fn resolve_entry(&self, entry: &VideoInfo) -> Result<Track, YtDlpError> {
        let url = entry.entry_url().ok_or(YtDlpError::MissingEntryUrl)?;
        let info = self.fetch_info(&["-J", "--no-playlist"], url).await?;
        Ok(info.into_track(url))
    }
}

#[async_trait]
impl<R: CommandRunner> TrackResolver for YtDlpResolver<R> {
    async fn resolve(&self, query: &str) -> MusicResult<Resolution> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MusicError::InvalidArgument(
                "the query must not be empty".to_string(),
            ));
        }

        if is_url(query) {
            self.resolve_url(query, query).await
        } else {
            let url = self.search(query).await?;
            self.resolve_url(&url, query).await
        }
    }

    async fn refresh_stream_url(&self, source_ref: &str) -> MusicResult<String> {
        let stdout = self
            .run(&["-f", AUDIO_FORMAT, "--no-playlist", "-g"], source_ref)
            .await
            .map_err(|e| MusicError::resolution(source_ref, e))?;

        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| MusicError::resolution(source_ref, YtDlpError::NoStreamUrl))
    }
}
