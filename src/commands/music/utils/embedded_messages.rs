use poise::{CreateReply, serenity_prelude as serenity};
use regex::Regex;
use serenity::all::CreateEmbed;
use std::sync::LazyLock;

use super::format_duration;
use crate::player::{EnqueueReport, MusicError, QueueView, StatusKind, Track};

const SUCCESS: u32 = 0x00ff00;
const FAILURE: u32 = 0xff0000;
const NEUTRAL: u32 = 0x5865f2;

/// Queue entries listed before the rest is summarised.
pub const MAX_LISTED_ENTRIES: usize = 15;

/// Longest title shown in the queue listing, before escaping.
const LISTED_TITLE_CHARS: usize = 100;

/// Discord's limit on embed descriptions, in characters.
pub const DESCRIPTION_LIMIT: usize = 4096;

/// Room kept free for the remainder summary and the total duration.
const SUMMARY_RESERVE: usize = 64;

static MARKDOWN_SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\\*_`~|>\[\]()])").unwrap());

/// Escape characters Discord would otherwise render as formatting.
pub fn escape_markdown(text: &str) -> String {
    MARKDOWN_SPECIAL.replace_all(text, r"\$1").into_owned()
}

fn track_line(track: &Track) -> String {
    format!(
        "**{}** `{}`",
        escape_markdown(track.title()),
        format_duration(track.duration())
    )
}

fn clamp_title(title: &str) -> String {
    if title.chars().count() <= LISTED_TITLE_CHARS {
        return title.to_string();
    }
    let mut clamped: String = title.chars().take(LISTED_TITLE_CHARS - 3).collect();
    clamped.push_str("...");
    clamped
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn volume_percent(gain: f32) -> u32 {
    (gain * 100.0).round() as u32
}

/// Embed for a status message posted by a playback session.
pub fn status_embed(kind: &StatusKind) -> CreateEmbed {
    match kind {
        StatusKind::NowPlaying(track) => CreateEmbed::new()
            .title("🎵 Now Playing")
            .description(track_line(track))
            .color(SUCCESS),
        StatusKind::Paused(track) => CreateEmbed::new()
            .title("⏸️ Paused")
            .description(track_line(track))
            .color(SUCCESS),
        StatusKind::Resumed(track) => CreateEmbed::new()
            .title("▶️ Resumed")
            .description(track_line(track))
            .color(SUCCESS),
        StatusKind::Stopped => CreateEmbed::new()
            .title("⏹️ Stopped")
            .description("Playback stopped and the queue was cleared")
            .color(SUCCESS),
        StatusKind::TrackFailed { title, reason } => CreateEmbed::new()
            .title("❌ Could not play track")
            .description(format!("**{}**\n{}", escape_markdown(title), reason))
            .color(FAILURE),
        StatusKind::QueueFinished => CreateEmbed::new()
            .title("📭 Queue finished")
            .description("Nothing left to play, leaving the voice channel")
            .color(NEUTRAL),
    }
}

pub fn error(err: &MusicError) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(err.to_string())
                .color(FAILURE),
        )
        .ephemeral(true)
}

pub fn enqueued(report: &EnqueueReport) -> CreateReply {
    let mut embed = match report.added.as_slice() {
        [] => CreateEmbed::new()
            .title("❌ Nothing added")
            .description("None of the playlist entries could be resolved")
            .color(FAILURE),
        [track] if report.started_playback => CreateEmbed::new()
            .title("🎵 Now Playing")
            .description(track_line(track))
            .color(SUCCESS),
        [track] => CreateEmbed::new()
            .title("🎵 Added to Queue")
            .description(track_line(track))
            .field("Position", format!("`#{}`", report.queue_len), true)
            .color(SUCCESS),
        tracks => {
            let total = tracks.iter().map(Track::duration).sum();
            CreateEmbed::new()
                .title("🎵 Playlist Added")
                .description(format!(
                    "Queued `{}` tracks, total length `{}`",
                    tracks.len(),
                    format_duration(total)
                ))
                .color(SUCCESS)
        }
    };

    if !report.failures.is_empty() {
        embed = embed.field(
            "Skipped",
            format!("`{}` entries could not be resolved", report.failures.len()),
            false,
        );
    }

    CreateReply::default().embed(embed)
}

pub fn skipped(track: Option<&Track>) -> CreateReply {
    let embed = match track {
        Some(track) => CreateEmbed::new()
            .title("⏭️ Skipped")
            .description(track_line(track))
            .color(SUCCESS),
        None => CreateEmbed::new()
            .title("⏭️ Skipped")
            .description("Nothing was playing")
            .color(NEUTRAL),
    };
    CreateReply::default().embed(embed)
}

// The session also announces pause and resume in the status channel, so the
// command reply is only shown to the caller.
pub fn paused(track: &Track) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("⏸️ Paused")
                .description(track_line(track))
                .color(SUCCESS),
        )
        .ephemeral(true)
}

pub fn resumed(track: &Track) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("▶️ Resumed")
                .description(track_line(track))
                .color(SUCCESS),
        )
        .ephemeral(true)
}

pub fn no_track_playing() -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description("No track is currently playing")
                .color(FAILURE),
        )
        .ephemeral(true)
}

pub fn not_paused() -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description("Playback is not paused")
                .color(FAILURE),
        )
        .ephemeral(true)
}

pub fn stopped() -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("⏹️ Stopped")
                .description("Stopped playback, cleared the queue and left the voice channel")
                .color(SUCCESS),
        )
        .ephemeral(true)
}

pub fn shuffled(count: usize) -> CreateReply {
    let description = if count > 1 {
        format!("Shuffled `{}` tracks", count)
    } else {
        "Not enough tracks in the queue to shuffle".to_string()
    };
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔀 Shuffle")
            .description(description)
            .color(SUCCESS),
    )
}

pub fn volume_set(gain: f32) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔊 Volume")
            .description(format!("Volume set to `{}%`", volume_percent(gain)))
            .color(SUCCESS),
    )
}

pub fn loop_song(enabled: bool) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔂 Loop Song")
            .description(format!("Looping the current song is now **{}**", on_off(enabled)))
            .color(SUCCESS),
    )
}

pub fn loop_queue(enabled: bool) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔁 Loop Queue")
            .description(format!("Looping the queue is now **{}**", on_off(enabled)))
            .color(SUCCESS),
    )
}

pub fn track_removed(track: &Track, position: usize) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🗑️ Track Removed")
            .description(format!("Removed #{} {}", position, track_line(track)))
            .color(SUCCESS),
    )
}

/// Render the queue listing: now playing, the first entries with one-based
/// positions and a summary of everything after them. Long titles are cut
/// short and the listing stops early rather than outgrow an embed.
pub fn queue_description(view: &QueueView) -> String {
    let mut description = String::new();

    match &view.now_playing {
        Some(track) => {
            description.push_str("**🎵 Now Playing**\n");
            description.push_str(&format!(
                "**{}** `{}`",
                escape_markdown(&clamp_title(track.title())),
                format_duration(track.duration())
            ));
            description.push_str("\n\n");
        }
        None => description.push_str("**🔇 Nothing playing**\n\n"),
    }

    if view.is_empty() {
        description.push_str("**📭 Queue is empty**");
    } else {
        description.push_str(&format!("**📋 Queue - {} tracks**\n", view.entries.len()));

        let mut used = description.chars().count();
        let mut listed = 0;
        for entry in view.entries.iter().take(MAX_LISTED_ENTRIES) {
            let line = format!(
                "`{}.` {} `{}`\n",
                entry.index + 1,
                escape_markdown(&clamp_title(&entry.title)),
                format_duration(entry.duration)
            );
            let len = line.chars().count();
            if used + len + SUMMARY_RESERVE > DESCRIPTION_LIMIT {
                break;
            }
            description.push_str(&line);
            used += len;
            listed += 1;
        }

        let remaining = view.entries.len() - listed;
        if remaining > 0 {
            description.push_str(&format!("...and {} more\n", remaining));
        }

        description.push_str(&format!(
            "\n**⏱️ Total Duration:** `{}`",
            format_duration(view.total_duration)
        ));
    }

    description
}

pub fn music_queue(view: &QueueView) -> CreateReply {
    let footer = format!(
        "Volume {}% • Loop song {} • Loop queue {}",
        volume_percent(view.volume),
        on_off(view.loop_song),
        on_off(view.loop_queue)
    );

    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🎵 Music Queue")
            .description(queue_description(view))
            .footer(serenity::CreateEmbedFooter::new(footer))
            .color(SUCCESS),
    )
}
