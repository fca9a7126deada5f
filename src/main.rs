use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rusty_dj::commands::{
    self,
    music::utils::{status_messages::DiscordStatusSink, voice_output::SongbirdOutput},
};
use rusty_dj::config::BotConfig;
use rusty_dj::player::resolver::ytdlp::YtDlpResolver;
use rusty_dj::player::{MusicError, SessionDeps, SessionRegistry};
use rusty_dj::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rusty_dj=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = BotConfig::from_env()?;
    let token = config.discord_token.clone();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let songbird = songbird::get(ctx)
                    .await
                    .ok_or(MusicError::NoVoiceManager)?;

                let deps = SessionDeps {
                    output: Arc::new(SongbirdOutput::new(songbird, reqwest::Client::new())),
                    status: Arc::new(DiscordStatusSink::new(ctx.http.clone())),
                    resolver: Arc::new(YtDlpResolver::from_config(&config)),
                };
                let sessions = Arc::new(SessionRegistry::new(deps, config.default_gain()));

                spawn_shutdown_handler(framework.shard_manager().clone(), sessions.clone());

                Ok(Data { sessions, config })
            })
        })
        .build();

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework)
        .register_songbird()
        .await?;

    client.start().await.map_err(Into::into)
}

/// Leave every voice channel before the process exits on Ctrl-C.
fn spawn_shutdown_handler(
    shard_manager: Arc<serenity::ShardManager>,
    sessions: Arc<SessionRegistry>,
) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }

        info!("Shutting down, stopping {} music session(s)", sessions.len());
        sessions.stop_all().await;
        shard_manager.shutdown_all().await;
    });
}
