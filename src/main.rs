mod commands;
mod config;
mod discord;
mod dispatch;
mod exit_on_err;
mod player;
mod roll;
mod store;

use std::sync::Mutex;

use dotenvy::dotenv;
use exit_on_err::MapOrExit;
use poise::{serenity_prelude as serenity, FrameworkError};
use rand::SeedableRng;
use rand_hc::Hc128Rng;

use crate::{config::Config, store::RecordStore};

// User data, which is stored and accessible in all command invocations
pub(crate) struct Data {
    store: RecordStore,
    rng: Mutex<Hc128Rng>,
}

pub(crate) type Error = Box<dyn std::error::Error + Send + Sync>;
pub(crate) type Context<'a> = poise::Context<'a, Data, Error>;
pub(crate) type Result<T> = core::result::Result<T, Error>;

async fn handle_error(error: FrameworkError<'_, Data, Error>) {
    log::error!("Error: {}", error);
    if let Some(ctx) = error.ctx() {
        if let Err(e) = ctx.say(format!("Error: {}", error)).await {
            log::error!("Error sending error message: {}", e);
        }
    }
}

/// Publishes the command list to one guild, or globally when no guild is configured.
async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<Data, Error>],
    guild_id: Option<u64>,
) -> core::result::Result<(), serenity::Error> {
    match guild_id {
        Some(id) => {
            poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id)).await
        }
        None => poise::builtins::register_globally(ctx, commands).await,
    }
}

#[tokio::main]
async fn main() {
    // Load values from .env, if available.
    dotenv().ok();
    pretty_env_logger::init();

    let config = Config::from_env().map_or_exit("Invalid configuration");

    // Refuse to start on an unreadable or malformed document rather than overwrite it.
    let store = RecordStore::new(&config.deck_path);
    let players = store
        .load()
        .map_or_exit("Unable to open the player document");
    log::info!(
        "Loaded {} player(s) from {}",
        players.len(),
        store.path().display()
    );

    let guild_id = config.guild_id;
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(handle_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                log::info!("Connected to Discord as {}!", ready.user.name);

                let commands = &framework.options().commands;
                match register_commands(ctx, commands, guild_id).await {
                    Ok(()) => log::info!("Registered {} commands", commands.len()),
                    Err(e) => log::error!("Failed to register commands: {}", e),
                }

                Ok(Data {
                    store,
                    rng: Mutex::new(Hc128Rng::from_entropy()),
                })
            })
        })
        .build();

    log::info!("Connecting to Discord...");
    let mut client =
        serenity::ClientBuilder::new(config.token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await
            .map_or_exit("Failed to create the Discord client");

    client
        .start()
        .await
        .map_or_exit("Failed to start framework");
}
