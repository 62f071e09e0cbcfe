// Kanban Bot
// A lightweight Discord bot that mirrors forum posts and hands out roles

mod commands;
mod features;
mod models;
mod utils;

use std::env;

use poise::serenity_prelude as serenity;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::models::settings::{BotSettings, RoleSettings};
use crate::utils::config::DEFAULT_SETTINGS_FILE;
use crate::utils::storage::SettingsStore;

/// State shared across all commands and event handlers
#[derive(Debug)]
pub struct Data {
    pub settings: RwLock<BotSettings>,
    pub store: SettingsStore,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::set_log::set_log(),
        commands::config::config(),
    ]
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "kanban_rs=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set");
    let settings_path =
        env::var("SETTINGS_FILE").unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());

    info!("Starting Kanban Bot...");

    // Hydrate settings; a malformed file must not be silently reset
    let store = SettingsStore::new(settings_path);
    let (log_text_channel_id, log_forum_channel_id) = store
        .load_log_routing()
        .expect("Failed to load settings file");
    let (forum_channel_id, role_id) = store
        .load_role_settings()
        .expect("Failed to load settings file");
    let settings = BotSettings {
        log_text_channel_id,
        log_forum_channel_id,
        role_settings: RoleSettings {
            forum_channel_id,
            role_id,
        },
    };

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::Message { new_message } = event {
                        features::forum_log::handle_message(ctx, new_message, data).await?;
                    }
                    Ok(())
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("❌ Error: {}", error)).await;
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready! Registering commands...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                Ok(Data {
                    settings: RwLock::new(settings),
                    store,
                })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Failed to create client");

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
}
