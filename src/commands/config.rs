// Config commands - role grant settings

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::utils::config::colors;
use crate::{Context, Error};

/// Manage bot configuration
#[poise::command(slash_command, guild_only, subcommands("role", "clear_role", "get"))]
pub async fn config(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Grant a role to users who post in a forum channel
#[poise::command(slash_command)]
pub async fn role(
    ctx: Context<'_>,
    #[description = "Forum channel to watch"]
    #[channel_types("Forum")]
    forum_channel: serenity::GuildChannel,
    #[description = "Role granted to posting users"] role: serenity::Role,
) -> Result<(), Error> {
    let data = ctx.data();
    let mut settings = data.settings.write().await;

    // Persist first; memory only becomes authoritative after the write lands
    data.store
        .save_role_settings(forum_channel.id.get(), role.id.get())?;
    settings.role_settings.forum_channel_id = Some(forum_channel.id.get());
    settings.role_settings.role_id = Some(role.id.get());
    drop(settings);

    info!("Role {} will be granted for posts in {}", role.id, forum_channel.id);
    ctx.say(format!(
        "Users posting in <#{}> will now receive <@&{}>",
        forum_channel.id, role.id
    ))
    .await?;
    Ok(())
}

/// Remove the configured role grant
#[poise::command(slash_command)]
pub async fn clear_role(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let mut settings = data.settings.write().await;

    data.store.clear_role_settings()?;
    settings.role_settings.forum_channel_id = None;
    settings.role_settings.role_id = None;
    drop(settings);

    info!("Role settings cleared");
    ctx.say("Role grant settings removed.").await?;
    Ok(())
}

/// Show the current configuration
#[poise::command(slash_command)]
pub async fn get(ctx: Context<'_>) -> Result<(), Error> {
    let settings = *ctx.data().settings.read().await;

    let channel_or_unset = |id: Option<u64>| {
        id.map(|id| format!("<#{}>", id))
            .unwrap_or_else(|| "Not set".to_string())
    };
    let role = settings
        .role_settings
        .role_id
        .map(|id| format!("<@&{}>", id))
        .unwrap_or_else(|| "Not set".to_string());

    let embed = serenity::CreateEmbed::new()
        .title("Bot Configuration")
        .field("Log channel", channel_or_unset(settings.log_text_channel_id), true)
        .field("Log forum", channel_or_unset(settings.log_forum_channel_id), true)
        .field(
            "Role forum",
            channel_or_unset(settings.role_settings.forum_channel_id),
            true,
        )
        .field("Granted role", role, true)
        .color(colors::INFO);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
