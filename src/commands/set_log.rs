// Log routing commands - choose where forum posts are mirrored

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::{Context, Error};

/// Configure the forum post log
#[poise::command(slash_command, guild_only, subcommands("channel", "forum", "clear_log"))]
pub async fn set_log(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Set the text channel that receives mirrored forum posts
#[poise::command(slash_command)]
pub async fn channel(
    ctx: Context<'_>,
    #[description = "Text channel that receives the log"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let data = ctx.data();
    let mut settings = data.settings.write().await;

    // Persist first; memory only becomes authoritative after the write lands
    data.store
        .save_log_routing(Some(channel.id.get()), settings.log_forum_channel_id)?;
    settings.log_text_channel_id = Some(channel.id.get());
    drop(settings);

    info!("Log channel set to {}", channel.id);
    ctx.say(format!("Log channel set to <#{}>", channel.id)).await?;
    Ok(())
}

/// Set the forum channel being watched for the log
#[poise::command(slash_command)]
pub async fn forum(
    ctx: Context<'_>,
    #[description = "Forum channel to record"]
    #[channel_types("Forum")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let data = ctx.data();
    let mut settings = data.settings.write().await;

    data.store
        .save_log_routing(settings.log_text_channel_id, Some(channel.id.get()))?;
    settings.log_forum_channel_id = Some(channel.id.get());
    drop(settings);

    info!("Log forum set to {}", channel.id);
    ctx.say(format!("Log forum set to <#{}>", channel.id)).await?;
    Ok(())
}

/// Clear the configured log channels
#[poise::command(slash_command)]
pub async fn clear_log(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let mut settings = data.settings.write().await;

    data.store.clear_log_routing()?;
    settings.log_text_channel_id = None;
    settings.log_forum_channel_id = None;
    drop(settings);

    info!("Log routing cleared");
    ctx.say("Log channel and log forum settings removed.").await?;
    Ok(())
}
