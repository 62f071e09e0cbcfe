// Forum log handler - mirrors forum posts and grants roles on message create

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::models::settings::BotSettings;
use crate::utils::config::colors;
use crate::Data;

/// Side effect the router decided on for one message event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    MirrorPost { log_channel: serenity::ChannelId },
    GrantRole { role: serenity::RoleId },
}

/// A message identified as a forum post: sent in a thread whose parent
/// channel is a forum
#[derive(Debug, Clone)]
pub struct ForumPost {
    pub title: String,
    pub parent_forum: serenity::ChannelId,
    pub tag_names: Vec<String>,
}

/// Decide what to do for one message, given the current settings.
///
/// `parent_forum` is the forum channel owning the message's thread, `None`
/// when the message is not a forum post. `resolved_role` is the configured
/// role when it still exists in the message's guild. Predicates short-circuit
/// in order: no log channel means no actions at all, and the grant is only
/// considered for messages that also get mirrored.
pub fn plan_actions(
    settings: &BotSettings,
    parent_forum: Option<serenity::ChannelId>,
    resolved_role: Option<serenity::RoleId>,
) -> Vec<RouteAction> {
    let mut actions = Vec::new();

    let Some(log_channel) = settings.log_text_channel_id else {
        return actions;
    };
    let Some(parent_forum) = parent_forum else {
        return actions;
    };

    actions.push(RouteAction::MirrorPost {
        log_channel: serenity::ChannelId::new(log_channel),
    });

    if settings.role_settings.forum_channel_id == Some(parent_forum.get()) {
        // A role id that no longer resolves is skipped without complaint
        if let Some(role) = resolved_role {
            actions.push(RouteAction::GrantRole { role });
        }
    }

    actions
}

/// Handle a message-create event
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), anyhow::Error> {
    let settings = *data.settings.read().await;
    if settings.log_text_channel_id.is_none() {
        return Ok(());
    }

    let Some(post) = forum_post_info(ctx, msg).await? else {
        return Ok(());
    };

    let resolved_role = resolve_configured_role(ctx, msg, &settings);

    for action in plan_actions(&settings, Some(post.parent_forum), resolved_role) {
        match action {
            RouteAction::MirrorPost { log_channel } => {
                mirror_post(ctx, msg, &post, log_channel).await?;
            }
            RouteAction::GrantRole { role } => {
                if let Some(guild_id) = msg.guild_id {
                    ctx.http
                        .add_member_role(guild_id, msg.author.id, role, None)
                        .await?;
                    info!("Granted role {} to {}", role, msg.author.name);
                }
            }
        }
    }

    Ok(())
}

/// Classify the message's channel; `None` for anything that is not a
/// thread under a forum channel
async fn forum_post_info(
    ctx: &serenity::Context,
    msg: &serenity::Message,
) -> Result<Option<ForumPost>, anyhow::Error> {
    let Some(thread) = msg.channel(ctx).await?.guild() else {
        return Ok(None);
    };
    if !matches!(
        thread.kind,
        serenity::ChannelType::PublicThread
            | serenity::ChannelType::PrivateThread
            | serenity::ChannelType::NewsThread
    ) {
        return Ok(None);
    }
    let Some(parent_id) = thread.parent_id else {
        return Ok(None);
    };
    let Some(parent) = parent_id.to_channel(ctx).await?.guild() else {
        return Ok(None);
    };
    if parent.kind != serenity::ChannelType::Forum {
        return Ok(None);
    }

    // Thread carries tag ids; the parent forum knows their names
    let tag_names = parent
        .available_tags
        .iter()
        .filter(|tag| thread.applied_tags.contains(&tag.id))
        .map(|tag| tag.name.clone())
        .collect();

    Ok(Some(ForumPost {
        title: thread.name.clone(),
        parent_forum: parent.id,
        tag_names,
    }))
}

/// Look up the configured role in the message's guild, `None` when unset
/// or no longer present
fn resolve_configured_role(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    settings: &BotSettings,
) -> Option<serenity::RoleId> {
    let role_id = serenity::RoleId::new(settings.role_settings.role_id?);
    let guild = msg.guild(&ctx.cache)?;
    guild.roles.contains_key(&role_id).then_some(role_id)
}

/// Send the log embed for one forum post
async fn mirror_post(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    post: &ForumPost,
    log_channel: serenity::ChannelId,
) -> Result<(), anyhow::Error> {
    let tags = if post.tag_names.is_empty() {
        "none".to_string()
    } else {
        post.tag_names.join(", ")
    };

    let embed = serenity::CreateEmbed::new()
        .title(post.title.clone())
        .description(msg.content.clone())
        .color(colors::PRIMARY)
        .timestamp(msg.timestamp)
        .thumbnail(
            msg.author
                .avatar_url()
                .unwrap_or_else(|| msg.author.default_avatar_url()),
        )
        .field("Post link", msg.link(), false)
        .field("Tags", tags, false)
        .field("Posted by", msg.author.name.clone(), false);

    log_channel
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await?;

    info!("Mirrored forum post '{}' to {}", post.title, log_channel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::RoleSettings;

    const LOG_CHANNEL: u64 = 100;
    const FORUM: u64 = 200;
    const OTHER_FORUM: u64 = 300;
    const ROLE: u64 = 400;

    fn settings(
        log_text: Option<u64>,
        role_forum: Option<u64>,
        role: Option<u64>,
    ) -> BotSettings {
        BotSettings {
            log_text_channel_id: log_text,
            log_forum_channel_id: None,
            role_settings: RoleSettings {
                forum_channel_id: role_forum,
                role_id: role,
            },
        }
    }

    #[test]
    fn does_nothing_without_a_log_channel() {
        let settings = settings(None, Some(FORUM), Some(ROLE));
        let actions = plan_actions(
            &settings,
            Some(serenity::ChannelId::new(FORUM)),
            Some(serenity::RoleId::new(ROLE)),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn does_nothing_outside_forum_threads() {
        let settings = settings(Some(LOG_CHANNEL), Some(FORUM), Some(ROLE));
        let actions = plan_actions(&settings, None, Some(serenity::RoleId::new(ROLE)));
        assert!(actions.is_empty());
    }

    #[test]
    fn mirrors_forum_posts_when_no_role_forum_is_set() {
        let settings = settings(Some(LOG_CHANNEL), None, None);
        let actions = plan_actions(&settings, Some(serenity::ChannelId::new(FORUM)), None);
        assert_eq!(
            actions,
            vec![RouteAction::MirrorPost {
                log_channel: serenity::ChannelId::new(LOG_CHANNEL)
            }]
        );
    }

    #[test]
    fn mirrors_then_grants_in_the_watched_forum() {
        let settings = settings(Some(LOG_CHANNEL), Some(FORUM), Some(ROLE));
        let actions = plan_actions(
            &settings,
            Some(serenity::ChannelId::new(FORUM)),
            Some(serenity::RoleId::new(ROLE)),
        );
        assert_eq!(
            actions,
            vec![
                RouteAction::MirrorPost {
                    log_channel: serenity::ChannelId::new(LOG_CHANNEL)
                },
                RouteAction::GrantRole {
                    role: serenity::RoleId::new(ROLE)
                },
            ]
        );
    }

    #[test]
    fn skips_the_grant_when_the_role_is_gone() {
        let settings = settings(Some(LOG_CHANNEL), Some(FORUM), Some(ROLE));
        let actions = plan_actions(&settings, Some(serenity::ChannelId::new(FORUM)), None);
        assert_eq!(
            actions,
            vec![RouteAction::MirrorPost {
                log_channel: serenity::ChannelId::new(LOG_CHANNEL)
            }]
        );
    }

    #[test]
    fn skips_the_grant_for_posts_in_other_forums() {
        let settings = settings(Some(LOG_CHANNEL), Some(FORUM), Some(ROLE));
        let actions = plan_actions(
            &settings,
            Some(serenity::ChannelId::new(OTHER_FORUM)),
            Some(serenity::RoleId::new(ROLE)),
        );
        assert_eq!(
            actions,
            vec![RouteAction::MirrorPost {
                log_channel: serenity::ChannelId::new(LOG_CHANNEL)
            }]
        );
    }
}
