use poise::serenity_prelude as serenity;
use tracing::info;

use crate::discord::{Context, Error, embeds};
use crate::store::GuildConfig;
use crate::war::validation;

/// [ADMIN] Configure the bot for this server.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "The channel where backup requests are sent."]
    #[channel_types("Text")]
    backup_channel: serenity::GuildChannel,
    #[description = "The role to be pinged for backup requests."] backup_role: serenity::Role,
    #[description = "A hex color code for embeds (e.g. #FF5733)."] embed_color: Option<String>,
    #[description = "A URL for the embed thumbnail image."] thumbnail_url: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    // Validate everything before any mutation.
    let embed_color = match embed_color.as_deref() {
        Some(input) => match validation::parse_embed_color(input) {
            Ok(value) => Some(value),
            Err(reason) => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!("❌ **Invalid Color:** {reason}."))
                        .ephemeral(true),
                )
                .await?;
                return Ok(());
            }
        },
        None => None,
    };
    if let Some(url) = thumbnail_url.as_deref() {
        if let Err(reason) = validation::validate_link(url) {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("❌ **Invalid URL:** {reason}."))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    }

    // The whole per-guild record is replaced on every setup.
    let config = GuildConfig {
        allowed_channel_id: backup_channel.id.get(),
        backup_role_id: backup_role.id.get(),
        embed_color,
        thumbnail_url,
    };

    let data = ctx.data();
    data.configs.set(guild_id.to_string(), config.clone());
    data.configs.save().await;

    ctx.send(
        poise::CreateReply::default()
            .embed(embeds::setup_confirmation(&config))
            .ephemeral(true),
    )
    .await?;
    info!(
        "bot configured for guild {guild_id} by admin {} ({})",
        ctx.author().name,
        ctx.author().id
    );
    Ok(())
}
