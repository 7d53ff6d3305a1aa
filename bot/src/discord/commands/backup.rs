use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::{error, info};

use crate::discord::{Context, Error, controls, embeds};
use crate::war::{extract, validation};

/// Fixed region choices offered by the backup commands.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum Region {
    #[name = "🇺🇸 US East"]
    UsEast,
    #[name = "🇺🇸 US West"]
    UsWest,
    #[name = "🇪🇺 Europe"]
    Europe,
    #[name = "🇦🇺 Australia"]
    Australia,
    #[name = "🇸🇬 Asia"]
    Asia,
    #[name = "❓ Unknown"]
    Unknown,
}

impl Region {
    /// The plain value rendered into the request embed and history rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UsEast => "US East",
            Self::UsWest => "US West",
            Self::Europe => "Europe",
            Self::Australia => "Australia",
            Self::Asia => "Asia",
            Self::Unknown => "Unknown",
        }
    }
}

/// Request backup from your allies.
#[poise::command(slash_command, guild_only, member_cooldown = 60)]
pub async fn backup(
    ctx: Context<'_>,
    #[description = "Your Roblox username or profile link."] roblox_user: String,
    #[description = "The usernames of the players teaming on you."] opps: String,
    #[description = "The region you are playing in."] region: Region,
    #[description = "Optional: A private server link for easy joining."] link: Option<String>,
) -> Result<(), Error> {
    send_backup_request(ctx, roblox_user, opps, region, link, false).await
}

/// [ADMIN] Create a backup request without pinging roles.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn debugbackup(
    ctx: Context<'_>,
    #[description = "Your Roblox username or profile link."] roblox_user: String,
    #[description = "The usernames of the players teaming on you."] opps: String,
    #[description = "The region you are playing in."] region: Region,
    #[description = "Optional: A private server link for easy joining."] link: Option<String>,
) -> Result<(), Error> {
    send_backup_request(ctx, roblox_user, opps, region, link, true).await
}

/// Shared body of `/backup` and `/debugbackup`: validate, render the
/// request embed with its control row, ping the backup role (real
/// requests only).
async fn send_backup_request(
    ctx: Context<'_>,
    roblox_user: String,
    opps: String,
    region: Region,
    link: Option<String>,
    is_debug: bool,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();

    let Some(config) = data.configs.get(&guild_id.to_string()) else {
        ctx.send(
            poise::CreateReply::default()
                .content(
                    "**Bot Not Configured!** An administrator must run the `/setup` \
                     command first.",
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    if ctx.channel_id().get() != config.allowed_channel_id {
        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "You can only use this command in the <#{}> channel.",
                    config.allowed_channel_id
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let backup_role_id = serenity::RoleId::new(config.backup_role_id);
    let role_exists = ctx
        .guild()
        .is_some_and(|guild| guild.roles.contains_key(&backup_role_id));
    if !role_exists && !is_debug {
        error!(
            "config error in guild {guild_id}: backup role {backup_role_id} not found"
        );
        ctx.send(
            poise::CreateReply::default()
                .content(
                    "Configuration Error: The backup role was not found. An admin should \
                     re-run `/setup`.",
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    if let Some(link) = link.as_deref() {
        if let Err(reason) = validation::validate_link(link) {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("**Invalid Link:** {reason}."))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    }

    let embed = embeds::backup_request(
        &config,
        &data.default_thumbnail,
        ctx.author().id.get(),
        &roblox_user,
        &opps,
        region.as_str(),
        link.as_deref(),
    );

    let (content, mentions) = if is_debug {
        (
            format!("**{}:** No roles pinged.", extract::DEBUG_MARKER),
            serenity::CreateAllowedMentions::new(),
        )
    } else {
        (
            backup_role_id.mention().to_string(),
            serenity::CreateAllowedMentions::new().roles(vec![backup_role_id]),
        )
    };

    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .embed(embed)
            .allowed_mentions(mentions)
            .components(vec![controls::control_row(false)]),
    )
    .await?;
    info!(
        "backup request started by {} in guild {guild_id} (debug: {is_debug})",
        ctx.author().name
    );

    if link.is_none() {
        ctx.send(
            poise::CreateReply::default()
                .content(
                    "**Friendly Reminder:** You didn't provide a server link. Make sure \
                     your **Roblox joins are on** so people can help!",
                )
                .ephemeral(true),
        )
        .await?;
    }
    Ok(())
}
