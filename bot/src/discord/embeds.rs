//! Builders for every embed the bot renders. The request embed is also the
//! request's state: its fields are read back on conclusion (see
//! [`crate::war::extract`]), so field layout changes here must keep the
//! extraction markers intact.

use poise::serenity_prelude::{Colour, CreateEmbed, CreateEmbedFooter, Embed};

use crate::store::{GuildConfig, WarOutcome, WarRecord};
use crate::war::extract;
use crate::war::stats::{self, WarStats};

const GOLD: Colour = Colour(0xF1C40F);
const GREEN: Colour = Colour(0x2ECC71);
const RED: Colour = Colour(0xE74C3C);
const LIGHT_GREY: Colour = Colour(0x979C9F);
const BLUE: Colour = Colour(0x3498DB);
const BLURPLE: Colour = Colour(0x5865F2);

/// The embed body of a live backup request.
pub fn backup_request(
    config: &GuildConfig,
    default_thumbnail: &str,
    initiator_id: u64,
    roblox_user: &str,
    opps: &str,
    region: &str,
    link: Option<&str>,
) -> CreateEmbed {
    let colour = config.embed_color.map(Colour::new).unwrap_or(GOLD);
    let thumbnail = config.thumbnail_url.as_deref().unwrap_or(default_thumbnail);
    let user_info = format!("**Discord:** <@{initiator_id}>\n**Roblox:** `{roblox_user}`");
    let link_value = match link {
        Some(url) => format!("[Click Here to Join]({url})"),
        None => "*No link provided. Join via user's Roblox profile.*".to_string(),
    };

    CreateEmbed::new()
        .title("⚔️ Backup Request! ⚔️")
        .description("A warrior requires aid! The status of this engagement is **Ongoing**.")
        .colour(colour)
        .thumbnail(thumbnail)
        .field(extract::FIELD_USER, user_info, false)
        .field(extract::FIELD_OPPONENTS, format!("`{opps}`"), false)
        .field(extract::FIELD_REGION, format!("`{region}`"), false)
        .field(extract::FIELD_LINK, link_value, false)
        .footer(CreateEmbedFooter::new(format!(
            "Celestial Sentry | The Supreme Manager | Author ID: {initiator_id}"
        )))
}

fn outcome_title(outcome: WarOutcome) -> &'static str {
    match outcome {
        WarOutcome::Win => "✔️ Backup Concluded (VICTORY!) ✔️",
        WarOutcome::Loss => "❌ Backup Concluded (DEFEAT) ❌",
        WarOutcome::Truce => "🤝 Backup Concluded (TRUCE) 🤝",
    }
}

fn outcome_colour(outcome: WarOutcome) -> Colour {
    match outcome {
        WarOutcome::Win => GREEN,
        WarOutcome::Loss => RED,
        WarOutcome::Truce => LIGHT_GREY,
    }
}

/// Re-render a request embed read-only at its terminal transition: new
/// title and colour, a Status field, original request fields untouched.
pub fn concluded(original: &Embed, outcome: WarOutcome, concluded_by_id: u64) -> CreateEmbed {
    CreateEmbed::from(original.clone())
        .title(outcome_title(outcome))
        .colour(outcome_colour(outcome))
        .description("This engagement has concluded.")
        .field(
            extract::FIELD_STATUS,
            format!("Concluded as a **{outcome}** by <@{concluded_by_id}>"),
            false,
        )
}

/// Rebuild a request embed with its Opponents field replaced in place.
pub fn with_opponents(original: &Embed, new_opps: &str) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &original.title {
        builder = builder.title(title.clone());
    }
    if let Some(description) = &original.description {
        builder = builder.description(description.clone());
    }
    if let Some(colour) = original.colour {
        builder = builder.colour(colour);
    }
    if let Some(thumbnail) = &original.thumbnail {
        builder = builder.thumbnail(thumbnail.url.clone());
    }
    if let Some(footer) = &original.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer.text.clone()));
    }
    for field in &original.fields {
        let value = if field.name == extract::FIELD_OPPONENTS {
            format!("`{new_opps}`")
        } else {
            field.value.clone()
        };
        builder = builder.field(field.name.clone(), value, field.inline);
    }
    builder
}

/// Ephemeral confirmation shown after a successful `/setup`.
pub fn setup_confirmation(config: &GuildConfig) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title("✅ Configuration Updated!")
        .description("The bot's settings have been updated.")
        .colour(GREEN)
        .field(
            "Backup Channel",
            format!("<#{}>", config.allowed_channel_id),
            false,
        )
        .field(
            "Backup Role",
            format!("<@&{}>", config.backup_role_id),
            false,
        );

    if let Some(color) = config.embed_color {
        builder = builder.field("Embed Color", format!("`#{color:06X}`"), true);
    }
    if let Some(url) = &config.thumbnail_url {
        builder = builder.field("Thumbnail URL", format!("[Link]({url})"), true);
    }
    builder
}

/// The `/help` command list; `entries` is `(command, description)` with the
/// admin tag already applied.
pub fn command_list(entries: &[(String, String)]) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title("Celestial Sentry Commands")
        .description("Here's a list of commands you can use:")
        .colour(BLURPLE);
    for (name, description) in entries {
        builder = builder.field(name, description, false);
    }
    builder.footer(CreateEmbedFooter::new(
        "Contact an administrator for help with admin-only commands.",
    ))
}

/// The `/warstats` summary for one guild.
pub fn war_stats(
    guild_name: &str,
    thumbnail: &str,
    stats: &WarStats,
    recent: &[&WarRecord],
) -> CreateEmbed {
    let win_rate = stats.win_rate().unwrap_or(0.0);
    let recent_lines: Vec<String> = recent
        .iter()
        .map(|record| {
            let started = chrono::DateTime::parse_from_rfc3339(&record.start_time_utc)
                .map(|t| t.timestamp())
                .unwrap_or(0);
            format!(
                "<t:{started}:R>: **{}** vs {} opp(s) by <@{}>",
                record.status, record.num_opponents, record.initiator_id
            )
        })
        .collect();

    let mut builder = CreateEmbed::new()
        .title(format!("War Statistics for {guild_name}"))
        .description(format!(
            "Analysis of **{}** concluded engagements.",
            stats.total
        ))
        .colour(BLUE)
        .thumbnail(thumbnail)
        .field(
            "📈 Overall Record",
            format!(
                "**{}** Wins / **{}** Losses / **{}** Truces",
                stats.wins, stats.losses, stats.truces
            ),
            false,
        )
        .field(
            "📊 Win Rate",
            format!("`{win_rate:.1}%` (Based on Wins and Losses)"),
            true,
        )
        .field(
            "⏱️ Avg. Duration (H:M:S)",
            format!("`{}`", stats::format_hms(stats.average_duration_seconds)),
            true,
        );

    if !recent_lines.is_empty() {
        builder = builder.field("📜 Recent Engagements", recent_lines.join("\n"), false);
    }
    builder
}
