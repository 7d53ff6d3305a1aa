use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::discord::{Context, Error, controls, embeds};
use crate::store::{DocumentStore, WarRecord};
use crate::war::stats::{self, WarStats};

/// Replace a guild's whole history with an empty sequence, returning how
/// many records were destroyed. The caller persists and reports the count.
fn clear_war_history(store: &DocumentStore<Vec<WarRecord>>, key: &str) -> usize {
    let destroyed = store.get_or(key, Vec::new()).len();
    store.set(key, Vec::new());
    destroyed
}

/// View statistics about past backup requests.
#[poise::command(slash_command, guild_only)]
pub async fn warstats(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();

    let records = data.war_data.get_or(&guild_id.to_string(), Vec::new());
    if records.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("No war data has been recorded for this server yet.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let aggregated = WarStats::from_records(&records);
    let recent = stats::most_recent(&records, 5);

    // The cache ref must not be held across an await.
    let (guild_name, guild_icon) = ctx
        .guild()
        .map(|guild| (guild.name.clone(), guild.icon_url()))
        .unwrap_or_else(|| ("this server".to_string(), None));
    let thumbnail = guild_icon.as_deref().unwrap_or(&data.default_thumbnail);

    ctx.send(
        poise::CreateReply::default().embed(embeds::war_stats(
            &guild_name,
            thumbnail,
            &aggregated,
            &recent,
        )),
    )
    .await?;
    info!("war stats viewed by {} in guild {guild_id}", ctx.author().name);
    Ok(())
}

/// [ADMIN] Reset all war statistics for this server.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn resetstats(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let key = guild_id.to_string();

    if data.war_data.get(&key).is_none_or(|records| records.is_empty()) {
        ctx.send(
            poise::CreateReply::default()
                .content("ℹ️ No war data found for this server; no action is needed.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(
                    "**⚠️ Are you sure?**\nThis action is irreversible and will delete all \
                     war statistics for this server.",
                )
                .components(vec![controls::reset_confirm_row(false)])
                .ephemeral(true),
        )
        .await?;
    let message = reply.message().await?;

    // Only the acting admin may confirm, and only within the timeout.
    let confirmation = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message.id)
        .timeout(Duration::from_secs(60))
        .await;

    match confirmation {
        Some(interaction) => {
            let destroyed = clear_war_history(&data.war_data, &key);
            data.war_data.save().await;
            warn!(
                "war data for guild {key} was reset by admin {} ({destroyed} records destroyed)",
                ctx.author().name
            );

            interaction
                .create_response(
                    ctx.http(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(format!(
                                "✅ **Success!** All **{destroyed}** war records have been \
                                 deleted for this server."
                            ))
                            .components(vec![controls::reset_confirm_row(true)]),
                    ),
                )
                .await?;
        }
        None => {
            reply
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content("Confirmation timed out. No stats were reset.")
                        .components(vec![controls::reset_confirm_row(true)]),
                )
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WarOutcome;

    fn record() -> WarRecord {
        WarRecord {
            war_id: 1,
            initiator_id: 42,
            initiator_roblox_user: "Builderman".into(),
            opponents: "a".into(),
            num_opponents: 1,
            region: "Europe".into(),
            start_time_utc: "2024-05-01T12:00:00+00:00".into(),
            end_time_utc: "2024-05-01T12:01:00+00:00".into(),
            duration_seconds: 60.0,
            status: WarOutcome::Win,
            concluded_by_id: 42,
        }
    }

    #[test]
    fn test_clear_war_history_counts_and_empties() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::<Vec<WarRecord>>::load(dir.path().join("wars.json"));
        store.set("guild", vec![record(), record(), record()]);

        assert_eq!(clear_war_history(&store, "guild"), 3);
        assert_eq!(store.get("guild").map(|r| r.len()), Some(0));
    }

    #[test]
    fn test_clear_war_history_on_empty_guild_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::<Vec<WarRecord>>::load(dir.path().join("wars.json"));

        assert_eq!(clear_war_history(&store, "guild"), 0);
    }
}
