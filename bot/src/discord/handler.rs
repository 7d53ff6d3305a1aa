use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use super::controls::{self, WarControl};
use super::{Data, Error, embeds};
use crate::store::WarOutcome;
use crate::war::extract;
use crate::war::request::{self, RequestSnapshot};

/// Dispatch the raw gateway events the command framework doesn't cover:
/// button presses and modal submissions on request messages.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        match interaction {
            serenity::Interaction::Component(component) => {
                if let Some(control) = WarControl::from_custom_id(&component.data.custom_id) {
                    handle_control(ctx, component, control, data).await?;
                }
            }
            serenity::Interaction::Modal(modal)
                if modal.data.custom_id == controls::EDIT_OPPS_MODAL_ID =>
            {
                handle_edit_opps_submit(ctx, modal).await?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// True when the interacting user may operate the request's controls: the
/// original requester or an administrator in that guild.
fn is_author_or_admin(component: &serenity::ComponentInteraction, author_id: u64) -> bool {
    if component.user.id.get() == author_id {
        return true;
    }
    component
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

async fn handle_control(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    control: WarControl,
    data: &Data,
) -> Result<(), Error> {
    let Some(embed) = component.message.embeds.first() else {
        return Ok(());
    };

    let author_id = embed
        .footer
        .as_ref()
        .map(|footer| extract::author_id(&footer.text))
        .unwrap_or(0);
    if !is_author_or_admin(component, author_id) {
        component
            .create_response(
                &ctx.http,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(
                            "Only the person who started the request or an admin can use \
                             these controls.",
                        )
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    }

    if let Some(outcome) = control.outcome() {
        conclude_war(ctx, component, outcome, data).await
    } else {
        open_edit_opps_modal(ctx, component).await
    }
}

/// Apply a terminal transition: record the war (unless debug), then
/// re-render the message read-only with the controls disabled.
async fn conclude_war(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    outcome: WarOutcome,
    data: &Data,
) -> Result<(), Error> {
    let message = &component.message;
    let Some(embed) = message.embeds.first() else {
        return Ok(());
    };

    // Controls are disabled on conclusion; this guards against a stale
    // client concluding an already-terminal request a second time.
    if request::is_concluded(embed.fields.iter().map(|field| field.name.as_str())) {
        component
            .create_response(
                &ctx.http,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content("This backup request has already concluded.")
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    }

    let guild_key = component
        .guild_id
        .map(|guild_id| guild_id.to_string())
        .unwrap_or_default();
    if request::records_history(&message.content) {
        let snapshot = RequestSnapshot::from_embed(embed);
        let started_at = message.id.created_at().with_timezone(&chrono::Utc);
        let ended_at = component.id.created_at().with_timezone(&chrono::Utc);
        let record = snapshot.conclude(
            message.id.get(),
            outcome,
            component.user.id.get(),
            started_at,
            ended_at,
        );

        let mut records = data.war_data.get_or(&guild_key, Vec::new());
        records.push(record);
        data.war_data.set(guild_key.clone(), records);
        data.war_data.save().await;
        info!("war record {} saved for guild {guild_key}", message.id);
    }

    let updated = embeds::concluded(embed, outcome, component.user.id.get());
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content("*This backup request has concluded.*")
                    .embed(updated)
                    .components(vec![controls::control_row(true)]),
            ),
        )
        .await?;
    info!(
        "backup request concluded as {outcome} by {} in guild {guild_key}",
        component.user.name
    );
    Ok(())
}

async fn open_edit_opps_modal(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<(), Error> {
    let current = component
        .message
        .embeds
        .first()
        .and_then(|embed| {
            embed
                .fields
                .iter()
                .find(|field| field.name == extract::FIELD_OPPONENTS)
        })
        .map(|field| extract::strip_code(&field.value).to_string())
        .unwrap_or_default();

    let input = serenity::CreateInputText::new(
        serenity::InputTextStyle::Paragraph,
        "New list of opponents",
        controls::EDIT_OPPS_INPUT_ID,
    )
    .value(current)
    .required(true)
    .max_length(1000)
    .placeholder("Enter the Roblox usernames of the opponents.");

    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Modal(
                serenity::CreateModal::new(controls::EDIT_OPPS_MODAL_ID, "Edit Opponent List")
                    .components(vec![serenity::CreateActionRow::InputText(input)]),
            ),
        )
        .await?;
    Ok(())
}

async fn handle_edit_opps_submit(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
) -> Result<(), Error> {
    let Some(message) = modal.message.as_deref() else {
        return Ok(());
    };
    let Some(embed) = message.embeds.first() else {
        return Ok(());
    };
    let Some(new_opps) = first_input_value(modal) else {
        return Ok(());
    };

    let updated = embeds::with_opponents(embed, &new_opps);
    modal
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new().embed(updated),
            ),
        )
        .await?;
    info!(
        "opponents list edited by {} in guild {:?}",
        modal.user.name, modal.guild_id
    );
    Ok(())
}

fn first_input_value(modal: &serenity::ModalInteraction) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(text) => text.value.clone(),
            _ => None,
        })
}

/// Single top-level boundary for every command failure. The acting user
/// gets a short, friendly message; the full context goes to the log.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::CooldownHit {
            remaining_cooldown,
            ctx,
            ..
        } => {
            let seconds = remaining_cooldown.as_secs().max(1);
            let plural = if seconds == 1 { "" } else { "s" };
            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .content(format!(
                            "⏳ **Woah There, Warrior!**\nThis command is on cooldown. \
                             Please try again in **{seconds}** second{plural}."
                        ))
                        .ephemeral(true),
                )
                .await;
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            warn!(
                "user {} ({}) tried to use /{} without permissions",
                ctx.author().name,
                ctx.author().id,
                ctx.command().name
            );
            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .content(
                            "❌ **Permission Denied**\nYou do not have the required \
                             permissions to run this command.",
                        )
                        .ephemeral(true),
                )
                .await;
        }
        poise::FrameworkError::GuildOnly { ctx, .. }
        | poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            warn!(
                "check failed for user {} ({}) on /{}",
                ctx.author().name,
                ctx.author().id,
                ctx.command().name
            );
            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .content("🚫 **Action Not Allowed**\nYou cannot perform this action.")
                        .ephemeral(true),
                )
                .await;
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "unhandled error in /{} triggered by {} ({}): {error:?}",
                ctx.command().name,
                ctx.author().name,
                ctx.author().id
            );
            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .content(
                            "🐛 **An Unexpected Error Occurred**\nI've encountered a problem \
                             while processing your command. My developer has been notified.",
                        )
                        .ephemeral(true),
                )
                .await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("error while handling error: {e}");
            }
        }
    }
}
