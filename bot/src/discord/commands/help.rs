use crate::discord::{Context, Error, embeds};

use super::ADMIN_COMMANDS;

/// Shows a list of all available commands.
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let entries: Vec<(String, String)> = ctx
        .framework()
        .options()
        .commands
        .iter()
        .map(|command| {
            let mut description = command.description.clone().unwrap_or_default();
            if ADMIN_COMMANDS.contains(&command.name.as_str()) {
                description.push_str(" `[ADMIN]`");
            }
            (format!("/{}", command.name), description)
        })
        .collect();

    ctx.send(
        poise::CreateReply::default()
            .embed(embeds::command_list(&entries))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
