use clap::Parser;
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sentry_bot::config::{BotSettings, Secrets};
use sentry_bot::discord::{Data, commands, handler};
use sentry_bot::store::DocumentStore;

/// Celestial Sentry — backup-request bot.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the settings file.
    #[arg(long, default_value = "sentry.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    // .env first, so the log filter and secrets can come from it.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = BotSettings::load(&cli.config);

    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            error!("FATAL: {e:#}");
            std::process::exit(1);
        }
    };
    let dev_guild = serenity::GuildId::new(secrets.dev_guild_id);

    // Both documents are loaded once, up front; handlers only see memory.
    let data = Data {
        configs: DocumentStore::load(settings.config_path()),
        war_data: DocumentStore::load(settings.war_data_path()),
        default_thumbnail: settings.branding.default_thumbnail.clone(),
    };

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(handler::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handler::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_in_guild(ctx, &framework.options().commands, dev_guild)
                    .await?;
                info!(
                    "logged in as {} — commands synced for guild {dev_guild}",
                    ready.user.name
                );
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&secrets.token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut client) => {
            if let Err(e) = client.start().await {
                error!("FATAL: bot run failed: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("FATAL: failed to build gateway client: {e}");
            std::process::exit(1);
        }
    }
}
