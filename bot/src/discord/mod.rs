pub mod commands;
pub mod controls;
pub mod embeds;
pub mod handler;

use crate::store::{DocumentStore, GuildConfig, WarRecord};

/// Process-wide state shared by every command and interaction handler.
/// The two stores are independent singletons: each owns its own save
/// mutex, so flushing one document never blocks the other.
pub struct Data {
    /// Per-guild configuration, backed by `config.json`.
    pub configs: DocumentStore<GuildConfig>,
    /// Per-guild concluded-war history, backed by `war_data.json`.
    pub war_data: DocumentStore<Vec<WarRecord>>,
    /// Thumbnail used for request embeds when a guild has not set its own.
    pub default_thumbnail: String,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
