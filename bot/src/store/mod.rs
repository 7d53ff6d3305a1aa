pub mod document;
pub mod models;

pub use document::DocumentStore;
pub use models::{GuildConfig, WarOutcome, WarRecord};
