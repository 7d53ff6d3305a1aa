use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level bot settings, loaded from sentry.toml.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BotSettings {
    pub data: DataSection,
    pub branding: BrandingSection,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding config.json and war_data.json.
    pub dir: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self { dir: ".".into() }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct BrandingSection {
    /// Thumbnail used for request embeds when a guild has not set its own.
    pub default_thumbnail: String,
}

impl Default for BrandingSection {
    fn default() -> Self {
        Self {
            default_thumbnail: "https://i.imgur.com/P5LJ02a.png".into(),
        }
    }
}

impl BotSettings {
    /// Load settings from a TOML file. Falls back to defaults if the file
    /// doesn't exist. Environment variables override TOML values.
    pub fn load(path: &str) -> Self {
        let mut settings = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("failed to read settings file {}: {}", path, e));
            toml::from_str(&contents)
                .unwrap_or_else(|e| panic!("failed to parse settings file {}: {}", path, e))
        } else {
            info!("No settings file found at {}, using defaults", path);
            Self::default()
        };

        settings.apply_env_overrides();
        settings
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("DATA_DIR") {
            self.data.dir = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_THUMBNAIL") {
            self.branding.default_thumbnail = v;
        }
    }

    /// Backing file of the per-guild configuration document.
    pub fn config_path(&self) -> PathBuf {
        Path::new(&self.data.dir).join("config.json")
    }

    /// Backing file of the per-guild war history document.
    pub fn war_data_path(&self) -> PathBuf {
        Path::new(&self.data.dir).join("war_data.json")
    }
}

/// Secrets read once at startup. Absence of either is a fatal startup error.
pub struct Secrets {
    /// Discord gateway token.
    pub token: String,
    /// Guild the slash commands are registered against.
    pub dev_guild_id: u64,
}

impl Secrets {
    /// Read `DISCORD_TOKEN` and `DEV_GUILD_ID` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable not set")?;
        let dev_guild_id: u64 = std::env::var("DEV_GUILD_ID")
            .context("DEV_GUILD_ID environment variable not set")?
            .parse()
            .context("DEV_GUILD_ID must be a numeric guild id")?;
        if dev_guild_id == 0 {
            anyhow::bail!("DEV_GUILD_ID must be a non-zero guild id");
        }
        Ok(Self { token, dev_guild_id })
    }
}
