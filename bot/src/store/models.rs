use serde::{Deserialize, Serialize};

/// Per-guild bot configuration, one record per guild in `config.json`.
///
/// A write always replaces the whole record; an absent record means the
/// guild has not run `/setup` yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildConfig {
    pub allowed_channel_id: u64,
    pub backup_role_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Terminal outcome of a backup request. There is no transition out of a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarOutcome {
    Win,
    Loss,
    Truce,
}

impl WarOutcome {
    /// Label written into the Status field and history rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Truce => "Truce",
        }
    }
}

impl std::fmt::Display for WarOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concluded engagement, appended to the guild's list in
/// `war_data.json`. Records are append-only: never mutated after
/// conclusion, only appended or bulk-cleared by `/resetstats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarRecord {
    /// Id of the message that displayed the request.
    pub war_id: u64,
    pub initiator_id: u64,
    pub initiator_roblox_user: String,
    /// The raw comma-separated opponent list, exactly as displayed.
    pub opponents: String,
    pub num_opponents: usize,
    pub region: String,
    /// RFC 3339, creation time of the request message.
    pub start_time_utc: String,
    /// RFC 3339, time of the concluding interaction.
    pub end_time_utc: String,
    pub duration_seconds: f64,
    pub status: WarOutcome,
    pub concluded_by_id: u64,
}
