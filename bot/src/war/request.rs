use chrono::{DateTime, Utc};
use poise::serenity_prelude::Embed;

use super::extract;
use crate::store::{WarOutcome, WarRecord};

/// The fields of an open request, read back from its rendered embed.
///
/// Unrecognizable fields degrade to `"Unknown"` (and the initiator id to 0)
/// rather than failing the transition; a tampered message still concludes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub initiator_id: u64,
    pub initiator_roblox_user: String,
    pub opponents: String,
    pub region: String,
}

impl RequestSnapshot {
    /// Read the request state out of a rendered embed.
    pub fn from_embed(embed: &Embed) -> Self {
        Self::from_parts(
            embed.footer.as_ref().map(|footer| footer.text.as_str()),
            embed
                .fields
                .iter()
                .map(|field| (field.name.as_str(), field.value.as_str())),
        )
    }

    /// Read the request state from a footer text and `(name, value)` field
    /// pairs.
    pub fn from_parts<'a>(
        footer: Option<&str>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut snapshot = Self {
            initiator_id: footer.map(extract::author_id).unwrap_or(0),
            initiator_roblox_user: extract::UNKNOWN.to_string(),
            opponents: extract::UNKNOWN.to_string(),
            region: extract::UNKNOWN.to_string(),
        };

        for (name, value) in fields {
            match name {
                extract::FIELD_USER => {
                    if let Some(user) = extract::roblox_user(value) {
                        snapshot.initiator_roblox_user = user;
                    }
                }
                extract::FIELD_OPPONENTS => {
                    snapshot.opponents = extract::strip_code(value).to_string();
                }
                extract::FIELD_REGION => {
                    snapshot.region = extract::strip_code(value).to_string();
                }
                _ => {}
            }
        }

        snapshot
    }

    /// Build the history row for this request's terminal transition.
    pub fn conclude(
        &self,
        war_id: u64,
        outcome: WarOutcome,
        concluded_by_id: u64,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> WarRecord {
        let duration = ended_at.signed_duration_since(started_at);
        WarRecord {
            war_id,
            initiator_id: self.initiator_id,
            initiator_roblox_user: self.initiator_roblox_user.clone(),
            opponents: self.opponents.clone(),
            num_opponents: extract::count_opponents(&self.opponents),
            region: self.region.clone(),
            start_time_utc: started_at.to_rfc3339(),
            end_time_utc: ended_at.to_rfc3339(),
            duration_seconds: duration.num_milliseconds() as f64 / 1000.0,
            status: outcome,
            concluded_by_id,
        }
    }
}

/// Whether a concluded request is recorded into history. Debug requests
/// carry a marker in their message content and skip recording entirely,
/// while still rendering the terminal UI.
pub fn records_history(message_content: &str) -> bool {
    !message_content.contains(extract::DEBUG_MARKER)
}

/// A request whose embed already carries a Status field has concluded.
/// The controls are disabled on conclusion; this guards the transition
/// against a stale client submitting against an un-edited message.
pub fn is_concluded<'a>(field_names: impl IntoIterator<Item = &'a str>) -> bool {
    field_names
        .into_iter()
        .any(|name| name == extract::FIELD_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FOOTER: &str = "Celestial Sentry | The Supreme Manager | Author ID: 42";

    fn open_request_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                extract::FIELD_USER,
                "**Discord:** <@42>\n**Roblox:** `Builderman`",
            ),
            (extract::FIELD_OPPONENTS, "`a, b,, c ,`"),
            (extract::FIELD_REGION, "`Europe`"),
            (extract::FIELD_LINK, "*No link provided.*"),
        ]
    }

    #[test]
    fn test_snapshot_reads_rendered_fields() {
        let snapshot = RequestSnapshot::from_parts(Some(FOOTER), open_request_fields());
        assert_eq!(snapshot.initiator_id, 42);
        assert_eq!(snapshot.initiator_roblox_user, "Builderman");
        assert_eq!(snapshot.opponents, "a, b,, c ,");
        assert_eq!(snapshot.region, "Europe");
    }

    #[test]
    fn test_tampered_message_degrades_to_unknown() {
        let snapshot =
            RequestSnapshot::from_parts(None, vec![("Completely different field", "junk")]);
        assert_eq!(snapshot.initiator_id, 0);
        assert_eq!(snapshot.initiator_roblox_user, extract::UNKNOWN);
        assert_eq!(snapshot.opponents, extract::UNKNOWN);
        assert_eq!(snapshot.region, extract::UNKNOWN);
    }

    #[test]
    fn test_conclude_builds_record_with_duration() {
        let snapshot = RequestSnapshot::from_parts(Some(FOOTER), open_request_fields());
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ended = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let record = snapshot.conclude(999, WarOutcome::Win, 43, started, ended);
        assert_eq!(record.war_id, 999);
        assert_eq!(record.initiator_id, 42);
        assert_eq!(record.num_opponents, 3);
        assert_eq!(record.duration_seconds, 1800.0);
        assert_eq!(record.status, WarOutcome::Win);
        assert_eq!(record.concluded_by_id, 43);
        assert!(record.end_time_utc >= record.start_time_utc);
    }

    #[test]
    fn test_conclude_with_zero_elapsed_time_is_valid() {
        let snapshot = RequestSnapshot::from_parts(Some(FOOTER), open_request_fields());
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let record = snapshot.conclude(999, WarOutcome::Truce, 42, instant, instant);
        assert_eq!(record.duration_seconds, 0.0);
        assert_eq!(record.start_time_utc, record.end_time_utc);
    }

    #[test]
    fn test_debug_requests_skip_history() {
        assert!(!records_history("**DEBUG MODE:** No roles pinged."));
        assert!(records_history("<@&123456>"));
        assert!(records_history(""));
    }

    #[test]
    fn test_is_concluded_detects_status_field() {
        assert!(is_concluded(vec![extract::FIELD_USER, extract::FIELD_STATUS]));
        assert!(!is_concluded(vec![
            extract::FIELD_USER,
            extract::FIELD_OPPONENTS,
        ]));
        assert!(!is_concluded(Vec::new()));
    }
}
