//! Reads request state back out of a rendered request message.
//!
//! The displayed message *is* the state of an open request: the embed field
//! names below double as the markers the conclusion path looks for. Anything
//! unrecognizable degrades to [`UNKNOWN`] instead of blocking a conclusion.

use regex::Regex;
use std::sync::OnceLock;

/// Field holding the requester's Discord mention and Roblox handle.
pub const FIELD_USER: &str = "🛡️ User in Need";
/// Field holding the raw comma-separated opponent list.
pub const FIELD_OPPONENTS: &str = "💀 Opponents";
/// Field holding the region the request was made for.
pub const FIELD_REGION: &str = "🌍 Region";
/// Field holding the optional join link.
pub const FIELD_LINK: &str = "🔗 Join Link";
/// Field added on conclusion; its presence marks a request terminal.
pub const FIELD_STATUS: &str = "Status";

/// Fallback for fields that cannot be recognized in a (possibly tampered)
/// request message.
pub const UNKNOWN: &str = "Unknown";

/// Marker carried in the message content of debug requests, which skip
/// history recording entirely.
pub const DEBUG_MARKER: &str = "DEBUG MODE";

fn author_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Author ID: (\d+)").expect("valid author id pattern"))
}

fn roblox_user_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*Roblox:\*\* `(.+?)`").expect("valid roblox user pattern"))
}

/// Pull the requester's user id out of the embed footer text. Returns 0 when
/// the footer is unrecognizable; 0 can never match a real user.
pub fn author_id(footer_text: &str) -> u64 {
    author_id_re()
        .captures(footer_text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Pull the Roblox handle out of the "User in Need" field value.
pub fn roblox_user(field_value: &str) -> Option<String> {
    roblox_user_re()
        .captures(field_value)
        .map(|caps| caps[1].to_string())
}

/// Strip the inline-code backticks a field value was rendered with.
pub fn strip_code(value: &str) -> &str {
    value.trim_matches('`')
}

/// Count opponents in a comma-separated list: split on commas, trim
/// whitespace, drop empty segments. Zero is a valid count.
pub fn count_opponents(raw: &str) -> usize {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_id_found() {
        assert_eq!(
            author_id("Celestial Sentry | The Supreme Manager | Author ID: 424242"),
            424242
        );
    }

    #[test]
    fn test_author_id_missing_is_zero() {
        assert_eq!(author_id("no id in here"), 0);
        assert_eq!(author_id(""), 0);
    }

    #[test]
    fn test_roblox_user_found() {
        let value = "**Discord:** <@42>\n**Roblox:** `Builderman`";
        assert_eq!(roblox_user(value).as_deref(), Some("Builderman"));
    }

    #[test]
    fn test_roblox_user_missing() {
        assert!(roblox_user("**Discord:** <@42>").is_none());
        assert!(roblox_user("").is_none());
    }

    #[test]
    fn test_strip_code() {
        assert_eq!(strip_code("`a, b`"), "a, b");
        assert_eq!(strip_code("plain"), "plain");
        assert_eq!(strip_code("``"), "");
    }

    #[test]
    fn test_count_opponents_trims_and_drops_empties() {
        assert_eq!(count_opponents("a, b,, c ,"), 3);
    }

    #[test]
    fn test_count_opponents_zero_is_valid() {
        assert_eq!(count_opponents(""), 0);
        assert_eq!(count_opponents("  ,  , "), 0);
    }

    #[test]
    fn test_count_opponents_single() {
        assert_eq!(count_opponents("solo_player"), 1);
    }
}
