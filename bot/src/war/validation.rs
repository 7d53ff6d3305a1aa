use regex::Regex;
use std::sync::OnceLock;

/// Parse a 6-digit hex embed color, with or without a leading `#`.
pub fn parse_embed_color(input: &str) -> Result<u32, String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^#?([A-Fa-f0-9]{6})$").expect("valid color pattern"));

    re.captures(input.trim())
        .and_then(|caps| u32::from_str_radix(&caps[1], 16).ok())
        .ok_or_else(|| "Please use a valid 6-digit hex format (e.g. `#FF5733`)".to_string())
}

/// Validate that a user-supplied link is an http(s) URL.
pub fn validate_link(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err("Please provide a valid URL starting with `http://` or `https://`".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_with_and_without_hash() {
        assert_eq!(parse_embed_color("#FF5733"), Ok(0xFF5733));
        assert_eq!(parse_embed_color("FF5733"), Ok(0xFF5733));
    }

    #[test]
    fn test_color_is_case_insensitive() {
        assert_eq!(parse_embed_color("#ff5733"), Ok(0xFF5733));
        assert_eq!(parse_embed_color("#AbCdEf"), Ok(0xABCDEF));
    }

    #[test]
    fn test_color_rejects_bad_input() {
        assert!(parse_embed_color("#FFF").is_err());
        assert!(parse_embed_color("#FF57333").is_err());
        assert!(parse_embed_color("#GG5733").is_err());
        assert!(parse_embed_color("red").is_err());
        assert!(parse_embed_color("").is_err());
    }

    #[test]
    fn test_link_requires_http_scheme() {
        assert!(validate_link("https://example.com/join").is_ok());
        assert!(validate_link("http://example.com").is_ok());
        assert!(validate_link("ftp://example.com").is_err());
        assert!(validate_link("example.com").is_err());
        assert!(validate_link("").is_err());
    }
}
