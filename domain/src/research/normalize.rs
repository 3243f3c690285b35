//! URL normalization used as the identity of a [`Source`](super::source::Source).
//!
//! Two urls name the same source when their normalized forms are equal:
//!
//! - scheme, host and path compared case-insensitively
//! - default ports, userinfo, query string and fragment ignored
//! - trailing slashes ignored (`http://x.com/a/` == `http://x.com/a`)
//! - `http` and `https` stay distinct
//!
//! Strings that are not absolute http(s) urls normalize to their trimmed,
//! lowercased text.

use url::Url;

/// Normalize a url into its dedup key. Idempotent.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();

    let Ok(parsed) = Url::parse(trimmed) else {
        return trimmed.to_lowercase();
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return trimmed.to_lowercase();
    }
    let Some(host) = parsed.host_str() else {
        return trimmed.to_lowercase();
    };

    let mut key = format!("{}://{}", parsed.scheme(), host);
    // `port()` is None when the port is the scheme default
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }
    key.push_str(parsed.path().trim_end_matches('/'));
    key.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(normalize_url("http://x.com/a"), normalize_url("http://x.com/a/"));
        assert_eq!(normalize_url("http://x.com/"), "http://x.com");
        assert_eq!(normalize_url("http://x.com"), "http://x.com");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            normalize_url("HTTPS://Example.COM/Docs/Page"),
            "https://example.com/docs/page"
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            normalize_url("https://x.com/article?utm_source=feed#intro"),
            "https://x.com/article"
        );
    }

    #[test]
    fn test_default_port_dropped_custom_port_kept() {
        assert_eq!(normalize_url("https://x.com:443/a"), "https://x.com/a");
        assert_eq!(normalize_url("http://x.com:8080/a"), "http://x.com:8080/a");
    }

    #[test]
    fn test_userinfo_dropped() {
        assert_eq!(normalize_url("https://user:pw@x.com/a"), "https://x.com/a");
    }

    #[test]
    fn test_scheme_kept_distinct() {
        assert_ne!(normalize_url("http://x.com/a"), normalize_url("https://x.com/a"));
    }

    #[test]
    fn test_non_http_falls_back_to_lowercase_text() {
        assert_eq!(normalize_url("  Tavily Summary "), "tavily summary");
        assert_eq!(normalize_url("mailto:Someone@X.com"), "mailto:someone@x.com");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "http://x.com/a/",
            "HTTPS://Example.COM:443/Docs/?q=1#frag",
            "http://x.com",
            "not a url",
            "https://x.com/caf%C3%A9//",
        ] {
            let once = normalize_url(raw);
            assert_eq!(normalize_url(&once), once, "not idempotent for {raw}");
        }
    }
}
