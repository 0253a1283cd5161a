//! `Set-Cookie` header parsing.
//!
//! A single header value may carry several cookies joined by commas (the
//! legacy Netscape convention). The only comma allowed inside a cookie is
//! the one after the weekday in an `expires` date.

use crate::cookies::cookie::Cookie;
use regex::Regex;
use std::sync::OnceLock;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

fn cookie_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"[^=;,\s][^=;,]*=[^;,]*(?:;\s*(?:(?i:expires)\s*=\s*(?:[A-Za-z]{3,9},)?[^;,]*|[^;,]*))*,?",
        )
        .expect("cookie pattern is valid")
    })
}

/// Parse a raw `Set-Cookie` value into the cookies it contains.
///
/// Never fails: segments that are not `key=value` or a known flag are
/// skipped, and an unparseable `expires` leaves the expiry unset.
pub fn parse_set_cookie(raw: &str) -> Vec<Cookie> {
    cookie_regex()
        .find_iter(raw)
        .map(|m| parse_one(m.as_str().trim_end_matches(',')))
        .collect()
}

fn parse_one(text: &str) -> Cookie {
    let mut cookie = Cookie::new();
    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once('=') else {
            // Bare words count only as flags.
            match segment {
                "secure" => cookie.secure = true,
                "HttpOnly" => cookie.http_only = true,
                _ => {}
            }
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "" => {}
            "domain" => cookie.domain = Some(value.to_string()),
            "path" => cookie.path = Some(value.to_string()),
            "expires" => cookie.expires = parse_expires(value),
            "secure" => cookie.secure = true,
            "HttpOnly" => cookie.http_only = true,
            _ => {
                cookie.attributes.insert(key.to_string(), value.to_string());
            }
        }
    }
    cookie
}

/// Parse an `expires` value, trying `Mon, 02-Jan-2006 15:04:05 MST` and
/// then `Mon, 02-Jan-2006 15:04:05 -0700`. Alphabetic zone names are taken
/// as UTC.
pub fn parse_expires(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Some((stamp, zone)) = value.rsplit_once(' ') {
        if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) {
            return PrimitiveDateTime::parse(
                stamp,
                format_description!(
                    "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second]"
                ),
            )
            .ok()
            .map(PrimitiveDateTime::assume_utc);
        }
    }
    OffsetDateTime::parse(
        value,
        format_description!(
            "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
        ),
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_single_cookie_with_flags() {
        let cookies = parse_set_cookie("a=1; path=/; secure");
        assert_eq!(cookies.len(), 1);
        let c = &cookies[0];
        assert_eq!(c.attributes.len(), 1);
        assert_eq!(c.get("a"), Some("1"));
        assert_eq!(c.path.as_deref(), Some("/"));
        assert!(c.secure);
        assert!(c.domain.is_none());
        assert!(c.expires.is_none());
    }

    #[test]
    fn test_expires_with_named_zone() {
        let cookies =
            parse_set_cookie("sid=abc; expires=Wed, 09-Jun-2021 10:18:14 GMT; HttpOnly");
        assert_eq!(cookies.len(), 1);
        let c = &cookies[0];
        assert_eq!(c.get("sid"), Some("abc"));
        assert_eq!(c.expires, Some(datetime!(2021-06-09 10:18:14 UTC)));
        assert!(c.http_only);
    }

    #[test]
    fn test_expires_with_numeric_offset() {
        assert_eq!(
            parse_expires("Wed, 09-Jun-2021 10:18:14 +0200"),
            Some(datetime!(2021-06-09 10:18:14 +2))
        );
    }

    #[test]
    fn test_unparseable_expires_is_unset() {
        let cookies = parse_set_cookie("a=1; expires=next tuesday; domain=example.com");
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].expires.is_none());
        assert_eq!(cookies[0].domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_multiple_cookies_in_one_header() {
        let cookies = parse_set_cookie(
            "a=1; path=/, b=2; expires=Wed, 09-Jun-2021 10:18:14 GMT; domain=example.com",
        );
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].get("a"), Some("1"));
        assert_eq!(cookies[0].path.as_deref(), Some("/"));
        assert_eq!(cookies[1].get("b"), Some("2"));
        assert!(cookies[1].expires.is_some());
        assert_eq!(cookies[1].domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_reserved_keys_are_case_sensitive() {
        let cookies = parse_set_cookie("a=1; Path=/x; Secure");
        let c = &cookies[0];
        assert!(c.path.is_none());
        assert_eq!(c.get("Path"), Some("/x"));
        // Unknown bare word, skipped.
        assert!(!c.secure);
        assert_eq!(c.attributes.len(), 2);
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let cookies = parse_set_cookie("a=1; ; =orphan; junk; b = 2 ");
        assert_eq!(cookies.len(), 1);
        let c = &cookies[0];
        assert_eq!(c.get("a"), Some("1"));
        assert_eq!(c.get("b"), Some("2"));
        assert_eq!(c.attributes.len(), 2);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let cookies = parse_set_cookie("token=abc==; path=/");
        assert_eq!(cookies[0].get("token"), Some("abc=="));
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(parse_set_cookie("").is_empty());
        assert!(parse_set_cookie("no pairs here").is_empty());
    }
}
