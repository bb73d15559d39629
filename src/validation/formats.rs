//! String format validators

use regex::Regex;
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

// RFC 5322 dot-atom characters
const ATOM: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";

// Dot-atom on both sides only: quoted local parts ("a b"@x) and domain
// literals (a@[127.0.0.1]) are rejected.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{a}(?:\.{a})*@{a}(?:\.{a})*$", a = ATOM)).expect("invalid regex")
});

static ISO8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?$")
        .expect("invalid regex")
});

/// A bare mailbox address; display names and angle brackets are rejected
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Hyphenated, simple, braced or URN UUID text
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::try_parse(value).is_ok()
}

/// Absolute `http` or `https` URL with a host
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// `YYYY-MM-DDTHH:MM:SS[.fraction][Z|±HH:MM]`
pub fn is_valid_iso8601(value: &str) -> bool {
    ISO8601.is_match(value)
}

/// Validator for a `format` tag value
pub fn validator_for(format: &str) -> Option<fn(&str) -> bool> {
    match format {
        "email" => Some(is_valid_email),
        "uuid" => Some(is_valid_uuid),
        "url" => Some(is_valid_url),
        "iso8601" | "datetime" => Some(is_valid_iso8601),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("Test User <test@example.com>"));
        assert!(!is_valid_email("<test@example.com>"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email(" test@example.com"));
        assert!(!is_valid_email("dot.@example.com"));
    }

    #[test]
    fn test_email_rejects_quoted_and_literal_forms() {
        assert!(!is_valid_email("\"john doe\"@example.com"));
        assert!(!is_valid_email("user@[127.0.0.1]"));
        assert!(!is_valid_email("user@[IPv6:::1]"));
    }

    #[test]
    fn test_uuid() {
        assert!(is_valid_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_valid_uuid("550e8400e29b41d4a716446655440000"));
        assert!(is_valid_uuid("urn:uuid:550e8400-e29b-41d4-a716-446655440000"));
        assert!(!is_valid_uuid("550e8400-e29b-41d4-a716"));
        assert!(!is_valid_uuid("not-a-uuid"));
    }

    #[test]
    fn test_url() {
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("http://localhost:8080"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_iso8601() {
        assert!(is_valid_iso8601("2023-12-25T10:30:45.123Z"));
        assert!(is_valid_iso8601("2023-12-25T10:30:45"));
        assert!(is_valid_iso8601("2023-12-25T10:30:45+05:30"));
        assert!(!is_valid_iso8601("2023-12-25"));
        assert!(!is_valid_iso8601("10:30:45"));
        assert!(!is_valid_iso8601("2023-12-25 10:30:45"));
    }

    #[test]
    fn test_validator_lookup() {
        assert!(validator_for("email").is_some_and(|f| f("a@b.co")));
        assert!(validator_for("phone").is_none());
    }
}
