//! URL checks applied when a window is opened.

use url::Url;

const HTTPS_PREFIX: &str = "https://";

/// True when `s`, trimmed, is an absolute `http` or `https` URL.
pub fn validate_url(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Trim `s` and prefix `https://` when it carries no `scheme://` of its own.
///
/// A string that already names a scheme (even a non-web one such as `ftp://`)
/// is returned trimmed but otherwise untouched, so [`validate_url`] rejects it
/// instead of it being smuggled in as a bogus host.
pub fn normalize_url(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() || has_explicit_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("{HTTPS_PREFIX}{trimmed}")
}

fn has_explicit_scheme(s: &str) -> bool {
    let Some(idx) = s.find("://") else {
        return false;
    };
    let scheme = &s[..idx];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
