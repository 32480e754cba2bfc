use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Three dot-separated base64url segments, i.e. a compact JWS.
#[allow(clippy::unwrap_used)]
static JWT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

/// Mask emails and identity tokens in free text before it reaches a log line.
///
/// Emails keep their first character and full domain (`u***@example.com`);
/// tokens become `[REDACTED_TOKEN]`. Tokens are replaced first so an email
/// never matches inside one.
pub fn redact(input: &str) -> String {
    let without_tokens = JWT_REGEX.replace_all(input, "[REDACTED_TOKEN]");

    EMAIL_REGEX
        .replace_all(&without_tokens, |caps: &regex::Captures| {
            let found = &caps[0];
            match found.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    let first: String = local.chars().take(1).collect();
                    format!("{first}***@{domain}")
                }
                _ => found.to_string(),
            }
        })
        .into_owned()
}

/// Display wrapper that redacts on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
