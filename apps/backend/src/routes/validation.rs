//! Field checks shared by the request bodies.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value.trim())
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
