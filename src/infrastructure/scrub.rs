use regex::Regex;
use std::sync::LazyLock;

const FILTERED: &str = "[FILTERED]";

static BASIC_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Authorization: Basic )[\w+/]+").expect("valid credentials pattern")
});

// Matches both plain JSON and JSON escaped inside a quoted transcript line.
static CARD_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\\?"cardNumber\\?"\s*:\s*\\?")[^"\\]*"#).expect("valid card number pattern")
});

static CVV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\\?"cvv2Code\\?"\s*:\s*\\?")[^"\\]*"#).expect("valid cvv pattern")
});

/// Masks credentials, card numbers and CVVs in an HTTP transcript or request body.
pub fn scrub(transcript: &str) -> String {
    let replacement = format!("${{1}}{FILTERED}");
    let scrubbed = BASIC_CREDENTIALS.replace_all(transcript, replacement.as_str());
    let scrubbed = CARD_NUMBER.replace_all(&scrubbed, replacement.as_str());
    CVV.replace_all(&scrubbed, replacement.as_str()).into_owned()
}
