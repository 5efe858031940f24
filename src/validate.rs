//! Validation predicates.
//!
//! Every predicate is total: malformed input is simply `false`. The email,
//! URL and UUID checks are deliberately shallow shape checks, not RFC
//! validators.

use once_cell::sync::Lazy;
use regex::Regex;
use rhai::Engine;
use std::any::Any;
use std::borrow::Cow;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const UUID_V4_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
const HEX_COLOR_PATTERN: &str = r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$";
const RGB_COLOR_PATTERN: &str = r"^rgb\(([0-9]{1,3},\s*){2}[0-9]{1,3}\)$";
const BARE_HOST_PATTERN: &str = r"^[a-zA-Z0-9.-]+\.[a-z]{2,}$";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("failed to compile email regex"));
static UUID_V4_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(UUID_V4_PATTERN).expect("failed to compile UUID regex"));
static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(HEX_COLOR_PATTERN).expect("failed to compile hex color regex"));
static RGB_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(RGB_COLOR_PATTERN).expect("failed to compile rgb color regex"));
static BARE_HOST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(BARE_HOST_PATTERN).expect("failed to compile bare host regex"));

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// True for the owned and borrowed string types
pub fn is_string(value: &dyn Any) -> bool {
    value.is::<String>()
        || value.is::<&str>()
        || value.is::<Box<str>>()
        || value.is::<Cow<'static, str>>()
}

// ============================================================================
// Character classes
// ============================================================================

pub fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn is_alphanumeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_numeric_string(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// Structured shapes
// ============================================================================

pub fn is_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

/// Accepts absolute `http`, `https` and `ftp` URLs.
///
/// Bare hosts such as `example.com` or `www.example.com` are checked as if
/// prefixed with `http://`.
pub fn is_url(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let normalized: Cow<'_, str> = if text.starts_with("www.") || BARE_HOST_REGEX.is_match(text)
    {
        Cow::Owned(format!("http://{}", text))
    } else {
        Cow::Borrowed(text)
    };
    url::Url::parse(&normalized)
        .map(|url| URL_SCHEMES.contains(&url.scheme()))
        .unwrap_or(false)
}

/// Version-4 UUID shape, case-insensitive
pub fn is_uuid(text: &str) -> bool {
    UUID_V4_REGEX.is_match(text)
}

/// Dotted quad of 1-3 digit parts, each at most 255
pub fn is_ip_address(text: &str) -> bool {
    let parts: Vec<&str> = text.split('.').collect();
    parts.len() == 4
        && parts.iter().all(|part| {
            (1..=3).contains(&part.len())
                && part.bytes().all(|b| b.is_ascii_digit())
                && part.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
        })
}

pub fn is_hex_color(text: &str) -> bool {
    HEX_COLOR_REGEX.is_match(text)
}

/// `rgb(n, n, n)` shape; components are not range-checked
pub fn is_rgb_color(text: &str) -> bool {
    RGB_COLOR_REGEX.is_match(text)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// At least 8 chars on one line with a lowercase letter, an uppercase
/// letter, a digit and a symbol. `:` and `_` do not count as symbols.
pub fn is_strong_password(text: &str) -> bool {
    if text.chars().count() < 8 || text.chars().any(is_line_terminator) {
        return false;
    }
    let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_symbol = text
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == ':' || c.is_whitespace()));
    has_lower && has_upper && has_digit && has_symbol
}

// ============================================================================
// Palindromes and anagrams
// ============================================================================

pub fn is_strict_palindrome(text: &str) -> bool {
    text.chars().eq(text.chars().rev())
}

fn ascii_alnum_lower(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Palindrome check ignoring case and anything but ASCII letters and digits
pub fn is_loose_palindrome(text: &str) -> bool {
    let cleaned = ascii_alnum_lower(text);
    cleaned.iter().eq(cleaned.iter().rev())
}

pub fn is_anagram(first: &str, second: &str) -> bool {
    let normalize = |text: &str| {
        let mut chars: Vec<char> = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();
        chars.sort_unstable();
        chars
    };
    normalize(first) == normalize(second)
}

// ============================================================================
// Emptiness and case
// ============================================================================

/// Empty or whitespace only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn is_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Zero length only; `" "` is not empty
pub fn is_empty(text: &str) -> bool {
    text.is_empty()
}

pub fn is_upper_case(text: &str) -> bool {
    text == text.to_uppercase()
}

pub fn is_lower_case(text: &str) -> bool {
    text == text.to_lowercase()
}

pub fn is_all_upper_case(text: &str) -> bool {
    is_upper_case(text) && contains_uppercase(text)
}

pub fn is_all_lower_case(text: &str) -> bool {
    is_lower_case(text) && contains_lowercase(text)
}

pub fn contains_uppercase(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_uppercase())
}

pub fn contains_lowercase(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_lowercase())
}

/// Two identical adjacent chars, not counting line breaks
pub fn has_repeated_characters(text: &str) -> bool {
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if is_line_terminator(c) {
            prev = None;
            continue;
        }
        if prev == Some(c) {
            return true;
        }
        prev = Some(c);
    }
    false
}

pub fn ends_with_punctuation(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("is_alpha", is_alpha);
    engine.register_fn("is_alphanumeric", is_alphanumeric);
    engine.register_fn("is_numeric_string", is_numeric_string);
    engine.register_fn("is_email", is_email);
    engine.register_fn("is_url", is_url);
    engine.register_fn("is_uuid", is_uuid);
    engine.register_fn("is_ip_address", is_ip_address);
    engine.register_fn("is_hex_color", is_hex_color);
    engine.register_fn("is_rgb_color", is_rgb_color);
    engine.register_fn("is_strong_password", is_strong_password);
    engine.register_fn("is_strict_palindrome", is_strict_palindrome);
    engine.register_fn("is_loose_palindrome", is_loose_palindrome);
    engine.register_fn("is_anagram", is_anagram);
    engine.register_fn("is_blank", is_blank);
    engine.register_fn("is_whitespace", is_whitespace);
    engine.register_fn("is_upper_case", is_upper_case);
    engine.register_fn("is_lower_case", is_lower_case);
    engine.register_fn("is_all_upper_case", is_all_upper_case);
    engine.register_fn("is_all_lower_case", is_all_lower_case);
    engine.register_fn("contains_uppercase", contains_uppercase);
    engine.register_fn("contains_lowercase", contains_lowercase);
    engine.register_fn("has_repeated_characters", has_repeated_characters);
    engine.register_fn("ends_with_punctuation", ends_with_punctuation);
}
