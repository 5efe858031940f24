//! Case conversion and word-boundary transforms.
//!
//! Boundaries are runs of whitespace, hyphens and underscores, lower-to-upper
//! humps, and (for kebab/snake) digit-to-letter transitions.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rhai::Engine;

static CAMEL_ALREADY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("failed to compile camel regex"));
static CAMEL_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9]+([a-zA-Z0-9_])").expect("failed to compile camel boundary regex")
});
static CAMEL_LEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^a-zA-Z0-9]*([a-zA-Z])").expect("failed to compile camel leading regex")
});
static HUMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("failed to compile hump regex"));
static DIGIT_LETTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9])([a-zA-Z])").expect("failed to compile digit regex"));
static KEBAB_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("failed to compile kebab regex"));
static SNAKE_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s-]+").expect("failed to compile snake regex"));
static NON_ALNUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("failed to compile non-alnum regex"));
static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"));
static DASH_UNDERSCORE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_-]+").expect("failed to compile dash regex"));
static WORD_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9_]").expect("failed to compile word start regex")
});
static SENTENCE_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^\s*[A-Za-z0-9_]|[.!?]\s*[A-Za-z0-9_])")
        .expect("failed to compile sentence start regex")
});
static SNAKE_JOIN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([A-Za-z0-9_])").expect("failed to compile snake join regex"));
static SLUG_JOIN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([a-z])").expect("failed to compile slug join regex"));

fn map_first_char(text: &str, f: impl FnOnce(char) -> String) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out = f(first);
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    map_first_char(text, |c| c.to_uppercase().collect())
}

pub fn to_upper_first_char(text: &str) -> String {
    capitalize(text)
}

/// Lowercase the first character, leave the rest untouched
pub fn decapitalize(text: &str) -> String {
    map_first_char(text, |c| c.to_lowercase().collect())
}

pub fn to_lower_first_char(text: &str) -> String {
    decapitalize(text)
}

/// Capitalize the first char of a word and lowercase the remainder
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// `hello_world -foo bar` -> `helloWorldFooBar`
pub fn to_camel_case(text: &str) -> String {
    if CAMEL_ALREADY_REGEX.is_match(text) {
        return text.to_string();
    }
    let lowered = text.to_lowercase();
    let joined =
        CAMEL_BOUNDARY_REGEX.replace_all(&lowered, |caps: &Captures| caps[1].to_uppercase());
    CAMEL_LEADING_REGEX
        .replace(&joined, |caps: &Captures| caps[1].to_lowercase())
        .into_owned()
}

fn split_humps(text: &str, delimiter: &str) -> String {
    let replacement = format!("${{1}}{}${{2}}", delimiter);
    let humped = HUMP_REGEX.replace_all(text, replacement.as_str());
    DIGIT_LETTER_REGEX
        .replace_all(&humped, replacement.as_str())
        .into_owned()
}

pub fn to_kebab_case(text: &str) -> String {
    let split = split_humps(text.trim(), "-");
    KEBAB_SEPARATOR_REGEX
        .replace_all(&split, "-")
        .to_lowercase()
}

pub fn to_snake_case(text: &str) -> String {
    let split = split_humps(text, "_");
    SNAKE_SEPARATOR_REGEX
        .replace_all(&split, "_")
        .to_lowercase()
}

pub fn to_pascal_case(text: &str) -> String {
    let spaced = NON_ALNUM_REGEX.replace_all(text, " ");
    spaced.trim().split(' ').map(capitalize_word).collect()
}

/// Whitespace runs become dots; underscores and hyphens are kept
pub fn to_dot_case(text: &str) -> String {
    WHITESPACE_REGEX
        .replace_all(text.trim(), ".")
        .to_lowercase()
}

/// Separators and humps become single spaces; letter case is preserved
pub fn to_space_case(text: &str) -> String {
    let spaced = DASH_UNDERSCORE_REGEX.replace_all(text, " ");
    HUMP_REGEX.replace_all(&spaced, "$1 $2").into_owned()
}

/// Capitalize every word and lowercase the rest.
///
/// Leading and trailing whitespace survive as-is; interior runs collapse to a
/// single space.
pub fn title_case(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    let titled = trimmed
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}{}{}", leading, titled, trailing)
}

/// Uppercase the first character of every word, nothing else changes
pub fn to_title_case(text: &str) -> String {
    WORD_START_REGEX
        .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

fn invert_case(c: char) -> String {
    if c.to_uppercase().eq(std::iter::once(c)) {
        c.to_lowercase().collect()
    } else {
        c.to_uppercase().collect()
    }
}

pub fn swap_case(text: &str) -> String {
    text.chars().map(invert_case).collect()
}

pub fn toggle_case(text: &str) -> String {
    swap_case(text)
}

/// Upper at even positions, lower at odd positions
pub fn alternate_case(text: &str) -> String {
    text.chars()
        .enumerate()
        .flat_map(|(i, c)| {
            if i % 2 == 0 {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

/// Each ASCII capital becomes `_` plus its lowercase form
pub fn camel_to_snake(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn snake_to_camel(text: &str) -> String {
    let joined = SNAKE_JOIN_REGEX.replace_all(text, |caps: &Captures| caps[1].to_uppercase());
    joined.trim_matches('_').to_string()
}

pub fn slug_to_camel_case(text: &str) -> String {
    SLUG_JOIN_REGEX
        .replace_all(text, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

pub fn camel_case_to_slug(text: &str) -> String {
    HUMP_REGEX.replace_all(text, "$1-$2").to_lowercase()
}

/// Uppercase the first word character of the text and of every sentence
pub fn capitalize_sentences(text: &str) -> String {
    SENTENCE_START_REGEX
        .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("capitalize", capitalize);
    engine.register_fn("to_upper_first_char", to_upper_first_char);
    engine.register_fn("decapitalize", decapitalize);
    engine.register_fn("to_lower_first_char", to_lower_first_char);
    engine.register_fn("to_camel_case", to_camel_case);
    engine.register_fn("to_kebab_case", to_kebab_case);
    engine.register_fn("to_snake_case", to_snake_case);
    engine.register_fn("to_pascal_case", to_pascal_case);
    engine.register_fn("to_dot_case", to_dot_case);
    engine.register_fn("to_space_case", to_space_case);
    engine.register_fn("title_case", title_case);
    engine.register_fn("to_title_case", to_title_case);
    engine.register_fn("swap_case", swap_case);
    engine.register_fn("toggle_case", toggle_case);
    engine.register_fn("alternate_case", alternate_case);
    engine.register_fn("camel_to_snake", camel_to_snake);
    engine.register_fn("snake_to_camel", snake_to_camel);
    engine.register_fn("slug_to_camel_case", slug_to_camel_case);
    engine.register_fn("camel_case_to_slug", camel_case_to_slug);
    engine.register_fn("capitalize_sentences", capitalize_sentences);
}
