//! Character-class removal, deduplication and slugs.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use rhai::Engine;

static SLUG_DISALLOWED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s_-]").expect("failed to compile slug filter regex"));
static SLUG_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("failed to compile slug separator regex"));
static TITLE_SLUG_DISALLOWED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_\s-]").expect("failed to compile title slug filter regex")
});
static WHITESPACE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"));

const PUNCTUATION_TO_STRIP: &str = ".!@#$%^&*()-_=+{}[]:;\"/\\,~";

fn is_ascii_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
}

fn is_ascii_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_ascii_vowel(c)
}

// ============================================================================
// Character classes
// ============================================================================

pub fn remove_non_alpha(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphabetic).collect()
}

pub fn remove_non_numeric(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

pub fn remove_all_numbers(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}

pub fn remove_alphanumeric(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_alphanumeric()).collect()
}

pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn strip_spaces(text: &str) -> String {
    remove_whitespace(text)
}

/// Keep `[A-Za-z0-9_]` and whitespace
pub fn remove_special_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace())
        .collect()
}

pub fn safe_string(text: &str) -> String {
    remove_special_chars(text)
}

pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|&c| !PUNCTUATION_TO_STRIP.contains(c))
        .collect()
}

pub fn remove_vowels(text: &str) -> String {
    text.chars().filter(|&c| !is_ascii_vowel(c)).collect()
}

pub fn remove_consonants(text: &str) -> String {
    text.chars().filter(|&c| !is_ascii_consonant(c)).collect()
}

// ============================================================================
// Deduplication
// ============================================================================

/// Keep the first occurrence of every char
pub fn remove_duplicate_chars(text: &str) -> String {
    text.chars().collect::<IndexSet<char>>().into_iter().collect()
}

/// Keep the first occurrence of every space-separated word, joined by one space
pub fn remove_duplicate_words(text: &str) -> String {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn remove_duplicates_words(text: &str) -> String {
    remove_duplicate_words(text)
}

// ============================================================================
// Slugs and file names
// ============================================================================

/// Lowercase, hyphen-separated ASCII slug
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered = SLUG_DISALLOWED_REGEX.replace_all(lowered.trim(), "");
    SLUG_SEPARATOR_REGEX
        .replace_all(&filtered, "-")
        .trim_matches('-')
        .to_string()
}

/// Like [`slugify`] but keeps underscores and runs of hyphens
pub fn title_to_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered = TITLE_SLUG_DISALLOWED_REGEX.replace_all(&lowered, "");
    WHITESPACE_RUN_REGEX
        .replace_all(filtered.trim(), "-")
        .into_owned()
}

/// Replace every char outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("remove_non_alpha", remove_non_alpha);
    engine.register_fn("remove_non_numeric", remove_non_numeric);
    engine.register_fn("remove_all_numbers", remove_all_numbers);
    engine.register_fn("remove_alphanumeric", remove_alphanumeric);
    engine.register_fn("remove_whitespace", remove_whitespace);
    engine.register_fn("strip_spaces", strip_spaces);
    engine.register_fn("remove_special_chars", remove_special_chars);
    engine.register_fn("safe_string", safe_string);
    engine.register_fn("strip_punctuation", strip_punctuation);
    engine.register_fn("remove_vowels", remove_vowels);
    engine.register_fn("remove_consonants", remove_consonants);

    engine.register_fn("remove_duplicate_chars", remove_duplicate_chars);
    engine.register_fn("remove_duplicate_words", remove_duplicate_words);
    engine.register_fn("remove_duplicates_words", remove_duplicates_words);

    engine.register_fn("slugify", slugify);
    engine.register_fn("title_to_slug", title_to_slug);
    engine.register_fn("sanitize_file_name", sanitize_file_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::Scope;

    #[test]
    fn test_character_class_removal() {
        assert_eq!(remove_non_alpha("R2-D2 & C-3PO!"), "RDCPO");
        assert_eq!(remove_non_numeric("+1 (555) 010-9999"), "15550109999");
        assert_eq!(remove_all_numbers("log4j v2"), "logj v");
        assert_eq!(remove_alphanumeric("a-b_c!"), "-_!");
        assert_eq!(remove_whitespace(" a\tb\nc\u{3000}d "), "abcd");
        assert_eq!(strip_spaces("x y"), "xy");
        assert_eq!(remove_non_alpha(""), "");
    }

    #[test]
    fn test_special_chars_and_punctuation() {
        assert_eq!(remove_special_chars("hi, there_you! 😀"), "hi there_you ");
        assert_eq!(safe_string("a@b.c"), "abc");
        assert_eq!(strip_punctuation("Hello, World! (v1.0) ~ok?"), "Hello World v10 ok?");
        assert_eq!(strip_punctuation("a/b\\c"), "abc");
    }

    #[test]
    fn test_vowels_and_consonants() {
        assert_eq!(remove_vowels("Education"), "dctn");
        assert_eq!(remove_consonants("Hello, World 42"), "eo, o 42");
        assert_eq!(remove_vowels("é"), "é");
    }

    #[test]
    fn test_deduplication() {
        assert_eq!(remove_duplicate_chars("mississippi"), "misp");
        assert_eq!(remove_duplicate_chars("😀a😀"), "😀a");
        assert_eq!(remove_duplicate_words("the cat  the hat cat"), "the cat hat");
        assert_eq!(remove_duplicates_words("a a a"), "a");
        assert_eq!(remove_duplicate_words(""), "");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("snake_case -- and spaces"), "snake-case-and-spaces");
        assert_eq!(slugify("---edge---"), "edge");
        assert_eq!(slugify("Café Ünïcode"), "caf-ncode");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_title_to_slug() {
        assert_eq!(title_to_slug("The Grand Line: Part 2"), "the-grand-line-part-2");
        assert_eq!(title_to_slug("a--b  c"), "a--b-c");
        assert_eq!(title_to_slug("Café au lait"), "caf-au-lait");
        assert_eq!(title_to_slug("snake_case title"), "snake_case-title");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report 2024/v1.pdf"), "report_2024_v1.pdf");
        assert_eq!(sanitize_file_name("ok-name_1.txt"), "ok-name_1.txt");
        assert_eq!(sanitize_file_name("é"), "_");
    }

    #[test]
    fn test_clean_functions_in_rhai() {
        let mut engine = Engine::new();
        register_functions(&mut engine);

        let mut scope = Scope::new();
        scope.push("title", "  Hello, World!  ");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"slugify(title)"#)
            .unwrap();
        assert_eq!(result, "hello-world");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"remove_duplicate_chars("aabbcc")"#)
            .unwrap();
        assert_eq!(result, "abc");
    }
}
