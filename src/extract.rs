//! Pattern extraction.
//!
//! Extractors return matches in input order and never deduplicate unless the
//! name says so (`unique_words`, `get_unique_characters`).

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use rhai::{Dynamic, Engine};

use crate::scripting::{option_to_dynamic, to_array};

// Regex patterns
const NUMBER_PATTERN: &str = r"[0-9]+";
const WORD_PATTERN: &str = r"[A-Za-z0-9_]+";
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const URL_PATTERN: &str = r"https?://[^\s]+[a-zA-Z0-9]";
const URL_WITH_FTP_PATTERN: &str = r"(?:https?|ftp)://[^\s]+[a-zA-Z0-9]";
const HASHTAG_PATTERN: &str = r"#[A-Za-z0-9_]+";
const MENTION_PATTERN: &str = r"@[A-Za-z0-9_]+";
const LINE_BREAK_PATTERN: &str = r"\r?\n";

// Compiled regex instances
static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("failed to compile number regex"));
static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(WORD_PATTERN).expect("failed to compile word regex"));
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("failed to compile email regex"));
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_PATTERN).expect("failed to compile URL regex"));
static URL_WITH_FTP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_WITH_FTP_PATTERN).expect("failed to compile ftp URL regex"));
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(HASHTAG_PATTERN).expect("failed to compile hashtag regex"));
static MENTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(MENTION_PATTERN).expect("failed to compile mention regex"));
static LINE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(LINE_BREAK_PATTERN).expect("failed to compile line break regex"));

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

// ============================================================================
// Numbers and words
// ============================================================================

/// Digit runs parsed as integers; values past `i64::MAX` saturate
pub fn extract_numbers(text: &str) -> Vec<i64> {
    NUMBER_REGEX
        .find_iter(text)
        .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))
        .collect()
}

/// Digit runs as literal substrings
pub fn extract_all_numbers(text: &str) -> Vec<String> {
    find_all(&NUMBER_REGEX, text)
}

pub fn extract_words(text: &str) -> Vec<String> {
    find_all(&WORD_REGEX, text)
}

/// Whitespace-separated tokens, punctuation included
pub fn split_to_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Lowercased words in first-seen order
pub fn unique_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Emails, URLs, social tokens
// ============================================================================

pub fn extract_emails(text: &str) -> Vec<String> {
    find_all(&EMAIL_REGEX, text)
}

/// `http`/`https` URLs; trailing punctuation is not part of the match
pub fn extract_urls(text: &str) -> Vec<String> {
    find_all(&URL_REGEX, text)
}

/// Like [`extract_urls`] but also accepts `ftp://`
pub fn extract_urls_with_ftp(text: &str) -> Vec<String> {
    find_all(&URL_WITH_FTP_REGEX, text)
}

pub fn extract_hashtags(text: &str) -> Vec<String> {
    find_all(&HASHTAG_REGEX, text)
}

pub fn extract_mentions(text: &str) -> Vec<String> {
    find_all(&MENTION_REGEX, text)
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F6FF
            | 0x1F300..=0x1F5FF
            | 0x1F900..=0x1F9FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
    )
}

/// Chars from the emoticon, pictograph, transport, supplemental symbol,
/// miscellaneous symbol and dingbat blocks
pub fn extract_emoji(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_emoji(c)).collect()
}

pub fn has_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

// ============================================================================
// URL parts
// ============================================================================

/// Host of a URL; `None` when the input does not parse or has no host
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(str::to_string)
}

/// Last label of the host; single-label hosts have no TLD
pub fn extract_tld(url: &str) -> Option<String> {
    let host = extract_domain(url)?;
    let (_, tld) = host.rsplit_once('.')?;
    if tld.is_empty() {
        return None;
    }
    Some(tld.to_string())
}

// ============================================================================
// Sentences
// ============================================================================

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Sentences ending in `.`, `!` or `?` followed by whitespace or end of text.
///
/// A trailing fragment without terminal punctuation is dropped.
pub fn extract_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminator(chars[i].1) {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        let at_break = j == chars.len() || chars[j].1.is_whitespace();
        if at_break {
            let end = chars.get(j).map(|&(offset, _)| offset).unwrap_or(text.len());
            let candidate = text[start..end].trim();
            // A run of bare terminators is dropped, not glued to the next sentence
            if candidate
                .chars()
                .any(|c| !is_terminator(c) && !c.is_whitespace())
            {
                sentences.push(candidate.to_string());
            }
            start = end;
        }
        i = j;
    }

    sentences
}

pub fn count_sentences(text: &str) -> usize {
    extract_sentences(text).len()
}

// ============================================================================
// Initials and characters
// ============================================================================

/// First char of every whitespace-separated token, uppercased
pub fn extract_initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn get_initials(text: &str) -> String {
    extract_initials(text)
}

pub fn generate_acronym(text: &str) -> String {
    extract_initials(text)
}

pub fn get_unique_characters(text: &str) -> Vec<char> {
    text.chars().collect::<IndexSet<_>>().into_iter().collect()
}

pub fn to_char_array(text: &str) -> Vec<char> {
    text.chars().collect()
}

// ============================================================================
// Positional pieces
// ============================================================================

/// Zero-based whitespace-separated word; negative or past-the-end gives ""
pub fn get_nth_word(text: &str, n: i64) -> String {
    usize::try_from(n)
        .ok()
        .and_then(|n| text.split_whitespace().nth(n))
        .unwrap_or_default()
        .to_string()
}

pub fn get_first_line(text: &str) -> String {
    LINE_BREAK_REGEX
        .split(text)
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn get_last_line(text: &str) -> String {
    LINE_BREAK_REGEX
        .split(text)
        .last()
        .unwrap_or_default()
        .to_string()
}

/// Text after the last dot; dot-files and trailing dots have no extension
pub fn get_file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(dot) if dot == name.len() - 1 => String::new(),
        Some(dot) => name[dot + 1..].to_string(),
    }
}

pub fn remove_file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => name.to_string(),
        Some(dot) => name[..dot].to_string(),
    }
}

fn chars_to_array(chars: Vec<char>) -> rhai::Array {
    to_array(chars.into_iter().map(|c| c.to_string()))
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("extract_numbers", |text: &str| to_array(extract_numbers(text)));
    engine.register_fn("extract_all_numbers", |text: &str| {
        to_array(extract_all_numbers(text))
    });
    engine.register_fn("extract_words", |text: &str| to_array(extract_words(text)));
    engine.register_fn("split_to_words", |text: &str| to_array(split_to_words(text)));
    engine.register_fn("unique_words", |text: &str| to_array(unique_words(text)));

    engine.register_fn("extract_emails", |text: &str| to_array(extract_emails(text)));
    engine.register_fn("extract_urls", |text: &str| to_array(extract_urls(text)));
    engine.register_fn("extract_urls_with_ftp", |text: &str| {
        to_array(extract_urls_with_ftp(text))
    });
    engine.register_fn("extract_hashtags", |text: &str| to_array(extract_hashtags(text)));
    engine.register_fn("extract_mentions", |text: &str| to_array(extract_mentions(text)));
    engine.register_fn("extract_emoji", |text: &str| chars_to_array(extract_emoji(text)));
    engine.register_fn("has_emoji", has_emoji);

    engine.register_fn("extract_domain", |url: &str| -> Dynamic {
        option_to_dynamic(extract_domain(url))
    });
    engine.register_fn("extract_tld", |url: &str| -> Dynamic {
        option_to_dynamic(extract_tld(url))
    });

    engine.register_fn("extract_sentences", |text: &str| {
        to_array(extract_sentences(text))
    });
    engine.register_fn("count_sentences", |text: &str| count_sentences(text) as i64);

    engine.register_fn("extract_initials", extract_initials);
    engine.register_fn("get_initials", get_initials);
    engine.register_fn("generate_acronym", generate_acronym);
    engine.register_fn("get_unique_characters", |text: &str| {
        chars_to_array(get_unique_characters(text))
    });
    engine.register_fn("to_char_array", |text: &str| chars_to_array(to_char_array(text)));

    engine.register_fn("get_nth_word", get_nth_word);
    engine.register_fn("get_first_line", get_first_line);
    engine.register_fn("get_last_line", get_last_line);
    engine.register_fn("get_file_extension", get_file_extension);
    engine.register_fn("remove_file_extension", remove_file_extension);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::{Array, Scope};

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("Chapter 1044 has 17 pages"), vec![1044, 17]);
        assert_eq!(extract_numbers("v1.2.3"), vec![1, 2, 3]);
        assert!(extract_numbers("no digits").is_empty());
        assert_eq!(extract_numbers("99999999999999999999"), vec![i64::MAX]);
        assert_eq!(extract_all_numbers("007 and 42"), vec!["007", "42"]);
    }

    #[test]
    fn test_words() {
        assert_eq!(
            extract_words("Hello, world! It's 2024."),
            vec!["Hello", "world", "It", "s", "2024"]
        );
        assert_eq!(split_to_words("  one\ttwo  three "), vec!["one", "two", "three"]);
        assert!(split_to_words("   ").is_empty());
        assert_eq!(unique_words("The cat and THE hat and"), vec!["the", "cat", "and", "hat"]);
    }

    #[test]
    fn test_word_classes_are_ascii() {
        assert_eq!(extract_words("café über"), vec!["caf", "ber"]);
        assert_eq!(extract_hashtags("#café #one_piece"), vec!["#caf", "#one_piece"]);
        assert_eq!(extract_mentions("@zoró"), vec!["@zor"]);
        assert!(extract_words("日本語").is_empty());
    }

    #[test]
    fn test_emails_and_urls() {
        assert_eq!(
            extract_emails("mail luffy@grandline.com or zoro.r@east-blue.org!"),
            vec!["luffy@grandline.com", "zoro.r@east-blue.org"]
        );
        assert!(extract_emails("broken@host").is_empty());

        let text =
            "Visit https://onepiece.com/chapter/1. Or http://localhost:3000, ftp://files.net/x";
        assert_eq!(
            extract_urls(text),
            vec!["https://onepiece.com/chapter/1", "http://localhost:3000"]
        );
        assert_eq!(
            extract_urls_with_ftp(text),
            vec![
                "https://onepiece.com/chapter/1",
                "http://localhost:3000",
                "ftp://files.net/x"
            ]
        );
    }

    #[test]
    fn test_social_tokens() {
        assert_eq!(
            extract_hashtags("#OnePiece_1000 is #peak"),
            vec!["#OnePiece_1000", "#peak"]
        );
        assert_eq!(extract_mentions("hey @luffy and @zoro!"), vec!["@luffy", "@zoro"]);
        assert!(extract_hashtags("# nothing").is_empty());
    }

    #[test]
    fn test_emoji() {
        assert_eq!(extract_emoji("I ❤ pizza 🍕 and 😀!"), vec!['❤', '🍕', '😀']);
        assert!(extract_emoji("plain | text").is_empty());
        assert!(has_emoji("sunny ☀"));
        assert!(!has_emoji("sunny"));
        // outside the five blocks, so neither function sees it
        assert!(!has_emoji("mahjong 🀄"));
        assert!(extract_emoji("mahjong 🀄").is_empty());
    }

    #[test]
    fn test_domain_and_tld() {
        assert_eq!(
            extract_domain("https://sub.example.co.uk/path?q=1").as_deref(),
            Some("sub.example.co.uk")
        );
        assert_eq!(extract_domain("not a url"), None);
        assert_eq!(extract_tld("https://onepiece.com/x").as_deref(), Some("com"));
        assert_eq!(extract_tld("http://localhost:3000"), None);
        assert_eq!(extract_tld("garbage"), None);
    }

    #[test]
    fn test_sentences() {
        let text = "Hello world. How are you? I'm fine";
        assert_eq!(extract_sentences(text), vec!["Hello world.", "How are you?"]);
        assert_eq!(count_sentences(text), 2);
        assert_eq!(extract_sentences("Wait... what?!"), vec!["Wait...", "what?!"]);
        assert_eq!(extract_sentences("Version 1.2 is out."), vec!["Version 1.2 is out."]);
        assert!(extract_sentences("").is_empty());
        assert!(extract_sentences("no terminator").is_empty());
        assert_eq!(extract_sentences("... Hello. Bye."), vec!["Hello.", "Bye."]);
        assert_eq!(extract_sentences("Hi. ?! there."), vec!["Hi.", "there."]);
        assert_eq!(count_sentences("... "), 0);
    }

    #[test]
    fn test_initials() {
        assert_eq!(extract_initials("monkey d luffy"), "MDL");
        assert_eq!(get_initials("  Roronoa   Zoro "), "RZ");
        assert_eq!(generate_acronym("Franky-San"), "F");
        assert_eq!(generate_acronym(""), "");
    }

    #[test]
    fn test_characters() {
        assert_eq!(get_unique_characters("banana"), vec!['b', 'a', 'n']);
        assert_eq!(to_char_array("a😀"), vec!['a', '😀']);
        assert!(to_char_array("").is_empty());
    }

    #[test]
    fn test_positional_pieces() {
        assert_eq!(get_nth_word("one  two three", 1), "two");
        assert_eq!(get_nth_word("one two", 5), "");
        assert_eq!(get_nth_word("one two", -1), "");
        assert_eq!(get_first_line("first\r\nsecond\nthird"), "first");
        assert_eq!(get_last_line("first\r\nsecond\nthird"), "third");
        assert_eq!(get_last_line("trailing\n"), "");
        assert_eq!(get_first_line(""), "");
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(get_file_extension("archive.tar.gz"), "gz");
        assert_eq!(get_file_extension(".bashrc"), "");
        assert_eq!(get_file_extension("README"), "");
        assert_eq!(get_file_extension("file."), "");
        assert_eq!(remove_file_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(remove_file_extension(".bashrc"), ".bashrc");
        assert_eq!(remove_file_extension("README"), "README");
    }

    #[test]
    fn test_extract_functions_in_rhai() {
        let mut engine = Engine::new();
        register_functions(&mut engine);

        let mut scope = Scope::new();
        scope.push("text", "contact luffy@grandline.com at https://onepiece.com");

        let result: Array = engine
            .eval_with_scope(&mut scope, r#"extract_emails(text)"#)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].clone().into_string().unwrap(), "luffy@grandline.com");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"extract_domain("https://onepiece.com/x")"#)
            .unwrap();
        assert_eq!(result, "onepiece.com");

        let result: bool = engine
            .eval_with_scope(&mut scope, r#"type_of(extract_tld("nope")) == "()""#)
            .unwrap();
        assert!(result);
    }
}
