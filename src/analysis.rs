//! Text analytics: distances, frequencies and counters.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rhai::{Dynamic, Engine, Map};
use std::collections::BTreeMap;

static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("failed to compile word regex"));
static LINE_SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("failed to compile line split regex"));

/// Unit-cost edit distance over chars, computed with two rolling rows
pub fn levenshtein_distance(lhs: &str, rhs: &str) -> usize {
    if lhs == rhs {
        return 0;
    }

    let lhs_chars: Vec<char> = lhs.chars().collect();
    let rhs_chars: Vec<char> = rhs.chars().collect();
    let len_lhs = lhs_chars.len();
    let len_rhs = rhs_chars.len();

    if len_lhs == 0 {
        return len_rhs;
    }
    if len_rhs == 0 {
        return len_lhs;
    }

    let mut prev: Vec<usize> = (0..=len_rhs).collect();
    let mut curr: Vec<usize> = vec![0; len_rhs + 1];

    for (i, &lhs_ch) in lhs_chars.iter().enumerate() {
        curr[0] = i + 1;

        for (j, &rhs_ch) in rhs_chars.iter().enumerate() {
            let cost = usize::from(lhs_ch != rhs_ch);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            let substitution = prev[j] + cost;
            curr[j + 1] = deletion.min(insertion).min(substitution);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[len_rhs]
}

/// Share of positions holding the same char, over the longer length.
///
/// Two empty strings are fully similar; one empty string is not similar at all.
pub fn string_similarity(lhs: &str, rhs: &str) -> f64 {
    let len_lhs = lhs.chars().count();
    let len_rhs = rhs.chars().count();
    let longest = len_lhs.max(len_rhs);
    if longest == 0 {
        return 1.0;
    }
    if len_lhs.min(len_rhs) == 0 {
        return 0.0;
    }
    let matches = lhs
        .chars()
        .zip(rhs.chars())
        .filter(|(a, b)| a == b)
        .count();
    matches as f64 / longest as f64
}

/// Occurrences per char, in first-seen order
pub fn char_frequency(text: &str) -> IndexMap<char, usize> {
    let mut freq = IndexMap::new();
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Longest whitespace-separated word; the first one wins a tie
pub fn get_longest_word(text: &str) -> String {
    text.split_whitespace()
        .fold("", |best, word| {
            if word.chars().count() > best.chars().count() {
                word
            } else {
                best
            }
        })
        .to_string()
}

/// Shortest whitespace-separated word; the first one wins a tie
pub fn get_shortest_word(text: &str) -> String {
    text.split_whitespace()
        .reduce(|best, word| {
            if word.chars().count() < best.chars().count() {
                word
            } else {
                best
            }
        })
        .unwrap_or_default()
        .to_string()
}

pub fn count_words(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}

/// Word length (in chars) to number of words with that length
pub fn count_words_by_length(text: &str) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word.chars().count()).or_insert(0) += 1;
    }
    counts
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn count_vowels(text: &str) -> usize {
    text.chars().filter(|&c| is_vowel(c)).count()
}

pub fn count_consonants(text: &str) -> usize {
    text.chars()
        .filter(|&c| c.is_ascii_alphabetic() && !is_vowel(c))
        .count()
}

pub fn count_punctuation(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
        .count()
}

pub fn count_uppercase(text: &str) -> usize {
    text.chars().filter(char::is_ascii_uppercase).count()
}

pub fn count_lowercase(text: &str) -> usize {
    text.chars().filter(char::is_ascii_lowercase).count()
}

/// Lines separated by `\r\n`, `\r` or `\n`; an empty string has none
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    LINE_SPLIT_REGEX.split(text).count()
}

/// Sum of all code points
pub fn string_to_ascii_sum(text: &str) -> u64 {
    text.chars().map(|c| u64::from(c as u32)).sum()
}

/// Size in UTF-8 bytes
pub fn get_byte_length(text: &str) -> usize {
    text.len()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("levenshtein_distance", |lhs: &str, rhs: &str| {
        levenshtein_distance(lhs, rhs) as i64
    });
    engine.register_fn("string_similarity", string_similarity);
    engine.register_fn("char_frequency", |text: &str| -> Map {
        let mut map = Map::new();
        for (c, n) in char_frequency(text) {
            map.insert(c.to_string().into(), Dynamic::from(n as i64));
        }
        map
    });
    engine.register_fn("get_longest_word", get_longest_word);
    engine.register_fn("get_shortest_word", get_shortest_word);
    engine.register_fn("count_words", |text: &str| count_words(text) as i64);
    engine.register_fn("count_words_by_length", |text: &str| -> Map {
        let mut map = Map::new();
        for (len, n) in count_words_by_length(text) {
            map.insert(len.to_string().into(), Dynamic::from(n as i64));
        }
        map
    });
    engine.register_fn("count_vowels", |text: &str| count_vowels(text) as i64);
    engine.register_fn("count_consonants", |text: &str| count_consonants(text) as i64);
    engine.register_fn("count_punctuation", |text: &str| count_punctuation(text) as i64);
    engine.register_fn("count_uppercase", |text: &str| count_uppercase(text) as i64);
    engine.register_fn("count_lowercase", |text: &str| count_lowercase(text) as i64);
    engine.register_fn("count_lines", |text: &str| count_lines(text) as i64);
    engine.register_fn("string_to_ascii_sum", |text: &str| {
        i64::try_from(string_to_ascii_sum(text)).unwrap_or(i64::MAX)
    });
    engine.register_fn("get_byte_length", |text: &str| get_byte_length(text) as i64);
}
