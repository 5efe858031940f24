//! Index-based edits, rotations and reversals.
//!
//! Indices count chars. Out-of-range edits never fail: inserts clamp to the
//! nearest boundary and removals or replacements leave the text untouched.

use rhai::Engine;

use crate::chars::{byte_offset, char_len, char_slice, char_tail, checked_index, clamp_len};
use crate::extract::extract_sentences;
use crate::scripting::to_array;

// ============================================================================
// Positional edits
// ============================================================================

/// Insert `insertion` before the char at `index`, clamped to `[0, len]`
pub fn insert_at(text: &str, index: i64, insertion: &str) -> String {
    let at = byte_offset(text, clamp_len(index));
    let mut result = String::with_capacity(text.len() + insertion.len());
    result.push_str(&text[..at]);
    result.push_str(insertion);
    result.push_str(&text[at..]);
    result
}

/// Remove the char at `index`
pub fn remove_at(text: &str, index: i64) -> String {
    remove_at_with_count(text, index, 1)
}

/// Remove up to `count` chars starting at `index`
pub fn remove_at_with_count(text: &str, index: i64, count: i64) -> String {
    let len = char_len(text);
    let Some(start) = checked_index(index, len) else {
        return text.to_string();
    };
    if count <= 0 {
        return text.to_string();
    }
    let end = start.saturating_add(clamp_len(count)).min(len);
    let mut result = String::with_capacity(text.len());
    result.push_str(char_slice(text, 0, start));
    result.push_str(char_slice(text, end, len));
    result
}

/// Replace the char at `index` with `replacement`
pub fn replace_at(text: &str, index: i64, replacement: &str) -> String {
    let len = char_len(text);
    match checked_index(index, len) {
        Some(at) => format!(
            "{}{}{}",
            char_slice(text, 0, at),
            replacement,
            char_slice(text, at + 1, len)
        ),
        None => text.to_string(),
    }
}

/// Rotate left by `n` positions; negative `n` rotates right
pub fn rotate_string(text: &str, n: i64) -> String {
    let len = char_len(text);
    if len == 0 {
        return String::new();
    }
    let shift = n.rem_euclid(len as i64) as usize;
    format!("{}{}", char_slice(text, shift, len), char_slice(text, 0, shift))
}

/// Consecutive chunks of `size` chars; the last chunk may be shorter
pub fn split_by_length(text: &str, size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

// ============================================================================
// Reversal
// ============================================================================

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reverse the order of space-separated words
pub fn reverse_words(text: &str) -> String {
    text.split(' ').rev().collect::<Vec<_>>().join(" ")
}

/// Reverse the chars of each space-separated word in place
pub fn reverse_each_word(text: &str) -> String {
    text.split(' ').map(reverse).collect::<Vec<_>>().join(" ")
}

pub fn reverse_sentences(text: &str) -> String {
    let sentences = extract_sentences(text);
    if sentences.is_empty() {
        return if text.trim().is_empty() {
            String::new()
        } else {
            text.to_string()
        };
    }
    sentences.into_iter().rev().collect::<Vec<_>>().join(" ")
}

/// The text followed by its reverse
pub fn mirror_string(text: &str) -> String {
    format!("{}{}", text, reverse(text))
}

/// Space-separated words in code point order
pub fn sort_words(text: &str) -> String {
    let mut words: Vec<&str> = text.split(' ').collect();
    words.sort_unstable();
    words.join(" ")
}

// ============================================================================
// Char access
// ============================================================================

pub fn get_first_n_chars(text: &str, n: usize) -> String {
    char_slice(text, 0, n).to_string()
}

pub fn get_last_n_chars(text: &str, n: usize) -> String {
    char_tail(text, n).to_string()
}

/// Char at `(len - 1) / 2`, or `""` for empty text
pub fn get_middle_character(text: &str) -> String {
    let len = char_len(text);
    if len == 0 {
        return String::new();
    }
    let mid = (len - 1) / 2;
    char_slice(text, mid, mid + 1).to_string()
}

pub fn get_char_at_safe(text: &str, index: i64) -> String {
    checked_index(index, char_len(text))
        .map(|at| char_slice(text, at, at + 1).to_string())
        .unwrap_or_default()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("insert_at", insert_at);
    engine.register_fn("remove_at", remove_at);
    engine.register_fn("remove_at", remove_at_with_count);
    engine.register_fn("replace_at", replace_at);
    engine.register_fn("rotate_string", rotate_string);
    engine.register_fn("split_by_length", |text: &str, size: i64| {
        to_array(split_by_length(text, clamp_len(size)))
    });

    engine.register_fn("reverse", reverse);
    engine.register_fn("reverse_words", reverse_words);
    engine.register_fn("reverse_each_word", reverse_each_word);
    engine.register_fn("reverse_sentences", reverse_sentences);
    engine.register_fn("mirror_string", mirror_string);
    engine.register_fn("sort_words", sort_words);

    engine.register_fn("get_first_n_chars", |text: &str, n: i64| {
        get_first_n_chars(text, clamp_len(n))
    });
    engine.register_fn("get_last_n_chars", |text: &str, n: i64| {
        get_last_n_chars(text, clamp_len(n))
    });
    engine.register_fn("get_middle_character", get_middle_character);
    engine.register_fn("get_char_at_safe", get_char_at_safe);
}
