//! Search, match, mask and replace.

use rhai::{Array, Engine};

use crate::chars::{char_len, clamp_len};
use crate::config::{
    DEFAULT_CENSOR_MASK, DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN, DEFAULT_MASK_CHAR,
};
use crate::scripting::{first_char, strings_from_array, to_array};

pub fn contains(text: &str, substr: &str) -> bool {
    text.contains(substr)
}

/// True when any candidate is a substring of `text`; an empty list is false
pub fn contains_any<S: AsRef<str>>(text: &str, items: &[S]) -> bool {
    items.iter().any(|item| text.contains(item.as_ref()))
}

pub fn starts_with(text: &str, prefix: &str) -> bool {
    text.starts_with(prefix)
}

pub fn ends_with(text: &str, suffix: &str) -> bool {
    text.ends_with(suffix)
}

pub fn starts_with_any<S: AsRef<str>>(text: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|p| text.starts_with(p.as_ref()))
}

pub fn ends_with_any<S: AsRef<str>>(text: &str, suffixes: &[S]) -> bool {
    suffixes.iter().any(|s| text.ends_with(s.as_ref()))
}

/// Non-overlapping occurrences of `target`.
///
/// An empty target counts every insertion point, i.e. `len + 1`.
pub fn count_occurrences(text: &str, target: &str) -> usize {
    if target.is_empty() {
        return char_len(text) + 1;
    }
    text.matches(target).count()
}

pub fn count_character_occurrences(text: &str, target: &str) -> usize {
    count_occurrences(text, target)
}

/// Literal global replacement; an empty `find` inserts at every boundary
pub fn replace_all(text: &str, find: &str, replacement: &str) -> String {
    text.replace(find, replacement)
}

pub fn mask_string(text: &str, start: usize, end: usize) -> String {
    mask_string_with(text, start, end, DEFAULT_MASK_CHAR)
}

/// Replace chars in `[start, end)` with `mask`
pub fn mask_string_with(text: &str, start: usize, end: usize, mask: char) -> String {
    if start >= end {
        return text.to_string();
    }
    text.chars()
        .enumerate()
        .map(|(i, c)| if i >= start && i < end { mask } else { c })
        .collect()
}

pub fn highlight_substr(text: &str, substr: &str) -> String {
    highlight_substr_with(text, substr, DEFAULT_HIGHLIGHT_OPEN, DEFAULT_HIGHLIGHT_CLOSE)
}

/// Wrap every literal occurrence of `substr` in `open`/`close`
pub fn highlight_substr_with(text: &str, substr: &str, open: &str, close: &str) -> String {
    if substr.is_empty() {
        return text.to_string();
    }
    text.replace(substr, &format!("{}{}{}", open, substr, close))
}

pub fn censor<S: AsRef<str>>(text: &str, words: &[S]) -> String {
    censor_with(text, words, DEFAULT_CENSOR_MASK)
}

/// Mask whole-word, case-insensitive matches of each word
pub fn censor_with<S: AsRef<str>>(text: &str, words: &[S], mask: char) -> String {
    let mut out = text.to_string();
    for word in words.iter().map(AsRef::as_ref).filter(|w| !w.is_empty()) {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
        let re = match regex::Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                log::debug!("skipping censor word {:?}: {}", word, e);
                continue;
            }
        };
        let replacement: String = std::iter::repeat(mask).take(char_len(word)).collect();
        out = re
            .replace_all(&out, regex::NoExpand(&replacement))
            .into_owned();
    }
    out
}

/// Char indices where `target` starts.
///
/// With `overlapping` the cursor advances one char after each hit, otherwise
/// past the whole match. An empty target yields every index `0..=len`.
pub fn get_all_indexes_of(text: &str, target: &str, overlapping: bool) -> Vec<usize> {
    if target.is_empty() {
        return (0..=char_len(text)).collect();
    }

    let offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    let step = if overlapping {
        target.chars().next().map(char::len_utf8).unwrap_or(1)
    } else {
        target.len()
    };

    let mut indices = Vec::new();
    let mut from = 0;
    while from <= text.len() {
        let Some(pos) = text[from..].find(target) else {
            break;
        };
        let at = from + pos;
        indices.push(offsets.binary_search(&at).unwrap_or_else(|i| i));
        from = at + step;
    }
    indices
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("contains_any", |text: &str, items: Array| {
        contains_any(text, &strings_from_array(items))
    });
    engine.register_fn("starts_with_any", |text: &str, items: Array| {
        starts_with_any(text, &strings_from_array(items))
    });
    engine.register_fn("ends_with_any", |text: &str, items: Array| {
        ends_with_any(text, &strings_from_array(items))
    });
    engine.register_fn("count_occurrences", |text: &str, target: &str| {
        count_occurrences(text, target) as i64
    });
    engine.register_fn("count_character_occurrences", |text: &str, target: &str| {
        count_character_occurrences(text, target) as i64
    });
    engine.register_fn("replace_all", replace_all);

    engine.register_fn("mask_string", |text: &str, start: i64, end: i64| {
        mask_string(text, clamp_len(start), clamp_len(end))
    });
    engine.register_fn(
        "mask_string",
        |text: &str, start: i64, end: i64, mask: &str| match first_char(mask) {
            Some(ch) => mask_string_with(text, clamp_len(start), clamp_len(end), ch),
            None => text.to_string(),
        },
    );

    engine.register_fn("highlight_substr", highlight_substr);
    engine.register_fn("highlight_substr", highlight_substr_with);

    engine.register_fn("censor", |text: &str, words: Array| {
        censor(text, &strings_from_array(words))
    });
    engine.register_fn("censor", |text: &str, words: Array, mask: &str| {
        match first_char(mask) {
            Some(ch) => censor_with(text, &strings_from_array(words), ch),
            None => text.to_string(),
        }
    });

    engine.register_fn("get_all_indexes_of", |text: &str, target: &str| {
        to_array(get_all_indexes_of(text, target, false).into_iter().map(|i| i as i64))
    });
    engine.register_fn(
        "get_all_indexes_of",
        |text: &str, target: &str, overlapping: bool| {
            to_array(get_all_indexes_of(text, target, overlapping).into_iter().map(|i| i as i64))
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::Scope;

    #[test]
    fn test_contains_family() {
        assert!(contains("one piece", "piece"));
        assert!(contains("one piece", ""));
        assert!(contains_any("one piece", &["zoro", "one"]));
        assert!(!contains_any::<&str>("one piece", &[]));
        assert!(starts_with_any("luffy", &["lu", "zo"]));
        assert!(!starts_with_any::<&str>("luffy", &[]));
        assert!(ends_with_any("luffy", &["fy"]));
        assert!(!ends_with_any("luffy", &["Fy"]));
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("Zoro", ""), 5);
        assert_eq!(count_occurrences("aaaaa", "aa"), 2);
        assert_eq!(count_occurrences("banana", "na"), 2);
        assert_eq!(count_occurrences("", "x"), 0);
        assert_eq!(count_occurrences("😀😀", ""), 3);
        assert_eq!(count_character_occurrences("mississippi", "s"), 4);
        assert_eq!(count_character_occurrences("abc", ""), 4);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all("a.b.c", ".", "-"), "a-b-c");
        assert_eq!(replace_all("abc", "", "-"), "-a-b-c-");
        assert_eq!(replace_all("abc", "x", "y"), "abc");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("MonkeyDLuffy", 1, 6), "M*****DLuffy");
        assert_eq!(mask_string_with("secret", 0, 100, '#'), "######");
        assert_eq!(mask_string("secret", 4, 2), "secret");
        assert_eq!(mask_string("😀abc", 0, 1), "*abc");
        assert_eq!(mask_string("", 0, 3), "");
    }

    #[test]
    fn test_highlight_substr() {
        assert_eq!(highlight_substr("one piece one", "one"), "**one** piece **one**");
        assert_eq!(highlight_substr_with("a+b", "+", "<", ">"), "a<+>b");
        assert_eq!(highlight_substr("abc", ""), "abc");
    }

    #[test]
    fn test_censor() {
        assert_eq!(censor("Darn it, DARN!", &["darn"]), "**** it, ****!");
        assert_eq!(censor_with("darned darn", &["darn"], '#'), "darned ####");
        assert_eq!(censor("a.b a b", &["a.b"]), "*** a b");
        assert_eq!(censor("text", &[""]), "text");
    }

    #[test]
    fn test_get_all_indexes_of() {
        assert_eq!(get_all_indexes_of("banana bandanna", "an", false), vec![1, 3, 8, 11]);
        assert_eq!(get_all_indexes_of("aaaaa", "aa", false), vec![0, 2]);
        assert_eq!(get_all_indexes_of("aaaaa", "aa", true), vec![0, 1, 2, 3]);
        assert_eq!(get_all_indexes_of("ababab", "aba", false), vec![0]);
        assert_eq!(get_all_indexes_of("abc", "", false), vec![0, 1, 2, 3]);
        assert_eq!(get_all_indexes_of("😀a😀a", "a", false), vec![1, 3]);
        assert!(get_all_indexes_of("abc", "z", true).is_empty());
    }

    #[test]
    fn test_search_functions_in_rhai() {
        let mut engine = Engine::new();
        register_functions(&mut engine);

        let mut scope = Scope::new();
        scope.push("text", "MonkeyDLuffy");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"mask_string(text, 1, 6)"#)
            .unwrap();
        assert_eq!(result, "M*****DLuffy");

        let result: String = engine
            .eval_with_scope(&mut scope, r##"mask_string(text, 0, 6, "#")"##)
            .unwrap();
        assert_eq!(result, "######DLuffy");

        let result: Array = engine
            .eval_with_scope(&mut scope, r#"get_all_indexes_of("aaaaa", "aa", true)"#)
            .unwrap();
        let indices: Vec<i64> = result.into_iter().map(|d| d.as_int().unwrap()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let result: bool = engine
            .eval_with_scope(&mut scope, r#"contains_any(text, ["Zoro", "Luffy"])"#)
            .unwrap();
        assert!(result);
    }
}
