//! Padding, trimming and length-limiting functions.

use once_cell::sync::Lazy;
use regex::Regex;
use rhai::{Engine, EvalAltResult, NativeCallContext};

use crate::chars::{byte_offset, char_len, char_slice, clamp_len};
use crate::config::{DEFAULT_PAD_CHAR, DEFAULT_QUOTE, ELLIPSIS};
use crate::error::{Error, Result};

static WHITESPACE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"));
static NEWLINE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+").expect("failed to compile newline regex"));

fn fill(ch: char, count: usize) -> String {
    std::iter::repeat(ch).take(count).collect()
}

pub fn pad_left(text: &str, length: usize) -> String {
    pad_left_with(text, length, DEFAULT_PAD_CHAR)
}

/// Prepend `fill_char` until `text` is `length` chars long. Never truncates.
pub fn pad_left_with(text: &str, length: usize, fill_char: char) -> String {
    let current = char_len(text);
    if current >= length {
        return text.to_string();
    }
    let mut out = fill(fill_char, length - current);
    out.push_str(text);
    out
}

pub fn pad_right(text: &str, length: usize) -> String {
    pad_right_with(text, length, DEFAULT_PAD_CHAR)
}

pub fn pad_right_with(text: &str, length: usize, fill_char: char) -> String {
    let current = char_len(text);
    if current >= length {
        return text.to_string();
    }
    let mut out = text.to_string();
    out.push_str(&fill(fill_char, length - current));
    out
}

pub fn pad_center(text: &str, length: usize) -> String {
    pad_center_with(text, length, DEFAULT_PAD_CHAR)
}

/// Center `text`; when the deficit is odd the extra fill goes on the right.
pub fn pad_center_with(text: &str, length: usize, fill_char: char) -> String {
    let current = char_len(text);
    if current >= length {
        return text.to_string();
    }
    let total = length - current;
    let left = total / 2;
    format!("{}{}{}", fill(fill_char, left), text, fill(fill_char, total - left))
}

pub fn trim_start(text: &str) -> String {
    text.trim_start().to_string()
}

pub fn trim_end(text: &str) -> String {
    text.trim_end().to_string()
}

/// Strip every repetition of `ch` from both ends; interior occurrences stay
pub fn trim_char(text: &str, ch: char) -> String {
    text.trim_matches(ch).to_string()
}

/// Collapse whitespace runs into one space and trim the ends
pub fn compress_whitespace(text: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(text, " ").trim().to_string()
}

pub fn compact_whitespace(text: &str) -> String {
    compress_whitespace(text)
}

pub fn collapse_newlines(text: &str) -> String {
    NEWLINE_RUN_REGEX.replace_all(text, "\n").into_owned()
}

/// Repeat `text` `count` times. Negative counts are an error.
pub fn repeat(text: &str, count: i64) -> Result<String> {
    if count < 0 {
        return Err(Error::InvalidRepeatCount(count));
    }
    let copies = clamp_len(count);
    if text.len().checked_mul(copies).is_none() {
        return Err(Error::RepeatTooLarge { requested: copies });
    }
    Ok(text.repeat(copies))
}

/// `count` copies of `text` joined by `separator`
pub fn repeat_with_separator(text: &str, count: i64, separator: &str) -> String {
    let copies = clamp_len(count);
    vec![text; copies].join(separator)
}

/// Cycle `text` until the result is exactly `length` chars
pub fn repeat_string_until_length(text: &str, length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.chars().cycle().take(length).collect()
}

/// Keep the first `length` chars and append `…` when anything was cut
pub fn truncate(text: &str, length: usize) -> String {
    if char_len(text) <= length {
        return text.to_string();
    }
    let mut out = char_slice(text, 0, length).to_string();
    out.push(ELLIPSIS);
    out
}

/// First `count` space-separated words followed by `…`
pub fn truncate_words(text: &str, count: usize) -> String {
    let mut out = text.split(' ').take(count).collect::<Vec<_>>().join(" ");
    out.push(ELLIPSIS);
    out
}

pub fn wrap(text: &str, wrapper: &str) -> String {
    format!("{}{}{}", wrapper, text, wrapper)
}

pub fn ensure_starts_with(text: &str, prefix: &str) -> String {
    if text.starts_with(prefix) {
        text.to_string()
    } else {
        format!("{}{}", prefix, text)
    }
}

pub fn ensure_ends_with(text: &str, suffix: &str) -> String {
    if text.ends_with(suffix) {
        text.to_string()
    } else {
        format!("{}{}", text, suffix)
    }
}

pub fn surround_with_quotes(text: &str) -> String {
    surround_with_quote_char(text, DEFAULT_QUOTE)
}

pub fn surround_with_quote_char(text: &str, quote: char) -> String {
    format!("{}{}{}", quote, text, quote)
}

fn strip_quote_pair(text: &str, is_quote: impl Fn(char) -> bool) -> Option<&str> {
    // Pairs never span a line break
    if text.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    let mut chars = text.chars();
    let (first, last) = (chars.next()?, chars.next_back()?);
    if is_quote(first) && is_quote(last) {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Strip an outer pair of quotes, either kind and not necessarily matching,
/// then one inner `'...'` pair and one inner `"..."` pair
pub fn remove_quotes(text: &str) -> String {
    let outer = strip_quote_pair(text, |c| c == '"' || c == '\'').unwrap_or(text);
    let single = strip_quote_pair(outer, |c| c == '\'').unwrap_or(outer);
    strip_quote_pair(single, |c| c == '"')
        .unwrap_or(single)
        .to_string()
}

pub fn remove_leading_slash(text: &str) -> String {
    text.strip_prefix('/').unwrap_or(text).to_string()
}

pub fn remove_trailing_slash(text: &str) -> String {
    text.strip_suffix('/').unwrap_or(text).to_string()
}

/// Drop leading zeros; a lone `"0"` is kept
pub fn strip_leading_zeros(text: &str) -> String {
    if text == "0" {
        return text.to_string();
    }
    text.trim_start_matches('0').to_string()
}

type ScriptResult<T> = std::result::Result<T, Box<EvalAltResult>>;

/// Refuse output larger than the engine's string limit before building it
fn check_output_size(ctx: &NativeCallContext, requested: usize) -> ScriptResult<()> {
    let max = ctx.engine().max_string_size();
    if max > 0 && requested > max {
        return Err(Box::new(EvalAltResult::ErrorDataTooLarge(
            "Length of string".to_string(),
            ctx.position(),
        )));
    }
    Ok(())
}

fn padded_size(text: &str, length: usize, fill_char: char) -> usize {
    let missing = length.saturating_sub(char_len(text));
    text.len().saturating_add(missing.saturating_mul(fill_char.len_utf8()))
}

fn repeated_size(text: &str, copies: usize, separator: &str) -> usize {
    text.len()
        .saturating_mul(copies)
        .saturating_add(separator.len().saturating_mul(copies.saturating_sub(1)))
}

fn cycled_size(text: &str, length: usize) -> usize {
    let n = char_len(text);
    if n == 0 {
        return 0;
    }
    (length / n)
        .saturating_mul(text.len())
        .saturating_add(byte_offset(text, length % n))
}

fn register_padding(engine: &mut Engine, name: &str, pad: fn(&str, usize, char) -> String) {
    engine.register_fn(
        name,
        move |ctx: NativeCallContext, text: &str, length: i64| -> ScriptResult<String> {
            let length = clamp_len(length);
            check_output_size(&ctx, padded_size(text, length, DEFAULT_PAD_CHAR))?;
            Ok(pad(text, length, DEFAULT_PAD_CHAR))
        },
    );
    engine.register_fn(
        name,
        move |ctx: NativeCallContext,
              text: &str,
              length: i64,
              fill_arg: &str|
              -> ScriptResult<String> {
            let Some(ch) = fill_arg.chars().next() else {
                return Ok(text.to_string());
            };
            let length = clamp_len(length);
            check_output_size(&ctx, padded_size(text, length, ch))?;
            Ok(pad(text, length, ch))
        },
    );
}

/// Script-side fill arguments are strings; only their first char counts
fn with_fill_char(text: &str, fill_arg: &str, f: impl FnOnce(char) -> String) -> String {
    match fill_arg.chars().next() {
        Some(ch) => f(ch),
        None => text.to_string(),
    }
}

pub fn register_functions(engine: &mut Engine) {
    register_padding(engine, "pad_left", pad_left_with);
    register_padding(engine, "pad_right", pad_right_with);
    register_padding(engine, "pad_center", pad_center_with);

    engine.register_fn("trim_start", trim_start);
    engine.register_fn("trim_end", trim_end);
    engine.register_fn("trim_char", |text: &str, ch: &str| {
        with_fill_char(text, ch, |c| trim_char(text, c))
    });
    engine.register_fn("compress_whitespace", compress_whitespace);
    engine.register_fn("compact_whitespace", compact_whitespace);
    engine.register_fn("collapse_newlines", collapse_newlines);

    engine.register_fn(
        "repeat",
        |ctx: NativeCallContext, text: &str, count: i64| -> ScriptResult<String> {
            check_output_size(&ctx, repeated_size(text, clamp_len(count), ""))?;
            repeat(text, count).map_err(|e| e.to_string().into())
        },
    );
    engine.register_fn(
        "repeat_with_separator",
        |ctx: NativeCallContext,
         text: &str,
         count: i64,
         separator: &str|
         -> ScriptResult<String> {
            check_output_size(&ctx, repeated_size(text, clamp_len(count), separator))?;
            Ok(repeat_with_separator(text, count, separator))
        },
    );
    engine.register_fn(
        "repeat_string_until_length",
        |ctx: NativeCallContext, text: &str, length: i64| -> ScriptResult<String> {
            let length = clamp_len(length);
            check_output_size(&ctx, cycled_size(text, length))?;
            Ok(repeat_string_until_length(text, length))
        },
    );
    // Rhai already owns a mutating `truncate`
    engine.register_fn("truncate_ellipsis", |text: &str, length: i64| {
        truncate(text, clamp_len(length))
    });
    engine.register_fn("truncate_words", |text: &str, count: i64| {
        truncate_words(text, clamp_len(count))
    });

    engine.register_fn("wrap", wrap);
    engine.register_fn("ensure_starts_with", ensure_starts_with);
    engine.register_fn("ensure_ends_with", ensure_ends_with);
    engine.register_fn("surround_with_quotes", surround_with_quotes);
    engine.register_fn("surround_with_quotes", |text: &str, quote: &str| {
        with_fill_char(text, quote, |q| surround_with_quote_char(text, q))
    });
    engine.register_fn("remove_quotes", remove_quotes);
    engine.register_fn("remove_leading_slash", remove_leading_slash);
    engine.register_fn("remove_trailing_slash", remove_trailing_slash);
    engine.register_fn("strip_leading_zeros", strip_leading_zeros);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::Scope;

    #[test]
    fn test_padding() {
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_left_with("7", 3, '0'), "007");
        assert_eq!(pad_left("long", 2), "long");
        assert_eq!(pad_right_with("ab", 4, '.'), "ab..");
        assert_eq!(pad_center_with("hi", 5, '-'), "-hi--");
        assert_eq!(pad_center("odd", 7), "  odd  ");
        assert_eq!(pad_left_with("😀", 3, '*'), "**😀");
        assert_eq!(pad_right("", 0), "");
    }

    #[test]
    fn test_trims() {
        assert_eq!(trim_start("  \tsunny "), "sunny ");
        assert_eq!(trim_end(" merry \n"), " merry");
        assert_eq!(trim_char("__init__", '_'), "init");
        assert_eq!(trim_char("a_b", '_'), "a_b");
        assert_eq!(trim_char("....", '.'), "");
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(compress_whitespace("  the   grand\t\nline "), "the grand line");
        assert_eq!(compact_whitespace(""), "");
        assert_eq!(collapse_newlines("a\r\n\r\nb\n\nc"), "a\nb\nc");
    }

    #[test]
    fn test_repeat() {
        assert_eq!(repeat("ab", 3).unwrap(), "ababab");
        assert_eq!(repeat("ab", 0).unwrap(), "");
        let err = repeat("ab", -1).unwrap_err();
        assert!(matches!(err, Error::InvalidRepeatCount(-1)));
        assert_eq!(repeat_with_separator("ha", 3, "-"), "ha-ha-ha");
        assert_eq!(repeat_with_separator("", 3, ":"), "::");
        assert_eq!(repeat_with_separator("x", -2, ","), "");
        assert_eq!(repeat_string_until_length("abc", 7), "abcabca");
        assert_eq!(repeat_string_until_length("", 5), "");
        assert_eq!(repeat_string_until_length("é😀", 3), "é😀é");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("strawhatpirates", 6), "strawh…");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("onepiece", 0), "…");
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("😀😁😂", 2), "😀😁…");
        assert_eq!(truncate_words("the quick brown fox", 2), "the quick…");
        assert_eq!(truncate_words("one", 5), "one…");
    }

    #[test]
    fn test_wrapping_and_affixes() {
        assert_eq!(wrap("x", "**"), "**x**");
        assert_eq!(ensure_starts_with("path", "/"), "/path");
        assert_eq!(ensure_starts_with("/path", "/"), "/path");
        assert_eq!(ensure_ends_with("file", ".rs"), "file.rs");
        assert_eq!(surround_with_quotes("hi"), "\"hi\"");
        assert_eq!(surround_with_quote_char("hi", '\''), "'hi'");
        assert_eq!(remove_quotes("\"hi\""), "hi");
        assert_eq!(remove_quotes("'hi'"), "hi");
        assert_eq!(remove_quotes("\""), "\"");
        assert_eq!(remove_quotes("\"\""), "");
        assert_eq!(remove_quotes("he\"llo\""), "he\"llo\"");
    }

    #[test]
    fn test_remove_quotes_mismatched_and_nested() {
        assert_eq!(remove_quotes("\"hi'"), "hi");
        assert_eq!(remove_quotes("'hi\""), "hi");
        assert_eq!(remove_quotes("\"'x'\""), "x");
        assert_eq!(remove_quotes("'\"x\"'"), "x");
        assert_eq!(remove_quotes("\"\"x\"\""), "x");
        assert_eq!(remove_quotes("\"a\nb\""), "\"a\nb\"");
    }

    #[test]
    fn test_slashes_and_zeros() {
        assert_eq!(remove_leading_slash("/usr"), "usr");
        assert_eq!(remove_trailing_slash("dir//"), "dir/");
        assert_eq!(strip_leading_zeros("000123"), "123");
        assert_eq!(strip_leading_zeros("0"), "0");
        assert_eq!(strip_leading_zeros("000"), "");
    }

    #[test]
    fn test_trim_functions_in_rhai() {
        let mut engine = Engine::new();
        register_functions(&mut engine);

        let mut scope = Scope::new();
        scope.push("text", "7");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"pad_left(text, 3, "0")"#)
            .unwrap();
        assert_eq!(result, "007");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"pad_right(text, 3, "")"#)
            .unwrap();
        assert_eq!(result, "7");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"truncate_ellipsis("strawhatpirates", 6)"#)
            .unwrap();
        assert_eq!(result, "strawh…");

        let err = engine
            .eval_with_scope::<String>(&mut scope, r#"repeat(text, -1)"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid count value: -1"));
    }

    #[test]
    fn test_output_size_checked_before_building() {
        let mut engine = Engine::new();
        engine.set_max_string_size(10);
        register_functions(&mut engine);

        let result: String = engine.eval(r#"pad_left("x", 10, "*")"#).unwrap();
        assert_eq!(result, "*********x");
        assert!(engine.eval::<String>(r#"pad_left("x", 11)"#).is_err());
        assert!(engine.eval::<String>(r#"pad_center("x", 6, "😀")"#).is_err());
        assert!(engine.eval::<String>(r#"repeat("ab", 6)"#).is_err());
        assert!(engine.eval::<String>(r#"repeat_with_separator("ab", 4, ",")"#).is_err());
        assert!(engine.eval::<String>(r#"repeat_string_until_length("ab", 11)"#).is_err());

        let err = engine
            .eval::<String>(r#"pad_right("x", 8589934592)"#)
            .unwrap_err();
        assert!(err.to_string().contains("Length of string"), "{}", err);
    }

    #[test]
    fn test_size_estimates() {
        assert_eq!(padded_size("ab", 5, '😀'), 2 + 3 * 4);
        assert_eq!(padded_size("long", 2, ' '), 4);
        assert_eq!(repeated_size("ab", 3, ", "), 10);
        assert_eq!(repeated_size("ab", 0, ", "), 0);
        assert_eq!(cycled_size("é😀", 3), "é😀é".len());
        assert_eq!(cycled_size("", 100), 0);
        assert_eq!(repeated_size("ab", usize::MAX, ""), usize::MAX);
    }
}
