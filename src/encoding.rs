//! Encoding, decoding and normalization.
//!
//! Decoders never fail. Undecodable input degrades to a best-effort string
//! (lossy UTF-8, skipped tokens) or an empty string for base64.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rhai::{Array, Dynamic, Engine};
use unicode_normalization::UnicodeNormalization;

use crate::scripting::{json_to_dynamic, to_array};

/// Standard alphabet; decoding tolerates missing or present padding
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static SCRIPT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script.*?>.*?</script>").expect("failed to compile script block regex")
});
static STYLE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style.*?>.*?</style>").expect("failed to compile style block regex")
});
static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)</?[a-z].*?>").expect("failed to compile HTML tag regex"));
static ANY_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("failed to compile tag regex"));
static NUMERIC_ENTITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#([0-9]+);").expect("failed to compile numeric entity regex"));
static ESCAPED_HTML_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|#039);").expect("failed to compile escaped HTML regex")
});
static ANSI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B[\[\(\?\);]{0,2}(;?[0-9])*.").expect("failed to compile ANSI regex")
});
static BACKSLASH_ESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(.)").expect("failed to compile backslash regex"));

// ============================================================================
// Base64 and percent encoding
// ============================================================================

pub fn base64_encode(text: &str) -> String {
    base64::Engine::encode(&BASE64, text.as_bytes())
}

/// Decode standard base64, ignoring ASCII whitespace.
///
/// Returns `""` when the input is not base64; invalid UTF-8 is replaced.
pub fn base64_decode(encoded: &str) -> String {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    match base64::Engine::decode(&BASE64, compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::debug!("base64 decode failed: {}", e);
            String::new()
        }
    }
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ~`
pub fn percent_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn percent_decode(encoded: &str) -> String {
    match urlencoding::decode(encoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::debug!("percent decode produced invalid UTF-8: {}", e);
            String::from_utf8_lossy(&urlencoding::decode_binary(encoded.as_bytes())).into_owned()
        }
    }
}

// ============================================================================
// HTML
// ============================================================================

/// Escape `& < > " '` as named entities (`'` becomes `&#039;`)
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_html`] in one pass; other entities are left as written
pub fn unescape_html(text: &str) -> String {
    ESCAPED_HTML_REGEX
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => "'",
        })
        .into_owned()
}

fn needs_numeric_entity(c: char) -> bool {
    matches!(c, '<' | '>' | '&' | '"' | '\'') || ('\u{00A0}'..='\u{9999}').contains(&c)
}

/// Encode markup characters and U+00A0..U+9999 as `&#N;`
pub fn html_entity_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if needs_numeric_entity(c) {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode `&#N;` entities; values that are not scalar values stay as written
pub fn html_entity_decode(text: &str) -> String {
    NUMERIC_ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn strip_html_once(text: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_REGEX.replace_all(text, "");
    let without_styles = STYLE_BLOCK_REGEX.replace_all(&without_scripts, "");
    HTML_TAG_REGEX.replace_all(&without_styles, "").into_owned()
}

/// Remove tags, dropping `<script>` and `<style>` blocks with their content.
///
/// Stripping repeats until nothing changes, so tags reassembled by a removal
/// are caught too.
pub fn strip_html(html: &str) -> String {
    let mut current = strip_html_once(html);
    loop {
        let next = strip_html_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Remove every `<...>` span, content is kept
pub fn remove_html_tags(html: &str) -> String {
    ANY_TAG_REGEX.replace_all(html, "").into_owned()
}

// ============================================================================
// Byte dumps
// ============================================================================

/// Space-separated 8-bit binary, one token per UTF-8 byte
pub fn convert_to_binary(text: &str) -> String {
    text.bytes()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn binary_to_string(binary: &str) -> String {
    let bytes: Vec<u8> = binary
        .split_whitespace()
        .filter_map(|token| match u8::from_str_radix(token, 2) {
            Ok(byte) => Some(byte),
            Err(e) => {
                log::debug!("skipping binary token {:?}: {}", token, e);
                None
            }
        })
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Space-separated lowercase hex, one token per UTF-8 byte
pub fn convert_to_hex(text: &str) -> String {
    text.bytes()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn hex_to_string(hex_text: &str) -> String {
    let mut bytes = Vec::new();
    for token in hex_text.split_whitespace() {
        match hex::decode(token) {
            Ok(decoded) => bytes.extend(decoded),
            Err(e) => log::debug!("skipping hex token {:?}: {}", token, e),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

// ============================================================================
// Unicode escapes and code points
// ============================================================================

/// `\uXXXX` for every UTF-16 code unit
pub fn string_to_unicode(text: &str) -> String {
    text.encode_utf16()
        .map(|unit| format!("\\u{:04x}", unit))
        .collect()
}

fn parse_unicode_escape(rest: &str) -> Option<u16> {
    let digits = rest.strip_prefix("\\u")?.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Decode `\uXXXX` escapes, pairing adjacent surrogates
pub fn unicode_to_string(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut units: Vec<u16> = Vec::new();
    let mut rest = escaped;

    while !rest.is_empty() {
        if let Some(unit) = parse_unicode_escape(rest) {
            units.push(unit);
            rest = &rest[6..];
            continue;
        }
        if !units.is_empty() {
            out.push_str(&String::from_utf16_lossy(&units));
            units.clear();
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(&units));
    }
    out
}

pub fn string_to_char_code_array(text: &str) -> Vec<u32> {
    text.chars().map(|c| c as u32).collect()
}

/// Build a string from code points, skipping values that are not scalar values
pub fn char_code_array_to_string(codes: &[u32]) -> String {
    codes
        .iter()
        .filter_map(|&code| {
            let c = char::from_u32(code);
            if c.is_none() {
                log::debug!("dropping invalid code point {:#x}", code);
            }
            c
        })
        .collect()
}

pub fn string_to_array_buffer(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

pub fn array_buffer_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// Cleanup and normalization
// ============================================================================

/// Remove ANSI escape sequences such as colors and cursor moves
pub fn strip_ansi_codes(text: &str) -> String {
    ANSI_REGEX.replace_all(text, "").into_owned()
}

/// `\x` becomes `x` for any char `x`
pub fn unescape_backslashes(text: &str) -> String {
    BACKSLASH_ESCAPE_REGEX.replace_all(text, "$1").into_owned()
}

/// NFD-decompose and drop combining diacritical marks
pub fn remove_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

/// Parse JSON, `None` when malformed
pub fn safe_json_parse(json: &str) -> Option<serde_json::Value> {
    serde_json::from_str(json).ok()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("base64_encode", base64_encode);
    engine.register_fn("base64_decode", base64_decode);
    engine.register_fn("percent_encode", percent_encode);
    engine.register_fn("percent_decode", percent_decode);

    engine.register_fn("escape_html", escape_html);
    engine.register_fn("unescape_html", unescape_html);
    engine.register_fn("html_entity_encode", html_entity_encode);
    engine.register_fn("html_entity_decode", html_entity_decode);
    engine.register_fn("strip_html", strip_html);
    engine.register_fn("remove_html_tags", remove_html_tags);

    engine.register_fn("convert_to_binary", convert_to_binary);
    engine.register_fn("binary_to_string", binary_to_string);
    engine.register_fn("convert_to_hex", convert_to_hex);
    engine.register_fn("hex_to_string", hex_to_string);

    engine.register_fn("string_to_unicode", string_to_unicode);
    engine.register_fn("unicode_to_string", unicode_to_string);
    engine.register_fn("string_to_char_code_array", |text: &str| {
        to_array(string_to_char_code_array(text).into_iter().map(i64::from))
    });
    engine.register_fn("char_code_array_to_string", |codes: Array| {
        let codes: Vec<u32> = codes
            .into_iter()
            .filter_map(|d| d.as_int().ok())
            .filter_map(|n| u32::try_from(n).ok())
            .collect();
        char_code_array_to_string(&codes)
    });
    engine.register_fn("string_to_array_buffer", |text: &str| {
        rhai::Blob::from(string_to_array_buffer(text))
    });
    engine.register_fn("array_buffer_to_string", |bytes: rhai::Blob| {
        array_buffer_to_string(&bytes)
    });

    engine.register_fn("strip_ansi_codes", strip_ansi_codes);
    engine.register_fn("unescape_backslashes", unescape_backslashes);
    engine.register_fn("remove_diacritics", remove_diacritics);
    engine.register_fn("safe_json_parse", |json: &str| -> Dynamic {
        safe_json_parse(json)
            .map(|value| json_to_dynamic(&value))
            .unwrap_or(Dynamic::UNIT)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::{Map, Scope};

    #[test]
    fn test_base64() {
        assert_eq!(base64_encode("Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(base64_decode("SGVsbG8sIFdvcmxkIQ=="), "Hello, World!");
        assert_eq!(base64_decode("SGVsbG8sIFdvcmxkIQ"), "Hello, World!");
        assert_eq!(base64_decode("SGVs\nbG8="), "Hello");
        assert_eq!(base64_encode("😀"), "8J+YgA==");
        assert_eq!(base64_decode("8J+YgA=="), "😀");
        assert_eq!(base64_decode("!!!not base64"), "");
        assert_eq!(base64_encode(""), "");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent_encode("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(percent_encode("it's (ok)!*"), "it%27s%20%28ok%29%21%2A");
        assert_eq!(percent_encode("safe-_.~"), "safe-_.~");
        assert_eq!(percent_decode("a%20b%26c"), "a b&c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(unescape_html("&lt;b&gt; &amp; &#039;q&#039; &quot;"), "<b> & 'q' \"");
    }

    #[test]
    fn test_unescape_html_only_reverses_escape_html() {
        assert_eq!(unescape_html("&copy;"), "&copy;");
        assert_eq!(unescape_html("&#60;b&#62;"), "&#60;b&#62;");
        assert_eq!(unescape_html("&#39;"), "&#39;");
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("&LT;"), "&LT;");
        let raw = "<p class=\"x\">it's & more</p>";
        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }

    #[test]
    fn test_html_entities() {
        assert_eq!(html_entity_encode("<é>"), "&#60;&#233;&#62;");
        assert_eq!(html_entity_encode("plain"), "plain");
        assert_eq!(html_entity_encode("😀"), "😀");
        assert_eq!(html_entity_decode("&#60;&#233;&#62;"), "<é>");
        assert_eq!(html_entity_decode("&#55296;"), "&#55296;");
        assert_eq!(html_entity_decode("&#99999999999;"), "&#99999999999;");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hi <b>there</b></p><script>alert('x')</script><STYLE>p{}</STYLE>"),
            "Hi there"
        );
        assert_eq!(strip_html("a < b and c > d"), "a < b and c > d");
        assert_eq!(strip_html("<<a>b>text"), "text");
        assert_eq!(remove_html_tags("<div class='x'>content</div>"), "content");
        assert_eq!(remove_html_tags("<script>js</script>"), "js");
    }

    #[test]
    fn test_byte_dumps() {
        assert_eq!(convert_to_binary("Hi"), "01001000 01101001");
        assert_eq!(binary_to_string("01001000 01101001"), "Hi");
        assert_eq!(binary_to_string("01001000 junk 01101001"), "Hi");
        assert_eq!(convert_to_hex("Hi"), "48 69");
        assert_eq!(hex_to_string("48 69"), "Hi");
        assert_eq!(hex_to_string("48 zz 69"), "Hi");
        assert_eq!(convert_to_hex("é"), "c3 a9");
        assert_eq!(hex_to_string("c3 a9"), "é");
        assert_eq!(convert_to_binary(""), "");
        assert_eq!(hex_to_string(""), "");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(string_to_unicode("Hi"), "\\u0048\\u0069");
        assert_eq!(string_to_unicode("😀"), "\\ud83d\\ude00");
        assert_eq!(unicode_to_string("\\u0048\\u0069"), "Hi");
        assert_eq!(unicode_to_string("\\ud83d\\ude00!"), "😀!");
        assert_eq!(unicode_to_string("x\\u00e9y"), "xéy");
        assert_eq!(unicode_to_string("\\uzzzz"), "\\uzzzz");
        assert_eq!(unicode_to_string("\\ud83d"), "\u{FFFD}");
    }

    #[test]
    fn test_code_points_and_buffers() {
        assert_eq!(string_to_char_code_array("A😀"), vec![65, 0x1F600]);
        assert_eq!(char_code_array_to_string(&[72, 105, 0x1F600]), "Hi😀");
        assert_eq!(char_code_array_to_string(&[0xD800, 65]), "A");
        assert_eq!(string_to_array_buffer("Hé"), vec![0x48, 0xC3, 0xA9]);
        assert_eq!(array_buffer_to_string(&[0x48, 0xC3, 0xA9]), "Hé");
        assert_eq!(array_buffer_to_string(&[0xFF]), "\u{FFFD}");
    }

    #[test]
    fn test_cleanup() {
        assert_eq!(strip_ansi_codes("\x1B[31mred\x1B[0m"), "red");
        assert_eq!(strip_ansi_codes("\x1B[1;32mbold green\x1B[0m!"), "bold green!");
        assert_eq!(unescape_backslashes(r"a\.b\\c\n"), r"a.b\cn");
        assert_eq!(remove_diacritics("Crème Brûlée"), "Creme Brulee");
        assert_eq!(remove_diacritics("Ñandú"), "Nandu");
    }

    #[test]
    fn test_safe_json_parse() {
        let value = safe_json_parse(r#"{"crew": ["luffy", "zoro"], "bounty": 3000}"#).unwrap();
        assert_eq!(value["bounty"], 3000);
        assert_eq!(value["crew"][1], "zoro");
        assert_eq!(safe_json_parse("{broken"), None);
        assert_eq!(safe_json_parse(""), None);
    }

    #[test]
    fn test_encoding_functions_in_rhai() {
        let mut engine = Engine::new();
        register_functions(&mut engine);

        let mut scope = Scope::new();
        scope.push("text", "Hello, World!");

        let result: String = engine
            .eval_with_scope(&mut scope, r#"base64_decode(base64_encode(text))"#)
            .unwrap();
        assert_eq!(result, "Hello, World!");

        let result: Map = engine
            .eval_with_scope(&mut scope, r#"safe_json_parse("{\"a\": 1}")"#)
            .unwrap();
        assert_eq!(result.get("a").unwrap().as_int().unwrap(), 1);

        let result: bool = engine
            .eval_with_scope(&mut scope, r#"type_of(safe_json_parse("nope")) == "()""#)
            .unwrap();
        assert!(result);

        let result: String = engine
            .eval_with_scope(&mut scope, r#"array_buffer_to_string(string_to_array_buffer("Hé"))"#)
            .unwrap();
        assert_eq!(result, "Hé");
    }
}
