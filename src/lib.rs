//! String transformation, extraction, validation and analysis.
//!
//! Every operation is a free function taking `&str` and returning an owned
//! value. Indices and lengths count Unicode scalar values. Operations with a
//! defaulted parameter come in pairs: the plain name uses the default from
//! [`config`], the `_with` name takes it explicitly.
//!
//! ```
//! use stringcraft::{slugify, to_snake_case, truncate};
//!
//! assert_eq!(to_snake_case("helloWorld"), "hello_world");
//! assert_eq!(slugify("  Hello, World!  "), "hello-world");
//! assert_eq!(truncate("Hello, World", 5), "Hello…");
//! ```
//!
//! The optional [`scripting`] layer registers the same functions into a
//! Rhai engine.

pub mod analysis;
pub mod case;
mod chars;
pub mod clean;
pub mod config;
pub mod edit;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod format;
pub mod random;
pub mod scripting;
pub mod search;
pub mod trim;
pub mod validate;

pub use config::{
    Family, StringcraftConfig, DEFAULT_CENSOR_MASK, DEFAULT_CURRENCY, DEFAULT_HIGHLIGHT_CLOSE,
    DEFAULT_HIGHLIGHT_OPEN, DEFAULT_MASK_CHAR, DEFAULT_PAD_CHAR, DEFAULT_QUOTE, ELLIPSIS,
};
pub use error::{Error, Result};
pub use scripting::{register_all_functions, CompiledExpression, StringEngine};

pub use analysis::{
    char_frequency, count_consonants, count_lines, count_lowercase, count_punctuation,
    count_uppercase, count_vowels, count_words, count_words_by_length, get_byte_length,
    get_longest_word, get_shortest_word, levenshtein_distance, string_similarity,
    string_to_ascii_sum,
};
pub use case::{
    alternate_case, camel_case_to_slug, camel_to_snake, capitalize, capitalize_sentences,
    decapitalize, slug_to_camel_case, snake_to_camel, swap_case, title_case, to_camel_case,
    to_dot_case, to_kebab_case, to_lower_first_char, to_pascal_case, to_snake_case, to_space_case,
    to_title_case, to_upper_first_char, toggle_case,
};
pub use clean::{
    remove_all_numbers, remove_alphanumeric, remove_consonants, remove_duplicate_chars,
    remove_duplicate_words, remove_duplicates_words, remove_non_alpha, remove_non_numeric,
    remove_special_chars, remove_vowels, remove_whitespace, safe_string, sanitize_file_name,
    slugify, strip_punctuation, strip_spaces, title_to_slug,
};
pub use edit::{
    get_char_at_safe, get_first_n_chars, get_last_n_chars, get_middle_character, insert_at,
    mirror_string, remove_at, remove_at_with_count, replace_at, reverse, reverse_each_word,
    reverse_sentences, reverse_words, rotate_string, sort_words, split_by_length,
};
pub use encoding::{
    array_buffer_to_string, base64_decode, base64_encode, binary_to_string,
    char_code_array_to_string, convert_to_binary, convert_to_hex, escape_html, hex_to_string,
    html_entity_decode, html_entity_encode, percent_decode, percent_encode, remove_diacritics,
    remove_html_tags, safe_json_parse, string_to_array_buffer, string_to_char_code_array,
    string_to_unicode, strip_ansi_codes, strip_html, unescape_backslashes, unescape_html,
    unicode_to_string,
};
pub use extract::{
    count_sentences, extract_all_numbers, extract_domain, extract_emails, extract_emoji,
    extract_hashtags, extract_initials, extract_mentions, extract_numbers, extract_sentences,
    extract_tld, extract_urls, extract_urls_with_ftp, extract_words, generate_acronym,
    get_file_extension, get_first_line, get_initials, get_last_line, get_nth_word,
    get_unique_characters, has_emoji, remove_file_extension, split_to_words, to_char_array,
    unique_words,
};
pub use format::{
    format_phone_number, obfuscate_email, obfuscate_phone_number, to_currency_format,
    to_currency_format_in,
};
pub use random::{
    generate_uuid, generate_uuid_with, random_string, random_string_base36,
    random_string_base36_with, random_string_with, shuffle_characters, shuffle_characters_with,
    FnRandom, RandomSource, ThreadRandom,
};
pub use search::{
    censor, censor_with, contains, contains_any, count_character_occurrences, count_occurrences,
    ends_with, ends_with_any, get_all_indexes_of, highlight_substr, highlight_substr_with,
    mask_string, mask_string_with, replace_all, starts_with, starts_with_any,
};
pub use trim::{
    collapse_newlines, compact_whitespace, compress_whitespace, ensure_ends_with,
    ensure_starts_with, pad_center, pad_center_with, pad_left, pad_left_with, pad_right,
    pad_right_with, remove_leading_slash, remove_quotes, remove_trailing_slash, repeat,
    repeat_string_until_length, repeat_with_separator, strip_leading_zeros,
    surround_with_quote_char, surround_with_quotes, trim_char, trim_end, trim_start, truncate,
    truncate_words, wrap,
};
pub use validate::{
    contains_lowercase, contains_uppercase, ends_with_punctuation, has_repeated_characters,
    is_all_lower_case, is_all_upper_case, is_alpha, is_alphanumeric, is_anagram, is_blank, is_email,
    is_empty, is_hex_color, is_ip_address, is_loose_palindrome, is_lower_case, is_numeric_string,
    is_rgb_color, is_strict_palindrome, is_string, is_strong_password, is_upper_case, is_url,
    is_uuid, is_whitespace,
};
