//! Code-point indexing helpers.
//!
//! Every public index and length in this crate counts `char`s. These helpers
//! translate char positions to byte offsets so slicing never splits a
//! multi-byte sequence.

/// Number of chars in `text`
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the char at `index`, or `text.len()` when past the end
pub(crate) fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Slice by char range; both ends clamp to the string
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(text, start);
    let to = byte_offset(text, end);
    &text[from..to]
}

/// Last `n` chars of `text`
pub(crate) fn char_tail(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if n >= len {
        return text;
    }
    &text[byte_offset(text, len - n)..]
}

/// Convert a possibly negative length into a `usize`, clamping negatives to zero
pub(crate) fn clamp_len(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Checked conversion of a signed index into `0..len`
pub(crate) fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_multibyte() {
        let text = "h😀llo";
        assert_eq!(char_slice(text, 1, 2), "😀");
        assert_eq!(char_slice(text, 0, 100), text);
        assert_eq!(char_slice(text, 3, 1), "");
    }

    #[test]
    fn test_char_tail() {
        assert_eq!(char_tail("naïve", 3), "ïve");
        assert_eq!(char_tail("ab", 5), "ab");
        assert_eq!(char_tail("ab", 0), "");
    }

    #[test]
    fn test_index_helpers() {
        assert_eq!(clamp_len(-4), 0);
        assert_eq!(clamp_len(9), 9);
        assert_eq!(checked_index(2, 3), Some(2));
        assert_eq!(checked_index(3, 3), None);
        assert_eq!(checked_index(-1, 3), None);
    }
}
