//! Text shaping rules for the fragment list.

use std::borrow::Cow;

/// Maximum number of characters shown for a fragment in the list view.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Marker appended to list labels that were cut short.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_chars` characters, appending `ellipsis` only when something
/// was removed.
///
/// Lengths are counted in Unicode scalar values so multi-byte text is never split mid-character.
pub fn truncate_label<'a>(text: &'a str, max_chars: usize, ellipsis: &str) -> Cow<'a, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut label = String::with_capacity(cut + ellipsis.len());
            label.push_str(&text[..cut]);
            label.push_str(ellipsis);
            Cow::Owned(label)
        }
    }
}

/// Collapse line breaks so a label occupies a single row.
///
/// Each `\r\n`, `\n` or `\r` becomes one space.
pub fn single_line(label: &str) -> Cow<'_, str> {
    if !label.contains(['\n', '\r']) {
        return Cow::Borrowed(label);
    }
    Cow::Owned(label.replace("\r\n", " ").replace(['\n', '\r'], " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let text = "a".repeat(DEFAULT_PREVIEW_CHARS);
        let label = truncate_label(&text, DEFAULT_PREVIEW_CHARS, DEFAULT_ELLIPSIS);
        assert!(matches!(label, Cow::Borrowed(_)));
        assert_eq!(label, text);
    }

    #[test]
    fn long_text_keeps_prefix_and_gains_ellipsis() {
        let text: String = ('a'..='z').cycle().take(150).collect();
        let label = truncate_label(&text, DEFAULT_PREVIEW_CHARS, DEFAULT_ELLIPSIS);
        assert_eq!(label.chars().count(), DEFAULT_PREVIEW_CHARS + 3);
        assert!(label.starts_with(&text[..DEFAULT_PREVIEW_CHARS]));
        assert!(label.ends_with("..."));
    }

    #[test]
    fn one_character_over_the_limit_is_truncated() {
        let text = "b".repeat(DEFAULT_PREVIEW_CHARS + 1);
        let label = truncate_label(&text, DEFAULT_PREVIEW_CHARS, DEFAULT_ELLIPSIS);
        assert_eq!(label, format!("{}...", "b".repeat(DEFAULT_PREVIEW_CHARS)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(DEFAULT_PREVIEW_CHARS);
        let label = truncate_label(&text, DEFAULT_PREVIEW_CHARS, DEFAULT_ELLIPSIS);
        assert_eq!(label, text);

        let longer = "日本".repeat(60);
        let label = truncate_label(&longer, DEFAULT_PREVIEW_CHARS, "…");
        assert_eq!(label.chars().count(), DEFAULT_PREVIEW_CHARS + 1);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn single_line_flattens_breaks() {
        assert_eq!(single_line("a\nb\r\nc\rd"), "a b c d");
        assert!(matches!(single_line("plain"), Cow::Borrowed("plain")));
    }
}
