//! Lyrics handling: splitting into verses and paging through them.
//!
//! A verse is a block of lines separated from its neighbours by a blank
//! line. Windows line endings are normalized before splitting.

use crate::pagination::Page;

/// Split lyrics into trimmed, non-empty verses.
pub fn split_verses(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|verse| !verse.is_empty())
        .map(str::to_string)
        .collect()
}

/// Return one page of the verses in `text`.
///
/// A page starting past the last verse is empty, not an error.
pub fn verse_page(text: &str, page: Page) -> Vec<String> {
    let verses = split_verses(text);
    match page.bounds(verses.len()) {
        Some((start, end)) => verses[start..end].to_vec(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::VERSE_DEFAULTS;
    use proptest::prelude::*;

    #[test]
    fn test_split_basic() {
        assert_eq!(split_verses("a\n\nb\n\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_verses("").is_empty());
        assert!(split_verses("\n\n\n\n").is_empty());
        assert!(split_verses("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_inner_lines() {
        let text = "Line one\nLine two\n\nLine three";
        assert_eq!(split_verses(text), vec!["Line one\nLine two", "Line three"]);
    }

    #[test]
    fn test_split_trims_whitespace() {
        assert_eq!(split_verses("  a  \n\n\t b \n"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_crlf() {
        assert_eq!(split_verses("a\r\nb\r\n\r\nc"), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_verse_pages() {
        let text = "v1\n\nv2\n\nv3";
        assert_eq!(verse_page(text, Page::new(1, 2, VERSE_DEFAULTS)), vec!["v1", "v2"]);
        assert_eq!(verse_page(text, Page::new(2, 2, VERSE_DEFAULTS)), vec!["v3"]);
        assert!(verse_page(text, Page::new(3, 2, VERSE_DEFAULTS)).is_empty());
    }

    #[test]
    fn test_verse_page_of_empty_lyrics() {
        assert!(verse_page("", VERSE_DEFAULTS).is_empty());
    }

    proptest! {
        /// No verse is ever empty or padded with whitespace
        #[test]
        fn verses_are_trimmed_and_non_empty(text in "[a-c \n\t]{0,60}") {
            for verse in split_verses(&text) {
                prop_assert!(!verse.is_empty());
                prop_assert_eq!(verse.trim(), verse.as_str());
            }
        }

        /// Splitting is idempotent over re-joined verses
        #[test]
        fn split_join_is_stable(text in "[a-z\n ]{0,80}") {
            let verses = split_verses(&text);
            let rejoined = verses.join("\n\n");
            prop_assert_eq!(split_verses(&rejoined), verses);
        }
    }
}
