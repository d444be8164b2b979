//! Offset pagination parameters.
//!
//! Pages are 1-based. Raw query values that are missing, unparsable or not
//! positive fall back to the caller's defaults instead of producing a
//! negative offset.

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Defaults for the song list.
pub const SONG_LIST_DEFAULTS: Page = Page { page: 1, page_size: 10 };

/// Defaults for lyrics pages.
pub const VERSE_DEFAULTS: Page = Page { page: 1, page_size: 5 };

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Page {
    /// Build a page, clamping `page_size` to [`MAX_PAGE_SIZE`].
    ///
    /// Zero values are replaced by the fields of `defaults`.
    pub fn new(page: u32, page_size: u32, defaults: Page) -> Self {
        let page = if page == 0 { defaults.page } else { page };
        let page_size = if page_size == 0 {
            defaults.page_size
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }

    /// Parse raw query values.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>, defaults: Page) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(0),
            parse_positive(page_size).unwrap_or(0),
            defaults,
        )
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Slice bounds of this page within a sequence of `len` items.
    ///
    /// Returns `None` when the page starts past the end.
    pub fn bounds(&self, len: usize) -> Option<(usize, usize)> {
        let start = usize::try_from(self.offset()).ok()?;
        if start >= len {
            return None;
        }
        let end = start.saturating_add(self.page_size as usize).min(len);
        Some((start, end))
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<i64>().ok().and_then(|v| {
        if v > 0 {
            u32::try_from(v).ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_when_missing() {
        let page = Page::from_query(None, None, SONG_LIST_DEFAULTS);
        assert_eq!(page, SONG_LIST_DEFAULTS);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_defaults_when_unparsable() {
        let page = Page::from_query(Some("abc"), Some("1.5"), VERSE_DEFAULTS);
        assert_eq!(page, VERSE_DEFAULTS);
    }

    #[test]
    fn test_non_positive_values_clamp_to_defaults() {
        let page = Page::from_query(Some("0"), Some("-3"), SONG_LIST_DEFAULTS);
        assert_eq!(page, SONG_LIST_DEFAULTS);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_size_capped() {
        let page = Page::from_query(Some("2"), Some("5000"), SONG_LIST_DEFAULTS);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(page.offset(), u64::from(MAX_PAGE_SIZE));
    }

    #[test]
    fn test_offset() {
        let page = Page::new(3, 10, SONG_LIST_DEFAULTS);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Page::new(1, 2, VERSE_DEFAULTS).bounds(3), Some((0, 2)));
        assert_eq!(Page::new(2, 2, VERSE_DEFAULTS).bounds(3), Some((2, 3)));
        assert_eq!(Page::new(3, 2, VERSE_DEFAULTS).bounds(3), None);
        assert_eq!(Page::new(1, 5, VERSE_DEFAULTS).bounds(0), None);
    }

    proptest! {
        /// Consecutive pages cover every index exactly once
        #[test]
        fn pages_partition_sequence(len in 0usize..200, page_size in 1u32..=MAX_PAGE_SIZE) {
            let mut covered = Vec::new();
            let mut page = 1u32;
            while let Some((start, end)) = Page::new(page, page_size, SONG_LIST_DEFAULTS).bounds(len) {
                prop_assert!(end - start <= page_size as usize);
                covered.extend(start..end);
                page += 1;
            }
            prop_assert_eq!(covered, (0..len).collect::<Vec<_>>());
        }
    }
}
