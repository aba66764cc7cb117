use crate::error::{Result, SplitError};
use crate::pdf::outline::OutlineEntry;
use serde::Serialize;

/// A chapter and the zero-based, inclusive page span it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRange {
    pub title: String,
    pub start: u32,
    pub end: u32,
    /// Set when the next chapter starts on the same page, leaving this one
    /// without pages. `end` cannot express that when `start` is 0.
    #[serde(skip)]
    empty: bool,
}

impl ChapterRange {
    pub fn new(title: impl Into<String>, start: u32, end: u32) -> Self {
        ChapterRange {
            title: title.into(),
            start,
            end,
            empty: false,
        }
    }

    /// A chapter that owns no pages because the next one starts on `start`.
    pub fn empty(title: impl Into<String>, start: u32) -> Self {
        ChapterRange {
            title: title.into(),
            start,
            end: start.saturating_sub(1),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty || self.end < self.start
    }

    pub fn page_count(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Check that the span is non-empty and lies within a document of
    /// `total_pages` pages.
    pub fn check_bounds(&self, total_pages: u32) -> Result<()> {
        if self.is_empty() || self.end >= total_pages {
            return Err(SplitError::RangeOutOfBounds {
                title: self.title.clone(),
                start: self.start,
                end: self.end,
                total_pages,
            });
        }
        Ok(())
    }
}

/// Sort outline entries by start page and turn each into a range that runs
/// up to the page before the next entry, or to the last page.
///
/// Start pages are not clamped: an entry pointing past the end of the
/// document yields a range that fails [`ChapterRange::check_bounds`].
pub fn resolve_ranges(mut entries: Vec<OutlineEntry>, total_pages: u32) -> Vec<ChapterRange> {
    // stable, so entries sharing a page keep their outline order
    entries.sort_by_key(|entry| entry.page);

    let last_page = total_pages.saturating_sub(1);
    let next_starts: Vec<Option<u32>> = entries
        .iter()
        .skip(1)
        .map(|entry| Some(entry.page))
        .chain(std::iter::once(None))
        .collect();

    entries
        .into_iter()
        .zip(next_starts)
        .map(|(entry, next_start)| match next_start {
            // shares its start page with the next entry
            Some(next) if next == entry.page => ChapterRange::empty(entry.title, entry.page),
            Some(next) => ChapterRange::new(entry.title, entry.page, next - 1),
            None => ChapterRange::new(entry.title, entry.page, last_page),
        })
        .collect()
}
