use crate::chapters::{chapter_ranges, ChapterRange, Order};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ListedChapter<'a> {
    index: usize,
    #[serde(flatten)]
    range: &'a ChapterRange,
}

pub fn run<P: AsRef<Path>>(path: P, order: Order, json: bool) -> Result<()> {
    let ranges = chapter_ranges(&path, order)?;

    if json {
        let listed: Vec<_> = ranges
            .iter()
            .enumerate()
            .map(|(index, range)| ListedChapter { index, range })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for line in format_listing(&ranges) {
        println!("{}", line);
    }

    Ok(())
}

/// `"01 - Title (pp. 1-10)"`, numbered the way `--select` expects.
fn format_listing(ranges: &[ChapterRange]) -> Vec<String> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            if range.is_empty() {
                return format!("{:02} - {} (no pages)", i + 1, range.title);
            }
            format!(
                "{:02} - {} (pp. {}-{})",
                i + 1,
                range.title,
                range.start + 1,
                range.end + 1
            )
        })
        .collect()
}
