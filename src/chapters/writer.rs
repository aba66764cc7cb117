use crate::chapters::ranges::ChapterRange;
use crate::chapters::sanitize::sanitize_filename;
use crate::error::{Result, SplitError};
use crate::pdf::PdfDocument;
use crate::selection::Selection;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One output file as it will be, or was, written.
#[derive(Debug, Clone)]
pub struct PlannedChapter {
    /// 1-based position in the output, used as the filename prefix.
    pub position: usize,
    pub filename: String,
    pub range: ChapterRange,
}

#[derive(Debug, Clone)]
pub struct WrittenChapter {
    pub position: usize,
    pub title: String,
    pub start: u32,
    pub end: u32,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct SkippedChapter {
    pub position: usize,
    pub error: SplitError,
}

#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<WrittenChapter>,
    pub skipped: Vec<SkippedChapter>,
}

impl WriteReport {
    /// Number of documents written.
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// `"07_Title.pdf"`: position padded to at least two digits.
pub fn chapter_filename(position: usize, title: &str) -> String {
    format!("{:02}_{}.pdf", position, sanitize_filename(title))
}

/// Work out which ranges are written, in which order, under which name.
///
/// Without a selection every range is taken in the given order; otherwise
/// exactly the selected ranges, in selection order. Positions come from this
/// list, so they do not depend on which ranges later turn out to be writable.
pub fn plan_chapters(
    ranges: &[ChapterRange],
    selection: Option<&Selection>,
) -> Result<Vec<PlannedChapter>> {
    let chosen: Vec<&ChapterRange> = match selection {
        // Explicit subset, in the caller's order
        Some(selection) => {
            selection.check(ranges.len())?;
            selection.indices().iter().map(|&i| &ranges[i]).collect()
        }
        None => ranges.iter().collect(),
    };

    Ok(chosen
        .into_iter()
        .enumerate()
        .map(|(i, range)| PlannedChapter {
            position: i + 1,
            filename: chapter_filename(i + 1, &range.title),
            range: range.clone(),
        })
        .collect())
}

/// Write one PDF per planned chapter into `output_dir`, which must exist.
///
/// Existing files with the same name are overwritten. A range that falls
/// outside the document is skipped and reported; a failed write stops the
/// batch.
pub fn write_chapters(
    doc: &PdfDocument,
    ranges: &[ChapterRange],
    output_dir: &Path,
    selection: Option<&Selection>,
) -> Result<WriteReport> {
    let plan = plan_chapters(ranges, selection)?;
    let total_pages = doc.page_count();
    let mut report = WriteReport::default();

    for chapter in plan {
        let range = chapter.range;

        // Skip spans the document cannot supply
        if let Err(error) = range.check_bounds(total_pages) {
            warn!(position = chapter.position, %error, "skipping chapter");
            report.skipped.push(SkippedChapter {
                position: chapter.position,
                error,
            });
            continue;
        }

        // Copy the pages and overwrite any earlier output
        let path = output_dir.join(&chapter.filename);
        let mut new_doc = doc.extract_span(range.start, range.end);
        PdfDocument::save(&mut new_doc, &path)?;

        info!(
            path = %path.display(),
            pages = range.page_count(),
            "wrote chapter"
        );
        report.written.push(WrittenChapter {
            position: chapter.position,
            title: range.title,
            start: range.start,
            end: range.end,
            path,
        });
    }

    Ok(report)
}
