pub mod ranges;
pub mod sanitize;
pub mod writer;

pub use ranges::{resolve_ranges, ChapterRange};
pub use writer::{plan_chapters, write_chapters, PlannedChapter, WriteReport};

use crate::error::Result;
use crate::pdf::outline::extract_outline;
use crate::pdf::PdfDocument;
use crate::selection::Selection;
use clap::ValueEnum;
use std::path::Path;
use tracing::info;

/// Output order of the chapter files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Resolve the chapter ranges of an open document, first page first.
pub fn resolve_document(doc: &PdfDocument) -> Result<Vec<ChapterRange>> {
    let entries = extract_outline(&doc.doc)?;
    Ok(resolve_ranges(entries, doc.page_count()))
}

/// Resolve the chapter ranges of an open document in the requested order.
pub fn ordered_chapters(doc: &PdfDocument, order: Order) -> Result<Vec<ChapterRange>> {
    let mut ranges = resolve_document(doc)?;
    if order == Order::Descending {
        ranges.reverse();
    }

    info!(
        path = %doc.path.display(),
        pages = doc.page_count(),
        chapters = ranges.len(),
        "resolved chapters"
    );

    Ok(ranges)
}

/// Open a PDF and resolve its chapter ranges, in the requested order.
pub fn chapter_ranges<P: AsRef<Path>>(input: P, order: Order) -> Result<Vec<ChapterRange>> {
    let doc = PdfDocument::open(input)?;
    ordered_chapters(&doc, order)
}

/// Split `input` into one PDF per chapter inside `output_dir`.
///
/// The selection indexes the chapter list after `order` has been applied.
pub fn split_document<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    order: Order,
    selection: Option<&Selection>,
) -> Result<WriteReport> {
    let doc = PdfDocument::open(&input)?;
    let ranges = ordered_chapters(&doc, order)?;
    write_chapters(&doc, &ranges, output_dir.as_ref(), selection)
}
