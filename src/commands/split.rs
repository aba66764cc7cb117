use crate::chapters::{self, plan_chapters, write_chapters, Order, PlannedChapter, WriteReport};
use crate::pdf::PdfDocument;
use crate::selection::Selection;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub struct SplitOptions {
    pub order: Order,
    /// 1-based chapter list such as "1-3,7", counted after ordering
    pub select: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug)]
enum SplitOutcome {
    Planned {
        chapters: Vec<PlannedChapter>,
        total_pages: u32,
    },
    Written(WriteReport),
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &SplitOptions,
) -> Result<()> {
    let output_dir = output_dir.as_ref();

    match split(input.as_ref(), output_dir, options)? {
        SplitOutcome::Planned {
            chapters,
            total_pages,
        } => {
            for line in format_plan(output_dir, &chapters, total_pages) {
                println!("{}", line);
            }
        }
        SplitOutcome::Written(report) => {
            for skipped in &report.skipped {
                eprintln!("Skipped chapter {:02}: {}", skipped.position, skipped.error);
            }
            println!(
                "Created {} PDF(s) in {}",
                report.count(),
                output_dir.display()
            );
        }
    }

    Ok(())
}

fn split(input: &Path, output_dir: &Path, options: &SplitOptions) -> Result<SplitOutcome> {
    let doc = PdfDocument::open(input)?;
    let ranges = chapters::ordered_chapters(&doc, options.order)
        .with_context(|| format!("Failed to read chapters from {}", input.display()))?;

    let selection = options
        .select
        .as_deref()
        .map(|s| Selection::parse(s, ranges.len()))
        .transpose()?;
    if let Some(selection) = &selection {
        info!(
            selected = selection.len(),
            chapters = ranges.len(),
            "using chapter selection"
        );
    }

    if options.dry_run {
        return Ok(SplitOutcome::Planned {
            chapters: plan_chapters(&ranges, selection.as_ref())?,
            total_pages: doc.page_count(),
        });
    }

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let report = write_chapters(&doc, &ranges, output_dir, selection.as_ref())
        .with_context(|| format!("Failed to split {}", input.display()))?;

    Ok(SplitOutcome::Written(report))
}

/// One line per planned file, 1-based pages.
fn format_plan(output_dir: &Path, chapters: &[PlannedChapter], total_pages: u32) -> Vec<String> {
    chapters
        .iter()
        .map(|chapter| {
            let path = output_dir.join(&chapter.filename);
            match chapter.range.check_bounds(total_pages) {
                Ok(()) => format!(
                    "{} (pages {}-{})",
                    path.display(),
                    chapter.range.start + 1,
                    chapter.range.end + 1
                ),
                Err(e) => format!("{} (skipped: {})", path.display(), e),
            }
        })
        .collect()
}
