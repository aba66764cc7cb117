use std::path::PathBuf;
use thiserror::Error;

/// Failures of the chapter split pipeline.
///
/// `RangeOutOfBounds` is the only per-chapter failure: the writer records it
/// and moves on. Every other variant ends the operation.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid source PDF {}: {reason}", path.display())]
    InvalidSource {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<lopdf::Error>,
    },

    #[error("Document has no outline (bookmarks)")]
    NoOutline,

    #[error("Outline has no entries with both a title and a resolvable page")]
    NoChapters,

    #[error(
        "Chapter {title:?} spans pages {start}-{end}, outside the document's {total_pages} page(s)"
    )]
    RangeOutOfBounds {
        title: String,
        start: u32,
        end: u32,
        total_pages: u32,
    },

    #[error("Failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chapter selection: {0}")]
    InvalidSelection(String),
}

impl SplitError {
    pub(crate) fn invalid_source(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SplitError::InvalidSource {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }
}

pub type Result<T, E = SplitError> = std::result::Result<T, E>;
