use crate::error::{Result, SplitError};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    /// Open a source PDF, rejecting paths that are missing, are not regular
    /// files, do not carry a `.pdf` extension, or fail to parse.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SplitError::invalid_source(path, "file does not exist"));
        }
        if !path.is_file() {
            return Err(SplitError::invalid_source(path, "not a regular file"));
        }
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(SplitError::invalid_source(path, "expected a .pdf file"));
        }

        let doc = Document::load(path).map_err(|e| SplitError::InvalidSource {
            path: path.to_path_buf(),
            reason: "failed to parse PDF".to_string(),
            source: Some(e),
        })?;

        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy the zero-based inclusive page span `[start, end]` into a new
    /// document. The source document is left untouched.
    ///
    /// The copy carries no outline: the source bookmarks point at pages that
    /// are no longer part of it.
    pub fn extract_span(&self, start: u32, end: u32) -> Document {
        let mut new_doc = self.doc.clone();

        // lopdf numbers pages from 1
        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|num| !(start..=end).contains(&(num - 1)))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        drop_outline(&mut new_doc);
        new_doc.prune_objects();

        new_doc
    }

    /// Save to a file, replacing whatever is there.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path).map_err(|source| SplitError::WriteFailure {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

fn drop_outline(doc: &mut Document) {
    let root_id = match doc.trailer.get(b"Root").and_then(Object::as_reference) {
        Ok(id) => id,
        Err(_) => return,
    };
    if let Ok(catalog) = doc.get_dictionary_mut(root_id) {
        catalog.remove(b"Outlines");
        if let Ok(Object::Name(mode)) = catalog.get(b"PageMode") {
            if mode == b"UseOutlines" {
                catalog.remove(b"PageMode");
            }
        }
    }
}

/// Decode a PDF text string: UTF-16BE when it carries a byte order mark,
/// PDFDocEncoding (treated as Latin-1) otherwise.
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|chunk| {
                if chunk.len() == 2 {
                    Some(u16::from_be_bytes([chunk[0], chunk[1]]))
                } else {
                    None
                }
            })
            .collect();
        String::from_utf16_lossy(&u16_chars)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
