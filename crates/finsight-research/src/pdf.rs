//! PDF text extraction
//!
//! Extraction is page by page: a page with no extractable text (scanned
//! images, blanks) is skipped rather than failing the whole document. A
//! document where every page comes back empty is an error, since there is
//! nothing for the analyzer to read.

use finsight_core::DocumentContext;
use lopdf::Document;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors from turning a PDF file into analyzable text
#[derive(Debug, Error)]
pub enum PdfError {
    /// The file could not be opened or parsed as a PDF
    #[error("could not read '{path}' as a PDF: {detail}")]
    Unreadable { path: String, detail: String },

    /// The document parsed but no page yielded any text
    #[error("no extractable text in '{path}'; the document may be scanned images")]
    NoText { path: String },
}

/// Extract the text of a PDF into a [`DocumentContext`]
///
/// Page text is joined with blank lines in page order. The context name is
/// the file name, falling back to the full path when there is none.
///
/// # Errors
///
/// [`PdfError::Unreadable`] if the file cannot be parsed as a PDF,
/// [`PdfError::NoText`] if no page yields text.
pub fn extract_document(path: &Path) -> Result<DocumentContext, PdfError> {
    // Named to avoid colliding with `tracing::field::display`, which the
    // tracing macros import into scope inside their expansion.
    let display_path = path.display().to_string();

    let doc = Document::load(path).map_err(|e| PdfError::Unreadable {
        path: display_path.clone(),
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    let total = pages.len();
    let mut sections: Vec<String> = Vec::new();

    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    sections.push(trimmed.to_string());
                }
            }
            Err(e) => {
                debug!(page = *page_number, error = %e, "skipping unreadable page");
            }
        }
    }

    if sections.is_empty() {
        return Err(PdfError::NoText { path: display_path });
    }

    debug!(
        path = %display_path,
        pages = total,
        pages_with_text = sections.len(),
        "extracted document text"
    );

    let name = path.file_name().map_or_else(
        || display_path.clone(),
        |n| n.to_string_lossy().into_owned(),
    );

    Ok(DocumentContext::new(name, sections.join("\n\n")))
}
