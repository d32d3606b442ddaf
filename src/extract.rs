//! Turns an uploaded file into plain text. PDF extraction delegates to the
//! `pdf-extract` crate; plain text is a straight UTF-8 read. Either the
//! full text comes back or a descriptive error does, never a partial
//! result and never a fallback encoding.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// `Some` iff the filename contains a dot and its lowercase suffix is
    /// an allowed extension (`txt` or `pdf`). Pure, no filesystem access.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

pub fn extract(path: &Path, kind: DocumentKind) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => read_pdf(path),
        DocumentKind::Text => read_text_file(path),
    }
}

fn read_pdf(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path).map_err(|e| AppError::Pdf(e.to_string()))?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    let text = join_pages(&pages);
    debug!(path = %path.display(), pages = pages.len(), chars = text.chars().count(), "pdf extracted");
    Ok(text)
}

/// Pages that yielded no text are skipped; each remaining page's text is
/// trimmed and appended followed by a newline, so two pages "Page1" and
/// "Page2" become "Page1\nPage2\n".
fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        let page = page.trim();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}

fn read_text_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| AppError::TextFile(e.to_string()))
}
