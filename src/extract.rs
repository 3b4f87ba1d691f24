//! PDF text extraction.
//!
//! Parsing is delegated to [`pdf_extract`]. The library can panic on
//! malformed input instead of returning an error, so the call is wrapped in
//! [`std::panic::catch_unwind`] and a panic becomes
//! [`UploadError::Extraction`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::UploadError;

/// Text pulled from a document, pages already joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
}

/// Read the PDF at `path` and extract its text.
///
/// Blocking: call from a blocking context (`web::block`).
pub fn extract_file(path: &Path) -> Result<ExtractedText, UploadError> {
    let data = std::fs::read(path)?;
    let pages = extract_pages(&data)?;

    Ok(ExtractedText {
        text: join_pages(&pages),
        pages: pages.len(),
    })
}

/// One string per page, in document order.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>, UploadError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(UploadError::Extraction(e.to_string())),
        Err(_) => Err(UploadError::Extraction(
            "parser panicked (malformed document)".into(),
        )),
    }
}

/// Concatenate page texts, each followed by a single newline.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let capacity = pages.iter().map(|p| p.as_ref().len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for page in pages {
        out.push_str(page.as_ref());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_page_is_newline_terminated() {
        let joined = join_pages(&["first", "second", "third"]);
        assert_eq!(joined, "first\nsecond\nthird\n");
        assert_eq!(joined.matches('\n').count(), 3);
    }

    #[test]
    fn empty_pages_still_get_a_newline() {
        assert_eq!(join_pages(&["", "b", ""]), "\nb\n\n");
    }

    #[test]
    fn no_pages_is_empty_text() {
        let pages: [&str; 0] = [];
        assert_eq!(join_pages(&pages), "");
    }

    #[test]
    fn garbage_is_an_extraction_error() {
        let err = extract_pages(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, UploadError::Extraction(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = extract_file(&tmp.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, UploadError::Io(_)));
    }
}
