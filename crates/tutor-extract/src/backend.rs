//! Paged-document access behind a trait so the extraction pipeline can be
//! exercised against an instrumented backend in tests.

/// Failure opening a document, before any page is touched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpenError {
    #[error("document is encrypted")]
    Encrypted,

    #[error("{0}")]
    Malformed(String),
}

/// Failure extracting one page. Recoverable: the extractor skips the page.
#[derive(Debug, Clone, thiserror::Error)]
#[error("page {index}: {message}")]
pub struct PageError {
    pub index: usize,
    pub message: String,
}

pub trait PagedDocument: Send {
    fn page_count(&self) -> usize;

    /// Extract the raw text of the page at `index` (zero-based, in document
    /// order).
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the page's content cannot be decoded.
    fn page_text(&self, index: usize) -> Result<String, PageError>;
}

pub trait DocumentBackend: Send + Sync {
    type Doc: PagedDocument;

    /// Parse raw document bytes into a paged view.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::Encrypted`] for password-protected input and
    /// [`OpenError::Malformed`] for anything else that prevents parsing.
    fn open(&self, bytes: &[u8]) -> Result<Self::Doc, OpenError>;
}

/// Production backend built on `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

#[derive(Debug)]
pub struct PdfDocument {
    doc: lopdf::Document,
    /// Page numbers in document order. lopdf keys pages by 1-based number.
    page_numbers: Vec<u32>,
}

impl DocumentBackend for PdfBackend {
    type Doc = PdfDocument;

    fn open(&self, bytes: &[u8]) -> Result<PdfDocument, OpenError> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| classify_load_error(&e))?;
        if doc.is_encrypted() {
            return Err(OpenError::Encrypted);
        }
        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();
        Ok(PdfDocument { doc, page_numbers })
    }
}

impl PagedDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PageError> {
        let number = self.page_numbers.get(index).ok_or_else(|| PageError {
            index,
            message: "page out of range".into(),
        })?;
        self.doc.extract_text(&[*number]).map_err(|e| PageError {
            index,
            message: e.to_string(),
        })
    }
}

fn classify_load_error(err: &lopdf::Error) -> OpenError {
    classify_message(err.to_string())
}

fn classify_message(message: String) -> OpenError {
    let lower = message.to_lowercase();
    if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
        OpenError::Encrypted
    } else {
        OpenError::Malformed(message)
    }
}
