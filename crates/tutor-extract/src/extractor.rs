use std::time::Duration;

use crate::DEFAULT_PARSE_TIMEOUT_SECS;
use crate::backend::{DocumentBackend, OpenError, PagedDocument, PdfBackend};
use crate::check::{Processability, check_document};
use crate::cleanup;
use crate::error::ExtractError;
use crate::types::{Document, ExtractedText};

/// Whole-document text extraction with a bounded parse time.
#[derive(Debug, Clone)]
pub struct Extractor<B = PdfBackend> {
    backend: B,
    parse_timeout: Duration,
}

impl Extractor<PdfBackend> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(
            PdfBackend,
            Duration::from_secs(DEFAULT_PARSE_TIMEOUT_SECS),
        )
    }
}

impl Default for Extractor<PdfBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Extractor<B>
where
    B: DocumentBackend + Clone + 'static,
    B::Doc: 'static,
{
    #[must_use]
    pub fn with_backend(backend: B, parse_timeout: Duration) -> Self {
        Self {
            backend,
            parse_timeout,
        }
    }

    /// Extract the full text of `document`.
    ///
    /// Pages whose extraction fails are skipped; the operation only fails
    /// outright when no page yields text. Parsing runs on the blocking pool
    /// and is raced against the configured timeout; an expired parse is
    /// aborted, not awaited.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Timeout`] when parsing exceeds the bound,
    /// [`ExtractError::Encrypted`] or [`ExtractError::Unreadable`] when the
    /// document cannot be opened, and [`ExtractError::NoText`] when zero
    /// pages produced text.
    pub async fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractError> {
        let backend = self.backend.clone();
        let bytes = document.bytes.clone();
        let handle = tokio::task::spawn_blocking(move || extract_all(&backend, &bytes));
        let abort = handle.abort_handle();

        match tokio::time::timeout(self.parse_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ExtractError::Unreadable(join_error.to_string())),
            Err(_) => {
                abort.abort();
                Err(ExtractError::Timeout(self.parse_timeout.as_secs()))
            }
        }
    }

    /// Cheap pre-flight probe: open plus one page, nothing more.
    #[must_use]
    pub fn check(&self, document: &Document) -> Processability {
        check_document(&self.backend, &document.bytes)
    }
}

fn extract_all<B: DocumentBackend>(backend: &B, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let doc = backend.open(bytes).map_err(|e| match e {
        OpenError::Encrypted => ExtractError::Encrypted,
        OpenError::Malformed(message) => ExtractError::Unreadable(message),
    })?;

    let mut page_texts = Vec::new();
    let mut failed_pages = 0usize;
    for index in 0..doc.page_count() {
        match doc.page_text(index) {
            Ok(raw) => {
                let joined = join_tokens(&raw);
                if !joined.is_empty() {
                    page_texts.push(joined);
                }
            }
            Err(error) => {
                tracing::warn!(page = index, %error, "page extraction failed, skipping");
                failed_pages += 1;
            }
        }
    }

    if page_texts.is_empty() {
        return Err(ExtractError::NoText);
    }

    let pages = page_texts.len();
    let text = cleanup::clean(&page_texts.join("\n\n"));
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }

    Ok(ExtractedText {
        text,
        pages,
        failed_pages,
    })
}

/// Join a page's text tokens with single spaces.
fn join_tokens(page: &str) -> String {
    let mut out = String::with_capacity(page.len());
    for token in page.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
