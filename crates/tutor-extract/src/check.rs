//! Cheap pre-flight check predicting whether full extraction will yield
//! usable text. Bounded to opening the document plus one page.

use std::fmt;

use crate::backend::{DocumentBackend, OpenError, PagedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processability {
    Processable,
    Unprocessable(UnprocessableReason),
}

impl Processability {
    #[must_use]
    pub fn is_processable(self) -> bool {
        matches!(self, Self::Processable)
    }
}

/// Closed set of reasons a document is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnprocessableReason {
    NoPages,
    NoExtractableText,
    Encrypted,
    Unreadable,
}

impl fmt::Display for UnprocessableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NoPages => "the document has no pages",
            Self::NoExtractableText => {
                "the first page has no extractable text; the document is likely image-based or scanned"
            }
            Self::Encrypted => "the document is encrypted or password-protected",
            Self::Unreadable => "the document cannot be processed",
        };
        f.write_str(message)
    }
}

/// Open the document and probe the first page only.
///
/// Performs no caching and no mutation; safe to call repeatedly.
pub(crate) fn check_document<B: DocumentBackend>(backend: &B, bytes: &[u8]) -> Processability {
    let doc = match backend.open(bytes) {
        Ok(doc) => doc,
        Err(OpenError::Encrypted) => {
            return Processability::Unprocessable(UnprocessableReason::Encrypted);
        }
        Err(OpenError::Malformed(message)) => {
            tracing::debug!(%message, "processability check: open failed");
            return Processability::Unprocessable(UnprocessableReason::Unreadable);
        }
    };

    if doc.page_count() == 0 {
        return Processability::Unprocessable(UnprocessableReason::NoPages);
    }

    match doc.page_text(0) {
        Ok(text) if text.split_whitespace().next().is_some() => Processability::Processable,
        _ => Processability::Unprocessable(UnprocessableReason::NoExtractableText),
    }
}
