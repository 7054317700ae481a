//! Document text extraction and processability checks.

pub mod backend;
pub mod check;
pub mod cleanup;
pub mod error;
pub mod extractor;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;

pub use backend::{DocumentBackend, OpenError, PageError, PagedDocument, PdfBackend};
pub use check::{Processability, UnprocessableReason};
pub use error::ExtractError;
pub use extractor::Extractor;
pub use types::{Document, ExtractedText};

/// Default bound on document open/parse time.
pub const DEFAULT_PARSE_TIMEOUT_SECS: u64 = 30;
