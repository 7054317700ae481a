/// An uploaded document as handed over by the caller.
///
/// The pipeline treats the payload as immutable and does not retain it after
/// a summarization run completes.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub name: String,
    pub content_type: String,
}

impl Document {
    #[must_use]
    pub fn new(bytes: Vec<u8>, name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            name: name.into(),
            content_type: content_type.into(),
        }
    }
}

/// Cleaned plain text produced by the extractor.
///
/// `text` joins page texts with paragraph breaks and never contains
/// characters outside the printable ASCII range (plus newlines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// Pages that yielded text.
    pub pages: usize,
    /// Pages skipped because their extraction failed.
    pub failed_pages: usize,
}
