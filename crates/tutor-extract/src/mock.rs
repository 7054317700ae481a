//! Test-only document backend with call-count instrumentation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::backend::{DocumentBackend, OpenError, PageError, PagedDocument};

#[derive(Debug, Clone, Copy)]
enum OpenFailure {
    Encrypted,
    Malformed,
}

#[derive(Debug, Clone)]
pub struct MockBackend {
    pages: Vec<Result<String, String>>,
    fail_open: Option<OpenFailure>,
    malformed_message: String,
    /// Milliseconds to block inside `open`, for timeout tests.
    pub open_delay_ms: u64,
    open_calls: Arc<AtomicUsize>,
    page_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    #[must_use]
    pub fn with_pages(pages: Vec<Result<String, String>>) -> Self {
        Self {
            pages,
            fail_open: None,
            malformed_message: String::new(),
            open_delay_ms: 0,
            open_calls: Arc::new(AtomicUsize::new(0)),
            page_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn encrypted() -> Self {
        Self {
            fail_open: Some(OpenFailure::Encrypted),
            ..Self::with_pages(vec![])
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            fail_open: Some(OpenFailure::Malformed),
            malformed_message: message.into(),
            ..Self::with_pages(vec![])
        }
    }

    #[must_use]
    pub fn with_open_delay(mut self, ms: u64) -> Self {
        self.open_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

pub struct MockDocument {
    pages: Vec<Result<String, String>>,
    page_calls: Arc<AtomicUsize>,
}

impl DocumentBackend for MockBackend {
    type Doc = MockDocument;

    fn open(&self, _bytes: &[u8]) -> Result<MockDocument, OpenError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.open_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.open_delay_ms));
        }
        match self.fail_open {
            Some(OpenFailure::Encrypted) => Err(OpenError::Encrypted),
            Some(OpenFailure::Malformed) => {
                Err(OpenError::Malformed(self.malformed_message.clone()))
            }
            None => Ok(MockDocument {
                pages: self.pages.clone(),
                page_calls: Arc::clone(&self.page_calls),
            }),
        }
    }
}

impl PagedDocument for MockDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PageError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(index) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(PageError {
                index,
                message: message.clone(),
            }),
            None => Err(PageError {
                index,
                message: "page out of range".into(),
            }),
        }
    }
}
