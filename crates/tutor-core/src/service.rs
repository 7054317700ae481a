//! Inbound facade for the UI layer: extract, summarize, optionally persist.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tutor_extract::{
    Document, DocumentBackend, ExtractError, Extractor, PdfBackend, Processability,
};

use crate::config::Config;
use crate::prompt::Depth;
use crate::result::SummaryResult;
use crate::summarizer::Summarizer;

/// A generated summary ready for persistence.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRecord<'a> {
    pub document_name: &'a str,
    pub identity: Option<&'a str>,
    pub summary: &'a str,
}

/// Best-effort persistence collaborator. A failing store is logged and never
/// affects the summary returned to the caller.
pub trait SummaryStore: Send + Sync {
    fn save<'a>(
        &'a self,
        record: SummaryRecord<'a>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}

pub struct SummaryService<B = PdfBackend> {
    extractor: Extractor<B>,
    summarizer: Summarizer,
    store: Option<Arc<dyn SummaryStore>>,
}

impl SummaryService<PdfBackend> {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let extractor = Extractor::with_backend(
            PdfBackend,
            Duration::from_secs(config.extraction.parse_timeout_secs),
        );
        Self::from_parts(
            extractor,
            Summarizer::new(config.registry(), config.summary.clone()),
        )
    }
}

impl<B> SummaryService<B>
where
    B: DocumentBackend + Clone + 'static,
    B::Doc: 'static,
{
    #[must_use]
    pub fn from_parts(extractor: Extractor<B>, summarizer: Summarizer) -> Self {
        Self {
            extractor,
            summarizer,
            store: None,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SummaryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Cheap pre-flight probe for the uploader UI.
    #[must_use]
    pub fn check(&self, document: &Document) -> Processability {
        self.extractor.check(document)
    }

    pub async fn summarize_document(&self, document: &Document, identity: Option<&str>) -> String {
        self.summarize_document_with(document, identity, Depth::Quick)
            .await
    }

    /// Run the whole pipeline and return a display-ready string.
    ///
    /// Every failure path yields plain-language guidance; nothing escapes as
    /// an error.
    pub async fn summarize_document_with(
        &self,
        document: &Document,
        identity: Option<&str>,
        depth: Depth,
    ) -> String {
        let extracted = match self.extractor.extract(document).await {
            Ok(extracted) => extracted,
            Err(error) => {
                tracing::warn!(document = %document.name, %error, "extraction failed");
                return extraction_message(&error);
            }
        };
        tracing::debug!(
            document = %document.name,
            pages = extracted.pages,
            skipped = extracted.failed_pages,
            chars = extracted.text.len(),
            "document text extracted"
        );

        let result = self
            .summarizer
            .summarize_with_depth(&extracted.text, depth)
            .await;

        if let Some(store) = &self.store
            && let SummaryResult::Generated(summary) | SummaryResult::Offline(summary) = &result
        {
            let record = SummaryRecord {
                document_name: &document.name,
                identity,
                summary,
            };
            if let Err(error) = store.save(record).await {
                tracing::warn!(document = %document.name, %error, "failed to persist summary, returning it anyway");
            }
        }

        result.into_display()
    }
}

fn extraction_message(error: &ExtractError) -> String {
    match error {
        ExtractError::Timeout(secs) => format!(
            "Reading the document timed out after {secs} seconds. \
             Try again, or upload a smaller file."
        ),
        ExtractError::Encrypted => "This document is password-protected and cannot be summarized. \
             Remove the password and upload it again."
            .into(),
        ExtractError::Unreadable(_) => "This document could not be read. It may be corrupted; \
             try re-exporting it or uploading a different file."
            .into(),
        ExtractError::NoText => "No readable text was found in this document. \
             It may be image-based or scanned."
            .into(),
    }
}
