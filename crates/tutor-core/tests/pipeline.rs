//! End-to-end pipeline scenarios: document in, display string out.

use std::time::Duration;

use tutor_core::config::SummaryConfig;
use tutor_core::local::OFFLINE_MARKER;
use tutor_core::{ASSISTANT_LABEL, SummaryService, Summarizer};
use tutor_extract::mock::MockBackend;
use tutor_extract::{Document, Extractor, Processability, UnprocessableReason};
use tutor_llm::{ProviderDescriptor, ProviderRegistry, RequestShape};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn document() -> Document {
    Document::new(vec![0u8; 16], "lecture.pdf", "application/pdf")
}

fn provider(name: &str, url: String) -> ProviderDescriptor {
    ProviderDescriptor {
        name: name.into(),
        url,
        model: "gpt-3.5-turbo".into(),
        api_key: Some("sk-test".into()),
        shape: RequestShape::OpenAi,
    }
}

fn service(backend: MockBackend, registry: ProviderRegistry) -> SummaryService<MockBackend> {
    SummaryService::from_parts(
        Extractor::with_backend(backend, Duration::from_secs(5)),
        Summarizer::new(registry, SummaryConfig::default()),
    )
}

/// Fifty short sentences and no providers at all: the offline sampler caps
/// the summary at ten sentences, in document order, behind its marker.
#[tokio::test]
async fn scenario_a_empty_registry_yields_ten_sentence_local_summary() {
    let page = (0..50)
        .map(|i| format!("Fact number {i:02} stated with enough words to matter."))
        .collect::<Vec<_>>()
        .join(" ");
    let backend = MockBackend::with_pages(vec![Ok(page)]);

    let summary = service(backend, ProviderRegistry::default())
        .summarize_document(&document(), None)
        .await;

    assert!(summary.starts_with(OFFLINE_MARKER));
    assert_eq!(summary.matches("Fact number").count(), 10);
}

/// Provider 1 returns HTTP 500, provider 2 answers usefully: the result is
/// provider 2's text, branded, and provider 3 is never contacted.
#[tokio::test]
async fn scenario_b_fallback_stops_at_first_useful_reply() {
    let reply = "A fully formed, sufficiently long explanatory response about the notes.";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/one"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": reply}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/three"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unreached"))
        .expect(0)
        .mount(&server)
        .await;

    let registry = ProviderRegistry::new(vec![
        provider("One", format!("{}/one", server.uri())),
        provider("Two", format!("{}/two", server.uri())),
        provider("Three", format!("{}/three", server.uri())),
    ]);
    // ~300 characters of extracted text.
    let page = "The mitochondria is the powerhouse of the cell. ".repeat(6);
    let backend = MockBackend::with_pages(vec![Ok(page)]);

    let summary = service(backend, registry)
        .summarize_document(&document(), None)
        .await;

    assert_eq!(summary, format!("{ASSISTANT_LABEL}: {reply}"));
}

/// A document with zero pages is rejected by the pre-flight check; a caller
/// honoring the check never invokes summarization.
#[tokio::test]
async fn scenario_c_zero_page_document_fails_the_preflight_check() {
    let backend = MockBackend::with_pages(vec![]);
    let service = service(backend, ProviderRegistry::default());

    assert_eq!(
        service.check(&document()),
        Processability::Unprocessable(UnprocessableReason::NoPages)
    );
}
