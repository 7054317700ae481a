//! The fallback orchestrator: drives the provider registry in priority
//! order, then falls back to the local sentence sampler.

use tutor_llm::{CompletionClient, CompletionOutcome, CompletionRequest, ProviderRegistry};

use crate::config::SummaryConfig;
use crate::local;
use crate::prompt::{self, Depth};
use crate::result::{SummaryFailure, SummaryResult};

/// Fixed assistant label substituted for any provider-identifying prefix.
pub const ASSISTANT_LABEL: &str = "Tutor AI";

pub struct Summarizer {
    registry: ProviderRegistry,
    client: CompletionClient,
    limits: SummaryConfig,
}

impl Summarizer {
    #[must_use]
    pub fn new(registry: ProviderRegistry, limits: SummaryConfig) -> Self {
        Self {
            registry,
            client: CompletionClient::new(),
            limits,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: CompletionClient) -> Self {
        self.client = client;
        self
    }

    pub async fn summarize(&self, text: &str) -> SummaryResult {
        self.summarize_with_depth(text, Depth::Quick).await
    }

    /// Run one full fallback pass over the registry.
    ///
    /// Providers are attempted strictly in registry order, one at a time,
    /// each at most once; the first success wins. When all fail, the local
    /// sampler runs on the original, untruncated text.
    pub async fn summarize_with_depth(&self, text: &str, depth: Depth) -> SummaryResult {
        if text.chars().count() < self.limits.min_text_chars {
            return SummaryResult::Failed(SummaryFailure::InsufficientText);
        }

        // Hard cut at a character boundary; not sentence-aware.
        let prompt = prompt::build_prompt(truncate_chars(text, self.limits.max_prompt_chars), depth);
        let request = CompletionRequest {
            prompt: &prompt,
            max_tokens: token_budget(prompt.chars().count()),
            min_useful_chars: match depth {
                Depth::Quick => self.limits.min_response_chars,
                Depth::Deep => self.limits.min_deep_response_chars,
            },
        };

        let mut attempted = Vec::new();
        for provider in self.registry.available() {
            tracing::debug!(provider = %provider.name, "requesting summary");
            match self.client.complete(provider, &request).await {
                CompletionOutcome::Success(reply) => {
                    tracing::debug!(
                        provider = %provider.name,
                        chars = reply.chars().count(),
                        "provider produced a summary"
                    );
                    return SummaryResult::Generated(self.brand(&reply));
                }
                outcome => {
                    tracing::warn!(
                        provider = %provider.name,
                        reason = %outcome.reason(),
                        "provider failed, falling back"
                    );
                    attempted.push(format!("{} ({})", provider.name, outcome.reason()));
                }
            }
        }

        match local::summarize_locally(text) {
            Ok(summary) => SummaryResult::Offline(summary),
            Err(_) if attempted.is_empty() => {
                SummaryResult::Failed(SummaryFailure::NoProvidersConfigured)
            }
            Err(_) => SummaryResult::Failed(SummaryFailure::AllProvidersFailed { attempted }),
        }
    }

    /// Replace any leaked provider-identifying prefix with the assistant label.
    fn brand(&self, reply: &str) -> String {
        let trimmed = reply.trim();
        let names: Vec<&str> = self
            .registry
            .names()
            .chain(std::iter::once(ASSISTANT_LABEL))
            .collect();
        format!("{ASSISTANT_LABEL}: {}", strip_name_prefix(trimmed, &names))
    }
}

fn strip_name_prefix<'a>(text: &'a str, names: &[&str]) -> &'a str {
    for name in names {
        let len = name.len();
        if text.len() > len
            && text.is_char_boundary(len)
            && text[..len].eq_ignore_ascii_case(name)
            && let Some(rest) = text[len..].trim_start().strip_prefix(':')
        {
            return rest.trim_start();
        }
    }
    text
}

/// Longer prompts warrant a larger completion budget, capped.
fn token_budget(prompt_chars: usize) -> u32 {
    if prompt_chars > 5000 { 2000 } else { 1000 }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_llm::{ProviderDescriptor, ProviderRegistry, RequestShape};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LONG_REPLY: &str =
        "A fully formed, sufficiently long explanatory response covering the document.";

    fn provider(name: &str, url: String) -> ProviderDescriptor {
        ProviderDescriptor {
            name: name.into(),
            url,
            model: "gpt-3.5-turbo".into(),
            api_key: Some("sk-test".into()),
            shape: RequestShape::OpenAi,
        }
    }

    fn summarizer(registry: ProviderRegistry) -> Summarizer {
        Summarizer::new(registry, SummaryConfig::default())
    }

    fn openai_body(content: &str) -> serde_json::Value {
        serde_json::json!({"choices": [{"message": {"content": content}}]})
    }

    fn long_text() -> String {
        (0..30)
            .map(|i| format!("Sentence number {i:02} with plenty of padding words here."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn token_budget_scales_with_prompt_length() {
        assert_eq!(token_budget(5000), 1000);
        assert_eq!(token_budget(5001), 2000);
        assert_eq!(token_budget(0), 1000);
    }

    #[test]
    fn truncate_cuts_at_character_boundary() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        // multi-byte chars are not split
        assert_eq!(truncate_chars("\u{e9}\u{e9}\u{e9}", 2), "\u{e9}\u{e9}");
    }

    #[test]
    fn strip_name_prefix_is_case_insensitive() {
        let names = ["Groq", "Claude"];
        assert_eq!(strip_name_prefix("groq: the text", &names), "the text");
        assert_eq!(strip_name_prefix("Claude : the text", &names), "the text");
        assert_eq!(strip_name_prefix("plain text", &names), "plain text");
        assert_eq!(strip_name_prefix("Groqqy: text", &names), "Groqqy: text");
    }

    #[tokio::test]
    async fn short_text_fails_before_any_provider_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .expect(0)
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let text = "x".repeat(99);
        let result = summarizer(registry).summarize(&text).await;
        assert_eq!(result, SummaryResult::Failed(SummaryFailure::InsufficientText));
    }

    #[tokio::test]
    async fn text_at_exact_threshold_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .expect(1)
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let text = "x".repeat(100);
        let result = summarizer(registry).summarize(&text).await;
        assert_eq!(
            result,
            SummaryResult::Generated(format!("{ASSISTANT_LABEL}: {LONG_REPLY}"))
        );
    }

    #[tokio::test]
    async fn providers_are_tried_in_order_until_one_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/one"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/two"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body("short")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/three"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/four"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .expect(0)
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![
            provider("One", format!("{}/one", server.uri())),
            provider("Two", format!("{}/two", server.uri())),
            provider("Three", format!("{}/three", server.uri())),
            provider("Four", format!("{}/four", server.uri())),
        ]);
        let result = summarizer(registry).summarize(&long_text()).await;
        assert_eq!(
            result,
            SummaryResult::Generated(format!("{ASSISTANT_LABEL}: {LONG_REPLY}"))
        );
    }

    #[tokio::test]
    async fn branding_strips_leaked_provider_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(openai_body(&format!("Groq: {LONG_REPLY}"))),
            )
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let result = summarizer(registry).summarize(&long_text()).await;
        assert_eq!(
            result,
            SummaryResult::Generated(format!("{ASSISTANT_LABEL}: {LONG_REPLY}"))
        );
    }

    #[tokio::test]
    async fn all_providers_failing_falls_back_to_local_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(2)
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![
            provider("One", format!("{}/a", server.uri())),
            provider("Two", format!("{}/b", server.uri())),
        ]);
        let result = summarizer(registry).summarize(&long_text()).await;
        match result {
            SummaryResult::Offline(summary) => {
                assert!(summary.starts_with(local::OFFLINE_MARKER));
            }
            other => panic!("expected offline summary, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn local_fallback_sees_untruncated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        // Tiny prompt cap: only the first couple of sentences fit, but the
        // sampler must still draw from the whole document.
        let limits = SummaryConfig {
            max_prompt_chars: 120,
            ..SummaryConfig::default()
        };
        let registry = ProviderRegistry::new(vec![provider("One", server.uri())]);
        let result = Summarizer::new(registry, limits).summarize(&long_text()).await;
        match result {
            SummaryResult::Offline(summary) => {
                assert!(
                    summary.contains("Sentence number 25"),
                    "fallback lost the tail: {summary}"
                );
            }
            other => panic!("expected offline summary, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_registry_goes_straight_to_local_fallback() {
        let result = summarizer(ProviderRegistry::default())
            .summarize(&long_text())
            .await;
        assert!(matches!(result, SummaryResult::Offline(_)));
    }

    #[tokio::test]
    async fn empty_registry_and_unsummarizable_text_reports_no_providers() {
        // Long enough to pass the threshold, but every sentence is noise-length.
        let text = "Ab cd. ".repeat(20);
        let result = summarizer(ProviderRegistry::default()).summarize(&text).await;
        assert_eq!(
            result,
            SummaryResult::Failed(SummaryFailure::NoProvidersConfigured)
        );
    }

    #[tokio::test]
    async fn all_failed_and_unsummarizable_text_lists_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let text = "Ab cd. ".repeat(20);
        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let result = summarizer(registry).summarize(&text).await;
        match result {
            SummaryResult::Failed(SummaryFailure::AllProvidersFailed { attempted }) => {
                assert_eq!(attempted, vec!["Groq (HTTP 500)".to_owned()]);
            }
            other => panic!("expected aggregate failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn identical_input_yields_identical_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let s = summarizer(registry);
        let text = long_text();
        let first = s.summarize(&text).await;
        let second = s.summarize(&text).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn deep_summaries_demand_longer_replies() {
        let server = MockServer::start().await;
        // 78 chars: useful for a quick summary, empty for a deep one.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(LONG_REPLY)))
            .mount(&server)
            .await;

        let registry = ProviderRegistry::new(vec![provider("Groq", server.uri())]);
        let s = summarizer(registry);
        let text = long_text();

        let quick = s.summarize_with_depth(&text, Depth::Quick).await;
        assert!(matches!(quick, SummaryResult::Generated(_)));

        let deep = s.summarize_with_depth(&text, Depth::Deep).await;
        assert!(matches!(deep, SummaryResult::Offline(_)));
    }
}
