use crate::http::default_client;
use crate::outcome::CompletionOutcome;
use crate::registry::ProviderDescriptor;
use crate::shape::{ANTHROPIC_VERSION, ApiMessage, ChatRequest, RequestShape};

/// Placeholder some providers return instead of an actual reply.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response";

/// One completion attempt: prompt, token budget, and the usefulness floor
/// for classifying the reply.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
    /// Replies shorter than this many characters are classified [`CompletionOutcome::Empty`].
    pub min_useful_chars: usize,
}

/// Sends a single completion request to a single provider.
///
/// Never retries and never falls back; that is the orchestrator's job.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
}

impl CompletionClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: default_client(),
        }
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Send `request` to `provider` and classify the reply.
    pub async fn complete(
        &self,
        provider: &ProviderDescriptor,
        request: &CompletionRequest<'_>,
    ) -> CompletionOutcome {
        let Some(key) = provider.api_key.as_deref() else {
            // The registry filters these out; a direct caller gets a clean refusal.
            return CompletionOutcome::Transport("provider has no credential".into());
        };

        let messages = [ApiMessage {
            role: "user",
            content: request.prompt,
        }];
        let body = ChatRequest {
            model: &provider.model,
            messages: &messages,
            max_tokens: request.max_tokens,
        };

        let mut builder = self
            .http
            .post(&provider.url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {key}"))
            .json(&body);
        if provider.shape == RequestShape::Anthropic {
            builder = builder
                .header("x-api-key", key)
                .header("anthropic-version", ANTHROPIC_VERSION);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return CompletionOutcome::Transport(error.to_string()),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => return CompletionOutcome::Transport(error.to_string()),
        };

        if !status.is_success() {
            tracing::error!(provider = %provider.name, %status, body = %text, "provider API error");
            return CompletionOutcome::HttpError {
                status: status.as_u16(),
                body: text,
            };
        }

        match provider.shape.response_text(&text) {
            Some(reply)
                if reply != NO_RESPONSE_PLACEHOLDER
                    && reply.chars().count() >= request.min_useful_chars =>
            {
                CompletionOutcome::Success(reply)
            }
            _ => CompletionOutcome::Empty,
        }
    }
}

impl Default for CompletionClient {
    fn default() -> Self {
        Self::new()
    }
}
