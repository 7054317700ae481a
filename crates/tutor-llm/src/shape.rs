//! Request/response shapes shared by the hosted completion providers.
//!
//! Most providers speak the OpenAI chat shape; Anthropic differs in headers
//! and in where the reply text lives. Adding a provider is a registry data
//! change, never a new code path.

use serde::{Deserialize, Serialize};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestShape {
    #[default]
    OpenAi,
    Anthropic,
}

impl RequestShape {
    /// Pull the reply text out of a provider response body.
    ///
    /// `None` covers both unparseable bodies and bodies with no text at the
    /// shape's reply path.
    #[must_use]
    pub fn response_text(self, body: &str) -> Option<String> {
        match self {
            Self::OpenAi => serde_json::from_str::<OpenAiResponse>(body)
                .ok()?
                .choices
                .into_iter()
                .next()?
                .message
                .content,
            Self::Anthropic => serde_json::from_str::<AnthropicResponse>(body)
                .ok()?
                .content
                .into_iter()
                .next()
                .map(|block| block.text),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ApiMessage<'a>],
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub(crate) struct ApiMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}
