//! The only artifact returned to callers: a display-ready summary or a
//! plain-language failure.

/// Outcome of one summarization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    /// Branded text from a network provider.
    Generated(String),
    /// Produced by the local sentence sampler; carries the offline marker.
    Offline(String),
    Failed(SummaryFailure),
}

impl SummaryResult {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Collapse to the plain string the UI renders. Every variant yields
    /// something displayable; failures read as corrective guidance.
    #[must_use]
    pub fn into_display(self) -> String {
        match self {
            Self::Generated(text) | Self::Offline(text) => text,
            Self::Failed(failure) => failure.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryFailure {
    #[error(
        "This document does not contain enough readable text to summarize. \
         Try uploading a different file."
    )]
    InsufficientText,

    #[error(
        "No AI providers are configured. Add at least one provider API key \
         to the environment."
    )]
    NoProvidersConfigured,

    #[error(
        "All AI providers failed ({}). Please check your API keys or try again later.",
        .attempted.join(", ")
    )]
    AllProvidersFailed { attempted: Vec<String> },
}
