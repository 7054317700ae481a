//! Document-to-summary pipeline: extract text from an uploaded document,
//! request a summary from a prioritized list of hosted providers with
//! per-provider fallback, and fall back to a deterministic offline
//! summarizer when every provider fails.

pub mod config;
pub mod local;
pub mod prompt;
pub mod result;
pub mod service;
pub mod summarizer;

pub use config::Config;
pub use prompt::Depth;
pub use result::{SummaryFailure, SummaryResult};
pub use service::{SummaryRecord, SummaryService, SummaryStore};
pub use summarizer::{ASSISTANT_LABEL, Summarizer};
