//! Prompt composition for summary requests.

use serde::{Deserialize, Serialize};

/// How thorough the requested summary should be.
///
/// Deep summaries also raise the minimum useful reply length (see
/// [`crate::config::SummaryConfig`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    #[default]
    Quick,
    Deep,
}

/// Compose the instructional prompt sent, unchanged, to every provider in a
/// fallback pass.
#[must_use]
pub fn build_prompt(text: &str, depth: Depth) -> String {
    match depth {
        Depth::Quick => format!(
            "You are a study assistant. Summarize the following document for a student.\n\
             \n\
             Structure your response exactly as:\n\
             1. Main Topics - the document's main topics, one per line\n\
             2. Detailed Summary - the core content in clear paragraphs\n\
             3. Key Insights - the most important takeaways\n\
             \n\
             Use plain text with numbered sections and line breaks. No markup.\n\
             \n\
             Document:\n\
             {text}"
        ),
        Depth::Deep => format!(
            "You are a study assistant. Write a thorough deep-dive summary of the \
             following document for a student preparing for an exam.\n\
             \n\
             Structure your response exactly as:\n\
             1. Main Topics - the document's main topics, one per line\n\
             2. Detailed Summary - several paragraphs per topic, covering definitions, \
             mechanisms, and examples from the document\n\
             3. Key Insights - the most important takeaways and how they connect\n\
             \n\
             Use plain text with numbered sections and line breaks. No markup.\n\
             \n\
             Document:\n\
             {text}"
        ),
    }
}
