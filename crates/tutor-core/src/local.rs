//! Deterministic offline summarizer used when every provider fails.
//!
//! Samples sentences at a fixed stride, preferring substantive ones, and
//! backfills from the start when sampling alone cannot reach the target.
//! Output always preserves original document order.

/// Marks a summary produced without any network call.
pub const OFFLINE_MARKER: &str = "[Offline summary] ";

/// Sentences shorter than this are discarded as likely noise (headers, page
/// numbers).
const MIN_SENTENCE_CHARS: usize = 20;
/// Stride sampling only keeps sentences longer than this.
const MIN_SUBSTANTIVE_CHARS: usize = 30;
const MAX_SUMMARY_SENTENCES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not enough sentence material for an offline summary")]
pub struct InsufficientText;

/// Produce an offline summary by sentence sampling.
///
/// # Errors
///
/// Returns [`InsufficientText`] when no usable sentences remain after noise
/// filtering.
pub fn summarize_locally(text: &str) -> Result<String, InsufficientText> {
    let sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .collect();
    if sentences.is_empty() {
        return Err(InsufficientText);
    }

    let count = sentences.len();
    let target = MAX_SUMMARY_SENTENCES.min(count.div_ceil(5));
    let stride = (count / target).max(1);

    let mut selected: Vec<usize> = Vec::with_capacity(target);
    let mut index = 0;
    while index < count && selected.len() < target {
        if sentences[index].chars().count() > MIN_SUBSTANTIVE_CHARS {
            selected.push(index);
        }
        index += stride;
    }

    // Backfill when stride sampling came up short.
    if selected.len() < target {
        for candidate in 0..count {
            if selected.len() >= target {
                break;
            }
            if !selected.contains(&candidate) {
                selected.push(candidate);
            }
        }
    }

    // The backfill appends in scan order; restore document order.
    selected.sort_unstable();

    let mut summary = String::from(OFFLINE_MARKER);
    for (position, &index) in selected.iter().enumerate() {
        if position > 0 {
            summary.push(' ');
        }
        summary.push_str(&sentences[index]);
    }
    Ok(summary)
}

/// Split on sentence-ending punctuation followed by whitespace and a capital
/// letter. A heuristic boundary, not a grammar.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        current.push(chars[i]);

        if matches!(chars[i], '.' | '!' | '?') {
            let mut next = i + 1;
            while next < chars.len() && chars[next].is_whitespace() {
                next += 1;
            }
            if next > i + 1 && next < chars.len() && chars[next].is_uppercase() {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_owned());
                }
                current.clear();
                i = next - 1;
            }
        }

        i += 1;
    }

    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_owned());
    }

    sentences
}
