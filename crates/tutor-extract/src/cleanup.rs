//! Whitespace and encoding normalization applied after page extraction.

use std::sync::LazyLock;

use regex::Regex;

static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x20-\x7E\n]").expect("valid regex"));
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
static SENTENCE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?]) *\n+").expect("valid regex"));
static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static SPACES_AROUND_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").expect("valid regex"));

/// Normalize extracted text for downstream prompting.
///
/// Strips characters outside printable ASCII (newlines survive), collapses
/// whitespace runs, turns sentence-ending line breaks into paragraph breaks,
/// and caps blank-line runs at one.
#[must_use]
pub fn clean(raw: &str) -> String {
    let text = NON_PRINTABLE.replace_all(raw, "");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = SPACES_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = SENTENCE_LINE_BREAK.replace_all(&text, "$1\n\n");
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    text.trim().to_owned()
}
