//! Text cleaning helpers shared by the strategies.

use std::sync::LazyLock;

use regex::Regex;

/// Bracketed sound-effect annotations such as `[Music]` or `[Applause]`.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").expect("valid bracket pattern"));

/// Opening or closing markdown code fence, with an optional language tag.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```[A-Za-z0-9_-]*\s*$").expect("valid fence pattern"));

/// Leading "Transcript:" label, optionally bolded.
static TRANSCRIPT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\*\*)?transcript(ion)?\s*:\s*(\*\*)?").expect("valid label pattern")
});

/// Phrases that mean the model declined instead of transcribing.
pub const REFUSAL_PHRASES: [&str; 6] = [
    "cannot access",
    "unable to",
    "i don't have",
    "i can't access",
    "i do not have access",
    "i'm not able to",
];

/// Remove bracketed annotations.
pub fn strip_bracketed(text: &str) -> String {
    BRACKETED.replace_all(text, " ").into_owned()
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean one caption fragment.
pub fn clean_caption_text(text: &str) -> String {
    collapse_whitespace(&strip_bracketed(text))
}

/// Clean a raw model response into continuous prose.
pub fn clean_ai_transcript(text: &str) -> String {
    let without_fences = CODE_FENCE.replace_all(text, " ");
    let without_label = TRANSCRIPT_LABEL.replace(&without_fences, "");
    // Stray inline fences left after the line-based pass.
    let without_ticks = without_label.replace("```", " ");
    clean_caption_text(&without_ticks)
}

/// True when the response contains a known refusal phrase.
pub fn contains_refusal(text: &str) -> bool {
    let normalized = text.to_lowercase().replace('\u{2019}', "'");
    REFUSAL_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
}

/// Split text into sentences.
///
/// A boundary is `.`, `!` or `?` followed by whitespace. Trailing text
/// without terminal punctuation forms the last sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map(|n| n.is_whitespace()).unwrap_or(false);
        if at_boundary {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
