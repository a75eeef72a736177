//! The single tokenization pipeline shared by skill extraction, alias
//! indexing, and the hashing embedder.
//!
//! Resumes and job postings must pass through the *same* pipeline, otherwise
//! alias lookups silently stop matching. Anything that tokenizes text in this
//! crate goes through `normalize`.

use std::collections::HashSet;

/// Words dropped from the token stream before matching.
///
/// Kept small: aggressive stop lists eat skill phrases
/// ("Go", "R") or degree keywords. Aliases are normalized with the same
/// list, so "Ruby on Rails" and "ruby rails" still meet in the middle.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "my", "nor", "of", "on", "or",
    "our", "she", "so", "that", "the", "their", "them", "then", "these", "they", "this", "those",
    "to", "was", "we", "were", "will", "with", "you", "your",
];

/// Tokenizer configuration. The stop-word set is replaceable so deployments
/// can tune it without a rebuild (see `EXTRA_STOP_WORDS`).
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    pub stop_words: HashSet<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl NormalizerConfig {
    /// Default stop words plus deployment-specific additions.
    pub fn with_extra_stop_words<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = NormalizerConfig::default();
        config
            .stop_words
            .extend(extra.into_iter().map(|w| w.into().to_lowercase()));
        config
    }
}

/// Lowercases, strips punctuation, collapses whitespace, and drops stop
/// words. Returns tokens in input order.
///
/// Punctuation that is part of a skill token survives:
/// - trailing `+` / `#` stay attached ("c++", "c#", "f#")
/// - `.` and `-` stay when flanked by word characters ("node.js", "ci-cd", "3.5")
pub fn normalize(text: &str, config: &NormalizerConfig) -> Vec<String> {
    let lower = text.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let keep = if c.is_alphanumeric() {
            true
        } else if (c == '+' || c == '#') && !current.is_empty() {
            // Trailing marker characters: "c++", "c#". At token start they
            // are ordinary punctuation ("#hashtag" → "hashtag").
            true
        } else if c == '.' || c == '-' {
            // Intra-word only: "node.js" and "3.5" keep theirs, a sentence
            // period or a list dash does not start or end a token.
            !current.is_empty()
                && chars
                    .get(i + 1)
                    .map(|next| next.is_alphanumeric())
                    .unwrap_or(false)
        } else {
            false
        };

        if keep {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.retain(|t| !config.stop_words.contains(t.as_str()));
    tokens
}

/// Normalizes a phrase into a single lookup key ("Ruby on Rails" → "ruby rails").
/// Returns `None` when nothing survives normalization.
pub fn normalize_key(phrase: &str, config: &NormalizerConfig) -> Option<String> {
    let tokens = normalize(phrase, config);
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
