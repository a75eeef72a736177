//! Token-window skill matching against the taxonomy index.
//!
//! The scan is greedy and longest-match-first: at each position it probes
//! the widest window the taxonomy could possibly match, shrinking one token
//! at a time, and jumps past whatever it consumed. "machine learning" is
//! one hit, never "machine learning" plus a stray single-token match inside
//! it.

use std::collections::BTreeSet;

use crate::taxonomy::SkillTaxonomy;

impl SkillTaxonomy {
    /// Canonical skill names found in a normalized token stream.
    ///
    /// Output is a set: how often a skill appears does not matter, only
    /// whether it does. `BTreeSet` keeps iteration (and serialization)
    /// deterministic.
    pub fn extract(&self, tokens: &[String]) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut i = 0;

        while i < tokens.len() {
            let widest = self.max_window().min(tokens.len() - i);
            let mut matched = None;

            for width in (1..=widest).rev() {
                let key = tokens[i..i + width].join(" ");
                if let Some(name) = self.resolve(&key) {
                    matched = Some((name.to_string(), width));
                    break;
                }
            }

            match matched {
                Some((name, width)) => {
                    found.insert(name);
                    i += width;
                }
                None => i += 1,
            }
        }

        found
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::SkillRecord;
    use crate::text::normalizer::{normalize, NormalizerConfig};

    fn record(name: &str, aliases: &[&str]) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            category: "test".to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::from_records(
            vec![
                record("Python", &[]),
                record("Machine Learning", &["ml"]),
                record("Ruby on Rails", &["rails"]),
                record("Ruby", &[]),
                record("C++", &["cpp"]),
                record("Amazon Web Services", &["aws"]),
            ],
            &NormalizerConfig::default(),
        )
        .expect("test taxonomy")
    }

    fn extract(text: &str) -> BTreeSet<String> {
        let tokens = normalize(text, &NormalizerConfig::default());
        taxonomy().extract(&tokens)
    }

    #[test]
    fn test_single_token_match() {
        let skills = extract("Fluent in Python and Excel.");
        assert!(skills.contains("Python"));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_multi_word_skill_matches_as_one() {
        let skills = extract("applied machine learning daily");
        assert!(skills.contains("Machine Learning"));
    }

    #[test]
    fn test_longest_match_wins_over_prefix() {
        // "Ruby on Rails" must not additionally report bare "Ruby".
        let skills = extract("shipped a Ruby on Rails app");
        assert!(skills.contains("Ruby on Rails"));
        assert!(
            !skills.contains("Ruby"),
            "consumed tokens must not rematch: {skills:?}"
        );
    }

    #[test]
    fn test_bare_prefix_still_matches_alone() {
        let skills = extract("wrote Ruby scripts");
        assert!(skills.contains("Ruby"));
        assert!(!skills.contains("Ruby on Rails"));
    }

    #[test]
    fn test_alias_resolves_to_canonical_name() {
        let skills = extract("5 years of ML and cpp");
        assert!(skills.contains("Machine Learning"));
        assert!(skills.contains("C++"));
        assert!(!skills.contains("ml"), "aliases never surface in output");
    }

    #[test]
    fn test_repeated_mentions_collapse() {
        let skills = extract("Python, Python, and more Python");
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let skills = extract("PYTHON; c++!");
        assert!(skills.contains("Python"));
        assert!(skills.contains("C++"));
    }

    #[test]
    fn test_three_token_window() {
        let skills = extract("deployed on Amazon Web Services infrastructure");
        assert!(skills.contains("Amazon Web Services"));
    }

    #[test]
    fn test_no_matches_yields_empty_set() {
        assert!(extract("nothing relevant here").is_empty());
    }

    #[test]
    fn test_empty_tokens_yield_empty_set() {
        assert!(taxonomy().extract(&[]).is_empty());
    }
}
