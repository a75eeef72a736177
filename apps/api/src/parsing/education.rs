//! Education level detection.
//!
//! Degrees are ranked on a single ordinal ladder so the scorer can compare
//! "what the resume shows" against "what the posting asks for" as a plain
//! integer gap. Detection reports the *highest* level mentioned anywhere in
//! the document.

use serde::{Deserialize, Serialize};

/// Degree ladder, lowest to highest. `None` is an explicit rung (ordinal 0)
/// so scoring never special-cases a missing degree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    None,
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            EducationLevel::None => 0,
            EducationLevel::HighSchool => 1,
            EducationLevel::Associate => 2,
            EducationLevel::Bachelor => 3,
            EducationLevel::Master => 4,
            EducationLevel::Doctorate => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::None => "no formal degree",
            EducationLevel::HighSchool => "high school",
            EducationLevel::Associate => "associate degree",
            EducationLevel::Bachelor => "bachelor's degree",
            EducationLevel::Master => "master's degree",
            EducationLevel::Doctorate => "doctorate",
        }
    }
}

/// Degree keywords in normalized-token form. Multi-token phrases are matched
/// with the same window scan the skill extractor uses.
///
/// Bare "ms", "ma", and "be" are absent: as standalone tokens they collide
/// with ordinary prose ("MS Office", "Boston, MA"). The dotted forms survive
/// normalization and carry the signal instead.
const DEGREE_KEYWORDS: &[(&str, EducationLevel)] = &[
    ("phd", EducationLevel::Doctorate),
    ("ph.d", EducationLevel::Doctorate),
    ("doctorate", EducationLevel::Doctorate),
    ("doctoral", EducationLevel::Doctorate),
    ("master", EducationLevel::Master),
    ("masters", EducationLevel::Master),
    ("msc", EducationLevel::Master),
    ("m.s", EducationLevel::Master),
    ("m.sc", EducationLevel::Master),
    ("m.a", EducationLevel::Master),
    ("mba", EducationLevel::Master),
    ("m.eng", EducationLevel::Master),
    ("mtech", EducationLevel::Master),
    ("m.tech", EducationLevel::Master),
    ("bachelor", EducationLevel::Bachelor),
    ("bachelors", EducationLevel::Bachelor),
    ("bs", EducationLevel::Bachelor),
    ("ba", EducationLevel::Bachelor),
    ("bsc", EducationLevel::Bachelor),
    ("b.s", EducationLevel::Bachelor),
    ("b.a", EducationLevel::Bachelor),
    ("b.sc", EducationLevel::Bachelor),
    ("b.e", EducationLevel::Bachelor),
    ("btech", EducationLevel::Bachelor),
    ("b.tech", EducationLevel::Bachelor),
    ("undergraduate", EducationLevel::Bachelor),
    ("associate", EducationLevel::Associate),
    ("associates", EducationLevel::Associate),
    ("a.s", EducationLevel::Associate),
    ("a.a", EducationLevel::Associate),
    ("high school", EducationLevel::HighSchool),
    ("secondary school", EducationLevel::HighSchool),
    ("ged", EducationLevel::HighSchool),
    ("diploma", EducationLevel::HighSchool),
];

/// Highest degree level mentioned in a normalized token stream, or `None`
/// when no degree keyword appears at all.
pub fn detect_education_level(tokens: &[String]) -> Option<EducationLevel> {
    let mut highest: Option<EducationLevel> = None;

    for i in 0..tokens.len() {
        // Two-token phrases first ("high school"), then single tokens.
        for width in (1..=2usize).rev() {
            if i + width > tokens.len() {
                continue;
            }
            let key = tokens[i..i + width].join(" ");
            if let Some(&(_, level)) = DEGREE_KEYWORDS.iter().find(|(kw, _)| *kw == key) {
                highest = Some(highest.map_or(level, |h| h.max(level)));
                break;
            }
        }
    }

    highest
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::{normalize, NormalizerConfig};

    fn detect(text: &str) -> Option<EducationLevel> {
        let tokens = normalize(text, &NormalizerConfig::default());
        detect_education_level(&tokens)
    }

    #[test]
    fn test_ordinals_ascend() {
        assert!(EducationLevel::None < EducationLevel::HighSchool);
        assert!(EducationLevel::HighSchool < EducationLevel::Associate);
        assert!(EducationLevel::Associate < EducationLevel::Bachelor);
        assert!(EducationLevel::Bachelor < EducationLevel::Master);
        assert!(EducationLevel::Master < EducationLevel::Doctorate);
        assert_eq!(EducationLevel::None.ordinal(), 0);
        assert_eq!(EducationLevel::Doctorate.ordinal(), 5);
    }

    #[test]
    fn test_detects_common_degree_spellings() {
        assert_eq!(detect("PhD in Physics"), Some(EducationLevel::Doctorate));
        assert_eq!(detect("Ph.D. candidate"), Some(EducationLevel::Doctorate));
        assert_eq!(
            detect("Master of Science in CS"),
            Some(EducationLevel::Master)
        );
        assert_eq!(detect("MBA, 2018"), Some(EducationLevel::Master));
        assert_eq!(
            detect("B.S. Computer Science"),
            Some(EducationLevel::Bachelor)
        );
        assert_eq!(
            detect("Bachelor's degree required"),
            Some(EducationLevel::Bachelor)
        );
        assert_eq!(
            detect("Associate degree in nursing"),
            Some(EducationLevel::Associate)
        );
        assert_eq!(
            detect("High school diploma"),
            Some(EducationLevel::HighSchool)
        );
    }

    #[test]
    fn test_highest_level_wins() {
        assert_eq!(
            detect("B.S. 2012, M.S. 2014, PhD 2019"),
            Some(EducationLevel::Doctorate)
        );
    }

    #[test]
    fn test_no_degree_mentions() {
        assert_eq!(detect("ten years writing software"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_prose_abbreviations_do_not_trigger() {
        // "MS Office" and place names must not read as degrees.
        assert_eq!(detect("Proficient in MS Office"), None);
        assert_eq!(detect("Based in Boston, MA"), None);
    }
}
