//! Turns score breakdowns into a fixed-order list of actionable
//! suggestions.
//!
//! Everything here is a pure function of the match outcome. Same inputs,
//! same list, same order:
//! 1. the missing-skills call-out, if any skills are missing;
//! 2. one targeted suggestion per weak dimension, weakest first;
//! 3. one suggestion per failed ATS check, in audit order.

use crate::ats::{AtsResult, AtsRule};
use crate::matching::aggregate::SubScores;
use crate::parsing::ParsedDocument;

use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Sub-scores below this get a targeted suggestion.
    pub weak_threshold: f64,
    /// Cap on skills named in the missing-skills call-out.
    pub max_listed_skills: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        RecommendConfig {
            weak_threshold: 0.6,
            max_listed_skills: 5,
        }
    }
}

/// The four dimensions, in tie-break order for equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Dimension {
    Semantic,
    Skills,
    Experience,
    Education,
}

/// Builds the recommendation list for one evaluated match.
pub fn recommend(
    scores: &SubScores,
    missing_skills: &BTreeSet<String>,
    job: &ParsedDocument,
    ats: &AtsResult,
    config: &RecommendConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_skills.is_empty() {
        recommendations.push(missing_skills_suggestion(missing_skills, config));
    }

    // Weak dimensions, weakest first. A degraded match has no semantic
    // sub-score and gets no semantic suggestion.
    let mut weak: Vec<(f64, Dimension)> = Vec::new();
    if let Some(semantic) = scores.semantic {
        if semantic < config.weak_threshold {
            weak.push((semantic, Dimension::Semantic));
        }
    }
    if scores.skills < config.weak_threshold {
        weak.push((scores.skills, Dimension::Skills));
    }
    if scores.experience < config.weak_threshold {
        weak.push((scores.experience, Dimension::Experience));
    }
    if scores.education < config.weak_threshold {
        weak.push((scores.education, Dimension::Education));
    }
    weak.sort_by(|(score_a, dim_a), (score_b, dim_b)| {
        score_a
            .total_cmp(score_b)
            .then_with(|| dim_a.cmp(dim_b))
    });
    for (_, dimension) in weak {
        recommendations.push(dimension_suggestion(dimension, job));
    }

    for rule in ats.failed_rules() {
        recommendations.push(ats_suggestion(rule).to_string());
    }

    recommendations
}

fn missing_skills_suggestion(missing: &BTreeSet<String>, config: &RecommendConfig) -> String {
    let listed: Vec<&str> = missing
        .iter()
        .take(config.max_listed_skills.max(1))
        .map(|s| s.as_str())
        .collect();
    let overflow = missing.len().saturating_sub(listed.len());

    if overflow > 0 {
        format!(
            "Add the skills the posting asks for but the resume never mentions: {} (and {overflow} more).",
            listed.join(", ")
        )
    } else {
        format!(
            "Add the skills the posting asks for but the resume never mentions: {}.",
            listed.join(", ")
        )
    }
}

fn dimension_suggestion(dimension: Dimension, job: &ParsedDocument) -> String {
    match dimension {
        Dimension::Semantic => {
            "Mirror more of the posting's own wording in your summary and bullet points; \
             the overall language overlap is low."
                .to_string()
        }
        Dimension::Skills => {
            "Deepen coverage of the role's core stack; too few of the required skills appear."
                .to_string()
        }
        Dimension::Experience => match job.experience_years {
            Some(required) => format!(
                "The role asks for {} years of experience; surface projects and roles that \
                 demonstrate comparable depth.",
                format_years(required)
            ),
            None => "Make the length of your relevant experience explicit.".to_string(),
        },
        Dimension::Education => match job.education_level {
            Some(required) => format!(
                "The posting lists a {} requirement; state your highest qualification clearly.",
                required.label()
            ),
            None => "State your highest qualification clearly.".to_string(),
        },
    }
}

fn ats_suggestion(rule: AtsRule) -> &'static str {
    match rule {
        AtsRule::SectionExperience => "Add a clearly labeled Experience section.",
        AtsRule::SectionEducation => "Add a clearly labeled Education section.",
        AtsRule::SectionSkills => "Add a clearly labeled Skills section.",
        AtsRule::ContactInfo => "Include an email address or phone number near the top.",
        AtsRule::MinWordCount => "The resume is too short for parsers to rank; expand it toward 400-800 words.",
        AtsRule::MaxWordCount => "The resume is long enough to get truncated; trim it below the word limit.",
        AtsRule::KeywordDensity => "Work more of the posting's required skills into your bullet points.",
        AtsRule::NoTableArtifacts => "Remove tables and tab-based layout; parsers read plain lines best.",
        AtsRule::StandardBullets => "Replace decorative bullet glyphs with plain dashes.",
    }
}

fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        format!("{years:.1}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::education::EducationLevel;
    use crate::text::sections::ContactInfo;

    fn job(required_years: Option<f64>, education: Option<EducationLevel>) -> ParsedDocument {
        ParsedDocument {
            raw_text: String::new(),
            skills: BTreeSet::new(),
            experience_years: required_years,
            education_level: education,
            seniority: None,
            contact: ContactInfo::default(),
            sections_present: BTreeSet::new(),
            word_count: 0,
        }
    }

    fn clean_ats() -> AtsResult {
        AtsResult {
            passed_checks: vec![],
            failed_checks: vec![],
            score: 100.0,
        }
    }

    fn strong_scores() -> SubScores {
        SubScores {
            semantic: Some(0.9),
            skills: 1.0,
            experience: 1.0,
            education: 1.0,
        }
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_strong_match_yields_no_recommendations() {
        let recs = recommend(
            &strong_scores(),
            &set(&[]),
            &job(None, None),
            &clean_ats(),
            &RecommendConfig::default(),
        );
        assert!(recs.is_empty(), "got {recs:?}");
    }

    #[test]
    fn test_missing_skills_lead_and_are_capped() {
        let missing = set(&["Airflow", "Docker", "Go", "Kafka", "Rust", "Spark", "Terraform"]);
        let recs = recommend(
            &strong_scores(),
            &missing,
            &job(None, None),
            &clean_ats(),
            &RecommendConfig::default(),
        );

        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Airflow, Docker, Go, Kafka, Rust"), "got {}", recs[0]);
        assert!(recs[0].contains("and 2 more"), "got {}", recs[0]);
        assert!(!recs[0].contains("Terraform"));
    }

    #[test]
    fn test_weak_dimensions_sorted_ascending() {
        let scores = SubScores {
            semantic: Some(0.5),
            skills: 0.2,
            experience: 0.4,
            education: 1.0,
        };
        let recs = recommend(
            &scores,
            &set(&["Docker"]),
            &job(Some(5.0), None),
            &clean_ats(),
            &RecommendConfig::default(),
        );

        // Missing skills first, then weak dimensions 0.2 → 0.4 → 0.5.
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("Docker"));
        assert!(recs[1].contains("core stack"), "got {}", recs[1]);
        assert!(recs[2].contains("5 years"), "got {}", recs[2]);
        assert!(recs[3].contains("wording"), "got {}", recs[3]);
    }

    #[test]
    fn test_equal_scores_break_ties_in_fixed_order() {
        let scores = SubScores {
            semantic: Some(0.3),
            skills: 1.0,
            experience: 0.3,
            education: 0.3,
        };
        let recs = recommend(
            &scores,
            &set(&[]),
            &job(Some(4.0), Some(EducationLevel::Master)),
            &clean_ats(),
            &RecommendConfig::default(),
        );

        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("wording"));
        assert!(recs[1].contains("4 years"));
        assert!(recs[2].contains("master's degree"));
    }

    #[test]
    fn test_degraded_match_skips_semantic_suggestion() {
        let scores = SubScores {
            semantic: None,
            skills: 1.0,
            experience: 1.0,
            education: 1.0,
        };
        let recs = recommend(
            &scores,
            &set(&[]),
            &job(None, None),
            &clean_ats(),
            &RecommendConfig::default(),
        );
        assert!(recs.is_empty(), "got {recs:?}");
    }

    #[test]
    fn test_failed_ats_checks_append_in_audit_order() {
        let ats = AtsResult {
            passed_checks: vec![],
            failed_checks: vec![
                "section_skills".to_string(),
                "no_table_artifacts".to_string(),
            ],
            score: 77.8,
        };
        let recs = recommend(
            &strong_scores(),
            &set(&[]),
            &job(None, None),
            &ats,
            &RecommendConfig::default(),
        );

        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("Skills section"));
        assert!(recs[1].contains("tables"));
    }

    #[test]
    fn test_fractional_years_render_with_one_decimal() {
        let scores = SubScores {
            semantic: Some(1.0),
            skills: 1.0,
            experience: 0.1,
            education: 1.0,
        };
        let recs = recommend(
            &scores,
            &set(&[]),
            &job(Some(2.5), None),
            &clean_ats(),
            &RecommendConfig::default(),
        );
        assert!(recs[0].contains("2.5 years"), "got {}", recs[0]);
    }

    #[test]
    fn test_same_inputs_same_list() {
        let scores = SubScores {
            semantic: Some(0.5),
            skills: 0.5,
            experience: 0.5,
            education: 0.5,
        };
        let missing = set(&["Docker", "Kafka"]);
        let job = job(Some(3.0), Some(EducationLevel::Bachelor));
        let ats = AtsResult {
            passed_checks: vec![],
            failed_checks: vec!["contact_info".to_string()],
            score: 88.9,
        };

        let a = recommend(&scores, &missing, &job, &ats, &RecommendConfig::default());
        let b = recommend(&scores, &missing, &job, &ats, &RecommendConfig::default());
        assert_eq!(a, b);
    }
}
