//! ATS audit — a fixed battery of independent pass/fail compatibility
//! checks.
//!
//! Every enabled rule runs every time; nothing short-circuits. The score is
//! simply the passed fraction of enabled rules, so disabling a rule changes
//! the denominator, never the other rules' outcomes.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::parsing::ParsedDocument;
use crate::text::sections::Section;

/// The audit battery, in evaluation (and reporting) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsRule {
    SectionExperience,
    SectionEducation,
    SectionSkills,
    ContactInfo,
    MinWordCount,
    MaxWordCount,
    KeywordDensity,
    NoTableArtifacts,
    StandardBullets,
}

impl AtsRule {
    pub const ALL: [AtsRule; 9] = [
        AtsRule::SectionExperience,
        AtsRule::SectionEducation,
        AtsRule::SectionSkills,
        AtsRule::ContactInfo,
        AtsRule::MinWordCount,
        AtsRule::MaxWordCount,
        AtsRule::KeywordDensity,
        AtsRule::NoTableArtifacts,
        AtsRule::StandardBullets,
    ];

    /// Stable wire name, used in reports and in the disable list.
    pub fn name(self) -> &'static str {
        match self {
            AtsRule::SectionExperience => "section_experience",
            AtsRule::SectionEducation => "section_education",
            AtsRule::SectionSkills => "section_skills",
            AtsRule::ContactInfo => "contact_info",
            AtsRule::MinWordCount => "min_word_count",
            AtsRule::MaxWordCount => "max_word_count",
            AtsRule::KeywordDensity => "keyword_density",
            AtsRule::NoTableArtifacts => "no_table_artifacts",
            AtsRule::StandardBullets => "standard_bullets",
        }
    }

    pub fn from_name(name: &str) -> Option<AtsRule> {
        AtsRule::ALL.iter().copied().find(|rule| rule.name() == name)
    }
}

/// Bullet glyphs ATS parsers are known to choke on.
const NONSTANDARD_BULLETS: &[char] = &['★', '●', '◆', '▪', '✓', '→'];

/// Tunable bounds for the audit. Rule identity is fixed; only thresholds
/// and the enabled set move.
#[derive(Debug, Clone)]
pub struct AtsConfig {
    pub min_word_count: usize,
    pub max_word_count: usize,
    /// Minimum fraction of the posting's required skills the resume must
    /// mention for the density check.
    pub min_keyword_density: f64,
    pub disabled_rules: HashSet<AtsRule>,
}

impl Default for AtsConfig {
    fn default() -> Self {
        AtsConfig {
            min_word_count: 200,
            max_word_count: 1000,
            min_keyword_density: 0.3,
            disabled_rules: HashSet::new(),
        }
    }
}

/// Audit outcome: which rules passed, which failed, and the passed
/// fraction as a 0-100 score. Both lists follow evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsResult {
    pub passed_checks: Vec<String>,
    pub failed_checks: Vec<String>,
    pub score: f64,
}

impl AtsResult {
    pub fn failed_rules(&self) -> Vec<AtsRule> {
        self.failed_checks
            .iter()
            .filter_map(|name| AtsRule::from_name(name))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AtsChecker {
    config: AtsConfig,
}

impl AtsChecker {
    pub fn new(config: AtsConfig) -> Self {
        AtsChecker { config }
    }

    /// Runs every enabled rule against a parsed resume. The posting is
    /// optional: without one, the keyword-density rule passes vacuously.
    pub fn check(&self, resume: &ParsedDocument, job: Option<&ParsedDocument>) -> AtsResult {
        let mut passed_checks = Vec::new();
        let mut failed_checks = Vec::new();

        for rule in AtsRule::ALL {
            if self.config.disabled_rules.contains(&rule) {
                continue;
            }
            if self.evaluate(rule, resume, job) {
                passed_checks.push(rule.name().to_string());
            } else {
                failed_checks.push(rule.name().to_string());
            }
        }

        let enabled = passed_checks.len() + failed_checks.len();
        let score = if enabled == 0 {
            100.0
        } else {
            passed_checks.len() as f64 / enabled as f64 * 100.0
        };

        AtsResult {
            passed_checks,
            failed_checks,
            score,
        }
    }

    fn evaluate(&self, rule: AtsRule, resume: &ParsedDocument, job: Option<&ParsedDocument>) -> bool {
        match rule {
            AtsRule::SectionExperience => resume.sections_present.contains(&Section::Experience),
            AtsRule::SectionEducation => resume.sections_present.contains(&Section::Education),
            AtsRule::SectionSkills => resume.sections_present.contains(&Section::Skills),
            AtsRule::ContactInfo => !resume.contact.is_empty(),
            AtsRule::MinWordCount => resume.word_count >= self.config.min_word_count,
            AtsRule::MaxWordCount => resume.word_count <= self.config.max_word_count,
            AtsRule::KeywordDensity => match job {
                None => true,
                Some(job) => keyword_density(&resume.skills, &job.skills)
                    .map(|density| density >= self.config.min_keyword_density)
                    .unwrap_or(true),
            },
            AtsRule::NoTableArtifacts => {
                !resume.raw_text.contains('\t') && !resume.raw_text.contains('|')
            }
            AtsRule::StandardBullets => !resume
                .raw_text
                .chars()
                .any(|c| NONSTANDARD_BULLETS.contains(&c)),
        }
    }
}

/// Fraction of the posting's required skills the resume mentions. `None`
/// when the posting requires nothing (a vacuous pass, not a zero).
fn keyword_density(resume_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> Option<f64> {
    if job_skills.is_empty() {
        return None;
    }
    let matched = job_skills.intersection(resume_skills).count();
    Some(matched as f64 / job_skills.len() as f64)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
