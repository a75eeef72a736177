//! Match engine — the one pipeline behind every scoring endpoint.
//!
//! parse both documents → semantic similarity → sub-scores → weighted
//! aggregate → category → ATS audit → recommendations. Handlers own HTTP
//! concerns; everything about *how a match is computed* lives here.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ats::{AtsChecker, AtsConfig, AtsResult};
use crate::embedding::{semantic_similarity, EmbedError, Embedder};
use crate::matching::aggregate::{
    aggregate, categorize, CategoryThresholds, MatchCategory, MatchWeights, SubScores,
};
use crate::matching::subscores::{education_score, experience_score, skills_score};
use crate::parsing::{DocumentParser, ParsedDocument};
use crate::recommend::{recommend, RecommendConfig};
use crate::taxonomy::SkillTaxonomy;
use crate::text::normalizer::NormalizerConfig;

/// Everything tunable about a match, frozen at startup.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub thresholds: CategoryThresholds,
    /// Education penalty per missing degree level.
    pub education_step: f64,
    pub recommend: RecommendConfig,
    pub ats: AtsConfig,
    pub normalizer: NormalizerConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            weights: MatchWeights::default(),
            thresholds: CategoryThresholds::default(),
            education_step: 0.3,
            recommend: RecommendConfig::default(),
            ats: AtsConfig::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("semantic similarity unavailable: {0}")]
    Embedding(#[from] EmbedError),
}

/// One evaluated resume-to-posting match, ready to serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub sub_scores: SubScores,
    /// The weights actually applied; differs from configuration only on a
    /// degraded match.
    pub weights_used: MatchWeights,
    pub final_score: f64,
    pub category: MatchCategory,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    /// True when the embedding backend failed and the caller opted into
    /// scoring without the semantic dimension.
    pub semantic_unavailable: bool,
    pub ats: AtsResult,
    pub recommendations: Vec<String>,
}

/// One entry of a ranked batch: the posting's position in the request plus
/// its full result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub job_index: usize,
    pub result: MatchResult,
}

pub struct MatchEngine {
    parser: DocumentParser,
    embedder: Arc<dyn Embedder>,
    ats: AtsChecker,
    config: MatchConfig,
}

impl MatchEngine {
    pub fn new(
        taxonomy: Arc<SkillTaxonomy>,
        embedder: Arc<dyn Embedder>,
        config: MatchConfig,
    ) -> Self {
        MatchEngine {
            parser: DocumentParser::new(taxonomy, config.normalizer.clone()),
            embedder,
            ats: AtsChecker::new(config.ats.clone()),
            config,
        }
    }

    pub fn parser(&self) -> &DocumentParser {
        &self.parser
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Scores one resume against one posting.
    ///
    /// `allow_semantic_fallback` controls what an embedding failure means:
    /// opted in, the match degrades (semantic weight redistributed, result
    /// flagged); opted out, the failure propagates.
    pub async fn evaluate(
        &self,
        resume_text: &str,
        job_text: &str,
        allow_semantic_fallback: bool,
    ) -> Result<MatchResult, MatchError> {
        let resume = self.parser.parse_resume(resume_text);
        let job = self.parser.parse_job(job_text);
        self.evaluate_parsed(&resume, &job, allow_semantic_fallback).await
    }

    /// Scores one resume against many postings, parsing the resume once.
    /// Results come back sorted by final score, best first; ties keep
    /// request order.
    pub async fn evaluate_batch(
        &self,
        resume_text: &str,
        job_texts: &[String],
        allow_semantic_fallback: bool,
    ) -> Result<Vec<RankedMatch>, MatchError> {
        let resume = self.parser.parse_resume(resume_text);

        let mut ranked = Vec::with_capacity(job_texts.len());
        for (job_index, job_text) in job_texts.iter().enumerate() {
            let job = self.parser.parse_job(job_text);
            let result = self
                .evaluate_parsed(&resume, &job, allow_semantic_fallback)
                .await?;
            ranked.push(RankedMatch { job_index, result });
        }

        ranked.sort_by(|a, b| {
            b.result
                .final_score
                .total_cmp(&a.result.final_score)
                .then_with(|| a.job_index.cmp(&b.job_index))
        });
        Ok(ranked)
    }

    /// Audits a resume, optionally against a posting for the density rule.
    pub fn audit(&self, resume_text: &str, job_text: Option<&str>) -> AtsResult {
        let resume = self.parser.parse_resume(resume_text);
        let job = job_text.map(|text| self.parser.parse_job(text));
        self.ats.check(&resume, job.as_ref())
    }

    async fn evaluate_parsed(
        &self,
        resume: &ParsedDocument,
        job: &ParsedDocument,
        allow_semantic_fallback: bool,
    ) -> Result<MatchResult, MatchError> {
        let (semantic, weights_used) = match semantic_similarity(
            self.embedder.as_ref(),
            &resume.raw_text,
            &job.raw_text,
        )
        .await
        {
            Ok(similarity) => (Some(similarity), self.config.weights),
            // Degraded: redistribute the semantic weight. A configuration
            // that puts everything on semantic has nothing left to score
            // with, so the embedding failure propagates even with fallback
            // allowed.
            Err(err) if allow_semantic_fallback => {
                match self.config.weights.without_semantic() {
                    Some(weights) => {
                        warn!("Embedding backend failed, degrading match: {err}");
                        (None, weights)
                    }
                    None => return Err(err.into()),
                }
            }
            Err(err) => return Err(err.into()),
        };

        let skills = skills_score(&resume.skills, &job.skills);
        let sub_scores = SubScores {
            semantic,
            skills: skills.score,
            experience: experience_score(resume.experience_years, job.experience_years),
            education: education_score(
                resume.education_level,
                job.education_level,
                self.config.education_step,
            ),
        };

        let final_score = aggregate(&sub_scores, &weights_used);
        let category = categorize(final_score, &self.config.thresholds);
        let ats = self.ats.check(resume, Some(job));
        let recommendations = recommend(
            &sub_scores,
            &skills.missing,
            job,
            &ats,
            &self.config.recommend,
        );

        debug!(
            "Match scored: final={final_score:.1}, category={}, matched={}, missing={}",
            category.label(),
            skills.matched.len(),
            skills.missing.len()
        );

        Ok(MatchResult {
            sub_scores,
            weights_used,
            final_score,
            category,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            semantic_unavailable: semantic.is_none(),
            ats,
            recommendations,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
