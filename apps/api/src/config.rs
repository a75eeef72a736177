use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::ats::{AtsConfig, AtsRule};
use crate::embedding::hashing::DEFAULT_DIMENSIONS;
use crate::embedding::http::DEFAULT_TIMEOUT_SECS;
use crate::matching::aggregate::{CategoryThresholds, MatchWeights, WEIGHT_SUM_TOLERANCE};
use crate::matching::engine::MatchConfig;
use crate::recommend::RecommendConfig;
use crate::text::normalizer::NormalizerConfig;

/// A configuration the service must refuse to start with. Every variant is
/// a value that would make scores silently wrong, not merely unusual.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("match weights must be non-negative")]
    NegativeWeight,

    #[error("match weights must sum to 1.0 within {tolerance} (got {sum})")]
    WeightSum { sum: f64, tolerance: f64 },

    #[error(
        "category thresholds must strictly descend: excellent > good > fair \
         (got {excellent}, {good}, {fair})"
    )]
    ThresholdOrder {
        excellent: f64,
        good: f64,
        fair: f64,
    },

    #[error("EDUCATION_STEP must be within (0, 1] (got {0})")]
    EducationStep(f64),

    #[error("WEAK_SUBSCORE_THRESHOLD must be within [0, 1] (got {0})")]
    WeakThreshold(f64),

    #[error("ATS_MIN_KEYWORD_DENSITY must be within [0, 1] (got {0})")]
    KeywordDensity(f64),

    #[error("ATS word-count bounds are inverted ({min} > {max})")]
    WordCountBounds { min: usize, max: usize },

    #[error("unknown ATS rule '{0}' in ATS_DISABLED_RULES")]
    UnknownAtsRule(String),

    #[error("EMBEDDER_BACKEND must be 'hashing' or 'http' (got '{0}')")]
    UnknownBackend(String),

    #[error("EMBEDDER_ENDPOINT is required when EMBEDDER_BACKEND=http")]
    MissingEndpoint,
}

/// Which embedding backend to construct at startup.
#[derive(Debug, Clone)]
pub enum EmbedderConfig {
    Hashing {
        dimensions: usize,
    },
    Http {
        endpoint: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
    },
}

/// Application configuration loaded from environment variables.
/// Everything has a default except what the chosen backend requires.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub taxonomy_path: PathBuf,
    pub embedder: EmbedderConfig,
    pub matching: MatchConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let matching = MatchConfig {
            weights: MatchWeights {
                semantic: parse_env("MATCH_WEIGHT_SEMANTIC", 0.40)?,
                skills: parse_env("MATCH_WEIGHT_SKILLS", 0.30)?,
                experience: parse_env("MATCH_WEIGHT_EXPERIENCE", 0.15)?,
                education: parse_env("MATCH_WEIGHT_EDUCATION", 0.15)?,
            },
            thresholds: CategoryThresholds {
                excellent: parse_env("MATCH_THRESHOLD_EXCELLENT", 85.0)?,
                good: parse_env("MATCH_THRESHOLD_GOOD", 70.0)?,
                fair: parse_env("MATCH_THRESHOLD_FAIR", 50.0)?,
            },
            education_step: parse_env("EDUCATION_STEP", 0.3)?,
            recommend: RecommendConfig {
                weak_threshold: parse_env("WEAK_SUBSCORE_THRESHOLD", 0.6)?,
                ..RecommendConfig::default()
            },
            ats: AtsConfig {
                min_word_count: parse_env("ATS_MIN_WORD_COUNT", 200usize)?,
                max_word_count: parse_env("ATS_MAX_WORD_COUNT", 1000usize)?,
                min_keyword_density: parse_env("ATS_MIN_KEYWORD_DENSITY", 0.3)?,
                disabled_rules: parse_disabled_rules(&env_or("ATS_DISABLED_RULES", ""))?,
            },
            normalizer: NormalizerConfig::with_extra_stop_words(
                split_list(&env_or("EXTRA_STOP_WORDS", "")),
            ),
        };
        validate_matching(&matching)?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            taxonomy_path: PathBuf::from(env_or(
                "TAXONOMY_PATH",
                "apps/api/data/skill_taxonomy.json",
            )),
            embedder: embedder_from_env()?,
            matching,
        })
    }
}

fn embedder_from_env() -> Result<EmbedderConfig> {
    let backend = env_or("EMBEDDER_BACKEND", "hashing");
    match backend.as_str() {
        "hashing" => Ok(EmbedderConfig::Hashing {
            dimensions: parse_env("EMBEDDER_DIMENSIONS", DEFAULT_DIMENSIONS)?,
        }),
        "http" => {
            let endpoint = std::env::var("EMBEDDER_ENDPOINT")
                .map_err(|_| ConfigError::MissingEndpoint)?;
            Ok(EmbedderConfig::Http {
                endpoint,
                model: env_or("EMBEDDER_MODEL", "text-embedding-3-small"),
                api_key: std::env::var("EMBEDDER_API_KEY").ok(),
                timeout: Duration::from_secs(parse_env(
                    "EMBEDDER_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
            })
        }
        other => Err(ConfigError::UnknownBackend(other.to_string()).into()),
    }
}

/// Cross-field checks a single `parse` cannot express. Called once at
/// startup; a failure here aborts boot.
pub fn validate_matching(config: &MatchConfig) -> Result<(), ConfigError> {
    let weights = &config.weights;
    if weights.semantic < 0.0
        || weights.skills < 0.0
        || weights.experience < 0.0
        || weights.education < 0.0
    {
        return Err(ConfigError::NegativeWeight);
    }
    // Negatives were rejected above, so an invalid set here is a sum problem.
    if !weights.is_valid() {
        return Err(ConfigError::WeightSum {
            sum: weights.sum(),
            tolerance: WEIGHT_SUM_TOLERANCE,
        });
    }

    let thresholds = &config.thresholds;
    if !thresholds.is_monotonic() {
        return Err(ConfigError::ThresholdOrder {
            excellent: thresholds.excellent,
            good: thresholds.good,
            fair: thresholds.fair,
        });
    }

    if !(config.education_step > 0.0 && config.education_step <= 1.0) {
        return Err(ConfigError::EducationStep(config.education_step));
    }
    if !(0.0..=1.0).contains(&config.recommend.weak_threshold) {
        return Err(ConfigError::WeakThreshold(config.recommend.weak_threshold));
    }
    if !(0.0..=1.0).contains(&config.ats.min_keyword_density) {
        return Err(ConfigError::KeywordDensity(config.ats.min_keyword_density));
    }
    if config.ats.min_word_count > config.ats.max_word_count {
        return Err(ConfigError::WordCountBounds {
            min: config.ats.min_word_count,
            max: config.ats.max_word_count,
        });
    }

    Ok(())
}

/// Parses a comma-separated disable list. An unrecognized name is fatal: a
/// typo must not leave a rule silently enabled.
pub fn parse_disabled_rules(raw: &str) -> Result<HashSet<AtsRule>, ConfigError> {
    let mut rules = HashSet::new();
    for name in split_list(raw) {
        match AtsRule::from_name(&name) {
            Some(rule) => {
                rules.insert(rule);
            }
            None => return Err(ConfigError::UnknownAtsRule(name)),
        }
    }
    Ok(rules)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
