//! The curated catalog of recognizable skills.
//!
//! Loaded once at startup from a JSON file and shared behind an `Arc`.
//! A malformed or internally inconsistent taxonomy is a startup failure,
//! never a silent correction: a taxonomy that drops records would make
//! every downstream score quietly wrong.

pub mod extractor;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::normalizer::{normalize_key, NormalizerConfig};

/// One catalog entry as it appears in the taxonomy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Canonical display name. Reported verbatim in match output.
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("taxonomy file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("taxonomy contains no skill records")]
    Empty,

    #[error("duplicate canonical skill name '{0}'")]
    DuplicateName(String),

    #[error("alias '{alias}' for '{skill}' normalizes to nothing and can never match")]
    UnmatchableAlias { alias: String, skill: String },

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },
}

/// The loaded catalog plus a normalized-phrase lookup index.
///
/// Keys in `index` are normalized token phrases ("ruby rails"), values are
/// indices into `records`. Canonical names and aliases share one namespace,
/// so every surface form resolves to exactly one canonical skill.
#[derive(Debug)]
pub struct SkillTaxonomy {
    records: Vec<SkillRecord>,
    index: HashMap<String, usize>,
    /// Longest key in tokens. Bounds the extractor's match window.
    max_window: usize,
}

impl SkillTaxonomy {
    /// Reads and validates a taxonomy file.
    pub fn load(path: &Path, normalizer: &NormalizerConfig) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SkillRecord> =
            serde_json::from_str(&raw).map_err(|source| TaxonomyError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_records(records, normalizer)
    }

    /// Builds the lookup index, rejecting empty, duplicate, or conflicting
    /// entries.
    pub fn from_records(
        records: Vec<SkillRecord>,
        normalizer: &NormalizerConfig,
    ) -> Result<Self, TaxonomyError> {
        if records.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut seen_names = HashSet::new();
        for record in &records {
            if !seen_names.insert(record.name.to_lowercase()) {
                return Err(TaxonomyError::DuplicateName(record.name.clone()));
            }
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut max_window = 1;

        for (i, record) in records.iter().enumerate() {
            let surface_forms =
                std::iter::once(&record.name).chain(record.aliases.iter());

            for phrase in surface_forms {
                let key = normalize_key(phrase, normalizer).ok_or_else(|| {
                    TaxonomyError::UnmatchableAlias {
                        alias: phrase.clone(),
                        skill: record.name.clone(),
                    }
                })?;
                max_window = max_window.max(key.split(' ').count());

                match index.get(&key) {
                    None => {
                        index.insert(key, i);
                    }
                    // A record may list its own name among its aliases.
                    Some(&owner) if owner == i => {}
                    Some(&owner) => {
                        return Err(TaxonomyError::AliasConflict {
                            alias: key,
                            first: records[owner].name.clone(),
                            second: record.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(SkillTaxonomy {
            records,
            index,
            max_window,
        })
    }

    /// Resolves a normalized phrase to its canonical skill name.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.records[i].name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
