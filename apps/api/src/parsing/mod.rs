//! Turns raw resume or posting text into the one structured
//! `ParsedDocument` shape both sides of a match share.
//!
//! Parsing never fails. Thin or garbled input degrades the extracted
//! signals (and therefore the score), but it is the scorer's job to reflect
//! that, not the parser's job to reject it.

pub mod education;
pub mod experience;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::parsing::education::{detect_education_level, EducationLevel};
use crate::parsing::experience::{
    detect_seniority, job_required_years, resume_experience_years, Seniority,
};
use crate::taxonomy::SkillTaxonomy;
use crate::text::normalizer::{normalize, NormalizerConfig};
use crate::text::sections::{detect_sections, extract_contact, ContactInfo, Section};

/// Everything the matcher needs to know about one document. The same shape
/// serves resumes and postings; fields that only make sense for one side
/// (contact info, say) stay at their defaults on the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub raw_text: String,
    /// Canonical taxonomy names, alphabetical.
    pub skills: BTreeSet<String>,
    pub experience_years: Option<f64>,
    pub education_level: Option<EducationLevel>,
    pub seniority: Option<Seniority>,
    pub contact: ContactInfo,
    pub sections_present: BTreeSet<Section>,
    /// Whitespace-delimited words in the raw text, pre-normalization.
    pub word_count: usize,
}

/// Stateless parser over a shared taxonomy. One instance serves every
/// request.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    taxonomy: Arc<SkillTaxonomy>,
    normalizer: NormalizerConfig,
}

impl DocumentParser {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, normalizer: NormalizerConfig) -> Self {
        DocumentParser {
            taxonomy,
            normalizer,
        }
    }

    /// Parses resume text. Experience takes the strongest supportable
    /// figure; contact details feed the ATS audit.
    pub fn parse_resume(&self, text: &str) -> ParsedDocument {
        let tokens = normalize(text, &self.normalizer);

        ParsedDocument {
            skills: self.taxonomy.extract(&tokens),
            experience_years: resume_experience_years(text),
            education_level: detect_education_level(&tokens),
            seniority: detect_seniority(text),
            contact: extract_contact(text),
            sections_present: detect_sections(text),
            word_count: text.split_whitespace().count(),
            raw_text: text.to_string(),
        }
    }

    /// Parses posting text. Experience is the stated requirement, falling
    /// back to seniority-implied years; contact stays empty.
    pub fn parse_job(&self, text: &str) -> ParsedDocument {
        let tokens = normalize(text, &self.normalizer);

        ParsedDocument {
            skills: self.taxonomy.extract(&tokens),
            experience_years: job_required_years(text),
            education_level: detect_education_level(&tokens),
            seniority: detect_seniority(text),
            contact: ContactInfo::default(),
            sections_present: detect_sections(text),
            word_count: text.split_whitespace().count(),
            raw_text: text.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
