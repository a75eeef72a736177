//! Years-of-experience figures and seniority cues.
//!
//! Two sources feed the years figure:
//! 1. explicit mentions ("7+ years", "3.5 yrs"), and
//! 2. role duration ranges inside the Experience section ("2019 - 2023",
//!    "2020 to present").
//!
//! Resumes take the *maximum* candidate (a resume states its strongest
//! figure); job postings take the *first* (the stated requirement). Postings
//! with no figure at all fall back to the years their seniority wording
//! implies.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::sections::{section_slice, Section};

/// "5 years", "3.5 yrs", "10+ years". Capped at two digits so calendar
/// years never read as durations.
static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?\.?)\b").expect("valid years regex")
});

/// "5-7 years", "3 to 5 yrs". The lower bound is the requirement.
static YEARS_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*(?:-|–|to)\s*(\d{1,2}(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?\.?)\b")
        .expect("valid years span regex")
});

/// "2019 - 2023", "2020 to Present". Open-ended ranges close at the
/// current year.
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to|until)\s*((?:19|20)\d{2}|present|current|now)\b")
        .expect("valid date range regex")
});

/// Longest plausible single tenure, in years. Ranges beyond this are typos.
const MAX_TENURE_YEARS: f64 = 60.0;

/// All explicit years-of-experience figures, in text order.
///
/// Span matches ("5-7 years") contribute their lower bound once; the plain
/// pattern skips anything a span already covered so "7 years" inside
/// "5-7 years" is not double-counted.
pub fn year_mentions(text: &str) -> Vec<f64> {
    let mut candidates: Vec<(usize, f64)> = Vec::new();
    let mut covered: Vec<(usize, usize)> = Vec::new();

    for caps in YEARS_SPAN_RE.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if let (Ok(lo), Ok(hi)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            candidates.push((whole.start(), lo.min(hi)));
            covered.push((whole.start(), whole.end()));
        }
    }

    for caps in YEARS_RE.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if covered
            .iter()
            .any(|&(s, e)| whole.start() < e && whole.end() > s)
        {
            continue;
        }
        if let Ok(value) = caps[1].parse::<f64>() {
            candidates.push((whole.start(), value));
        }
    }

    candidates.sort_by_key(|&(pos, _)| pos);
    candidates.into_iter().map(|(_, value)| value).collect()
}

/// Tenure lengths from date ranges in the Experience section, in years.
/// Returns nothing when the document has no recognizable Experience heading.
pub fn tenure_durations(text: &str, current_year: i32) -> Vec<f64> {
    let body = match section_slice(text, Section::Experience) {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut durations = Vec::new();
    for caps in DATE_RANGE_RE.captures_iter(&body) {
        let start: i32 = match caps[1].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let end: i32 = match caps[2].to_lowercase().as_str() {
            "present" | "current" | "now" => current_year,
            literal => match literal.parse() {
                Ok(y) => y,
                Err(_) => continue,
            },
        };

        let span = f64::from(end - start);
        if span >= 0.0 && span <= MAX_TENURE_YEARS {
            durations.push(span);
        }
    }
    durations
}

/// Resume policy: the largest figure the document supports, explicit
/// mentions and tenure ranges combined.
pub fn resume_experience_years(text: &str) -> Option<f64> {
    let mut candidates = year_mentions(text);
    candidates.extend(tenure_durations(text, Utc::now().year()));
    candidates.into_iter().fold(None, |best, value| {
        Some(best.map_or(value, |b: f64| b.max(value)))
    })
}

/// Posting policy: the first stated figure, else the years implied by
/// seniority wording, else nothing.
pub fn job_required_years(text: &str) -> Option<f64> {
    year_mentions(text)
        .into_iter()
        .next()
        .or_else(|| detect_seniority(text).map(Seniority::implied_years))
}

// ────────────────────────────────────────────────────────────────────────────
// Seniority
// ────────────────────────────────────────────────────────────────────────────

/// Seniority band read from title wording. Checked senior-first so
/// "Senior Associate" lands as senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

impl Seniority {
    /// Years of experience the band conventionally implies. Used only as a
    /// posting-side fallback when no explicit figure is stated.
    pub fn implied_years(self) -> f64 {
        match self {
            Seniority::Senior => 5.0,
            Seniority::Mid => 2.0,
            Seniority::Junior => 1.0,
        }
    }
}

const SENIOR_CUES: &[&str] = &["senior", "sr.", "principal", "staff engineer"];
const JUNIOR_CUES: &[&str] = &["junior", "jr.", "entry level", "entry-level", "intern"];
const MID_CUES: &[&str] = &["mid-level", "mid level", "intermediate"];

/// Seniority band mentioned in the text, if any. "lead" counts only as a
/// whole word; "leadership" and "leading" are not title cues.
pub fn detect_seniority(text: &str) -> Option<Seniority> {
    let lower = text.to_lowercase();
    let lead = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "lead");
    if lead || SENIOR_CUES.iter().any(|cue| lower.contains(cue)) {
        Some(Seniority::Senior)
    } else if JUNIOR_CUES.iter().any(|cue| lower.contains(cue)) {
        Some(Seniority::Junior)
    } else if MID_CUES.iter().any(|cue| lower.contains(cue)) {
        Some(Seniority::Mid)
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
