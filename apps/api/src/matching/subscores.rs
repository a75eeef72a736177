//! Per-dimension sub-scores, each in [0, 1].
//!
//! Every policy here answers "how does a vacuous requirement score?"
//! explicitly. A posting that asks for nothing is satisfied by anything;
//! only the semantic dimension has no vacuous case.

use std::collections::BTreeSet;

use crate::parsing::education::EducationLevel;

/// Skills coverage plus the exact matched/missing breakdown the report and
/// recommendations reuse. `matched` and `missing` partition the posting's
/// required set.
#[derive(Debug, Clone)]
pub struct SkillsMatch {
    pub score: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Fraction of required skills the resume covers. No required skills means
/// nothing is unmet: score 1.0 with empty breakdowns.
pub fn skills_score(
    resume_skills: &BTreeSet<String>,
    required_skills: &BTreeSet<String>,
) -> SkillsMatch {
    if required_skills.is_empty() {
        return SkillsMatch {
            score: 1.0,
            matched: BTreeSet::new(),
            missing: BTreeSet::new(),
        };
    }

    let matched: BTreeSet<String> = required_skills
        .intersection(resume_skills)
        .cloned()
        .collect();
    let missing: BTreeSet<String> = required_skills
        .difference(resume_skills)
        .cloned()
        .collect();

    let score = (matched.len() as f64 / required_skills.len() as f64).clamp(0.0, 1.0);
    SkillsMatch {
        score,
        matched,
        missing,
    }
}

/// Ratio of resume years to required years, capped at 1.0. Surplus
/// experience never scores above full marks.
///
/// No stated requirement (or a zero one) is vacuously satisfied. A real
/// requirement against a resume with no detectable figure scores 0.0: that
/// absence is exactly what a screener would flag.
pub fn experience_score(resume_years: Option<f64>, required_years: Option<f64>) -> f64 {
    match required_years {
        None => 1.0,
        Some(required) if required <= 0.0 => 1.0,
        Some(required) => match resume_years {
            None => 0.0,
            Some(resume) => (resume / required).clamp(0.0, 1.0),
        },
    }
}

/// Degree comparison on the education ladder. Meeting or exceeding the
/// requirement is full marks; each rung short costs `step`, floored at
/// zero. With the default step of 0.3, one rung below scores 0.7.
pub fn education_score(
    resume_level: Option<EducationLevel>,
    required_level: Option<EducationLevel>,
    step: f64,
) -> f64 {
    let required = match required_level {
        None => return 1.0,
        Some(level) => level,
    };
    let resume = resume_level.unwrap_or(EducationLevel::None);

    if resume >= required {
        return 1.0;
    }

    let gap = f64::from(required.ordinal() - resume.ordinal());
    (1.0 - gap * step).max(0.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
