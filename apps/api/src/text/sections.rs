//! Section and contact detection over raw document text.
//!
//! Section presence is a keyword scan, not a layout parser: resumes arrive as
//! plain text with the formatting already flattened, so "does the word
//! appear" is the signal ATS engines themselves rely on.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Document sections the parser recognizes. Ordered so `BTreeSet<Section>`
/// serializes in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
    ];

    /// Keywords whose presence marks the section.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Section::Summary => &["summary", "objective", "profile"],
            Section::Experience => &["experience", "work history", "employment"],
            Section::Education => &["education", "academic", "degree"],
            Section::Skills => &["skills", "technical skills", "competencies"],
            Section::Projects => &["projects", "portfolio"],
            Section::Certifications => &["certifications", "certificates", "licensed"],
        }
    }
}

/// Which sections the text mentions at all.
pub fn detect_sections(text: &str) -> BTreeSet<Section> {
    let lower = text.to_lowercase();
    Section::ALL
        .iter()
        .copied()
        .filter(|section| section.keywords().iter().any(|kw| lower.contains(kw)))
        .collect()
}

/// A line that reads like a section heading: short, and leading with one of
/// the section's keywords. Used for slicing, not for presence detection.
fn is_heading_for(line: &str, section: Section) -> bool {
    let trimmed = line.trim().trim_end_matches(':').to_lowercase();
    trimmed.len() <= 40
        && section
            .keywords()
            .iter()
            .any(|kw| trimmed.starts_with(kw) || trimmed.ends_with(kw))
}

/// Extracts the body of a section: everything between its heading line and
/// the next heading (or end of document). `None` when no heading is found.
pub fn section_slice(text: &str, section: Section) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| is_heading_for(line, section))?;

    let end = lines[start + 1..]
        .iter()
        .position(|line| {
            Section::ALL
                .iter()
                .any(|other| *other != section && is_heading_for(line, *other))
        })
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());

    Some(lines[start + 1..end].join("\n"))
}

// ────────────────────────────────────────────────────────────────────────────
// Contact extraction
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("valid phone regex"));

/// Contact details found on a resume. Either field present satisfies the
/// ATS contact check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

/// First email and phone number in the text, if any.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Jane Doe
jane.doe@example.com | 555-123-4567

Summary
Data engineer focused on batch pipelines.

Experience
Acme Corp, 2019 - 2023
Built ETL jobs in Python.

Education
B.S. Computer Science, 2019

Skills
Python, SQL, Docker
";

    #[test]
    fn test_detects_present_sections() {
        let sections = detect_sections(SAMPLE);
        assert!(sections.contains(&Section::Summary));
        assert!(sections.contains(&Section::Experience));
        assert!(sections.contains(&Section::Education));
        assert!(sections.contains(&Section::Skills));
        assert!(!sections.contains(&Section::Projects));
    }

    #[test]
    fn test_detects_keyword_variants() {
        let sections = detect_sections("Work History\nEmployment at Foo.\nAcademic background.");
        assert!(sections.contains(&Section::Experience));
        assert!(sections.contains(&Section::Education));
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert!(detect_sections("").is_empty());
    }

    #[test]
    fn test_section_slice_stops_at_next_heading() {
        let body = section_slice(SAMPLE, Section::Experience).expect("experience section");
        assert!(body.contains("Acme Corp"), "body was: {body}");
        assert!(
            !body.contains("Computer Science"),
            "slice leaked into education: {body}"
        );
    }

    #[test]
    fn test_section_slice_missing_heading() {
        assert!(section_slice("no headings here", Section::Experience).is_none());
    }

    #[test]
    fn test_extracts_email_and_phone() {
        let contact = extract_contact(SAMPLE);
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_contact_absent() {
        let contact = extract_contact("no contact details at all");
        assert!(contact.is_empty());
    }

    #[test]
    fn test_phone_with_dots() {
        let contact = extract_contact("call 555.123.4567 today");
        assert_eq!(contact.phone.as_deref(), Some("555.123.4567"));
    }
}
