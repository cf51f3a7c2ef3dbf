//! Job description structuring: splits free-form job text into its
//! skills, responsibilities and qualifications sections.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SECTION_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(Skills|Responsibilities|Qualifications|Benefits):").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLabel {
    Skills,
    Responsibilities,
    Qualifications,
    // Only ever terminates another section.
    Benefits,
}

impl SectionLabel {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Skills" => Some(SectionLabel::Skills),
            "Responsibilities" => Some(SectionLabel::Responsibilities),
            "Qualifications" => Some(SectionLabel::Qualifications),
            "Benefits" => Some(SectionLabel::Benefits),
            _ => None,
        }
    }
}

/// Requirements derived from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(skip)]
    pub raw_text: String,
    /// Comma-separated entries of the skills section, in order, duplicates kept
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    /// Leading number of the first token of the second qualification line
    pub minimum_experience_years: Option<f64>,
}

#[derive(Debug, Default)]
pub struct JobStructurer;

impl JobStructurer {
    pub fn new() -> Self {
        Self
    }

    pub fn structure(&self, text: &str) -> JobDescription {
        let headers: Vec<(SectionLabel, usize, usize)> = SECTION_LABEL
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = SectionLabel::from_label(caps.get(1)?.as_str())?;
                Some((label, whole.start(), whole.end()))
            })
            .collect();

        let skills = section_body(text, &headers, SectionLabel::Skills)
            .map(|body| split_entries(body, ','))
            .unwrap_or_default();
        let responsibilities = section_body(text, &headers, SectionLabel::Responsibilities)
            .map(|body| split_entries(body, '\n'))
            .unwrap_or_default();
        let qualifications = section_body(text, &headers, SectionLabel::Qualifications)
            .map(|body| split_entries(body, '\n'))
            .unwrap_or_default();

        let minimum_experience_years = minimum_experience(&qualifications);

        debug!(
            "Structured job description: {} skills, {} responsibilities, {} qualifications, minimum experience {:?}",
            skills.len(),
            responsibilities.len(),
            qualifications.len(),
            minimum_experience_years
        );

        JobDescription {
            raw_text: text.to_string(),
            skills,
            responsibilities,
            qualifications,
            minimum_experience_years,
        }
    }
}

/// Text following the first `wanted` label, up to the next recognized label
/// or the end of the document.
fn section_body<'a>(
    text: &'a str,
    headers: &[(SectionLabel, usize, usize)],
    wanted: SectionLabel,
) -> Option<&'a str> {
    let position = headers.iter().position(|(label, _, _)| *label == wanted)?;
    let body_start = headers[position].2;
    let body_end = headers
        .get(position + 1)
        .map(|(_, start, _)| *start)
        .unwrap_or(text.len());

    Some(&text[body_start..body_end])
}

fn split_entries(body: &str, separator: char) -> Vec<String> {
    body.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn minimum_experience(qualifications: &[String]) -> Option<f64> {
    let line = qualifications.get(1)?;
    let minimum = line.split_whitespace().next().and_then(leading_number);
    if minimum.is_none() {
        debug!("No minimum experience in '{}'; experience gating disabled", line);
    }
    minimum
}

fn leading_number(token: &str) -> Option<f64> {
    let end = token
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(token.len());

    token[..end].parse().ok()
}
