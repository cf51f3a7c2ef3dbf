//! Resume field extraction.
//!
//! Every field has its own capability trait so a rule can be swapped or
//! tested on its own. The regex rules below are the stock implementations;
//! no rule depends on the output of another.

use crate::error::{QualifierError, Result};
use crate::processing::experience::{EntryEnd, ExperienceEntry};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z]*\s+[A-Z][a-zA-Z]*").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+").unwrap());

static GPA_LABEL_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CGPA:\s*(\d+(?:\.\d+)?)(?:/\d+)?").unwrap());

static GPA_LABEL_LAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)(?:/\d+)?\s* CGPA").unwrap());

// title line, "<company> – <location>" line, "<Month Year> – <Month Year|Present>" line
static EXPERIENCE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(.*?)\n(.*?)\s–\s(.*?)\n([A-Za-z]+\s\d{4})\s–\s([A-Za-z]+\s\d{4}|Present)",
    )
    .unwrap()
});

pub trait NameExtractor: Send + Sync {
    fn extract_name(&self, text: &str) -> Option<String>;
}

pub trait EmailExtractor: Send + Sync {
    /// All addresses in document order; the first one is the primary address.
    fn extract_emails(&self, text: &str) -> Vec<String>;
}

pub trait EducationExtractor: Send + Sync {
    fn extract_education(&self, text: &str) -> EducationRecord;
}

pub trait ExperienceExtractor: Send + Sync {
    fn extract_experience(&self, text: &str) -> Vec<ExperienceEntry>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    /// Matched institution; kept on the record but never reported
    #[serde(skip)]
    pub institution: Option<String>,
    pub gpa: Option<String>,
}

/// Raw per-field results for one resume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeFields {
    pub name: Option<String>,
    pub emails: Vec<String>,
    pub education: EducationRecord,
    pub experience: Vec<ExperienceEntry>,
}

impl ResumeFields {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

/// First line that opens with two capitalized words.
#[derive(Debug, Default)]
pub struct RegexNameExtractor;

impl NameExtractor for RegexNameExtractor {
    fn extract_name(&self, text: &str) -> Option<String> {
        text.lines()
            .find(|line| NAME_LINE.is_match(line))
            .map(|line| line.trim().to_string())
    }
}

#[derive(Debug, Default)]
pub struct RegexEmailExtractor;

impl EmailExtractor for RegexEmailExtractor {
    fn extract_emails(&self, text: &str) -> Vec<String> {
        EMAIL
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[derive(Debug)]
pub struct RegexEducationExtractor {
    institution: Regex,
}

impl RegexEducationExtractor {
    pub fn new(institution: &str) -> Result<Self> {
        let institution = Regex::new(&regex::escape(institution)).map_err(|e| {
            QualifierError::Processing(format!("Invalid institution pattern '{}': {}", institution, e))
        })?;
        Ok(Self { institution })
    }
}

impl EducationExtractor for RegexEducationExtractor {
    fn extract_education(&self, text: &str) -> EducationRecord {
        let institution = self.institution.find(text).map(|m| m.as_str().to_string());
        let gpa = GPA_LABEL_FIRST
            .captures(text)
            .or_else(|| GPA_LABEL_LAST.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        EducationRecord { institution, gpa }
    }
}

#[derive(Debug, Default)]
pub struct RegexExperienceExtractor;

impl ExperienceExtractor for RegexExperienceExtractor {
    fn extract_experience(&self, text: &str) -> Vec<ExperienceEntry> {
        EXPERIENCE_BLOCK
            .captures_iter(text)
            .map(|caps| {
                let field = |idx: usize| {
                    caps.get(idx)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default()
                };
                let end = field(5);

                ExperienceEntry {
                    title: field(1),
                    organization: field(2),
                    location: field(3),
                    start_date: field(4),
                    end: if end == "Present" {
                        EntryEnd::Present
                    } else {
                        EntryEnd::Date(end)
                    },
                }
            })
            .collect()
    }
}

/// Runs every field rule over the same resume text.
pub struct ResumeFieldExtractor {
    name: Box<dyn NameExtractor>,
    email: Box<dyn EmailExtractor>,
    education: Box<dyn EducationExtractor>,
    experience: Box<dyn ExperienceExtractor>,
}

impl ResumeFieldExtractor {
    /// Regex rules, with `institution` as the school the education rule looks for.
    pub fn new(institution: &str) -> Result<Self> {
        Ok(Self {
            name: Box::new(RegexNameExtractor),
            email: Box::new(RegexEmailExtractor),
            education: Box::new(RegexEducationExtractor::new(institution)?),
            experience: Box::new(RegexExperienceExtractor),
        })
    }

    pub fn with_name_extractor(mut self, extractor: impl NameExtractor + 'static) -> Self {
        self.name = Box::new(extractor);
        self
    }

    pub fn with_email_extractor(mut self, extractor: impl EmailExtractor + 'static) -> Self {
        self.email = Box::new(extractor);
        self
    }

    pub fn with_education_extractor(mut self, extractor: impl EducationExtractor + 'static) -> Self {
        self.education = Box::new(extractor);
        self
    }

    pub fn with_experience_extractor(mut self, extractor: impl ExperienceExtractor + 'static) -> Self {
        self.experience = Box::new(extractor);
        self
    }

    pub fn extract(&self, text: &str) -> ResumeFields {
        let fields = ResumeFields {
            name: self.name.extract_name(text),
            emails: self.email.extract_emails(text),
            education: self.education.extract_education(text),
            experience: self.experience.extract_experience(text),
        };

        debug!(
            "Extracted resume fields: name found: {}, {} email(s), gpa found: {}, {} experience entries",
            fields.name.is_some(),
            fields.emails.len(),
            fields.education.gpa.is_some(),
            fields.experience.len()
        );

        fields
    }
}
