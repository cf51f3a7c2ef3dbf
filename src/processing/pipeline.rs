//! Matching orchestrator: job structuring, resume extraction, experience
//! gating, skill matching and similarity scoring for one resume/job pair.

use crate::config::Config;
use crate::error::Result;
use crate::processing::experience::ExperienceCalculator;
use crate::processing::extractors::{EducationRecord, ResumeFieldExtractor};
use crate::processing::job_structurer::{JobDescription, JobStructurer};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skill_matcher::SkillMatcher;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub emails: Vec<String>,
    /// `None` when below the job's minimum experience
    pub experience_years: Option<f64>,
    pub skills: BTreeSet<String>,
    pub education: EducationRecord,
}

impl CandidateProfile {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub similarity_score: f64,
    pub qualified: bool,
}

/// Caller-facing response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub name: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<f64>,
    pub education: EducationRecord,
    pub matched_skills: Vec<String>,
    pub similarity_score: f64,
    pub missing_skills: Vec<String>,
    pub qualified: bool,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub job: JobDescription,
    pub profile: CandidateProfile,
    pub result: MatchResult,
}

impl MatchReport {
    pub fn response(&self) -> MatchResponse {
        MatchResponse {
            name: self.profile.name.clone(),
            email: self.profile.primary_email().map(str::to_string),
            experience_years: self.profile.experience_years,
            education: self.profile.education.clone(),
            matched_skills: self.result.matched_skills.clone(),
            similarity_score: self.result.similarity_score,
            missing_skills: self.result.missing_skills.clone(),
            qualified: self.result.qualified,
        }
    }
}

/// Stateless between runs; one instance can serve any number of requests.
///
/// "Present" is resolved when each run happens, not when the pipeline is built.
pub struct MatchingPipeline {
    structurer: JobStructurer,
    fields: ResumeFieldExtractor,
    calculator: ExperienceCalculator,
    matcher: SkillMatcher,
    scorer: SimilarityScorer,
}

impl MatchingPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            structurer: JobStructurer::new(),
            fields: ResumeFieldExtractor::new(&config.matching.institution)?,
            calculator: ExperienceCalculator::new(),
            matcher: SkillMatcher::new(),
            scorer: SimilarityScorer::new(config.matching.qualification_threshold),
        })
    }

    pub fn with_calculator(mut self, calculator: ExperienceCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_field_extractor(mut self, fields: ResumeFieldExtractor) -> Self {
        self.fields = fields;
        self
    }

    /// Extract the candidate profile, nulling experience below the job's minimum.
    pub fn build_profile(&self, resume_text: &str, job: &JobDescription) -> Result<CandidateProfile> {
        let fields = self.fields.extract(resume_text);
        let total_years = self.calculator.total_years(&fields.experience)?;

        let experience_years = match job.minimum_experience_years {
            Some(minimum) if total_years < minimum => {
                debug!(
                    "Experience {:.2} years is below the required {} years",
                    total_years, minimum
                );
                None
            }
            _ => Some(total_years),
        };

        let skills = self.matcher.find_skills(resume_text, &job.skills)?;

        Ok(CandidateProfile {
            name: fields.name,
            emails: fields.emails,
            experience_years,
            skills,
            education: fields.education,
        })
    }

    pub fn run(&self, resume_text: &str, job_description_text: &str) -> Result<MatchReport> {
        let job = self.structurer.structure(job_description_text);
        let profile = self.build_profile(resume_text, &job)?;

        let comparison = self.matcher.compare(&profile.skills, &job.skills);
        let verdict = self.scorer.score(&comparison.matched, &job.skills);

        info!(
            "Matched {}/{} skills, similarity {:.3}, qualified: {}",
            comparison.matched.len(),
            comparison.matched.len() + comparison.missing.len(),
            verdict.similarity_score,
            verdict.qualified
        );

        Ok(MatchReport {
            job,
            profile,
            result: MatchResult {
                matched_skills: comparison.matched,
                missing_skills: comparison.missing,
                similarity_score: verdict.similarity_score,
                qualified: verdict.qualified,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QualifierError;
    use chrono::NaiveDate;

    fn pipeline() -> MatchingPipeline {
        MatchingPipeline::new(&Config::default())
            .unwrap()
            .with_calculator(ExperienceCalculator::with_today(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ))
    }

    const JOB: &str = "Skills: Python, SQL\nQualifications:\nB.E. or equivalent\n3 years of experience\n";

    fn resume(start: &str) -> String {
        format!(
            "Arjun Mehta\narjun@example.com\nData Analyst\nInitech – Pune\n{} – Present\nDaily Python user\n",
            start
        )
    }

    #[test]
    fn test_end_to_end_partial_match() {
        let report = pipeline()
            .run("Jane Doe\njane@example.com\nPython scripting", "Skills: Python, SQL\nQualifications:\n3")
            .unwrap();
        let response = report.response();

        assert_eq!(response.name.as_deref(), Some("Jane Doe"));
        assert_eq!(response.email.as_deref(), Some("jane@example.com"));
        assert_eq!(response.matched_skills, vec!["Python"]);
        assert_eq!(response.missing_skills, vec!["SQL"]);
        assert!(response.similarity_score > 0.0 && response.similarity_score < 1.0);
        assert_eq!(response.qualified, response.similarity_score >= 0.65);
    }

    #[test]
    fn test_experience_kept_at_or_above_minimum() {
        let report = pipeline().run(&resume("January 2020"), JOB).unwrap();
        let years = report.profile.experience_years.unwrap();
        assert!((years - 4.0).abs() < 0.02);
    }

    #[test]
    fn test_experience_nulled_below_minimum_but_still_scored() {
        let report = pipeline().run(&resume("January 2022"), JOB).unwrap();

        assert_eq!(report.profile.experience_years, None);
        assert_eq!(report.result.matched_skills, vec!["Python"]);
        assert!(report.result.similarity_score > 0.0);
    }

    #[test]
    fn test_no_threshold_keeps_experience() {
        let report = pipeline()
            .run(&resume("January 2023"), "Skills: Python\n")
            .unwrap();
        let years = report.profile.experience_years.unwrap();
        assert!((years - 1.0).abs() < 0.02);
    }

    #[test]
    fn test_bad_date_aborts_run() {
        let resume = "Data Analyst\nInitech – Pune\nSmarch 2020 – Present\n";
        assert!(matches!(
            pipeline().run(resume, JOB),
            Err(QualifierError::DateParse { .. })
        ));
    }

    #[test]
    fn test_hyphenated_project_dates_are_ignored() {
        let resume = "Jane Doe\nProjects\nResume Parser\nFlask - Python\nFall 2022 - Present\n";
        let report = pipeline().run(resume, "Skills: Python, Flask\n").unwrap();

        assert_eq!(report.profile.experience_years, Some(0.0));
        assert_eq!(report.result.matched_skills, vec!["Python", "Flask"]);
    }

    #[test]
    fn test_absent_fields_are_not_errors() {
        let report = pipeline().run("just some words", "nothing structured").unwrap();
        let response = report.response();

        assert_eq!(response.name, None);
        assert_eq!(response.email, None);
        assert_eq!(response.experience_years, Some(0.0));
        assert!(response.matched_skills.is_empty());
        assert!(response.missing_skills.is_empty());
        assert_eq!(response.similarity_score, 0.0);
        assert!(!response.qualified);
    }

    #[test]
    fn test_full_match_qualifies() {
        let report = pipeline()
            .run("Jane Doe\nSQL and Python every day", JOB)
            .unwrap();
        assert!(report.result.qualified);
        assert!(report.result.missing_skills.is_empty());
    }

    #[test]
    fn test_response_serializes_nulls() {
        let report = pipeline().run(&resume("January 2022"), JOB).unwrap();
        let json = serde_json::to_value(report.response()).unwrap();

        assert!(json["experience_years"].is_null());
        assert_eq!(json["email"], "arjun@example.com");
        assert!(json["education"]["gpa"].is_null());
        assert!(json["education"].get("institution").is_none());
    }
}
