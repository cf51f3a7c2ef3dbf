//! Whole-word, case-insensitive matching of required skills against resume text

use crate::error::{QualifierError, Result};
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Matched and missing job skills, each in job-description order without repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SkillMatcher;

impl SkillMatcher {
    pub fn new() -> Self {
        Self
    }

    /// The job skills that occur in `resume_text`, in the job's own casing.
    pub fn find_skills(&self, resume_text: &str, job_skills: &[String]) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();

        for skill in job_skills {
            if found.contains(skill) {
                continue;
            }
            if skill_pattern(skill)?.is_match(resume_text) {
                found.insert(skill.clone());
            }
        }

        debug!("Found {} of {} job skills in resume", found.len(), job_skills.len());
        Ok(found)
    }

    /// Split the job skills into those the candidate has and those they lack.
    pub fn compare(&self, candidate_skills: &BTreeSet<String>, job_skills: &[String]) -> SkillComparison {
        let mut seen = HashSet::new();
        let mut comparison = SkillComparison::default();

        for skill in job_skills {
            if !seen.insert(skill.as_str()) {
                continue;
            }
            if candidate_skills.contains(skill) {
                comparison.matched.push(skill.clone());
            } else {
                comparison.missing.push(skill.clone());
            }
        }

        comparison
    }
}

fn skill_pattern(skill: &str) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(skill)))
        .case_insensitive(true)
        .build()
        .map_err(|e| QualifierError::Processing(format!("Cannot build pattern for skill '{}': {}", skill, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whole_word_only() {
        let found = SkillMatcher::new()
            .find_skills("Writes very Pythonic code", &skills(&["Python"]))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let found = SkillMatcher::new()
            .find_skills("Daily user of PYTHON and sql.", &skills(&["Python", "SQL"]))
            .unwrap();
        assert!(found.contains("Python"));
        assert!(found.contains("SQL"));
    }

    #[test]
    fn test_multi_word_and_punctuated_skills() {
        let found = SkillMatcher::new()
            .find_skills(
                "Shipped machine learning services on Node.js",
                &skills(&["Machine Learning", "Node.js", "Go"]),
            )
            .unwrap();
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["Machine Learning".to_string(), "Node.js".to_string()]
        );
    }

    #[test]
    fn test_compare_keeps_job_order_and_drops_repeats() {
        let matcher = SkillMatcher::new();
        let job = skills(&["SQL", "Python", "Docker", "Python"]);
        let candidate: BTreeSet<String> = ["Python".to_string()].into_iter().collect();

        let comparison = matcher.compare(&candidate, &job);
        assert_eq!(comparison.matched, vec!["Python"]);
        assert_eq!(comparison.missing, vec!["SQL", "Docker"]);
    }

    #[test]
    fn test_no_job_skills() {
        let matcher = SkillMatcher::new();
        let found = matcher.find_skills("Python", &[]).unwrap();
        assert!(found.is_empty());
        assert_eq!(matcher.compare(&found, &[]), SkillComparison::default());
    }
}
