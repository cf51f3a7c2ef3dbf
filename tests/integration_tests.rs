//! Integration tests for the resume qualifier

use resume_qualifier::config::{Config, OutputFormat};
use resume_qualifier::error::QualifierError;
use resume_qualifier::input::{DocumentIngress, InputManager, Submission, UploadedDocument};
use resume_qualifier::output::{save_report_to_file, ReportGenerator};
use resume_qualifier::processing::MatchingPipeline;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

async fn submission(resume: &str, job: &str) -> Submission {
    let manager = InputManager::new();
    Submission::new(
        manager.load(Path::new(resume)).await.unwrap(),
        manager.load(Path::new(job)).await.unwrap(),
    )
}

#[tokio::test]
async fn test_text_resume_end_to_end() {
    let texts = DocumentIngress::new()
        .receive(submission("tests/fixtures/sample_resume.txt", "tests/fixtures/sample_job.txt").await)
        .unwrap();

    let report = MatchingPipeline::new(&Config::default())
        .unwrap()
        .run(&texts.resume_text, &texts.job_description_text)
        .unwrap();
    let response = report.response();

    assert_eq!(response.name.as_deref(), Some("Priya Raman"));
    assert_eq!(response.email.as_deref(), Some("priya.raman@example.com"));
    assert_eq!(response.matched_skills, vec!["Python", "SQL", "Docker"]);
    assert_eq!(response.missing_skills, vec!["Kubernetes"]);
    assert_eq!(response.education.gpa.as_deref(), Some("8.9"));
    assert!(response.experience_years.unwrap() > 3.0);
    assert!(response.similarity_score > 0.65 && response.similarity_score < 1.0);
    assert!(response.qualified);

    assert_eq!(report.job.minimum_experience_years, Some(3.0));
    assert_eq!(report.job.responsibilities.len(), 2);
}

#[tokio::test]
async fn test_markdown_resume_is_flattened() {
    let texts = DocumentIngress::new()
        .receive(submission("tests/fixtures/sample_resume.md", "tests/fixtures/sample_job.txt").await)
        .unwrap();

    assert!(texts.resume_text.contains("Priya Raman"));
    assert!(!texts.resume_text.contains("**"));
    assert!(!texts.resume_text.contains("##"));

    let report = MatchingPipeline::new(&Config::default())
        .unwrap()
        .run(&texts.resume_text, &texts.job_description_text)
        .unwrap();

    assert_eq!(report.profile.name.as_deref(), Some("Priya Raman"));
    assert_eq!(report.result.matched_skills, vec!["Python", "SQL", "Docker"]);
}

#[tokio::test]
async fn test_experience_below_minimum_is_null() {
    let texts = DocumentIngress::new()
        .receive(submission("tests/fixtures/sample_resume.txt", "tests/fixtures/senior_job.txt").await)
        .unwrap();

    let report = MatchingPipeline::new(&Config::default())
        .unwrap()
        .run(&texts.resume_text, &texts.job_description_text)
        .unwrap();
    let json = serde_json::to_value(report.response()).unwrap();

    assert!(json["experience_years"].is_null());
    assert_eq!(json["matched_skills"], serde_json::json!(["Python", "SQL"]));
    assert_eq!(json["qualified"], true);
}

#[tokio::test]
async fn test_bad_experience_date_fails_the_request() {
    let texts = DocumentIngress::new()
        .receive(submission("tests/fixtures/bad_dates_resume.txt", "tests/fixtures/sample_job.txt").await)
        .unwrap();

    let err = MatchingPipeline::new(&Config::default())
        .unwrap()
        .run(&texts.resume_text, &texts.job_description_text)
        .unwrap_err();

    assert!(matches!(err, QualifierError::DateParse { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_single_document_is_input_missing() {
    let manager = InputManager::new();
    let submission = Submission {
        resume: Some(manager.load(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap()),
        job_description: None,
    };

    let err = DocumentIngress::new().receive(submission).unwrap_err();
    assert!(matches!(err, QualifierError::InputMissing(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let sub = submission("tests/fixtures/unsupported.xyz", "tests/fixtures/sample_job.txt").await;
    assert!(matches!(
        DocumentIngress::new().receive(sub),
        Err(QualifierError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = InputManager::new()
        .load(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(matches!(result, Err(QualifierError::InputMissing(_))));
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let pipeline = Arc::new(MatchingPipeline::new(&Config::default()).unwrap());
    let job = "Skills: Python, SQL\nQualifications:\n3";

    let mut handles = Vec::new();
    for i in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            let name = format!("Candidate Number{}", "X".repeat(i + 1));
            let skill = if i % 2 == 0 { "Python" } else { "SQL" };
            let resume = UploadedDocument::new(
                format!("resume_{}.txt", i),
                format!("{}\n{} developer\n", name, skill).into_bytes(),
            );
            let job = UploadedDocument::new("job.txt", job.as_bytes().to_vec());

            let texts = DocumentIngress::new().receive(Submission::new(resume, job)).unwrap();
            let report = pipeline
                .run(&texts.resume_text, &texts.job_description_text)
                .unwrap();
            (name, skill, report.response())
        }));
    }

    for handle in handles {
        let (name, skill, response) = handle.await.unwrap();
        assert_eq!(response.name.as_deref(), Some(name.as_str()));
        assert_eq!(response.matched_skills, vec![skill.to_string()]);
    }
}

#[tokio::test]
async fn test_report_saved_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reports").join("result.json");

    let report = MatchingPipeline::new(&Config::default())
        .unwrap()
        .run("Jane Doe\nPython", "Skills: Python, SQL\n")
        .unwrap();
    let rendered = ReportGenerator::new(false, true)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    save_report_to_file(&rendered, &path).unwrap();

    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["name"], "Jane Doe");
    assert_eq!(saved["missing_skills"], serde_json::json!(["SQL"]));
}
