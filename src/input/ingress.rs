//! Document ingress: validates a resume/job-description pair and turns it
//! into plain text for the matching pipeline.
//!
//! Each submission owns its byte buffers for the duration of one call.
//! Nothing is staged under a shared path, so concurrent calls cannot see
//! each other's documents.

use crate::error::{QualifierError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info, warn};

/// A single document as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_file_name(&self.file_name)
    }
}

/// The two documents of one qualification request. Either may be missing.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<UploadedDocument>,
}

impl Submission {
    pub fn new(resume: UploadedDocument, job_description: UploadedDocument) -> Self {
        Self {
            resume: Some(resume),
            job_description: Some(job_description),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTexts {
    pub resume_text: String,
    pub job_description_text: String,
}

#[derive(Debug, Default)]
pub struct DocumentIngress;

impl DocumentIngress {
    pub fn new() -> Self {
        Self
    }

    /// Validate that both documents are present, then extract their text.
    ///
    /// Presence is checked before any extraction work starts.
    pub fn receive(&self, submission: Submission) -> Result<ExtractedTexts> {
        let resume = require(submission.resume, "resume")?;
        let job_description = require(submission.job_description, "job description")?;

        info!(
            "Received resume '{}' ({} bytes) and job description '{}' ({} bytes)",
            resume.file_name,
            resume.bytes.len(),
            job_description.file_name,
            job_description.bytes.len()
        );

        let resume_text = self.extract_text(&resume)?;
        let job_description_text = self.extract_text(&job_description)?;

        Ok(ExtractedTexts {
            resume_text,
            job_description_text,
        })
    }

    pub fn extract_text(&self, document: &UploadedDocument) -> Result<String> {
        let text = match document.file_type() {
            FileType::Pdf => PdfExtractor.extract(document)?,
            FileType::Text => PlainTextExtractor.extract(document)?,
            FileType::Markdown => MarkdownExtractor.extract(document)?,
            FileType::Unknown => {
                return Err(QualifierError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    document.file_name
                )));
            }
        };

        if text.trim().is_empty() {
            warn!("No text could be extracted from '{}'", document.file_name);
            return Err(QualifierError::UnreadableDocument(format!(
                "No text could be extracted from: {}",
                document.file_name
            )));
        }

        debug!("Extracted {} characters from '{}'", text.len(), document.file_name);
        Ok(text)
    }
}

fn require(document: Option<UploadedDocument>, role: &str) -> Result<UploadedDocument> {
    match document {
        Some(doc) if !doc.file_name.trim().is_empty() => Ok(doc),
        _ => Err(QualifierError::InputMissing(format!(
            "Both files are required: {} is missing",
            role
        ))),
    }
}
