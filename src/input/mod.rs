//! Input processing module
//! Handles file detection, text extraction, and document ingress

pub mod file_detector;
pub mod ingress;
pub mod manager;
pub mod text_extractor;

pub use ingress::{DocumentIngress, ExtractedTexts, Submission, UploadedDocument};
pub use manager::InputManager;
