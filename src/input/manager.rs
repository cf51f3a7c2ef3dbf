//! Input manager for reading documents from disk

use crate::error::{QualifierError, Result};
use crate::input::ingress::UploadedDocument;
use log::info;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a file into an owned upload buffer.
    pub async fn load(&self, path: &Path) -> Result<UploadedDocument> {
        if !path.exists() {
            return Err(QualifierError::InputMissing(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| QualifierError::InvalidInput(format!("Not a file: {}", path.display())))?;

        info!("Reading {}", path.display());
        let bytes = fs::read(path).await?;

        Ok(UploadedDocument::new(file_name, bytes))
    }
}
