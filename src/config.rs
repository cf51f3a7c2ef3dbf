//! Configuration management for the resume qualifier

use crate::error::{QualifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity score (inclusive) for a candidate to qualify
    pub qualification_threshold: f64,
    /// Institution name searched for by the education extractor
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub resume_extensions: Vec<String>,
    pub job_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

pub const DEFAULT_QUALIFICATION_THRESHOLD: f64 = 0.65;
pub const DEFAULT_INSTITUTION: &str = "Siddaganga Institute Of Technology";

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                qualification_threshold: DEFAULT_QUALIFICATION_THRESHOLD,
                institution: DEFAULT_INSTITUTION.to_string(),
            },
            input: InputConfig {
                resume_extensions: vec!["pdf".to_string(), "txt".to_string(), "md".to_string()],
                job_extensions: vec!["txt".to_string(), "md".to_string()],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file is not an error: defaults are written out and returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| QualifierError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| QualifierError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-qualifier")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.matching.qualification_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(QualifierError::Configuration(format!(
                "matching.qualification_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.input.resume_extensions.is_empty() || self.input.job_extensions.is_empty() {
            return Err(QualifierError::Configuration(
                "input extension lists must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
