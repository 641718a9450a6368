//! Intake configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;
use crate::domain::patient::DEFAULT_TIMEZONE;

/// Intake questionnaire configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// YAML question bank to use instead of the embedded one
    pub question_bank_path: Option<PathBuf>,

    /// Timezone recorded on newly registered patients
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

impl IntakeConfig {
    pub fn question_bank_path(&self) -> Option<&Path> {
        self.question_bank_path.as_deref()
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_timezone.trim().is_empty() {
            return Err(ValidationError::EmptyTimezone);
        }
        if let Some(path) = &self.question_bank_path {
            if !path.is_file() {
                return Err(ValidationError::QuestionBankMissing(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            question_bank_path: None,
            default_timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
