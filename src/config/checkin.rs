//! Check-in configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::checkin::ClassifierConfig;

/// Largest page of chat history a caller may request.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Check-in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinConfig {
    /// Sessions returned by chat history when the caller gives no limit
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Reply keywords and engagement thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl CheckinConfig {
    /// Validate check-in configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::InvalidHistoryLimit {
                max: MAX_HISTORY_LIMIT,
            });
        }
        let classifier = &self.classifier;
        if classifier.positive.is_empty() || classifier.negative.is_empty() {
            return Err(ValidationError::InvalidClassifier(
                "positive and negative keyword lists must not be empty",
            ));
        }
        if classifier.medium_engagement_words >= classifier.high_engagement_words {
            return Err(ValidationError::InvalidClassifier(
                "medium engagement threshold must be below the high one",
            ));
        }
        Ok(())
    }
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            classifier: ClassifierConfig::default(),
        }
    }
}

fn default_history_limit() -> usize {
    10
}
