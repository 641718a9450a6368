//! Check-in conversation types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of check-in conversation. Unrecognised names are kept verbatim and
/// select no activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChatType {
    #[default]
    DailyCheckIn,
    TreatmentProgress,
    CognitiveEngagement,
    CrisisSupport,
    Other(String),
}

impl ChatType {
    pub fn as_str(&self) -> &str {
        match self {
            ChatType::DailyCheckIn => "daily_check_in",
            ChatType::TreatmentProgress => "treatment_progress",
            ChatType::CognitiveEngagement => "cognitive_engagement",
            ChatType::CrisisSupport => "crisis_support",
            ChatType::Other(name) => name,
        }
    }
}

impl From<&str> for ChatType {
    fn from(name: &str) -> Self {
        match name {
            "daily_check_in" => ChatType::DailyCheckIn,
            "treatment_progress" => ChatType::TreatmentProgress,
            "cognitive_engagement" => ChatType::CognitiveEngagement,
            "crisis_support" => ChatType::CrisisSupport,
            other => ChatType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChatType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChatType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ChatType::from(name.as_str()))
    }
}
