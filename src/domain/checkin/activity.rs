//! Treatment activities presented during check-ins.

use serde::{Deserialize, Serialize};

/// Category of a treatment activity, used for selection and reply wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Medication,
    PhysicalActivity,
    Nutrition,
    Sleep,
    Cognitive,
    Social,
    Medical,
    Safety,
    #[default]
    #[serde(other)]
    General,
}

/// How often an activity is meant to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    AsNeeded,
    #[serde(other)]
    Other,
}

impl Frequency {
    /// Frequencies worth raising in a daily check-in.
    pub fn suits_daily_check_in(self) -> bool {
        matches!(self, Frequency::Daily | Frequency::Weekly | Frequency::AsNeeded)
    }
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// One actionable item from a treatment plan.
///
/// Produced by the plan generator; only `kind` and `frequency` drive
/// behavior, the rest is carried through for wording and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chat_prompts: Vec<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl ActivityItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            description: None,
            chat_prompts: Vec::new(),
            frequency: Frequency::Daily,
            difficulty: default_difficulty(),
            success_metrics: Vec::new(),
            follow_up_questions: Vec::new(),
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_prompts(mut self, prompts: &[&str]) -> Self {
        self.chat_prompts = prompts.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_follow_ups(mut self, questions: &[&str]) -> Self {
        self.follow_up_questions = questions.iter().map(|q| q.to_string()).collect();
        self
    }
}
