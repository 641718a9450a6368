//! Conversation flows: how each kind of check-in opens.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::chat_type::ChatType;
use super::execution::IngestIssue;

const FALLBACK_GREETING: &str = "Hello! How are you feeling today?";
const FALLBACK_TOPIC: &str = "General wellness";
const FALLBACK_DURATION: &str = "5 minutes";

const DEFAULT_GREETING: &str = "Hello! How are you today?";
const DEFAULT_DURATION: &str = "10 minutes";
const DEFAULT_FREQUENCY: &str = "daily";
const DEFAULT_PURPOSE: &str = "Wellness check";

/// Script for one chat type, as written by the plan generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationFlow {
    pub purpose: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub topics: Vec<String>,
    pub prompts: Vec<String>,
}

/// What the assistant opens a session with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningContext {
    pub initial_message: String,
    pub topics: Vec<String>,
    pub expected_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl OpeningContext {
    /// Used when the chatbot has no flow for the requested chat type.
    pub fn fallback() -> Self {
        Self {
            initial_message: FALLBACK_GREETING.to_string(),
            topics: vec![FALLBACK_TOPIC.to_string()],
            expected_duration: FALLBACK_DURATION.to_string(),
            frequency: None,
            purpose: None,
        }
    }
}

impl From<&ConversationFlow> for OpeningContext {
    fn from(flow: &ConversationFlow) -> Self {
        Self {
            initial_message: flow
                .prompts
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
            topics: flow.topics.clone(),
            expected_duration: flow
                .duration
                .clone()
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            frequency: Some(
                flow.frequency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string()),
            ),
            purpose: Some(
                flow.purpose
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PURPOSE.to_string()),
            ),
        }
    }
}

/// Flows keyed by chat type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationFlows(BTreeMap<String, ConversationFlow>);

impl ConversationFlows {
    /// Reads flows from generator output, dropping entries that are not
    /// flow objects. An empty flow object counts as no flow.
    pub fn ingest(raw: &Value) -> (Self, Vec<IngestIssue>) {
        let mut issues = Vec::new();
        let mut flows = BTreeMap::new();

        match raw {
            Value::Null => {}
            Value::Object(map) => {
                for (name, value) in map {
                    if value.as_object().is_some_and(|flow| flow.is_empty()) {
                        continue;
                    }
                    match serde_json::from_value::<ConversationFlow>(value.clone()) {
                        Ok(flow) if value.is_object() => {
                            flows.insert(name.clone(), flow);
                        }
                        Ok(_) => issues.push(flow_issue(name, "expected a flow object")),
                        Err(err) => issues.push(flow_issue(name, &err.to_string())),
                    }
                }
            }
            _ => issues.push(flow_issue("", "expected an object of conversation flows")),
        }

        (Self(flows), issues)
    }

    pub fn get(&self, chat_type: &ChatType) -> Option<&ConversationFlow> {
        self.0.get(chat_type.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Opening message and context for a new session of `chat_type`.
    pub fn opening(&self, chat_type: &ChatType) -> OpeningContext {
        self.get(chat_type)
            .map(OpeningContext::from)
            .unwrap_or_else(OpeningContext::fallback)
    }
}

fn flow_issue(name: &str, reason: &str) -> IngestIssue {
    IngestIssue {
        category: format!("conversation_flows.{}", name),
        index: None,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_flow_uses_fallback() {
        let (flows, _) = ConversationFlows::ingest(&json!({}));
        let opening = flows.opening(&ChatType::DailyCheckIn);

        assert_eq!(opening.initial_message, "Hello! How are you feeling today?");
        assert_eq!(opening.topics, vec!["General wellness"]);
        assert_eq!(opening.expected_duration, "5 minutes");
        assert_eq!(opening.frequency, None);
        assert_eq!(opening.purpose, None);
    }

    #[test]
    fn present_flow_uses_first_prompt_and_fields() {
        let (flows, issues) = ConversationFlows::ingest(&json!({
            "daily_check_in": {
                "purpose": "Track medication",
                "frequency": "daily",
                "duration": "7 minutes",
                "topics": ["Medication", "Sleep"],
                "prompts": ["Good morning! Did you sleep well?", "Did you take your pills?"]
            }
        }));

        assert!(issues.is_empty());
        let opening = flows.opening(&ChatType::DailyCheckIn);
        assert_eq!(opening.initial_message, "Good morning! Did you sleep well?");
        assert_eq!(opening.topics, vec!["Medication", "Sleep"]);
        assert_eq!(opening.expected_duration, "7 minutes");
        assert_eq!(opening.purpose.as_deref(), Some("Track medication"));
    }

    #[test]
    fn sparse_flow_gets_defaults() {
        let (flows, _) = ConversationFlows::ingest(&json!({"treatment_progress": {"topics": []}}));
        let opening = flows.opening(&ChatType::TreatmentProgress);

        assert_eq!(opening.initial_message, "Hello! How are you today?");
        assert!(opening.topics.is_empty());
        assert_eq!(opening.expected_duration, "10 minutes");
        assert_eq!(opening.frequency.as_deref(), Some("daily"));
        assert_eq!(opening.purpose.as_deref(), Some("Wellness check"));
    }

    #[test]
    fn empty_flow_object_falls_back() {
        let (flows, issues) = ConversationFlows::ingest(&json!({"daily_check_in": {}}));

        assert!(issues.is_empty());
        assert!(flows.get(&ChatType::DailyCheckIn).is_none());
        assert_eq!(
            flows.opening(&ChatType::DailyCheckIn).initial_message,
            "Hello! How are you feeling today?"
        );
    }

    #[test]
    fn malformed_flows_are_dropped() {
        let (flows, issues) = ConversationFlows::ingest(&json!({
            "daily_check_in": "be nice",
            "crisis_support": {"topics": "not a list"},
            "treatment_progress": {"prompts": ["Hi"]}
        }));

        assert_eq!(flows.len(), 1);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn fallback_omits_optional_fields_when_serialized() {
        let json = serde_json::to_value(OpeningContext::fallback()).unwrap();
        assert!(json.get("frequency").is_none());
        assert!(json.get("purpose").is_none());
    }
}
