//! Treatment execution: activities grouped by category.
//!
//! The plan generator hands over loosely shaped JSON. `ingest` is the only
//! way in: it keeps what deserializes, drops what does not and reports each
//! drop so the caller can log it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::activity::{ActivityItem, ActivityKind};
use super::chat_type::ChatType;

/// Categories drawn on for a daily check-in, in priority order.
pub const DAILY_CHECK_IN_CATEGORIES: [&str; 3] = [
    "medical_management",
    "immediate_actions",
    "lifestyle_interventions",
];

/// Most activities raised in one daily check-in.
pub const DAILY_CHECK_IN_LIMIT: usize = 5;

pub const COGNITIVE_CATEGORY: &str = "personalized_recommendations";
pub const SUPPORT_CATEGORY: &str = "support_services";

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCategory {
    pub name: String,
    pub activities: Vec<ActivityItem>,
}

/// Something dropped while ingesting a treatment execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestIssue {
    pub category: String,
    /// Position within the category, or `None` when the whole category was dropped.
    pub index: Option<usize>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreatmentExecution {
    categories: Vec<ActivityCategory>,
}

impl TreatmentExecution {
    pub fn new(categories: Vec<ActivityCategory>) -> Self {
        Self { categories }
    }

    /// Converts generator output into typed categories.
    ///
    /// Non-list categories and entries that are not activity objects are
    /// skipped. Entries without an id get `<category>_<position>`.
    pub fn ingest(raw: &Value) -> (Self, Vec<IngestIssue>) {
        let mut issues = Vec::new();

        let map = match raw {
            Value::Object(map) => map,
            Value::Null => return (Self::default(), issues),
            other => {
                issues.push(IngestIssue {
                    category: String::new(),
                    index: None,
                    reason: format!("expected an object of categories, got {}", json_kind(other)),
                });
                return (Self::default(), issues);
            }
        };

        let mut categories = Vec::with_capacity(map.len());
        for (name, value) in map {
            let Value::Array(entries) = value else {
                issues.push(IngestIssue {
                    category: name.clone(),
                    index: None,
                    reason: format!("expected a list of activities, got {}", json_kind(value)),
                });
                continue;
            };

            let mut activities = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                if !entry.is_object() {
                    issues.push(IngestIssue {
                        category: name.clone(),
                        index: Some(index),
                        reason: format!("expected an activity object, got {}", json_kind(entry)),
                    });
                    continue;
                }
                match serde_json::from_value::<ActivityItem>(entry.clone()) {
                    Ok(mut item) => {
                        if item.id.trim().is_empty() {
                            item.id = format!("{}_{}", name, index + 1);
                        }
                        activities.push(item);
                    }
                    Err(err) => issues.push(IngestIssue {
                        category: name.clone(),
                        index: Some(index),
                        reason: err.to_string(),
                    }),
                }
            }

            categories.push(ActivityCategory {
                name: name.clone(),
                activities,
            });
        }

        (Self { categories }, issues)
    }

    pub fn categories(&self) -> &[ActivityCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&[ActivityItem]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.activities.as_slice())
    }

    /// Every activity across all categories, in category order.
    pub fn all(&self) -> impl Iterator<Item = &ActivityItem> {
        self.categories.iter().flat_map(|c| c.activities.iter())
    }

    pub fn activity_count(&self) -> usize {
        self.categories.iter().map(|c| c.activities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.activity_count() == 0
    }

    /// Activities to walk through for a conversation of the given type.
    pub fn select(&self, chat_type: &ChatType) -> Vec<&ActivityItem> {
        match chat_type {
            ChatType::DailyCheckIn => {
                let mut selected: Vec<&ActivityItem> = DAILY_CHECK_IN_CATEGORIES
                    .iter()
                    .filter_map(|name| self.category(name))
                    .flatten()
                    .filter(|a| a.frequency.suits_daily_check_in())
                    .collect();
                if selected.is_empty() {
                    selected = self.all().collect();
                }
                selected.truncate(DAILY_CHECK_IN_LIMIT);
                selected
            }
            ChatType::TreatmentProgress => self.all().collect(),
            ChatType::CognitiveEngagement => self.of_kind(COGNITIVE_CATEGORY, ActivityKind::Cognitive),
            ChatType::CrisisSupport => self.of_kind(SUPPORT_CATEGORY, ActivityKind::Safety),
            ChatType::Other(_) => Vec::new(),
        }
    }

    fn of_kind(&self, category: &str, kind: ActivityKind) -> Vec<&ActivityItem> {
        self.category(category)
            .unwrap_or_default()
            .iter()
            .filter(|a| a.kind == kind)
            .collect()
    }
}

impl Serialize for TreatmentExecution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.activities)?;
        }
        map.end()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkin::activity::Frequency;
    use serde_json::json;

    fn activity(title: &str, kind: &str, frequency: &str) -> Value {
        json!({"title": title, "type": kind, "frequency": frequency})
    }

    fn titles(activities: &[&ActivityItem]) -> Vec<String> {
        activities.iter().map(|a| a.title.clone()).collect()
    }

    mod ingestion {
        use super::*;

        #[test]
        fn preserves_category_and_entry_order() {
            let raw = json!({
                "lifestyle_interventions": [activity("Walk", "physical_activity", "daily")],
                "medical_management": [
                    activity("Donepezil", "medication", "daily"),
                    activity("Check BP", "medical", "weekly")
                ]
            });

            let (execution, issues) = TreatmentExecution::ingest(&raw);

            assert!(issues.is_empty());
            let names: Vec<&str> = execution.categories().iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["lifestyle_interventions", "medical_management"]);
            assert_eq!(execution.activity_count(), 3);
        }

        #[test]
        fn drops_non_list_categories() {
            let raw = json!({
                "intensity": "high",
                "medical_management": [activity("Donepezil", "medication", "daily")]
            });

            let (execution, issues) = TreatmentExecution::ingest(&raw);

            assert_eq!(execution.categories().len(), 1);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].category, "intensity");
            assert_eq!(issues[0].index, None);
        }

        #[test]
        fn drops_malformed_entries_and_keeps_the_rest() {
            let raw = json!({
                "medical_management": [
                    "take pills",
                    {"description": "no title"},
                    activity("Donepezil", "medication", "daily")
                ]
            });

            let (execution, issues) = TreatmentExecution::ingest(&raw);

            assert_eq!(execution.activity_count(), 1);
            assert_eq!(issues.len(), 2);
            assert_eq!(issues[0].index, Some(0));
            assert_eq!(issues[1].index, Some(1));
        }

        #[test]
        fn assigns_ids_to_entries_without_one() {
            let raw = json!({
                "medical_management": [
                    activity("A", "medication", "daily"),
                    {"id": "given", "title": "B"}
                ]
            });

            let (execution, _) = TreatmentExecution::ingest(&raw);
            let ids: Vec<&str> = execution.all().map(|a| a.id.as_str()).collect();

            assert_eq!(ids, vec!["medical_management_1", "given"]);
        }

        #[test]
        fn null_is_empty_without_issues() {
            let (execution, issues) = TreatmentExecution::ingest(&Value::Null);
            assert!(execution.is_empty());
            assert!(issues.is_empty());
        }

        #[test]
        fn non_object_root_is_reported() {
            let (execution, issues) = TreatmentExecution::ingest(&json!([1, 2]));
            assert!(execution.is_empty());
            assert_eq!(issues.len(), 1);
        }

        #[test]
        fn serializes_back_to_category_map() {
            let raw = json!({"medical_management": [activity("A", "medication", "daily")]});
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let json = serde_json::to_value(&execution).unwrap();
            assert_eq!(json["medical_management"][0]["title"], "A");
            assert_eq!(json["medical_management"][0]["type"], "medication");
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn daily_check_in_uses_priority_categories_in_order() {
            let raw = json!({
                "lifestyle_interventions": [activity("Walk", "physical_activity", "daily")],
                "personalized_recommendations": [activity("Puzzle", "cognitive", "daily")],
                "immediate_actions": [activity("Remove rugs", "safety", "as_needed")],
                "medical_management": [
                    activity("Donepezil", "medication", "daily"),
                    activity("Neurologist", "medical", "monthly")
                ]
            });
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let selected = execution.select(&ChatType::DailyCheckIn);

            assert_eq!(titles(&selected), vec!["Donepezil", "Remove rugs", "Walk"]);
        }

        #[test]
        fn daily_check_in_falls_back_to_everything() {
            let raw = json!({
                "personalized_recommendations": [activity("Puzzle", "cognitive", "monthly")],
                "medical_management": [activity("Neurologist", "medical", "monthly")]
            });
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let selected = execution.select(&ChatType::DailyCheckIn);

            assert_eq!(titles(&selected), vec!["Puzzle", "Neurologist"]);
        }

        #[test]
        fn daily_check_in_is_capped() {
            let items: Vec<Value> = (0..8)
                .map(|i| activity(&format!("Item {}", i), "medication", "daily"))
                .collect();
            let (execution, _) = TreatmentExecution::ingest(&json!({"medical_management": items}));

            assert_eq!(execution.select(&ChatType::DailyCheckIn).len(), DAILY_CHECK_IN_LIMIT);
        }

        #[test]
        fn treatment_progress_is_uncapped() {
            let items: Vec<Value> = (0..8)
                .map(|i| activity(&format!("Item {}", i), "medication", "monthly"))
                .collect();
            let (execution, _) = TreatmentExecution::ingest(&json!({"medical_management": items}));

            assert_eq!(execution.select(&ChatType::TreatmentProgress).len(), 8);
        }

        #[test]
        fn cognitive_engagement_filters_by_kind() {
            let raw = json!({
                "personalized_recommendations": [
                    activity("Puzzle", "cognitive", "daily"),
                    activity("Call a friend", "social", "daily")
                ],
                "medical_management": [activity("Memory game", "cognitive", "daily")]
            });
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let selected = execution.select(&ChatType::CognitiveEngagement);
            assert_eq!(titles(&selected), vec!["Puzzle"]);
        }

        #[test]
        fn crisis_support_filters_by_kind() {
            let raw = json!({
                "support_services": [
                    activity("Emergency contact", "safety", "as_needed"),
                    activity("Support group", "social", "weekly")
                ]
            });
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let selected = execution.select(&ChatType::CrisisSupport);
            assert_eq!(titles(&selected), vec!["Emergency contact"]);
        }

        #[test]
        fn unknown_chat_type_selects_nothing() {
            let raw = json!({"medical_management": [activity("A", "medication", "daily")]});
            let (execution, _) = TreatmentExecution::ingest(&raw);

            assert!(execution.select(&ChatType::from("weekly_review")).is_empty());
        }

        #[test]
        fn missing_frequency_counts_as_daily() {
            let raw = json!({"medical_management": [{"title": "A"}]});
            let (execution, _) = TreatmentExecution::ingest(&raw);

            let selected = execution.select(&ChatType::DailyCheckIn);
            assert_eq!(selected[0].frequency, Frequency::Daily);
        }
    }
}
