//! Per-patient treatment chatbot.
//!
//! Holds the treatment plan and the generator's chatbot config for one
//! patient. The config arrives as JSON and is split into typed parts at
//! ingestion; keys the engine does not use are passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{ChatbotId, PatientId, Timestamp};

use super::activity::ActivityItem;
use super::chat_type::ChatType;
use super::errors::CheckinError;
use super::execution::{IngestIssue, TreatmentExecution};
use super::flow::{ConversationFlows, OpeningContext};

const FLOWS_KEY: &str = "conversation_flows";
const EXECUTION_KEY: &str = "treatment_execution";
const SCHEDULE_KEY: &str = "monitoring_schedule";
const GOALS_KEY: &str = "treatment_goals";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatbotStatus {
    #[default]
    Active,
}

/// Chatbot config split into the parts the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatbotConfig {
    pub conversation_flows: ConversationFlows,
    pub treatment_execution: TreatmentExecution,
    pub monitoring_schedule: Value,
    pub treatment_goals: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatbotConfig {
    pub fn ingest(raw: Value) -> (Self, Vec<IngestIssue>) {
        let mut issues = Vec::new();

        let mut map = match raw {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                issues.push(IngestIssue {
                    category: String::new(),
                    index: None,
                    reason: "chatbot config is not an object".to_string(),
                });
                Map::new()
            }
        };

        let (conversation_flows, flow_issues) =
            ConversationFlows::ingest(&map.remove(FLOWS_KEY).unwrap_or(Value::Null));
        issues.extend(flow_issues);

        let (treatment_execution, execution_issues) =
            TreatmentExecution::ingest(&map.remove(EXECUTION_KEY).unwrap_or(Value::Null));
        issues.extend(execution_issues);

        let monitoring_schedule = map
            .remove(SCHEDULE_KEY)
            .unwrap_or_else(|| Value::Object(Map::new()));

        let treatment_goals = match map.remove(GOALS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(goals)) => goals,
            Some(_) => {
                issues.push(IngestIssue {
                    category: GOALS_KEY.to_string(),
                    index: None,
                    reason: "expected a list of goals".to_string(),
                });
                Vec::new()
            }
        };

        let config = Self {
            conversation_flows,
            treatment_execution,
            monitoring_schedule,
            treatment_goals,
            extra: map,
        };
        (config, issues)
    }
}

/// Status view of a patient's chatbot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatbotStatusReport {
    pub chatbot_id: ChatbotId,
    pub status: ChatbotStatus,
    pub created_at: Timestamp,
    pub total_activities_tracked: u64,
    pub treatment_goals_count: usize,
    pub monitoring_schedule: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientChatbot {
    id: ChatbotId,
    patient_id: PatientId,
    patient_portfolio: Value,
    treatment_plan: Value,
    config: ChatbotConfig,
    completed_activities: u64,
    created_at: Timestamp,
    status: ChatbotStatus,
}

impl PatientChatbot {
    /// Builds a chatbot from generator output.
    ///
    /// The treatment plan must be a JSON object of category to actions.
    /// Malformed config parts are dropped and returned as issues.
    pub fn initialize(
        id: ChatbotId,
        patient_id: PatientId,
        patient_portfolio: Value,
        treatment_plan: Value,
        chatbot_config: Value,
    ) -> Result<(Self, Vec<IngestIssue>), CheckinError> {
        ensure_plan_shape(&treatment_plan)?;
        let (config, issues) = ChatbotConfig::ingest(chatbot_config);

        let chatbot = Self {
            id,
            patient_id,
            patient_portfolio,
            treatment_plan,
            config,
            completed_activities: 0,
            created_at: Timestamp::now(),
            status: ChatbotStatus::Active,
        };
        Ok((chatbot, issues))
    }

    pub fn id(&self) -> ChatbotId {
        self.id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn status(&self) -> ChatbotStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn patient_portfolio(&self) -> &Value {
        &self.patient_portfolio
    }

    pub fn treatment_plan(&self) -> &Value {
        &self.treatment_plan
    }

    pub fn config(&self) -> &ChatbotConfig {
        &self.config
    }

    pub fn completed_activities(&self) -> u64 {
        self.completed_activities
    }

    pub fn opening(&self, chat_type: &ChatType) -> OpeningContext {
        self.config.conversation_flows.opening(chat_type)
    }

    /// Activities for a chat type, from the current treatment execution.
    pub fn activities_for(&self, chat_type: &ChatType) -> Vec<ActivityItem> {
        self.config
            .treatment_execution
            .select(chat_type)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn record_completion(&mut self) {
        self.completed_activities += 1;
    }

    /// Reviewer update hook: replaces the plan in place.
    ///
    /// A new config replaces flows, execution, schedule and goals. A new
    /// execution replaces only the execution, and wins over one inside the
    /// new config.
    pub fn replace_plan(
        &mut self,
        treatment_plan: Value,
        treatment_execution: Option<Value>,
        chatbot_config: Option<Value>,
    ) -> Result<Vec<IngestIssue>, CheckinError> {
        ensure_plan_shape(&treatment_plan)?;
        let mut issues = Vec::new();

        if let Some(raw) = chatbot_config {
            let (config, config_issues) = ChatbotConfig::ingest(raw);
            self.config = config;
            issues.extend(config_issues);
        }

        if let Some(raw) = treatment_execution {
            let (execution, execution_issues) = TreatmentExecution::ingest(&raw);
            self.config.treatment_execution = execution;
            issues.extend(execution_issues);
        }

        self.treatment_plan = treatment_plan;
        Ok(issues)
    }

    pub fn status_report(&self) -> ChatbotStatusReport {
        ChatbotStatusReport {
            chatbot_id: self.id,
            status: self.status,
            created_at: self.created_at,
            total_activities_tracked: self.completed_activities,
            treatment_goals_count: self.config.treatment_goals.len(),
            monitoring_schedule: self.config.monitoring_schedule.clone(),
        }
    }
}

fn ensure_plan_shape(plan: &Value) -> Result<(), CheckinError> {
    if plan.is_object() {
        Ok(())
    } else {
        Err(CheckinError::invalid_plan(
            "treatment plan must be an object of category to actions",
        ))
    }
}
