//! ReplaceTreatmentPlanHandler - Command handler for the clinician review
//! hook that overwrites a patient's plan in place.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::checkin::{CheckinError, IngestIssue, PatientChatbot};
use crate::domain::foundation::PatientId;
use crate::ports::{capture, ChatbotRepository};

use super::log_ingest_issues;

#[derive(Debug, Clone)]
pub struct ReplaceTreatmentPlanCommand {
    pub patient_id: PatientId,
    pub treatment_plan: Value,
    pub treatment_execution: Option<Value>,
    pub chatbot_config: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceTreatmentPlanResult {
    pub patient_id: PatientId,
    pub activities: usize,
    pub dropped_entries: usize,
}

pub struct ReplaceTreatmentPlanHandler {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl ReplaceTreatmentPlanHandler {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn handle(
        &self,
        cmd: ReplaceTreatmentPlanCommand,
    ) -> Result<ReplaceTreatmentPlanResult, CheckinError> {
        let ReplaceTreatmentPlanCommand {
            patient_id,
            treatment_plan,
            treatment_execution,
            chatbot_config,
        } = cmd;

        let (mutation, outcome) = capture(move |chatbot: &mut PatientChatbot| {
            chatbot
                .replace_plan(treatment_plan, treatment_execution, chatbot_config)
                .map(|issues| (issues, chatbot.config().treatment_execution.activity_count()))
        });

        if !self.chatbots.update(patient_id, mutation).await? {
            return Err(CheckinError::chatbot_not_found(patient_id));
        }
        let (issues, activities): (Vec<IngestIssue>, usize) = outcome
            .await
            .map_err(|_| CheckinError::infrastructure("chatbot update did not run"))??;
        log_ingest_issues(patient_id, &issues);

        info!(patient_id = %patient_id, activities, "Treatment plan replaced");

        Ok(ReplaceTreatmentPlanResult {
            patient_id,
            activities,
            dropped_entries: issues.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatbotRepository;
    use crate::application::handlers::checkin::test_support::{config, plan};
    use crate::domain::checkin::ChatType;
    use crate::domain::foundation::{ChatbotId, ErrorCode};
    use serde_json::json;

    async fn repo_with_chatbot() -> Arc<InMemoryChatbotRepository> {
        let chatbots = Arc::new(InMemoryChatbotRepository::new());
        let (chatbot, _) =
            PatientChatbot::initialize(ChatbotId::new(), PatientId::new(4), json!({}), plan(), config())
                .unwrap();
        chatbots.save(&chatbot).await.unwrap();
        chatbots
    }

    #[tokio::test]
    async fn replaces_execution_in_place() {
        let chatbots = repo_with_chatbot().await;
        let handler = ReplaceTreatmentPlanHandler::new(chatbots.clone());

        let result = handler
            .handle(ReplaceTreatmentPlanCommand {
                patient_id: PatientId::new(4),
                treatment_plan: json!({"immediate_actions": ["Book a follow-up"]}),
                treatment_execution: Some(json!({
                    "immediate_actions": [{"id": "appt", "title": "Book a follow-up", "type": "appointment"}]
                })),
                chatbot_config: None,
            })
            .await
            .unwrap();

        assert_eq!(result.activities, 1);
        let chatbot = chatbots.find_by_patient(PatientId::new(4)).await.unwrap().unwrap();
        let titles: Vec<_> = chatbot
            .activities_for(&ChatType::DailyCheckIn)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Book a follow-up"]);
        assert_eq!(chatbot.config().conversation_flows.len(), 1);
    }

    #[tokio::test]
    async fn invalid_plan_leaves_chatbot_untouched() {
        let chatbots = repo_with_chatbot().await;
        let before = chatbots.find_by_patient(PatientId::new(4)).await.unwrap().unwrap();
        let handler = ReplaceTreatmentPlanHandler::new(chatbots.clone());

        let err = handler
            .handle(ReplaceTreatmentPlanCommand {
                patient_id: PatientId::new(4),
                treatment_plan: json!(null),
                treatment_execution: None,
                chatbot_config: Some(json!({})),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        let after = chatbots.find_by_patient(PatientId::new(4)).await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn requires_existing_chatbot() {
        let handler = ReplaceTreatmentPlanHandler::new(Arc::new(InMemoryChatbotRepository::new()));

        let err = handler
            .handle(ReplaceTreatmentPlanCommand {
                patient_id: PatientId::new(4),
                treatment_plan: plan(),
                treatment_execution: None,
                chatbot_config: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ChatbotNotFound);
    }
}
