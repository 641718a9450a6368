//! InitializeChatbotHandler - Command handler for installing a patient's
//! treatment chatbot.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::checkin::{CheckinError, ChatbotStatus, PatientChatbot};
use crate::domain::foundation::{ChatbotId, PatientId};
use crate::ports::ChatbotRepository;

use super::log_ingest_issues;

/// Generator output for one patient.
#[derive(Debug, Clone)]
pub struct InitializeChatbotCommand {
    pub patient_id: PatientId,
    pub patient_portfolio: Value,
    pub treatment_plan: Value,
    pub chatbot_config: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializeChatbotResult {
    pub chatbot_id: ChatbotId,
    pub patient_id: PatientId,
    pub status: ChatbotStatus,
    pub message: String,
    /// Config entries dropped at ingestion.
    pub dropped_entries: usize,
}

/// Handler for initializing chatbots. Replaces any chatbot the patient had.
pub struct InitializeChatbotHandler {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl InitializeChatbotHandler {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn handle(
        &self,
        cmd: InitializeChatbotCommand,
    ) -> Result<InitializeChatbotResult, CheckinError> {
        let (chatbot, issues) = PatientChatbot::initialize(
            ChatbotId::new(),
            cmd.patient_id,
            cmd.patient_portfolio,
            cmd.treatment_plan,
            cmd.chatbot_config,
        )?;
        log_ingest_issues(cmd.patient_id, &issues);

        self.chatbots.save(&chatbot).await?;

        info!(
            patient_id = %cmd.patient_id,
            chatbot_id = %chatbot.id(),
            activities = chatbot.config().treatment_execution.activity_count(),
            flows = chatbot.config().conversation_flows.len(),
            "Chatbot initialized"
        );

        Ok(InitializeChatbotResult {
            chatbot_id: chatbot.id(),
            patient_id: cmd.patient_id,
            status: chatbot.status(),
            message: format!("Chatbot initialized successfully for patient {}", cmd.patient_id),
            dropped_entries: issues.len(),
        })
    }
}
