//! StartChatHandler - Command handler for opening a check-in session.

use std::sync::Arc;
use tracing::info;

use crate::domain::checkin::{ChatSession, ChatType, CheckinError, OpeningContext};
use crate::domain::foundation::{ChatSessionId, PatientId};
use crate::ports::{ChatSessionRepository, ChatbotRepository};

#[derive(Debug, Clone)]
pub struct StartChatCommand {
    pub patient_id: PatientId,
    pub chat_type: ChatType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartChatResult {
    pub session_id: ChatSessionId,
    pub patient_id: PatientId,
    pub chat_type: ChatType,
    pub initial_message: String,
    pub context: OpeningContext,
}

/// Handler for starting check-ins. The patient must have a chatbot.
pub struct StartChatHandler {
    sessions: Arc<dyn ChatSessionRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
}

impl StartChatHandler {
    pub fn new(
        sessions: Arc<dyn ChatSessionRepository>,
        chatbots: Arc<dyn ChatbotRepository>,
    ) -> Self {
        Self { sessions, chatbots }
    }

    pub async fn handle(&self, cmd: StartChatCommand) -> Result<StartChatResult, CheckinError> {
        let chatbot = self
            .chatbots
            .find_by_patient(cmd.patient_id)
            .await?
            .ok_or_else(|| CheckinError::chatbot_not_found(cmd.patient_id))?;

        let context = chatbot.opening(&cmd.chat_type);
        let session = ChatSession::new(ChatSessionId::new(), cmd.patient_id, cmd.chat_type.clone());
        self.sessions.save(&session).await?;

        info!(
            patient_id = %cmd.patient_id,
            session_id = %session.id(),
            chat_type = %cmd.chat_type.as_str(),
            "Chat session started"
        );

        Ok(StartChatResult {
            session_id: session.id(),
            patient_id: cmd.patient_id,
            chat_type: cmd.chat_type,
            initial_message: context.initial_message.clone(),
            context,
        })
    }
}
