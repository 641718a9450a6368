//! SendChatMessageHandler - Command handler for one patient check-in reply.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::checkin::{
    ChatSession, ChatTurn, CheckinError, PatientChatbot, ResponseClassifier,
};
use crate::domain::foundation::{ChatSessionId, PatientId};
use crate::ports::{capture, ChatSessionRepository, ChatbotRepository};

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub session_id: ChatSessionId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendChatMessageResult {
    pub session_id: ChatSessionId,
    pub patient_id: PatientId,
    pub turn: ChatTurn,
}

/// Handler for check-in messages.
///
/// Activities are selected from the chatbot's current treatment execution
/// on every message, so a replaced plan takes effect mid-session.
pub struct SendChatMessageHandler {
    sessions: Arc<dyn ChatSessionRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
    classifier: Arc<ResponseClassifier>,
}

impl SendChatMessageHandler {
    pub fn new(
        sessions: Arc<dyn ChatSessionRepository>,
        chatbots: Arc<dyn ChatbotRepository>,
        classifier: Arc<ResponseClassifier>,
    ) -> Self {
        Self {
            sessions,
            chatbots,
            classifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, CheckinError> {
        let session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or_else(|| CheckinError::session_not_found(cmd.session_id))?;
        let patient_id = session.patient_id();

        let chatbot = self
            .chatbots
            .find_by_patient(patient_id)
            .await?
            .ok_or_else(|| CheckinError::chatbot_not_found(patient_id))?;
        let activities = chatbot.activities_for(session.chat_type());

        let classifier = Arc::clone(&self.classifier);
        let message = cmd.message;
        let (mutation, outcome) = capture(move |session: &mut ChatSession| {
            session.send_message(&activities, &classifier, &message)
        });

        if !self.sessions.update(cmd.session_id, mutation).await? {
            return Err(CheckinError::session_not_found(cmd.session_id));
        }
        let turn = outcome
            .await
            .map_err(|_| CheckinError::infrastructure("chat update did not run"))??;

        debug!(
            session_id = %cmd.session_id,
            activity_completed = turn.activity_completed,
            conversation_complete = turn.conversation_complete,
            "Chat message handled"
        );

        if turn.advanced {
            self.chatbots
                .update(
                    patient_id,
                    Box::new(|chatbot: &mut PatientChatbot| chatbot.record_completion()),
                )
                .await?;
            info!(patient_id = %patient_id, session_id = %cmd.session_id, "Activity completed");
        }

        Ok(SendChatMessageResult {
            session_id: cmd.session_id,
            patient_id,
            turn,
        })
    }
}
