//! ChatbotStatusHandler - Query handler for a patient's chatbot status.

use std::sync::Arc;

use crate::domain::checkin::{ChatbotStatusReport, CheckinError};
use crate::domain::foundation::PatientId;
use crate::ports::ChatbotRepository;

#[derive(Debug, Clone)]
pub struct ChatbotStatusQuery {
    pub patient_id: PatientId,
}

/// Status of a patient's chatbot. Not having one is a normal answer here,
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatbotStatusView {
    NotInitialized { patient_id: PatientId },
    Initialized { patient_id: PatientId, report: ChatbotStatusReport },
}

pub struct ChatbotStatusHandler {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl ChatbotStatusHandler {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn handle(&self, query: ChatbotStatusQuery) -> Result<ChatbotStatusView, CheckinError> {
        let view = match self.chatbots.find_by_patient(query.patient_id).await? {
            Some(chatbot) => ChatbotStatusView::Initialized {
                patient_id: query.patient_id,
                report: chatbot.status_report(),
            },
            None => ChatbotStatusView::NotInitialized {
                patient_id: query.patient_id,
            },
        };
        Ok(view)
    }
}
