//! Request and response bodies for check-in endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{
    ChatHistoryResult, ChatbotStatusView, EndChatResult, InitializeChatbotResult,
    ReplaceTreatmentPlanResult, SendChatMessageResult, StartChatResult,
};
use crate::domain::checkin::{
    ChatSessionOverview, ChatType, ChatbotStatus, ChatbotStatusReport, Interaction,
    OpeningContext, SessionMetrics, SessionSummary,
};
use crate::domain::foundation::{ChatSessionId, ChatbotId, PatientId};

const NOT_INITIALIZED: &str = "not_initialized";

/// Generator output. A `patient_id` in the body is accepted but the path wins.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeChatbotRequest {
    #[serde(default)]
    pub patient_id: Option<u64>,
    #[serde(default)]
    pub patient_portfolio: Value,
    pub treatment_plan: Value,
    #[serde(default)]
    pub chatbot_config: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeChatbotResponse {
    pub patient_id: PatientId,
    pub chatbot_id: ChatbotId,
    pub status: ChatbotStatus,
    pub message: String,
}

impl From<InitializeChatbotResult> for InitializeChatbotResponse {
    fn from(result: InitializeChatbotResult) -> Self {
        Self {
            patient_id: result.patient_id,
            chatbot_id: result.chatbot_id,
            status: result.status,
            message: result.message,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartChatRequest {
    #[serde(default)]
    pub chat_type: Option<ChatType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartChatResponse {
    pub session_id: ChatSessionId,
    pub patient_id: PatientId,
    pub chatbot_message: String,
    pub chat_type: ChatType,
    pub conversation_context: OpeningContext,
}

impl From<StartChatResult> for StartChatResponse {
    fn from(result: StartChatResult) -> Self {
        Self {
            session_id: result.session_id,
            patient_id: result.patient_id,
            chatbot_message: result.initial_message,
            chat_type: result.chat_type,
            conversation_context: result.context,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageRequest {
    pub session_id: String,
    pub patient_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub session_id: ChatSessionId,
    pub chatbot_message: String,
    pub follow_up_questions: Vec<String>,
    pub activity_completed: bool,
    pub conversation_complete: bool,
    pub next_steps: Vec<String>,
}

impl From<SendChatMessageResult> for ChatMessageResponse {
    fn from(result: SendChatMessageResult) -> Self {
        let turn = result.turn;
        Self {
            session_id: result.session_id,
            chatbot_message: turn.message,
            follow_up_questions: turn.follow_up_questions,
            activity_completed: turn.activity_completed,
            conversation_complete: turn.conversation_complete,
            next_steps: turn.next_steps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndChatRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndChatResponse {
    pub session_id: ChatSessionId,
    pub patient_id: PatientId,
    pub chat_summary: SessionSummary,
    pub interactions: Vec<Interaction>,
    pub completed_activities: Vec<String>,
    pub metrics: SessionMetrics,
}

impl From<EndChatResult> for EndChatResponse {
    fn from(result: EndChatResult) -> Self {
        Self {
            session_id: result.session_id,
            patient_id: result.patient_id,
            chat_summary: result.summary,
            interactions: result.interactions,
            completed_activities: result.completed_activities,
            metrics: result.metrics,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatHistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryResponse {
    pub patient_id: PatientId,
    pub total_sessions: usize,
    pub sessions: Vec<ChatSessionOverview>,
}

impl From<ChatHistoryResult> for ChatHistoryResponse {
    fn from(result: ChatHistoryResult) -> Self {
        Self {
            patient_id: result.patient_id,
            total_sessions: result.total_sessions,
            sessions: result.sessions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatbotStatusResponse {
    NotInitialized {
        patient_id: PatientId,
        status: &'static str,
        message: String,
    },
    Initialized {
        patient_id: PatientId,
        #[serde(flatten)]
        report: ChatbotStatusReport,
    },
}

impl From<ChatbotStatusView> for ChatbotStatusResponse {
    fn from(view: ChatbotStatusView) -> Self {
        match view {
            ChatbotStatusView::NotInitialized { patient_id } => Self::NotInitialized {
                patient_id,
                status: NOT_INITIALIZED,
                message: "No chatbot configured for this patient".to_string(),
            },
            ChatbotStatusView::Initialized { patient_id, report } => {
                Self::Initialized { patient_id, report }
            }
        }
    }
}

/// Clinician review update. Omitted parts of the config are left as they are.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacePlanRequest {
    pub treatment_plan: Value,
    #[serde(default)]
    pub treatment_execution: Option<Value>,
    #[serde(default)]
    pub chatbot_config: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePlanResponse {
    pub patient_id: PatientId,
    pub activities: usize,
    pub dropped_entries: usize,
    pub message: String,
}

impl From<ReplaceTreatmentPlanResult> for ReplacePlanResponse {
    fn from(result: ReplaceTreatmentPlanResult) -> Self {
        Self {
            patient_id: result.patient_id,
            activities: result.activities,
            dropped_entries: result.dropped_entries,
            message: format!("Treatment plan updated for patient {}", result.patient_id),
        }
    }
}
