//! Check-in command and query handlers.

mod chat_history;
mod chatbot_status;
mod end_chat;
mod initialize_chatbot;
mod replace_treatment_plan;
mod send_chat_message;
mod start_chat;

pub use chat_history::{ChatHistoryHandler, ChatHistoryQuery, ChatHistoryResult};
pub use chatbot_status::{ChatbotStatusHandler, ChatbotStatusQuery, ChatbotStatusView};
pub use end_chat::{EndChatCommand, EndChatHandler, EndChatResult};
pub use initialize_chatbot::{
    InitializeChatbotCommand, InitializeChatbotHandler, InitializeChatbotResult,
};
pub use replace_treatment_plan::{
    ReplaceTreatmentPlanCommand, ReplaceTreatmentPlanHandler, ReplaceTreatmentPlanResult,
};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult};
pub use start_chat::{StartChatCommand, StartChatHandler, StartChatResult};

use tracing::warn;

use crate::domain::checkin::IngestIssue;
use crate::domain::foundation::PatientId;

fn log_ingest_issues(patient_id: PatientId, issues: &[IngestIssue]) {
    for issue in issues {
        warn!(
            patient_id = %patient_id,
            category = %issue.category,
            index = ?issue.index,
            reason = %issue.reason,
            "Dropped malformed treatment config entry"
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{json, Value};

    pub fn plan() -> Value {
        json!({
            "medical_management": ["Take donepezil 5mg daily"],
            "lifestyle_interventions": ["Walk 20 minutes"]
        })
    }

    pub fn config() -> Value {
        json!({
            "conversation_flows": {
                "daily_check_in": {
                    "purpose": "Daily adherence check",
                    "duration": "5 minutes",
                    "topics": ["Medication", "Exercise"],
                    "prompts": ["Good morning! Ready for today's check-in?"]
                }
            },
            "treatment_execution": {
                "medical_management": [
                    {
                        "id": "med_1",
                        "title": "taking your medication",
                        "type": "medication",
                        "frequency": "daily",
                        "chat_prompts": ["Did you take your medication today?", "What time?"],
                        "follow_up_questions": ["Any side effects?"]
                    }
                ],
                "lifestyle_interventions": [
                    {"id": "walk_1", "title": "your walk", "type": "physical_activity"},
                    {"id": "sleep_1", "title": "your sleep routine", "type": "sleep"}
                ],
                "intensity": "high"
            },
            "monitoring_schedule": {"daily": ["mood", "medication"]},
            "treatment_goals": ["Maintain independence"]
        })
    }
}
