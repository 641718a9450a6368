//! HTTP routes for chatbot and check-in endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    chat_history, chatbot_status, end_chat, initialize_chatbot, replace_treatment_plan,
    send_chat_message, start_chat, CheckinHandlers,
};

/// Creates the check-in router with all endpoints.
pub fn checkin_routes(handlers: CheckinHandlers) -> Router {
    Router::new()
        .route(
            "/api/patient/:patient_id/chatbot/initialize",
            post(initialize_chatbot),
        )
        .route("/api/patient/:patient_id/chatbot/status", get(chatbot_status))
        .route("/api/patient/:patient_id/chatbot/plan", put(replace_treatment_plan))
        .route("/api/patient/:patient_id/chat/start", post(start_chat))
        .route("/api/patient/:patient_id/chat/history", get(chat_history))
        .route("/api/patient/chat/message", post(send_chat_message))
        .route("/api/patient/chat/end", post(end_chat))
        .with_state(handlers)
}
