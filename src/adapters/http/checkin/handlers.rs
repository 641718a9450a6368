//! HTTP handlers for chatbot and check-in endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, domain_error_response};
use crate::application::{
    ChatHistoryHandler, ChatHistoryQuery, ChatbotStatusHandler, ChatbotStatusQuery,
    EndChatCommand, EndChatHandler, InitializeChatbotCommand, InitializeChatbotHandler,
    ReplaceTreatmentPlanCommand, ReplaceTreatmentPlanHandler, SendChatMessageCommand,
    SendChatMessageHandler, StartChatCommand, StartChatHandler,
};
use crate::domain::checkin::CheckinError;
use crate::domain::foundation::{ChatSessionId, PatientId};

use super::dto::{
    ChatHistoryParams, ChatHistoryResponse, ChatMessageRequest, ChatMessageResponse,
    ChatbotStatusResponse, EndChatRequest, EndChatResponse, InitializeChatbotRequest,
    InitializeChatbotResponse, ReplacePlanRequest, ReplacePlanResponse, StartChatRequest,
    StartChatResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CheckinHandlers {
    initialize_handler: Arc<InitializeChatbotHandler>,
    status_handler: Arc<ChatbotStatusHandler>,
    replace_plan_handler: Arc<ReplaceTreatmentPlanHandler>,
    start_handler: Arc<StartChatHandler>,
    message_handler: Arc<SendChatMessageHandler>,
    end_handler: Arc<EndChatHandler>,
    history_handler: Arc<ChatHistoryHandler>,
}

impl CheckinHandlers {
    pub fn new(
        initialize_handler: Arc<InitializeChatbotHandler>,
        status_handler: Arc<ChatbotStatusHandler>,
        replace_plan_handler: Arc<ReplaceTreatmentPlanHandler>,
        start_handler: Arc<StartChatHandler>,
        message_handler: Arc<SendChatMessageHandler>,
        end_handler: Arc<EndChatHandler>,
        history_handler: Arc<ChatHistoryHandler>,
    ) -> Self {
        Self {
            initialize_handler,
            status_handler,
            replace_plan_handler,
            start_handler,
            message_handler,
            end_handler,
            history_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/patient/:patient_id/chatbot/initialize
pub async fn initialize_chatbot(
    State(handlers): State<CheckinHandlers>,
    Path(patient_id): Path<String>,
    Json(req): Json<InitializeChatbotRequest>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    let cmd = InitializeChatbotCommand {
        patient_id,
        patient_portfolio: req.patient_portfolio,
        treatment_plan: req.treatment_plan,
        chatbot_config: req.chatbot_config,
    };

    match handlers.initialize_handler.handle(cmd).await {
        Ok(result) => {
            let response: InitializeChatbotResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// GET /api/patient/:patient_id/chatbot/status
pub async fn chatbot_status(
    State(handlers): State<CheckinHandlers>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    match handlers
        .status_handler
        .handle(ChatbotStatusQuery { patient_id })
        .await
    {
        Ok(view) => {
            let response: ChatbotStatusResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// PUT /api/patient/:patient_id/chatbot/plan - Clinician review update
pub async fn replace_treatment_plan(
    State(handlers): State<CheckinHandlers>,
    Path(patient_id): Path<String>,
    Json(req): Json<ReplacePlanRequest>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    let cmd = ReplaceTreatmentPlanCommand {
        patient_id,
        treatment_plan: req.treatment_plan,
        treatment_execution: req.treatment_execution,
        chatbot_config: req.chatbot_config,
    };

    match handlers.replace_plan_handler.handle(cmd).await {
        Ok(result) => {
            let response: ReplacePlanResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// POST /api/patient/:patient_id/chat/start
///
/// The body is optional; without one a daily check-in starts.
pub async fn start_chat(
    State(handlers): State<CheckinHandlers>,
    Path(patient_id): Path<String>,
    body: Option<Json<StartChatRequest>>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };
    let chat_type = body
        .and_then(|Json(req)| req.chat_type)
        .unwrap_or_default();

    match handlers
        .start_handler
        .handle(StartChatCommand {
            patient_id,
            chat_type,
        })
        .await
    {
        Ok(result) => {
            let response: StartChatResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// POST /api/patient/chat/message
pub async fn send_chat_message(
    State(handlers): State<CheckinHandlers>,
    Json(req): Json<ChatMessageRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<ChatSessionId>() {
        Ok(id) => id,
        Err(_) => return handle_checkin_error(CheckinError::SessionNotFound(req.session_id)),
    };

    let cmd = SendChatMessageCommand {
        session_id,
        message: req.patient_message,
    };

    match handlers.message_handler.handle(cmd).await {
        Ok(result) => {
            let response: ChatMessageResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// POST /api/patient/chat/end
pub async fn end_chat(
    State(handlers): State<CheckinHandlers>,
    Json(req): Json<EndChatRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<ChatSessionId>() {
        Ok(id) => id,
        Err(_) => return handle_checkin_error(CheckinError::SessionNotFound(req.session_id)),
    };

    match handlers.end_handler.handle(EndChatCommand { session_id }).await {
        Ok(result) => {
            let response: EndChatResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

/// GET /api/patient/:patient_id/chat/history?limit=
pub async fn chat_history(
    State(handlers): State<CheckinHandlers>,
    Path(patient_id): Path<String>,
    Query(params): Query<ChatHistoryParams>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    match handlers
        .history_handler
        .handle(ChatHistoryQuery {
            patient_id,
            limit: params.limit,
        })
        .await
    {
        Ok(result) => {
            let response: ChatHistoryResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_checkin_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_checkin_error(error: CheckinError) -> Response {
    domain_error_response(error.code(), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatbot_not_found_maps_to_404() {
        let response = handle_checkin_error(CheckinError::chatbot_not_found(PatientId::new(1)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn completed_session_maps_to_409() {
        let response = handle_checkin_error(CheckinError::session_completed(ChatSessionId::new()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_plan_maps_to_400() {
        let response = handle_checkin_error(CheckinError::invalid_plan("not an object"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
