//! Application wiring: stores, handlers and the combined router.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::adapters::memory::{
    InMemoryAlertLog, InMemoryChatSessionRepository, InMemoryChatbotRepository,
    InMemoryIntakeSessionRepository, InMemoryPatientRepository,
};
use crate::application::{
    ChatHistoryHandler, ChatbotStatusHandler, EndChatHandler, GetIntakeStateHandler,
    GetPatientRecordHandler, InitializeChatbotHandler, ListAlertsHandler, ReplaceTreatmentPlanHandler,
    ReplyIntakeHandler, SendChatMessageHandler, StartChatHandler, StartIntakeHandler,
};
use crate::config::{AppConfig, MAX_HISTORY_LIMIT};
use crate::domain::checkin::ResponseClassifier;
use crate::domain::intake::Questionnaire;
use crate::ports::{
    AlertLog, ChatSessionRepository, ChatbotRepository, IntakeSessionRepository,
    PatientRepository,
};

use super::checkin::{checkin_routes, CheckinHandlers};
use super::intake::{intake_routes, IntakeHandlers};

const SERVICE_NAME: &str = "CuraLoop Care Assistant";

/// Store handles shared by every handler.
#[derive(Clone)]
pub struct Stores {
    pub patients: Arc<dyn PatientRepository>,
    pub intake_sessions: Arc<dyn IntakeSessionRepository>,
    pub chat_sessions: Arc<dyn ChatSessionRepository>,
    pub chatbots: Arc<dyn ChatbotRepository>,
    pub alerts: Arc<dyn AlertLog>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            patients: Arc::new(InMemoryPatientRepository::new()),
            intake_sessions: Arc::new(InMemoryIntakeSessionRepository::new()),
            chat_sessions: Arc::new(InMemoryChatSessionRepository::new()),
            chatbots: Arc::new(InMemoryChatbotRepository::new()),
            alerts: Arc::new(InMemoryAlertLog::new()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    questions: usize,
}

/// Builds the full API router over the given stores.
pub fn build_router(
    stores: Stores,
    questionnaire: Arc<Questionnaire>,
    classifier: Arc<ResponseClassifier>,
    config: &AppConfig,
) -> Router {
    let intake = IntakeHandlers::new(
        Arc::new(StartIntakeHandler::new(
            stores.intake_sessions.clone(),
            stores.patients.clone(),
            questionnaire.clone(),
            config.intake.default_timezone.clone(),
        )),
        Arc::new(ReplyIntakeHandler::new(
            stores.intake_sessions.clone(),
            stores.patients.clone(),
            stores.alerts.clone(),
            questionnaire.clone(),
        )),
        Arc::new(GetIntakeStateHandler::new(stores.intake_sessions.clone())),
        Arc::new(GetPatientRecordHandler::new(stores.patients.clone())),
        Arc::new(ListAlertsHandler::new(stores.alerts.clone())),
    );

    let checkin = CheckinHandlers::new(
        Arc::new(InitializeChatbotHandler::new(stores.chatbots.clone())),
        Arc::new(ChatbotStatusHandler::new(stores.chatbots.clone())),
        Arc::new(ReplaceTreatmentPlanHandler::new(stores.chatbots.clone())),
        Arc::new(StartChatHandler::new(
            stores.chat_sessions.clone(),
            stores.chatbots.clone(),
        )),
        Arc::new(SendChatMessageHandler::new(
            stores.chat_sessions.clone(),
            stores.chatbots.clone(),
            classifier,
        )),
        Arc::new(EndChatHandler::new(stores.chat_sessions.clone())),
        Arc::new(ChatHistoryHandler::new(
            stores.chat_sessions.clone(),
            config.checkin.history_limit,
            MAX_HISTORY_LIMIT,
        )),
    );

    let info = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .with_state(questionnaire);

    info.merge(intake_routes(intake))
        .merge(checkin_routes(checkin))
}

/// Router over fresh in-memory stores, classifying replies as configured.
pub fn in_memory_router(questionnaire: Questionnaire, config: &AppConfig) -> Router {
    build_router(
        Stores::in_memory(),
        Arc::new(questionnaire),
        Arc::new(ResponseClassifier::new(config.checkin.classifier.clone())),
        config,
    )
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// GET /
async fn service_info(State(questionnaire): State<Arc<Questionnaire>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        questions: questionnaire.total_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::QuestionCatalog;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let questionnaire = Questionnaire::new(QuestionCatalog::embedded().unwrap());
        in_memory_router(questionnaire, &AppConfig::default())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn root_reports_question_count() {
        let (status, body) = get_json(router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "CuraLoop Care Assistant");
        assert_eq!(body["questions"], 34);
    }

    #[tokio::test]
    async fn bad_patient_id_is_bad_request() {
        let (status, body) = get_json(router(), "/api/patient/abc/record").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unknown_patient_record_is_not_found() {
        let (status, body) = get_json(router(), "/api/patient/77/record").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PATIENT_NOT_FOUND");
    }
}
