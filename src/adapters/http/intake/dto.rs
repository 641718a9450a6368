//! Request and response bodies for intake endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{ReplyIntakeResult, StartIntakeResult};
use crate::domain::foundation::{IntakeSessionId, PatientId, Timestamp};
use crate::domain::intake::{Answers, IntakeSession, IntakeSummary};
use crate::domain::patient::Alert;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartIntakeResponse {
    pub session_id: IntakeSessionId,
    pub patient_id: PatientId,
    pub greeting: String,
    pub prompt: String,
    pub step_index: usize,
    pub total_steps: usize,
}

impl From<StartIntakeResult> for StartIntakeResponse {
    fn from(result: StartIntakeResult) -> Self {
        Self {
            session_id: result.session_id,
            patient_id: result.patient_id,
            greeting: result.greeting,
            prompt: result.prompt,
            step_index: result.step_index,
            total_steps: result.total_steps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyIntakeRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyIntakeResponse {
    pub session_id: IntakeSessionId,
    pub patient_id: PatientId,
    pub saved: Answers,
    pub next_prompt: Option<String>,
    pub step_index: usize,
    pub total_steps: usize,
    pub finished: bool,
    pub summary: Option<IntakeSummary>,
}

impl From<ReplyIntakeResult> for ReplyIntakeResponse {
    fn from(result: ReplyIntakeResult) -> Self {
        Self {
            session_id: result.session_id,
            patient_id: result.patient_id,
            saved: result.saved,
            next_prompt: result.next_prompt,
            step_index: result.step_index,
            total_steps: result.total_steps,
            finished: result.finished,
            summary: result.summary,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeStateQuery {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeStateResponse {
    pub patient_id: PatientId,
    pub created_at: Timestamp,
    pub answers: Answers,
    pub step_index: usize,
    pub finished: bool,
    pub summary: Option<IntakeSummary>,
}

impl From<IntakeSession> for IntakeStateResponse {
    fn from(session: IntakeSession) -> Self {
        Self {
            patient_id: session.patient_id(),
            created_at: session.created_at(),
            answers: session.answers().clone(),
            step_index: session.step_index(),
            finished: session.is_finished(),
            summary: session.summary().cloned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAlertsParams {
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertListResponse {
    pub total: usize,
    pub alerts: Vec<Alert>,
}

impl From<Vec<Alert>> for AlertListResponse {
    fn from(alerts: Vec<Alert>) -> Self {
        Self {
            total: alerts.len(),
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::FieldValue;

    #[test]
    fn state_response_reads_session() {
        let session = IntakeSession::new(IntakeSessionId::new(), PatientId::new(2));
        let response = IntakeStateResponse::from(session.clone());

        assert_eq!(response.patient_id, PatientId::new(2));
        assert_eq!(response.created_at, session.created_at());
        assert!(!response.finished);
        assert!(response.summary.is_none());
    }

    #[test]
    fn reply_response_serializes_saved_as_map() {
        let mut saved = Answers::new();
        saved.insert("Age", Some(FieldValue::Number(75.0)));
        let response = ReplyIntakeResponse {
            session_id: IntakeSessionId::new(),
            patient_id: PatientId::new(2),
            saved,
            next_prompt: Some("Next?".to_string()),
            step_index: 1,
            total_steps: 34,
            finished: false,
            summary: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["saved"]["Age"], serde_json::json!(75.0));
        assert_eq!(json["patient_id"], serde_json::json!(2));
        assert!(json["summary"].is_null());
    }
}
