//! HTTP handlers for intake, patient record and alert endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, domain_error_response};
use crate::application::{
    GetIntakeStateHandler, GetIntakeStateQuery, GetPatientRecordHandler, GetPatientRecordQuery,
    ListAlertsHandler, ListAlertsQuery, ReplyIntakeCommand, ReplyIntakeHandler,
    StartIntakeCommand, StartIntakeHandler,
};
use crate::domain::foundation::{IntakeSessionId, PatientId};
use crate::domain::intake::IntakeError;

use super::dto::{
    AlertListResponse, IntakeStateQuery, IntakeStateResponse, ListAlertsParams,
    ReplyIntakeRequest, ReplyIntakeResponse, StartIntakeResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IntakeHandlers {
    start_handler: Arc<StartIntakeHandler>,
    reply_handler: Arc<ReplyIntakeHandler>,
    state_handler: Arc<GetIntakeStateHandler>,
    record_handler: Arc<GetPatientRecordHandler>,
    alerts_handler: Arc<ListAlertsHandler>,
}

impl IntakeHandlers {
    pub fn new(
        start_handler: Arc<StartIntakeHandler>,
        reply_handler: Arc<ReplyIntakeHandler>,
        state_handler: Arc<GetIntakeStateHandler>,
        record_handler: Arc<GetPatientRecordHandler>,
        alerts_handler: Arc<ListAlertsHandler>,
    ) -> Self {
        Self {
            start_handler,
            reply_handler,
            state_handler,
            record_handler,
            alerts_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/patient/:patient_id/intake/start
pub async fn start_intake(
    State(handlers): State<IntakeHandlers>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    match handlers
        .start_handler
        .handle(StartIntakeCommand { patient_id })
        .await
    {
        Ok(result) => {
            let response: StartIntakeResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// POST /api/patient/:patient_id/intake/reply
pub async fn reply_intake(
    State(handlers): State<IntakeHandlers>,
    Path(patient_id): Path<String>,
    Json(req): Json<ReplyIntakeRequest>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };
    // A malformed id can never name a stored session.
    let session_id = match req.session_id.parse::<IntakeSessionId>() {
        Ok(id) => id,
        Err(_) => return handle_intake_error(IntakeError::SessionNotFound(req.session_id)),
    };

    let cmd = ReplyIntakeCommand {
        patient_id,
        session_id,
        message: req.message,
    };

    match handlers.reply_handler.handle(cmd).await {
        Ok(result) => {
            let response: ReplyIntakeResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/patient/:patient_id/intake/state?session_id=
pub async fn get_intake_state(
    State(handlers): State<IntakeHandlers>,
    Path(patient_id): Path<String>,
    Query(params): Query<IntakeStateQuery>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };
    let session_id = match params.session_id.parse::<IntakeSessionId>() {
        Ok(id) => id,
        Err(_) => return handle_intake_error(IntakeError::SessionNotFound(params.session_id)),
    };

    match handlers
        .state_handler
        .handle(GetIntakeStateQuery {
            patient_id,
            session_id,
        })
        .await
    {
        Ok(session) => {
            let response: IntakeStateResponse = session.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/patient/:patient_id/record
pub async fn get_patient_record(
    State(handlers): State<IntakeHandlers>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid patient ID"),
    };

    match handlers
        .record_handler
        .handle(GetPatientRecordQuery { patient_id })
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/alerts?patient_id=
pub async fn list_alerts(
    State(handlers): State<IntakeHandlers>,
    Query(params): Query<ListAlertsParams>,
) -> Response {
    let patient_id = match params.patient_id.as_deref().map(str::parse::<PatientId>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => return bad_request("Invalid patient ID"),
    };

    match handlers
        .alerts_handler
        .handle(ListAlertsQuery { patient_id })
        .await
    {
        Ok(alerts) => {
            let response: AlertListResponse = alerts.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_intake_error(error: IntakeError) -> Response {
    domain_error_response(error.code(), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_maps_to_404() {
        let response = handle_intake_error(IntakeError::SessionNotFound("abc".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn patient_not_found_maps_to_404() {
        let response = handle_intake_error(IntakeError::patient_not_found(PatientId::new(3)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_intake_error(IntakeError::infrastructure("disk full"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
