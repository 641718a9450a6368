//! HTTP routes for intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_intake_state, get_patient_record, list_alerts, reply_intake, start_intake,
    IntakeHandlers,
};

/// Creates the intake router: intake sessions, patient records and alerts.
pub fn intake_routes(handlers: IntakeHandlers) -> Router {
    Router::new()
        .route("/api/patient/:patient_id/intake/start", post(start_intake))
        .route("/api/patient/:patient_id/intake/reply", post(reply_intake))
        .route("/api/patient/:patient_id/intake/state", get(get_intake_state))
        .route("/api/patient/:patient_id/record", get(get_patient_record))
        .route("/api/alerts", get(list_alerts))
        .with_state(handlers)
}
