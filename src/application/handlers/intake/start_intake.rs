//! StartIntakeHandler - Command handler for opening an intake session.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{IntakeSessionId, PatientId};
use crate::domain::intake::{IntakeError, IntakeSession, Questionnaire};
use crate::ports::{IntakeSessionRepository, PatientRepository};

/// Command to start an intake for a patient.
#[derive(Debug, Clone)]
pub struct StartIntakeCommand {
    pub patient_id: PatientId,
}

/// Result of opening an intake session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartIntakeResult {
    pub session_id: IntakeSessionId,
    pub patient_id: PatientId,
    pub greeting: String,
    pub prompt: String,
    pub step_index: usize,
    pub total_steps: usize,
}

/// Handler for starting intake sessions.
///
/// Registers the patient on first contact.
pub struct StartIntakeHandler {
    sessions: Arc<dyn IntakeSessionRepository>,
    patients: Arc<dyn PatientRepository>,
    questionnaire: Arc<Questionnaire>,
    default_timezone: String,
}

impl StartIntakeHandler {
    pub fn new(
        sessions: Arc<dyn IntakeSessionRepository>,
        patients: Arc<dyn PatientRepository>,
        questionnaire: Arc<Questionnaire>,
        default_timezone: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            patients,
            questionnaire,
            default_timezone: default_timezone.into(),
        }
    }

    pub async fn handle(&self, cmd: StartIntakeCommand) -> Result<StartIntakeResult, IntakeError> {
        self.patients
            .get_or_create(cmd.patient_id, &self.default_timezone)
            .await?;

        let session = IntakeSession::new(IntakeSessionId::new(), cmd.patient_id);
        self.sessions.save(&session).await?;

        info!(
            patient_id = %cmd.patient_id,
            session_id = %session.id(),
            total_steps = self.questionnaire.total_steps(),
            "Intake session started"
        );

        Ok(StartIntakeResult {
            session_id: session.id(),
            patient_id: cmd.patient_id,
            greeting: self.questionnaire.greeting().to_string(),
            prompt: self
                .questionnaire
                .question(0)
                .map(|q| q.prompt.clone())
                .unwrap_or_default(),
            step_index: 0,
            total_steps: self.questionnaire.total_steps(),
        })
    }
}
