//! ReplyIntakeHandler - Command handler for answering the current question.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::foundation::{IntakeSessionId, PatientId, Timestamp};
use crate::domain::intake::{Answers, IntakeError, IntakeSession, IntakeSummary, Questionnaire};
use crate::domain::patient::{Alert, AlertDraft, PatientRecord};
use crate::ports::{capture, AlertLog, IntakeSessionRepository, PatientRepository};

/// Command carrying one patient reply.
#[derive(Debug, Clone)]
pub struct ReplyIntakeCommand {
    pub patient_id: PatientId,
    pub session_id: IntakeSessionId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyIntakeResult {
    pub session_id: IntakeSessionId,
    pub patient_id: PatientId,
    pub saved: Answers,
    pub next_prompt: Option<String>,
    pub step_index: usize,
    pub total_steps: usize,
    pub finished: bool,
    pub summary: Option<IntakeSummary>,
    /// Alert raised by this reply, when it completed a worrying intake.
    pub alert: Option<Alert>,
}

/// Handler for intake replies.
///
/// The reply is applied under the session store's write guard. The reply
/// that completes the bank also updates the patient record and may log an
/// alert; those writes happen after the session commit.
pub struct ReplyIntakeHandler {
    sessions: Arc<dyn IntakeSessionRepository>,
    patients: Arc<dyn PatientRepository>,
    alerts: Arc<dyn AlertLog>,
    questionnaire: Arc<Questionnaire>,
}

impl ReplyIntakeHandler {
    pub fn new(
        sessions: Arc<dyn IntakeSessionRepository>,
        patients: Arc<dyn PatientRepository>,
        alerts: Arc<dyn AlertLog>,
        questionnaire: Arc<Questionnaire>,
    ) -> Self {
        Self {
            sessions,
            patients,
            alerts,
            questionnaire,
        }
    }

    pub async fn handle(&self, cmd: ReplyIntakeCommand) -> Result<ReplyIntakeResult, IntakeError> {
        // Sessions never change owner, so checking before the update is enough.
        let owned = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .is_some_and(|s| s.belongs_to(cmd.patient_id));
        if !owned {
            return Err(IntakeError::session_not_found(cmd.session_id));
        }

        let questionnaire = Arc::clone(&self.questionnaire);
        let message = cmd.message;
        let (mutation, reply) = capture(move |session: &mut IntakeSession| {
            session.apply_reply(&questionnaire, &message)
        });

        if !self.sessions.update(cmd.session_id, mutation).await? {
            return Err(IntakeError::session_not_found(cmd.session_id));
        }
        let reply = reply
            .await
            .map_err(|_| IntakeError::infrastructure("intake update did not run"))?;

        debug!(
            session_id = %cmd.session_id,
            step_index = reply.step_index,
            saved = !reply.saved.is_empty(),
            "Intake reply applied"
        );

        let mut alert = None;
        if reply.just_finished {
            if let Some(summary) = &reply.summary {
                alert = self.finalize(cmd.patient_id, cmd.session_id, summary).await?;
            }
        }

        Ok(ReplyIntakeResult {
            session_id: cmd.session_id,
            patient_id: cmd.patient_id,
            saved: reply.saved,
            next_prompt: reply.next_prompt,
            step_index: reply.step_index,
            total_steps: reply.total_steps,
            finished: reply.finished,
            summary: reply.summary,
            alert,
        })
    }

    async fn finalize(
        &self,
        patient_id: PatientId,
        session_id: IntakeSessionId,
        summary: &IntakeSummary,
    ) -> Result<Option<Alert>, IntakeError> {
        let at = Timestamp::now();
        let snapshot = summary.clone();
        let recorded = self
            .patients
            .update(
                patient_id,
                Box::new(move |record: &mut PatientRecord| record.record_intake(&snapshot, at)),
            )
            .await?;
        if !recorded {
            return Err(IntakeError::patient_not_found(patient_id));
        }

        info!(
            patient_id = %patient_id,
            session_id = %session_id,
            severity = %summary.severity.label,
            severity_score = summary.severity.score,
            "Intake completed"
        );

        let Some(draft) = AlertDraft::from_intake(patient_id, summary, at) else {
            return Ok(None);
        };

        let alert = self.alerts.append(draft).await?;
        warn!(
            patient_id = %patient_id,
            alert_id = %alert.id,
            level = ?alert.level,
            "Intake alert raised"
        );
        Ok(Some(alert))
    }
}
