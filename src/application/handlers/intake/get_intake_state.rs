//! GetIntakeStateHandler - Query handler for an intake session's progress.

use std::sync::Arc;

use crate::domain::foundation::{IntakeSessionId, PatientId};
use crate::domain::intake::{IntakeError, IntakeSession};
use crate::ports::IntakeSessionRepository;

#[derive(Debug, Clone)]
pub struct GetIntakeStateQuery {
    pub patient_id: PatientId,
    pub session_id: IntakeSessionId,
}

/// Read-only view of a session. A session owned by another patient is
/// reported as not found.
pub struct GetIntakeStateHandler {
    sessions: Arc<dyn IntakeSessionRepository>,
}

impl GetIntakeStateHandler {
    pub fn new(sessions: Arc<dyn IntakeSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetIntakeStateQuery) -> Result<IntakeSession, IntakeError> {
        self.sessions
            .find_by_id(query.session_id)
            .await?
            .filter(|session| session.belongs_to(query.patient_id))
            .ok_or_else(|| IntakeError::session_not_found(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIntakeSessionRepository;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn returns_owned_session() {
        let sessions = Arc::new(InMemoryIntakeSessionRepository::new());
        let session = IntakeSession::new(IntakeSessionId::new(), PatientId::new(4));
        sessions.save(&session).await.unwrap();
        let handler = GetIntakeStateHandler::new(sessions);

        let found = handler
            .handle(GetIntakeStateQuery {
                patient_id: PatientId::new(4),
                session_id: session.id(),
            })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn patient_mismatch_is_not_found() {
        let sessions = Arc::new(InMemoryIntakeSessionRepository::new());
        let session = IntakeSession::new(IntakeSessionId::new(), PatientId::new(4));
        sessions.save(&session).await.unwrap();
        let handler = GetIntakeStateHandler::new(sessions);

        let err = handler
            .handle(GetIntakeStateQuery {
                patient_id: PatientId::new(5),
                session_id: session.id(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }
}
