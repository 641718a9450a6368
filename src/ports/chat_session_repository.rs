//! Chat session repository port.

use async_trait::async_trait;

use super::Mutation;
use crate::domain::checkin::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, PatientId};

/// Repository port for check-in chat sessions.
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Save a new session.
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: ChatSessionId) -> Result<Option<ChatSession>, DomainError>;

    /// Find all sessions for a patient.
    ///
    /// Returns sessions ordered by created_at descending.
    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<ChatSession>, DomainError>;

    /// Apply `mutation` to the stored session under the store's write lock.
    ///
    /// Returns `false` without running the mutation if the session is unknown.
    async fn update(
        &self,
        id: ChatSessionId,
        mutation: Mutation<ChatSession>,
    ) -> Result<bool, DomainError>;
}
