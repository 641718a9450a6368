//! Intake session repository port.

use async_trait::async_trait;

use super::Mutation;
use crate::domain::foundation::{DomainError, IntakeSessionId};
use crate::domain::intake::IntakeSession;

/// Repository port for intake sessions.
#[async_trait]
pub trait IntakeSessionRepository: Send + Sync {
    /// Save a new session.
    async fn save(&self, session: &IntakeSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: IntakeSessionId) -> Result<Option<IntakeSession>, DomainError>;

    /// Apply `mutation` to the stored session under the store's write lock.
    ///
    /// Returns `false` without running the mutation if the session is unknown.
    async fn update(
        &self,
        id: IntakeSessionId,
        mutation: Mutation<IntakeSession>,
    ) -> Result<bool, DomainError>;
}
