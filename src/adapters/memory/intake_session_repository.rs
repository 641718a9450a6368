//! In-memory intake sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, IntakeSessionId};
use crate::domain::intake::IntakeSession;
use crate::ports::{IntakeSessionRepository, Mutation};

#[derive(Debug, Clone, Default)]
pub struct InMemoryIntakeSessionRepository {
    sessions: Arc<RwLock<HashMap<IntakeSessionId, IntakeSession>>>,
}

impl InMemoryIntakeSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl IntakeSessionRepository for InMemoryIntakeSessionRepository {
    async fn save(&self, session: &IntakeSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: IntakeSessionId) -> Result<Option<IntakeSession>, DomainError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        id: IntakeSessionId,
        mutation: Mutation<IntakeSession>,
    ) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                mutation(session);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
