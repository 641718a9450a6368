//! In-memory chat sessions.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checkin::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, PatientId};
use crate::ports::{ChatSessionRepository, Mutation};

#[derive(Debug, Clone, Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<RwLock<HashMap<ChatSessionId, ChatSession>>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ChatSessionId) -> Result<Option<ChatSession>, DomainError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn find_by_patient(&self, patient_id: PatientId) -> Result<Vec<ChatSession>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut found: Vec<ChatSession> = sessions
            .values()
            .filter(|s| s.patient_id() == patient_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| Reverse(s.created_at()));
        Ok(found)
    }

    async fn update(
        &self,
        id: ChatSessionId,
        mutation: Mutation<ChatSession>,
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
