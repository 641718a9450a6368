//! ChatHistoryHandler - Query handler for a patient's past check-ins.

use std::sync::Arc;

use crate::domain::checkin::{ChatSessionOverview, CheckinError};
use crate::domain::foundation::PatientId;
use crate::ports::ChatSessionRepository;

#[derive(Debug, Clone)]
pub struct ChatHistoryQuery {
    pub patient_id: PatientId,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatHistoryResult {
    pub patient_id: PatientId,
    /// All sessions on record, not just the returned page.
    pub total_sessions: usize,
    pub sessions: Vec<ChatSessionOverview>,
}

pub struct ChatHistoryHandler {
    sessions: Arc<dyn ChatSessionRepository>,
    default_limit: usize,
    max_limit: usize,
}

impl ChatHistoryHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>, default_limit: usize, max_limit: usize) -> Self {
        Self {
            sessions,
            default_limit,
            max_limit,
        }
    }

    /// Newest sessions first.
    pub async fn handle(&self, query: ChatHistoryQuery) -> Result<ChatHistoryResult, CheckinError> {
        let sessions = self.sessions.find_by_patient(query.patient_id).await?;
        let limit = query.limit.unwrap_or(self.default_limit).min(self.max_limit);

        Ok(ChatHistoryResult {
            patient_id: query.patient_id,
            total_sessions: sessions.len(),
            sessions: sessions.iter().take(limit).map(|s| s.overview()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::checkin::{ChatSession, ChatType};
    use crate::domain::foundation::ChatSessionId;
    use std::time::Duration;

    async fn seed(repo: &InMemoryChatSessionRepository, patient: u64, count: usize) -> Vec<ChatSessionId> {
        let mut ids = Vec::new();
        for _ in 0..count {
            let session =
                ChatSession::new(ChatSessionId::new(), PatientId::new(patient), ChatType::DailyCheckIn);
            repo.save(&session).await.unwrap();
            ids.push(session.id());
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        ids
    }

    #[tokio::test]
    async fn newest_first_with_limit() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let ids = seed(&repo, 1, 3).await;
        seed(&repo, 2, 1).await;
        let handler = ChatHistoryHandler::new(repo, 10, 100);

        let result = handler
            .handle(ChatHistoryQuery { patient_id: PatientId::new(1), limit: Some(2) })
            .await
            .unwrap();

        assert_eq!(result.total_sessions, 3);
        let returned: Vec<_> = result.sessions.iter().map(|s| s.session_id).collect();
        assert_eq!(returned, vec![ids[2], ids[1]]);
    }

    #[tokio::test]
    async fn limit_is_capped() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        seed(&repo, 1, 3).await;
        let handler = ChatHistoryHandler::new(repo, 10, 2);

        let result = handler
            .handle(ChatHistoryQuery { patient_id: PatientId::new(1), limit: Some(50) })
            .await
            .unwrap();

        assert_eq!(result.sessions.len(), 2);
    }

    #[tokio::test]
    async fn no_sessions_is_empty_history() {
        let handler = ChatHistoryHandler::new(Arc::new(InMemoryChatSessionRepository::new()), 10, 100);

        let result = handler
            .handle(ChatHistoryQuery { patient_id: PatientId::new(1), limit: None })
            .await
            .unwrap();

        assert_eq!(result.total_sessions, 0);
        assert!(result.sessions.is_empty());
    }
}
