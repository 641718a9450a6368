//! EndChatHandler - Command handler for closing a check-in session.

use std::sync::Arc;
use tracing::info;

use crate::domain::checkin::{ChatSession, CheckinError, Interaction, SessionMetrics, SessionSummary};
use crate::domain::foundation::{ChatSessionId, PatientId};
use crate::ports::{capture, ChatSessionRepository};

#[derive(Debug, Clone)]
pub struct EndChatCommand {
    pub session_id: ChatSessionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndChatResult {
    pub session_id: ChatSessionId,
    pub patient_id: PatientId,
    pub summary: SessionSummary,
    pub interactions: Vec<Interaction>,
    /// Titles of completed activities, in completion order.
    pub completed_activities: Vec<String>,
    pub metrics: SessionMetrics,
}

/// Handler for ending check-ins. Ending twice returns the stored summary.
pub struct EndChatHandler {
    sessions: Arc<dyn ChatSessionRepository>,
}

impl EndChatHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: EndChatCommand) -> Result<EndChatResult, CheckinError> {
        let (mutation, outcome) = capture(|session: &mut ChatSession| {
            let summary = session.end();
            let titles = session
                .completed_activities()
                .iter()
                .map(|a| a.activity_title.clone())
                .collect::<Vec<_>>();
            (session.patient_id(), summary, session.interactions().to_vec(), titles)
        });

        if !self.sessions.update(cmd.session_id, mutation).await? {
            return Err(CheckinError::session_not_found(cmd.session_id));
        }
        let (patient_id, summary, interactions, completed_activities) = outcome
            .await
            .map_err(|_| CheckinError::infrastructure("chat update did not run"))?;

        info!(
            patient_id = %patient_id,
            session_id = %cmd.session_id,
            interactions = summary.total_interactions,
            completed = summary.total_activities,
            engagement = ?summary.overall_engagement,
            "Chat session ended"
        );

        Ok(EndChatResult {
            session_id: cmd.session_id,
            patient_id,
            metrics: summary.metrics(),
            summary,
            interactions,
            completed_activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::checkin::{
        ActivityItem, ActivityKind, ChatType, ResponseClassifier, SentimentTally,
    };
    use crate::domain::foundation::{ChatSessionStatus, ErrorCode};

    async fn session_with_replies(
        sessions: &InMemoryChatSessionRepository,
        replies: &[&str],
    ) -> ChatSessionId {
        let activities = vec![
            ActivityItem::new("med_1", "Take donepezil", ActivityKind::Medication),
            ActivityItem::new("walk_1", "Morning walk", ActivityKind::PhysicalActivity),
            ActivityItem::new("sleep_1", "Bedtime routine", ActivityKind::Sleep),
        ];
        let classifier = ResponseClassifier::default();
        let mut session = ChatSession::new(ChatSessionId::new(), PatientId::new(6), ChatType::DailyCheckIn);
        for reply in replies {
            session.send_message(&activities, &classifier, reply).unwrap();
        }
        sessions.save(&session).await.unwrap();
        session.id()
    }

    #[tokio::test]
    async fn summarizes_two_positive_one_negative() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let id = session_with_replies(&sessions, &["yes", "great", "no I could not"]).await;
        let handler = EndChatHandler::new(sessions.clone());

        let result = handler.handle(EndChatCommand { session_id: id }).await.unwrap();

        assert_eq!(result.patient_id, PatientId::new(6));
        assert_eq!(
            result.summary.sentiment_summary,
            SentimentTally { positive: 2, negative: 1, neutral: 0 }
        );
        assert_eq!(result.completed_activities, vec!["Take donepezil", "Morning walk"]);
        assert_eq!(result.interactions.len(), 3);
        assert_eq!(result.metrics.total_activities_completed, 2);
        assert!(result
            .summary
            .recommendations
            .contains(&"Focus on fewer activities per session".to_string()));

        let stored = sessions.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), ChatSessionStatus::Completed);
    }

    #[tokio::test]
    async fn ending_twice_returns_identical_summary() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let id = session_with_replies(&sessions, &["yes"]).await;
        let handler = EndChatHandler::new(sessions);

        let first = handler.handle(EndChatCommand { session_id: id }).await.unwrap();
        let second = handler.handle(EndChatCommand { session_id: id }).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = EndChatHandler::new(Arc::new(InMemoryChatSessionRepository::new()));

        let err = handler
            .handle(EndChatCommand { session_id: ChatSessionId::new() })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }
}
