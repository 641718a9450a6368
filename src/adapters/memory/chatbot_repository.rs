//! In-memory treatment chatbots, one per patient.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checkin::PatientChatbot;
use crate::domain::foundation::{DomainError, PatientId};
use crate::ports::{ChatbotRepository, Mutation};

#[derive(Debug, Clone, Default)]
pub struct InMemoryChatbotRepository {
    chatbots: Arc<RwLock<HashMap<PatientId, PatientChatbot>>>,
}

impl InMemoryChatbotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatbotRepository for InMemoryChatbotRepository {
    async fn save(&self, chatbot: &PatientChatbot) -> Result<(), DomainError> {
        self.chatbots
            .write()
            .await
            .insert(chatbot.patient_id(), chatbot.clone());
        Ok(())
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<PatientChatbot>, DomainError> {
        Ok(self.chatbots.read().await.get(&patient_id).cloned())
    }

    async fn update(
        &self,
        patient_id: PatientId,
        mutation: Mutation<PatientChatbot>,
    ) -> Result<bool, DomainError> {
        let mut chatbots = self.chatbots.write().await;
        match chatbots.get_mut(&patient_id) {
            Some(chatbot) => {
                mutation(chatbot);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ChatbotId;
    use serde_json::json;

    fn chatbot(patient: u64) -> PatientChatbot {
        let (chatbot, _) = PatientChatbot::initialize(
            ChatbotId::new(),
            PatientId::new(patient),
            json!({}),
            json!({}),
            json!({}),
        )
        .unwrap();
        chatbot
    }

    #[tokio::test]
    async fn save_replaces_previous_chatbot() {
        let repo = InMemoryChatbotRepository::new();
        let first = chatbot(1);
        let second = chatbot(1);

        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let stored = repo.find_by_patient(PatientId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.id(), second.id());
    }

    #[tokio::test]
    async fn update_records_completion() {
        let repo = InMemoryChatbotRepository::new();
        repo.save(&chatbot(1)).await.unwrap();

        let updated = repo
            .update(
                PatientId::new(1),
                Box::new(|c: &mut PatientChatbot| c.record_completion()),
            )
            .await
            .unwrap();

        assert!(updated);
        let stored = repo.find_by_patient(PatientId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.completed_activities(), 1);
    }

    #[tokio::test]
    async fn missing_chatbot() {
        let repo = InMemoryChatbotRepository::new();
        assert!(repo.find_by_patient(PatientId::new(3)).await.unwrap().is_none());
        assert!(!repo
            .update(PatientId::new(3), Box::new(|c: &mut PatientChatbot| c.record_completion()))
            .await
            .unwrap());
    }
}
