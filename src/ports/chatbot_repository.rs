//! Treatment chatbot repository port.

use async_trait::async_trait;

use super::Mutation;
use crate::domain::checkin::PatientChatbot;
use crate::domain::foundation::{DomainError, PatientId};

/// Repository port for treatment chatbots, keyed by patient.
#[async_trait]
pub trait ChatbotRepository: Send + Sync {
    /// Store the patient's chatbot, replacing any previous one.
    async fn save(&self, chatbot: &PatientChatbot) -> Result<(), DomainError>;

    /// Find the chatbot configured for a patient.
    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<PatientChatbot>, DomainError>;

    /// Apply `mutation` to the patient's chatbot under the store's write lock.
    ///
    /// Returns `false` without running the mutation if none is configured.
    async fn update(
        &self,
        patient_id: PatientId,
        mutation: Mutation<PatientChatbot>,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatbot_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ChatbotRepository) {}
    }
}
