//! Check-in error types.

use thiserror::Error;

use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, PatientId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckinError {
    #[error("No chatbot configured for patient {0}. Please initialize first.")]
    ChatbotNotFound(PatientId),

    #[error("Chat session not found: {0}")]
    SessionNotFound(String),

    #[error("Chat session {0} has already ended")]
    SessionCompleted(ChatSessionId),

    #[error("Invalid treatment plan: {0}")]
    InvalidPlan(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CheckinError {
    pub fn chatbot_not_found(patient_id: PatientId) -> Self {
        CheckinError::ChatbotNotFound(patient_id)
    }

    pub fn session_not_found(id: ChatSessionId) -> Self {
        CheckinError::SessionNotFound(id.to_string())
    }

    pub fn session_completed(id: ChatSessionId) -> Self {
        CheckinError::SessionCompleted(id)
    }

    pub fn invalid_plan(reason: impl Into<String>) -> Self {
        CheckinError::InvalidPlan(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CheckinError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CheckinError::ChatbotNotFound(_) => ErrorCode::ChatbotNotFound,
            CheckinError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            CheckinError::SessionCompleted(_) => ErrorCode::SessionCompleted,
            CheckinError::InvalidPlan(_) => ErrorCode::ValidationFailed,
            CheckinError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for CheckinError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => CheckinError::SessionNotFound(err.message),
            ErrorCode::ValidationFailed => CheckinError::InvalidPlan(err.message),
            _ => CheckinError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        let id = ChatSessionId::new();
        assert_eq!(
            CheckinError::chatbot_not_found(PatientId::new(1)).code(),
            ErrorCode::ChatbotNotFound
        );
        assert_eq!(CheckinError::session_not_found(id).code(), ErrorCode::SessionNotFound);
        assert_eq!(CheckinError::session_completed(id).code(), ErrorCode::SessionCompleted);
        assert_eq!(CheckinError::invalid_plan("x").code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn chatbot_not_found_message_names_patient() {
        let err = CheckinError::chatbot_not_found(PatientId::new(42));
        assert_eq!(
            err.to_string(),
            "No chatbot configured for patient 42. Please initialize first."
        );
    }

    #[test]
    fn storage_faults_become_infrastructure_errors() {
        let err: CheckinError = DomainError::storage("gone").into();
        assert_eq!(err.code(), ErrorCode::StorageError);
    }
}
