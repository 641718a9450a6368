//! Intake-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, IntakeSessionId, PatientId};

/// Errors surfaced by intake operations.
///
/// Parse failures are not errors: they become re-prompts or absent answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// Unknown session, or a session owned by a different patient.
    #[error("Intake session not found: {0}")]
    SessionNotFound(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl IntakeError {
    pub fn session_not_found(id: IntakeSessionId) -> Self {
        IntakeError::SessionNotFound(id.to_string())
    }

    pub fn patient_not_found(id: PatientId) -> Self {
        IntakeError::PatientNotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        IntakeError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            IntakeError::PatientNotFound(_) => ErrorCode::PatientNotFound,
            IntakeError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for IntakeError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => IntakeError::SessionNotFound(err.message),
            _ => IntakeError::Infrastructure(err.to_string()),
        }
    }
}
