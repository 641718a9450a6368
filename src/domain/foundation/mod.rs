//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the CuraLoop domain.

mod chat_status;
mod errors;
mod ids;
mod timestamp;

pub use chat_status::ChatSessionStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AlertId, ChatSessionId, ChatbotId, IntakeSessionId, PatientId};
pub use timestamp::Timestamp;
