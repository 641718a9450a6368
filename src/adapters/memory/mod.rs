//! In-Memory Store Adapters
//!
//! Implementations of the repository ports backed by process memory.
//! Each store keeps one map behind a single `tokio::sync::RwLock`: reads
//! share the lock, and `update` runs its mutation while holding the write
//! guard so concurrent replies to one session never interleave.
//!
//! There is no expiry; entries live as long as the process.

mod alert_log;
mod chat_session_repository;
mod chatbot_repository;
mod intake_session_repository;
mod patient_repository;

pub use alert_log::InMemoryAlertLog;
pub use chat_session_repository::InMemoryChatSessionRepository;
pub use chatbot_repository::InMemoryChatbotRepository;
pub use intake_session_repository::InMemoryIntakeSessionRepository;
pub use patient_repository::InMemoryPatientRepository;
