//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Stores
//!
//! - `PatientRepository` - Patient records, created lazily
//! - `IntakeSessionRepository` - Intake questionnaire sessions
//! - `ChatSessionRepository` - Check-in chat sessions
//! - `ChatbotRepository` - One treatment chatbot per patient
//! - `AlertLog` - Append-only clinician alerts
//!
//! Read-then-write changes go through `update`, which runs a [`Mutation`]
//! while the store's write guard is held.

mod alert_log;
mod chat_session_repository;
mod chatbot_repository;
mod intake_session_repository;
mod patient_repository;

pub use alert_log::AlertLog;
pub use chat_session_repository::ChatSessionRepository;
pub use chatbot_repository::ChatbotRepository;
pub use intake_session_repository::IntakeSessionRepository;
pub use patient_repository::PatientRepository;

use tokio::sync::oneshot;

/// In-place change applied to a stored aggregate under the store's lock.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Wraps a closure that computes a result into a [`Mutation`], returning a
/// receiver for that result.
///
/// The receiver yields an error if the store never ran the mutation (for
/// example, because the aggregate was not found).
pub fn capture<T, R, F>(f: F) -> (Mutation<T>, oneshot::Receiver<R>)
where
    T: 'static,
    R: Send + 'static,
    F: FnOnce(&mut T) -> R + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let mutation: Mutation<T> = Box::new(move |target: &mut T| {
        let _ = tx.send(f(target));
    });
    (mutation, rx)
}
