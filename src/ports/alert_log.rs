//! Alert log port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PatientId};
use crate::domain::patient::{Alert, AlertDraft};

/// Append-only log of clinician alerts.
#[async_trait]
pub trait AlertLog: Send + Sync {
    /// Log a drafted alert, assigning the next sequential id.
    async fn append(&self, draft: AlertDraft) -> Result<Alert, DomainError>;

    /// Alerts in creation order, optionally limited to one patient.
    async fn list(&self, patient_id: Option<PatientId>) -> Result<Vec<Alert>, DomainError>;
}
