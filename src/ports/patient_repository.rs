//! Patient record repository port.

use async_trait::async_trait;

use super::Mutation;
use crate::domain::foundation::{DomainError, PatientId};
use crate::domain::patient::PatientRecord;

/// Repository port for patient records.
///
/// Records are never deleted during the process lifetime.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Returns the patient's record, creating it with `timezone` if this is
    /// the first reference to the id.
    async fn get_or_create(
        &self,
        id: PatientId,
        timezone: &str,
    ) -> Result<PatientRecord, DomainError>;

    /// Find a record by patient id.
    ///
    /// Returns `None` if the patient has never been referenced.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<PatientRecord>, DomainError>;

    /// Apply `mutation` to the stored record.
    ///
    /// Returns `false` without running the mutation if no record exists.
    async fn update(
        &self,
        id: PatientId,
        mutation: Mutation<PatientRecord>,
    ) -> Result<bool, DomainError>;
}
