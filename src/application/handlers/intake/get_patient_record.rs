//! GetPatientRecordHandler - Query handler for a patient's registry record.

use std::sync::Arc;

use crate::domain::foundation::PatientId;
use crate::domain::intake::IntakeError;
use crate::domain::patient::PatientRecord;
use crate::ports::PatientRepository;

#[derive(Debug, Clone)]
pub struct GetPatientRecordQuery {
    pub patient_id: PatientId,
}

pub struct GetPatientRecordHandler {
    patients: Arc<dyn PatientRepository>,
}

impl GetPatientRecordHandler {
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self { patients }
    }

    /// Records exist only once an intake has been started for the patient.
    pub async fn handle(&self, query: GetPatientRecordQuery) -> Result<PatientRecord, IntakeError> {
        self.patients
            .find_by_id(query.patient_id)
            .await?
            .ok_or_else(|| IntakeError::patient_not_found(query.patient_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPatientRepository;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn unknown_patient_is_not_found() {
        let handler = GetPatientRecordHandler::new(Arc::new(InMemoryPatientRepository::new()));

        let err = handler
            .handle(GetPatientRecordQuery { patient_id: PatientId::new(9) })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PatientNotFound);
    }

    #[tokio::test]
    async fn returns_registered_patient() {
        let patients = Arc::new(InMemoryPatientRepository::new());
        patients.get_or_create(PatientId::new(9), "UTC").await.unwrap();
        let handler = GetPatientRecordHandler::new(patients);

        let record = handler
            .handle(GetPatientRecordQuery { patient_id: PatientId::new(9) })
            .await
            .unwrap();

        assert_eq!(record.patient_id, PatientId::new(9));
        assert_eq!(record.profile.timezone, "UTC");
    }
}
