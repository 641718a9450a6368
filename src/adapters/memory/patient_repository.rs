//! In-memory patient records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PatientId};
use crate::domain::patient::PatientRecord;
use crate::ports::{Mutation, PatientRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientRepository {
    records: Arc<RwLock<HashMap<PatientId, PatientRecord>>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known patients.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn get_or_create(
        &self,
        id: PatientId,
        timezone: &str,
    ) -> Result<PatientRecord, DomainError> {
        if let Some(record) = self.records.read().await.get(&id) {
            return Ok(record.clone());
        }

        let mut records = self.records.write().await;
        let record = records
            .entry(id)
            .or_insert_with(|| PatientRecord::new(id, timezone));
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<PatientRecord>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        id: PatientId,
        mutation: Mutation<PatientRecord>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) => {
                mutation(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
