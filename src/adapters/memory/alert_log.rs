//! In-memory alert log.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AlertId, DomainError, PatientId};
use crate::domain::patient::{Alert, AlertDraft};
use crate::ports::AlertLog;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertLog {
    alerts: Arc<RwLock<Vec<Alert>>>,
}

impl InMemoryAlertLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertLog for InMemoryAlertLog {
    async fn append(&self, draft: AlertDraft) -> Result<Alert, DomainError> {
        let mut alerts = self.alerts.write().await;
        let alert = draft.assign(AlertId::new(alerts.len() as u64));
        alerts.push(alert.clone());
        Ok(alert)
    }

    async fn list(&self, patient_id: Option<PatientId>) -> Result<Vec<Alert>, DomainError> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .filter(|a| patient_id.map_or(true, |p| a.patient_id == p))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::intake::{Answers, FieldValue, IntakeSummary, Severity};

    fn draft(patient: u64) -> AlertDraft {
        let mut answers = Answers::new();
        answers.insert("MMSE", Some(FieldValue::Number(8.0)));
        let summary = IntakeSummary {
            severity: Severity::infer(&answers),
            answers,
        };
        AlertDraft::from_intake(PatientId::new(patient), &summary, Timestamp::now()).unwrap()
    }

    #[tokio::test]
    async fn ids_are_sequential_from_zero() {
        let log = InMemoryAlertLog::new();

        let first = log.append(draft(1)).await.unwrap();
        let second = log.append(draft(2)).await.unwrap();

        assert_eq!(first.id, AlertId::new(0));
        assert_eq!(second.id, AlertId::new(1));
    }

    #[tokio::test]
    async fn list_filters_by_patient_in_creation_order() {
        let log = InMemoryAlertLog::new();
        log.append(draft(1)).await.unwrap();
        log.append(draft(2)).await.unwrap();
        log.append(draft(1)).await.unwrap();

        let all = log.list(None).await.unwrap();
        let mine = log.list(Some(PatientId::new(1))).await.unwrap();

        assert_eq!(all.len(), 3);
        let ids: Vec<u64> = mine.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
