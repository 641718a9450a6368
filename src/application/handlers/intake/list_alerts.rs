//! ListAlertsHandler - Query handler for the clinician alert log.

use std::sync::Arc;

use crate::domain::foundation::PatientId;
use crate::domain::intake::IntakeError;
use crate::domain::patient::Alert;
use crate::ports::AlertLog;

/// Lists alerts in creation order, for one patient or for everyone.
#[derive(Debug, Clone, Default)]
pub struct ListAlertsQuery {
    pub patient_id: Option<PatientId>,
}

pub struct ListAlertsHandler {
    alerts: Arc<dyn AlertLog>,
}

impl ListAlertsHandler {
    pub fn new(alerts: Arc<dyn AlertLog>) -> Self {
        Self { alerts }
    }

    pub async fn handle(&self, query: ListAlertsQuery) -> Result<Vec<Alert>, IntakeError> {
        Ok(self.alerts.list(query.patient_id).await?)
    }
}
