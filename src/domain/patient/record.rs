//! Patient record aggregate.
//!
//! Created lazily the first time a patient id is referenced. Intake
//! completions append to its history and refresh the last known scores.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PatientId, Timestamp};
use crate::domain::intake::{Answers, IntakeSummary};

/// Timezone assigned to new patients when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub patient_id: PatientId,
    pub created_at: Timestamp,
    pub timezone: String,
}

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    Patient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Speaker,
    pub text: String,
    pub ts: Timestamp,
}

/// Copy of the answers from one completed intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSnapshot {
    pub taken_at: Timestamp,
    pub fields: Answers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LastScores {
    pub mmse: Option<f64>,
    pub adl: Option<f64>,
    pub severity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    pub profile: PatientProfile,
    pub long_term_memory: String,
    pub chat_history: Vec<HistoryEntry>,
    pub intake_history: Vec<HistoryEntry>,
    pub intake_snapshots: Vec<IntakeSnapshot>,
    pub last_scores: LastScores,
}

impl PatientRecord {
    pub fn new(patient_id: PatientId, timezone: impl Into<String>) -> Self {
        Self {
            patient_id,
            profile: PatientProfile {
                patient_id,
                created_at: Timestamp::now(),
                timezone: timezone.into(),
            },
            long_term_memory: String::new(),
            chat_history: Vec::new(),
            intake_history: Vec::new(),
            intake_snapshots: Vec::new(),
            last_scores: LastScores::default(),
        }
    }

    /// Folds a completed intake into the record.
    pub fn record_intake(&mut self, summary: &IntakeSummary, at: Timestamp) {
        self.intake_history.push(HistoryEntry {
            role: Speaker::Assistant,
            text: "Intake completed.".to_string(),
            ts: at,
        });
        self.intake_snapshots.push(IntakeSnapshot {
            taken_at: at,
            fields: summary.answers.clone(),
        });

        if let Some(mmse) = summary.answers.number("MMSE") {
            self.last_scores.mmse = Some(mmse);
        }
        if let Some(adl) = summary.answers.number("ADL") {
            self.last_scores.adl = Some(adl);
        }
        self.last_scores.severity = Some(summary.severity.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{FieldValue, Severity};

    fn summary(mmse: Option<f64>, adl: Option<f64>) -> IntakeSummary {
        let mut answers = Answers::new();
        answers.insert("MMSE", mmse.map(FieldValue::Number));
        answers.insert("ADL", adl.map(FieldValue::Number));
        let severity = Severity::infer(&answers);
        IntakeSummary { answers, severity }
    }

    #[test]
    fn new_record_is_empty() {
        let record = PatientRecord::new(PatientId::new(3), DEFAULT_TIMEZONE);

        assert_eq!(record.profile.patient_id, PatientId::new(3));
        assert_eq!(record.profile.timezone, "America/Los_Angeles");
        assert!(record.intake_history.is_empty());
        assert_eq!(record.last_scores, LastScores::default());
    }

    #[test]
    fn record_intake_appends_history_and_snapshot() {
        let mut record = PatientRecord::new(PatientId::new(3), DEFAULT_TIMEZONE);
        let at = Timestamp::now();

        record.record_intake(&summary(Some(26.0), Some(80.0)), at);

        assert_eq!(record.intake_history.len(), 1);
        assert_eq!(record.intake_history[0].text, "Intake completed.");
        assert_eq!(record.intake_history[0].role, Speaker::Assistant);
        assert_eq!(record.intake_snapshots.len(), 1);
        assert_eq!(record.intake_snapshots[0].fields.number("MMSE"), Some(26.0));
        assert_eq!(record.last_scores.mmse, Some(26.0));
        assert_eq!(record.last_scores.adl, Some(80.0));
        assert_eq!(record.last_scores.severity, Some(0.2));
    }

    #[test]
    fn absent_scores_keep_previous_values() {
        let mut record = PatientRecord::new(PatientId::new(3), DEFAULT_TIMEZONE);
        record.record_intake(&summary(Some(26.0), Some(80.0)), Timestamp::now());

        record.record_intake(&summary(None, None), Timestamp::now());

        assert_eq!(record.last_scores.mmse, Some(26.0));
        assert_eq!(record.last_scores.adl, Some(80.0));
        assert_eq!(record.last_scores.severity, Some(0.9));
        assert_eq!(record.intake_snapshots.len(), 2);
    }
}
